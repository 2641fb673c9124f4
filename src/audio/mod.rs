//! One-shot sound effects and the looping farm theme.

use bevy::audio::Volume;
use bevy::prelude::*;

use crate::config::Settings;
use crate::shared::*;

fn sfx_path(sfx: SfxId) -> &'static str {
    match sfx {
        SfxId::MenuMove => "audio/sfx/menu_move.ogg",
        SfxId::MenuConfirm => "audio/sfx/menu_select.ogg",
        SfxId::Save => "audio/sfx/save_chime.ogg",
        SfxId::RoundBell => "audio/sfx/round_bell.ogg",
    }
}

/// Spawns one-shot audio sources that despawn themselves when finished.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<Settings>,
) {
    for event in events.read() {
        commands.spawn((
            AudioPlayer::new(asset_server.load(sfx_path(event.sfx))),
            PlaybackSettings::DESPAWN.with_volume(Volume::new(settings.sfx_volume)),
        ));
    }
}

/// The farm theme loops from startup.
pub fn start_music(mut commands: Commands, asset_server: Res<AssetServer>, settings: Res<Settings>) {
    commands.spawn((
        AudioPlayer::new(asset_server.load("audio/music/cloverfall_theme.ogg")),
        PlaybackSettings::LOOP.with_volume(Volume::new(settings.music_volume)),
    ));
}

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, start_music)
            .add_systems(Update, handle_play_sfx);
    }
}
