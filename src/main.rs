mod audio;
mod config;
mod data;
mod dialogue;
mod game;
mod level;
mod overlay;
mod player;
mod save;
mod screens;
mod shared;
mod tutorial;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    // Config and save load before the app so the level and context can be
    // built from them.
    let settings = config::Settings::load();
    let save_file = save::SaveFile::load();
    let controls = player::ControlMap::from_bindings(&settings.bindings);
    let level = level::Level::new(&save_file, controls);
    let context = game::GameContext::new(save_file.round);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Cloverfall".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Orchestrator state
        .insert_resource(context)
        .insert_resource(settings)
        .insert_resource(save_file)
        .insert_resource(level)
        .insert_resource(screens::Menus::standard())
        .insert_resource(data::DialogueRegistry::standard())
        .init_resource::<dialogue::DialogueManager>()
        .init_resource::<tutorial::Tutorial>()
        .init_resource::<MenuTheme>()
        // Events
        .add_event::<GameEvent>()
        .add_event::<PlaySfxEvent>()
        // Domain plugins
        .add_plugins(game::GamePlugin)
        .add_plugins(level::LevelPlugin)
        .add_plugins(overlay::OverlayPlugin)
        .add_plugins(audio::AudioPlugin)
        // Camera & fonts
        .add_systems(PreStartup, load_ui_font)
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_scale(Vec3::splat(1.0 / PIXEL_SCALE)),
    ));
}

fn load_ui_font(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(UiFontHandle(asset_server.load("fonts/LycheeSoda.ttf")));
}
