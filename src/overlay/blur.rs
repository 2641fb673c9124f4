//! Goggles vision effect: a frosted full-screen overlay while the player
//! wears goggles in play.

use bevy::prelude::*;

use crate::game::GameContext;
use crate::level::Level;
use crate::shared::*;

#[derive(Component)]
pub struct VisionBlurOverlay;

pub fn spawn_vision_blur(mut commands: Commands) {
    commands.spawn((
        VisionBlurOverlay,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(0.85, 0.9, 1.0, 0.28)),
        Visibility::Hidden,
        GlobalZIndex(20),
        PickingBehavior::IGNORE,
    ));
}

pub fn sync_vision_blur(
    ctx: Res<GameContext>,
    level: Res<Level>,
    mut query: Query<&mut Visibility, With<VisionBlurOverlay>>,
) {
    let Ok(mut visibility) = query.get_single_mut() else {
        return;
    };
    *visibility = if level.player.has_goggles() && ctx.current == GameState::Play {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
}
