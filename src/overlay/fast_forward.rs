//! Fast-forward hint. While a cutscene runs in play, a small option label
//! offers the fast-forward key; holding it swaps in the emphasized overlay.

use bevy::prelude::*;

use crate::game::GameContext;
use crate::level::Level;
use crate::shared::*;

#[derive(Component)]
pub struct FastForwardOption;

#[derive(Component)]
pub struct FastForwardOverlay;

pub fn spawn_fast_forward_hint(
    mut commands: Commands,
    theme: Res<MenuTheme>,
    font: Res<UiFontHandle>,
) {
    commands.spawn((
        FastForwardOption,
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(16.0),
            top: Val::Px(16.0),
            ..default()
        },
        Text::new("Hold Right Shift to fast-forward"),
        TextFont {
            font: font.0.clone(),
            font_size: theme.hint_font_size + 4.0,
            ..default()
        },
        TextColor(theme.text_color),
        Visibility::Hidden,
        GlobalZIndex(30),
        PickingBehavior::IGNORE,
    ));

    commands.spawn((
        FastForwardOverlay,
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(16.0),
            top: Val::Px(40.0),
            padding: UiRect::all(Val::Px(6.0)),
            ..default()
        },
        BackgroundColor(theme.panel_border.with_alpha(0.8)),
        Visibility::Hidden,
        GlobalZIndex(31),
        PickingBehavior::IGNORE,
    ))
    .with_children(|parent| {
        parent.spawn((
            Text::new(">> x5 >>"),
            TextFont {
                font: font.0.clone(),
                font_size: theme.row_font_size,
                ..default()
            },
            TextColor(Color::BLACK),
            PickingBehavior::IGNORE,
        ));
    });
}

pub fn sync_fast_forward_hint(
    ctx: Res<GameContext>,
    level: Res<Level>,
    keys: Res<ButtonInput<KeyCode>>,
    mut option_query: Query<&mut Visibility, (With<FastForwardOption>, Without<FastForwardOverlay>)>,
    mut overlay_query: Query<&mut Visibility, (With<FastForwardOverlay>, Without<FastForwardOption>)>,
) {
    let hint_active = level.cutscene.active && ctx.current == GameState::Play;
    let emphasized = hint_active && keys.pressed(level.player.controls.fast_forward);

    if let Ok(mut visibility) = option_query.get_single_mut() {
        *visibility = if hint_active {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    if let Ok(mut visibility) = overlay_query.get_single_mut() {
        *visibility = if emphasized {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}
