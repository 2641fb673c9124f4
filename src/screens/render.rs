//! Generic menu renderer. One system draws whichever screen is active by
//! diffing its `MenuView` against the last-rendered one and rebuilding the
//! panel when it changed. Row nodes carry pointer observers that feed hover
//! and click back into the event queue.

use bevy::prelude::*;

use super::{kit::MenuView, Menus};
use crate::game::GameContext;
use crate::shared::*;

#[derive(Component)]
pub struct MenuRoot;

#[derive(Component)]
pub struct MenuRowNode {
    pub index: usize,
}

#[derive(Resource, Default)]
pub struct MenuUiCache {
    last: Option<(GameState, MenuView)>,
}

pub fn sync_menu_ui(
    mut commands: Commands,
    ctx: Res<GameContext>,
    menus: Res<Menus>,
    theme: Res<MenuTheme>,
    font: Res<UiFontHandle>,
    mut cache: ResMut<MenuUiCache>,
    root_query: Query<Entity, With<MenuRoot>>,
) {
    let desired = if ctx.is_paused() {
        menus.get(ctx.current).map(|screen| (ctx.current, screen.view()))
    } else {
        None
    };

    if cache.last == desired {
        return;
    }

    for entity in &root_query {
        commands.entity(entity).despawn_recursive();
    }

    if let Some((_, ref view)) = desired {
        spawn_menu(&mut commands, view, &theme, &font.0);
    }
    cache.last = desired;
}

fn spawn_menu(commands: &mut Commands, view: &MenuView, theme: &MenuTheme, font: &Handle<Font>) {
    commands
        .spawn((
            MenuRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(theme.bg_overlay),
            GlobalZIndex(50),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(theme.panel_width),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::FlexStart,
                        padding: UiRect::all(Val::Px(theme.panel_padding)),
                        row_gap: Val::Px(theme.panel_gap),
                        border: UiRect::all(Val::Px(theme.panel_border_width)),
                        ..default()
                    },
                    BackgroundColor(theme.panel_bg),
                    BorderColor(theme.panel_border),
                    PickingBehavior::IGNORE,
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(view.title.clone()),
                        TextFont {
                            font: font.clone(),
                            font_size: theme.title_font_size,
                            ..default()
                        },
                        TextColor(theme.text_color_selected),
                        PickingBehavior::IGNORE,
                    ));

                    for (index, row) in view.rows.iter().enumerate() {
                        let selected = index == view.selected;
                        let color = if !row.enabled {
                            theme.text_color_disabled
                        } else if selected {
                            theme.text_color_selected
                        } else {
                            theme.text_color
                        };
                        let prefix = if selected { "> " } else { "  " };
                        panel
                            .spawn((
                                MenuRowNode { index },
                                Text::new(format!("{prefix}{}", row.label)),
                                TextFont {
                                    font: font.clone(),
                                    font_size: theme.row_font_size,
                                    ..default()
                                },
                                TextColor(color),
                            ))
                            .observe(on_row_over)
                            .observe(on_row_click);
                    }

                    panel.spawn((
                        Text::new(view.footer.clone()),
                        TextFont {
                            font: font.clone(),
                            font_size: theme.hint_font_size,
                            ..default()
                        },
                        TextColor(theme.text_color_disabled),
                        PickingBehavior::IGNORE,
                    ));
                });
        });
}

// ─────────────────────────────────────────────────────────────────────────────
// Pointer observers — feed hover/click into the event queue
// ─────────────────────────────────────────────────────────────────────────────

fn on_row_over(
    trigger: Trigger<Pointer<Over>>,
    query: Query<&MenuRowNode>,
    mut events: EventWriter<GameEvent>,
) {
    if let Ok(row) = query.get(trigger.entity()) {
        events.send(GameEvent::SetCursor(CursorGlyph::Point));
        events.send(GameEvent::PointerRow(row.index));
    }
}

fn on_row_click(
    trigger: Trigger<Pointer<Click>>,
    query: Query<&MenuRowNode>,
    mut events: EventWriter<GameEvent>,
) {
    if query.get(trigger.entity()).is_ok() {
        events.send(GameEvent::PointerClick);
    }
}
