//! The keybinding legend: a static panel listing what every key does,
//! toggled with F1.
//!
//! Entry layout is computed by `layout()`, pure and unit-tested: icons at
//! their anchors, description lines stepped down a fixed 18 units, the
//! first line's baseline adjustable per entry. The draw order list must
//! reference a known entry — a miss is a configuration defect and panics.

use bevy::prelude::*;

use crate::data::legend_text;
use crate::level::Level;
use crate::shared::*;

pub const LEGEND_LINE_HEIGHT: f32 = 18.0;
pub const KEY_ICON_SIZE: f32 = 30.0;
/// Description column, right of the icon column.
pub const DESC_OFFSET_X: f32 = 40.0;
/// Panel placement and size on screen.
pub const PANEL_POS: Vec2 = Vec2::new(16.0, 60.0);
pub const PANEL_SIZE: Vec2 = Vec2::new(300.0, 420.0);

/// Key ids with a dedicated icon image; everything else renders the
/// generic keycap with the id as its label.
const DEDICATED_ICONS: &[&str] = &["lclick", "space", "rshift", "esc"];

// ═══════════════════════════════════════════════════════════════════════
// ENTRIES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct KeybindingEntry {
    /// Key id, or empty for the icon-less label entry.
    pub key: &'static str,
    pub lines: Vec<&'static str>,
    /// Icon anchor inside the panel.
    pub pos: Vec2,
    /// Baseline adjustment for the first description line.
    pub vert_shift: f32,
}

fn entry(key: &'static str, legend_id: &str, pos: Vec2, vert_shift: f32) -> KeybindingEntry {
    let text = legend_text(legend_id)
        .unwrap_or_else(|| panic!("no legend text registered for '{legend_id}'"));
    KeybindingEntry {
        key,
        lines: text.split('|').collect(),
        pos,
        vert_shift,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PANEL
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone)]
pub struct KeybindingsPanel {
    pub visible: bool,
    entries: Vec<KeybindingEntry>,
    order: Vec<&'static str>,
}

impl KeybindingsPanel {
    pub fn standard() -> Self {
        let entries = vec![
            entry("", "legend task hint", Vec2::new(40.0, 380.0), 0.0),
            entry("lclick", "legend lclick", Vec2::new(24.0, 48.0), 0.0),
            entry("space", "legend space", Vec2::new(24.0, 88.0), -12.0),
            entry("q", "legend q", Vec2::new(24.0, 128.0), 0.0),
            entry("e", "legend e", Vec2::new(24.0, 168.0), 0.0),
            entry("i", "legend i", Vec2::new(24.0, 208.0), 0.0),
            entry("rshift", "legend rshift", Vec2::new(24.0, 248.0), -12.0),
            entry("esc", "legend esc", Vec2::new(24.0, 288.0), 0.0),
            entry("f1", "legend f1", Vec2::new(24.0, 328.0), 0.0),
        ];
        let order = vec![
            "lclick", "space", "q", "e", "i", "rshift", "esc", "f1", "",
        ];
        Self::from_parts(entries, order)
    }

    /// Also the test seam for broken configurations.
    pub fn from_parts(entries: Vec<KeybindingEntry>, order: Vec<&'static str>) -> Self {
        Self {
            visible: false,
            entries,
            order,
        }
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    /// The entry for a draw-order id. Exactly one entry must match.
    fn entry(&self, key: &str) -> &KeybindingEntry {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .unwrap_or_else(|| panic!("legend draw order references unknown key id '{key}'"))
    }

    /// Panel-relative draw list, in draw order.
    pub fn layout(&self) -> Vec<LegendItem> {
        let mut items = Vec::new();
        for key in &self.order {
            let entry = self.entry(key);
            let desc_origin = entry.pos + Vec2::new(DESC_OFFSET_X, entry.vert_shift);

            if !entry.key.is_empty() {
                let dedicated = DEDICATED_ICONS.contains(&entry.key);
                items.push(LegendItem::Icon {
                    key: entry.key,
                    dedicated,
                    pos: entry.pos,
                });
                if !dedicated {
                    // Generic keycap: the id doubles as the label.
                    items.push(LegendItem::KeyLabel {
                        text: entry.key,
                        pos: entry.pos + Vec2::new(8.0, 6.0),
                    });
                }
            }

            for (i, line) in entry.lines.iter().enumerate() {
                items.push(LegendItem::Line {
                    text: line,
                    pos: desc_origin + Vec2::new(0.0, i as f32 * LEGEND_LINE_HEIGHT),
                });
            }
        }
        items
    }
}

impl Default for KeybindingsPanel {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LegendItem {
    Icon {
        key: &'static str,
        dedicated: bool,
        pos: Vec2,
    },
    /// Literal key label drawn over a generic keycap.
    KeyLabel { text: &'static str, pos: Vec2 },
    Line { text: &'static str, pos: Vec2 },
}

// ═══════════════════════════════════════════════════════════════════════
// UI
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct LegendPanelRoot;

#[derive(Component)]
pub struct LegendLabelText;

fn icon_path(key: &str, dedicated: bool) -> String {
    if dedicated {
        format!("ui/keys/{key}.png")
    } else {
        "ui/keys/generic.png".to_string()
    }
}

pub fn toggle_legend_panel(
    keys: Res<ButtonInput<KeyCode>>,
    level: Res<Level>,
    mut panel: ResMut<KeybindingsPanel>,
) {
    if keys.just_pressed(level.player.controls.toggle_legend) {
        panel.toggle_visibility();
    }
}

/// Spawns/despawns the panel tree to track visibility. The panel is
/// static, so the tree is built once per toggle, not per frame.
pub fn sync_legend_panel(
    mut commands: Commands,
    panel: Res<KeybindingsPanel>,
    asset_server: Res<AssetServer>,
    theme: Res<MenuTheme>,
    font: Res<UiFontHandle>,
    root_query: Query<Entity, With<LegendPanelRoot>>,
) {
    match (panel.visible, root_query.get_single()) {
        (true, Err(_)) => {
            commands
                .spawn((
                    LegendPanelRoot,
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(PANEL_POS.x),
                        top: Val::Px(PANEL_POS.y),
                        width: Val::Px(PANEL_SIZE.x),
                        height: Val::Px(PANEL_SIZE.y),
                        ..default()
                    },
                    ImageNode::new(asset_server.load("ui/keybind_panel.png")),
                    GlobalZIndex(60),
                    PickingBehavior::IGNORE,
                ))
                .with_children(|parent| {
                    for item in panel.layout() {
                        match item {
                            LegendItem::Icon { key, dedicated, pos } => {
                                parent.spawn((
                                    Node {
                                        position_type: PositionType::Absolute,
                                        left: Val::Px(pos.x),
                                        top: Val::Px(pos.y),
                                        width: Val::Px(KEY_ICON_SIZE),
                                        height: Val::Px(KEY_ICON_SIZE),
                                        ..default()
                                    },
                                    ImageNode::new(
                                        asset_server.load(icon_path(key, dedicated)),
                                    ),
                                    PickingBehavior::IGNORE,
                                ));
                            }
                            LegendItem::KeyLabel { text, pos } => {
                                spawn_legend_text(
                                    parent,
                                    text,
                                    pos,
                                    Color::WHITE,
                                    &theme,
                                    &font.0,
                                );
                            }
                            LegendItem::Line { text, pos } => {
                                spawn_legend_text(
                                    parent,
                                    text,
                                    pos,
                                    Color::BLACK,
                                    &theme,
                                    &font.0,
                                );
                            }
                        }
                    }
                });
        }
        (false, Ok(entity)) => {
            commands.entity(entity).despawn_recursive();
        }
        _ => {}
    }
}

fn spawn_legend_text(
    parent: &mut ChildBuilder,
    text: &str,
    pos: Vec2,
    color: Color,
    theme: &MenuTheme,
    font: &Handle<Font>,
) {
    parent.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(pos.x),
            top: Val::Px(pos.y),
            ..default()
        },
        Text::new(text.to_string()),
        TextFont {
            font: font.clone(),
            font_size: theme.hint_font_size + 2.0,
            ..default()
        },
        TextColor(color),
        PickingBehavior::IGNORE,
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// HUD LABEL — "Keybindings [F1]", grayed while the player is blocked
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_legend_label(mut commands: Commands, theme: Res<MenuTheme>, font: Res<UiFontHandle>) {
    commands.spawn((
        LegendLabelText,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            top: Val::Px(16.0),
            ..default()
        },
        Text::new("Keybindings [F1]"),
        TextFont {
            font: font.0.clone(),
            font_size: theme.hint_font_size + 4.0,
            ..default()
        },
        TextColor(Color::WHITE),
        GlobalZIndex(30),
        PickingBehavior::IGNORE,
    ));
}

pub fn tint_legend_label(
    level: Res<Level>,
    mut query: Query<&mut TextColor, With<LegendLabelText>>,
) {
    let Ok(mut color) = query.get_single_mut() else {
        return;
    };
    color.0 = if level.player.blocked {
        Color::srgb(0.6, 0.6, 0.6)
    } else {
        Color::WHITE
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_references_every_entry_exactly_once() {
        let panel = KeybindingsPanel::standard();
        assert_eq!(panel.order.len(), panel.entries.len());
        for key in &panel.order {
            let matches = panel.entries.iter().filter(|e| e.key == *key).count();
            assert_eq!(matches, 1, "key id '{key}' must match exactly one entry");
        }
    }

    #[test]
    fn test_standard_layout_builds() {
        let panel = KeybindingsPanel::standard();
        let items = panel.layout();
        assert!(!items.is_empty());
        // Eight keyed entries draw an icon each.
        let icons = items
            .iter()
            .filter(|i| matches!(i, LegendItem::Icon { .. }))
            .count();
        assert_eq!(icons, 8);
    }

    #[test]
    #[should_panic(expected = "unknown key id")]
    fn test_unknown_order_id_fails_fast() {
        let entries = vec![entry("space", "legend space", Vec2::ZERO, 0.0)];
        let panel = KeybindingsPanel::from_parts(entries, vec!["space", "middleclick"]);
        let _ = panel.layout();
    }

    #[test]
    fn test_multi_line_descriptions_step_by_exactly_18() {
        let panel = KeybindingsPanel::standard();
        let items = panel.layout();

        // Collect the line positions belonging to the rshift entry.
        let lines: Vec<&LegendItem> = items
            .iter()
            .filter(|i| {
                matches!(i, LegendItem::Line { text, .. }
                    if legend_text("legend rshift").unwrap().split('|').any(|l| l == *text))
            })
            .collect();
        assert_eq!(lines.len(), 2);
        let (LegendItem::Line { pos: first, .. }, LegendItem::Line { pos: second, .. }) =
            (lines[0], lines[1])
        else {
            unreachable!()
        };
        assert_eq!(second.y - first.y, LEGEND_LINE_HEIGHT);
        assert_eq!(second.x, first.x);
    }

    #[test]
    fn test_vert_shift_moves_the_first_line_only() {
        let e = entry("space", "legend space", Vec2::new(24.0, 88.0), -12.0);
        let panel = KeybindingsPanel::from_parts(vec![e], vec!["space"]);
        let items = panel.layout();
        let lines: Vec<Vec2> = items
            .iter()
            .filter_map(|i| match i {
                LegendItem::Line { pos, .. } => Some(*pos),
                _ => None,
            })
            .collect();
        assert_eq!(lines[0].y, 88.0 - 12.0);
        assert_eq!(lines[1].y, lines[0].y + LEGEND_LINE_HEIGHT);
    }

    #[test]
    fn test_generic_icons_carry_a_key_label() {
        let panel = KeybindingsPanel::standard();
        let items = panel.layout();
        // "q" has no dedicated icon, so it gets a keycap label.
        assert!(items
            .iter()
            .any(|i| matches!(i, LegendItem::KeyLabel { text: "q", .. })));
        // "space" has a dedicated icon and no label.
        assert!(!items
            .iter()
            .any(|i| matches!(i, LegendItem::KeyLabel { text: "space", .. })));
    }

    #[test]
    fn test_empty_key_entry_draws_text_only() {
        let panel = KeybindingsPanel::standard();
        let items = panel.layout();
        let hint = legend_text("legend task hint").unwrap();
        assert!(items
            .iter()
            .any(|i| matches!(i, LegendItem::Line { text, .. } if *text == hint)));
    }

    #[test]
    fn test_toggle_visibility() {
        let mut panel = KeybindingsPanel::standard();
        assert!(!panel.visible);
        panel.toggle_visibility();
        assert!(panel.visible);
        panel.toggle_visibility();
        assert!(!panel.visible);
    }
}
