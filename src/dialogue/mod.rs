//! Dialogue: a registry-backed textbox with typewriter reveal.
//!
//! The manager is pure state; `sync_dialogue_box` mirrors it into a UI node
//! each frame. Player blocking around dialogue lifetimes is the
//! orchestrator's business, not handled here.

use bevy::prelude::*;

use crate::data::DialogueRegistry;
use crate::shared::*;

/// Characters revealed per second.
const REVEAL_SPEED: f32 = 40.0;
/// Advance-arrow bob cycle, seconds.
const BOB_PERIOD: f32 = 0.8;

// ═══════════════════════════════════════════════════════════════════════
// MANAGER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
struct ActiveDialogue {
    lines: Vec<&'static str>,
    index: usize,
    revealed: f32,
    anchor: Vec2,
    bob_timer: f32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct DialogueManager {
    active: Option<ActiveDialogue>,
}

impl DialogueManager {
    /// Opens a dialogue at the given anchor. No-op when the id is unknown
    /// (logged) — missing content should not stall the game.
    pub fn open_dialogue(&mut self, registry: &DialogueRegistry, id: &str, anchor: Vec2) {
        let Some(lines) = registry.get(id) else {
            warn!("Unknown dialogue id '{id}'.");
            return;
        };
        self.active = Some(ActiveDialogue {
            lines: lines.clone(),
            index: 0,
            revealed: 0.0,
            anchor,
            bob_timer: 0.0,
        });
    }

    /// Steps to the next line; past the last line the box closes.
    pub fn advance(&mut self) {
        let Some(ref mut dialogue) = self.active else {
            return;
        };
        if dialogue.index + 1 < dialogue.lines.len() {
            dialogue.index += 1;
            dialogue.revealed = 0.0;
        } else {
            self.active = None;
        }
    }

    pub fn showing_dialogue(&self) -> bool {
        self.active.is_some()
    }

    /// Full animation step: text reveal plus the advance-arrow bob.
    pub fn update(&mut self, dt: f32) {
        if let Some(ref mut dialogue) = self.active {
            dialogue.revealed += REVEAL_SPEED * dt;
            dialogue.bob_timer = (dialogue.bob_timer + dt) % BOB_PERIOD;
        }
    }

    /// Cutscene variant: the movement-frozen textbox still reveals text,
    /// but decorations hold still.
    pub fn update_blocked(&mut self, dt: f32) {
        if let Some(ref mut dialogue) = self.active {
            dialogue.revealed += REVEAL_SPEED * dt;
        }
    }

    /// The visible prefix of the current line.
    pub fn visible_text(&self) -> Option<String> {
        let dialogue = self.active.as_ref()?;
        let line = dialogue.lines[dialogue.index];
        let count = (dialogue.revealed as usize).min(line.chars().count());
        Some(line.chars().take(count).collect())
    }

    pub fn anchor(&self) -> Option<Vec2> {
        self.active.as_ref().map(|d| d.anchor)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UI SYNC
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct DialogueBoxNode;

#[derive(Component)]
pub struct DialogueBoxText;

/// Spawns/despawns the textbox to track the manager, and copies the
/// revealed text in.
pub fn sync_dialogue_box(
    mut commands: Commands,
    manager: Res<DialogueManager>,
    theme: Res<MenuTheme>,
    font: Res<UiFontHandle>,
    box_query: Query<Entity, With<DialogueBoxNode>>,
    mut text_query: Query<&mut Text, With<DialogueBoxText>>,
) {
    match (manager.showing_dialogue(), box_query.get_single()) {
        (true, Err(_)) => {
            let anchor = manager.anchor().unwrap_or_else(textbox_anchor);
            commands
                .spawn((
                    DialogueBoxNode,
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(anchor.x),
                        top: Val::Px(anchor.y),
                        width: Val::Px(TEXTBOX_SIZE.0),
                        height: Val::Px(TEXTBOX_SIZE.1),
                        padding: UiRect::all(Val::Px(16.0)),
                        ..default()
                    },
                    BackgroundColor(theme.panel_bg),
                    GlobalZIndex(40),
                    PickingBehavior::IGNORE,
                ))
                .with_children(|parent| {
                    parent.spawn((
                        DialogueBoxText,
                        Text::new(""),
                        TextFont {
                            font: font.0.clone(),
                            font_size: theme.row_font_size,
                            ..default()
                        },
                        TextColor(theme.text_color),
                        PickingBehavior::IGNORE,
                    ));
                });
        }
        (false, Ok(entity)) => {
            commands.entity(entity).despawn_recursive();
        }
        _ => {}
    }

    if let (Some(visible), Ok(mut text)) = (manager.visible_text(), text_query.get_single_mut()) {
        text.0 = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with(id: &str) -> DialogueManager {
        let registry = DialogueRegistry::standard();
        let mut manager = DialogueManager::default();
        manager.open_dialogue(&registry, id, Vec2::ZERO);
        manager
    }

    #[test]
    fn test_unknown_id_is_a_no_op() {
        let registry = DialogueRegistry::standard();
        let mut manager = DialogueManager::default();
        manager.open_dialogue(&registry, "no_such_dialogue", Vec2::ZERO);
        assert!(!manager.showing_dialogue());
    }

    #[test]
    fn test_advance_walks_lines_then_closes() {
        let mut manager = manager_with("intro_to_game");
        assert!(manager.showing_dialogue());
        manager.advance();
        manager.advance();
        assert!(manager.showing_dialogue());
        manager.advance();
        assert!(!manager.showing_dialogue());
    }

    #[test]
    fn test_reveal_is_gradual() {
        let mut manager = manager_with("tutorial_move");
        assert_eq!(manager.visible_text().unwrap(), "");
        manager.update(0.1);
        let partial = manager.visible_text().unwrap();
        assert!(!partial.is_empty());
        manager.update(60.0);
        let full = manager.visible_text().unwrap();
        assert!(full.len() > partial.len());
    }

    #[test]
    fn test_advance_resets_reveal() {
        let mut manager = manager_with("intro_to_game");
        manager.update(60.0);
        assert!(!manager.visible_text().unwrap().is_empty());
        manager.advance();
        assert_eq!(manager.visible_text().unwrap(), "");
    }
}
