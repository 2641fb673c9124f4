//! Pause menu.

use super::kit::{cursor_down, cursor_up, nav_for, MenuRow, MenuView, Nav};
use super::{Screen, ScreenActions, ScreenCtx};
use crate::shared::*;

const OPTIONS: &[&str] = &[
    "Resume",
    "Save and Resume",
    "Tasks",
    "Settings",
    "Quit to Title",
];

pub struct PauseScreen {
    cursor: usize,
}

impl PauseScreen {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    fn activate(&mut self, actions: &mut ScreenActions) {
        actions.sfx.push(if self.cursor == 1 {
            SfxId::Save
        } else {
            SfxId::MenuConfirm
        });
        actions.switch_to = match self.cursor {
            0 => Some(GameState::Play),
            1 => Some(GameState::SaveAndResume),
            2 => Some(GameState::PlayerTask),
            3 => Some(GameState::Settings),
            4 => Some(GameState::MainMenu),
            _ => None,
        };
    }
}

impl Screen for PauseScreen {
    fn handle_event(
        &mut self,
        event: &GameEvent,
        _ctx: &mut ScreenCtx,
        actions: &mut ScreenActions,
    ) -> bool {
        let Some(nav) = nav_for(event) else {
            return false;
        };
        match nav {
            Nav::Up => {
                cursor_up(&mut self.cursor);
                actions.sfx.push(SfxId::MenuMove);
            }
            Nav::Down => {
                cursor_down(&mut self.cursor, OPTIONS.len());
                actions.sfx.push(SfxId::MenuMove);
            }
            Nav::Hover(index) => {
                if index < OPTIONS.len() {
                    self.cursor = index;
                }
            }
            Nav::Activate | Nav::Click => self.activate(actions),
            Nav::Cancel => actions.switch_to = Some(GameState::Play),
            Nav::Left | Nav::Right => {}
        }
        true
    }

    fn view(&self) -> MenuView {
        MenuView {
            title: "PAUSED".into(),
            rows: OPTIONS.iter().map(|label| MenuRow::new(*label)).collect(),
            selected: self.cursor,
            footer: "Esc: Resume".into(),
        }
    }
}
