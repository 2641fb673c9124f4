//! Title screen.

use super::kit::{cursor_down, cursor_up, nav_for, MenuRow, MenuView, Nav};
use super::{Screen, ScreenActions, ScreenCtx};
use crate::shared::*;

const OPTIONS: &[&str] = &["Start Farming", "Quit"];

pub struct MainMenuScreen {
    cursor: usize,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    fn activate(&mut self, actions: &mut ScreenActions) {
        actions.sfx.push(SfxId::MenuConfirm);
        match self.cursor {
            0 => actions.switch_to = Some(GameState::Play),
            1 => actions.quit = true,
            _ => {}
        }
    }
}

impl Screen for MainMenuScreen {
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
            // The title screen has nothing to cancel back to.
            Nav::Cancel | Nav::Left | Nav::Right => {}
        }
        true
    }

    fn view(&self) -> MenuView {
        MenuView {
            title: "CLOVERFALL".into(),
            rows: OPTIONS.iter().map(|label| MenuRow::new(*label)).collect(),
            selected: self.cursor,
            footer: "Up/Down: Select | Enter: Confirm".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::level::Level;
    use crate::player::ControlMap;
    use crate::save::SaveFile;
    use bevy::prelude::*;

    fn harness() -> (Level, SaveFile, Settings) {
        let save = SaveFile::default();
        let level = Level::new(&save, ControlMap::default());
        (level, save, Settings::default())
    }

    #[test]
    fn test_start_switches_to_play() {
        let (mut level, mut save, mut settings) = harness();
        let mut screen = MainMenuScreen::new();
        let mut ctx = ScreenCtx {
            level: &mut level,
            save: &mut save,
            settings: &mut settings,
        };
        let mut actions = ScreenActions::default();
        let consumed = screen.handle_event(
            &GameEvent::KeyDown(KeyCode::Enter),
            &mut ctx,
            &mut actions,
        );
        assert!(consumed);
        assert_eq!(actions.switch_to, Some(GameState::Play));
        assert!(!actions.quit);
    }

    #[test]
    fn test_quit_row_requests_exit() {
        let (mut level, mut save, mut settings) = harness();
        let mut screen = MainMenuScreen::new();
        let mut ctx = ScreenCtx {
            level: &mut level,
            save: &mut save,
            settings: &mut settings,
        };
        let mut actions = ScreenActions::default();
        screen.handle_event(&GameEvent::KeyDown(KeyCode::ArrowDown), &mut ctx, &mut actions);
        screen.handle_event(&GameEvent::KeyDown(KeyCode::Enter), &mut ctx, &mut actions);
        assert!(actions.quit);
    }

    #[test]
    fn test_hover_moves_the_cursor() {
        let (mut level, mut save, mut settings) = harness();
        let mut screen = MainMenuScreen::new();
        let mut ctx = ScreenCtx {
            level: &mut level,
            save: &mut save,
            settings: &mut settings,
        };
        let mut actions = ScreenActions::default();
        screen.handle_event(&GameEvent::PointerRow(1), &mut ctx, &mut actions);
        assert_eq!(screen.view().selected, 1);
        // Out-of-range hovers are ignored.
        screen.handle_event(&GameEvent::PointerRow(9), &mut ctx, &mut actions);
        assert_eq!(screen.view().selected, 1);
    }
}
