//! Settings screen: volume sliders plus a read-only binding listing.
//! Changes are written back into `Settings`; the orchestrator persists the
//! RON file once the screen is left.

use super::kit::{cursor_down, cursor_up, nav_for, MenuRow, MenuView, Nav};
use super::{Screen, ScreenActions, ScreenCtx};
use crate::config::Settings;
use crate::shared::*;

const VOLUME_STEP: f32 = 0.05;

/// Row order: 0 = music, 1 = sfx, then bindings, then Back.
const ROW_MUSIC: usize = 0;
const ROW_SFX: usize = 1;
const BINDING_ROWS: usize = 4;
const ROW_BACK: usize = 2 + BINDING_ROWS;

pub struct SettingsScreen {
    cursor: usize,
    dirty: bool,
    /// Display cache; `view(&self)` cannot reach the Settings resource.
    shown: Settings,
}

impl SettingsScreen {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            dirty: false,
            shown: Settings::default(),
        }
    }

    fn row_count(&self) -> usize {
        ROW_BACK + 1
    }

    fn adjust(&mut self, settings: &mut Settings, delta: f32) {
        match self.cursor {
            ROW_MUSIC => settings.music_volume += delta,
            ROW_SFX => settings.sfx_volume += delta,
            _ => return,
        }
        settings.clamp_volumes();
        self.shown = settings.clone();
        self.dirty = true;
    }

    fn leave(&mut self, actions: &mut ScreenActions) {
        if self.dirty {
            actions.store_settings = true;
            self.dirty = false;
        }
        actions.switch_to = Some(GameState::Pause);
    }
}

impl Screen for SettingsScreen {
    fn handle_event(
        &mut self,
        event: &GameEvent,
        ctx: &mut ScreenCtx,
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
                cursor_down(&mut self.cursor, self.row_count());
                actions.sfx.push(SfxId::MenuMove);
            }
            Nav::Left => self.adjust(ctx.settings, -VOLUME_STEP),
            Nav::Right => self.adjust(ctx.settings, VOLUME_STEP),
            Nav::Hover(index) => {
                if index < self.row_count() {
                    self.cursor = index;
                }
            }
            Nav::Activate | Nav::Click => {
                if self.cursor == ROW_BACK {
                    actions.sfx.push(SfxId::MenuConfirm);
                    self.leave(actions);
                }
            }
            Nav::Cancel => self.leave(actions),
        }
        true
    }

    fn refresh_settings(&mut self, settings: &Settings) {
        self.shown = settings.clone();
    }

    fn view(&self) -> MenuView {
        let b = &self.shown.bindings;
        let mut rows = vec![
            MenuRow::new(format!(
                "Music Volume: {:>3.0}%",
                self.shown.music_volume * 100.0
            )),
            MenuRow::new(format!(
                "Sfx Volume:   {:>3.0}%",
                self.shown.sfx_volume * 100.0
            )),
            MenuRow::disabled(format!("Use tool: {}", b.use_tool.label())),
            MenuRow::disabled(format!("Plant seed: {}", b.plant_seed.label())),
            MenuRow::disabled(format!("Talk: {}", b.interact.label())),
            MenuRow::disabled(format!("Fast-forward: {}", b.fast_forward.label())),
        ];
        rows.push(MenuRow::new("Back"));
        MenuView {
            title: "SETTINGS".into(),
            rows,
            selected: self.cursor,
            footer: "Left/Right: Adjust | Esc: Back".into(),
        }
    }
}
