//! Menu screens. One `Screen` implementation per paused state, held in a
//! fixed state→screen map; the orchestrator routes events into the active
//! one and ticks it while paused.

pub mod inventory;
pub mod kit;
pub mod main_menu;
pub mod outgroup;
pub mod pause;
pub mod player_task;
pub mod render;
pub mod round_end;
pub mod settings;
pub mod shop;

use bevy::prelude::*;
use rand::RngCore;
use std::collections::HashMap;

use crate::config::Settings;
use crate::level::Level;
use crate::save::SaveFile;
use crate::shared::*;
pub use kit::{MenuRow, MenuView};

// ═══════════════════════════════════════════════════════════════════════
// SCREEN CONTRACT
// ═══════════════════════════════════════════════════════════════════════

/// Mutable collaborators a screen may touch while handling an event.
pub struct ScreenCtx<'a> {
    pub level: &'a mut Level,
    pub save: &'a mut SaveFile,
    pub settings: &'a mut Settings,
}

/// Effects a screen requests from the orchestrator. Applied after each
/// handled event, in the orchestrator's frame, never by the screen itself.
#[derive(Debug, Clone, Default)]
pub struct ScreenActions {
    pub switch_to: Option<GameState>,
    pub quit: bool,
    /// Round-end confirmation: bump the round counter (saturating at 12).
    pub advance_round: bool,
    /// Settings screen left a dirty config behind; persist it.
    pub store_settings: bool,
    pub sfx: Vec<SfxId>,
}

pub trait Screen: Send + Sync {
    /// Returns true when the event was consumed.
    fn handle_event(
        &mut self,
        event: &GameEvent,
        ctx: &mut ScreenCtx,
        actions: &mut ScreenActions,
    ) -> bool;

    fn update(&mut self, _dt: f32) {}

    fn view(&self) -> MenuView;

    /// Inventory: rebuild rows from the live player.
    fn refresh_contents(&mut self, _level: &Level) {}

    /// Settings: refresh the display cache from the live config.
    fn refresh_settings(&mut self, _settings: &Settings) {}

    /// Round end: clear the previous round's picks.
    fn reset(&mut self) {}

    /// Round end: draw a fresh set of reward offers.
    fn generate_offers(&mut self, _rng: &mut dyn RngCore) {}
}

// ═══════════════════════════════════════════════════════════════════════
// THE FIXED STATE → SCREEN MAP
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource)]
pub struct Menus {
    screens: HashMap<GameState, Box<dyn Screen>>,
}

impl Menus {
    pub fn standard() -> Self {
        let mut screens: HashMap<GameState, Box<dyn Screen>> = HashMap::new();
        screens.insert(GameState::MainMenu, Box::new(main_menu::MainMenuScreen::new()));
        screens.insert(GameState::Pause, Box::new(pause::PauseScreen::new()));
        screens.insert(GameState::Settings, Box::new(settings::SettingsScreen::new()));
        screens.insert(GameState::Shop, Box::new(shop::ShopScreen::new()));
        screens.insert(GameState::Inventory, Box::new(inventory::InventoryScreen::new()));
        screens.insert(GameState::PlayerTask, Box::new(player_task::PlayerTaskScreen::new()));
        screens.insert(GameState::RoundEnd, Box::new(round_end::RoundEndScreen::new()));
        screens.insert(GameState::OutgroupMenu, Box::new(outgroup::OutgroupScreen::new()));
        Self { screens }
    }

    /// The screen for a paused state. `Play` (and the transient
    /// `SaveAndResume`) have none.
    pub fn get_mut(&mut self, state: GameState) -> Option<&mut Box<dyn Screen>> {
        self.screens.get_mut(&state)
    }

    pub fn get(&self, state: GameState) -> Option<&Box<dyn Screen>> {
        self.screens.get(&state)
    }

    pub fn refresh_inventory(&mut self, level: &Level) {
        if let Some(screen) = self.screens.get_mut(&GameState::Inventory) {
            screen.refresh_contents(level);
        }
    }

    pub fn refresh_tasks(&mut self, level: &Level) {
        if let Some(screen) = self.screens.get_mut(&GameState::PlayerTask) {
            screen.refresh_contents(level);
        }
    }

    pub fn refresh_shop(&mut self, level: &Level) {
        if let Some(screen) = self.screens.get_mut(&GameState::Shop) {
            screen.refresh_contents(level);
        }
    }

    pub fn refresh_settings(&mut self, settings: &Settings) {
        if let Some(screen) = self.screens.get_mut(&GameState::Settings) {
            screen.refresh_settings(settings);
        }
    }

    pub fn reset_round_end(&mut self) {
        if let Some(screen) = self.screens.get_mut(&GameState::RoundEnd) {
            screen.reset();
        }
    }

    pub fn generate_round_offers(&mut self, rng: &mut dyn RngCore) {
        if let Some(screen) = self.screens.get_mut(&GameState::RoundEnd) {
            screen.generate_offers(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_paused_state_has_a_screen_and_play_has_none() {
        let mut menus = Menus::standard();
        for state in [
            GameState::MainMenu,
            GameState::Pause,
            GameState::Settings,
            GameState::Shop,
            GameState::Inventory,
            GameState::PlayerTask,
            GameState::RoundEnd,
            GameState::OutgroupMenu,
        ] {
            assert!(menus.get_mut(state).is_some(), "no screen for {state:?}");
        }
        assert!(menus.get_mut(GameState::Play).is_none());
        assert!(menus.get_mut(GameState::SaveAndResume).is_none());
    }
}
