//! The orchestrator's owned state and the state-transition contract.

use bevy::prelude::*;

use super::cursor::CursorState;
use crate::config::Settings;
use crate::level::Level;
use crate::save::SaveFile;
use crate::screens::Menus;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// GAME CONTEXT
// ═══════════════════════════════════════════════════════════════════════

/// Everything the frame pipeline owns directly: the active screen state,
/// the round clock and counter, and the startup bootstrap flag.
#[derive(Resource, Debug, Clone)]
pub struct GameContext {
    pub current: GameState,
    pub round_clock: f32,
    round: u32,
    /// True until the first frame has fully presented. The bootstrap frame
    /// updates the level even when a menu state is active so a rendered
    /// world exists behind the first overlay.
    pub first_frame: bool,
}

impl GameContext {
    pub fn new(round: u32) -> Self {
        Self {
            current: GameState::default(),
            round_clock: 0.0,
            round: round.clamp(1, MAX_ROUND),
            first_frame: true,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.current != GameState::Play
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn set_round(&mut self, round: u32) {
        self.round = round.clamp(1, MAX_ROUND);
    }

    /// Bumps the round counter, saturating at [`MAX_ROUND`].
    pub fn increment_round(&mut self) {
        if self.round < MAX_ROUND {
            self.round += 1;
        }
    }
}

impl Default for GameContext {
    fn default() -> Self {
        Self::new(1)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// STATE TRANSITIONS
// ═══════════════════════════════════════════════════════════════════════

/// Switches the active screen state. Steps run in this fixed order; later
/// steps may override earlier ones (`SaveAndResume` always ends unpaused).
///
/// 1. reset the cursor to Arrow,
/// 2. set the new state,
/// 3. `SaveAndResume`: snapshot soil + player into the save file, persist,
///    then rewrite the state to `Play`,
/// 4. entering a menu with stale contents refreshes it,
/// 5. `RoundEnd`: reset the screen and draw fresh offers,
/// 6. derive paused and block/unblock the player.
pub fn switch_state(
    new: GameState,
    ctx: &mut GameContext,
    cursor: &mut CursorState,
    menus: &mut Menus,
    level: &mut Level,
    save: &mut SaveFile,
    settings: &Settings,
) {
    cursor.set(CursorGlyph::Arrow, false);
    ctx.current = new;

    if ctx.current == GameState::SaveAndResume {
        save.round = ctx.round();
        save.set_soil_data(level.soil.all_soil_tiles());
        level.player.save(save);
        match save.store() {
            Ok(()) => info!("Game saved (generation {}).", save.generation),
            Err(e) => warn!("Save failed: {e}"),
        }
        ctx.current = GameState::Play;
    }

    match ctx.current {
        GameState::Inventory => menus.refresh_inventory(level),
        GameState::Shop => menus.refresh_shop(level),
        GameState::PlayerTask => menus.refresh_tasks(level),
        GameState::Settings => menus.refresh_settings(settings),
        GameState::RoundEnd => {
            menus.reset_round_end();
            let mut rng = rand::thread_rng();
            menus.generate_round_offers(&mut rng);
        }
        _ => {}
    }

    if ctx.is_paused() {
        level.player.blocked = true;
        level.player.direction = Vec2::ZERO;
    } else {
        level.player.blocked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ControlMap;

    struct Harness {
        ctx: GameContext,
        cursor: CursorState,
        menus: Menus,
        level: Level,
        save: SaveFile,
        settings: Settings,
    }

    impl Harness {
        fn new() -> Self {
            let save = SaveFile::default();
            let level = Level::new(&save, ControlMap::default());
            Self {
                ctx: GameContext::default(),
                cursor: CursorState::default(),
                menus: Menus::standard(),
                level,
                save,
                settings: Settings::default(),
            }
        }

        fn switch(&mut self, state: GameState) {
            switch_state(
                state,
                &mut self.ctx,
                &mut self.cursor,
                &mut self.menus,
                &mut self.level,
                &mut self.save,
                &self.settings,
            );
        }
    }

    const ALL_STATES: [GameState; 10] = [
        GameState::MainMenu,
        GameState::Play,
        GameState::Pause,
        GameState::Settings,
        GameState::Shop,
        GameState::Inventory,
        GameState::PlayerTask,
        GameState::RoundEnd,
        GameState::OutgroupMenu,
        GameState::SaveAndResume,
    ];

    #[test]
    fn test_switch_lands_on_the_requested_state_except_save_and_resume() {
        for state in ALL_STATES {
            let mut h = Harness::new();
            h.switch(state);
            if state == GameState::SaveAndResume {
                assert_eq!(h.ctx.current, GameState::Play);
            } else {
                assert_eq!(h.ctx.current, state);
            }
        }
    }

    #[test]
    fn test_save_and_resume_ends_unpaused_with_one_snapshot() {
        let mut h = Harness::new();
        h.level.soil.till((2, 3));
        h.level.soil.till((2, 4));
        h.level.soil.water((2, 4));
        let expected: Vec<_> = h.level.soil.all_soil_tiles().collect();
        let generation_before = h.save.generation;

        h.switch(GameState::SaveAndResume);

        assert!(!h.ctx.is_paused());
        assert_eq!(h.save.generation, generation_before + 1);
        let mut saved = h.save.soil.clone();
        let mut wanted = expected.clone();
        saved.sort_by_key(|e| (e.x, e.y));
        wanted.sort_by_key(|e| (e.x, e.y));
        assert_eq!(saved, wanted);
        assert!(!h.level.player.blocked);
    }

    #[test]
    fn test_every_switch_resets_the_cursor_to_arrow() {
        for state in ALL_STATES {
            let mut h = Harness::new();
            h.cursor.set(CursorGlyph::Point, false);
            h.switch(state);
            assert_eq!(h.cursor.glyph(), CursorGlyph::Arrow, "state {state:?}");
        }
    }

    #[test]
    fn test_paused_states_block_the_player_and_zero_movement() {
        let mut h = Harness::new();
        h.level.player.direction = Vec2::new(1.0, 0.0);
        h.switch(GameState::Pause);
        assert!(h.level.player.blocked);
        assert_eq!(h.level.player.direction, Vec2::ZERO);

        h.switch(GameState::Play);
        assert!(!h.level.player.blocked);
    }

    #[test]
    fn test_round_end_draws_offers() {
        let mut h = Harness::new();
        h.switch(GameState::RoundEnd);
        let view = h.menus.get(GameState::RoundEnd).unwrap().view();
        assert_eq!(
            view.rows.len(),
            crate::screens::round_end::OFFER_COUNT + 1
        );
    }

    #[test]
    fn test_round_counter_saturates_at_twelve() {
        let mut ctx = GameContext::default();
        for _ in 0..40 {
            ctx.increment_round();
        }
        assert_eq!(ctx.round(), MAX_ROUND);
        ctx.set_round(99);
        assert_eq!(ctx.round(), MAX_ROUND);
        ctx.set_round(0);
        assert_eq!(ctx.round(), 1);
    }
}
