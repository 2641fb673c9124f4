//! Per-frame event routing.
//!
//! Hardware input and queued application events drain into one list, and
//! each entry walks a strict priority chain: the orchestrator's own handler
//! first, the active menu while paused, the level last. The first consumer
//! short-circuits the rest.

use bevy::app::AppExit;
use bevy::prelude::*;

use super::context::{switch_state, GameContext};
use super::cursor::CursorState;
use crate::config::Settings;
use crate::data::DialogueRegistry;
use crate::dialogue::DialogueManager;
use crate::level::Level;
use crate::save::SaveFile;
use crate::screens::{Menus, ScreenActions, ScreenCtx};
use crate::shared::*;
use crate::tutorial::Tutorial;

/// Who consumed an event. Mostly for tests; the router only cares about
/// "someone did".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    Orchestrator,
    Menu,
    Level,
    Unconsumed,
}

pub struct RouteDeps<'a> {
    pub ctx: &'a mut GameContext,
    pub cursor: &'a mut CursorState,
    pub menus: &'a mut Menus,
    pub level: &'a mut Level,
    pub dialogue: &'a mut DialogueManager,
    pub registry: &'a DialogueRegistry,
    pub save: &'a mut SaveFile,
    pub settings: &'a mut Settings,
    pub quit: &'a mut bool,
    pub sfx_out: &'a mut Vec<SfxId>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Priority chain
// ─────────────────────────────────────────────────────────────────────────────

pub fn route_event(event: &GameEvent, deps: &mut RouteDeps) -> Routed {
    if handle_orchestrator_event(event, deps) {
        return Routed::Orchestrator;
    }

    if deps.ctx.is_paused() {
        let state = deps.ctx.current;
        if let Some(screen) = deps.menus.get_mut(state) {
            let mut actions = ScreenActions::default();
            let mut screen_ctx = ScreenCtx {
                level: &mut *deps.level,
                save: &mut *deps.save,
                settings: &mut *deps.settings,
            };
            let consumed = screen.handle_event(event, &mut screen_ctx, &mut actions);
            apply_screen_actions(actions, deps);
            if consumed {
                return Routed::Menu;
            }
        }
    }

    if deps.level.handle_event(event) {
        return Routed::Level;
    }
    Routed::Unconsumed
}

/// The orchestrator's own handler. Mouse button events mutate cursor state
/// yet always report "not consumed" so UI widgets can also react to the
/// same click.
fn handle_orchestrator_event(event: &GameEvent, deps: &mut RouteDeps) -> bool {
    match event {
        GameEvent::Quit => {
            *deps.quit = true;
            true
        }
        GameEvent::MouseDown(MouseButton::Left) => {
            if deps.cursor.glyph() == CursorGlyph::Point {
                deps.cursor.set(CursorGlyph::Click, false);
            }
            false
        }
        GameEvent::MouseUp(MouseButton::Left) => {
            if deps.cursor.glyph() == CursorGlyph::Click {
                deps.cursor.set(CursorGlyph::Point, true);
            }
            false
        }
        GameEvent::MouseDown(_) | GameEvent::MouseUp(_) => false,
        GameEvent::OpenInventory => {
            do_switch(GameState::Inventory, deps);
            true
        }
        GameEvent::OpenShop => {
            do_switch(GameState::Shop, deps);
            true
        }
        GameEvent::ShowDialogue(id) => {
            if !deps.dialogue.showing_dialogue() {
                deps.dialogue
                    .open_dialogue(deps.registry, id, textbox_anchor());
                deps.level.player.blocked = true;
                deps.level.player.direction = Vec2::ZERO;
            }
            true
        }
        GameEvent::AdvanceDialogue => {
            if deps.dialogue.showing_dialogue() {
                deps.dialogue.advance();
                if !deps.dialogue.showing_dialogue() {
                    deps.level.player.blocked = false;
                }
            }
            true
        }
        GameEvent::SetCursor(glyph) => {
            deps.cursor.set(*glyph, false);
            true
        }
        GameEvent::KeyDown(key) => {
            // Screen-opening keys are the orchestrator's transition duty;
            // only live during play so menus keep Escape for themselves.
            if deps.ctx.current == GameState::Play {
                let controls = deps.level.player.controls;
                if *key == controls.pause {
                    do_switch(GameState::Pause, deps);
                    return true;
                }
                if *key == controls.open_inventory {
                    do_switch(GameState::Inventory, deps);
                    return true;
                }
                if *key == controls.advance_dialogue && deps.dialogue.showing_dialogue() {
                    deps.dialogue.advance();
                    if !deps.dialogue.showing_dialogue() {
                        deps.level.player.blocked = false;
                    }
                    return true;
                }
            }
            false
        }
        GameEvent::PointerRow(_) | GameEvent::PointerClick => false,
    }
}

fn apply_screen_actions(actions: ScreenActions, deps: &mut RouteDeps) {
    deps.sfx_out.extend(actions.sfx);
    if actions.advance_round {
        deps.ctx.increment_round();
        info!("Round advanced to {}.", deps.ctx.round());
    }
    if actions.store_settings {
        if let Err(e) = deps.settings.store() {
            warn!("Could not store settings: {e}");
        }
    }
    if let Some(state) = actions.switch_to {
        do_switch(state, deps);
    }
    if actions.quit {
        *deps.quit = true;
    }
}

fn do_switch(state: GameState, deps: &mut RouteDeps) {
    switch_state(
        state,
        deps.ctx,
        deps.cursor,
        deps.menus,
        deps.level,
        deps.save,
        deps.settings,
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

/// Collects this frame's hardware input plus queued application events and
/// routes every entry through the priority chain.
#[allow(clippy::too_many_arguments)]
pub fn route_frame_events(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut reader: EventReader<GameEvent>,
    mut exit: EventWriter<AppExit>,
    mut sfx: EventWriter<PlaySfxEvent>,
    mut ctx: ResMut<GameContext>,
    mut cursor: ResMut<CursorState>,
    mut menus: ResMut<Menus>,
    mut level: ResMut<Level>,
    mut dialogue: ResMut<DialogueManager>,
    registry: Res<DialogueRegistry>,
    mut save: ResMut<SaveFile>,
    mut settings: ResMut<Settings>,
) {
    let mut queue: Vec<GameEvent> = Vec::new();
    for key in keys.get_just_pressed() {
        queue.push(GameEvent::KeyDown(*key));
    }
    for button in mouse.get_just_pressed() {
        queue.push(GameEvent::MouseDown(*button));
    }
    for button in mouse.get_just_released() {
        queue.push(GameEvent::MouseUp(*button));
    }
    queue.extend(reader.read().cloned());

    let mut quit = false;
    let mut sfx_out = Vec::new();
    {
        let mut deps = RouteDeps {
            ctx: &mut ctx,
            cursor: &mut cursor,
            menus: &mut menus,
            level: &mut level,
            dialogue: &mut dialogue,
            registry: &registry,
            save: &mut save,
            settings: &mut settings,
            quit: &mut quit,
            sfx_out: &mut sfx_out,
        };
        for event in &queue {
            route_event(event, &mut deps);
        }
    }

    for id in sfx_out {
        sfx.send(PlaySfxEvent { sfx: id });
    }
    if quit {
        // Shutdown is immediate and unconditional.
        exit.send(AppExit::Success);
    }
}

/// Moves simulation-raised events (level interactions, tutorial steps)
/// into the queue; they route on the next frame.
pub fn drain_sim_outboxes(
    mut level: ResMut<Level>,
    mut tutorial: ResMut<Tutorial>,
    mut events: EventWriter<GameEvent>,
) {
    for event in level.drain_outbox() {
        events.send(event);
    }
    for event in tutorial.drain_outbox() {
        events.send(event);
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
        dialogue: DialogueManager,
        registry: DialogueRegistry,
        save: SaveFile,
        settings: Settings,
        quit: bool,
        sfx: Vec<SfxId>,
    }

    impl Harness {
        fn new() -> Self {
            let mut save = SaveFile::default();
            save.generation = 1; // no intro cutscene
            let level = Level::new(&save, ControlMap::default());
            Self {
                ctx: GameContext::default(),
                cursor: CursorState::default(),
                menus: Menus::standard(),
                level,
                dialogue: DialogueManager::default(),
                registry: DialogueRegistry::standard(),
                save,
                settings: Settings::default(),
                quit: false,
                sfx: Vec::new(),
            }
        }

        fn route(&mut self, event: GameEvent) -> Routed {
            let mut deps = RouteDeps {
                ctx: &mut self.ctx,
                cursor: &mut self.cursor,
                menus: &mut self.menus,
                level: &mut self.level,
                dialogue: &mut self.dialogue,
                registry: &self.registry,
                save: &mut self.save,
                settings: &mut self.settings,
                quit: &mut self.quit,
                sfx_out: &mut self.sfx,
            };
            route_event(&event, &mut deps)
        }

        fn enter_play(&mut self) {
            switch_state(
                GameState::Play,
                &mut self.ctx,
                &mut self.cursor,
                &mut self.menus,
                &mut self.level,
                &mut self.save,
                &self.settings,
            );
        }
    }

    #[test]
    fn test_orchestrator_consumed_events_never_reach_menu_or_level() {
        let mut h = Harness::new();
        h.enter_play();
        let soil_before = h.level.soil.worked_tile_count();
        assert_eq!(h.route(GameEvent::OpenInventory), Routed::Orchestrator);
        assert_eq!(h.ctx.current, GameState::Inventory);
        assert_eq!(h.level.soil.worked_tile_count(), soil_before);
    }

    #[test]
    fn test_unconsumed_events_reach_the_level_during_play() {
        let mut h = Harness::new();
        h.enter_play();
        let use_tool = h.level.player.controls.use_tool;
        assert_eq!(h.route(GameEvent::KeyDown(use_tool)), Routed::Level);
    }

    #[test]
    fn test_paused_menu_gets_events_before_the_level() {
        let mut h = Harness::new();
        h.enter_play();
        h.route(GameEvent::KeyDown(KeyCode::Escape)); // open pause
        assert_eq!(h.ctx.current, GameState::Pause);

        // Space would be the level's tool key, but the pause menu eats it
        // as Activate (Resume).
        assert_eq!(h.route(GameEvent::KeyDown(KeyCode::Space)), Routed::Menu);
        assert_eq!(h.ctx.current, GameState::Play);
    }

    #[test]
    fn test_events_nobody_wants_fall_through() {
        let mut h = Harness::new();
        h.enter_play();
        assert_eq!(h.route(GameEvent::KeyDown(KeyCode::KeyZ)), Routed::Unconsumed);
    }

    #[test]
    fn test_mouse_buttons_mutate_cursor_but_stay_unconsumed() {
        let mut h = Harness::new();
        h.enter_play();
        h.cursor.set(CursorGlyph::Point, false);

        let routed = h.route(GameEvent::MouseDown(MouseButton::Left));
        assert_eq!(routed, Routed::Unconsumed);
        assert_eq!(h.cursor.glyph(), CursorGlyph::Click);

        let routed = h.route(GameEvent::MouseUp(MouseButton::Left));
        assert_eq!(routed, Routed::Unconsumed);
        assert_eq!(h.cursor.glyph(), CursorGlyph::Point);
    }

    #[test]
    fn test_show_dialogue_blocks_player_and_advance_unblocks_at_end() {
        let mut h = Harness::new();
        h.enter_play();
        assert_eq!(
            h.route(GameEvent::ShowDialogue("tutorial_move")),
            Routed::Orchestrator
        );
        assert!(h.dialogue.showing_dialogue());
        assert!(h.level.player.blocked);

        // Single line — one advance closes the box and unblocks.
        assert_eq!(h.route(GameEvent::AdvanceDialogue), Routed::Orchestrator);
        assert!(!h.dialogue.showing_dialogue());
        assert!(!h.level.player.blocked);
    }

    #[test]
    fn test_show_dialogue_while_showing_keeps_the_first_one() {
        let mut h = Harness::new();
        h.enter_play();
        h.route(GameEvent::ShowDialogue("meet_hazel"));
        h.route(GameEvent::ShowDialogue("meet_bram"));
        // Still on Hazel's two lines: one advance keeps the box open.
        h.route(GameEvent::AdvanceDialogue);
        assert!(h.dialogue.showing_dialogue());
    }

    #[test]
    fn test_open_shop_event_switches_and_refreshes_gold() {
        let mut h = Harness::new();
        h.enter_play();
        h.level.player.gold = 875;
        assert_eq!(h.route(GameEvent::OpenShop), Routed::Orchestrator);
        assert_eq!(h.ctx.current, GameState::Shop);
        let view = h.menus.get(GameState::Shop).unwrap().view();
        assert!(view.footer.contains("875"));
    }

    #[test]
    fn test_quit_is_consumed_and_flags_exit() {
        let mut h = Harness::new();
        assert_eq!(h.route(GameEvent::Quit), Routed::Orchestrator);
        assert!(h.quit);
    }

    #[test]
    fn test_set_cursor_event_respects_click_guard() {
        let mut h = Harness::new();
        h.enter_play();
        h.cursor.set(CursorGlyph::Point, false);
        h.cursor.set(CursorGlyph::Click, false);
        assert_eq!(
            h.route(GameEvent::SetCursor(CursorGlyph::Point)),
            Routed::Orchestrator
        );
        assert_eq!(h.cursor.glyph(), CursorGlyph::Click);
    }

    #[test]
    fn test_round_end_confirmation_advances_the_round() {
        let mut h = Harness::new();
        h.enter_play();
        let round_before = h.ctx.round();
        switch_state(
            GameState::RoundEnd,
            &mut h.ctx,
            &mut h.cursor,
            &mut h.menus,
            &mut h.level,
            &mut h.save,
            &h.settings,
        );
        assert_eq!(h.route(GameEvent::KeyDown(KeyCode::Enter)), Routed::Menu);
        assert_eq!(h.ctx.round(), round_before + 1);
        assert_eq!(h.ctx.current, GameState::Play);
    }
}
