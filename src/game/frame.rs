//! The fixed-order frame pipeline around the simulation step: cutscene
//! time-dilation, pause/freeze-frame bookkeeping, the round clock, and the
//! end-of-frame flags.

use bevy::prelude::*;

use super::context::{switch_state, GameContext};
use super::cursor::CursorState;
use crate::config::Settings;
use crate::dialogue::DialogueManager;
use crate::level::Level;
use crate::save::SaveFile;
use crate::screens::Menus;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// FRAME SNAPSHOT
// ═══════════════════════════════════════════════════════════════════════

/// Bookkeeping for the frozen backdrop shown behind menu overlays.
///
/// The scene is retained, so "capturing" is not a pixel copy: a live frame
/// leaves the world render current, and a frozen frame re-presents it
/// untouched under the overlay. What must hold is the protocol — capture
/// on every live frame, consume only when a capture exists.
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameSnapshot {
    pub captured: bool,
    pub captures: u64,
    pub consumed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMode {
    /// Simulation advances and the frame is captured.
    Live,
    /// The last capture backs the screen; only the menu updates.
    Frozen,
}

/// The pause/first-frame decision. The very first frame is always live so
/// a rendered world exists before anything can freeze over it.
pub fn frame_mode(paused: bool, first_frame: bool) -> FrameMode {
    if paused && !first_frame {
        FrameMode::Frozen
    } else {
        FrameMode::Live
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PIPELINE SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Advances the level on live frames. While a cutscene runs, holding the
/// fast-forward key dilates dt.
pub fn advance_simulation(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    ctx: Res<GameContext>,
    mut level: ResMut<Level>,
) {
    if frame_mode(ctx.is_paused(), ctx.first_frame) == FrameMode::Frozen {
        return;
    }
    let mut dt = time.delta_secs();
    if level.cutscene.active && keys.pressed(level.player.controls.fast_forward) {
        dt *= FAST_FORWARD_SCALE;
    }
    let is_playing = ctx.current == GameState::Play;
    level.update(dt, is_playing);
}

/// Frozen frames tick the active menu against the snapshot backdrop; live
/// frames accumulate the round clock and fire the round end.
#[allow(clippy::too_many_arguments)]
pub fn tick_pause_or_round(
    time: Res<Time>,
    mut ctx: ResMut<GameContext>,
    mut cursor: ResMut<CursorState>,
    mut menus: ResMut<Menus>,
    mut level: ResMut<Level>,
    mut save: ResMut<SaveFile>,
    settings: Res<Settings>,
    mut snapshot: ResMut<FrameSnapshot>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    let dt = time.delta_secs();
    match frame_mode(ctx.is_paused(), ctx.first_frame) {
        FrameMode::Frozen => {
            debug_assert!(snapshot.captured, "freeze-frame before any capture");
            snapshot.consumed += 1;
            if let Some(screen) = menus.get_mut(ctx.current) {
                screen.update(dt);
            }
        }
        FrameMode::Live => {
            ctx.round_clock += dt;
            if ctx.round_clock > ROUND_END_SECONDS {
                ctx.round_clock = 0.0;
                info!("Round {} is over.", ctx.round());
                sfx.send(PlaySfxEvent {
                    sfx: SfxId::RoundBell,
                });
                switch_state(
                    GameState::RoundEnd,
                    &mut ctx,
                    &mut cursor,
                    &mut menus,
                    &mut level,
                    &mut save,
                    &settings,
                );
            }
        }
    }
}

/// Overlay actors (the dialogue textbox) animate every frame; during a
/// cutscene only the movement-frozen reveal continues.
pub fn animate_overlay_actors(
    time: Res<Time>,
    level: Res<Level>,
    mut dialogue: ResMut<DialogueManager>,
) {
    let dt = time.delta_secs();
    if level.cutscene.active {
        dialogue.update_blocked(dt);
    } else {
        dialogue.update(dt);
    }
}

/// Marks live frames as captured; the retained scene is the capture.
pub fn capture_frame_snapshot(ctx: Res<GameContext>, mut snapshot: ResMut<FrameSnapshot>) {
    if frame_mode(ctx.is_paused(), ctx.first_frame) == FrameMode::Live {
        snapshot.captured = true;
        snapshot.captures += 1;
    }
}

/// Last step of the pipeline: the bootstrap frame is over.
pub fn finish_frame(mut ctx: ResMut<GameContext>) {
    ctx.first_frame = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_always_live() {
        assert_eq!(frame_mode(true, true), FrameMode::Live);
        assert_eq!(frame_mode(false, true), FrameMode::Live);
    }

    #[test]
    fn test_paused_after_bootstrap_freezes() {
        assert_eq!(frame_mode(true, false), FrameMode::Frozen);
        assert_eq!(frame_mode(false, false), FrameMode::Live);
    }

    #[test]
    fn test_snapshot_protocol_counts() {
        let mut snapshot = FrameSnapshot::default();
        // live frame
        if frame_mode(false, false) == FrameMode::Live {
            snapshot.captured = true;
            snapshot.captures += 1;
        }
        // frozen frame
        if frame_mode(true, false) == FrameMode::Frozen {
            assert!(snapshot.captured);
            snapshot.consumed += 1;
        }
        assert_eq!((snapshot.captures, snapshot.consumed), (1, 1));
    }
}
