//! The orchestrator: owned context, cursor, event routing, and the
//! fixed-order frame pipeline.

pub mod context;
pub mod cursor;
pub mod frame;
pub mod intro;
pub mod routing;

use bevy::prelude::*;

pub use context::{switch_state, GameContext};
pub use cursor::CursorState;
pub use frame::FrameSnapshot;
pub use intro::IntroSequence;

use crate::screens;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorState>()
            .init_resource::<FrameSnapshot>()
            .init_resource::<IntroSequence>()
            .init_resource::<screens::render::MenuUiCache>()
            .add_systems(Startup, cursor::setup_cursor)
            // The per-frame pipeline. Order is the contract: route input,
            // advance (possibly dilated) simulation, pause/round clock,
            // overlay actors, intro/tutorial sequencing, snapshot, then
            // flags. Rendering syncs follow, the cursor drawn last.
            .add_systems(
                Update,
                (
                    routing::route_frame_events,
                    frame::advance_simulation,
                    frame::tick_pause_or_round,
                    frame::animate_overlay_actors,
                    intro::drive_intro_sequence,
                    intro::update_tutorial_progress,
                    frame::capture_frame_snapshot,
                    routing::drain_sim_outboxes,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    screens::render::sync_menu_ui,
                    crate::dialogue::sync_dialogue_box,
                    cursor::sync_cursor_sprite,
                    frame::finish_frame,
                )
                    .chain()
                    .after(routing::drain_sim_outboxes),
            );
    }
}
