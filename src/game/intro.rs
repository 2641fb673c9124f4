//! The one-shot intro-message sequencer and the tutorial tick.
//!
//! Opens the welcome dialogue on the first unpaused frame, advances it once
//! the cutscene lets go, then arms the tutorial exactly once. All decisions
//! run off explicit flags; there is no probing.

use bevy::prelude::*;

use super::context::GameContext;
use crate::data::DialogueRegistry;
use crate::dialogue::DialogueManager;
use crate::level::Level;
use crate::save::SaveFile;
use crate::shared::*;
use crate::tutorial::Tutorial;

pub const INTRO_DIALOGUE_ID: &str = "intro_to_game";

#[derive(Resource, Debug, Clone, Default)]
pub struct IntroSequence {
    /// The intro dialogue has been opened (NotStarted → Rendering).
    pub is_rendering: bool,
    /// Armed for exactly one auto-advance of the intro text.
    pub has_rendered: bool,
    /// The tutorial has been armed; it happens at most once.
    pub tutorial_initialized: bool,
}

/// One step of the sequencer. Called every frame by `drive_intro_sequence`.
pub fn drive(
    intro: &mut IntroSequence,
    paused: bool,
    cutscene_active: bool,
    tutorial_completed: bool,
    dialogue: &mut DialogueManager,
    registry: &DialogueRegistry,
    tutorial: &mut Tutorial,
) {
    if !intro.is_rendering {
        if !paused {
            dialogue.open_dialogue(registry, INTRO_DIALOGUE_ID, textbox_anchor());
            intro.is_rendering = true;
            intro.has_rendered = true;
        }
    } else if !cutscene_active {
        if dialogue.showing_dialogue() {
            // Step past the title card once; further lines are the
            // player's to advance.
            if intro.has_rendered {
                dialogue.advance();
                intro.has_rendered = false;
            }
        } else if !tutorial_completed && !intro.tutorial_initialized {
            tutorial.ready();
            intro.tutorial_initialized = true;
        }
    }
}

pub fn drive_intro_sequence(
    mut intro: ResMut<IntroSequence>,
    ctx: Res<GameContext>,
    level: Res<Level>,
    save: Res<SaveFile>,
    mut dialogue: ResMut<DialogueManager>,
    registry: Res<DialogueRegistry>,
    mut tutorial: ResMut<Tutorial>,
) {
    drive(
        &mut intro,
        ctx.is_paused(),
        level.cutscene.active,
        save.is_tutorial_completed,
        &mut dialogue,
        &registry,
        &mut tutorial,
    );
}

/// Ticks the tutorial while it is incomplete, with the paused flag.
pub fn update_tutorial_progress(
    ctx: Res<GameContext>,
    level: Res<Level>,
    mut save: ResMut<SaveFile>,
    mut tutorial: ResMut<Tutorial>,
) {
    if !save.is_tutorial_completed {
        tutorial.update(ctx.is_paused(), &level, &mut save);
    }
}
