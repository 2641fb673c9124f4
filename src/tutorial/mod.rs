//! The first-plot tutorial: a short list of steps, each a dialogue plus a
//! completion check against the live level.
//!
//! The tutorial stays dormant until `ready()` arms it; the intro sequencer
//! calls that exactly once, guarded by its own initialized flag. Finishing
//! the last step writes the completed flag into the save file.

use bevy::prelude::*;

use crate::level::Level;
use crate::save::SaveFile;
use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialGoal {
    Move,
    TillSoil,
    WaterSoil,
    PlantSeed,
}

#[derive(Debug, Clone)]
pub struct TutorialStep {
    pub dialogue_id: &'static str,
    pub goal: TutorialGoal,
}

fn standard_steps() -> Vec<TutorialStep> {
    vec![
        TutorialStep {
            dialogue_id: "tutorial_move",
            goal: TutorialGoal::Move,
        },
        TutorialStep {
            dialogue_id: "tutorial_till",
            goal: TutorialGoal::TillSoil,
        },
        TutorialStep {
            dialogue_id: "tutorial_water",
            goal: TutorialGoal::WaterSoil,
        },
        TutorialStep {
            dialogue_id: "tutorial_plant",
            goal: TutorialGoal::PlantSeed,
        },
    ]
}

#[derive(Resource, Debug, Clone)]
pub struct Tutorial {
    steps: Vec<TutorialStep>,
    current: usize,
    armed: bool,
    start_pos: Option<Vec2>,
    outbox: Vec<GameEvent>,
}

impl Default for Tutorial {
    fn default() -> Self {
        Self {
            steps: standard_steps(),
            current: 0,
            armed: false,
            start_pos: None,
            outbox: Vec::new(),
        }
    }
}

impl Tutorial {
    /// Arms the tutorial and raises the first step's dialogue.
    pub fn ready(&mut self) {
        if self.armed {
            return;
        }
        self.armed = true;
        if let Some(step) = self.steps.first() {
            self.outbox.push(GameEvent::ShowDialogue(step.dialogue_id));
        }
    }

    /// Whether the tutorial dialogue driver has a current entry — the
    /// intro sequencer's initialization check.
    pub fn has_current_entry(&self) -> bool {
        self.armed && self.current < self.steps.len()
    }

    pub fn is_finished(&self) -> bool {
        self.armed && self.current >= self.steps.len()
    }

    /// Checks the active step against the level. Paused frames are skipped
    /// so menu time never completes a step.
    pub fn update(&mut self, paused: bool, level: &Level, save: &mut SaveFile) {
        if paused || !self.armed || self.current >= self.steps.len() {
            return;
        }

        if self.start_pos.is_none() {
            self.start_pos = Some(level.player.pos);
        }

        let done = match self.steps[self.current].goal {
            TutorialGoal::Move => self
                .start_pos
                .map(|start| (level.player.pos - start).length() > TILE_SIZE)
                .unwrap_or(false),
            TutorialGoal::TillSoil => level.soil.worked_tile_count() > 0,
            TutorialGoal::WaterSoil => level.soil.any_watered(),
            TutorialGoal::PlantSeed => level.soil.any_planted(),
        };

        if done {
            self.current += 1;
            match self.steps.get(self.current) {
                Some(step) => {
                    self.outbox.push(GameEvent::ShowDialogue(step.dialogue_id));
                }
                None => {
                    save.is_tutorial_completed = true;
                    info!("Tutorial completed.");
                }
            }
        }
    }

    pub fn drain_outbox(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ControlMap;

    fn playing_level() -> Level {
        let mut save = SaveFile::default();
        save.generation = 1;
        Level::new(&save, ControlMap::default())
    }

    #[test]
    fn test_ready_arms_once_and_raises_first_dialogue() {
        let mut tutorial = Tutorial::default();
        assert!(!tutorial.has_current_entry());
        tutorial.ready();
        tutorial.ready();
        assert!(tutorial.has_current_entry());
        assert_eq!(
            tutorial.drain_outbox(),
            vec![GameEvent::ShowDialogue("tutorial_move")]
        );
    }

    #[test]
    fn test_paused_frames_never_advance() {
        let mut tutorial = Tutorial::default();
        tutorial.ready();
        tutorial.drain_outbox();
        let mut save = SaveFile::default();
        let mut level = playing_level();
        level.player.pos += Vec2::splat(TILE_SIZE * 4.0);
        tutorial.update(true, &level, &mut save);
        assert!(tutorial.drain_outbox().is_empty());
    }

    #[test]
    fn test_steps_advance_through_to_completion() {
        let mut tutorial = Tutorial::default();
        tutorial.ready();
        tutorial.drain_outbox();
        let mut save = SaveFile::default();
        let mut level = playing_level();

        // Anchor the start position, then walk.
        tutorial.update(false, &level, &mut save);
        level.player.pos += Vec2::splat(TILE_SIZE * 2.0);
        tutorial.update(false, &level, &mut save);
        assert_eq!(
            tutorial.drain_outbox(),
            vec![GameEvent::ShowDialogue("tutorial_till")]
        );

        let target = level.player.target_tile();
        level.soil.till(target);
        tutorial.update(false, &level, &mut save);
        level.soil.water(target);
        tutorial.update(false, &level, &mut save);
        level.soil.plant(target, SeedKind::Tomato);
        tutorial.update(false, &level, &mut save);

        assert!(tutorial.is_finished());
        assert!(save.is_tutorial_completed);
    }
}
