//! Scripted camera pans. While a cutscene runs the player is an observer;
//! the orchestrator only influences it through dt scaling (fast-forward).

use bevy::prelude::*;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub enum CutsceneStep {
    /// Pan the camera to `target` over `duration` seconds.
    PanTo { target: Vec2, duration: f32 },
    /// Hold the camera still.
    Hold(f32),
    /// Pan back to the player over `duration` seconds.
    ReturnToPlayer { duration: f32 },
}

#[derive(Debug, Clone, Default)]
pub struct CutsceneAnimation {
    pub active: bool,
    steps: VecDeque<CutsceneStep>,
    step_timer: f32,
    /// Camera position when the current step began.
    step_origin: Vec2,
    camera_pos: Vec2,
}

impl CutsceneAnimation {
    pub fn start(&mut self, steps: VecDeque<CutsceneStep>, camera_pos: Vec2) {
        self.steps = steps;
        self.step_timer = 0.0;
        self.step_origin = camera_pos;
        self.camera_pos = camera_pos;
        self.active = !self.steps.is_empty();
    }

    /// Where the camera should sit this frame; `None` once inactive.
    pub fn camera_target(&self) -> Option<Vec2> {
        self.active.then_some(self.camera_pos)
    }

    /// Advances the front step. One step at a time; finishing the queue
    /// clears `active`.
    pub fn update(&mut self, dt: f32, player_pos: Vec2) {
        if !self.active {
            return;
        }
        let Some(step) = self.steps.front().cloned() else {
            self.active = false;
            return;
        };

        self.step_timer += dt;
        let (target, duration) = match step {
            CutsceneStep::PanTo { target, duration } => (target, duration),
            CutsceneStep::Hold(duration) => (self.step_origin, duration),
            CutsceneStep::ReturnToPlayer { duration } => (player_pos, duration),
        };

        let t = if duration > 0.0 {
            (self.step_timer / duration).min(1.0)
        } else {
            1.0
        };
        self.camera_pos = self.step_origin.lerp(target, t);

        if self.step_timer >= duration {
            self.steps.pop_front();
            self.step_timer = 0.0;
            self.step_origin = self.camera_pos;
            if self.steps.is_empty() {
                self.active = false;
            }
        }
    }
}

/// The new-game farm tour: sweep across the plot, hold on the village gate,
/// then hand the camera back.
pub fn farm_tour(player_pos: Vec2) -> VecDeque<CutsceneStep> {
    let mut steps = VecDeque::new();
    steps.push_back(CutsceneStep::PanTo {
        target: player_pos + Vec2::new(-160.0, 96.0),
        duration: 2.5,
    });
    steps.push_back(CutsceneStep::Hold(1.0));
    steps.push_back(CutsceneStep::PanTo {
        target: player_pos + Vec2::new(200.0, -64.0),
        duration: 3.0,
    });
    steps.push_back(CutsceneStep::Hold(1.5));
    steps.push_back(CutsceneStep::ReturnToPlayer { duration: 2.0 });
    steps
}
