//! Villager walkers. Each NPC picks a point inside its home area every few
//! seconds, walks there, idles, repeats. Talking to one raises a dialogue.

use bevy::prelude::*;
use rand::Rng;

/// How close the player must stand to interact.
pub const INTERACT_RADIUS: f32 = 28.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcRole {
    Villager,
    /// Interacting opens the shop instead of a dialogue.
    Merchant,
}

#[derive(Debug, Clone)]
pub struct NpcWalker {
    pub name: &'static str,
    pub role: NpcRole,
    /// Dialogue registry id raised when the player interacts.
    pub dialogue_id: &'static str,
    pub pos: Vec2,
    pub speed: f32,
    pub home_min: Vec2,
    pub home_max: Vec2,
    target: Option<Vec2>,
    idle_left: f32,
}

impl NpcWalker {
    pub fn new(
        name: &'static str,
        role: NpcRole,
        dialogue_id: &'static str,
        pos: Vec2,
        home_min: Vec2,
        home_max: Vec2,
    ) -> Self {
        Self {
            name,
            role,
            dialogue_id,
            pos,
            speed: 40.0,
            home_min,
            home_max,
            target: None,
            idle_left: 1.0,
        }
    }

    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        if let Some(target) = self.target {
            let delta = target - self.pos;
            let dist = delta.length();
            if dist < 1.5 {
                // Arrived — idle a while before the next stroll.
                self.target = None;
                self.idle_left = rng.gen_range(1.5_f32..=3.5_f32);
            } else {
                let step = (self.speed * dt).min(dist);
                self.pos += delta.normalize() * step;
                self.pos.x = self.pos.x.clamp(self.home_min.x, self.home_max.x);
                self.pos.y = self.pos.y.clamp(self.home_min.y, self.home_max.y);
            }
        } else {
            self.idle_left -= dt;
            if self.idle_left <= 0.0 {
                let tx = rng.gen_range(self.home_min.x..=self.home_max.x);
                let ty = rng.gen_range(self.home_min.y..=self.home_max.y);
                self.target = Some(Vec2::new(tx, ty));
            }
        }
    }

    pub fn is_near(&self, point: Vec2) -> bool {
        (self.pos - point).length() <= INTERACT_RADIUS
    }
}

/// The fixed villager roster. Hazel runs the store.
pub fn spawn_roster() -> Vec<NpcWalker> {
    vec![
        NpcWalker::new(
            "Hazel",
            NpcRole::Merchant,
            "meet_hazel",
            Vec2::new(180.0, 120.0),
            Vec2::new(120.0, 60.0),
            Vec2::new(260.0, 180.0),
        ),
        NpcWalker::new(
            "Bram",
            NpcRole::Villager,
            "meet_bram",
            Vec2::new(-200.0, 40.0),
            Vec2::new(-280.0, -20.0),
            Vec2::new(-140.0, 100.0),
        ),
    ]
}
