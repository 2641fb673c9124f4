//! The player: position, movement intent, carried tools/seeds, cosmetics,
//! group membership, and resolved key bindings.
//!
//! The player is owned by the level, not spawned as its own entity; a render
//! sync system mirrors `pos` onto the player sprite each frame.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::config::Bindings;
use crate::save::{PlayerSave, SaveFile};
use crate::shared::*;

pub const PLAYER_SPEED: f32 = 120.0;

// ═══════════════════════════════════════════════════════════════════════
// CONTROLS
// ═══════════════════════════════════════════════════════════════════════

/// Key bindings resolved from the settings file into engine key codes.
#[derive(Debug, Clone, Copy)]
pub struct ControlMap {
    pub fast_forward: KeyCode,
    pub open_inventory: KeyCode,
    pub toggle_legend: KeyCode,
    pub interact: KeyCode,
    pub advance_dialogue: KeyCode,
    pub pause: KeyCode,
    pub use_tool: KeyCode,
    pub plant_seed: KeyCode,
}

impl ControlMap {
    pub fn from_bindings(bindings: &Bindings) -> Self {
        Self {
            fast_forward: bindings.fast_forward.key_code(),
            open_inventory: bindings.open_inventory.key_code(),
            toggle_legend: bindings.toggle_legend.key_code(),
            interact: bindings.interact.key_code(),
            advance_dialogue: bindings.advance_dialogue.key_code(),
            pause: bindings.pause.key_code(),
            use_tool: bindings.use_tool.key_code(),
            plant_seed: bindings.plant_seed.key_code(),
        }
    }
}

impl Default for ControlMap {
    fn default() -> Self {
        Self::from_bindings(&Bindings::default())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Movement intent for this frame, normalized. Zeroed while blocked.
    pub direction: Vec2,
    pub speed: f32,
    /// Movement-frozen: set while a menu is open or a dialogue holds the
    /// player in place.
    pub blocked: bool,
    pub gold: u32,
    pub tools: Vec<ToolKind>,
    pub current_tool: ToolKind,
    pub seeds: HashMap<SeedKind, u32>,
    pub current_seed: SeedKind,
    pub owned_cosmetics: Vec<Cosmetic>,
    pub equipped_cosmetics: Vec<Cosmetic>,
    pub group: PlayerGroup,
    pub controls: ControlMap,
}

impl Player {
    pub fn from_save(save: &PlayerSave, controls: ControlMap) -> Self {
        Self {
            pos: Vec2::new(save.pos.0, save.pos.1),
            direction: Vec2::ZERO,
            speed: PLAYER_SPEED,
            blocked: false,
            gold: save.gold,
            tools: save.tools.clone(),
            current_tool: save.current_tool,
            seeds: save.seeds.iter().copied().collect(),
            current_seed: save.current_seed,
            owned_cosmetics: save.owned_cosmetics.clone(),
            equipped_cosmetics: save.equipped_cosmetics.clone(),
            group: save.group,
            controls,
        }
    }

    /// Writes the player snapshot into the save file.
    pub fn save(&self, save: &mut SaveFile) {
        let mut seeds: Vec<(SeedKind, u32)> = self.seeds.iter().map(|(k, n)| (*k, *n)).collect();
        seeds.sort_by_key(|(k, _)| format!("{k:?}"));
        save.player = PlayerSave {
            pos: (self.pos.x, self.pos.y),
            gold: self.gold,
            tools: self.tools.clone(),
            current_tool: self.current_tool,
            seeds,
            current_seed: self.current_seed,
            owned_cosmetics: self.owned_cosmetics.clone(),
            equipped_cosmetics: self.equipped_cosmetics.clone(),
            group: self.group,
        };
    }

    pub fn has_goggles(&self) -> bool {
        self.equipped_cosmetics.contains(&Cosmetic::Goggles)
    }

    pub fn assign_tool(&mut self, tool: ToolKind) {
        if self.tools.contains(&tool) {
            self.current_tool = tool;
        }
    }

    pub fn assign_seed(&mut self, seed: SeedKind) {
        self.current_seed = seed;
    }

    pub fn seed_count(&self, seed: SeedKind) -> u32 {
        self.seeds.get(&seed).copied().unwrap_or(0)
    }

    /// Takes one seed of the current kind; false when the pouch is empty.
    pub fn take_seed(&mut self) -> bool {
        match self.seeds.get_mut(&self.current_seed) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn add_seeds(&mut self, seed: SeedKind, count: u32) {
        *self.seeds.entry(seed).or_insert(0) += count;
    }

    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold >= amount {
            self.gold -= amount;
            true
        } else {
            false
        }
    }

    pub fn equip_cosmetic(&mut self, cosmetic: Cosmetic) {
        if self.owned_cosmetics.contains(&cosmetic)
            && !self.equipped_cosmetics.contains(&cosmetic)
        {
            self.equipped_cosmetics.push(cosmetic);
        }
    }

    /// Integrates movement intent. Blocked players do not move even if a
    /// stale direction survived a missed reset.
    pub fn apply_movement(&mut self, dt: f32) {
        if self.blocked {
            return;
        }
        if self.direction != Vec2::ZERO {
            self.pos += self.direction.normalize() * self.speed * dt;
        }
    }

    /// Grid tile the player currently stands on.
    pub fn tile(&self) -> (i32, i32) {
        (
            (self.pos.x / TILE_SIZE).floor() as i32,
            (self.pos.y / TILE_SIZE).floor() as i32,
        )
    }

    /// The tile in front of the player where tools and seeds land.
    pub fn target_tile(&self) -> (i32, i32) {
        let (tx, ty) = self.tile();
        if self.direction == Vec2::ZERO {
            (tx, ty)
        } else if self.direction.x.abs() >= self.direction.y.abs() {
            (tx + self.direction.x.signum() as i32, ty)
        } else {
            (tx, ty + self.direction.y.signum() as i32)
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::from_save(&PlayerSave::default(), ControlMap::default())
    }
}
