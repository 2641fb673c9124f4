//! Save file handling.
//!
//! One JSON save per installation. `load()` never fails — a missing or
//! corrupt file yields a fresh default save (the corrupt case is logged).
//! `store()` reports failures to the caller, which logs and carries on;
//! a failed save must never take the game down.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use crate::shared::*;

pub const SAVE_VERSION: u32 = 1;
pub const SAVE_FILE: &str = "cloverfall_save.json";

// ═══════════════════════════════════════════════════════════════════════
// SNAPSHOT TYPES
// ═══════════════════════════════════════════════════════════════════════

/// Player snapshot as persisted. The live `Player` converts to and from
/// this through `Player::save` / `Player::restore`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSave {
    pub pos: (f32, f32),
    pub gold: u32,
    pub tools: Vec<ToolKind>,
    pub current_tool: ToolKind,
    pub seeds: Vec<(SeedKind, u32)>,
    pub current_seed: SeedKind,
    pub owned_cosmetics: Vec<Cosmetic>,
    pub equipped_cosmetics: Vec<Cosmetic>,
    pub group: PlayerGroup,
}

impl Default for PlayerSave {
    fn default() -> Self {
        Self {
            pos: (0.0, 0.0),
            gold: 200,
            tools: vec![ToolKind::Hoe, ToolKind::WateringCan, ToolKind::Scythe],
            current_tool: ToolKind::Hoe,
            seeds: vec![(SeedKind::Tomato, 5), (SeedKind::Corn, 5)],
            current_seed: SeedKind::Tomato,
            owned_cosmetics: Vec::new(),
            equipped_cosmetics: Vec::new(),
            group: PlayerGroup::Ingroup,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilSaveEntry {
    pub x: i32,
    pub y: i32,
    pub state: SoilState,
}

// ═══════════════════════════════════════════════════════════════════════
// SAVE FILE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    /// Monotonic save counter, bumped on every captured snapshot.
    pub generation: u64,
    pub round: u32,
    pub is_tutorial_completed: bool,
    pub player: PlayerSave,
    pub soil: Vec<SoilSaveEntry>,
}

impl Default for SaveFile {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            generation: 0,
            round: 1,
            is_tutorial_completed: false,
            player: PlayerSave::default(),
            soil: Vec::new(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn save_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join(SAVE_FILE)
}

impl SaveFile {
    pub fn load() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            match fs::read_to_string(save_path()) {
                Ok(text) => match serde_json::from_str::<SaveFile>(&text) {
                    Ok(save) => {
                        info!("Loaded save (generation {}, round {}).", save.generation, save.round);
                        return save;
                    }
                    Err(e) => {
                        warn!("Save file unreadable ({e}); starting fresh.");
                    }
                },
                Err(_) => {
                    info!("No save file found; starting fresh.");
                }
            }
        }
        SaveFile::default()
    }

    pub fn store(&self) -> Result<(), String> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let text = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
            fs::write(save_path(), text).map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    /// Replaces the soil snapshot wholesale and bumps the save generation.
    pub fn set_soil_data(&mut self, tiles: impl IntoIterator<Item = SoilSaveEntry>) {
        self.soil = tiles.into_iter().collect();
        self.generation += 1;
    }
}
