//! The farm's soil field: a sparse grid of worked tiles.
//!
//! Tilling, watering, planting, and a dry-out tick. Growth rules are kept
//! deliberately small; the interesting consumers are the save snapshot and
//! the tutorial predicates.

use std::collections::HashMap;

use crate::save::SoilSaveEntry;
use crate::shared::*;

/// Seconds a watered tile stays wet.
pub const SOIL_DRY_SECONDS: f32 = 120.0;
/// Seconds of wet growth a planted crop needs before it can be harvested.
pub const CROP_GROWN_SECONDS: f32 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planting {
    pub seed: SeedKind,
    pub growth: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilTile {
    pub state: SoilState,
    pub moisture: f32,
    pub planting: Option<Planting>,
}

impl SoilTile {
    fn tilled() -> Self {
        Self {
            state: SoilState::Tilled,
            moisture: 0.0,
            planting: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SoilField {
    tiles: HashMap<(i32, i32), SoilTile>,
    /// Inclusive tile bounds of the workable plot (min_x, min_y, max_x, max_y).
    bounds: (i32, i32, i32, i32),
}

impl SoilField {
    pub fn new(bounds: (i32, i32, i32, i32)) -> Self {
        Self {
            tiles: HashMap::new(),
            bounds,
        }
    }

    pub fn in_bounds(&self, pos: (i32, i32)) -> bool {
        let (min_x, min_y, max_x, max_y) = self.bounds;
        pos.0 >= min_x && pos.0 <= max_x && pos.1 >= min_y && pos.1 <= max_y
    }

    pub fn tile(&self, pos: (i32, i32)) -> Option<&SoilTile> {
        self.tiles.get(&pos)
    }

    /// Hoe: turns an unworked in-bounds tile into tilled soil.
    pub fn till(&mut self, pos: (i32, i32)) -> bool {
        if !self.in_bounds(pos) || self.tiles.contains_key(&pos) {
            return false;
        }
        self.tiles.insert(pos, SoilTile::tilled());
        true
    }

    /// Watering can: wets a tilled tile.
    pub fn water(&mut self, pos: (i32, i32)) -> bool {
        match self.tiles.get_mut(&pos) {
            Some(tile) if tile.state == SoilState::Tilled => {
                tile.state = SoilState::Watered;
                tile.moisture = SOIL_DRY_SECONDS;
                true
            }
            _ => false,
        }
    }

    /// Plants the given seed into worked, empty soil.
    pub fn plant(&mut self, pos: (i32, i32), seed: SeedKind) -> bool {
        match self.tiles.get_mut(&pos) {
            Some(tile) if tile.planting.is_none() => {
                tile.planting = Some(Planting { seed, growth: 0.0 });
                true
            }
            _ => false,
        }
    }

    /// Scythe: cuts a fully grown crop, returning its kind.
    pub fn harvest(&mut self, pos: (i32, i32)) -> Option<SeedKind> {
        let tile = self.tiles.get_mut(&pos)?;
        match tile.planting {
            Some(p) if p.growth >= CROP_GROWN_SECONDS => {
                tile.planting = None;
                Some(p.seed)
            }
            _ => None,
        }
    }

    /// Dry-out and growth tick.
    pub fn update(&mut self, dt: f32) {
        for tile in self.tiles.values_mut() {
            if tile.state == SoilState::Watered {
                tile.moisture -= dt;
                if tile.moisture <= 0.0 {
                    tile.moisture = 0.0;
                    tile.state = SoilState::Tilled;
                }
                if let Some(ref mut planting) = tile.planting {
                    planting.growth += dt;
                }
            }
        }
    }

    /// Snapshot of every worked tile, for the save file.
    pub fn all_soil_tiles(&self) -> impl Iterator<Item = SoilSaveEntry> + '_ {
        self.tiles.iter().map(|(&(x, y), tile)| SoilSaveEntry {
            x,
            y,
            state: tile.state,
        })
    }

    /// Rebuilds worked tiles from a save snapshot. Plantings do not persist.
    pub fn restore(&mut self, entries: &[SoilSaveEntry]) {
        self.tiles.clear();
        for entry in entries {
            let tile = SoilTile {
                state: entry.state,
                moisture: if entry.state == SoilState::Watered {
                    SOIL_DRY_SECONDS
                } else {
                    0.0
                },
                planting: None,
            };
            self.tiles.insert((entry.x, entry.y), tile);
        }
    }

    pub fn worked_tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn any_watered(&self) -> bool {
        self.tiles.values().any(|t| t.state == SoilState::Watered)
    }

    pub fn any_planted(&self) -> bool {
        self.tiles.values().any(|t| t.planting.is_some())
    }
}
