//! The level: the world the orchestrator simulates between menus.
//!
//! Owns the player, the soil field, the villager walkers, and the scripted
//! camera pan. Pure simulation lives on the `Level` resource; `render.rs`
//! mirrors it into sprites and `camera.rs` follows `camera_pos`.

pub mod camera;
pub mod cutscene;
pub mod npcs;
pub mod render;
pub mod soil;

use bevy::prelude::*;

use crate::player::{ControlMap, Player};
use crate::save::SaveFile;
use crate::shared::*;
use cutscene::CutsceneAnimation;
use npcs::{NpcRole, NpcWalker};
use soil::SoilField;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<render::LevelSprites>()
            .add_systems(Startup, render::spawn_level_sprites)
            .add_systems(
                Update,
                (
                    render::sync_actor_sprites,
                    render::sync_soil_sprites,
                    camera::camera_follow,
                ),
            );
    }
}

/// Gold earned per harvested crop.
pub const CROP_SELL_PRICE: u32 = 30;
/// Workable plot, in tiles around the farmhouse.
pub const PLOT_BOUNDS: (i32, i32, i32, i32) = (-12, -8, 12, 8);

#[derive(Resource, Debug, Clone)]
pub struct Level {
    pub player: Player,
    pub soil: SoilField,
    pub npcs: Vec<NpcWalker>,
    pub cutscene: CutsceneAnimation,
    /// Camera anchor for this frame: the cutscene target, else the player.
    pub camera_pos: Vec2,
    /// Application events raised by the simulation, drained into the event
    /// queue after the frame (they route on the next iteration).
    outbox: Vec<GameEvent>,
}

impl Level {
    pub fn new(save: &SaveFile, controls: ControlMap) -> Self {
        let player = Player::from_save(&save.player, controls);
        let mut soil = SoilField::new(PLOT_BOUNDS);
        soil.restore(&save.soil);

        let mut cutscene = CutsceneAnimation::default();
        // New farms open on the scripted tour; returning players skip it.
        if save.generation == 0 {
            cutscene.start(cutscene::farm_tour(player.pos), player.pos);
        }

        let camera_pos = player.pos;
        Self {
            player,
            soil,
            npcs: npcs::spawn_roster(),
            cutscene,
            camera_pos,
            outbox: Vec::new(),
        }
    }

    /// One simulation step. `is_playing` is false while a menu state drives
    /// the frame (the bootstrap frame updates the level regardless).
    pub fn update(&mut self, dt: f32, is_playing: bool) {
        if self.cutscene.active {
            self.cutscene.update(dt, self.player.pos);
        }

        self.player.apply_movement(dt);
        self.soil.update(dt);

        if is_playing && !self.cutscene.active {
            let mut rng = rand::thread_rng();
            for npc in &mut self.npcs {
                npc.update(dt, &mut rng);
            }
        }

        self.camera_pos = self
            .cutscene
            .camera_target()
            .unwrap_or(self.player.pos);
    }

    /// Last stop of the event routing chain.
    pub fn handle_event(&mut self, event: &GameEvent) -> bool {
        let GameEvent::KeyDown(key) = *event else {
            return false;
        };
        if self.player.blocked || self.cutscene.active {
            return false;
        }
        let controls = self.player.controls;

        if key == controls.use_tool {
            self.use_current_tool();
            return true;
        }
        if key == controls.plant_seed {
            self.plant_current_seed();
            return true;
        }
        if key == controls.interact {
            let player_pos = self.player.pos;
            let nearby = self
                .npcs
                .iter()
                .find(|n| n.is_near(player_pos))
                .map(|n| (n.role, n.dialogue_id));
            if let Some((role, dialogue_id)) = nearby {
                self.outbox.push(match role {
                    NpcRole::Merchant => GameEvent::OpenShop,
                    NpcRole::Villager => GameEvent::ShowDialogue(dialogue_id),
                });
                return true;
            }
            return false;
        }
        false
    }

    fn use_current_tool(&mut self) {
        let target = self.player.target_tile();
        match self.player.current_tool {
            ToolKind::Hoe => {
                self.soil.till(target);
            }
            ToolKind::WateringCan => {
                self.soil.water(target);
            }
            ToolKind::Scythe => {
                if self.soil.harvest(target).is_some() {
                    self.player.gold += CROP_SELL_PRICE;
                }
            }
        }
    }

    fn plant_current_seed(&mut self) {
        let target = self.player.target_tile();
        let seed = self.player.current_seed;
        if self.player.take_seed() && !self.soil.plant(target, seed) {
            // Nothing to plant into — hand the seed back.
            self.player.add_seeds(seed, 1);
        }
    }

    pub fn drain_outbox(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_level() -> Level {
        let mut save = SaveFile::default();
        save.generation = 1; // skip the farm tour
        Level::new(&save, ControlMap::default())
    }

    #[test]
    fn test_new_farm_opens_on_the_tour() {
        let save = SaveFile::default();
        let level = Level::new(&save, ControlMap::default());
        assert!(level.cutscene.active);

        let mut returning = SaveFile::default();
        returning.generation = 3;
        let level = Level::new(&returning, ControlMap::default());
        assert!(!level.cutscene.active);
    }

    #[test]
    fn test_hoe_key_tills_the_target_tile() {
        let mut level = fresh_level();
        level.player.current_tool = ToolKind::Hoe;
        let target = level.player.target_tile();
        let consumed =
            level.handle_event(&GameEvent::KeyDown(level.player.controls.use_tool));
        assert!(consumed);
        assert!(level.soil.tile(target).is_some());
    }

    #[test]
    fn test_blocked_player_consumes_nothing() {
        let mut level = fresh_level();
        level.player.blocked = true;
        let consumed =
            level.handle_event(&GameEvent::KeyDown(level.player.controls.use_tool));
        assert!(!consumed);
    }

    #[test]
    fn test_interact_near_a_villager_raises_dialogue() {
        let mut level = fresh_level();
        // Bram is the plain villager.
        level.player.pos = level.npcs[1].pos;
        let consumed =
            level.handle_event(&GameEvent::KeyDown(level.player.controls.interact));
        assert!(consumed);
        let out = level.drain_outbox();
        assert_eq!(out, vec![GameEvent::ShowDialogue(level.npcs[1].dialogue_id)]);
        assert!(level.drain_outbox().is_empty());
    }

    #[test]
    fn test_interact_with_the_merchant_opens_the_shop() {
        let mut level = fresh_level();
        assert_eq!(level.npcs[0].role, NpcRole::Merchant);
        level.player.pos = level.npcs[0].pos;
        let consumed =
            level.handle_event(&GameEvent::KeyDown(level.player.controls.interact));
        assert!(consumed);
        assert_eq!(level.drain_outbox(), vec![GameEvent::OpenShop]);
    }

    #[test]
    fn test_interact_in_the_open_is_unconsumed() {
        let mut level = fresh_level();
        level.player.pos = Vec2::new(9_000.0, 9_000.0);
        let consumed =
            level.handle_event(&GameEvent::KeyDown(level.player.controls.interact));
        assert!(!consumed);
    }

    #[test]
    fn test_planting_refunds_seed_when_soil_is_unworked() {
        let mut level = fresh_level();
        level.player.pos = Vec2::new(9_000.0, 9_000.0); // outside the plot
        let before = level.player.seed_count(level.player.current_seed);
        level.handle_event(&GameEvent::KeyDown(level.player.controls.plant_seed));
        assert_eq!(level.player.seed_count(level.player.current_seed), before);
    }

    #[test]
    fn test_camera_follows_cutscene_then_player() {
        let save = SaveFile::default();
        let mut level = Level::new(&save, ControlMap::default());
        level.update(0.5, true);
        let during = level.camera_pos;
        assert_eq!(Some(during), level.cutscene.camera_target());

        while level.cutscene.active {
            level.update(0.5, true);
        }
        level.update(0.1, true);
        assert_eq!(level.camera_pos, level.player.pos);
    }
}
