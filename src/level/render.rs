//! Visual synchronisation — mirrors the `Level` resource into sprites.
//!
//! The simulation owns positions and tile states; these systems only copy
//! them onto entities. Tiles and actors are flat-colored quads.

use bevy::prelude::*;
use std::collections::HashMap;

use super::Level;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Markers & bookkeeping
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Component)]
pub struct PlayerSprite;

#[derive(Component)]
pub struct NpcSprite(pub usize);

#[derive(Component)]
pub struct SoilSprite {
    pub grid_x: i32,
    pub grid_y: i32,
}

#[derive(Resource, Debug, Default)]
pub struct LevelSprites {
    pub soil: HashMap<(i32, i32), Entity>,
}

pub fn grid_to_world(x: i32, y: i32) -> Vec3 {
    Vec3::new(
        x as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        y as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        1.0,
    )
}

fn soil_color(state: SoilState, planted: bool, grown: bool) -> Color {
    match (state, planted, grown) {
        (_, true, true) => Color::srgb(0.85, 0.55, 0.25),
        (_, true, false) => Color::srgb(0.35, 0.60, 0.30),
        (SoilState::Watered, ..) => Color::srgb(0.30, 0.22, 0.15),
        (SoilState::Tilled, ..) => Color::srgb(0.48, 0.35, 0.22),
        (SoilState::Untilled, ..) => Color::srgb(0.42, 0.55, 0.30),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Startup
// ─────────────────────────────────────────────────────────────────────────────

pub fn spawn_level_sprites(mut commands: Commands, level: Res<Level>) {
    // Grass backdrop over the whole plot.
    let (min_x, min_y, max_x, max_y) = super::PLOT_BOUNDS;
    let w = (max_x - min_x + 1) as f32 * TILE_SIZE;
    let h = (max_y - min_y + 1) as f32 * TILE_SIZE;
    commands.spawn((
        Sprite {
            color: Color::srgb(0.36, 0.48, 0.26),
            custom_size: Some(Vec2::new(w, h)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    commands.spawn((
        PlayerSprite,
        Sprite {
            color: Color::srgb(0.90, 0.80, 0.60),
            custom_size: Some(Vec2::new(TILE_SIZE * 0.8, TILE_SIZE * 1.2)),
            ..default()
        },
        Transform::from_translation(level.player.pos.extend(5.0)),
    ));

    for (i, npc) in level.npcs.iter().enumerate() {
        commands.spawn((
            NpcSprite(i),
            Sprite {
                color: Color::srgb(0.55, 0.45, 0.75),
                custom_size: Some(Vec2::new(TILE_SIZE * 0.8, TILE_SIZE * 1.2)),
                ..default()
            },
            Transform::from_translation(npc.pos.extend(5.0)),
        ));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-frame sync
// ─────────────────────────────────────────────────────────────────────────────

pub fn sync_actor_sprites(
    level: Res<Level>,
    mut player_query: Query<&mut Transform, (With<PlayerSprite>, Without<NpcSprite>)>,
    mut npc_query: Query<(&NpcSprite, &mut Transform), Without<PlayerSprite>>,
) {
    if let Ok(mut transform) = player_query.get_single_mut() {
        transform.translation = level.player.pos.extend(5.0);
    }
    for (npc, mut transform) in npc_query.iter_mut() {
        if let Some(walker) = level.npcs.get(npc.0) {
            transform.translation = walker.pos.extend(5.0);
        }
    }
}

/// Spawns sprites for newly worked tiles and recolors existing ones.
/// Soil tiles are never removed by the simulation, so no despawn pass.
pub fn sync_soil_sprites(
    mut commands: Commands,
    mut sprites: ResMut<LevelSprites>,
    level: Res<Level>,
    mut soil_query: Query<(&SoilSprite, &mut Sprite)>,
) {
    for (tile, mut sprite) in soil_query.iter_mut() {
        let pos = (tile.grid_x, tile.grid_y);
        if let Some(soil) = level.soil.tile(pos) {
            let grown = soil
                .planting
                .map(|p| p.growth >= super::soil::CROP_GROWN_SECONDS)
                .unwrap_or(false);
            sprite.color = soil_color(soil.state, soil.planting.is_some(), grown);
        }
    }

    let missing: Vec<(i32, i32)> = level
        .soil
        .all_soil_tiles()
        .map(|entry| (entry.x, entry.y))
        .filter(|pos| !sprites.soil.contains_key(pos))
        .collect();

    for pos in missing {
        let soil = level
            .soil
            .tile(pos)
            .expect("snapshot listed a tile the field no longer has");
        let entity = commands
            .spawn((
                SoilSprite {
                    grid_x: pos.0,
                    grid_y: pos.1,
                },
                Sprite {
                    color: soil_color(soil.state, soil.planting.is_some(), false),
                    custom_size: Some(Vec2::splat(TILE_SIZE)),
                    ..default()
                },
                Transform::from_translation(grid_to_world(pos.0, pos.1)),
            ))
            .id();
        sprites.soil.insert(pos, entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_to_world_centers_tiles() {
        let world = grid_to_world(0, 0);
        assert_eq!(world.x, TILE_SIZE / 2.0);
        assert_eq!(world.y, TILE_SIZE / 2.0);
    }

    #[test]
    fn test_soil_colors_distinguish_states() {
        let tilled = soil_color(SoilState::Tilled, false, false);
        let watered = soil_color(SoilState::Watered, false, false);
        let grown = soil_color(SoilState::Watered, true, true);
        assert_ne!(tilled, watered);
        assert_ne!(watered, grown);
    }
}
