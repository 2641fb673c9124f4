//! Camera follow. Tracks `Level::camera_pos` (the cutscene target while one
//! runs, the player otherwise) with a lerp; snaps on teleport-sized jumps.

use bevy::prelude::*;

use super::Level;
use crate::shared::*;

const LERP_SPEED: f32 = 5.0;
const SNAP_DISTANCE: f32 = TILE_SIZE * 20.0;

pub fn camera_follow(
    time: Res<Time>,
    level: Res<Level>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(mut cam_tf) = camera_query.get_single_mut() else {
        return;
    };

    let target = level.camera_pos;
    let dx = (target.x - cam_tf.translation.x).abs();
    let dy = (target.y - cam_tf.translation.y).abs();

    if dx > SNAP_DISTANCE || dy > SNAP_DISTANCE {
        cam_tf.translation.x = target.x;
        cam_tf.translation.y = target.y;
        return;
    }

    let t = (LERP_SPEED * time.delta_secs()).min(1.0);
    cam_tf.translation.x += (target.x - cam_tf.translation.x) * t;
    cam_tf.translation.y += (target.y - cam_tf.translation.y) * t;
}
