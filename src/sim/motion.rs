//! Entity motion
//!
//! Enemies seek the player in a straight line; the companion orbits. Speeds
//! are tuned for 60 fps frames, so displacement scales by `dt * 60`.

use glam::Vec2;

use super::state::{Companion, Enemy};
use crate::polar_to_cartesian;

/// Advance every enemy straight toward the target
pub fn advance_enemies(enemies: &mut [Enemy], target: Vec2, dt: f32) {
    for enemy in enemies {
        let to_target = target - enemy.pos;
        let dist = to_target.length();
        // An enemy exactly on the target stands still this tick
        if dist > 0.0 {
            enemy.pos += (to_target / dist) * enemy.speed * dt * 60.0;
        }
    }
}

/// Advance the companion orbit. The angle is never wrapped; only its
/// sin/cos are ever read.
pub fn advance_companion(companion: &mut Companion, orbit_speed: f32, dt: f32) {
    companion.angle += orbit_speed * dt;
}

/// Derive the companion's world position from the player
pub fn companion_position(player_pos: Vec2, companion: &Companion, orbit_radius: f32) -> Vec2 {
    player_pos + polar_to_cartesian(orbit_radius, companion.angle)
}
