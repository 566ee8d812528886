//! Collision resolution
//!
//! Plain euclidean contact checks against the player and the orbiting
//! companion. Removal runs back to front so indices collected during the
//! scan stay valid.

use glam::Vec2;

use super::state::{Enemy, Player};
use crate::consts::ENEMY_DAMAGE;

/// What the player contact check did this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerHits {
    /// At least one enemy made contact
    pub damaged: bool,
    /// Enemies consumed by contact
    pub removed: usize,
}

/// Remove every enemy within contact range of the player, applying one
/// damage step per enemy with no per-tick cap. Health clamps at zero; the
/// caller owns the game-over transition.
pub fn resolve_player_collisions(
    player: &mut Player,
    enemies: &mut Vec<Enemy>,
    hit_distance: f32,
) -> PlayerHits {
    let mut hit_indices: Vec<usize> = Vec::new();
    for (i, enemy) in enemies.iter().enumerate() {
        if enemy.pos.distance(player.pos) < hit_distance {
            hit_indices.push(i);
        }
    }

    for &i in hit_indices.iter().rev() {
        enemies.remove(i);
        player.health = player.health.saturating_sub(ENEMY_DAMAGE);
    }

    PlayerHits {
        damaged: !hit_indices.is_empty(),
        removed: hit_indices.len(),
    }
}

/// Remove every enemy within contact range of the companion. No damage and
/// no score effect; the companion is pure crowd control.
pub fn resolve_companion_collisions(
    companion_pos: Vec2,
    enemies: &mut Vec<Enemy>,
    hit_distance: f32,
) -> usize {
    let before = enemies.len();
    enemies.retain(|enemy| enemy.pos.distance(companion_pos) >= hit_distance);
    before - enemies.len()
}
