//! Data-driven game balance
//!
//! Everything a designer might retune lives here; structural constants
//! (frame clamp, flash durations, view box) stay in [`crate::consts`].

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Gameplay balance values.
///
/// Defaults reproduce the shipped balance. Hosts may overlay a JSON
/// document; every field falls back individually, so partial documents
/// load cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Math facts ===
    /// Probability a slot rolls division instead of multiplication
    pub division_chance: f64,
    /// Smallest operand (factor, divisor, or quotient)
    pub operand_min: i32,
    /// Largest operand
    pub operand_max: i32,

    // === Player ===
    /// Starting (and maximum) health
    pub max_health: u8,
    /// Hop distance per correct answer
    pub move_distance: f32,
    /// Hop distance when the solved fact was hard
    pub move_distance_hard: f32,

    // === Enemies ===
    /// Speed of newly spawned enemies (units per frame at 60 fps)
    pub base_enemy_speed: f32,
    /// Speed added to future spawns per difficulty tick
    pub enemy_speed_increment: f32,
    /// Spawn interval at session start (ms)
    pub spawn_interval_initial_ms: f32,
    /// Spawn interval floor (ms)
    pub spawn_interval_min_ms: f32,
    /// Spawn interval reduction per difficulty tick (ms)
    pub spawn_interval_decrease_ms: f32,
    /// Contact distance for player damage
    pub enemy_hit_distance: f32,

    // === Companion ===
    /// Orbit radius around the player
    pub companion_orbit_radius: f32,
    /// Orbit speed (radians/second)
    pub companion_orbit_speed: f32,
    /// Contact distance for companion kills
    pub companion_hit_distance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            division_chance: 0.25,
            operand_min: 2,
            operand_max: 12,

            max_health: 5,
            move_distance: 96.0,
            move_distance_hard: 144.0,

            base_enemy_speed: 0.4,
            enemy_speed_increment: 0.05,
            spawn_interval_initial_ms: 3000.0,
            spawn_interval_min_ms: 800.0,
            spawn_interval_decrease_ms: 100.0,
            enemy_hit_distance: 22.0,

            companion_orbit_radius: 70.0,
            companion_orbit_speed: 2.5,
            companion_hit_distance: 20.0,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON document, falling back to defaults when the
    /// file is absent, unreadable, or out of range.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Tuning>(&json) {
                Ok(tuning) if tuning.is_sane() => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Ok(_) => {
                    log::warn!("Ignoring out-of-range tuning {}", path.display());
                    Self::default()
                }
                Err(err) => {
                    log::warn!("Ignoring malformed tuning {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Ranges the fact generator draws from must be well formed
    fn is_sane(&self) -> bool {
        (0.0..=1.0).contains(&self.division_chance) && self.operand_min <= self.operand_max
    }
}
