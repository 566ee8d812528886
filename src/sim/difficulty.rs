//! Survival-time difficulty ramp
//!
//! Every 30 seconds of play the spawn interval steps down and newly
//! spawned enemies get faster. The ratchet only moves one way.

use serde::{Deserialize, Serialize};

use crate::Tuning;
use crate::consts::DIFFICULTY_TICK_SECONDS;

/// Scheduler state for the one-way difficulty ramp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Current time between spawns (ms), floored at the tuning minimum
    pub spawn_interval_ms: f32,
    /// Speed assigned to newly spawned enemies
    pub enemy_speed: f32,
    /// Last ratchet step applied (0 = session start)
    pub last_tick_index: u32,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            spawn_interval_ms: tuning.spawn_interval_initial_ms,
            enemy_speed: tuning.base_enemy_speed,
            last_tick_index: 0,
        }
    }

    /// Apply the ratchet for the given session time. Safe to call every
    /// frame; each 30-second boundary takes effect exactly once.
    pub fn tick(&mut self, elapsed_seconds: f32, tuning: &Tuning) {
        let tick_index = (elapsed_seconds / DIFFICULTY_TICK_SECONDS) as u32;
        if tick_index > self.last_tick_index {
            self.last_tick_index = tick_index;
            self.enemy_speed += tuning.enemy_speed_increment;
            self.spawn_interval_ms = (tuning.spawn_interval_initial_ms
                - tick_index as f32 * tuning.spawn_interval_decrease_ms)
                .max(tuning.spawn_interval_min_ms);
            log::info!(
                "Difficulty up: spawn every {:.0}ms, enemy speed {:.2}",
                self.spawn_interval_ms,
                self.enemy_speed
            );
        }
    }
}
