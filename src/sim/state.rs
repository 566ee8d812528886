//! Game state and core simulation types
//!
//! Everything a session mutates per frame lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::facts::{self, FactSet};
use crate::Tuning;
use crate::consts::*;

/// The four fact directions, in answer-check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in the order answers are matched
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Slot index within a fact set
    pub fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    /// Unit offset on the screen-style plane (+y points down)
    pub fn offset(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Active gameplay
    Playing,
    /// Run ended. `board` is None between death and the first coordinator
    /// step, then tracks the leaderboard flow.
    GameOver { board: Option<BoardPhase> },
}

/// Post-game leaderboard flow step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardPhase {
    /// Waiting for the saved table to arrive
    Loading,
    /// Run qualified; collecting three initials
    Initials,
    /// Showing the final table
    Display,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// World position (unbounded plane)
    pub pos: Vec2,
    /// Remaining health
    pub health: u8,
}

/// A zombie converging on the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Units per frame at 60 fps; motion scales by dt * 60.
    /// Fixed at spawn, so the difficulty ramp only affects future spawns.
    pub speed: f32,
}

/// Orbiting companion. Only the angle is stored; the world position is
/// derived from the player every tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Companion {
    /// Orbit angle in radians, grows without bound
    pub angle: f32,
}

/// A solved fact held on screen, blocking further answers
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolvedFact {
    pub dir: Direction,
    /// Seconds left in the display window
    pub remaining: f32,
}

/// Complete per-session world state (rebuilt on every restart)
#[derive(Debug, Clone)]
pub struct World {
    /// Session seed for reproducibility
    pub seed: u64,
    /// All randomness flows through this
    pub rng: Pcg32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub companion: Companion,
    pub facts: FactSet,
    /// Survival time in seconds
    pub timer: f32,
    pub phase: Phase,
    pub difficulty: Difficulty,
    /// Clock reading at the last spawn; None until the first Playing frame
    pub last_spawn_ms: Option<f64>,
    /// Active solved-fact window, if any
    pub solved: Option<SolvedFact>,
    /// Seconds left on the red damage overlay
    pub damage_flash: f32,
}

impl World {
    /// Create a fresh world with the given seed
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let facts = facts::generate_set(&mut rng, tuning);

        Self {
            seed,
            rng,
            player: Player {
                pos: Vec2::new(VIEW_WIDTH / 2.0, VIEW_HEIGHT / 2.0),
                health: tuning.max_health,
            },
            enemies: Vec::new(),
            companion: Companion { angle: 0.0 },
            facts,
            timer: 0.0,
            phase: Phase::Playing,
            difficulty: Difficulty::new(tuning),
            last_spawn_ms: None,
            solved: None,
            damage_flash: 0.0,
        }
    }

    /// Spawn one enemy just outside a view-sized box centered on the player
    pub fn spawn_enemy(&mut self) {
        let half_w = VIEW_WIDTH / 2.0;
        let half_h = VIEW_HEIGHT / 2.0;
        let margin = ENEMY_SPAWN_MARGIN;

        let edge: u8 = self.rng.random_range(0..4);
        let offset = match edge {
            // Top
            0 => Vec2::new(
                self.rng.random_range((-half_w + margin)..(half_w - margin)),
                -half_h - ENEMY_SIZE,
            ),
            // Bottom
            1 => Vec2::new(
                self.rng.random_range((-half_w + margin)..(half_w - margin)),
                half_h + ENEMY_SIZE,
            ),
            // Left
            2 => Vec2::new(
                -half_w - ENEMY_SIZE,
                self.rng.random_range((-half_h + margin)..(half_h - margin)),
            ),
            // Right
            _ => Vec2::new(
                half_w + ENEMY_SIZE,
                self.rng.random_range((-half_h + margin)..(half_h - margin)),
            ),
        };

        self.enemies.push(Enemy {
            pos: self.player.pos + offset,
            speed: self.difficulty.enemy_speed,
        });
    }
}
