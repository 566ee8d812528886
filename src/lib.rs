//! Math Horde - an arcade arithmetic trainer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (facts, motion, collisions, session flow)
//! - `scoreboard`: Survival-time leaderboard table
//! - `store`: Pluggable score persistence
//! - `tuning`: Data-driven game balance
//!
//! Rendering and input parsing live in the host. The host feeds
//! [`sim::Session`] a monotonic millisecond clock and normalized integer
//! answers, services the store requests it queues, and draws from
//! [`sim::Snapshot`].

pub mod scoreboard;
pub mod sim;
pub mod store;
pub mod tuning;

pub use scoreboard::{ScoreEntry, Scoreboard};
pub use sim::{Direction, Session, Snapshot};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest simulated time step per frame (seconds). Long stalls
    /// (backgrounded tab, debugger pause) contribute at most this much.
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Logical view size. The world is unbounded; this box, centered on the
    /// player, only defines where enemies materialize.
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Enemy sprite half-extent; spawns sit this far outside the view box.
    pub const ENEMY_SIZE: f32 = 14.0;
    /// Spawn positions keep this margin from the view box corners.
    pub const ENEMY_SPAWN_MARGIN: f32 = 30.0;
    /// Health lost per enemy contact.
    pub const ENEMY_DAMAGE: u8 = 1;

    /// Difficulty ratchet period (seconds of survival per step).
    pub const DIFFICULTY_TICK_SECONDS: f32 = 30.0;

    /// Both operands at or above this make a fact "hard".
    pub const HARD_OPERAND_MIN: i32 = 7;
    /// Rerolls per fact slot before a duplicate answer is accepted.
    pub const FACT_REROLL_ATTEMPTS: u32 = 50;

    /// Duration the solved fact stays on screen, blocking further answers.
    pub const SOLVED_FLASH_SECONDS: f32 = 1.0;
    /// Duration of the red damage overlay.
    pub const DAMAGE_FLASH_SECONDS: f32 = 0.15;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
