//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-fed clamped timestep only
//! - Seeded RNG only
//! - Storage reached only through queued requests and responses
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod facts;
pub mod leaderboard;
pub mod motion;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{PlayerHits, resolve_companion_collisions, resolve_player_collisions};
pub use difficulty::Difficulty;
pub use facts::{FactSet, MathFact};
pub use leaderboard::BoardFlow;
pub use session::{Session, Snapshot};
pub use state::{BoardPhase, Companion, Direction, Enemy, Phase, Player, SolvedFact, World};
pub use tick::{TickOutcome, tick};
