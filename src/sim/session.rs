//! Session state machine
//!
//! The public surface of the simulation. A session owns the current world,
//! the scoreboard cache that outlives worlds, and the post-game flow, and
//! exposes the frame clock, answer submission, initials entry, restart,
//! and the store request/response seam. Presentation reads [`Snapshot`].

use glam::Vec2;
use rand::Rng;

use super::facts::FactSet;
use super::leaderboard::BoardFlow;
use super::motion::companion_position;
use super::state::{BoardPhase, Direction, Enemy, Phase, Player, SolvedFact, World};
use super::tick;
use crate::consts::{MAX_FRAME_DT, SOLVED_FLASH_SECONDS};
use crate::scoreboard::Scoreboard;
use crate::store::{StoreRequest, StoreResponse};
use crate::tuning::Tuning;

/// One player session plus the state that survives its restarts
pub struct Session {
    tuning: Tuning,
    world: World,
    scoreboard: Scoreboard,
    flow: BoardFlow,
    /// Clock reading of the previous frame; None right after new/restart
    last_now_ms: Option<f64>,
}

/// Read-only view for presentation
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    /// Derived orbit position
    pub companion_pos: Vec2,
    pub facts: &'a FactSet,
    /// Solved fact held on screen, if any
    pub solved: Option<SolvedFact>,
    /// Seconds left on the red damage overlay
    pub damage_flash: f32,
    /// Survival time in seconds
    pub timer: f32,
    pub phase: Phase,
    pub scoreboard: &'a Scoreboard,
    /// Initials typed so far
    pub initials: &'a str,
}

impl Session {
    /// Start a session with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!("New session (seed {seed})");
        let world = World::new(seed, &tuning);
        Self {
            tuning,
            world,
            scoreboard: Scoreboard::new(),
            flow: BoardFlow::default(),
            last_now_ms: None,
        }
    }

    /// Advance to the host's current monotonic clock (milliseconds). The
    /// step is clamped to 50 ms; the first frame after new/restart
    /// contributes no time.
    pub fn frame(&mut self, now_ms: f64) {
        let dt = match self.last_now_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_now_ms = Some(now_ms);

        let outcome = tick::tick(&mut self.world, now_ms, dt, &self.tuning);
        if outcome.companion_kills > 0 {
            log::debug!("Companion cleared {} enemies", outcome.companion_kills);
        }
        if outcome.died {
            log::info!("Run over after {:.1}s", self.world.timer);
            let board = self.flow.begin();
            self.world.phase = Phase::GameOver { board: Some(board) };
        }
    }

    /// Try a normalized answer against the four facts, in Left, Right,
    /// Up, Down order. A match hops the player and opens the solved
    /// window; anything else is ignored. Rejected outright while a window
    /// is open or outside active play.
    pub fn submit_answer(&mut self, value: i32) -> Option<Direction> {
        if self.world.phase != Phase::Playing || self.world.solved.is_some() {
            return None;
        }

        let (dir, hard) = self
            .world
            .facts
            .iter()
            .find(|(_, fact)| fact.answer == value)
            .map(|(dir, fact)| (dir, fact.hard))?;

        let distance = if hard {
            self.tuning.move_distance_hard
        } else {
            self.tuning.move_distance
        };
        self.world.player.pos += dir.offset() * distance;
        self.world.solved = Some(SolvedFact {
            dir,
            remaining: SOLVED_FLASH_SECONDS,
        });
        log::debug!("{value} solved {dir:?}, hop {distance}");
        Some(dir)
    }

    /// Type one initial (Initials phase only)
    pub fn push_initial(&mut self, c: char) {
        if self.board_phase() == Some(BoardPhase::Initials) {
            self.flow.push_initial(c);
        }
    }

    /// Backspace one initial (Initials phase only)
    pub fn pop_initial(&mut self) {
        if self.board_phase() == Some(BoardPhase::Initials) {
            self.flow.pop_initial();
        }
    }

    /// Commit the three typed initials and move to Display. No-op until
    /// three are held.
    pub fn confirm_initials(&mut self) {
        if self.board_phase() != Some(BoardPhase::Initials) {
            return;
        }
        if let Some(next) = self.flow.confirm(&mut self.scoreboard, self.world.timer) {
            self.world.phase = Phase::GameOver { board: Some(next) };
        }
    }

    /// Tear down the ended run and start a fresh world. The next seed is
    /// drawn from the dying world's RNG, so a whole multi-session run
    /// replays from the first seed. Ignored while still Playing.
    pub fn restart(&mut self) {
        if self.world.phase == Phase::Playing {
            return;
        }

        self.flow.bump_generation();
        let seed = self.world.rng.random();
        log::info!("Restarting (seed {seed})");
        self.world = World::new(seed, &self.tuning);
        self.last_now_ms = None;
    }

    /// Drain queued storage work for the host to service
    pub fn take_store_requests(&mut self) -> Vec<StoreRequest> {
        self.flow.take_requests()
    }

    /// Feed one storage completion back in, whenever it arrives
    pub fn apply_store_response(&mut self, response: StoreResponse) {
        if let Some(next) = self
            .flow
            .on_response(response, &mut self.scoreboard, self.world.timer)
        {
            self.world.phase = Phase::GameOver { board: Some(next) };
        }
    }

    /// Read-only view of the current state
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player: &self.world.player,
            enemies: &self.world.enemies,
            companion_pos: companion_position(
                self.world.player.pos,
                &self.world.companion,
                self.tuning.companion_orbit_radius,
            ),
            facts: &self.world.facts,
            solved: self.world.solved,
            damage_flash: self.world.damage_flash,
            timer: self.world.timer,
            phase: self.world.phase,
            scoreboard: &self.scoreboard,
            initials: self.flow.initials(),
        }
    }

    fn board_phase(&self) -> Option<BoardPhase> {
        match self.world.phase {
            Phase::GameOver { board } => board,
            Phase::Playing => None,
        }
    }
}
