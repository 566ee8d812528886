//! Pluggable score persistence
//!
//! The simulation never touches storage directly. It queues
//! [`StoreRequest`]s tagged with its session generation; the host services
//! them against a [`ScoreStore`] (typically via [`service`]) and feeds the
//! [`StoreResponse`]s back whenever they complete. Responses from an older
//! generation are discarded by the simulation, so a slow backend can never
//! clobber a restarted session.

use std::path::PathBuf;

use thiserror::Error;

use crate::scoreboard::Scoreboard;

/// Storage failure. Never fatal: a failed load falls back to an empty
/// leaderboard and a failed save keeps the in-memory table.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed score data: {0}")]
    Format(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage work queued by the simulation
#[derive(Debug, Clone)]
pub enum StoreRequest {
    /// Fetch the saved leaderboard
    Load { generation: u64 },
    /// Persist the leaderboard after an insertion
    Save { generation: u64, board: Scoreboard },
}

/// Completion of a [`StoreRequest`], tagged with its generation
#[derive(Debug)]
pub enum StoreResponse {
    Loaded {
        generation: u64,
        result: Result<Scoreboard, StoreError>,
    },
    Saved {
        generation: u64,
        result: Result<(), StoreError>,
    },
}

/// Leaderboard storage backend
pub trait ScoreStore {
    fn load(&mut self) -> Result<Scoreboard, StoreError>;
    fn save(&mut self, board: &Scoreboard) -> Result<(), StoreError>;
}

/// Service one request against a backend, preserving its generation tag
pub fn service(store: &mut dyn ScoreStore, request: StoreRequest) -> StoreResponse {
    match request {
        StoreRequest::Load { generation } => StoreResponse::Loaded {
            generation,
            result: store.load(),
        },
        StoreRequest::Save { generation, board } => StoreResponse::Saved {
            generation,
            result: store.save(&board),
        },
    }
}

/// Leaderboard persisted as a JSON file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<Scoreboard, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => {
                let board: Scoreboard = serde_json::from_str(&json)?;
                log::info!("Loaded {} saved scores", board.entries.len());
                Ok(board)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No saved scores found, starting fresh");
                Ok(Scoreboard::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, board: &Scoreboard) -> Result<(), StoreError> {
        let json = serde_json::to_string(board)?;
        std::fs::write(&self.path, json)?;
        log::info!("Scores saved ({} entries)", board.entries.len());
        Ok(())
    }
}

/// In-memory backend with failure injection, for tests and demos
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub board: Scoreboard,
    pub fail_loads: bool,
    pub fail_saves: bool,
}

impl ScoreStore for MemoryStore {
    fn load(&mut self) -> Result<Scoreboard, StoreError> {
        if self.fail_loads {
            return Err(StoreError::Unavailable("injected load failure".into()));
        }
        Ok(self.board.clone())
    }

    fn save(&mut self, board: &Scoreboard) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Unavailable("injected save failure".into()));
        }
        self.board = board.clone();
        Ok(())
    }
}
