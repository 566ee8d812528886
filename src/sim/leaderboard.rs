//! Post-game leaderboard flow
//!
//! Drives Loading -> Initials -> Display once a run ends. The flow never
//! touches storage itself: it queues generation-tagged requests for the
//! host to service and reacts to responses whenever they arrive. A
//! response stamped with an older generation is dropped, so a slow load
//! can never leak into a restarted session.

use super::state::BoardPhase;
use crate::scoreboard::{INITIALS_LEN, Scoreboard};
use crate::store::{StoreRequest, StoreResponse};

/// Leaderboard coordinator state (outlives individual worlds)
#[derive(Debug, Default)]
pub struct BoardFlow {
    /// Current session generation; bumped on restart
    generation: u64,
    /// Requests waiting for the host to drain
    requests: Vec<StoreRequest>,
    /// Initials typed so far
    initials: String,
}

impl BoardFlow {
    /// Start the post-game flow: queue a load and enter Loading
    pub fn begin(&mut self) -> BoardPhase {
        self.requests.push(StoreRequest::Load {
            generation: self.generation,
        });
        BoardPhase::Loading
    }

    /// Feed one store completion back in. Returns the next board phase, or
    /// None when nothing changes (stale response, save completion).
    pub fn on_response(
        &mut self,
        response: StoreResponse,
        scoreboard: &mut Scoreboard,
        survival_time: f32,
    ) -> Option<BoardPhase> {
        let generation = match &response {
            StoreResponse::Loaded { generation, .. } => *generation,
            StoreResponse::Saved { generation, .. } => *generation,
        };
        if generation != self.generation {
            log::debug!(
                "Dropping stale store response (generation {generation}, now {})",
                self.generation
            );
            return None;
        }

        match response {
            StoreResponse::Loaded { result, .. } => {
                match result {
                    Ok(board) => *scoreboard = board,
                    Err(err) => {
                        log::warn!("Score load failed, starting with an empty table: {err}");
                        *scoreboard = Scoreboard::new();
                    }
                }

                if scoreboard.qualifies(survival_time) {
                    log::info!("Run of {survival_time:.1}s makes the board");
                    Some(BoardPhase::Initials)
                } else {
                    Some(BoardPhase::Display)
                }
            }
            StoreResponse::Saved { result, .. } => {
                match result {
                    Ok(()) => log::debug!("Scores persisted"),
                    Err(err) => log::warn!("Score save failed: {err}"),
                }
                None
            }
        }
    }

    /// Append one typed character; anything non-alphabetic is dropped
    pub fn push_initial(&mut self, c: char) {
        if self.initials.len() < INITIALS_LEN && c.is_ascii_alphabetic() {
            self.initials.push(c.to_ascii_uppercase());
        }
    }

    /// Backspace
    pub fn pop_initial(&mut self) {
        self.initials.pop();
    }

    /// Initials typed so far
    pub fn initials(&self) -> &str {
        &self.initials
    }

    /// Commit the entry once three initials are held: insert, queue a
    /// save, move to Display. A no-op until the initials are complete.
    pub fn confirm(
        &mut self,
        scoreboard: &mut Scoreboard,
        survival_time: f32,
    ) -> Option<BoardPhase> {
        if self.initials.len() < INITIALS_LEN {
            return None;
        }

        let initials = std::mem::take(&mut self.initials);
        scoreboard.add_score(initials, survival_time);
        self.requests.push(StoreRequest::Save {
            generation: self.generation,
            board: scoreboard.clone(),
        });
        Some(BoardPhase::Display)
    }

    /// Drain queued requests for the host to service
    pub fn take_requests(&mut self) -> Vec<StoreRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Invalidate in-flight work on restart. Requests nobody drained are
    /// dropped outright; serviced ones will fail the generation check.
    pub fn bump_generation(&mut self) {
        self.generation += 1;
        self.requests.clear();
        self.initials.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    fn full_board_lowest_200() -> Scoreboard {
        let mut board = Scoreboard::new();
        for i in 0..10 {
            board.add_score("AAA".into(), 1100.0 - i as f32 * 100.0);
        }
        board
    }

    #[test]
    fn test_begin_queues_a_tagged_load() {
        let mut flow = BoardFlow::default();
        assert_eq!(flow.begin(), BoardPhase::Loading);

        let requests = flow.take_requests();
        assert!(matches!(
            requests.as_slice(),
            [StoreRequest::Load { generation: 0 }]
        ));
        assert!(flow.take_requests().is_empty());
    }

    #[test]
    fn test_short_run_goes_straight_to_display() {
        let mut flow = BoardFlow::default();
        let mut scoreboard = Scoreboard::new();
        flow.begin();

        let next = flow.on_response(
            StoreResponse::Loaded {
                generation: 0,
                result: Ok(full_board_lowest_200()),
            },
            &mut scoreboard,
            125.4,
        );

        assert_eq!(next, Some(BoardPhase::Display));
        assert_eq!(scoreboard.entries.len(), 10);
        assert!(scoreboard.entries.iter().all(|e| e.time >= 200.0));
    }

    #[test]
    fn test_qualifying_run_collects_initials() {
        let mut flow = BoardFlow::default();
        let mut scoreboard = Scoreboard::new();
        flow.begin();

        let next = flow.on_response(
            StoreResponse::Loaded {
                generation: 0,
                result: Ok(full_board_lowest_200()),
            },
            &mut scoreboard,
            250.0,
        );

        assert_eq!(next, Some(BoardPhase::Initials));
    }

    #[test]
    fn test_load_failure_counts_as_empty_table() {
        let mut flow = BoardFlow::default();
        let mut scoreboard = full_board_lowest_200();
        flow.begin();

        // Any time qualifies against an empty table
        let next = flow.on_response(
            StoreResponse::Loaded {
                generation: 0,
                result: Err(StoreError::Unavailable("backend down".into())),
            },
            &mut scoreboard,
            10.0,
        );

        assert_eq!(next, Some(BoardPhase::Initials));
        assert!(scoreboard.is_empty());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut flow = BoardFlow::default();
        let mut scoreboard = Scoreboard::new();
        flow.begin();
        flow.bump_generation();

        let next = flow.on_response(
            StoreResponse::Loaded {
                generation: 0,
                result: Ok(full_board_lowest_200()),
            },
            &mut scoreboard,
            250.0,
        );

        assert_eq!(next, None);
        assert!(scoreboard.is_empty());
    }

    #[test]
    fn test_initials_input_is_filtered_uppercased_capped() {
        let mut flow = BoardFlow::default();
        for c in ['a', '1', 'B', '!', ' ', 'c', 'D'] {
            flow.push_initial(c);
        }
        assert_eq!(flow.initials(), "ABC");

        flow.pop_initial();
        assert_eq!(flow.initials(), "AB");
    }

    #[test]
    fn test_confirm_needs_three_initials_then_saves() {
        let mut flow = BoardFlow::default();
        let mut scoreboard = full_board_lowest_200();

        flow.push_initial('A');
        flow.push_initial('B');
        assert_eq!(flow.confirm(&mut scoreboard, 250.0), None);

        flow.push_initial('C');
        assert_eq!(flow.confirm(&mut scoreboard, 250.0), Some(BoardPhase::Display));

        assert_eq!(scoreboard.entries.len(), 10);
        let inserted = scoreboard.entries.iter().find(|e| e.initials == "ABC");
        assert_eq!(inserted.map(|e| e.time), Some(250.0));
        // The 200.0 run fell off the table
        assert!(scoreboard.entries.iter().all(|e| e.time > 200.0));

        let requests = flow.take_requests();
        match requests.as_slice() {
            [StoreRequest::Save { generation: 0, board }] => {
                assert!(board.entries.iter().any(|e| e.initials == "ABC"));
            }
            other => panic!("expected one save request, got {other:?}"),
        }
    }

    #[test]
    fn test_restart_drops_undrained_requests() {
        let mut flow = BoardFlow::default();
        flow.begin();
        flow.push_initial('A');
        flow.bump_generation();

        assert!(flow.take_requests().is_empty());
        assert_eq!(flow.initials(), "");

        // The new generation tags fresh work
        flow.begin();
        assert!(matches!(
            flow.take_requests().as_slice(),
            [StoreRequest::Load { generation: 1 }]
        ));
    }
}
