//! Math Horde entry point
//!
//! Headless reference driver: runs the simulation on a synthetic 60 Hz
//! clock with a scripted player, services score storage against a JSON
//! file, and prints the final table. A real front end replaces this loop
//! with its own clock, input handling, and renderer.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use math_horde::scoreboard::format_time;
use math_horde::sim::{BoardPhase, Direction, Phase, Session};
use math_horde::store::{self, JsonFileStore};
use math_horde::tuning::Tuning;

const FRAME_MS: f64 = 1000.0 / 60.0;
/// The scripted player answers this often
const ANSWER_EVERY_MS: f64 = 800.0;
/// Past this survival time the script stops answering and lets the horde
/// close in, so every run reaches the scoreboard flow
const GIVE_UP_AFTER_SECONDS: f32 = 180.0;
/// Hard stop in case the script somehow never dies
const MAX_FRAMES: u64 = 60_000;

fn main() {
    env_logger::init();

    // Usage: math-horde [seed] [scores.json] [tuning.json]
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let scores_path = PathBuf::from(args.next().unwrap_or_else(|| "scores.json".into()));
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(Path::new(&path)),
        None => Tuning::default(),
    };

    log::info!("Math Horde (headless) starting, seed {seed}");

    let mut score_store = JsonFileStore::new(scores_path);
    let mut session = Session::new(seed, tuning);

    let mut now_ms = 0.0;
    let mut last_answer_ms = 0.0;
    let mut bot_dir = 0usize;

    for _ in 0..MAX_FRAMES {
        now_ms += FRAME_MS;
        session.frame(now_ms);

        for request in session.take_store_requests() {
            let response = store::service(&mut score_store, request);
            session.apply_store_response(response);
        }

        // Copy out what the script needs before mutating the session
        let (phase, timer, window_open, answer) = {
            let snap = session.snapshot();
            let dir = Direction::ALL[bot_dir % Direction::ALL.len()];
            (
                snap.phase,
                snap.timer,
                snap.solved.is_some(),
                snap.facts.get(dir).answer,
            )
        };

        match phase {
            Phase::Playing => {
                let fighting = timer < GIVE_UP_AFTER_SECONDS;
                if fighting && !window_open && now_ms - last_answer_ms >= ANSWER_EVERY_MS {
                    session.submit_answer(answer);
                    last_answer_ms = now_ms;
                    bot_dir += 1;
                }
            }
            Phase::GameOver {
                board: Some(BoardPhase::Initials),
            } => {
                for c in ['B', 'O', 'T'] {
                    session.push_initial(c);
                }
                session.confirm_initials();
            }
            Phase::GameOver {
                board: Some(BoardPhase::Display),
            } => {
                // Flush the save queued by confirm before leaving
                for request in session.take_store_requests() {
                    let response = store::service(&mut score_store, request);
                    session.apply_store_response(response);
                }
                print_table(&session);
                return;
            }
            _ => {}
        }
    }

    log::warn!("Frame cap reached before the run finished");
}

fn print_table(session: &Session) {
    let snap = session.snapshot();
    println!("\nThis run: {}", format_time(snap.timer));
    println!("=== TOP SURVIVORS ===");
    if snap.scoreboard.is_empty() {
        println!("(no scores yet)");
    }
    for (i, entry) in snap.scoreboard.entries.iter().enumerate() {
        println!("{:>2}. {}  {}", i + 1, entry.initials, format_time(entry.time));
    }
}
