//! Per-frame world update
//!
//! Advances one variable-but-clamped timestep: timer, difficulty ratchet,
//! adaptive spawning, seek motion, collisions, and the solved-fact window.
//! Answer handling and the post-game flow live a layer up in the session.

use super::collision::{resolve_companion_collisions, resolve_player_collisions};
use super::facts;
use super::motion::{advance_companion, advance_enemies, companion_position};
use super::state::{Phase, World};
use crate::Tuning;
use crate::consts::DAMAGE_FLASH_SECONDS;

/// What a tick did, for the session layer to react to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The run ended this frame
    pub died: bool,
    /// Enemies destroyed by the companion this frame
    pub companion_kills: usize,
}

/// Advance the world by one frame. `now_ms` is the host's monotonic clock;
/// `dt` is the already-clamped step in seconds.
pub fn tick(world: &mut World, now_ms: f64, dt: f32, tuning: &Tuning) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    // Overlay timers run down in every phase, including the frame a phase
    // change happens, so nothing stays lit on the game-over screen.
    world.damage_flash = (world.damage_flash - dt).max(0.0);
    if let Some(solved) = &mut world.solved {
        solved.remaining = (solved.remaining - dt).max(0.0);
    }

    // The world is frozen outside active play
    if world.phase != Phase::Playing {
        return outcome;
    }

    world.timer += dt;
    world.difficulty.tick(world.timer, tuning);

    // Adaptive spawn clock, baselined to the first Playing frame. One
    // spawn per frame at most; the clock resets to now on each spawn.
    let last_spawn = *world.last_spawn_ms.get_or_insert(now_ms);
    if now_ms - last_spawn >= world.difficulty.spawn_interval_ms as f64 {
        world.spawn_enemy();
        world.last_spawn_ms = Some(now_ms);
    }

    advance_enemies(&mut world.enemies, world.player.pos, dt);
    advance_companion(&mut world.companion, tuning.companion_orbit_speed, dt);

    // Companion sweeps first so a grazing enemy dies before it can land a
    // hit in the same frame
    let companion_pos =
        companion_position(world.player.pos, &world.companion, tuning.companion_orbit_radius);
    outcome.companion_kills = resolve_companion_collisions(
        companion_pos,
        &mut world.enemies,
        tuning.companion_hit_distance,
    );

    let hits = resolve_player_collisions(
        &mut world.player,
        &mut world.enemies,
        tuning.enemy_hit_distance,
    );
    if hits.damaged {
        world.damage_flash = DAMAGE_FLASH_SECONDS;
        if world.player.health == 0 {
            world.phase = Phase::GameOver { board: None };
            outcome.died = true;
        }
    }

    // An expired solved window refreshes all four facts at once
    if world.phase == Phase::Playing
        && world.solved.is_some_and(|s| s.remaining <= 0.0)
    {
        world.facts = facts::generate_set(&mut world.rng, tuning);
        world.solved = None;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SOLVED_FLASH_SECONDS;
    use crate::sim::state::{Direction, Enemy, SolvedFact};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_overlay_timers_decay_in_every_phase() {
        let tuning = Tuning::default();
        let mut world = World::new(1, &tuning);
        world.phase = Phase::GameOver { board: None };
        world.damage_flash = 0.10;
        world.solved = Some(SolvedFact {
            dir: Direction::Left,
            remaining: 0.5,
        });

        tick(&mut world, 0.0, DT, &tuning);

        assert!((world.damage_flash - (0.10 - DT)).abs() < 1e-6);
        assert!(world.solved.is_some_and(|s| (s.remaining - (0.5 - DT)).abs() < 1e-6));
    }

    #[test]
    fn test_world_is_frozen_after_game_over() {
        let tuning = Tuning::default();
        let mut world = World::new(1, &tuning);
        world.enemies.push(Enemy {
            pos: world.player.pos + Vec2::new(300.0, 0.0),
            speed: 0.4,
        });
        world.phase = Phase::GameOver { board: None };

        let enemy_before = world.enemies[0].pos;
        for frame in 0..100 {
            tick(&mut world, frame as f64 * 16.0, DT, &tuning);
        }

        assert_eq!(world.timer, 0.0);
        assert_eq!(world.enemies[0].pos, enemy_before);
        assert_eq!(world.enemies.len(), 1);
    }

    #[test]
    fn test_spawn_clock_baselines_then_fires() {
        let tuning = Tuning::default();
        let mut world = World::new(2, &tuning);

        // First frame only baselines the clock
        tick(&mut world, 1000.0, DT, &tuning);
        assert!(world.enemies.is_empty());

        // Just short of the interval
        tick(&mut world, 3999.0, DT, &tuning);
        assert!(world.enemies.is_empty());

        tick(&mut world, 4000.0, DT, &tuning);
        assert_eq!(world.enemies.len(), 1);

        // Clock reset on spawn
        tick(&mut world, 4100.0, DT, &tuning);
        assert_eq!(world.enemies.len(), 1);
    }

    #[test]
    fn test_companion_kill_beats_player_damage() {
        // Tight orbit so the companion patrols inside player contact range
        let tuning = Tuning {
            companion_orbit_radius: 10.0,
            ..Default::default()
        };
        let mut world = World::new(3, &tuning);
        world.enemies.push(Enemy {
            pos: world.player.pos + Vec2::new(15.0, 0.0),
            speed: 0.0,
        });

        let outcome = tick(&mut world, 0.0, DT, &tuning);

        assert_eq!(outcome.companion_kills, 1);
        assert!(world.enemies.is_empty());
        assert_eq!(world.player.health, tuning.max_health);
        assert!(!outcome.died);
    }

    #[test]
    fn test_fatal_contact_ends_the_run() {
        let tuning = Tuning::default();
        let mut world = World::new(4, &tuning);
        world.player.health = 1;
        world.enemies.push(Enemy {
            pos: world.player.pos,
            speed: 0.4,
        });

        let outcome = tick(&mut world, 0.0, DT, &tuning);

        assert!(outcome.died);
        assert_eq!(world.player.health, 0);
        assert_eq!(world.phase, Phase::GameOver { board: None });
        assert!(world.damage_flash > 0.0);
    }

    #[test]
    fn test_expired_solved_window_refreshes_facts() {
        let tuning = Tuning::default();
        let mut world = World::new(5, &tuning);
        world.solved = Some(SolvedFact {
            dir: Direction::Up,
            remaining: 0.001,
        });
        let old_texts: Vec<String> = world
            .facts
            .iter()
            .map(|(_, f)| f.text.clone())
            .collect();

        tick(&mut world, 0.0, DT, &tuning);

        assert!(world.solved.is_none());
        let new_texts: Vec<String> = world
            .facts
            .iter()
            .map(|(_, f)| f.text.clone())
            .collect();
        assert_ne!(old_texts, new_texts);
    }

    #[test]
    fn test_live_solved_window_keeps_facts() {
        let tuning = Tuning::default();
        let mut world = World::new(5, &tuning);
        world.solved = Some(SolvedFact {
            dir: Direction::Up,
            remaining: SOLVED_FLASH_SECONDS,
        });
        let old_texts: Vec<String> = world
            .facts
            .iter()
            .map(|(_, f)| f.text.clone())
            .collect();

        tick(&mut world, 0.0, DT, &tuning);

        assert!(world.solved.is_some());
        let new_texts: Vec<String> = world
            .facts
            .iter()
            .map(|(_, f)| f.text.clone())
            .collect();
        assert_eq!(old_texts, new_texts);
    }

    #[test]
    fn test_determinism() {
        // Two worlds with the same seed walk the same trajectory
        let tuning = Tuning::default();
        let mut world1 = World::new(99999, &tuning);
        let mut world2 = World::new(99999, &tuning);

        for frame in 0..600 {
            let now = frame as f64 * (1000.0 / 60.0);
            tick(&mut world1, now, DT, &tuning);
            tick(&mut world2, now, DT, &tuning);
        }

        assert_eq!(world1.timer, world2.timer);
        assert_eq!(world1.enemies.len(), world2.enemies.len());
        for (a, b) in world1.enemies.iter().zip(&world2.enemies) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.speed, b.speed);
        }
    }
}
