//! Math fact generation
//!
//! Four facts are on screen at once, one per direction. Answers are kept
//! pairwise distinct on a best-effort basis so a typed number is
//! unambiguous; after the reroll cap a duplicate is accepted rather than
//! stalling the game.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Direction;
use crate::Tuning;
use crate::consts::{FACT_REROLL_ATTEMPTS, HARD_OPERAND_MIN};

/// A single math problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathFact {
    /// Display text, e.g. "6 x 7" or "42 ÷ 6"
    pub text: String,
    /// The one accepted answer
    pub answer: i32,
    /// Both operands at or above the hard threshold; worth a longer hop
    pub hard: bool,
}

/// The four on-screen facts, one per direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactSet {
    facts: [MathFact; 4],
}

impl FactSet {
    pub fn get(&self, dir: Direction) -> &MathFact {
        &self.facts[dir.index()]
    }

    /// Facts in answer-check order
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &MathFact)> {
        Direction::ALL.iter().map(|&dir| (dir, self.get(dir)))
    }
}

/// Generate one fact: division with probability `division_chance`, else
/// multiplication. Division is built backwards from divisor and quotient so
/// it always comes out whole.
pub fn generate_fact(rng: &mut impl Rng, tuning: &Tuning) -> MathFact {
    let lo = tuning.operand_min;
    let hi = tuning.operand_max;

    if rng.random_bool(tuning.division_chance) {
        let divisor = rng.random_range(lo..=hi);
        let quotient = rng.random_range(lo..=hi);
        MathFact {
            text: format!("{} ÷ {}", divisor * quotient, divisor),
            answer: quotient,
            hard: divisor >= HARD_OPERAND_MIN && quotient >= HARD_OPERAND_MIN,
        }
    } else {
        let a = rng.random_range(lo..=hi);
        let b = rng.random_range(lo..=hi);
        MathFact {
            text: format!("{} x {}", a, b),
            answer: a * b,
            hard: a >= HARD_OPERAND_MIN && b >= HARD_OPERAND_MIN,
        }
    }
}

/// Generate a full four-slot set with best-effort distinct answers
pub fn generate_set(rng: &mut impl Rng, tuning: &Tuning) -> FactSet {
    let mut used: Vec<i32> = Vec::with_capacity(4);
    let facts = std::array::from_fn(|_| {
        let mut fact = generate_fact(rng, tuning);
        let mut attempts = 0;
        while used.contains(&fact.answer) && attempts < FACT_REROLL_ATTEMPTS {
            fact = generate_fact(rng, tuning);
            attempts += 1;
        }
        // Past the cap the duplicate stands
        used.push(fact.answer);
        fact
    });

    FactSet { facts }
}
