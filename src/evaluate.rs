//! Expected-damage and survivability scoring for a single build.
//!
//! Turns a resolved stat snapshot into one scalar score: expected damage per
//! attack multiplied by the number of attacks the build can sustain before
//! its effective hit points (base + regeneration + food) run out.

use crate::constants::{
    BASE_DAMAGE_TAKEN, DEFAULT_BATTLE_DURATION, DEFAULT_FOOD_HEALTH, MIN_DAMAGE_TAKEN,
    REGEN_PER_TICK,
};
use crate::skills::{budget_for_level, total_cost, SKILL_COUNT};
use crate::stats::{compute_stats, StatSnapshot, StatSpec, StatType};
use std::error::Error;
use std::fmt;

/// Validation failure on a caller-supplied allocation.
///
/// Both kinds are raised before any stat computation happens and are never
/// retried; retrying with the same input would fail identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// Allocation length does not match the number of combat stats.
    ArityMismatch { expected: usize, actual: usize },
    /// Allocation costs more points than the character level provides.
    BudgetExceeded { cost: u32, budget: u32 },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::ArityMismatch { expected, actual } => {
                write!(f, "expected {} skill levels, got {}", expected, actual)
            }
            EvalError::BudgetExceeded { cost, budget } => {
                write!(
                    f,
                    "allocation costs {} points but only {} are available",
                    cost, budget
                )
            }
        }
    }
}

impl Error for EvalError {}

/// Battle tuning held fixed across all players in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleParams {
    /// Health restored per unit of hunger capacity consumed.
    pub food_health: f64,
    /// Number of regeneration ticks the battle lasts.
    pub battle_duration: u32,
}

impl Default for BattleParams {
    fn default() -> Self {
        Self {
            food_health: DEFAULT_FOOD_HEALTH,
            battle_duration: DEFAULT_BATTLE_DURATION,
        }
    }
}

/// Raw output of [`evaluate_build`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildScore {
    pub score: f64,
    pub food_used: f64,
    pub attacks: f64,
}

/// Full evaluation of one allocation: resolved stats plus the score triple.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildResult {
    pub snapshot: StatSnapshot,
    pub score: f64,
    pub food_used: f64,
    pub attacks: f64,
}

/// Scores one stat snapshot.
///
/// Accuracy, crit chance and dodge are clamped to 100 before use. Crit
/// damage and armor are deliberately not clamped: crit damage past 100%
/// keeps scaling the multiplier, and over-stacked armor is only caught by
/// the floor on damage taken.
pub fn evaluate_build(snapshot: &StatSnapshot, params: &BattleParams) -> BuildScore {
    let accuracy = snapshot.get(StatType::Accuracy).min(100.0) / 100.0;
    let crit_rate = snapshot.get(StatType::CritChance).min(100.0) / 100.0;
    let crit_multiplier = 1.0 + snapshot.get(StatType::CritDamage) / 100.0;

    let expected_damage = snapshot.get(StatType::Damage)
        * accuracy
        * ((1.0 - crit_rate) + crit_rate * crit_multiplier);

    let dodge_chance = snapshot.get(StatType::Dodge).min(100.0) / 100.0;
    // The floor applies before the dodge factor; armor >= 100 can drive the
    // bracket negative and must not zero the divisor.
    let damage_taken = (BASE_DAMAGE_TAKEN * (1.0 - snapshot.get(StatType::Armor) / 100.0))
        .max(MIN_DAMAGE_TAKEN)
        * (1.0 - dodge_chance);

    let max_hp = snapshot.get(StatType::Hp);
    let max_hunger = snapshot.get(StatType::Hunger);
    let mut total_hp = max_hp;
    let mut total_hunger = max_hunger;

    // Linear regeneration: 10% of base per tick, accumulated additively.
    for _ in 0..params.battle_duration {
        total_hp += max_hp * REGEN_PER_TICK;
        total_hunger += max_hunger * REGEN_PER_TICK;
    }

    // Food converts accumulated hunger capacity into effective hit points.
    total_hp += total_hunger * params.food_health;

    let attacks = total_hp / damage_taken;

    BuildScore {
        score: expected_damage * attacks,
        food_used: total_hunger,
        attacks,
    }
}

/// Validates and scores one caller-supplied allocation (a real player's
/// levels) against the budget implied by their character level.
///
/// Validation order: arity first, then budget. Both fail before the stat
/// model runs; no partial score is ever produced in their place.
pub fn evaluate_custom_distribution(
    levels: &[u32],
    spec: &StatSpec,
    params: &BattleParams,
    character_level: u32,
) -> Result<BuildResult, EvalError> {
    if levels.len() != SKILL_COUNT {
        return Err(EvalError::ArityMismatch {
            expected: SKILL_COUNT,
            actual: levels.len(),
        });
    }

    let cost = total_cost(levels);
    let budget = budget_for_level(character_level);
    if cost > budget {
        return Err(EvalError::BudgetExceeded { cost, budget });
    }

    let snapshot = compute_stats(levels, spec)?;
    let BuildScore {
        score,
        food_used,
        attacks,
    } = evaluate_build(&snapshot, params);

    Ok(BuildResult {
        snapshot,
        score,
        food_used,
        attacks,
    })
}
