use crate::constants::POINTS_PER_LEVEL;
use serde::{Deserialize, Serialize};

/// Number of combat skills (and of resolved combat stats).
pub const SKILL_COUNT: usize = 8;

/// The eight combat skills, in the fixed order the scoring engine expects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CombatSkill {
    Attack,
    Precision,
    CriticalChance,
    CriticalDamages,
    Armor,
    Health,
    Hunger,
    Dodge,
}

impl CombatSkill {
    pub fn all() -> [CombatSkill; SKILL_COUNT] {
        [
            CombatSkill::Attack,
            CombatSkill::Precision,
            CombatSkill::CriticalChance,
            CombatSkill::CriticalDamages,
            CombatSkill::Armor,
            CombatSkill::Health,
            CombatSkill::Hunger,
            CombatSkill::Dodge,
        ]
    }

    /// Field name used by the remote API for this skill.
    pub fn api_key(&self) -> &'static str {
        match self {
            CombatSkill::Attack => "attack",
            CombatSkill::Precision => "precision",
            CombatSkill::CriticalChance => "criticalChance",
            CombatSkill::CriticalDamages => "criticalDamages",
            CombatSkill::Armor => "armor",
            CombatSkill::Health => "health",
            CombatSkill::Hunger => "hunger",
            CombatSkill::Dodge => "dodge",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            CombatSkill::Attack => 0,
            CombatSkill::Precision => 1,
            CombatSkill::CriticalChance => 2,
            CombatSkill::CriticalDamages => 3,
            CombatSkill::Armor => 4,
            CombatSkill::Health => 5,
            CombatSkill::Hunger => 6,
            CombatSkill::Dodge => 7,
        }
    }
}

/// Cumulative point cost of taking one skill from 0 to `level`.
///
/// Raising from level k-1 to k costs k points, so the total is the
/// triangular number level * (level + 1) / 2.
pub fn alloc_cost(level: u32) -> u32 {
    level * (level + 1) / 2
}

/// Total points spent across an allocation of skill levels.
pub fn total_cost(levels: &[u32]) -> u32 {
    levels.iter().map(|&lvl| alloc_cost(lvl)).sum()
}

/// Points a character of the given level has available to spend.
pub fn budget_for_level(character_level: u32) -> u32 {
    POINTS_PER_LEVEL * character_level
}
