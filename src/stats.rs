use crate::evaluate::EvalError;
use crate::skills::SKILL_COUNT;
use serde::{Deserialize, Serialize};

/// The eight resolved combat stats, in the same order as the combat skills
/// that raise them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatType {
    Damage,
    Accuracy,
    CritChance,
    CritDamage,
    Armor,
    Hp,
    Hunger,
    Dodge,
}

impl StatType {
    pub fn all() -> [StatType; SKILL_COUNT] {
        [
            StatType::Damage,
            StatType::Accuracy,
            StatType::CritChance,
            StatType::CritDamage,
            StatType::Armor,
            StatType::Hp,
            StatType::Hunger,
            StatType::Dodge,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatType::Damage => "damage",
            StatType::Accuracy => "accuracy",
            StatType::CritChance => "crit_chance",
            StatType::CritDamage => "crit_damage",
            StatType::Armor => "armor",
            StatType::Hp => "hp",
            StatType::Hunger => "hunger",
            StatType::Dodge => "dodge",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            StatType::Damage => 0,
            StatType::Accuracy => 1,
            StatType::CritChance => 2,
            StatType::CritDamage => 3,
            StatType::Armor => 4,
            StatType::Hp => 5,
            StatType::Hunger => 6,
            StatType::Dodge => 7,
        }
    }
}

/// Base value and per-level increment for one stat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StatLine {
    pub base: f64,
    pub increment: f64,
}

/// Base + increment table for all eight stats, built once per equipment
/// configuration and shared across evaluations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatSpec {
    lines: [StatLine; SKILL_COUNT],
}

impl StatSpec {
    #[cfg(test)]
    pub fn from_lines(lines: [StatLine; SKILL_COUNT]) -> Self {
        Self { lines }
    }

    pub fn get(&self, stat: StatType) -> StatLine {
        self.lines[stat.index()]
    }

    /// Resolves a full allocation against this spec. Arity is enforced by
    /// the type; use [`compute_stats`] for caller-supplied slices.
    pub fn resolve(&self, levels: &[u32; SKILL_COUNT]) -> StatSnapshot {
        let mut values = [0.0; SKILL_COUNT];
        for (i, line) in self.lines.iter().enumerate() {
            values[i] = line.base + line.increment * levels[i] as f64;
        }
        StatSnapshot { values }
    }
}

/// Scalar stat contributions of one equipment loadout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EquipmentStats {
    pub weapon_damage: f64,
    pub weapon_crit: f64,
    pub gloves_accuracy: f64,
    pub helmet_crit_damage: f64,
    pub chest_armor: f64,
    pub pants_armor: f64,
    pub boots_dodge: f64,
}

impl EquipmentStats {
    /// The loadout assumed when scoring a whole country, where individual
    /// equipment is unknown.
    pub fn scouting_default() -> Self {
        Self {
            weapon_damage: 90.0,
            weapon_crit: 15.0,
            gloves_accuracy: 15.0,
            helmet_crit_damage: 15.0,
            chest_armor: 15.0,
            pants_armor: 15.0,
            boots_dodge: 15.0,
        }
    }
}

impl Default for EquipmentStats {
    fn default() -> Self {
        Self::scouting_default()
    }
}

/// Builds the stat table for one equipment loadout.
///
/// Base constants and increments are fixed properties of the combat model;
/// only the equipment scalars vary.
pub fn build_stats_with_equipment(equipment: &EquipmentStats) -> StatSpec {
    StatSpec {
        lines: [
            // damage = 100 + weapon, +20 per attack level
            StatLine {
                base: 100.0 + equipment.weapon_damage,
                increment: 20.0,
            },
            // accuracy = 50 + gloves, +5 per precision level
            StatLine {
                base: 50.0 + equipment.gloves_accuracy,
                increment: 5.0,
            },
            // crit chance = 10 + weapon crit, +5 per level
            StatLine {
                base: 10.0 + equipment.weapon_crit,
                increment: 5.0,
            },
            // crit damage = 50 + helmet, +10 per level
            StatLine {
                base: 50.0 + equipment.helmet_crit_damage,
                increment: 10.0,
            },
            // armor = chest + pants, +4 per level
            StatLine {
                base: equipment.chest_armor + equipment.pants_armor,
                increment: 4.0,
            },
            StatLine {
                base: 50.0,
                increment: 10.0,
            },
            StatLine {
                base: 4.0,
                increment: 1.0,
            },
            StatLine {
                base: equipment.boots_dodge,
                increment: 4.0,
            },
        ],
    }
}

/// Resolved stat values after applying an allocation to a spec.
/// Read-only once produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StatSnapshot {
    values: [f64; SKILL_COUNT],
}

impl StatSnapshot {
    pub fn get(&self, stat: StatType) -> f64 {
        self.values[stat.index()]
    }

    #[cfg(test)]
    pub fn from_values(values: [f64; SKILL_COUNT]) -> Self {
        Self { values }
    }
}

/// Resolves stats for a caller-supplied allocation.
///
/// The allocation must carry exactly one level per stat; anything else is a
/// caller bug reported as an arity mismatch. No clamping happens here:
/// values past 100 stay as-is and are clamped (or not) by the evaluator.
pub fn compute_stats(levels: &[u32], spec: &StatSpec) -> Result<StatSnapshot, EvalError> {
    let levels: &[u32; SKILL_COUNT] = levels.try_into().map_err(|_| EvalError::ArityMismatch {
        expected: SKILL_COUNT,
        actual: levels.len(),
    })?;
    Ok(spec.resolve(levels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_from_scouting_equipment() {
        let spec = build_stats_with_equipment(&EquipmentStats::scouting_default());

        assert_eq!(spec.get(StatType::Damage).base, 190.0);
        assert_eq!(spec.get(StatType::Damage).increment, 20.0);
        assert_eq!(spec.get(StatType::Accuracy).base, 65.0);
        assert_eq!(spec.get(StatType::Accuracy).increment, 5.0);
        assert_eq!(spec.get(StatType::CritChance).base, 25.0);
        assert_eq!(spec.get(StatType::CritChance).increment, 5.0);
        assert_eq!(spec.get(StatType::CritDamage).base, 65.0);
        assert_eq!(spec.get(StatType::CritDamage).increment, 10.0);
        assert_eq!(spec.get(StatType::Armor).base, 30.0);
        assert_eq!(spec.get(StatType::Armor).increment, 4.0);
        assert_eq!(spec.get(StatType::Hp).base, 50.0);
        assert_eq!(spec.get(StatType::Hp).increment, 10.0);
        assert_eq!(spec.get(StatType::Hunger).base, 4.0);
        assert_eq!(spec.get(StatType::Hunger).increment, 1.0);
        assert_eq!(spec.get(StatType::Dodge).base, 15.0);
        assert_eq!(spec.get(StatType::Dodge).increment, 4.0);
    }

    #[test]
    fn test_compute_stats_zero_allocation_gives_bases() {
        let spec = build_stats_with_equipment(&EquipmentStats::scouting_default());
        let snapshot = compute_stats(&[0; 8], &spec).unwrap();

        for stat in StatType::all() {
            assert_eq!(snapshot.get(stat), spec.get(stat).base);
        }
    }

    #[test]
    fn test_compute_stats_linear_per_skill() {
        let spec = build_stats_with_equipment(&EquipmentStats::scouting_default());

        // Raising one skill by one level moves exactly its stat by exactly
        // its increment.
        for (i, stat) in StatType::all().into_iter().enumerate() {
            let mut levels = [2u32; 8];
            let before = compute_stats(&levels, &spec).unwrap();
            levels[i] += 1;
            let after = compute_stats(&levels, &spec).unwrap();

            assert_eq!(after.get(stat) - before.get(stat), spec.get(stat).increment);
            for other in StatType::all() {
                if other != stat {
                    assert_eq!(after.get(other), before.get(other));
                }
            }
        }
    }

    #[test]
    fn test_compute_stats_rejects_wrong_arity() {
        let spec = build_stats_with_equipment(&EquipmentStats::scouting_default());

        let err = compute_stats(&[0; 7], &spec).unwrap_err();
        assert_eq!(
            err,
            EvalError::ArityMismatch {
                expected: 8,
                actual: 7
            }
        );

        assert!(compute_stats(&[0; 9], &spec).is_err());
    }

    #[test]
    fn test_compute_stats_does_not_clamp() {
        // Over-100 values must pass through untouched; clamping is the
        // evaluator's decision, not the stat model's.
        let spec = build_stats_with_equipment(&EquipmentStats::scouting_default());
        let snapshot = compute_stats(&[0, 20, 20, 0, 30, 0, 0, 30], &spec).unwrap();

        assert_eq!(snapshot.get(StatType::Accuracy), 165.0);
        assert_eq!(snapshot.get(StatType::CritChance), 125.0);
        assert_eq!(snapshot.get(StatType::Armor), 150.0);
        assert_eq!(snapshot.get(StatType::Dodge), 135.0);
    }
}
