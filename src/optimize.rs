//! Exhaustive search for the skill allocation with the best combat score.
//!
//! The search walks every allocation whose per-skill levels stay at or
//! below the character level and whose total cost fits the point budget.
//! It is exponential in the number of skills and is meant as a planning
//! utility for small character levels, never as part of the per-player
//! scoring loop. A node limit keeps runaway searches recoverable.

use crate::constants::DEFAULT_NODE_LIMIT;
use crate::evaluate::{evaluate_build, BattleParams};
use crate::skills::{alloc_cost, budget_for_level, SKILL_COUNT};
use crate::stats::{StatSnapshot, StatSpec};

/// Knobs for one optimizer run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Abort after expanding this many search nodes. `None` runs unbounded.
    pub node_limit: Option<u64>,
    /// Accept allocations that leave points unspent. The default only
    /// accepts allocations that spend the entire budget exactly.
    pub allow_partial_spend: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            node_limit: Some(DEFAULT_NODE_LIMIT),
            allow_partial_spend: false,
        }
    }
}

/// The winning allocation of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct BestBuild {
    pub levels: [u32; SKILL_COUNT],
    pub snapshot: StatSnapshot,
    pub score: f64,
}

/// Outcome of one optimizer run.
///
/// `best` is `None` when no allocation satisfied the acceptance condition,
/// or when the node limit cut the search off before any leaf was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub best: Option<BestBuild>,
    pub nodes_visited: u64,
    pub hit_node_limit: bool,
}

/// Finds the allocation maximizing the combat score for a character level.
///
/// Depth-first over skill slots in their fixed order, levels ascending
/// within each slot, implemented with an explicit frame stack rather than
/// recursion so the node limit can cut in between expansions. Ties on
/// score keep the first allocation found, so the skill-major search order
/// doubles as the tie-break.
pub fn find_best_distribution(
    character_level: u32,
    spec: &StatSpec,
    params: &BattleParams,
    options: &SearchOptions,
) -> SearchOutcome {
    let max_points = budget_for_level(character_level);

    let mut levels = [0u32; SKILL_COUNT];
    // next[d]: next level candidate to try at slot d
    let mut next = [0u32; SKILL_COUNT];
    // remaining[d]: unspent points entering slot d
    let mut remaining = [0u32; SKILL_COUNT + 1];
    remaining[0] = max_points;

    let mut depth: usize = 0;
    let mut best: Option<BestBuild> = None;
    let mut best_score = 0.0;
    let mut nodes_visited: u64 = 0;
    let mut hit_node_limit = false;

    'search: loop {
        if depth == SKILL_COUNT {
            if options.allow_partial_spend || remaining[SKILL_COUNT] == 0 {
                let snapshot = spec.resolve(&levels);
                let eval = evaluate_build(&snapshot, params);
                // Strictly greater: the first allocation found wins ties.
                if eval.score > best_score {
                    best_score = eval.score;
                    best = Some(BestBuild {
                        levels,
                        snapshot,
                        score: eval.score,
                    });
                }
            }
            depth -= 1;
            continue;
        }

        // Advance this slot to its next affordable level.
        let mut advanced = false;
        while next[depth] <= character_level {
            let lvl = next[depth];
            let cost = alloc_cost(lvl);
            if cost > remaining[depth] {
                // Costs grow with the level; nothing further fits here.
                next[depth] = character_level + 1;
                break;
            }
            next[depth] += 1;

            if let Some(limit) = options.node_limit {
                if nodes_visited >= limit {
                    hit_node_limit = true;
                    break 'search;
                }
            }
            nodes_visited += 1;

            levels[depth] = lvl;
            remaining[depth + 1] = remaining[depth] - cost;
            depth += 1;
            if depth < SKILL_COUNT {
                next[depth] = 0;
            }
            advanced = true;
            break;
        }

        if !advanced {
            if depth == 0 {
                break;
            }
            depth -= 1;
        }
    }

    SearchOutcome {
        best,
        nodes_visited,
        hit_node_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::total_cost;
    use crate::stats::{build_stats_with_equipment, EquipmentStats, StatLine};

    fn scouting_spec() -> StatSpec {
        build_stats_with_equipment(&EquipmentStats::scouting_default())
    }

    #[test]
    fn test_level_zero_only_admits_empty_allocation() {
        let outcome = find_best_distribution(
            0,
            &scouting_spec(),
            &BattleParams::default(),
            &SearchOptions::default(),
        );

        let best = outcome.best.expect("level 0 has the empty allocation");
        assert_eq!(best.levels, [0; 8]);
        assert!((best.score - 6973.34).abs() < 0.01);
        assert!(!outcome.hit_node_limit);
        // One expansion per slot, all at level 0.
        assert_eq!(outcome.nodes_visited, 8);
    }

    #[test]
    fn test_level_one_picks_the_four_strongest_skills() {
        let outcome = find_best_distribution(
            1,
            &scouting_spec(),
            &BattleParams::default(),
            &SearchOptions::default(),
        );

        // Budget 4, level-1 skills cost 1 each: exactly four skills get a
        // level. Hunger, attack, precision and armor give the largest
        // multiplicative gains under the scouting equipment.
        let best = outcome.best.expect("budget of 4 is exactly spendable");
        assert_eq!(best.levels, [1, 1, 0, 0, 1, 0, 1, 0]);
        assert!(!outcome.hit_node_limit);
    }

    #[test]
    fn test_exact_spend_uses_entire_budget() {
        let outcome = find_best_distribution(
            2,
            &scouting_spec(),
            &BattleParams::default(),
            &SearchOptions::default(),
        );

        let best = outcome.best.expect("budget of 8 is exactly spendable");
        assert_eq!(total_cost(&best.levels), 8);
    }

    #[test]
    fn test_partial_spend_never_beats_exact_spend_here() {
        // Every stat helps the score under this model, so relaxing the
        // exact-spend rule must not change the winner.
        let exact = find_best_distribution(
            1,
            &scouting_spec(),
            &BattleParams::default(),
            &SearchOptions::default(),
        );
        let relaxed = find_best_distribution(
            1,
            &scouting_spec(),
            &BattleParams::default(),
            &SearchOptions {
                allow_partial_spend: true,
                ..SearchOptions::default()
            },
        );

        assert_eq!(
            exact.best.as_ref().map(|b| b.levels),
            relaxed.best.as_ref().map(|b| b.levels)
        );
        // The relaxed search evaluates strictly more leaves.
        assert!(relaxed.nodes_visited >= exact.nodes_visited);
    }

    #[test]
    fn test_node_limit_aborts_before_any_leaf() {
        let outcome = find_best_distribution(
            3,
            &scouting_spec(),
            &BattleParams::default(),
            &SearchOptions {
                node_limit: Some(3),
                allow_partial_spend: false,
            },
        );

        assert!(outcome.hit_node_limit);
        assert!(outcome.best.is_none());
        assert_eq!(outcome.nodes_visited, 3);
    }

    #[test]
    fn test_ties_keep_the_first_allocation_found() {
        // Zero increments make every allocation score identically, so the
        // winner is purely the first exact-spend leaf in search order:
        // levels ascend in the last slots first.
        let flat = StatSpec::from_lines([
            StatLine {
                base: 190.0,
                increment: 0.0,
            },
            StatLine {
                base: 65.0,
                increment: 0.0,
            },
            StatLine {
                base: 25.0,
                increment: 0.0,
            },
            StatLine {
                base: 65.0,
                increment: 0.0,
            },
            StatLine {
                base: 30.0,
                increment: 0.0,
            },
            StatLine {
                base: 50.0,
                increment: 0.0,
            },
            StatLine {
                base: 4.0,
                increment: 0.0,
            },
            StatLine {
                base: 15.0,
                increment: 0.0,
            },
        ]);

        let outcome = find_best_distribution(
            1,
            &flat,
            &BattleParams::default(),
            &SearchOptions::default(),
        );

        let best = outcome.best.expect("flat spec still scores above zero");
        assert_eq!(best.levels, [0, 0, 0, 0, 1, 1, 1, 1]);
    }
}
