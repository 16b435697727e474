//! Per-player record assembly and scoring.

use crate::api::ApiUser;
use crate::constants::ACTIVE_WINDOW_HOURS;
use crate::evaluate::{evaluate_custom_distribution, BattleParams, EvalError};
use crate::roles::RoleAssignment;
use crate::skills::{CombatSkill, SKILL_COUNT};
use crate::stats::{StatSnapshot, StatSpec};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Buff/debuff state at fetch time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Condition {
    Buffed,
    Debuffed,
    None,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Buffed => write!(f, "Buffed"),
            Condition::Debuffed => write!(f, "Debuffed"),
            Condition::None => write!(f, "None"),
        }
    }
}

/// Everything the scout keeps about one player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerRecord {
    pub username: String,
    pub level: u32,
    /// Seen recently enough to count toward country totals.
    pub active: bool,
    pub skills: HashMap<String, u32>,
    pub condition: Condition,
    /// Remaining buff/debuff time as "3h 12m", "Expired" or "-".
    pub condition_remaining: String,
    pub wealth: f64,
    pub damage_rank: f64,
    pub weekly_damage: f64,
    pub roles: Option<RoleAssignment>,
    pub snapshot: Option<StatSnapshot>,
    pub calculated_damage: Option<u64>,
}

impl PlayerRecord {
    /// Converts a raw API user into a record, resolving activity and
    /// buff state against `now`.
    pub fn from_api(user: &ApiUser, user_id: &str, now: DateTime<Utc>) -> Self {
        let username = user
            .username
            .clone()
            .unwrap_or_else(|| user_id.to_string());

        let active = user
            .dates
            .last_connection_at
            .as_deref()
            .and_then(parse_timestamp)
            .map(|seen| now.signed_duration_since(seen) <= Duration::hours(ACTIVE_WINDOW_HOURS))
            .unwrap_or(false);

        let skills = user
            .skills
            .iter()
            .map(|(key, info)| (key.clone(), info.level))
            .collect();

        let (condition, end) = if user.buffs.buff_codes.is_some() {
            (Condition::Buffed, user.buffs.buff_end_at.as_deref())
        } else if user.buffs.debuff_codes.is_some() {
            (Condition::Debuffed, user.buffs.debuff_end_at.as_deref())
        } else {
            (Condition::None, None)
        };

        Self {
            username,
            level: user.leveling.level,
            active,
            skills,
            condition,
            condition_remaining: format_remaining(end, now),
            wealth: user.rankings.wealth.value,
            damage_rank: user.rankings.damages.value,
            weekly_damage: user.rankings.weekly_damages.value,
            roles: None,
            snapshot: None,
            calculated_damage: None,
        }
    }

    /// The player's combat skill levels, in the fixed scoring order.
    /// Skills the player never trained default to 0.
    pub fn combat_levels(&self) -> [u32; SKILL_COUNT] {
        let mut levels = [0u32; SKILL_COUNT];
        for (i, skill) in CombatSkill::all().into_iter().enumerate() {
            levels[i] = self.skills.get(skill.api_key()).copied().unwrap_or(0);
        }
        levels
    }
}

/// Scores one player's actual allocation and stores the rounded result.
///
/// An arity or budget failure means the fetched data is inconsistent with
/// the claimed character level; the record is left unscored and the error
/// surfaces so the caller can skip the player or abort the batch.
pub fn score_player(
    record: &mut PlayerRecord,
    spec: &StatSpec,
    params: &BattleParams,
) -> Result<(), EvalError> {
    let levels = record.combat_levels();
    let result = evaluate_custom_distribution(&levels, spec, params, record.level)?;

    record.snapshot = Some(result.snapshot);
    record.calculated_damage = Some(result.score.round() as u64);
    Ok(())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn format_remaining(end: Option<&str>, now: DateTime<Utc>) -> String {
    match end.and_then(parse_timestamp) {
        Some(end) => {
            let seconds = end.signed_duration_since(now).num_seconds();
            if seconds > 0 {
                format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
            } else {
                String::from("Expired")
            }
        }
        None => String::from("-"),
    }
}
