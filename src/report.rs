//! Text reporting: country summary, ranked player table, CSV export.

use crate::constants::MIN_RANKED_LEVEL;
use crate::player::{Condition, PlayerRecord};
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// Humanizes large values: 1_500 -> "1.5 K", 2_300_000 -> "2.3 M".
pub fn fmt_num(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{:.1} M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1} K", n / 1_000.0)
    } else {
        format!("{:.0}", n)
    }
}

/// Aggregate figures over a country's active, ranked players.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CountrySummary {
    pub citizens: usize,
    pub eco: usize,
    pub soldiers: usize,
    pub buffed: usize,
    pub debuffed: usize,
    pub total_damage: u64,
    pub total_wealth: f64,
}

/// Players that count toward rankings: active and past the level cutoff.
pub fn ranked_players(records: &[PlayerRecord]) -> Vec<&PlayerRecord> {
    let mut ranked: Vec<&PlayerRecord> = records
        .iter()
        .filter(|r| r.active && r.level >= MIN_RANKED_LEVEL)
        .collect();
    ranked.sort_by(|a, b| {
        b.calculated_damage
            .unwrap_or(0)
            .cmp(&a.calculated_damage.unwrap_or(0))
    });
    ranked
}

pub fn summarize(records: &[PlayerRecord]) -> CountrySummary {
    let mut summary = CountrySummary::default();

    for record in records.iter().filter(|r| r.active && r.level >= MIN_RANKED_LEVEL) {
        summary.citizens += 1;

        if let Some(roles) = &record.roles {
            if roles.primary.contains("Worker") || roles.primary.contains("Entrepreneur") {
                summary.eco += 1;
            } else if roles.primary.contains("Soldier") {
                summary.soldiers += 1;
            }
        }

        match record.condition {
            Condition::Buffed => summary.buffed += 1,
            Condition::Debuffed => summary.debuffed += 1,
            Condition::None => {}
        }

        summary.total_damage += record.calculated_damage.unwrap_or(0);
        summary.total_wealth += record.wealth;
    }

    summary
}

impl CountrySummary {
    pub fn to_text(&self, country: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} — country summary", country);
        let _ = writeln!(out, "  Citizens:     {}", self.citizens);
        let _ = writeln!(out, "  Eco:          {}", self.eco);
        let _ = writeln!(out, "  Soldiers:     {}", self.soldiers);
        let _ = writeln!(out, "  Buffed:       {}", self.buffed);
        let _ = writeln!(out, "  Debuffed:     {}", self.debuffed);
        let _ = writeln!(out, "  Total damage: {}", fmt_num(self.total_damage as f64));
        let _ = writeln!(out, "  Total wealth: {}", fmt_num(self.total_wealth));
        out
    }
}

/// Renders the ranked players as an aligned text table.
pub fn render_table(players: &[&PlayerRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:>4} {:>9} {:>10} {:>9} {:>10}  {:<18} {}",
        "Username", "Lvl", "Cond", "Remaining", "Wealth", "Damage", "Primary", "Secondary"
    );

    for record in players {
        let damage = record
            .calculated_damage
            .map(|d| fmt_num(d as f64))
            .unwrap_or_else(|| String::from("-"));
        let (primary, secondary) = match &record.roles {
            Some(roles) => (roles.primary.as_str(), roles.secondary.join(", ")),
            None => ("-", String::new()),
        };

        let _ = writeln!(
            out,
            "{:<20} {:>4} {:>9} {:>10} {:>9} {:>10}  {:<18} {}",
            record.username,
            record.level,
            record.condition.to_string(),
            record.condition_remaining,
            fmt_num(record.wealth),
            damage,
            primary,
            secondary
        );
    }
    out
}

/// Writes the ranked players to a CSV file.
pub fn write_csv(players: &[&PlayerRecord], path: &Path) -> io::Result<()> {
    let mut out = String::from(
        "username,level,active,condition,remaining,wealth,damage_rank,weekly_damage,calculated_damage,primary_role,secondary_roles\n",
    );

    for record in players {
        let damage = record
            .calculated_damage
            .map(|d| d.to_string())
            .unwrap_or_default();
        let (primary, secondary) = match &record.roles {
            Some(roles) => (roles.primary.clone(), roles.secondary.join(", ")),
            None => (String::new(), String::new()),
        };

        let fields = [
            record.username.clone(),
            record.level.to_string(),
            record.active.to_string(),
            record.condition.to_string(),
            record.condition_remaining.clone(),
            format!("{}", record.wealth),
            format!("{}", record.damage_rank),
            format!("{}", record.weekly_damage),
            damage,
            primary,
            secondary,
        ];
        let line: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    fs::write(path, out)
}

fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiUser;
    use crate::roles::RoleAssignment;
    use chrono::Utc;

    fn record(username: &str, level: u32, active: bool, damage: Option<u64>) -> PlayerRecord {
        let user: ApiUser = serde_json::from_str(&format!(
            r#"{{"username":"{}","leveling":{{"level":{}}}}}"#,
            username, level
        ))
        .unwrap();
        let mut rec = PlayerRecord::from_api(&user, "id", Utc::now());
        rec.active = active;
        rec.calculated_damage = damage;
        rec
    }

    #[test]
    fn test_fmt_num_boundaries() {
        assert_eq!(fmt_num(999.0), "999");
        assert_eq!(fmt_num(1_000.0), "1.0 K");
        assert_eq!(fmt_num(1_500.0), "1.5 K");
        assert_eq!(fmt_num(999_999.0), "1000.0 K");
        assert_eq!(fmt_num(1_000_000.0), "1.0 M");
        assert_eq!(fmt_num(2_340_000.0), "2.3 M");
        assert_eq!(fmt_num(0.0), "0");
    }

    #[test]
    fn test_ranked_players_sorted_by_damage_desc() {
        let records = vec![
            record("low", 10, true, Some(100)),
            record("high", 10, true, Some(9000)),
            record("mid", 10, true, Some(500)),
        ];
        let ranked = ranked_players(&records);
        let names: Vec<&str> = ranked.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_ranked_players_filters_inactive_and_low_level() {
        let records = vec![
            record("keeper", 5, true, Some(100)),
            record("sleeper", 50, false, Some(100)),
            record("newbie", 4, true, Some(100)),
        ];
        let ranked = ranked_players(&records);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].username, "keeper");
    }

    #[test]
    fn test_summarize_counts_roles_and_conditions() {
        let mut soldier = record("s", 10, true, Some(5000));
        soldier.roles = Some(RoleAssignment {
            primary: String::from("Super Soldier"),
            secondary: vec![],
        });
        soldier.condition = Condition::Buffed;
        soldier.wealth = 100.0;

        let mut worker = record("w", 10, true, Some(200));
        worker.roles = Some(RoleAssignment {
            primary: String::from("Worker"),
            secondary: vec![],
        });
        worker.condition = Condition::Debuffed;
        worker.wealth = 900.0;

        let idle = record("idle", 3, true, None);

        let summary = summarize(&[soldier, worker, idle]);
        assert_eq!(summary.citizens, 2);
        assert_eq!(summary.eco, 1);
        assert_eq!(summary.soldiers, 1);
        assert_eq!(summary.buffed, 1);
        assert_eq!(summary.debuffed, 1);
        assert_eq!(summary.total_damage, 5200);
        assert_eq!(summary.total_wealth, 1000.0);
    }

    #[test]
    fn test_csv_escapes_fields() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_write_csv_emits_header_and_rows() {
        let rec = record("alice", 12, true, Some(4321));
        let players = vec![&rec];
        let path = std::env::temp_dir().join("warscout-test-report.csv");

        write_csv(&players, &path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);

        let mut lines = contents.lines();
        assert!(lines.next().unwrap().starts_with("username,level,active"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("alice,12,true"));
        assert!(row.contains("4321"));
    }
}
