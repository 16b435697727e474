//! warscout CLI.
//!
//! Usage:
//!   warscout scan <country> [--refresh] [--csv FILE] [--food-health N] [--battle-duration N]
//!   warscout optimize --level N [--node-limit N] [--allow-partial]
//!   warscout evaluate --level N --levels a,b,c,d,e,f,g,h
//!
//! `<country>` is either a known country name (see COUNTRIES) or a raw id.

use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use warscout::api::ApiClient;
use warscout::build_info::{BUILD_COMMIT, BUILD_DATE};
use warscout::cache::SnapshotCache;
use warscout::constants::{CACHE_TTL_SECONDS, USER_DELAY_MS};
use warscout::evaluate::{evaluate_custom_distribution, BattleParams};
use warscout::optimize::{find_best_distribution, SearchOptions};
use warscout::player::{score_player, PlayerRecord};
use warscout::report::{ranked_players, render_table, summarize, write_csv};
use warscout::roles::{assign_roles, RoleThresholds};
use warscout::skills::CombatSkill;
use warscout::stats::{build_stats_with_equipment, EquipmentStats, StatType};

/// Known country ids, scouted so far.
const COUNTRIES: &[(&str, &str)] = &[
    ("Uruguay", "6813b6d546e731854c7ac835"),
    ("Argentina", "6813b6d546e731854c7ac832"),
    ("Chile", "6813b6d546e731854c7ac83c"),
    ("Poland", "6813b6d446e731854c7ac7ae"),
    ("Venezuela", "6813b6d546e731854c7ac858"),
    ("Spain", "6813b6d446e731854c7ac7a8"),
    ("Romania", "6813b6d446e731854c7ac7b6"),
    ("Sweden", "6813b6d446e731854c7ac7f2"),
    ("France", "6813b6d446e731854c7ac79a"),
    ("Lithuania", "6813b6d446e731854c7ac7b8"),
    ("Saudi Arabia", "6813b6d546e731854c7ac8cb"),
    ("Iraq", "683ddd2c24b5a2e114af15c3"),
    ("Portugal", "6813b6d446e731854c7ac7aa"),
];

fn main() {
    println!("warscout {} ({})", BUILD_COMMIT, BUILD_DATE);

    let args: Vec<String> = env::args().collect();
    let result = match args.get(1).map(String::as_str) {
        Some("scan") => cmd_scan(&args[2..]),
        Some("optimize") => cmd_optimize(&args[2..]),
        Some("evaluate") => cmd_evaluate(&args[2..]),
        _ => {
            print_usage();
            process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  warscout scan <country> [--refresh] [--csv FILE] [--food-health N] [--battle-duration N]");
    println!("  warscout optimize --level N [--node-limit N] [--allow-partial]");
    println!("  warscout evaluate --level N --levels a,b,c,d,e,f,g,h");
    println!();
    println!("Known countries:");
    for (name, _) in COUNTRIES {
        println!("  {}", name);
    }
}

fn resolve_country(raw: &str) -> (String, String) {
    for (name, id) in COUNTRIES {
        if name.eq_ignore_ascii_case(raw) {
            return (name.to_string(), id.to_string());
        }
    }
    // Not a known name; treat it as a raw country id.
    (raw.to_string(), raw.to_string())
}

fn parse_battle_params(args: &[String]) -> BattleParams {
    let mut params = BattleParams::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--food-health" => {
                if let Some(value) = args.get(i + 1).and_then(|v| v.parse().ok()) {
                    params.food_health = value;
                    i += 1;
                }
            }
            "--battle-duration" => {
                if let Some(value) = args.get(i + 1).and_then(|v| v.parse().ok()) {
                    params.battle_duration = value;
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    params
}

fn cmd_scan(args: &[String]) -> Result<(), Box<dyn Error>> {
    let country_arg = args
        .first()
        .filter(|a| !a.starts_with("--"))
        .ok_or("scan needs a country name or id")?;
    let (country_name, country_id) = resolve_country(country_arg);

    let refresh = args.iter().any(|a| a == "--refresh");
    let csv_path = args
        .iter()
        .position(|a| a == "--csv")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);
    let params = parse_battle_params(args);

    let spec = build_stats_with_equipment(&EquipmentStats::scouting_default());
    let cache = SnapshotCache::new()?;

    let cached = if refresh {
        None
    } else {
        cache.load(&country_id, CACHE_TTL_SECONDS)?
    };

    let mut records = match cached {
        Some(snapshot) => {
            println!(
                "Using cached snapshot of {} ({} players)",
                country_name,
                snapshot.records.len()
            );
            snapshot.records
        }
        None => {
            let records = fetch_country(&country_id)?;
            cache.store(&country_id, &records)?;
            records
        }
    };

    let thresholds = RoleThresholds::default();
    let mut skipped = 0;
    for record in &mut records {
        record.roles = Some(assign_roles(&record.skills, &thresholds));
        if let Err(e) = score_player(record, &spec, &params) {
            eprintln!("Skipping score for {}: {}", record.username, e);
            skipped += 1;
        }
    }
    if skipped > 0 {
        eprintln!("{} player(s) had inconsistent skill data", skipped);
    }

    println!();
    print!("{}", summarize(&records).to_text(&country_name));
    println!();

    let ranked = ranked_players(&records);
    print!("{}", render_table(&ranked));

    if let Some(path) = csv_path {
        write_csv(&ranked, &path)?;
        println!();
        println!("Exported {} players to {}", ranked.len(), path.display());
    }

    Ok(())
}

fn fetch_country(country_id: &str) -> Result<Vec<PlayerRecord>, Box<dyn Error>> {
    let client = ApiClient::new();

    println!("Collecting country members...");
    let user_ids = client.fetch_all_user_ids(country_id)?;
    println!("Found {} players", user_ids.len());

    let now = Utc::now();
    let mut records = Vec::with_capacity(user_ids.len());
    for (i, user_id) in user_ids.iter().enumerate() {
        let user = client.fetch_user(user_id)?;
        let record = PlayerRecord::from_api(&user, user_id, now);
        println!(
            "[{}/{}] {} | lvl={} | {}",
            i + 1,
            user_ids.len(),
            record.username,
            record.level,
            if record.active { "active" } else { "inactive" }
        );
        records.push(record);
        thread::sleep(Duration::from_millis(USER_DELAY_MS));
    }

    Ok(records)
}

fn cmd_optimize(args: &[String]) -> Result<(), Box<dyn Error>> {
    let level: u32 = args
        .iter()
        .position(|a| a == "--level")
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
        .ok_or("optimize needs --level N")?;

    let mut options = SearchOptions::default();
    if let Some(limit) = args
        .iter()
        .position(|a| a == "--node-limit")
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
    {
        options.node_limit = Some(limit);
    }
    options.allow_partial_spend = args.iter().any(|a| a == "--allow-partial");
    let params = parse_battle_params(args);

    let spec = build_stats_with_equipment(&EquipmentStats::scouting_default());

    println!("Searching best distribution for level {}...", level);
    let outcome = find_best_distribution(level, &spec, &params, &options);
    println!("Explored {} nodes", outcome.nodes_visited);
    if outcome.hit_node_limit {
        println!("Search hit the node limit; no optimum within budget.");
    }

    match outcome.best {
        Some(best) => {
            println!();
            println!("Best allocation (score {:.0}):", best.score);
            for (i, skill) in CombatSkill::all().into_iter().enumerate() {
                println!("  {:<16} {}", skill.api_key(), best.levels[i]);
            }
            println!();
            println!("Resolved stats:");
            for stat in StatType::all() {
                println!("  {:<12} {:.1}", stat.name(), best.snapshot.get(stat));
            }
        }
        None => {
            println!("No allocation spends the budget exactly; try --allow-partial.");
        }
    }

    Ok(())
}

fn cmd_evaluate(args: &[String]) -> Result<(), Box<dyn Error>> {
    let level: u32 = args
        .iter()
        .position(|a| a == "--level")
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
        .ok_or("evaluate needs --level N")?;

    let levels_arg = args
        .iter()
        .position(|a| a == "--levels")
        .and_then(|i| args.get(i + 1))
        .ok_or("evaluate needs --levels a,b,c,d,e,f,g,h")?;
    let levels: Vec<u32> = levels_arg
        .split(',')
        .map(|part| part.trim().parse())
        .collect::<Result<_, _>>()
        .map_err(|_| "levels must be comma-separated integers")?;

    let params = parse_battle_params(args);
    let spec = build_stats_with_equipment(&EquipmentStats::scouting_default());

    let result = evaluate_custom_distribution(&levels, &spec, &params, level)?;

    println!();
    println!("Resolved stats:");
    for stat in StatType::all() {
        println!("  {:<12} {:.1}", stat.name(), result.snapshot.get(stat));
    }
    println!();
    println!("Score:              {:.0}", result.score);
    println!("Sustainable attacks: {:.1}", result.attacks);
    println!("Food used:           {:.1}", result.food_used);

    Ok(())
}
