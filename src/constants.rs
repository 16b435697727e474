// Combat model constants
pub const POINTS_PER_LEVEL: u32 = 4;
pub const REGEN_PER_TICK: f64 = 0.1;
pub const BASE_DAMAGE_TAKEN: f64 = 10.0;
pub const MIN_DAMAGE_TAKEN: f64 = 0.0001;

// Default battle tuning used when scoring a whole country
pub const DEFAULT_FOOD_HEALTH: f64 = 30.0;
pub const DEFAULT_BATTLE_DURATION: u32 = 7;

// Remote API constants
pub const API_BASE: &str = "https://api2.warera.io/trpc";
pub const PAGE_SIZE: u32 = 100;
pub const PAGE_DELAY_MS: u64 = 200;
pub const USER_DELAY_MS: u64 = 100;

// Players are considered active if seen within the last day and a half
pub const ACTIVE_WINDOW_HOURS: i64 = 36;

// Country snapshot cache
pub const CACHE_TTL_SECONDS: i64 = 3600;

// Optimizer search guard
pub const DEFAULT_NODE_LIMIT: u64 = 50_000_000;

// Ranking display cutoff
pub const MIN_RANKED_LEVEL: u32 = 5;
