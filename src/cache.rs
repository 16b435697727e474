//! On-disk cache of fetched country snapshots.
//!
//! A full country fetch is hundreds of throttled API calls, so results are
//! kept as one JSON file per country in the platform cache directory and
//! reused until they go stale.

use crate::player::PlayerRecord;
use chrono::Utc;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// One cached country fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountrySnapshot {
    /// Unix timestamp of the fetch.
    pub fetched_at: i64,
    pub records: Vec<PlayerRecord>,
}

pub struct SnapshotCache {
    cache_dir: PathBuf,
}

impl SnapshotCache {
    /// Opens the cache in the platform cache directory.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "warscout").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine cache directory")
        })?;
        Self::at(project_dirs.cache_dir().to_path_buf())
    }

    /// Opens the cache in an explicit directory, creating it if needed.
    pub fn at(cache_dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    fn path_for(&self, country_id: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", country_id))
    }

    /// Stores a fresh snapshot for a country, stamped with the current time.
    pub fn store(&self, country_id: &str, records: &[PlayerRecord]) -> io::Result<()> {
        let snapshot = CountrySnapshot {
            fetched_at: Utc::now().timestamp(),
            records: records.to_vec(),
        };
        let data = serde_json::to_string(&snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.path_for(country_id), data)
    }

    /// Loads a country snapshot if one exists and is younger than
    /// `max_age_seconds`. A stale or missing snapshot reads as `None`.
    pub fn load(
        &self,
        country_id: &str,
        max_age_seconds: i64,
    ) -> io::Result<Option<CountrySnapshot>> {
        let path = self.path_for(country_id);
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path)?;
        let snapshot: CountrySnapshot = serde_json::from_str(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let age = Utc::now().timestamp() - snapshot.fetched_at;
        if age > max_age_seconds {
            return Ok(None);
        }
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiUser;

    fn test_cache(name: &str) -> SnapshotCache {
        let dir = std::env::temp_dir().join(format!("warscout-test-{}", name));
        let _ = fs::remove_dir_all(&dir);
        SnapshotCache::at(dir).unwrap()
    }

    fn sample_records() -> Vec<PlayerRecord> {
        let user: ApiUser =
            serde_json::from_str(r#"{"username":"alice","leveling":{"level":7}}"#).unwrap();
        vec![PlayerRecord::from_api(&user, "id-1", Utc::now())]
    }

    #[test]
    fn test_store_then_load_round_trip() {
        let cache = test_cache("round-trip");
        let records = sample_records();

        cache.store("country-a", &records).unwrap();
        let snapshot = cache.load("country-a", 3600).unwrap().unwrap();

        assert_eq!(snapshot.records, records);
        assert_eq!(snapshot.records[0].username, "alice");
    }

    #[test]
    fn test_missing_country_loads_none() {
        let cache = test_cache("missing");
        assert!(cache.load("nowhere", 3600).unwrap().is_none());
    }

    #[test]
    fn test_stale_snapshot_is_rejected() {
        let cache = test_cache("stale");
        cache.store("country-b", &sample_records()).unwrap();

        // A zero TTL makes any stored snapshot stale on the next tick;
        // a negative age bound guarantees rejection without sleeping.
        assert!(cache.load("country-b", -1).unwrap().is_none());
    }

    #[test]
    fn test_countries_do_not_collide() {
        let cache = test_cache("collide");
        cache.store("country-c", &sample_records()).unwrap();

        assert!(cache.load("country-c", 3600).unwrap().is_some());
        assert!(cache.load("country-d", 3600).unwrap().is_none());
    }
}
