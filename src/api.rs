//! Minimal blocking client for the WarEra tRPC API.
//!
//! Requests use the batched GET envelope the game's web client sends:
//! `?batch=1&input={"0": <payload>}`, answered by a one-element array of
//! `{"result": {"data": ...}}` wrappers.

use crate::constants::{API_BASE, PAGE_DELAY_MS, PAGE_SIZE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::thread;
use std::time::Duration;

pub struct ApiClient {
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TrpcEnvelope<T> {
    result: TrpcResult<T>,
}

#[derive(Debug, Deserialize)]
struct TrpcResult<T> {
    data: T,
}

/// One page of country members.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub items: Vec<UserStub>,
    #[serde(rename = "nextCursor")]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserStub {
    #[serde(rename = "_id")]
    pub id: String,
}

/// The `user.getUserLite` payload, limited to the fields the scout uses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiUser {
    pub username: Option<String>,
    #[serde(default)]
    pub leveling: Leveling,
    #[serde(default)]
    pub dates: UserDates,
    #[serde(default)]
    pub skills: HashMap<String, SkillInfo>,
    #[serde(default)]
    pub buffs: UserBuffs,
    #[serde(default)]
    pub rankings: UserRankings,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Leveling {
    #[serde(default)]
    pub level: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDates {
    #[serde(rename = "lastConnectionAt")]
    pub last_connection_at: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SkillInfo {
    #[serde(default)]
    pub level: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserBuffs {
    #[serde(rename = "buffCodes")]
    pub buff_codes: Option<serde_json::Value>,
    #[serde(rename = "buffEndAt")]
    pub buff_end_at: Option<String>,
    #[serde(rename = "debuffCodes")]
    pub debuff_codes: Option<serde_json::Value>,
    #[serde(rename = "debuffEndAt")]
    pub debuff_end_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRankings {
    #[serde(rename = "userWealth", default)]
    pub wealth: RankEntry,
    #[serde(rename = "userDamages", default)]
    pub damages: RankEntry,
    #[serde(rename = "userWeeklyDamages", default)]
    pub weekly_damages: RankEntry,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RankEntry {
    #[serde(default)]
    pub value: f64,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: serde_json::Value,
    ) -> Result<T, Box<dyn Error>> {
        let input = serde_json::to_string(&json!({ "0": payload }))?;
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut envelopes: Vec<TrpcEnvelope<T>> = ureq::get(&url)
            .query("batch", "1")
            .query("input", &input)
            .call()?
            .into_json()?;

        if envelopes.is_empty() {
            return Err("empty tRPC batch response".into());
        }
        Ok(envelopes.remove(0).result.data)
    }

    /// Collects every user id in a country, following cursor pagination.
    /// Pages are throttled to stay friendly to the API.
    pub fn fetch_all_user_ids(&self, country_id: &str) -> Result<Vec<String>, Box<dyn Error>> {
        let mut ids = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut payload = json!({ "countryId": country_id, "limit": PAGE_SIZE });
            if let Some(c) = &cursor {
                payload["cursor"] = json!(c);
            }

            let page: UserPage = self.call("user.getUsersByCountry", payload)?;
            ids.extend(page.items.into_iter().map(|stub| stub.id));

            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
            thread::sleep(Duration::from_millis(PAGE_DELAY_MS));
        }

        Ok(ids)
    }

    pub fn fetch_user(&self, user_id: &str) -> Result<ApiUser, Box<dyn Error>> {
        self.call("user.getUserLite", json!({ "userId": user_id }))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
