//! warscout - WarEra country scouting and combat scoring.
//!
//! Fetches every player of a country from the WarEra API, classifies them
//! by where their skill points went, and scores their combat builds with a
//! deterministic expected-damage model. The scoring engine is exposed here
//! for testing and external use; the binary wires it to the API, cache and
//! reporting layers.

pub mod api;
pub mod build_info;
pub mod cache;
pub mod constants;
pub mod evaluate;
pub mod optimize;
pub mod player;
pub mod report;
pub mod roles;
pub mod skills;
pub mod stats;
