//! Core library for leaguegrid.
//!
//! - `api`: HTTP client for the popular leagues endpoint
//! - `cache`: in-memory freshness cache with a forced-refresh path
//! - `config`: file and environment configuration
//! - `models`: league records and the response envelope
//! - `network`: online/offline reachability monitor
//! - `utils`: string formatting helpers

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod network;
pub mod utils;

pub use api::{ApiClient, ApiError, LeagueSource};
pub use cache::{FetchState, LeagueDataCache, LeagueView};
pub use config::{ApiSettings, Config};
pub use models::League;
pub use network::{NetworkMonitor, NetworkStatus};
