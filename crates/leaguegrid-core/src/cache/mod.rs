//! In-memory freshness cache for the league list.
//!
//! `LeagueDataCache` owns a `FetchState` and decides whether a call needs a
//! network request. Data younger than the freshness threshold (5 minutes by
//! default) is served as-is unless a refresh is forced.
//!
//! Nothing is persisted; the state lives as long as the cache.

pub mod manager;
pub mod state;

pub use manager::{failure_message, LeagueDataCache};
pub use state::{is_fresh, FetchState, LeagueView};
