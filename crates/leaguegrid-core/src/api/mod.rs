//! HTTP client module for the football data API.
//!
//! This module provides the `ApiClient` for fetching the popular leagues
//! list, and the `LeagueSource` trait that the cache depends on.
//!
//! The API authenticates with two static RapidAPI headers.

pub mod client;
pub mod error;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::League;

pub use client::ApiClient;
pub use error::ApiError;

/// Anything that can produce the popular leagues list.
#[async_trait]
pub trait LeagueSource: Send + Sync {
    async fn fetch_leagues(&self) -> Result<Vec<League>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
