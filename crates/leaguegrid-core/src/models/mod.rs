//! Data models for the football data API.
//!
//! - `League`: a competition record shown as one card in the grid
//! - `PopularLeaguesResponse`: the `{ status, response: { popular } }` envelope

pub mod league;

pub use league::{League, PopularLeagues, PopularLeaguesResponse};
