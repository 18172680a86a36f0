//! Utility functions for string formatting.

pub mod format;

pub use format::{logo_host, truncate_string};
