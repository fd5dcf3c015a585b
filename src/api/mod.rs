/// APOD API access
///
/// This module handles:
/// - Requesting metadata for a date (client.rs)
/// - The response shapes and picture URL selection (types.rs)

pub mod client;
pub mod types;

pub use client::ApodClient;
pub use types::{extract_display_url, ApodInfo, MediaType};

use chrono::NaiveDate;

use crate::error::Result;

/// Anything that can answer "what was the APOD on this date"
pub trait MetadataSource {
    fn fetch_info(&self, date: NaiveDate) -> Result<ApodInfo>;
}
