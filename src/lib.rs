//! Astronomy Picture of the Day desktop cache.
//!
//! Fetches the APOD for a date from NASA, stores the image and its
//! metadata in a local cache deduplicated by content hash, and can set a
//! cached image as the desktop background.

pub mod api;
pub mod config;
pub mod date;
pub mod desktop;
pub mod error;
pub mod fetch;
pub mod preview;
pub mod state;
pub mod workflow;

pub use api::{ApodClient, ApodInfo, MediaType, MetadataSource};
pub use config::{ApiConfig, CacheConfig};
pub use error::{ApodError, DateError, Result};
pub use fetch::{ImageFetcher, ImageSource};
pub use state::data::{ApodRecord, CacheOutcome};
pub use state::library::ApodCache;
pub use workflow::add_apod_to_cache;

/// Install the `tracing` subscriber used by both binaries.
///
/// Honors `RUST_LOG`, defaulting to `info`. Logs go to stderr so stdout
/// stays free for user-facing output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
