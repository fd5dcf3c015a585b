/// Shared data structures for the image cache
///
/// These structs represent the data model that flows between
/// the database layer and the front ends.
use std::path::PathBuf;

/// One cached APOD image
#[derive(Debug, Clone, PartialEq)]
pub struct ApodRecord {
    /// Unique database ID
    pub id: i64,
    /// APOD title as published
    pub title: String,
    /// APOD explanation text
    pub explanation: String,
    /// Full path to the cached image file
    pub image_path: PathBuf,
    /// Hex SHA-256 of the image bytes
    pub content_hash: String,
}

/// Result of adding an APOD to the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// New image, written to disk and recorded
    Added(i64),
    /// Identical bytes were already cached under this id
    AlreadyCached(i64),
}

impl CacheOutcome {
    pub fn id(self) -> i64 {
        match self {
            CacheOutcome::Added(id) | CacheOutcome::AlreadyCached(id) => id,
        }
    }

    pub fn is_new(self) -> bool {
        matches!(self, CacheOutcome::Added(_))
    }
}
