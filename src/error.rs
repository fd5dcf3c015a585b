/// Error types shared by the cache, the API client and both front ends.
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Rejected user input for the APOD date
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DateError {
    #[error("invalid date format '{input}': {reason}")]
    Malformed { input: String, reason: String },

    #[error("APOD date {date} cannot be in the future (today is {today})")]
    InFuture { date: NaiveDate, today: NaiveDate },

    #[error("APOD date {date} cannot be before the date of the first APOD (i.e., 1995-06-16)")]
    BeforeFirstApod { date: NaiveDate },
}

/// Everything that can go wrong while fetching, caching or applying an APOD
#[derive(Debug, Error)]
pub enum ApodError {
    #[error(transparent)]
    Date(#[from] DateError),

    #[error("APOD service returned HTTP {status} for {date}")]
    Service { date: NaiveDate, status: u16 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed APOD response: {0}")]
    Response(#[from] serde_json::Error),

    #[error("APOD media type '{0}' has no downloadable image")]
    UnsupportedMedia(String),

    #[error("image download from {url} failed with HTTP {status}")]
    Download { url: String, status: u16 },

    #[error("cache path {} already belongs to a different image", .0.display())]
    PathConflict(PathBuf),

    #[error("cache constraint violated: {0}")]
    Constraint(String),

    #[error("database error: {0}")]
    Database(rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("could not set desktop background: {0}")]
    Desktop(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<rusqlite::Error> for ApodError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                ApodError::Constraint(message.unwrap_or_else(|| code.to_string()))
            }
            other => ApodError::Database(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApodError>;
