/// Runtime configuration (environment variables + defaults)
///
/// Every cache and client operation receives one of these explicitly.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ApodError, Result};

/// Public NASA endpoint serving APOD metadata
pub const DEFAULT_API_URL: &str = "https://api.nasa.gov/planetary/apod";

/// NASA's rate-limited demo key, used when no key is configured
pub const DEFAULT_API_KEY: &str = "DEMO_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Location of the image cache directory and its database
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    pub cache_dir: PathBuf,
    pub db_path: PathBuf,
}

impl CacheConfig {
    /// Cache living in the `cache` subdirectory of `parent_dir`
    pub fn new(parent_dir: impl AsRef<Path>) -> Self {
        Self::in_dir(parent_dir.as_ref().join("cache"))
    }

    /// Cache living directly in `cache_dir`
    pub fn in_dir(cache_dir: impl Into<PathBuf>) -> Self {
        let cache_dir = cache_dir.into();
        let db_path = cache_dir.join("cache.db");
        CacheConfig { cache_dir, db_path }
    }

    /// `APOD_CACHE_DIR` if set, otherwise `cache/` next to the running executable.
    pub fn from_env() -> Result<Self> {
        if let Ok(dir) = std::env::var("APOD_CACHE_DIR") {
            if !dir.trim().is_empty() {
                return Ok(Self::in_dir(dir));
            }
        }

        let exe = std::env::current_exe()?;
        let exe_dir = exe
            .parent()
            .ok_or_else(|| ApodError::Config(format!("{} has no parent directory", exe.display())))?;
        Ok(Self::new(exe_dir))
    }

    /// Create the cache directory if it does not already exist
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.cache_dir.exists() {
            fs::create_dir_all(&self.cache_dir)?;
            tracing::info!(dir = %self.cache_dir.display(), "created image cache directory");
        }
        Ok(())
    }
}

/// How to reach the APOD service
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Read `APOD_API_KEY`, `APOD_API_URL` and `APOD_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let mut config = ApiConfig::default();

        if let Some(key) = non_empty_var("APOD_API_KEY") {
            config.api_key = key;
        }
        if let Some(url) = non_empty_var("APOD_API_URL") {
            config.base_url = url;
        }
        if let Some(secs) = non_empty_var("APOD_HTTP_TIMEOUT_SECS") {
            let secs = secs.parse::<u64>().map_err(|_| {
                ApodError::Config(format!("APOD_HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{}'", secs))
            })?;
            config.timeout = Duration::from_secs(secs.max(1));
        }

        Ok(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_paths_derive_from_parent() {
        let config = CacheConfig::new("/opt/apod");
        assert_eq!(config.cache_dir, PathBuf::from("/opt/apod/cache"));
        assert_eq!(config.db_path, PathBuf::from("/opt/apod/cache/cache.db"));
    }

    #[test]
    fn test_ensure_dir_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let config = CacheConfig::new(tmp.path());
        assert!(!config.cache_dir.exists());

        config.ensure_dir().unwrap();
        assert!(config.cache_dir.is_dir());

        // Second call is a no-op
        config.ensure_dir().unwrap();
    }

    #[test]
    fn test_api_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.api_key, DEFAULT_API_KEY);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
