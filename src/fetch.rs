/// Image download and persistence
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;

use crate::error::{ApodError, Result};

/// Anything that can turn an image URL into its bytes
pub trait ImageSource {
    fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// Downloads raw image bytes over HTTP
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    http: Client,
}

impl ImageFetcher {
    pub fn with_http(http: Client) -> Self {
        ImageFetcher { http }
    }

    /// Ask the OS to use `path` as the desktop background
    pub fn set_desktop_background(&self, path: &Path) -> Result<()> {
        crate::desktop::set_desktop_background(path)
    }
}

impl ImageSource for ImageFetcher {
    fn download(&self, url: &str) -> Result<Vec<u8>> {
        tracing::info!(url, "downloading image");

        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApodError::Download {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes()?;
        tracing::debug!(url, size = bytes.len(), "image downloaded");
        Ok(bytes.to_vec())
    }
}

/// Write image bytes to `path`, creating missing parent directories
pub fn save_image_file(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), size = bytes.len(), "saved image file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_creates_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("cache").join("galaxy.jpg");

        save_image_file(b"\xFF\xD8\xFF\xD9", &path).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"\xFF\xD8\xFF\xD9");
    }
}
