/// Preview generation for the viewer
///
/// Decodes a cached image and scales it down to fit the preview area.
/// Decoding is CPU-bound, so the async entry point runs it on the
/// blocking pool.
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

use crate::error::{ApodError, Result};

/// Bounding box of the viewer's preview area
pub const PREVIEW_WIDTH: u32 = 800;
pub const PREVIEW_HEIGHT: u32 = 450;

/// Decoded RGBA pixels ready to hand to the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Load `path` and fit it inside `max_width` x `max_height`, keeping the aspect ratio.
/// Images that already fit are not upscaled.
pub fn load_preview(path: &Path, max_width: u32, max_height: u32) -> Result<Preview> {
    let img = image::open(path)?;

    let img = if img.width() > max_width || img.height() > max_height {
        img.resize(max_width, max_height, FilterType::Triangle)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok(Preview {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

/// [`load_preview`] on the blocking pool, sized for the viewer
pub async fn load_preview_async(path: PathBuf) -> Result<Preview> {
    tokio::task::spawn_blocking(move || load_preview(&path, PREVIEW_WIDTH, PREVIEW_HEIGHT))
        .await
        .map_err(|e| ApodError::Config(format!("preview task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_png(dir: &Path, width: u32, height: u32) -> PathBuf {
        let path = dir.join(format!("{}x{}.png", width, height));
        RgbImage::from_pixel(width, height, Rgb([10, 20, 30])).save(&path).unwrap();
        path
    }

    #[test]
    fn test_large_image_is_scaled_to_fit() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_png(tmp.path(), 1600, 400);

        let preview = load_preview(&path, 800, 450).unwrap();
        assert_eq!((preview.width, preview.height), (800, 200));
        assert_eq!(preview.rgba.len(), 800 * 200 * 4);
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_png(tmp.path(), 64, 32);

        let preview = load_preview(&path, 800, 450).unwrap();
        assert_eq!((preview.width, preview.height), (64, 32));
        assert_eq!(&preview.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken.jpg");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(load_preview(&path, 800, 450).is_err());
    }

    #[tokio::test]
    async fn test_async_preview_missing_file() {
        let result = load_preview_async(PathBuf::from("/nonexistent/path.jpg")).await;
        assert!(result.is_err());
    }
}
