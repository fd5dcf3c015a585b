/// Add-or-get: bring the APOD for a date into the image cache
///
/// 1. Fetch the metadata for the date
/// 2. Pick the picture URL (HD image, or the thumbnail for videos)
/// 3. Download the bytes and hash them
/// 4. Return the existing record if the hash is already cached
/// 5. Otherwise write the file and insert a new record
use chrono::NaiveDate;
use std::fs;

use crate::api::{ApodInfo, MetadataSource};
use crate::error::{ApodError, Result};
use crate::fetch::{save_image_file, ImageSource};
use crate::state::data::CacheOutcome;
use crate::state::hash::content_hash;
use crate::state::library::ApodCache;
use crate::state::naming::determine_file_path;

/// URL whose bytes get cached for this APOD.
///
/// Uses the same choice as the display URL so a video caches its
/// thumbnail, never the video page.
pub fn download_url(info: &ApodInfo) -> Result<&str> {
    info.display_url()
        .ok_or_else(|| ApodError::UnsupportedMedia(info.media_type.as_str().to_string()))
}

/// Make sure the APOD for `date` is cached and return its record id
pub fn add_apod_to_cache<M, I>(cache: &ApodCache, metadata: &M, images: &I, date: NaiveDate) -> Result<CacheOutcome>
where
    M: MetadataSource + ?Sized,
    I: ImageSource + ?Sized,
{
    let info = metadata.fetch_info(date)?;
    tracing::info!(%date, title = %info.title, media_type = info.media_type.as_str(), "resolved APOD");

    let url = download_url(&info)?;
    let bytes = images.download(url)?;
    let hash = content_hash(&bytes);
    tracing::debug!(%date, hash = %hash, "hashed APOD image");

    if let Some(id) = cache.lookup_by_hash(&hash)? {
        tracing::info!(id, "APOD image is already in cache");
        return Ok(CacheOutcome::AlreadyCached(id));
    }

    let image_path = determine_file_path(cache.cache_dir(), &info.title, url);
    // Same file name, different bytes: refuse rather than overwrite,
    // whether or not a record owns the file
    if cache.lookup_by_path(&image_path)?.is_some() || image_path.exists() {
        return Err(ApodError::PathConflict(image_path));
    }

    save_image_file(&bytes, &image_path)?;
    match cache.insert(&info.title, &info.explanation, &image_path, &hash) {
        Ok(id) => Ok(CacheOutcome::Added(id)),
        Err(e) => {
            if let Err(remove_err) = fs::remove_file(&image_path) {
                tracing::warn!(path = %image_path.display(), error = %remove_err, "could not remove unrecorded image");
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MediaType;

    fn info(media_type: MediaType) -> ApodInfo {
        ApodInfo {
            date: None,
            title: "Launch".to_string(),
            explanation: "Liftoff.".to_string(),
            media_type,
            url: Some("https://www.youtube.com/embed/abc".to_string()),
            hdurl: None,
            thumbnail_url: Some("https://img.youtube.com/vi/abc/0.jpg".to_string()),
            copyright: None,
        }
    }

    #[test]
    fn test_video_downloads_thumbnail() {
        assert_eq!(download_url(&info(MediaType::Video)).unwrap(), "https://img.youtube.com/vi/abc/0.jpg");
    }

    #[test]
    fn test_video_without_thumbnail_is_unsupported() {
        let mut video = info(MediaType::Video);
        video.thumbnail_url = None;
        assert!(matches!(download_url(&video), Err(ApodError::UnsupportedMedia(kind)) if kind == "video"));
    }

    #[test]
    fn test_other_media_is_unsupported() {
        let other = info(MediaType::Other("interactive".to_string()));
        assert!(matches!(download_url(&other), Err(ApodError::UnsupportedMedia(_))));
    }
}
