/// Shapes returned by the APOD API
use serde::Deserialize;

/// Kind of media published for a day
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
    /// Anything the service may add later (e.g. "other")
    Other(String),
}

impl MediaType {
    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Other(kind) => kind,
        }
    }
}

impl<'de> Deserialize<'de> for MediaType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "image" => MediaType::Image,
            "video" => MediaType::Video,
            _ => MediaType::Other(raw),
        })
    }
}

/// Metadata for one APOD, as returned by the service.
/// Fields not listed here are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApodInfo {
    #[serde(default)]
    pub date: Option<String>,
    pub title: String,
    pub explanation: String,
    pub media_type: MediaType,
    #[serde(default)]
    pub url: Option<String>,
    /// Only present for images
    #[serde(default)]
    pub hdurl: Option<String>,
    /// Only present for videos, and only when requested with `thumbs=true`
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
}

impl ApodInfo {
    /// URL of the picture to show for this APOD.
    ///
    /// Images use the HD URL (the regular URL when the service omits it),
    /// videos use their thumbnail. Any other media has no picture.
    pub fn display_url(&self) -> Option<&str> {
        match self.media_type {
            MediaType::Image => self.hdurl.as_deref().or(self.url.as_deref()),
            MediaType::Video => self.thumbnail_url.as_deref(),
            MediaType::Other(_) => None,
        }
    }
}

/// Free-function form of [`ApodInfo::display_url`]
pub fn extract_display_url(info: &ApodInfo) -> Option<&str> {
    info.display_url()
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_JSON: &str = r#"{
        "copyright": "Jane Doe",
        "date": "2022-05-04",
        "explanation": "A galaxy floats in a bubble.",
        "hdurl": "https://apod.nasa.gov/apod/image/2205/NGC3521LRGBHaAPOD-20.jpg",
        "media_type": "image",
        "service_version": "v1",
        "title": "NGC 3521: Galaxy in a Bubble",
        "url": "https://apod.nasa.gov/apod/image/2205/NGC3521LRGBHaAPOD-20_1024.jpg"
    }"#;

    const VIDEO_JSON: &str = r#"{
        "date": "2021-09-12",
        "explanation": "A rocket launch.",
        "media_type": "video",
        "service_version": "v1",
        "thumbnail_url": "https://img.youtube.com/vi/abc123/0.jpg",
        "title": "Launch",
        "url": "https://www.youtube.com/embed/abc123?rel=0"
    }"#;

    #[test]
    fn test_parse_image_response() {
        let info: ApodInfo = serde_json::from_str(IMAGE_JSON).unwrap();
        assert_eq!(info.media_type, MediaType::Image);
        assert_eq!(info.title, "NGC 3521: Galaxy in a Bubble");
        assert_eq!(info.copyright.as_deref(), Some("Jane Doe"));
        assert_eq!(info.thumbnail_url, None);
    }

    #[test]
    fn test_image_display_url_is_hd() {
        let info: ApodInfo = serde_json::from_str(IMAGE_JSON).unwrap();
        assert_eq!(
            extract_display_url(&info),
            Some("https://apod.nasa.gov/apod/image/2205/NGC3521LRGBHaAPOD-20.jpg")
        );
    }

    #[test]
    fn test_image_without_hdurl_falls_back_to_url() {
        let mut info: ApodInfo = serde_json::from_str(IMAGE_JSON).unwrap();
        info.hdurl = None;
        assert_eq!(info.display_url(), info.url.as_deref());
    }

    #[test]
    fn test_video_display_url_is_thumbnail() {
        let info: ApodInfo = serde_json::from_str(VIDEO_JSON).unwrap();
        assert_eq!(info.media_type, MediaType::Video);
        assert_eq!(info.display_url(), Some("https://img.youtube.com/vi/abc123/0.jpg"));
    }

    #[test]
    fn test_unknown_media_has_no_display_url() {
        let json = VIDEO_JSON.replace("\"video\"", "\"other\"");
        let info: ApodInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info.media_type, MediaType::Other("other".to_string()));
        assert_eq!(info.media_type.as_str(), "other");
        assert_eq!(info.display_url(), None);
    }
}
