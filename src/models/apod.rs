use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Media type reported by the APOD API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    Image,
    Video,
    /// Anything else (the API has returned `other` for interactive pages)
    Other(String),
}

impl MediaType {
    /// Whether the pipeline knows where to find a picture for this type.
    pub fn is_supported(&self) -> bool {
        matches!(self, MediaType::Image | MediaType::Video)
    }
}

impl From<String> for MediaType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "image" => MediaType::Image,
            "video" => MediaType::Video,
            _ => MediaType::Other(value),
        }
    }
}

impl From<MediaType> for String {
    fn from(value: MediaType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Image => f.write_str("image"),
            MediaType::Video => f.write_str("video"),
            MediaType::Other(other) => f.write_str(other),
        }
    }
}

/// One day as returned by the APOD API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApodRecord {
    pub date: NaiveDate,

    #[serde(default)]
    pub title: String,

    /// Image URL, or the embed URL for videos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,

    /// Present for videos when the request asked for thumbnails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    pub media_type: MediaType,

    #[serde(default)]
    pub explanation: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl ApodRecord {
    /// Pick the URL colors are extracted from.
    ///
    /// Videos use their thumbnail, images use `hdurl` when preferred and
    /// present, and everything else falls back to `url`.
    pub fn image_url(&self, prefer_hd: bool) -> Option<&str> {
        if self.media_type == MediaType::Video {
            if let Some(ref thumbnail) = self.thumbnail_url {
                return Some(thumbnail);
            }
        } else if prefer_hd {
            if let Some(ref hd) = self.hdurl {
                return Some(hd);
            }
        }
        self.url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(media_type: MediaType) -> ApodRecord {
        ApodRecord {
            date: NaiveDate::from_ymd_opt(2023, 9, 15).unwrap(),
            title: "Title".to_string(),
            url: Some("https://apod.example/image.jpg".to_string()),
            hdurl: Some("https://apod.example/image_hd.jpg".to_string()),
            thumbnail_url: None,
            media_type,
            explanation: String::new(),
            copyright: None,
        }
    }

    #[test]
    fn test_deserialize_api_item() {
        let json = r#"{
            "copyright": "Someone",
            "date": "2023-09-15",
            "explanation": "A nebula.",
            "hdurl": "https://apod.nasa.gov/apod/image/2309/nebula.jpg",
            "media_type": "image",
            "service_version": "v1",
            "title": "Nebula",
            "url": "https://apod.nasa.gov/apod/image/2309/nebula1024.jpg"
        }"#;

        let record: ApodRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2023, 9, 15).unwrap());
        assert_eq!(record.media_type, MediaType::Image);
        assert_eq!(record.thumbnail_url, None);
        assert_eq!(record.copyright.as_deref(), Some("Someone"));
    }

    #[test]
    fn test_media_type_other() {
        let json = r#"{"date": "2010-07-25", "media_type": "other", "title": "x"}"#;
        let record: ApodRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.media_type, MediaType::Other("other".to_string()));
        assert!(!record.media_type.is_supported());
        assert_eq!(record.url, None);
    }

    #[test]
    fn test_media_type_serializes_as_string() {
        assert_eq!(serde_json::to_string(&MediaType::Video).unwrap(), "\"video\"");
        assert_eq!(
            serde_json::to_string(&MediaType::Other("flash".to_string())).unwrap(),
            "\"flash\""
        );
    }

    #[test]
    fn test_image_url_default() {
        assert_eq!(
            record(MediaType::Image).image_url(false),
            Some("https://apod.example/image.jpg")
        );
    }

    #[test]
    fn test_image_url_prefers_hd() {
        assert_eq!(
            record(MediaType::Image).image_url(true),
            Some("https://apod.example/image_hd.jpg")
        );

        let mut no_hd = record(MediaType::Image);
        no_hd.hdurl = None;
        assert_eq!(no_hd.image_url(true), Some("https://apod.example/image.jpg"));
    }

    #[test]
    fn test_image_url_video_thumbnail() {
        let mut video = record(MediaType::Video);
        video.url = Some("https://www.youtube.com/embed/abc".to_string());
        video.thumbnail_url = Some("https://img.youtube.com/vi/abc/0.jpg".to_string());

        // Thumbnail wins even when HD is preferred
        assert_eq!(video.image_url(true), Some("https://img.youtube.com/vi/abc/0.jpg"));

        video.thumbnail_url = None;
        assert_eq!(video.image_url(false), Some("https://www.youtube.com/embed/abc"));
    }
}
