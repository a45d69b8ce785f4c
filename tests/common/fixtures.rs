//! Test fixtures: APOD items, images and configurations.

use apodify::models::AppConfig;
use std::io::Cursor;
use std::path::Path;

use super::mock_server::MockApodServer;

pub const RED: [u8; 3] = [255, 0, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];

/// Solid-color PNG (lossless, so extracted colors are exact)
pub fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let image = image::RgbImage::from_pixel(width, height, image::Rgb(color));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("Failed to encode PNG fixture");
    bytes
}

pub fn image_item(date: &str, url: &str) -> serde_json::Value {
    serde_json::json!({
        "date": date,
        "title": format!("Picture of {date}"),
        "explanation": "A test picture.",
        "media_type": "image",
        "service_version": "v1",
        "url": url
    })
}

pub fn video_item(date: &str, url: &str, thumbnail_url: &str) -> serde_json::Value {
    serde_json::json!({
        "date": date,
        "title": format!("Video of {date}"),
        "explanation": "A test video.",
        "media_type": "video",
        "service_version": "v1",
        "url": url,
        "thumbnail_url": thumbnail_url
    })
}

pub fn other_item(date: &str) -> serde_json::Value {
    serde_json::json!({
        "date": date,
        "title": "Interactive",
        "explanation": "Not a picture.",
        "media_type": "other",
        "service_version": "v1"
    })
}

/// Configuration pointing at the mock server with all outputs under `root`
pub fn test_config(server: &MockApodServer, root: &Path, start: &str, end: &str) -> AppConfig {
    AppConfig {
        start_date: start.to_string(),
        end_date: end.to_string(),
        api_url: server.api_url(),
        output_dir: root.join("output"),
        temp_dir: root.join("temp"),
        archive_dir: root.join("archive"),
        ..AppConfig::default()
    }
}
