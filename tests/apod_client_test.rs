//! Tests for the APOD API client against a mock server.

mod common;

use apodify::error::AppError;
use apodify::models::MediaType;
use apodify::services::ApodClient;
use chrono::NaiveDate;
use common::fixtures;
use common::mock_server::TEST_API_KEY;
use common::MockApodServer;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn test_fetch_range() {
    let server = MockApodServer::start().await;
    server
        .mock_range(
            "2024-03-01",
            "2024-03-02",
            serde_json::json!([
                fixtures::image_item("2024-03-01", "https://apod.example/a.jpg"),
                fixtures::video_item(
                    "2024-03-02",
                    "https://www.youtube.com/embed/abc",
                    "https://img.youtube.com/vi/abc/0.jpg"
                ),
            ]),
        )
        .await;

    let api_url = server.api_url();
    let records = tokio::task::spawn_blocking(move || {
        let client = ApodClient::new(api_url, TEST_API_KEY).unwrap();
        client.fetch_range(day("2024-03-01"), day("2024-03-02"))
    })
    .await
    .expect("spawn_blocking failed")
    .expect("Request should succeed");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date, day("2024-03-01"));
    assert_eq!(records[0].media_type, MediaType::Image);
    assert_eq!(records[1].media_type, MediaType::Video);
    assert_eq!(
        records[1].image_url(false),
        Some("https://img.youtube.com/vi/abc/0.jpg")
    );
}

#[tokio::test]
async fn test_fetch_range_api_error() {
    let server = MockApodServer::start().await;
    server
        .mock_error(
            common::mock_server::APOD_PATH,
            429,
            "You have exceeded your rate limit.",
        )
        .await;

    let api_url = server.api_url();
    let result = tokio::task::spawn_blocking(move || {
        let client = ApodClient::new(api_url, TEST_API_KEY).unwrap();
        client.fetch_range(day("2024-03-01"), day("2024-03-01"))
    })
    .await
    .expect("spawn_blocking failed");

    match result {
        Err(AppError::Api { status, body }) => {
            assert_eq!(status, 429);
            assert!(body.contains("rate limit"));
        }
        other => panic!("Expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_image_content_type() {
    let server = MockApodServer::start().await;
    let png = fixtures::png_bytes(4, 4, fixtures::RED);
    server
        .mock_image("/image/red.png", png.clone(), "image/png; charset=binary", 1)
        .await;

    let url = server.url_for("/image/red.png");
    let fetched = tokio::task::spawn_blocking(move || {
        let client = ApodClient::new("http://unused", TEST_API_KEY).unwrap();
        client.fetch_image(&url)
    })
    .await
    .expect("spawn_blocking failed")
    .expect("Download should succeed");

    assert_eq!(fetched.content_type, "image/png");
    assert_eq!(fetched.bytes, png);
}

#[tokio::test]
async fn test_fetch_image_not_found() {
    let server = MockApodServer::start().await;
    server.mock_error("/image/missing.jpg", 404, "Not Found").await;

    let url = server.url_for("/image/missing.jpg");
    let result = tokio::task::spawn_blocking(move || {
        let client = ApodClient::new("http://unused", TEST_API_KEY).unwrap();
        client.fetch_image(&url)
    })
    .await
    .expect("spawn_blocking failed");

    assert!(matches!(result, Err(AppError::Api { status: 404, .. })));
}
