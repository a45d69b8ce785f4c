//! Blocking client for the NASA APOD API.

use chrono::NaiveDate;
use std::time::Duration;

use crate::error::AppError;
use crate::models::ApodRecord;

/// Environment variable holding the api.nasa.gov key
pub const API_KEY_ENV: &str = "NASA_API_KEY";

/// Shared, heavily rate-limited key used when none is configured
pub const DEMO_KEY: &str = "DEMO_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Downloaded image bytes with their content type.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// MIME type without parameters
    pub content_type: String,
}

pub struct ApodClient {
    client: reqwest::blocking::Client,
    api_url: String,
    api_key: String,
}

impl ApodClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, AppError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("apodify/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Create a client with the key from `NASA_API_KEY`.
    ///
    /// Falls back to `DEMO_KEY` with a warning when the variable is unset.
    pub fn from_env(api_url: impl Into<String>) -> Result<Self, AppError> {
        let api_key = match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                tracing::warn!(
                    "{} is not set, using {} (limited to a few requests per hour)",
                    API_KEY_ENV,
                    DEMO_KEY
                );
                DEMO_KEY.to_string()
            }
        };
        Self::new(api_url, api_key)
    }

    /// Fetch the raw JSON items for every day in `start..=end`.
    pub fn fetch_range_raw(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<serde_json::Value>, AppError> {
        let start_date = start.format("%Y-%m-%d").to_string();
        let end_date = end.format("%Y-%m-%d").to_string();

        tracing::info!(start = %start_date, end = %end_date, "Fetching APOD data");

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("start_date", start_date.as_str()),
                ("end_date", end_date.as_str()),
                ("thumbs", "true"),
            ])
            .send()?;

        if let Some(remaining) = response.headers().get("X-RateLimit-Remaining") {
            tracing::debug!(
                remaining = %remaining.to_str().unwrap_or("?"),
                "APOD API rate limit"
            );
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text()?;
        let items: Vec<serde_json::Value> = serde_json::from_str(&body)?;
        tracing::info!(count = items.len(), "Received APOD data");
        Ok(items)
    }

    /// Fetch and parse every day in `start..=end`.
    pub fn fetch_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ApodRecord>, AppError> {
        Ok(parse_records(self.fetch_range_raw(start, end)?))
    }

    /// Download an image.
    pub fn fetch_image(&self, url: &str) -> Result<FetchedImage, AppError> {
        tracing::debug!(url = %url, "Downloading image");

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(mime_essence)
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let bytes = response.bytes()?.to_vec();
        tracing::debug!(
            url = %url,
            size = bytes.len(),
            content_type = %content_type,
            "Downloaded image"
        );

        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}

/// Parse raw API items, skipping the ones that do not look like a day.
pub fn parse_records(items: Vec<serde_json::Value>) -> Vec<ApodRecord> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<ApodRecord>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed APOD item");
                None
            }
        })
        .collect()
}

/// `image/jpeg; charset=binary` -> `image/jpeg`
fn mime_essence(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or(value)
        .trim()
        .to_ascii_lowercase()
}
