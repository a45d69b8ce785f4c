//! Mock APOD API and image host.

use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Path the mock serves the APOD list on
pub const APOD_PATH: &str = "/planetary/apod";

/// API key the test clients send
pub const TEST_API_KEY: &str = "TEST_KEY";

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockApodServer {
    pub server: MockServer,
}

impl MockApodServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// URL to configure as `api_url`
    pub fn api_url(&self) -> String {
        self.url_for(APOD_PATH)
    }

    /// Get URL for a specific path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    /// Mock the APOD list for one date range
    pub async fn mock_range(&self, start: &str, end: &str, items: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(APOD_PATH))
            .and(query_param("api_key", TEST_API_KEY))
            .and(query_param("start_date", start))
            .and(query_param("end_date", end))
            .and(query_param("thumbs", "true"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(items)
                    .insert_header("content-type", "application/json")
                    .insert_header("X-RateLimit-Remaining", "999"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock an image download that must be requested exactly `times` times
    pub async fn mock_image(&self, endpoint: &str, bytes: Vec<u8>, content_type: &str, times: u64) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(bytes, content_type),
            )
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Mock an endpoint that returns an error
    pub async fn mock_error(&self, endpoint: &str, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
    }
}
