//! Mock processing service standing in for the external color-transfer
//! backend.
//!
//! Request bodies in these tests use ASCII fixture "images" so matchers can
//! inspect the multipart payload as text.

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockGradingService {
    pub server: MockServer,
}

impl MockGradingService {
    /// Start a new mock processing service
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of the mock service
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Mock `/api/process` returning a processed image
    pub async fn mock_process_ok(&self, image: &[u8]) {
        Mock::given(method("POST"))
            .and(path("/api/process"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(image.to_vec())
                    .insert_header("content-type", "image/png"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock `/api/process` failing with the given status
    pub async fn mock_process_failure(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/api/process"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Mock `/api/generate_lut` returning a .cube file for every request
    pub async fn mock_lut_ok(&self, cube: &[u8]) {
        Mock::given(method("POST"))
            .and(path("/api/generate_lut"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(cube.to_vec())
                    .insert_header("content-type", "text/plain"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock `/api/generate_lut` for requests whose body contains `marker`
    /// (e.g. a method name), returning a .cube file
    pub async fn mock_lut_ok_for(&self, marker: &str, cube: &[u8]) {
        Mock::given(method("POST"))
            .and(path("/api/generate_lut"))
            .and(body_string_contains(marker))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(cube.to_vec())
                    .insert_header("content-type", "text/plain"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock `/api/generate_lut` failing for requests whose body contains
    /// `marker`
    pub async fn mock_lut_failure_for(&self, marker: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path("/api/generate_lut"))
            .and(body_string_contains(marker))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Mock `/api/generate_lut` failing with the given status
    pub async fn mock_lut_failure(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/api/generate_lut"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Mock `/api/generate_lut` answering after a delay (for in-flight tests)
    pub async fn mock_lut_ok_delayed(&self, cube: &[u8], delay: std::time::Duration) {
        Mock::given(method("POST"))
            .and(path("/api/generate_lut"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(cube.to_vec())
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock a plain GET endpoint serving artifact bytes
    pub async fn mock_artifact(&self, endpoint: &str, bytes: &[u8]) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
            .mount(&self.server)
            .await;
    }

    /// Mock a GET endpoint answering 404, i.e. a dangling artifact
    pub async fn mock_dangling_artifact(&self, endpoint: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(404))
            .mount(&self.server)
            .await;
    }

    /// All requests received so far
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}
