//! Mock HTTP server for asset download tests.

use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockHttpServer {
    pub server: MockServer,
}

impl MockHttpServer {
    /// Start a new mock HTTP server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get URL for a specific path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    /// Mock a GET endpoint returning PNG bytes
    pub async fn mock_png(&self, endpoint: &str, bytes: Vec<u8>) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(bytes)
                    .insert_header("content-type", "image/png"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock an endpoint that returns an error status, expecting `calls` hits
    pub async fn mock_error(&self, endpoint: &str, status: u16, calls: u64) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string("error"))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Fail `failures` times with a 500, then serve `bytes`
    pub async fn mock_flaky(&self, endpoint: &str, failures: u64, bytes: Vec<u8>) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(failures)
            .expect(failures)
            .mount(&self.server)
            .await;
        self.mock_png(endpoint, bytes).await;
    }
}
