/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for tabdeal-adapter tests

use tabdeal_adapter::{ClientConfig, TabdealClient};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_API_SECRET: &str = "test-api-secret";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server without credentials
#[allow(dead_code)]
pub fn public_client(server: &MockServer) -> TabdealClient {
    TabdealClient::with_config(ClientConfig::default().with_base_url(server.uri()))
        .expect("public client")
}

/// Client pointed at the mock server with the test key pair
#[allow(dead_code)]
pub fn signed_client(server: &MockServer) -> TabdealClient {
    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_credentials(TEST_API_KEY, TEST_API_SECRET);
    TabdealClient::with_config(config).expect("signed client")
}

/// Split a signed query into the signed payload and its signature
#[allow(dead_code)]
pub fn split_signature(query: &str) -> (&str, &str) {
    query
        .rsplit_once("&signature=")
        .expect("signature should be the last query field")
}
