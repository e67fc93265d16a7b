//! Shared setup for the mock backend suites

#![allow(dead_code)]

use videoflix_http::{ClientConfig, ClientContext};
use wiremock::MockServer;

/// Route client logs to the test harness so they show up for failing tests
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "videoflix_http=debug,videoflix_core=debug".to_string()),
        )
        .with_test_writer()
        .try_init();
}

/// Context talking to `server`
pub fn context(server: &MockServer) -> ClientContext {
    context_with_coalescing(server, false)
}

pub fn context_with_coalescing(server: &MockServer, coalesce: bool) -> ClientContext {
    init_tracing();
    let mut config = ClientConfig::default();
    config.api.base_url = server.uri();
    config.auth.coalesce_refresh = coalesce;
    ClientContext::new(config).unwrap()
}
