mod common;

use linkstub::config::TokenPolicy;
use serde_json::Value;

#[tokio::test]
async fn health_reports_status_and_backend() {
    let (state, _backend) = common::create_test_state(TokenPolicy::Generate, false);
    let server = common::test_server(state);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
    assert!(body["version"].as_str().is_some());
}
