mod common;

use base64::Engine as _;
use linkstub::config::TokenPolicy;
use serde_json::Value;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

#[tokio::test]
async fn qr_code_returns_base64_png() {
    let (state, _backend) = common::create_test_state(TokenPolicy::Generate, false);
    let link = common::create_link(&state, "scannable", 45, None).await;
    let server = common::test_server(state);

    let response = server.get(&format!("/qrcode/{}", link.id)).await;

    response.assert_status_ok();
    let body: Value = response.json();
    let encoded = body["content_image"].as_str().unwrap();
    assert!(!encoded.is_empty());

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .unwrap();
    assert_eq!(&bytes[..8], &PNG_MAGIC);
}

#[tokio::test]
async fn qr_code_unknown_link_is_not_found() {
    let (state, _backend) = common::create_test_state(TokenPolicy::Generate, false);
    let server = common::test_server(state);

    let response = server.get("/qrcode/9999").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn qr_code_does_not_record_a_click() {
    let (state, _backend) = common::create_test_state(TokenPolicy::Generate, false);
    let link = common::create_link(&state, "scannable", 45, None).await;
    let server = common::test_server(state);

    server
        .get(&format!("/qrcode/{}", link.id))
        .await
        .assert_status_ok();

    let stats: Value = server
        .get(&format!("/statistics/{}", link.id))
        .await
        .json();
    assert_eq!(stats["total_clicks"], 0);
}
