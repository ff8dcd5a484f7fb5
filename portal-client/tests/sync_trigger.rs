mod common;

use common::RecordingHttp;
use portal_client::{ClientConfig, HttpReply, SyncTrigger};
use serde_json::json;
use shared::error::{ConfigError, ErrorCode, TriggerError};
use std::sync::Arc;

#[tokio::test]
async fn test_missing_webhook_url_makes_no_request() {
    let http = Arc::new(RecordingHttp::new(vec![HttpReply::new(200, "ok")]));
    let config = ClientConfig::new().with_webhook_secret("user:pass");
    let trigger = SyncTrigger::from_config(http.clone(), &config);

    let err = trigger.trigger_sync().await.unwrap_err();

    assert_eq!(
        err,
        TriggerError::MissingConfig(ConfigError::missing("WEBHOOK_URL"))
    );
    assert_eq!(err.code(), ErrorCode::ConfigMissing);
    assert_eq!(http.calls(), 0);
}

#[tokio::test]
async fn test_missing_secret_makes_no_request() {
    let http = Arc::new(RecordingHttp::default());
    let config = ClientConfig::new().with_webhook_url("https://hook.example");
    let trigger = SyncTrigger::from_config(http.clone(), &config);

    assert!(matches!(
        trigger.trigger_sync().await,
        Err(TriggerError::MissingConfig(_))
    ));
    assert_eq!(http.calls(), 0);
}

#[tokio::test]
async fn test_sync_request_shape_and_message() {
    let http = Arc::new(RecordingHttp::new(vec![HttpReply::new(200, "Đã đồng bộ 120 sản phẩm")]));
    let config = ClientConfig::new()
        .with_webhook_url("https://hook.example/")
        .with_webhook_secret("user:pass");
    let trigger = SyncTrigger::from_config(http.clone(), &config);

    let outcome = trigger.trigger_sync().await.unwrap();
    assert_eq!(outcome.message, "Đã đồng bộ 120 sản phẩm");

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, http::Method::POST);
    assert_eq!(request.url, "https://hook.example/sync-kiotviet-data");
    assert_eq!(request.header_value("Authorization"), Some("Basic dXNlcjpwYXNz"));
    assert_eq!(request.body, Some(json!({ "type": "products" })));
}

#[tokio::test]
async fn test_empty_body_falls_back_to_status_text() {
    let http = Arc::new(RecordingHttp::new(vec![HttpReply::new(202, "")]));
    let trigger = SyncTrigger::new(http, Some("https://hook".into()), Some("k".into()));
    assert_eq!(trigger.trigger_sync().await.unwrap().message, "Accepted");
}

#[tokio::test]
async fn test_rejection_carries_status() {
    let http = Arc::new(RecordingHttp::new(vec![HttpReply::new(401, "bad credential")]));
    let trigger = SyncTrigger::new(http.clone(), Some("https://hook".into()), Some("k".into()));

    let err = trigger.trigger_sync().await.unwrap_err();
    assert_eq!(
        err,
        TriggerError::RemoteRejected {
            status: 401,
            message: "bad credential".into()
        }
    );
    assert_eq!(err.code(), ErrorCode::SyncRejected);
    assert_eq!(http.calls(), 1);
}

#[tokio::test]
async fn test_transport_failure() {
    let http = Arc::new(RecordingHttp::default());
    let trigger = SyncTrigger::new(http, Some("https://hook".into()), Some("k".into()));
    assert!(matches!(
        trigger.trigger_sync().await,
        Err(TriggerError::Transport(_))
    ));
}
