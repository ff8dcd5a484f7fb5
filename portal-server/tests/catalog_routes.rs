mod common;

use common::{app, app_with, read_json};
use http::StatusCode;
use portal_client::{ClientConfig, HttpReply};
use shared::ErrorCode;

fn ids(body: &serde_json::Value) -> Vec<i64> {
    body["data"]["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_catalog_defaults_to_favorite_retail_products() {
    let app = app();
    let token = app.login().await;

    let body = read_json(app.get("/api/catalog", &token).await).await;
    assert_eq!(body["data"]["selection"], "favorite");
    // Product 4 is a favorite but not sold by the kg
    assert_eq!(ids(&body), vec![1]);

    let buckets = body["data"]["buckets"].as_array().unwrap();
    let keys: Vec<&str> = buckets.iter().map(|b| b["key"].as_str().unwrap()).collect();
    assert_eq!(keys, vec!["favorite", "all", "Gạo dẻo", "Nếp"]);
    assert_eq!(buckets[0]["count"], 1);
    assert_eq!(buckets[1]["count"], 3);
}

#[tokio::test]
async fn test_catalog_selection_by_category_and_all() {
    let app = app();
    let token = app.login().await;

    // Name order: Nàng hoa, Nếp cái hoa vàng, ST25
    let body = read_json(app.get("/api/catalog?category=all", &token).await).await;
    assert_eq!(ids(&body), vec![2, 3, 1]);

    let body = read_json(app.get("/api/catalog?category=N%E1%BA%BFp", &token).await).await;
    assert_eq!(ids(&body), vec![3]);

    let body = read_json(app.get("/api/catalog?category=Unknown", &token).await).await;
    assert!(ids(&body).is_empty());
}

#[tokio::test]
async fn test_catalog_store_failure_maps_to_fetch_error() {
    let app = app();
    let token = app.login().await;
    app.store.set_offline(true);

    let response = app.get("/api/catalog", &token).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json(response).await;
    assert_eq!(body["code"], ErrorCode::CatalogUnreachable as u16);
}

#[tokio::test]
async fn test_product_categories_cover_rice_only() {
    let app = app();
    let token = app.login().await;

    let body = read_json(app.get("/api/products", &token).await).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["categoryName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Gạo dẻo", "Nếp"]);
}

#[tokio::test]
async fn test_get_product_and_missing_product() {
    let app = app();
    let token = app.login().await;

    let body = read_json(app.get("/api/products/3", &token).await).await;
    assert_eq!(body["data"]["code"], "SP0003");

    let response = app.get("/api/products/999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["code"], ErrorCode::ProductNotFound as u16);
}

#[tokio::test]
async fn test_toggle_favorite_returns_stored_value() {
    let app = app();
    let token = app.login().await;

    let body = read_json(app.post("/api/products/2/favorite", &token).await).await;
    assert_eq!(body["data"]["id"], 2);
    assert_eq!(body["data"]["favorite"], true);
    assert_eq!(app.store.write_count(), 1);

    let body = read_json(app.get("/api/catalog", &token).await).await;
    assert_eq!(ids(&body), vec![2, 1]);

    let response = app.post("/api/products/999/favorite", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["code"], ErrorCode::FavoriteProductNotFound as u16);
    assert_eq!(app.store.write_count(), 1);
}

#[tokio::test]
async fn test_print_url_validates_quantity() {
    let app = app();
    let token = app.login().await;

    let body = read_json(app.get("/api/print-url?code=SP%200001&quantity=20", &token).await).await;
    assert_eq!(
        body["data"]["url"],
        "https://hooks.example.com/print?printType=label&code=SP%200001&quantity=20"
    );
    assert_eq!(body["data"]["quantity"], 20);

    for bad in ["0", "1001", "abc"] {
        let response = app
            .get(&format!("/api/print-url?code=SP0001&quantity={}", bad), &token)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["code"], ErrorCode::PrintQuantityInvalid as u16);
    }

    let response = app.get("/api/print-url?quantity=2", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_print_url_without_base_is_config_error() {
    let app = app_with(ClientConfig::new(), vec![]);
    let token = app.login().await;

    let response = app.get("/api/print-url?code=SP0001&quantity=1", &token).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert_eq!(body["code"], ErrorCode::ConfigMissing as u16);
}

#[tokio::test]
async fn test_sync_returns_webhook_message() {
    let app = app_with(
        ClientConfig::new()
            .with_webhook_url("https://hooks.example.com/")
            .with_webhook_secret("user:secret"),
        vec![HttpReply::new(200, "Đã đồng bộ 120 sản phẩm")],
    );
    let token = app.login().await;

    let response = app.post("/api/sync", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Đã đồng bộ 120 sản phẩm");

    let requests = app.http.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "https://hooks.example.com/sync-kiotviet-data");
}

#[tokio::test]
async fn test_sync_without_config_sends_nothing() {
    let app = app_with(ClientConfig::new().with_webhook_url("https://hooks.example.com"), vec![]);
    let token = app.login().await;

    let response = app.post("/api/sync", &token).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert_eq!(body["code"], ErrorCode::ConfigMissing as u16);
    assert!(app.http.requests().is_empty());
}

#[tokio::test]
async fn test_sync_rejection_carries_status() {
    let app = app_with(
        ClientConfig::new()
            .with_webhook_url("https://hooks.example.com")
            .with_webhook_secret("user:secret"),
        vec![HttpReply::new(403, "")],
    );
    let token = app.login().await;

    let response = app.post("/api/sync", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = read_json(response).await;
    assert_eq!(body["code"], ErrorCode::SyncRejected as u16);
    assert_eq!(body["details"]["status"], 403);
}

#[tokio::test]
async fn test_unknown_api_route_is_not_found() {
    let app = app();
    let token = app.login().await;

    let response = app.get("/api/labels", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["code"], ErrorCode::NotFound as u16);
}
