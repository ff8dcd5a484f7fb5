mod common;

use common::{RecordingHttp, product};
use portal_client::{CatalogService, HttpReply, MemoryStore, PostgrestStore};
use serde_json::json;
use shared::error::{ErrorCode, FetchError, ToggleError};
use shared::models::{ProductCategory, ProductId};
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

fn memory_service() -> (CatalogService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new(
        vec![
            product(1, "Gạo dẻo thơm", "Gạo dẻo", false),
            product(2, "ST25", "Gạo dẻo", true),
            product(3, "Nếp cái hoa vàng", "Nếp", false),
        ],
        vec![ProductCategory {
            category_id: 10,
            category_name: "Gạo dẻo".into(),
            retailer_id: None,
            rank: 1,
            color_border: "#4ecdc4".into(),
            active: true,
            created_date: None,
            modified_date: None,
        }],
    ));
    (CatalogService::new(store.clone(), TIMEOUT), store)
}

fn postgrest_service(http: Arc<RecordingHttp>) -> CatalogService {
    let store = PostgrestStore::new(http, "https://db.example.co", "anon");
    CatalogService::new(Arc::new(store), TIMEOUT)
}

#[tokio::test]
async fn test_toggle_nonexistent_product_mutates_nothing() {
    let (service, store) = memory_service();
    let before = store.snapshot().await;

    let err = service.toggle_favorite(&ProductId::Int(404)).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.code(), ErrorCode::FavoriteProductNotFound);
    assert_eq!(store.snapshot().await, before);
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_toggle_flips_and_persists() {
    let (service, store) = memory_service();

    assert!(service.toggle_favorite(&ProductId::Int(1)).await.unwrap());
    assert!(!service.toggle_favorite(&ProductId::Int(2)).await.unwrap());
    assert_eq!(store.write_count(), 2);

    let favorites: Vec<_> = store
        .snapshot()
        .await
        .into_iter()
        .filter(|p| p.favorite)
        .map(|p| p.id)
        .collect();
    assert_eq!(favorites, vec![ProductId::Int(1)]);
}

#[tokio::test]
async fn test_queries_against_memory_store() {
    let (service, store) = memory_service();

    let catalog = service.fetch_catalog().await.unwrap();
    assert_eq!(catalog.products.len(), 3);
    assert_eq!(catalog.categories.len(), 1);

    let nep = service.fetch_products_by_category("Nếp").await.unwrap();
    assert_eq!(nep.len(), 1);

    assert_eq!(service.search_products("st25").await.unwrap().len(), 1);
    assert_eq!(service.search_products("").await.unwrap().len(), 3);

    assert!(service.get_product(&ProductId::Int(3)).await.unwrap().is_some());
    assert!(service.get_product(&ProductId::Int(9)).await.unwrap().is_none());

    assert!(service.check_connection().await);
    let info = service.database_info().await.unwrap();
    assert_eq!(info.products_count, 3);
    assert_eq!(info.categories_count, 1);

    store.set_offline(true);
    assert!(!service.check_connection().await);
    assert_eq!(
        service.fetch_catalog().await.unwrap_err().code(),
        ErrorCode::CatalogUnreachable
    );
}

#[tokio::test]
async fn test_fetch_catalog_maps_records() {
    let products = json!([
        {
            "kiotviet_id": 2001,
            "name": "Tấm thơm",
            "full_name": "Tấm thơm (kg)",
            "code": "TT01",
            "base_price": 18000,
            "category_name": "Tấm",
            "is_active": true,
            "allows_sale": true,
            "unit": "kg",
            "images": ["https://cdn/tt.jpg"],
            "glt_labelprint_favorite": true,
            "glt_sort_order": 1
        }
    ]);
    let categories = json!([
        { "category_id": 5, "category_name": "Tấm", "rank": 2, "glt_is_active": true, "glt_color_border": "#FF9FF3" }
    ]);
    let http = Arc::new(RecordingHttp::new(vec![
        HttpReply::new(200, products.to_string()),
        HttpReply::new(200, categories.to_string()),
    ]));
    let service = postgrest_service(http.clone());

    let catalog = service.fetch_catalog().await.unwrap();

    let tam = &catalog.products[0];
    assert_eq!(tam.id, ProductId::Int(2001));
    assert!(tam.favorite);
    assert_eq!(tam.display_image(), Some("https://cdn/tt.jpg"));
    assert_eq!(catalog.categories[0].color_border, "#ff9ff3");

    let requests = http.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.header_value("apikey") == Some("anon")));
    assert!(
        requests
            .iter()
            .any(|r| r.url.starts_with("https://db.example.co/rest/v1/kv_products?"))
    );
}

#[tokio::test]
async fn test_fetch_rejection_is_typed() {
    let http = Arc::new(RecordingHttp::new(vec![
        HttpReply::new(500, r#"{"code":"XX000","message":"database is down"}"#),
        HttpReply::new(200, "[]"),
    ]));
    let service = postgrest_service(http);

    let err = service.fetch_catalog().await.unwrap_err();
    assert!(matches!(err, FetchError::Rejected { status: 500, .. }));
    assert!(err.to_string().contains("database is down"));
}

#[tokio::test]
async fn test_fetch_malformed_body() {
    let http = Arc::new(RecordingHttp::new(vec![
        HttpReply::new(200, "<html>"),
        HttpReply::new(200, "[]"),
    ]));
    let err = postgrest_service(http).fetch_catalog().await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::CatalogMalformed);
}

#[tokio::test]
async fn test_fetch_times_out() {
    let http = Arc::new(RecordingHttp::slow(Duration::from_millis(500)));
    let store = PostgrestStore::new(http, "https://db.example.co", "anon");
    let service = CatalogService::new(Arc::new(store), Duration::from_millis(20));

    assert!(matches!(
        service.fetch_catalog().await,
        Err(FetchError::Timeout(_))
    ));
}

#[tokio::test]
async fn test_toggle_returns_store_confirmed_value() {
    let http = Arc::new(RecordingHttp::new(vec![
        HttpReply::new(200, r#"[{"kiotviet_id": 7, "glt_labelprint_favorite": null}]"#),
        HttpReply::new(200, r#"[{"kiotviet_id": 7, "glt_labelprint_favorite": true}]"#),
    ]));
    let service = postgrest_service(http.clone());

    assert!(service.toggle_favorite(&ProductId::Int(7)).await.unwrap());

    let requests = http.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, http::Method::PATCH);
    assert!(requests[1].url.contains("kiotviet_id=eq.7"));
    assert_eq!(
        requests[1].body,
        Some(json!({ "glt_labelprint_favorite": true }))
    );
    assert_eq!(
        requests[1].header_value("Prefer"),
        Some("return=representation")
    );
}

#[tokio::test]
async fn test_toggle_unknown_id_skips_write() {
    let http = Arc::new(RecordingHttp::new(vec![HttpReply::new(200, "[]")]));
    let service = postgrest_service(http.clone());

    let err = service.toggle_favorite(&ProductId::Int(404)).await.unwrap_err();
    assert_eq!(err, ToggleError::not_found(404));
    assert_eq!(http.calls(), 1);
}

#[tokio::test]
async fn test_toggle_write_failure() {
    let http = Arc::new(RecordingHttp::new(vec![
        HttpReply::new(200, r#"[{"kiotviet_id": 7, "glt_labelprint_favorite": false}]"#),
        HttpReply::new(403, r#"{"message":"permission denied"}"#),
    ]));
    let err = postgrest_service(http).toggle_favorite(&ProductId::Int(7)).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::FavoriteUpdateFailed);
}

#[tokio::test]
async fn test_database_info_reads_content_range() {
    let http = Arc::new(RecordingHttp::new(vec![
        HttpReply::new(200, "").with_header("Content-Range", "0-0/3573"),
        HttpReply::new(206, "").with_header("Content-Range", "*/12"),
    ]));
    let info = postgrest_service(http).database_info().await.unwrap();
    assert_eq!(info.products_count, 3573);
    assert_eq!(info.categories_count, 12);
}

#[tokio::test]
async fn test_get_product_skips_ineligible() {
    let mut retired = product(7, "Gạo cũ", "Gạo dẻo", false);
    retired.allows_sale = false;
    let mut hidden = product(8, "Gạo ẩn", "Gạo dẻo", false);
    hidden.is_active = false;
    let store = Arc::new(MemoryStore::new(vec![retired, hidden, product(9, "ST25", "Gạo dẻo", false)], vec![]));
    let service = CatalogService::new(store, TIMEOUT);

    assert!(service.get_product(&ProductId::Int(7)).await.unwrap().is_none());
    assert!(service.get_product(&ProductId::Int(8)).await.unwrap().is_none());
    assert!(service.get_product(&ProductId::Int(9)).await.unwrap().is_some());
}

#[tokio::test]
async fn test_fetch_catalog_keeps_store_order() {
    let products = json!([
        { "kiotviet_id": 1, "name": "Đặc sản Điện Biên", "category_name": "Gạo dẻo", "is_active": true, "allows_sale": true },
        { "kiotviet_id": 2, "name": "Gạo lứt", "category_name": "Gạo dẻo", "is_active": true, "allows_sale": true },
        { "kiotviet_id": 3, "name": "bắp rang", "category_name": "Khác", "is_active": true, "allows_sale": true }
    ]);
    let http = Arc::new(RecordingHttp::new(vec![
        HttpReply::new(200, products.to_string()),
        HttpReply::new(200, "[]"),
    ]));
    let service = postgrest_service(http.clone());

    let catalog = service.fetch_catalog().await.unwrap();

    let ids: Vec<_> = catalog.products.iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec![ProductId::Int(1), ProductId::Int(2), ProductId::Int(3)]);
    assert!(http.requests()[0].url.contains("order="));
}
