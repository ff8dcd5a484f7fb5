#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use portal_client::auth::FixedCredentialProvider;
use portal_client::{ClientConfig, ClientError, ClientResult, HttpClient, HttpReply, HttpRequest, MemoryStore};
use portal_server::{Config, ServerState, build_app};
use serde_json::Value;
use shared::models::{Product, ProductId};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const USERNAME: &str = "staff";
pub const PASSWORD: &str = "gao-ngon";

/// Webhook transport mock
#[derive(Default)]
pub struct StubHttp {
    replies: Mutex<VecDeque<HttpReply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubHttp {
    pub fn new(replies: Vec<HttpReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for StubHttp {
    async fn execute(&self, request: HttpRequest) -> ClientResult<HttpReply> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::Connect("no reply queued".into()))
    }
}

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    pub store: Arc<MemoryStore>,
    pub http: Arc<StubHttp>,
}

pub fn product(id: i64, name: &str, category: &str, unit: &str, favorite: bool) -> Product {
    Product {
        id: ProductId::Int(id),
        name: name.into(),
        full_name: format!("{} túi", name),
        code: format!("SP{:04}", id),
        price: Some(25000.0),
        base_price: Some(25000.0),
        category_name: category.into(),
        is_active: true,
        allows_sale: true,
        unit: Some(unit.into()),
        weight: None,
        images: vec![],
        gallery_original_url: None,
        sort_order: None,
        favorite,
    }
}

pub fn sample_products() -> Vec<Product> {
    vec![
        product(1, "ST25", "Gạo dẻo", "kg", true),
        product(2, "Nàng hoa", "Gạo dẻo", "kg", false),
        product(3, "Nếp cái hoa vàng", "Nếp", "kg", false),
        product(4, "Nếp bao 25kg", "Nếp", "bao", true),
        product(5, "Nước mắm", "Gia vị", "chai", false),
    ]
}

pub fn app_with(client: ClientConfig, replies: Vec<HttpReply>) -> TestApp {
    let store = Arc::new(MemoryStore::new(sample_products(), vec![]));
    let http = Arc::new(StubHttp::new(replies));
    let identity = Arc::new(FixedCredentialProvider::new(USERNAME, PASSWORD));
    let state = ServerState::new(Config::with_client(client), store.clone(), http.clone(), identity);
    TestApp {
        app: build_app(&state),
        state,
        store,
        http,
    }
}

pub fn app() -> TestApp {
    app_with(
        ClientConfig::new()
            .with_webhook_url("https://hooks.example.com")
            .with_webhook_secret("user:secret"),
        vec![],
    )
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Log in with the fixed credentials and return the session token
    pub async fn login(&self) -> String {
        let response = self.send(json_request("POST", "/api/auth/login", LOGIN_BODY)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        body["data"]["token"].as_str().unwrap().to_string()
    }

    pub async fn get(&self, uri: &str, token: &str) -> Response<Body> {
        self.send(authed("GET", uri, token)).await
    }

    pub async fn post(&self, uri: &str, token: &str) -> Response<Body> {
        self.send(authed("POST", uri, token)).await
    }
}

pub const LOGIN_BODY: &str = r#"{"username":"staff","password":"gao-ngon"}"#;

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn anonymous(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
