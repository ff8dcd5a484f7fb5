#![allow(dead_code)]

use async_trait::async_trait;
use portal_client::{ClientError, ClientResult, HttpClient, HttpReply, HttpRequest};
use shared::models::{Product, ProductId};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Transport mock: replays queued replies and records every request
#[derive(Default)]
pub struct RecordingHttp {
    replies: Mutex<VecDeque<HttpReply>>,
    requests: Mutex<Vec<HttpRequest>>,
    delay: Option<Duration>,
}

impl RecordingHttp {
    pub fn new(replies: Vec<HttpReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for RecordingHttp {
    async fn execute(&self, request: HttpRequest) -> ClientResult<HttpReply> {
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::Connect("no reply queued".into()))
    }
}

pub fn product(id: i64, name: &str, category: &str, favorite: bool) -> Product {
    Product {
        id: ProductId::Int(id),
        name: name.into(),
        full_name: format!("{} túi", name),
        code: format!("SP{:04}", id),
        price: Some(20000.0),
        base_price: Some(20000.0),
        category_name: category.into(),
        is_active: true,
        allows_sale: true,
        unit: Some("kg".into()),
        weight: Some(1000.0),
        images: vec![],
        gallery_original_url: None,
        sort_order: None,
        favorite,
    }
}
