//! Supabase REST (PostgREST) catalog store

use super::records::{CategoryRecord, FavoriteRecord, PostgrestErrorBody, ProductRecord};
use super::{CATEGORIES_TABLE, CatalogStore, PRODUCTS_TABLE, ProductQuery};
use crate::config::ClientConfig;
use crate::http::{HttpClient, HttpReply, HttpRequest};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use shared::error::{CatalogResource, ConfigError, FetchError, ToggleError};
use shared::models::{DatabaseInfo, Product, ProductCategory, ProductId};
use std::sync::Arc;

const PRODUCT_ORDER: &str = "glt_sort_order.asc.nullslast,name.asc";
const FAVORITE_COLUMNS: &str = "kiotviet_id,glt_labelprint_favorite";

/// Catalog store backed by the Supabase REST endpoint
#[derive(Clone)]
pub struct PostgrestStore {
    http: Arc<dyn HttpClient>,
    rest_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl std::fmt::Debug for PostgrestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestStore")
            .field("rest_url", &self.rest_url)
            .finish_non_exhaustive()
    }
}

impl PostgrestStore {
    pub fn new(http: Arc<dyn HttpClient>, project_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            http,
            rest_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            api_key: api_key.into(),
            timeout_secs: crate::config::DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Requires `SUPABASE_URL` and `SUPABASE_ANON_KEY`
    pub fn from_config(http: Arc<dyn HttpClient>, config: &ClientConfig) -> Result<Self, ConfigError> {
        let (url, key) = config.store_endpoint()?;
        Ok(Self::new(http, url, key).with_timeout_secs(config.timeout))
    }

    /// Only used to label timeout errors
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn table_url(&self, table: &str, query: &str) -> String {
        format!("{}/{}?{}", self.rest_url, table, query)
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        request
            .header("apikey", self.api_key.as_str())
            .bearer(&self.api_key)
            .header("Accept", "application/json")
    }

    async fn send(&self, request: HttpRequest) -> ClientResult<HttpReply> {
        self.http.execute(self.authorize(request)).await
    }

    /// GET rows and decode them, mapping failures for `resource`
    async fn select<T: DeserializeOwned>(
        &self,
        resource: CatalogResource,
        table: &str,
        query: &str,
    ) -> Result<Vec<T>, FetchError> {
        let reply = self
            .send(HttpRequest::get(self.table_url(table, query)))
            .await
            .map_err(|e| self.fetch_error(resource, e))?;

        if !reply.is_success() {
            return Err(rejected(resource, &reply));
        }

        reply.json().map_err(|e| FetchError::Malformed {
            resource,
            message: e.to_string(),
        })
    }

    async fn count(&self, resource: CatalogResource, table: &str) -> Result<u64, FetchError> {
        let request = HttpRequest::head(self.table_url(table, "select=*")).header("Prefer", "count=exact");
        let reply = self
            .send(request)
            .await
            .map_err(|e| self.fetch_error(resource, e))?;

        if !reply.is_success() {
            return Err(rejected(resource, &reply));
        }

        reply
            .header("content-range")
            .and_then(parse_content_range_total)
            .ok_or_else(|| FetchError::Malformed {
                resource,
                message: "missing or invalid Content-Range header".to_string(),
            })
    }

    fn fetch_error(&self, resource: CatalogResource, err: ClientError) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout_secs)
        } else if matches!(err, ClientError::Serialization(_) | ClientError::InvalidResponse(_)) {
            FetchError::Malformed {
                resource,
                message: err.to_string(),
            }
        } else {
            FetchError::Unreachable(err.to_string())
        }
    }
}

fn rejected(resource: CatalogResource, reply: &HttpReply) -> FetchError {
    FetchError::Rejected {
        resource,
        status: reply.status,
        message: PostgrestErrorBody::parse(&reply.body).describe(),
    }
}

/// Total from `Content-Range: 0-24/3573` or `*/0`
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

fn eq_filter(column: &str, value: &str) -> String {
    format!("{}=eq.{}", column, urlencoding::encode(value))
}

/// PostgREST `or` filter over the searchable columns
fn search_filter(term: &str) -> String {
    let escaped = term.replace('\\', "\\\\").replace('"', "\\\"");
    let pattern = format!("\"*{}*\"", escaped);
    let clause = format!(
        "(name.ilike.{p},code.ilike.{p},full_name.ilike.{p})",
        p = pattern
    );
    format!("or={}", urlencoding::encode(&clause))
}

/// Only products staff may see and sell
const ELIGIBLE_FILTER: &str = "is_active=eq.true&allows_sale=eq.true";

fn products_query(query: &ProductQuery) -> String {
    let mut parts = vec!["select=*".to_string(), ELIGIBLE_FILTER.to_string()];
    match query {
        ProductQuery::All => {}
        ProductQuery::Category(name) => parts.push(eq_filter("category_name", name)),
        ProductQuery::Search(term) if term.trim().is_empty() => {}
        ProductQuery::Search(term) => parts.push(search_filter(term.trim())),
    }
    parts.push(format!("order={}", PRODUCT_ORDER));
    parts.join("&")
}

fn product_by_id_query(id: &ProductId) -> String {
    format!(
        "select=*&{}&{}&limit=1",
        eq_filter("kiotviet_id", &id.to_string()),
        ELIGIBLE_FILTER
    )
}

#[async_trait]
impl CatalogStore for PostgrestStore {
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, FetchError> {
        let rows: Vec<ProductRecord> = self
            .select(CatalogResource::Products, PRODUCTS_TABLE, &products_query(query))
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn list_categories(&self) -> Result<Vec<ProductCategory>, FetchError> {
        let rows: Vec<CategoryRecord> = self
            .select(
                CatalogResource::Categories,
                CATEGORIES_TABLE,
                "select=*&glt_is_active=eq.true&order=rank.asc",
            )
            .await?;
        Ok(rows.into_iter().map(ProductCategory::from).collect())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, FetchError> {
        let query = product_by_id_query(id);
        let rows: Vec<ProductRecord> = self
            .select(CatalogResource::Products, PRODUCTS_TABLE, &query)
            .await?;
        Ok(rows.into_iter().next().map(Product::from))
    }

    async fn read_favorite(&self, id: &ProductId) -> Result<Option<bool>, ToggleError> {
        let query = format!(
            "select={}&{}&limit=1",
            FAVORITE_COLUMNS,
            eq_filter("kiotviet_id", &id.to_string())
        );
        let reply = self
            .send(HttpRequest::get(self.table_url(PRODUCTS_TABLE, &query)))
            .await
            .and_then(HttpReply::error_for_status)
            .map_err(|e| ToggleError::Read(describe_client_error(e)))?;

        let rows: Vec<FavoriteRecord> = reply
            .json()
            .map_err(|e| ToggleError::Read(e.to_string()))?;
        Ok(rows
            .into_iter()
            .next()
            .map(|row| row.glt_labelprint_favorite.unwrap_or(false)))
    }

    async fn write_favorite(
        &self,
        id: &ProductId,
        favorite: bool,
    ) -> Result<Option<bool>, ToggleError> {
        let query = format!(
            "{}&select={}",
            eq_filter("kiotviet_id", &id.to_string()),
            FAVORITE_COLUMNS
        );
        let request = HttpRequest::patch(self.table_url(PRODUCTS_TABLE, &query))
            .header("Prefer", "return=representation")
            .json(json!({ "glt_labelprint_favorite": favorite }));

        let reply = self
            .send(request)
            .await
            .and_then(HttpReply::error_for_status)
            .map_err(|e| ToggleError::Write(describe_client_error(e)))?;

        let rows: Vec<FavoriteRecord> = reply
            .json()
            .map_err(|e| ToggleError::Write(e.to_string()))?;
        Ok(rows
            .into_iter()
            .next()
            .map(|row| row.glt_labelprint_favorite.unwrap_or(false)))
    }

    async fn ping(&self) -> Result<(), FetchError> {
        let _: Vec<serde_json::Value> = self
            .select(
                CatalogResource::Products,
                PRODUCTS_TABLE,
                "select=kiotviet_id&limit=1",
            )
            .await?;
        Ok(())
    }

    async fn database_info(&self) -> Result<DatabaseInfo, FetchError> {
        let products_count = self.count(CatalogResource::Products, PRODUCTS_TABLE).await?;
        let categories_count = self
            .count(CatalogResource::Categories, CATEGORIES_TABLE)
            .await?;
        Ok(DatabaseInfo {
            products_count,
            categories_count,
            last_updated: chrono::Utc::now(),
        })
    }
}

fn describe_client_error(err: ClientError) -> String {
    match err {
        ClientError::Status { status, body } => {
            format!("status {}: {}", status, PostgrestErrorBody::parse(&body).describe())
        }
        other => other.to_string(),
    }
}
