//! In-process catalog store

use super::{CatalogStore, ProductQuery};
use async_trait::async_trait;
use shared::catalog::{matches_search, sort_products};
use shared::error::{FetchError, ToggleError};
use shared::models::{DatabaseInfo, Product, ProductCategory, ProductId};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Catalog rows held in memory, with the same filter and order rules as the
/// hosted store
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    categories: RwLock<Vec<ProductCategory>>,
    offline: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new(products: Vec<Product>, categories: Vec<ProductCategory>) -> Self {
        Self {
            products: RwLock::new(products),
            categories: RwLock::new(categories),
            ..Default::default()
        }
    }

    /// Simulate an unreachable store
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of successful favorite writes
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw rows, ignoring eligibility filters
    pub async fn snapshot(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    pub async fn upsert_product(&self, product: Product) {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => products.push(product),
        }
    }

    fn ensure_online(&self) -> Result<(), FetchError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(FetchError::Unreachable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, FetchError> {
        self.ensure_online()?;
        let mut products: Vec<Product> = self
            .products
            .read()
            .await
            .iter()
            .filter(|p| p.is_eligible())
            .filter(|p| match query {
                ProductQuery::All => true,
                ProductQuery::Category(name) => p.category_name == *name,
                ProductQuery::Search(term) => matches_search(p, term),
            })
            .cloned()
            .collect();
        sort_products(&mut products);
        Ok(products)
    }

    async fn list_categories(&self) -> Result<Vec<ProductCategory>, FetchError> {
        self.ensure_online()?;
        let mut categories: Vec<ProductCategory> = self
            .categories
            .read()
            .await
            .iter()
            .filter(|c| c.active)
            .cloned()
            .collect();
        categories.sort_by_key(|c| c.rank);
        Ok(categories)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, FetchError> {
        self.ensure_online()?;
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|p| p.id == *id && p.is_eligible())
            .cloned())
    }

    async fn read_favorite(&self, id: &ProductId) -> Result<Option<bool>, ToggleError> {
        self.ensure_online()
            .map_err(|e| ToggleError::Read(e.to_string()))?;
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|p| p.id == *id)
            .map(|p| p.favorite))
    }

    async fn write_favorite(
        &self,
        id: &ProductId,
        favorite: bool,
    ) -> Result<Option<bool>, ToggleError> {
        self.ensure_online()
            .map_err(|e| ToggleError::Write(e.to_string()))?;
        let mut products = self.products.write().await;
        let Some(product) = products.iter_mut().find(|p| p.id == *id) else {
            return Ok(None);
        };
        product.favorite = favorite;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(Some(product.favorite))
    }

    async fn ping(&self) -> Result<(), FetchError> {
        self.ensure_online()
    }

    async fn database_info(&self) -> Result<DatabaseInfo, FetchError> {
        self.ensure_online()?;
        Ok(DatabaseInfo {
            products_count: self.products.read().await.len() as u64,
            categories_count: self.categories.read().await.len() as u64,
            last_updated: chrono::Utc::now(),
        })
    }
}
