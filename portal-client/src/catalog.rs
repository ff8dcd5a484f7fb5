//! Catalog service: remote fetch adapter and favorite toggle

use crate::store::{CatalogStore, ProductQuery};
use shared::error::{FetchError, ToggleError};
use shared::models::{Catalog, DatabaseInfo, Product, ProductId};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Reads the catalog and flips favorite flags through a [`CatalogStore`]
///
/// Product rows keep the order the store returned them in.
///
/// Every read is bounded by the configured timeout. Nothing is retried; a
/// failure surfaces to the caller immediately.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    timeout: Duration,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, FetchError>>,
    ) -> Result<T, FetchError> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| FetchError::Timeout(self.timeout.as_secs()))?
    }

    /// Eligible products plus active categories
    pub async fn fetch_catalog(&self) -> Result<Catalog, FetchError> {
        let (products, mut categories) = self
            .bounded(async {
                tokio::try_join!(
                    self.store.list_products(&ProductQuery::All),
                    self.store.list_categories()
                )
            })
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Catalog fetch failed"))?;

        categories.sort_by_key(|c| c.rank);

        tracing::debug!(
            products = products.len(),
            categories = categories.len(),
            "Catalog fetched"
        );
        Ok(Catalog {
            products,
            categories,
        })
    }

    pub async fn fetch_products_by_category(&self, category: &str) -> Result<Vec<Product>, FetchError> {
        let query = ProductQuery::Category(category.to_string());
        self.bounded(self.store.list_products(&query)).await
    }

    /// Empty term returns every eligible product
    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, FetchError> {
        let query = if term.trim().is_empty() {
            ProductQuery::All
        } else {
            ProductQuery::Search(term.trim().to_string())
        };
        self.bounded(self.store.list_products(&query)).await
    }

    pub async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, FetchError> {
        self.bounded(self.store.get_product(id)).await
    }

    /// Flip the favorite flag and return the value the store confirmed
    ///
    /// One read and one write. Concurrent toggles of the same product are not
    /// coordinated: the last write wins.
    pub async fn toggle_favorite(&self, id: &ProductId) -> Result<bool, ToggleError> {
        let current = self
            .store
            .read_favorite(id)
            .await?
            .ok_or_else(|| ToggleError::not_found(id))?;

        let confirmed = self
            .store
            .write_favorite(id, !current)
            .await?
            .ok_or_else(|| ToggleError::not_found(id))?;

        tracing::info!(product_id = %id, favorite = confirmed, "Favorite toggled");
        Ok(confirmed)
    }

    /// `true` when a one-row ping succeeds; failures are logged only
    pub async fn check_connection(&self) -> bool {
        match self.bounded(self.store.ping()).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Catalog store connection check failed");
                false
            }
        }
    }

    pub async fn database_info(&self) -> Result<DatabaseInfo, FetchError> {
        self.bounded(self.store.database_info()).await
    }
}
