//! Catalog store
//!
//! [`CatalogStore`] is the seam between the service layer and the hosted
//! product/category tables. [`PostgrestStore`] talks to the Supabase REST
//! endpoint; [`MemoryStore`] keeps rows in process for tests and demos.

mod memory;
mod postgrest;
mod records;

pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;
pub use records::{CategoryRecord, FavoriteRecord, PostgrestErrorBody, ProductRecord};

use async_trait::async_trait;
use shared::error::{FetchError, ToggleError};
use shared::models::{DatabaseInfo, Product, ProductCategory, ProductId};

pub const PRODUCTS_TABLE: &str = "kv_products";
pub const CATEGORIES_TABLE: &str = "kv_product_categories";

/// Which products a listing query returns
///
/// All variants are limited to active and sellable products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductQuery {
    All,
    Category(String),
    /// Case-insensitive match on name, code or full name
    Search(String),
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Eligible products, manual sort key first (nulls last), then name
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, FetchError>;

    /// Active categories by rank
    async fn list_categories(&self) -> Result<Vec<ProductCategory>, FetchError>;

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, FetchError>;

    /// Current favorite flag, `None` when no row has this id
    async fn read_favorite(&self, id: &ProductId) -> Result<Option<bool>, ToggleError>;

    /// Persist the flag and return the value the store confirms
    ///
    /// `None` when no row matched.
    async fn write_favorite(
        &self,
        id: &ProductId,
        favorite: bool,
    ) -> Result<Option<bool>, ToggleError>;

    /// One-row connectivity check
    async fn ping(&self) -> Result<(), FetchError>;

    async fn database_info(&self) -> Result<DatabaseInfo, FetchError>;
}
