//! Raw storage records and their mapping into shared models

use serde::Deserialize;
use shared::models::{Product, ProductCategory, ProductId, normalize_color};

/// One `kv_products` row
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub kiotviet_id: ProductId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub allows_sale: Option<bool>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub glt_gallery_original_url: Option<String>,
    #[serde(default)]
    pub glt_labelprint_favorite: Option<bool>,
    #[serde(default)]
    pub glt_sort_order: Option<i32>,
}

impl From<ProductRecord> for Product {
    fn from(row: ProductRecord) -> Self {
        Product {
            id: row.kiotviet_id,
            name: row.name.unwrap_or_default(),
            full_name: row.full_name.unwrap_or_default(),
            code: row.code.unwrap_or_default(),
            price: row.base_price,
            base_price: row.base_price,
            category_name: row.category_name.unwrap_or_default(),
            is_active: row.is_active.unwrap_or(false),
            allows_sale: row.allows_sale.unwrap_or(false),
            unit: row.unit,
            weight: row.weight,
            images: row.images.unwrap_or_default(),
            gallery_original_url: row.glt_gallery_original_url,
            sort_order: row.glt_sort_order,
            favorite: row.glt_labelprint_favorite.unwrap_or(false),
        }
    }
}

/// One `kv_product_categories` row
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    pub category_id: i64,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub retailer_id: Option<i64>,
    #[serde(default)]
    pub modified_date: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub rank: Option<i32>,
    #[serde(default)]
    pub glt_is_active: Option<bool>,
    #[serde(default)]
    pub glt_color_border: Option<String>,
}

impl From<CategoryRecord> for ProductCategory {
    fn from(row: CategoryRecord) -> Self {
        ProductCategory {
            category_id: row.category_id,
            category_name: row.category_name.unwrap_or_default(),
            retailer_id: row.retailer_id,
            rank: row.rank.unwrap_or_default(),
            color_border: normalize_color(row.glt_color_border.as_deref()),
            active: row.glt_is_active.unwrap_or(false),
            created_date: row.created_date,
            modified_date: row.modified_date,
        }
    }
}

/// Projection used by the favorite read and write
#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteRecord {
    pub kiotviet_id: ProductId,
    #[serde(default)]
    pub glt_labelprint_favorite: Option<bool>,
}

/// PostgREST error payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostgrestErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl PostgrestErrorBody {
    /// Parse an error body; non-JSON bodies become the message
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| Self {
            message: Some(body.trim().to_string()).filter(|m| !m.is_empty()),
            ..Default::default()
        })
    }

    pub fn describe(&self) -> String {
        match (&self.message, &self.details) {
            (Some(m), Some(d)) => format!("{} ({})", m, d),
            (Some(m), None) => m.clone(),
            (None, Some(d)) => d.clone(),
            (None, None) => "no error message".to_string(),
        }
    }
}
