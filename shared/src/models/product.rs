//! Product Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable external product key
///
/// The upstream store uses numeric ids, older exports used strings. Both are
/// accepted on the wire; numeric strings parse to [`ProductId::Int`] so that
/// ids coming from URL paths compare equal to ids coming from the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{}", id),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(Self::Int)
            .unwrap_or_else(|_| Self::Text(s.to_string())))
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        id.parse().unwrap_or_else(|_| Self::Text(id.to_string()))
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::from(id.as_str())
    }
}

/// Unit of the only retail-printable rice products
pub const RETAIL_UNIT: &str = "kg";

/// Product entity as served to the portal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub code: String,
    /// Mirrors `base_price`
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub allows_sale: bool,
    #[serde(default)]
    pub unit: Option<String>,
    /// Weight in grams
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub gallery_original_url: Option<String>,
    /// Manual sort key, ascending, nulls last
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub favorite: bool,
}

impl Product {
    /// Only active and sellable products are shown
    pub fn is_eligible(&self) -> bool {
        self.is_active && self.allows_sale
    }

    /// Price used for display; absence is treated as zero
    pub fn display_price(&self) -> f64 {
        self.base_price.unwrap_or(0.0)
    }

    /// First image, then the gallery original
    pub fn display_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .or(self.gallery_original_url.as_deref())
    }

    pub fn is_retail_unit(&self) -> bool {
        self.unit.as_deref() == Some(RETAIL_UNIT)
    }
}
