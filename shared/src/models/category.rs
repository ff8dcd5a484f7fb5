//! Category Model

use serde::{Deserialize, Serialize};

/// Name of the synthetic favorite pseudo-category (also the filter sentinel)
pub const FAVORITE_CATEGORY_NAME: &str = "favorite";
/// Fixed id of the favorite pseudo-category, never persisted
pub const FAVORITE_CATEGORY_ID: i64 = 999_999;
pub const FAVORITE_COLOR: &str = "#ff4d4f";
/// Border color for categories without a usable color
pub const FALLBACK_COLOR: &str = "#95a5a6";

/// Product category entity
///
/// `category_name` is the soft join key against [`super::Product::category_name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    pub category_id: i64,
    pub category_name: String,
    #[serde(default)]
    pub retailer_id: Option<i64>,
    /// Display order, ascending
    #[serde(default)]
    pub rank: i32,
    #[serde(default = "default_color")]
    pub color_border: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
}

fn default_color() -> String {
    FALLBACK_COLOR.to_string()
}

fn default_true() -> bool {
    true
}

impl ProductCategory {
    /// The client-side favorite pseudo-category; rank 0 puts it first
    pub fn favorite() -> Self {
        Self {
            category_id: FAVORITE_CATEGORY_ID,
            category_name: FAVORITE_CATEGORY_NAME.to_string(),
            retailer_id: None,
            rank: 0,
            color_border: FAVORITE_COLOR.to_string(),
            active: true,
            created_date: None,
            modified_date: None,
        }
    }

    pub fn is_favorite(&self) -> bool {
        self.category_id == FAVORITE_CATEGORY_ID && self.category_name == FAVORITE_CATEGORY_NAME
    }
}

/// Accept `#rgb`, `#rrggbb` and `#rrggbbaa`; anything else falls back
pub fn normalize_color(color: Option<&str>) -> String {
    match color.map(str::trim) {
        Some(c)
            if c.starts_with('#')
                && matches!(c.len(), 4 | 7 | 9)
                && c[1..].chars().all(|ch| ch.is_ascii_hexdigit()) =>
        {
            c.to_ascii_lowercase()
        }
        _ => FALLBACK_COLOR.to_string(),
    }
}
