//! Category derivation, counting and filtering

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use super::rice::category_color;
use crate::models::{FAVORITE_CATEGORY_NAME, Product, ProductCategory, ProductId};

/// Bucket key for the unfiltered view
pub const ALL_BUCKET_KEY: &str = "all";

/// Which products a category filter lets through
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelection {
    /// No filter
    All,
    /// Products flagged favorite
    #[default]
    Favorite,
    /// Products whose `category_name` equals the given name
    Category(String),
}

impl CategorySelection {
    /// `None` and `"all"` select everything, `"favorite"` the favorites,
    /// anything else a category by name
    pub fn parse(selection: Option<&str>) -> Self {
        match selection {
            None | Some(ALL_BUCKET_KEY) => Self::All,
            Some(FAVORITE_CATEGORY_NAME) => Self::Favorite,
            Some(name) => Self::Category(name.to_string()),
        }
    }

    /// Bucket key matching [`CategoryBucket::key`]
    pub fn key(&self) -> &str {
        match self {
            Self::All => ALL_BUCKET_KEY,
            Self::Favorite => FAVORITE_CATEGORY_NAME,
            Self::Category(name) => name,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Favorite => product.favorite,
            Self::Category(name) => product.category_name == *name,
        }
    }
}

impl From<Option<&str>> for CategorySelection {
    fn from(selection: Option<&str>) -> Self {
        Self::parse(selection)
    }
}

/// One entry of the category filter bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBucket {
    pub key: String,
    pub label: String,
    pub color: String,
    pub count: usize,
}

/// One category per distinct `category_name`, in first-seen order
///
/// Ranks run 1..=N in that order. The id is taken from the first product of
/// the category when it is numeric; otherwise it is the rank offset past the
/// largest numeric product id, so ids stay unique.
pub fn derive_categories(products: &[Product]) -> Vec<ProductCategory> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut categories = Vec::new();
    let max_numeric_id = products
        .iter()
        .filter_map(|p| match p.id {
            ProductId::Int(id) => Some(id),
            ProductId::Text(_) => None,
        })
        .max()
        .unwrap_or(0)
        .max(0);

    for product in products {
        if !seen.insert(product.category_name.as_str()) {
            continue;
        }
        let rank = categories.len() as i32 + 1;
        let category_id = match product.id {
            ProductId::Int(id) => id,
            ProductId::Text(_) => max_numeric_id.saturating_add(rank as i64),
        };
        categories.push(ProductCategory {
            category_id,
            category_name: product.category_name.clone(),
            retailer_id: None,
            rank,
            color_border: category_color(&product.category_name).to_string(),
            active: true,
            created_date: None,
            modified_date: None,
        });
    }

    categories
}

/// Count products of a category; the `"favorite"` sentinel counts favorites
pub fn count_for_category(products: &[Product], category: &str) -> usize {
    if category == FAVORITE_CATEGORY_NAME {
        return products.iter().filter(|p| p.favorite).count();
    }
    products
        .iter()
        .filter(|p| p.category_name == category)
        .count()
}

pub fn filter_by_category(products: &[Product], selection: &CategorySelection) -> Vec<Product> {
    products
        .iter()
        .filter(|p| selection.matches(p))
        .cloned()
        .collect()
}

/// Favorite bucket, then "all", then categories by ascending rank
pub fn category_buckets(
    products: &[Product],
    categories: &[ProductCategory],
) -> Vec<CategoryBucket> {
    let favorite = ProductCategory::favorite();
    let mut ordered: Vec<&ProductCategory> =
        categories.iter().filter(|c| !c.is_favorite()).collect();
    ordered.sort_by_key(|c| c.rank);

    let mut buckets = Vec::with_capacity(ordered.len() + 2);
    buckets.push(CategoryBucket {
        key: FAVORITE_CATEGORY_NAME.to_string(),
        label: FAVORITE_CATEGORY_NAME.to_string(),
        color: favorite.color_border,
        count: count_for_category(products, FAVORITE_CATEGORY_NAME),
    });
    buckets.push(CategoryBucket {
        key: ALL_BUCKET_KEY.to_string(),
        label: ALL_BUCKET_KEY.to_string(),
        color: crate::models::FALLBACK_COLOR.to_string(),
        count: products.len(),
    });
    buckets.extend(ordered.into_iter().map(|c| CategoryBucket {
        key: c.category_name.clone(),
        label: c.category_name.clone(),
        color: c.color_border.clone(),
        count: count_for_category(products, &c.category_name),
    }));
    buckets
}

/// Manual sort key ascending with nulls last, ties broken by name
///
/// Names compare case-insensitively. Stores with their own collation should
/// order rows themselves.
pub fn sort_products(products: &mut [Product]) {
    products.sort_by(|a, b| {
        let by_key = match (a.sort_order, b.sort_order) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_key.then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

/// Case-insensitive substring match on name, code or full name
pub fn matches_search(product: &Product, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    [&product.name, &product.code, &product.full_name]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}
