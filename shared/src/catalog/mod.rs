//! Catalog derivation, filtering and merge rules
//!
//! Everything here is pure and synchronous. The category list shown to staff
//! is always derived from the current product set, so products and
//! categories cannot disagree about which categories have members. The one
//! exception is the favorite pseudo-category, whose membership comes from
//! [`Product::favorite`](crate::models::Product::favorite).

mod filter;
mod merge;
mod rice;

pub use filter::{
    CategoryBucket, CategorySelection, ALL_BUCKET_KEY, category_buckets, count_for_category,
    derive_categories, filter_by_category, matches_search, sort_products,
};
pub use merge::merge_favorite_state;
pub use rice::{
    RICE_CATEGORIES, category_color, is_rice_category, retail_rice_products,
    rice_category_products,
};
