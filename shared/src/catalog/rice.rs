//! Rice category table and the retail label view

use crate::models::{FALLBACK_COLOR, Product};

/// The six rice categories shown on the label page, with their display colors
pub const RICE_CATEGORIES: [(&str, &str); 6] = [
    ("Gạo nở", "#ff6b6b"),
    ("Gạo dẻo", "#4ecdc4"),
    ("Lúa - Gạo Lứt", "#45b7d1"),
    ("Nếp", "#96ceb4"),
    ("Gạo chính hãng", "#feca57"),
    ("Tấm", "#ff9ff3"),
];

/// Fixed name → color lookup, unknown names get the fallback color
pub fn category_color(category_name: &str) -> &'static str {
    RICE_CATEGORIES
        .iter()
        .find(|(name, _)| *name == category_name)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

pub fn is_rice_category(category_name: &str) -> bool {
    RICE_CATEGORIES.iter().any(|(name, _)| *name == category_name)
}

/// Products in one of the rice categories, any unit
pub fn rice_category_products(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| is_rice_category(&p.category_name))
        .cloned()
        .collect()
}

/// Rice products sold by the kilogram; the set the label page prints for
pub fn retail_rice_products(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| is_rice_category(&p.category_name) && p.is_retail_unit())
        .cloned()
        .collect()
}
