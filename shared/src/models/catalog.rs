//! Catalog response shapes

use serde::{Deserialize, Serialize};

use super::{Product, ProductCategory};

/// Combined products + categories payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
    #[serde(default, alias = "product_categories")]
    pub categories: Vec<ProductCategory>,
}

/// Row counts reported by the catalog store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub products_count: u64,
    pub categories_count: u64,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_category_key_is_accepted() {
        let json = r#"{"products": [], "product_categories": [
            {"categoryId": 1, "categoryName": "Tấm"}
        ]}"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].category_name, "Tấm");
    }
}
