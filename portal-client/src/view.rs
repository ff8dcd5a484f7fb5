//! Local catalog view state

use shared::catalog::{
    CategoryBucket, CategorySelection, category_buckets, derive_categories, filter_by_category,
    merge_favorite_state, retail_rice_products,
};
use shared::models::{Product, ProductCategory, ProductId};

/// Product list, derived categories and the current filter selection
///
/// Three update paths touch the product list: [`replace`](Self::replace)
/// for a first load, [`refresh`](Self::refresh) for later fetches (local
/// favorite flags win) and [`apply_toggle`](Self::apply_toggle) once the
/// store has confirmed a new favorite value.
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    products: Vec<Product>,
    categories: Vec<ProductCategory>,
    selection: CategorySelection,
    retail_only: bool,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to kg-unit rice products (the label printing page)
    pub fn retail() -> Self {
        Self {
            retail_only: true,
            ..Self::default()
        }
    }

    fn scope(&self, products: Vec<Product>) -> Vec<Product> {
        if self.retail_only {
            retail_rice_products(&products)
        } else {
            products
        }
    }

    fn rederive(&mut self) {
        self.categories = derive_categories(&self.products);
    }

    /// Take a fetch result as-is
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = self.scope(products);
        self.rederive();
    }

    /// Take a fetch result, keeping local favorite flags
    pub fn refresh(&mut self, fresh: Vec<Product>) {
        let fresh = self.scope(fresh);
        self.products = merge_favorite_state(fresh, &self.products);
        self.rederive();
    }

    /// Record a confirmed favorite value; `false` when the id is not listed
    pub fn apply_toggle(&mut self, id: &ProductId, favorite: bool) -> bool {
        match self.products.iter_mut().find(|p| p.id == *id) {
            Some(product) => {
                product.favorite = favorite;
                true
            }
            None => false,
        }
    }

    pub fn select(&mut self, selection: CategorySelection) {
        self.selection = selection;
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[ProductCategory] {
        &self.categories
    }

    /// Products passing the current selection
    pub fn visible(&self) -> Vec<Product> {
        filter_by_category(&self.products, &self.selection)
    }

    /// Favorite, all, then each derived category with its count
    pub fn buckets(&self) -> Vec<CategoryBucket> {
        category_buckets(&self.products, &self.categories)
    }
}
