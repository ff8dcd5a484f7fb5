//! Local-wins favorite merge

use std::collections::HashMap;

use crate::models::{Product, ProductId};

/// Merge a fresh fetch with the products currently held locally
///
/// For every fresh product whose id also exists in `previous`, the previous
/// `favorite` flag wins; ids only present in `fresh` keep the fetched flag.
/// Output order and length follow `fresh`. This is a last-writer-wins policy
/// per field, keyed by id: a refetch that has not yet observed a confirmed
/// local toggle cannot undo it.
pub fn merge_favorite_state(fresh: Vec<Product>, previous: &[Product]) -> Vec<Product> {
    let local: HashMap<&ProductId, bool> = previous.iter().map(|p| (&p.id, p.favorite)).collect();

    fresh
        .into_iter()
        .map(|mut product| {
            if let Some(&favorite) = local.get(&product.id) {
                product.favorite = favorite;
            }
            product
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, favorite: bool) -> Product {
        Product {
            id: ProductId::Int(id),
            name: format!("P{}", id),
            full_name: String::new(),
            code: format!("C{}", id),
            price: None,
            base_price: Some(1000.0 * id as f64),
            category_name: "Gạo dẻo".into(),
            is_active: true,
            allows_sale: true,
            unit: Some("kg".into()),
            weight: None,
            images: vec![],
            gallery_original_url: None,
            sort_order: None,
            favorite,
        }
    }

    #[test]
    fn test_previous_flag_wins_for_shared_ids() {
        let previous = vec![product(1, true), product(2, false)];
        let fresh = vec![product(2, true), product(1, false), product(3, true)];

        let merged = merge_favorite_state(fresh, &previous);

        let view: Vec<_> = merged.iter().map(|p| (p.id.clone(), p.favorite)).collect();
        assert_eq!(
            view,
            vec![
                (ProductId::Int(2), false),
                (ProductId::Int(1), true),
                (ProductId::Int(3), true),
            ]
        );
    }

    #[test]
    fn test_other_fields_come_from_fresh() {
        let mut stale = product(1, true);
        stale.name = "old name".into();
        let merged = merge_favorite_state(vec![product(1, false)], &[stale]);
        assert_eq!(merged[0].name, "P1");
        assert!(merged[0].favorite);
    }

    #[test]
    fn test_dropped_products_do_not_reappear() {
        let previous = vec![product(1, true), product(9, true)];
        let merged = merge_favorite_state(vec![product(1, false)], &previous);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_empty_previous_keeps_fresh() {
        let fresh = vec![product(1, true), product(2, false)];
        assert_eq!(merge_favorite_state(fresh.clone(), &[]), fresh);
    }
}
