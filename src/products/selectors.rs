//! Read-side helpers for listing and searching the catalogue held in state.
//!
//! All selectors preserve the order of the input slice.

use crate::domain::Product;

/// Case-insensitive substring search over name, description and category.
/// A blank query matches everything.
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.iter().collect();
    }
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
        })
        .collect()
}

#[allow(dead_code)]
pub fn in_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    let category = category.trim();
    products
        .iter()
        .filter(|p| p.category.eq_ignore_ascii_case(category))
        .collect()
}

#[allow(dead_code)]
pub fn find<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id == id)
}

/// Distinct non-empty categories in first-seen order.
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for product in products {
        let category = product.category.as_str();
        if !category.is_empty() && !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}
