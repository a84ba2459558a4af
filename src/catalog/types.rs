//! Catalog entity types.
//!
//! These are the hydrated, store-internal shapes: association ids are
//! still present. The API boundary only ever sees the projection in
//! `http::resource`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reviewer {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    pub product_id: u64,
    pub rating: u8,
    pub comment: String,
    pub user: Reviewer,
}

/// A product with its associations loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: Category,
    pub tags: Vec<Tag>,
    pub reviews: Vec<Review>,
}

/// One page of products plus pagination facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl ProductPage {
    /// Build a page, deriving `last_page` from the total count. An empty
    /// collection still has one (empty) page.
    pub fn new(items: Vec<Product>, current_page: u32, per_page: u32, total: u64) -> Self {
        let last_page = (total.div_ceil(per_page as u64)).max(1) as u32;
        Self {
            items,
            current_page,
            last_page,
            per_page,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_rounds_up() {
        assert_eq!(ProductPage::new(Vec::new(), 1, 10, 0).last_page, 1);
        assert_eq!(ProductPage::new(Vec::new(), 1, 10, 10).last_page, 1);
        assert_eq!(ProductPage::new(Vec::new(), 1, 10, 11).last_page, 2);
        assert_eq!(ProductPage::new(Vec::new(), 1, 10, 25).last_page, 3);
    }
}
