//! Response shaping.
//!
//! The projection boundary: internal entity shape is never exposed
//! verbatim. Each shaped product carries only the allow-listed fields;
//! association ids stay inside.

use serde::Serialize;

use crate::catalog::types::{Product, ProductPage, Review};

#[derive(Debug, Clone, Serialize)]
pub struct ShapedReview {
    pub rating: u8,
    pub comment: String,
    pub user: String,
}

impl From<&Review> for ShapedReview {
    fn from(review: &Review) -> Self {
        Self {
            rating: review.rating,
            comment: review.comment.clone(),
            user: review.user.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShapedProduct {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub reviews: Vec<ShapedReview>,
}

impl From<&Product> for ShapedProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            category: product.category.name.clone(),
            tags: product.tags.iter().map(|t| t.name.clone()).collect(),
            reviews: product.reviews.iter().map(ShapedReview::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

/// The stable success envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ListingBody {
    pub success: bool,
    pub data: Vec<ShapedProduct>,
    pub pagination: Pagination,
}

/// Shape one page into the external contract.
pub fn shape_listing(page: &ProductPage) -> ListingBody {
    ListingBody {
        success: true,
        data: page.items.iter().map(ShapedProduct::from).collect(),
        pagination: Pagination {
            current_page: page.current_page,
            last_page: page.last_page,
            per_page: page.per_page,
            total: page.total,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::{CatalogStore, InMemoryCatalog};

    #[test]
    fn projection_exposes_only_the_allow_list() {
        let store = InMemoryCatalog::with_fixtures();
        let page = store.page(1, 10).unwrap();
        let body = shape_listing(&page);

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["success"], true);

        let product = &value["data"][0];
        let object = product.as_object().unwrap();
        assert_eq!(object.len(), 7);
        for key in ["id", "name", "price", "description", "category", "tags", "reviews"] {
            assert!(object.contains_key(key), "missing allow-listed key {key}");
        }
        // Association ids from the internal shape must not leak.
        assert!(product.get("category_id").is_none());
        assert_eq!(product["category"], "Audio");

        let review = &product["reviews"][0];
        assert!(review.get("user_id").is_none());
        assert_eq!(review["user"], "Marta Kline");
    }

    #[test]
    fn pagination_block_matches_the_page() {
        let store = InMemoryCatalog::with_fixtures();
        let page = store.page(2, 10).unwrap();
        let body = shape_listing(&page);

        assert_eq!(body.pagination.current_page, 2);
        assert_eq!(body.pagination.last_page, 2);
        assert_eq!(body.pagination.per_page, 10);
        assert_eq!(body.pagination.total, 12);
        assert_eq!(body.data.len(), 2);
    }
}
