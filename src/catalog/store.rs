//! Catalog store seam and the in-memory implementation.

use std::collections::HashMap;

use thiserror::Error;

use crate::catalog::types::{Category, Product, ProductPage, Review, Reviewer, Tag};

/// Failure in the backing store. Terminal for the request.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
    #[error("referential integrity violation: {0}")]
    Integrity(String),
}

/// Queries entities with nested association projection and offset-based
/// pagination. The external persistent store collaborator.
pub trait CatalogStore: Send + Sync {
    fn page(&self, page: u32, per_page: u32) -> Result<ProductPage, StoreError>;
}

/// Normalized product row; associations are attached at query time.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category_id: u64,
}

/// Normalized review row.
#[derive(Debug, Clone)]
pub struct ReviewRow {
    pub id: u64,
    pub product_id: u64,
    pub rating: u8,
    pub comment: String,
    pub user_id: u64,
}

/// In-memory catalog with normalized tables, hydrated per query.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: Vec<ProductRow>,
    categories: HashMap<u64, Category>,
    tags_by_product: HashMap<u64, Vec<Tag>>,
    reviews: Vec<ReviewRow>,
    reviewers: HashMap<u64, Reviewer>,
}

impl InMemoryCatalog {
    pub fn new(
        products: Vec<ProductRow>,
        categories: Vec<Category>,
        tags_by_product: HashMap<u64, Vec<Tag>>,
        reviews: Vec<ReviewRow>,
        reviewers: Vec<Reviewer>,
    ) -> Self {
        Self {
            products,
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            tags_by_product,
            reviews,
            reviewers: reviewers.into_iter().map(|r| (r.id, r)).collect(),
        }
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Attach category, tags, and reviews (with reviewer names) to a row.
    fn hydrate(&self, row: &ProductRow) -> Result<Product, StoreError> {
        let category = self
            .categories
            .get(&row.category_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::Integrity(format!(
                    "product {} references missing category {}",
                    row.id, row.category_id
                ))
            })?;

        let tags = self
            .tags_by_product
            .get(&row.id)
            .cloned()
            .unwrap_or_default();

        let mut reviews = Vec::new();
        for review in self.reviews.iter().filter(|r| r.product_id == row.id) {
            let user = self
                .reviewers
                .get(&review.user_id)
                .cloned()
                .ok_or_else(|| {
                    StoreError::Integrity(format!(
                        "review {} references missing user {}",
                        review.id, review.user_id
                    ))
                })?;
            reviews.push(Review {
                id: review.id,
                product_id: review.product_id,
                rating: review.rating,
                comment: review.comment.clone(),
                user,
            });
        }

        Ok(Product {
            id: row.id,
            name: row.name.clone(),
            price: row.price,
            description: row.description.clone(),
            category,
            tags,
            reviews,
        })
    }

    /// Demo catalog: twelve products over three categories, so the
    /// default page size of ten yields two pages.
    pub fn with_fixtures() -> Self {
        let categories = vec![
            Category { id: 1, name: "Audio".into() },
            Category { id: 2, name: "Lighting".into() },
            Category { id: 3, name: "Accessories".into() },
        ];
        let reviewers = vec![
            Reviewer { id: 100, name: "Marta Kline".into() },
            Reviewer { id: 101, name: "Jonas Petit".into() },
            Reviewer { id: 102, name: "Ana Costa".into() },
        ];

        let names: [(&str, f64, u64); 12] = [
            ("Studio Headphones", 129.90, 1),
            ("Desk Lamp", 39.50, 2),
            ("USB Microphone", 89.00, 1),
            ("Monitor Stand", 24.99, 3),
            ("Ring Light", 54.30, 2),
            ("Cable Organizer", 9.99, 3),
            ("Bookshelf Speakers", 219.00, 1),
            ("Smart Bulb", 17.25, 2),
            ("Laptop Sleeve", 29.00, 3),
            ("Audio Interface", 159.00, 1),
            ("Floor Lamp", 74.80, 2),
            ("Webcam Mount", 14.50, 3),
        ];
        let products = names
            .iter()
            .enumerate()
            .map(|(i, (name, price, category_id))| ProductRow {
                id: i as u64 + 1,
                name: (*name).to_string(),
                price: *price,
                description: format!("{} from the demo catalog", name),
                category_id: *category_id,
            })
            .collect();

        let mut tags_by_product: HashMap<u64, Vec<Tag>> = HashMap::new();
        tags_by_product.insert(
            1,
            vec![
                Tag { id: 1, name: "wired".into() },
                Tag { id: 2, name: "over-ear".into() },
            ],
        );
        tags_by_product.insert(3, vec![Tag { id: 3, name: "condenser".into() }]);
        tags_by_product.insert(5, vec![Tag { id: 4, name: "dimmable".into() }]);
        tags_by_product.insert(7, vec![Tag { id: 5, name: "passive".into() }]);

        let reviews = vec![
            ReviewRow {
                id: 1,
                product_id: 1,
                rating: 5,
                comment: "Crisp highs, comfortable for long sessions.".into(),
                user_id: 100,
            },
            ReviewRow {
                id: 2,
                product_id: 1,
                rating: 4,
                comment: "Cable could be longer.".into(),
                user_id: 101,
            },
            ReviewRow {
                id: 3,
                product_id: 3,
                rating: 5,
                comment: "Great value for podcasting.".into(),
                user_id: 102,
            },
            ReviewRow {
                id: 4,
                product_id: 7,
                rating: 3,
                comment: "Needs a beefier amp than advertised.".into(),
                user_id: 101,
            },
        ];

        Self::new(products, categories, tags_by_product, reviews, reviewers)
    }
}

impl CatalogStore for InMemoryCatalog {
    fn page(&self, page: u32, per_page: u32) -> Result<ProductPage, StoreError> {
        let total = self.products.len() as u64;
        // Page 0 is clamped to the first page rather than underflowing.
        let offset = (page.saturating_sub(1) as usize).saturating_mul(per_page as usize);

        let mut items = Vec::new();
        for row in self.products.iter().skip(offset).take(per_page as usize) {
            items.push(self.hydrate(row)?);
        }

        Ok(ProductPage::new(items, page, per_page, total))
    }
}
