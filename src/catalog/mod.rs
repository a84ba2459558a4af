//! Product catalog subsystem.
//!
//! # Data Flow
//! ```text
//! Handler
//!     → read_path.rs (cache key lookup, fill on miss)
//!     → store.rs (hydrate associations, slice the page)
//!     → types.rs (ProductPage back up the stack)
//! ```
//!
//! # Design Decisions
//! - The store is a trait seam; the in-memory implementation stands in
//!   for the external persistent store
//! - A page past the end is an empty result, not an error
//! - Store failures are terminal for the request (500, no partial body)

pub mod read_path;
pub mod store;
pub mod types;

pub use read_path::CachedListing;
pub use store::{CatalogStore, InMemoryCatalog, StoreError};
pub use types::{Product, ProductPage};
