//! Cached read path over the catalog store.
//!
//! Cache key is the configured namespace with the page number appended
//! (e.g. `products_page_3`). A hit returns the stored page without
//! touching the store; a miss or expired entry queries the store and
//! fills the cache with the configured TTL.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::PageCache;
use crate::catalog::store::{CatalogStore, StoreError};
use crate::catalog::types::ProductPage;
use crate::config::CacheConfig;
use crate::observability::metrics;

pub struct CachedListing {
    store: Arc<dyn CatalogStore>,
    cache: PageCache,
    namespace: String,
    ttl: Duration,
    per_page: u32,
}

impl CachedListing {
    pub fn new(store: Arc<dyn CatalogStore>, config: &CacheConfig, per_page: u32) -> Self {
        Self {
            store,
            cache: PageCache::new(),
            namespace: config.namespace.clone(),
            ttl: Duration::from_secs(config.ttl_secs),
            per_page,
        }
    }

    fn key(&self, page: u32) -> String {
        format!("{}{}", self.namespace, page)
    }

    /// Fetch one page, serving from cache when fresh.
    pub fn fetch(&self, page: u32) -> Result<ProductPage, StoreError> {
        let key = self.key(page);

        if let Some(hit) = self.cache.get(&key) {
            metrics::record_cache_hit();
            tracing::debug!(key = %key, "Page cache hit");
            return Ok(hit);
        }

        metrics::record_cache_miss();
        tracing::debug!(key = %key, "Page cache miss");

        let fresh = self.store.page(page, self.per_page)?;
        self.cache.put(key, fresh.clone(), self.ttl);
        Ok(fresh)
    }

    /// Drop the cached entry for one page.
    pub fn invalidate(&self, page: u32) {
        self.cache.invalidate(&self.key(page));
    }
}
