//! Page cache for the catalog read path.
//!
//! Thread-safe map of cache key → paginated result with an expiry
//! instant. An expired entry is treated as absent; there is no
//! single-flight guarantee, so concurrent misses for the same key may
//! each recompute. The computation is deterministic per page, making
//! last-write-wins on the entry safe.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::catalog::types::ProductPage;

struct CacheEntry {
    page: ProductPage,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// TTL'd store of paginated results.
#[derive(Default)]
pub struct PageCache {
    inner: DashMap<String, CacheEntry>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch an unexpired entry. Expired entries are left in place to be
    /// overwritten by the next fill.
    pub fn get(&self, key: &str) -> Option<ProductPage> {
        let entry = self.inner.get(key)?;
        if entry.is_expired(Instant::now()) {
            None
        } else {
            Some(entry.page.clone())
        }
    }

    /// Store a result, overwriting any previous entry for the key.
    pub fn put(&self, key: String, page: ProductPage, ttl: Duration) {
        self.inner.insert(
            key,
            CacheEntry {
                page,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Drop an entry, forcing the next read to recompute.
    pub fn invalidate(&self, key: &str) {
        self.inner.remove(key);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
