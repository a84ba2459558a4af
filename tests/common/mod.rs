//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use catalog_api::catalog::store::{CatalogStore, InMemoryCatalog, StoreError};
use catalog_api::catalog::types::ProductPage;
use catalog_api::config::ApiConfig;
use catalog_api::gate::auth::UserDirectory;
use catalog_api::http::HttpServer;
use catalog_api::lifecycle::Shutdown;

/// Store wrapper counting underlying queries.
pub struct CountingStore {
    inner: InMemoryCatalog,
    calls: Arc<AtomicU32>,
}

impl CountingStore {
    pub fn with_fixtures() -> (Arc<Self>, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let store = Arc::new(Self {
            inner: InMemoryCatalog::with_fixtures(),
            calls: calls.clone(),
        });
        (store, calls)
    }
}

impl CatalogStore for CountingStore {
    fn page(&self, page: u32, per_page: u32) -> Result<ProductPage, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.page(page, per_page)
    }
}

/// Store whose every query fails, counting the attempts.
pub struct FailingStore {
    calls: Arc<AtomicU32>,
}

impl FailingStore {
    pub fn new() -> (Arc<Self>, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let store = Arc::new(Self { calls: calls.clone() });
        (store, calls)
    }
}

impl CatalogStore for FailingStore {
    fn page(&self, _page: u32, _per_page: u32) -> Result<ProductPage, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("backing store offline".into()))
    }
}

/// Config that keeps the wall clock out of integration tests: the
/// business-hours window spans the whole day.
pub fn open_config() -> ApiConfig {
    let mut config = ApiConfig::default();
    config.gate.business_hours.start_hour = 0;
    config.gate.business_hours.end_hour = 23;
    config.gate.business_hours.end_inclusive = true;
    config
}

/// Spawn a server on an ephemeral loopback port.
pub async fn spawn_server(
    config: ApiConfig,
    store: Arc<dyn CatalogStore>,
    directory: Arc<UserDirectory>,
) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");

    let shutdown = Shutdown::new();
    let server = HttpServer::with_dependencies(config, store, directory);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Non-pooled client so every request opens a fresh connection.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .expect("build client")
}
