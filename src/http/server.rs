//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Stack per-route-group pipelines: authenticate → rate limit → gate
//! - Dispatch to the cached read path and shape the response
//!
//! Route groups mirror the policy split: `/products` throttles under the
//! `public` policy, `/user/products` under `authenticated`. Both sit
//! behind the same authorization gate.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Query, State},
    http::{HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::catalog::read_path::CachedListing;
use crate::catalog::store::{CatalogStore, InMemoryCatalog};
use crate::config::ApiConfig;
use crate::gate::auth::UserDirectory;
use crate::gate::checks::GatePipeline;
use crate::gate::context::ResourceRef;
use crate::http::middleware::access_control::{
    authenticate_middleware, gate_middleware, AccessControlState,
};
use crate::http::request::{validate_page, MakeCatalogRequestId, PageParams, X_REQUEST_ID};
use crate::http::resource::shape_listing;
use crate::observability::metrics;
use crate::security::rate_limit::{rate_limit_middleware, RateLimitState, RateLimiter, RatePolicy};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub read_path: Arc<CachedListing>,
}

/// HTTP server for the catalog API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server backed by the fixture catalog and directory.
    pub fn new(config: ApiConfig) -> Self {
        Self::with_dependencies(
            config,
            Arc::new(InMemoryCatalog::with_fixtures()),
            Arc::new(UserDirectory::with_fixtures()),
        )
    }

    /// Create a server with explicit collaborators. Tests use this to
    /// instrument the store.
    pub fn with_dependencies(
        config: ApiConfig,
        store: Arc<dyn CatalogStore>,
        directory: Arc<UserDirectory>,
    ) -> Self {
        let read_path = Arc::new(CachedListing::new(
            store,
            &config.cache,
            config.catalog.per_page,
        ));
        let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
        let access = AccessControlState {
            directory,
            pipeline: Arc::new(GatePipeline::standard(&config.gate)),
            resource: ResourceRef {
                id: config.catalog.resource_id,
                department_id: config.catalog.department_id,
                owner_id: config.catalog.owner_id,
            },
        };

        let state = AppState { read_path };
        let router = Self::build_router(&config, state, access, limiter);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(
        config: &ApiConfig,
        state: AppState,
        access: AccessControlState,
        limiter: Arc<RateLimiter>,
    ) -> Router {
        let gated = |path: &str, policy: RatePolicy| {
            // Layer order is inside-out: the gate sits closest to the
            // handler, authentication runs first.
            Router::new()
                .route(path, get(list_products))
                .layer(middleware::from_fn_with_state(
                    access.clone(),
                    gate_middleware,
                ))
                .layer(middleware::from_fn_with_state(
                    RateLimitState {
                        limiter: limiter.clone(),
                        policy,
                    },
                    rate_limit_middleware,
                ))
                .layer(middleware::from_fn_with_state(
                    access.clone(),
                    authenticate_middleware,
                ))
        };

        Router::new()
            .merge(gated("/products", RatePolicy::Public))
            .merge(gated("/user/products", RatePolicy::Authenticated))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            // One semaphore across all connections; excess requests queue
            // on it rather than being refused.
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_connections,
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeCatalogRequestId))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown triggered");
                    }
                    result = tokio::signal::ctrl_c() => {
                        if result.is_err() {
                            tracing::error!("Failed to install Ctrl+C handler");
                        }
                        tracing::info!("Shutdown signal received");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Listing handler shared by both route groups.
async fn list_products(
    State(state): State<AppState>,
    matched: MatchedPath,
    headers: HeaderMap,
    Query(params): Query<PageParams>,
) -> Response {
    let start = Instant::now();
    let route = matched.as_str().to_string();

    let response = match validate_page(&params)
        .and_then(|page| state.read_path.fetch(page).map_err(Into::into))
    {
        Ok(page) => (StatusCode::OK, Json(shape_listing(&page))).into_response(),
        Err(err) => err.into_response(),
    };

    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    tracing::debug!(
        request_id = %request_id,
        route = %route,
        status = response.status().as_u16(),
        "Listing served"
    );
    metrics::record_request("GET", &route, response.status().as_u16(), start);

    response
}

async fn health_handler() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}
