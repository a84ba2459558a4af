//! Catalog API Library
//!
//! A rate-limited, cached product-listing API built with Tokio and Axum.
//!
//! # Request Pipeline
//!
//! ```text
//! Client request
//!     → gate/auth.rs       (resolve subject from X-User-Id)
//!     → security/rate_limit.rs (named policy: public | authenticated)
//!     → gate/checks.rs     (ordered authorization pipeline)
//!     → http/request.rs    (page parameter validation)
//!     → catalog/read_path.rs (page cache in front of the store)
//!     → http/resource.rs   (allow-list projection, pagination envelope)
//!     → Client response
//! ```
//!
//! Any stage failure short-circuits with a terminal, stage-specific
//! error response (400/401/403/429/500).

pub mod cache;
pub mod catalog;
pub mod config;
pub mod gate;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::schema::ApiConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
