//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, router, middleware stacks)
//!     → middleware/access_control.rs (subject resolution, gate)
//!     → request.rs (request ID, page parameter validation)
//!     → [catalog read path]
//!     → resource.rs (projection, envelope)
//!     → response.rs (error taxonomy → status + body)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod resource;
pub mod response;
pub mod server;

pub use request::{MakeCatalogRequestId, X_REQUEST_ID};
pub use response::ApiError;
pub use server::HttpServer;
