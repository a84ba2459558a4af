//! Request authorization subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → auth.rs (resolve subject from X-User-Id header)
//!     → context.rs (build per-request AuthContext)
//!     → checks.rs (ordered predicate pipeline, first failure wins)
//!     → Pass to read path, or terminal 401/403
//! ```
//!
//! # Design Decisions
//! - Cheap, identity-establishing checks run before resource-specific
//!   ones, so an unauthenticated caller never learns department or
//!   ownership details
//! - Fail closed: reject on any check failure
//! - The context is ephemeral; built fresh per request, never persisted

pub mod auth;
pub mod checks;
pub mod context;

pub use auth::{UserDirectory, X_USER_ID};
pub use checks::{GatePipeline, GateRejection};
pub use context::{AuthContext, ResourceRef, Subject};
