//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → rate_limit.rs (named policy: public by IP, authenticated by subject)
//!     → Pass to the authorization gate
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on ceiling breach with an explicit 429
//! - Rejections carry a message distinct from authorization failures
//! - No trust in client input

pub mod rate_limit;

pub use rate_limit::{RateLimitState, RateLimiter, RatePolicy};
