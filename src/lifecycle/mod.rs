//! Lifecycle management subsystem.
//!
//! # Design Decisions
//! - Ordered startup: config first, then core, then listeners
//! - Ordered shutdown: stop accepting, drain in-flight requests, exit

pub mod shutdown;

pub use shutdown::Shutdown;
