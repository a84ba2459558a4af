//! Per-request authorization context.

use chrono::Timelike;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: u64,
    pub name: String,
    pub role: String,
    pub department_id: u64,
    pub is_premium: bool,
}

/// Reference to the resource a request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub id: u64,
    pub department_id: u64,
    pub owner_id: u64,
}

/// Everything the gate needs to decide one request.
///
/// Constructed fresh per request and discarded after the decision.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The resolved caller, if any.
    pub subject: Option<Subject>,
    /// The targeted resource.
    pub resource: ResourceRef,
    /// Local hour of day (0-23) at the time of the request.
    pub hour: u32,
}

impl AuthContext {
    pub fn new(subject: Option<Subject>, resource: ResourceRef, hour: u32) -> Self {
        Self {
            subject,
            resource,
            hour,
        }
    }

    /// Build a context stamped with the current local hour.
    pub fn for_now(subject: Option<Subject>, resource: ResourceRef) -> Self {
        Self::new(subject, resource, chrono::Local::now().hour())
    }
}
