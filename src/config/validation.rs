//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, hours within a day)
//! - Check addresses parse before binding is attempted
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ApiConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ApiConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Config field the error refers to (dotted path).
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn err(field: &str, message: &str) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(err("listener.bind_address", "not a valid socket address"));
    }
    if config.listener.max_connections == 0 {
        errors.push(err("listener.max_connections", "must be at least 1"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(err("timeouts.request_secs", "must be at least 1"));
    }

    if config.catalog.per_page == 0 {
        errors.push(err("catalog.per_page", "must be at least 1"));
    }

    if config.cache.namespace.is_empty() {
        errors.push(err("cache.namespace", "must not be empty"));
    }
    if config.cache.ttl_secs == 0 {
        errors.push(err("cache.ttl_secs", "must be at least 1"));
    }

    if config.rate_limit.enabled {
        if config.rate_limit.window_secs == 0 {
            errors.push(err("rate_limit.window_secs", "must be at least 1"));
        }
        if config.rate_limit.public_per_window == 0 {
            errors.push(err("rate_limit.public_per_window", "must be at least 1"));
        }
        if config.rate_limit.authenticated_per_window == 0 {
            errors.push(err(
                "rate_limit.authenticated_per_window",
                "must be at least 1",
            ));
        }
        if config.rate_limit.premium_per_window < config.rate_limit.authenticated_per_window {
            errors.push(err(
                "rate_limit.premium_per_window",
                "must not be below the standard authenticated ceiling",
            ));
        }
    }

    if config.gate.allowed_roles.is_empty() {
        errors.push(err("gate.allowed_roles", "must name at least one role"));
    }
    let hours = &config.gate.business_hours;
    if hours.start_hour > 23 {
        errors.push(err("gate.business_hours.start_hour", "must be 0-23"));
    }
    if hours.end_hour > 23 {
        errors.push(err("gate.business_hours.end_hour", "must be 0-23"));
    }
    if hours.start_hour > hours.end_hour {
        errors.push(err(
            "gate.business_hours.start_hour",
            "must not be after end_hour",
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(err(
            "observability.metrics_address",
            "not a valid socket address",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
