//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the API.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the catalog API.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// Listener configuration (bind address, connection cap).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Catalog read-path settings.
    pub catalog: CatalogConfig,

    /// Page cache settings.
    pub cache: CacheConfig,

    /// Rate limiting policies.
    pub rate_limit: RateLimitConfig,

    /// Authorization gate settings.
    pub gate: GateConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Catalog read-path configuration.
///
/// `department_id` and `owner_id` describe the catalog section itself;
/// the authorization gate compares the caller against them.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Items per page.
    pub per_page: u32,

    /// Identifier of the catalog section resource.
    pub resource_id: u64,

    /// Department that the catalog section belongs to.
    pub department_id: u64,

    /// Owner of the catalog section.
    pub owner_id: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            per_page: 10,
            resource_id: 1,
            department_id: 10,
            owner_id: 1,
        }
    }
}

/// Page cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Prefix for cache keys; the page number is appended.
    pub namespace: String,

    /// Entry time-to-live in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            namespace: "products_page_".to_string(),
            ttl_secs: 600,
        }
    }
}

/// Rate limiting configuration.
///
/// Ceilings are per fixed window. The `public` policy is keyed by client
/// IP; the `authenticated` policy by subject id when present, else IP.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Window length in seconds.
    pub window_secs: u64,

    /// Ceiling for the `public` policy.
    pub public_per_window: u32,

    /// Ceiling for the `authenticated` policy (standard subjects).
    pub authenticated_per_window: u32,

    /// Ceiling for the `authenticated` policy (premium subjects).
    pub premium_per_window: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_secs: 60,
            public_per_window: 60,
            authenticated_per_window: 120,
            premium_per_window: 300,
        }
    }
}

/// Authorization gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GateConfig {
    /// Roles permitted through the role check.
    pub allowed_roles: Vec<String>,

    /// Business-hours window for the time check.
    pub business_hours: BusinessHoursConfig,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            allowed_roles: vec![
                "admin".to_string(),
                "manager".to_string(),
                "staff".to_string(),
            ],
            business_hours: BusinessHoursConfig::default(),
        }
    }
}

/// Business-hours interval, in local hours of day.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BusinessHoursConfig {
    /// First permitted hour (inclusive).
    pub start_hour: u32,

    /// Last permitted hour.
    pub end_hour: u32,

    /// Whether `end_hour` itself is permitted.
    pub end_inclusive: bool,
}

impl Default for BusinessHoursConfig {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 18,
            end_inclusive: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
