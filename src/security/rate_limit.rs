//! Rate limiting middleware with named policies.
//!
//! Each policy maps a subject key to a request ceiling over a fixed
//! window: `public` is keyed by caller IP, `authenticated` by subject id
//! when present (falling back to IP), with a raised ceiling for premium
//! subjects. The bucket holds a count and a window start; once the
//! window elapses the bucket resets. A breach is a rejection, never a
//! silent drop.

use std::collections::HashMap;
use std::net::IpAddr;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::RateLimitConfig;
use crate::gate::context::Subject;
use crate::http::middleware::access_control::AuthedSubject;
use crate::http::response::ApiError;
use crate::observability::metrics;

/// Named rate-limit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatePolicy {
    Public,
    Authenticated,
}

impl RatePolicy {
    pub fn name(&self) -> &'static str {
        match self {
            RatePolicy::Public => "public",
            RatePolicy::Authenticated => "authenticated",
        }
    }
}

/// A fixed-window request counter.
struct WindowBucket {
    count: u32,
    window_start: Instant,
}

impl WindowBucket {
    fn new(now: Instant) -> Self {
        Self {
            count: 0,
            window_start: now,
        }
    }

    fn try_acquire(&mut self, ceiling: u32, window: Duration, now: Instant) -> bool {
        if now.duration_since(self.window_start) >= window {
            self.count = 0;
            self.window_start = now;
        }
        if self.count < ceiling {
            self.count += 1;
            true
        } else {
            false
        }
    }
}

/// Shared rate limiter over all policies.
pub struct RateLimiter {
    buckets: Mutex<HashMap<(RatePolicy, String), WindowBucket>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Ceiling for one request under the given policy.
    fn ceiling(&self, policy: RatePolicy, subject: Option<&Subject>) -> u32 {
        match policy {
            RatePolicy::Public => self.config.public_per_window,
            RatePolicy::Authenticated => match subject {
                Some(s) if s.is_premium => self.config.premium_per_window,
                _ => self.config.authenticated_per_window,
            },
        }
    }

    /// Key identifying the bucket: subject id where the policy uses one,
    /// client IP otherwise.
    fn subject_key(policy: RatePolicy, subject: Option<&Subject>, ip: IpAddr) -> String {
        match (policy, subject) {
            (RatePolicy::Authenticated, Some(s)) => s.id.to_string(),
            _ => ip.to_string(),
        }
    }

    /// Check and count one request. Returns false when the ceiling for
    /// the current window is already spent.
    pub fn allow(&self, policy: RatePolicy, subject: Option<&Subject>, ip: IpAddr) -> bool {
        self.allow_at(policy, subject, ip, Instant::now())
    }

    fn allow_at(
        &self,
        policy: RatePolicy,
        subject: Option<&Subject>,
        ip: IpAddr,
        now: Instant,
    ) -> bool {
        if !self.config.enabled {
            return true;
        }
        let ceiling = self.ceiling(policy, subject);
        let key = Self::subject_key(policy, subject, ip);
        let window = Duration::from_secs(self.config.window_secs);

        let mut buckets = self.buckets.lock().expect("rate limiter mutex poisoned");
        let bucket = buckets
            .entry((policy, key))
            .or_insert_with(|| WindowBucket::new(now));
        bucket.try_acquire(ceiling, window, now)
    }
}

/// State handed to the middleware; the policy is fixed per route group.
#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: Arc<RateLimiter>,
    pub policy: RatePolicy,
}

/// Middleware enforcing the route group's policy.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<RateLimitState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let subject = request
        .extensions()
        .get::<AuthedSubject>()
        .and_then(|s| s.0.clone());

    if state
        .limiter
        .allow(state.policy, subject.as_ref(), addr.ip())
    {
        next.run(request).await
    } else {
        tracing::warn!(
            client = %addr.ip(),
            policy = state.policy.name(),
            "Rate limit exceeded"
        );
        metrics::record_rate_limited(state.policy.name());
        ApiError::RateLimited.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip() -> IpAddr {
        "203.0.113.9".parse().unwrap()
    }

    fn subject(id: u64, premium: bool) -> Subject {
        Subject {
            id,
            name: "Test".into(),
            role: "staff".into(),
            department_id: 10,
            is_premium: premium,
        }
    }

    fn limiter() -> RateLimiter {
        RateLimiter::new(RateLimitConfig::default())
    }

    #[test]
    fn public_policy_allows_sixty_then_rejects() {
        let limiter = limiter();
        for _ in 0..60 {
            assert!(limiter.allow(RatePolicy::Public, None, ip()));
        }
        assert!(!limiter.allow(RatePolicy::Public, None, ip()));
    }

    #[test]
    fn standard_subject_capped_at_one_twenty() {
        let limiter = limiter();
        let s = subject(2, false);
        for _ in 0..120 {
            assert!(limiter.allow(RatePolicy::Authenticated, Some(&s), ip()));
        }
        assert!(!limiter.allow(RatePolicy::Authenticated, Some(&s), ip()));
    }

    #[test]
    fn premium_subject_capped_at_three_hundred() {
        let limiter = limiter();
        let s = subject(1, true);
        for _ in 0..300 {
            assert!(limiter.allow(RatePolicy::Authenticated, Some(&s), ip()));
        }
        assert!(!limiter.allow(RatePolicy::Authenticated, Some(&s), ip()));
    }

    #[test]
    fn authenticated_policy_falls_back_to_ip_without_subject() {
        let limiter = RateLimiter::new(RateLimitConfig {
            authenticated_per_window: 2,
            premium_per_window: 2,
            ..RateLimitConfig::default()
        });
        assert!(limiter.allow(RatePolicy::Authenticated, None, ip()));
        assert!(limiter.allow(RatePolicy::Authenticated, None, ip()));
        assert!(!limiter.allow(RatePolicy::Authenticated, None, ip()));
        // A different IP gets its own bucket.
        let other: IpAddr = "203.0.113.10".parse().unwrap();
        assert!(limiter.allow(RatePolicy::Authenticated, None, other));
    }

    #[test]
    fn policies_do_not_share_buckets() {
        let limiter = RateLimiter::new(RateLimitConfig {
            public_per_window: 1,
            authenticated_per_window: 1,
            premium_per_window: 1,
            ..RateLimitConfig::default()
        });
        assert!(limiter.allow(RatePolicy::Public, None, ip()));
        assert!(limiter.allow(RatePolicy::Authenticated, None, ip()));
        assert!(!limiter.allow(RatePolicy::Public, None, ip()));
    }

    #[test]
    fn bucket_resets_after_the_window_elapses() {
        let limiter = RateLimiter::new(RateLimitConfig {
            public_per_window: 1,
            window_secs: 60,
            ..RateLimitConfig::default()
        });
        let start = Instant::now();
        assert!(limiter.allow_at(RatePolicy::Public, None, ip(), start));
        assert!(!limiter.allow_at(RatePolicy::Public, None, ip(), start));
        let later = start + Duration::from_secs(61);
        assert!(limiter.allow_at(RatePolicy::Public, None, ip(), later));
    }

    #[test]
    fn disabled_limiter_allows_everything() {
        let limiter = RateLimiter::new(RateLimitConfig {
            enabled: false,
            public_per_window: 1,
            ..RateLimitConfig::default()
        });
        for _ in 0..10 {
            assert!(limiter.allow(RatePolicy::Public, None, ip()));
        }
    }
}
