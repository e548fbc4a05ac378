//! Per-IP request throttling.
//!
//! A fixed-window counter per (client IP, tier). Auth endpoints get a much
//! smaller budget than the general API; together with the account lockout
//! policy this bounds online password guessing.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;
use crate::AppState;

/// Rate limit tier for different endpoint types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitTier {
    /// General API endpoints
    Api,
    /// Auth endpoints (login/register)
    Auth,
}

#[derive(Debug, Clone)]
struct WindowEntry {
    count: u32,
    window_start: Instant,
}

/// Thread-safe fixed-window rate limiter
#[derive(Debug)]
pub struct RateLimiter {
    entries: DashMap<(IpAddr, RateLimitTier), WindowEntry>,
    config: RateLimitConfig,
    window: Duration,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            entries: DashMap::new(),
            window: Duration::from_secs(config.window_seconds),
            config,
        }
    }

    /// Record a request. Returns Err(retry_after_seconds) when the window
    /// budget is exhausted.
    pub fn check(&self, ip: IpAddr, tier: RateLimitTier) -> Result<(), u64> {
        if !self.config.enabled {
            return Ok(());
        }

        let limit = match tier {
            RateLimitTier::Api => self.config.api_requests_per_window,
            RateLimitTier::Auth => self.config.auth_requests_per_window,
        };

        let now = Instant::now();
        let mut entry = self.entries.entry((ip, tier)).or_insert(WindowEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count < limit {
            entry.count += 1;
            Ok(())
        } else {
            let retry_after = self
                .window
                .saturating_sub(now.duration_since(entry.window_start))
                .as_secs()
                .max(1);
            Err(retry_after)
        }
    }

    /// Drop entries whose window has long passed
    pub fn cleanup_expired(&self) {
        let now = Instant::now();
        let expiry = self.window * 2;
        self.entries
            .retain(|_, entry| now.duration_since(entry.window_start) < expiry);
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Extract client IP from request headers
fn extract_client_ip(request: &Request<Body>) -> IpAddr {
    // X-Forwarded-For first (reverse proxy setups), first hop wins
    if let Some(forwarded) = request.headers().get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(ip_str) = value.split(',').next() {
                if let Ok(ip) = ip_str.trim().parse::<IpAddr>() {
                    return ip;
                }
            }
        }
    }

    if let Some(real_ip) = request.headers().get("x-real-ip") {
        if let Ok(value) = real_ip.to_str() {
            if let Ok(ip) = value.trim().parse::<IpAddr>() {
                return ip;
            }
        }
    }

    "127.0.0.1".parse().unwrap()
}

/// Rate limiting middleware for general API endpoints
pub async fn rate_limit_api(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    rate_limit_with_tier(state, request, next, RateLimitTier::Api).await
}

/// Rate limiting middleware for auth endpoints
pub async fn rate_limit_auth(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    rate_limit_with_tier(state, request, next, RateLimitTier::Auth).await
}

async fn rate_limit_with_tier(
    state: Arc<AppState>,
    request: Request<Body>,
    next: Next,
    tier: RateLimitTier,
) -> Result<Response, Response> {
    let ip = extract_client_ip(&request);

    match state.rate_limiter.check(ip, tier) {
        Ok(()) => Ok(next.run(request).await),
        Err(retry_after) => {
            tracing::debug!(%ip, ?tier, retry_after, "Request rate limited");
            let response = (
                StatusCode::TOO_MANY_REQUESTS,
                [("Retry-After", retry_after.to_string())],
                format!("Rate limit exceeded. Try again in {} seconds.", retry_after),
            );
            Err(response.into_response())
        }
    }
}

/// Spawn a background task to periodically clean up stale window entries
pub fn spawn_cleanup_task(rate_limiter: Arc<RateLimiter>, cleanup_interval_secs: u64) {
    tokio::spawn(async move {
        let interval = Duration::from_secs(cleanup_interval_secs);
        loop {
            tokio::time::sleep(interval).await;
            rate_limiter.cleanup_expired();
            tracing::debug!(
                "Rate limiter cleanup complete, {} entries remaining",
                rate_limiter.entry_count()
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> RateLimitConfig {
        RateLimitConfig {
            enabled: true,
            api_requests_per_window: 10,
            auth_requests_per_window: 3,
            window_seconds: 60,
        }
    }

    #[test]
    fn test_allows_requests_under_limit() {
        let limiter = RateLimiter::new(test_config());
        let ip: IpAddr = "192.168.1.1".parse().unwrap();

        for i in 0..10 {
            assert!(
                limiter.check(ip, RateLimitTier::Api).is_ok(),
                "request {} should be allowed",
                i
            );
        }
    }

    #[test]
    fn test_blocks_after_limit() {
        let limiter = RateLimiter::new(test_config());
        let ip: IpAddr = "192.168.1.1".parse().unwrap();

        for _ in 0..10 {
            let _ = limiter.check(ip, RateLimitTier::Api);
        }

        assert!(limiter.check(ip, RateLimitTier::Api).is_err());
    }

    #[test]
    fn test_tiers_and_ips_are_independent() {
        let limiter = RateLimiter::new(test_config());
        let ip1: IpAddr = "192.168.1.1".parse().unwrap();
        let ip2: IpAddr = "192.168.1.2".parse().unwrap();

        // Exhaust the small auth budget for ip1
        for _ in 0..3 {
            let _ = limiter.check(ip1, RateLimitTier::Auth);
        }

        assert!(limiter.check(ip1, RateLimitTier::Auth).is_err());
        assert!(limiter.check(ip1, RateLimitTier::Api).is_ok());
        assert!(limiter.check(ip2, RateLimitTier::Auth).is_ok());
    }

    #[test]
    fn test_disabled_limiter_allows_everything() {
        let mut config = test_config();
        config.enabled = false;
        let limiter = RateLimiter::new(config);
        let ip: IpAddr = "192.168.1.1".parse().unwrap();

        for _ in 0..100 {
            assert!(limiter.check(ip, RateLimitTier::Auth).is_ok());
        }
    }
}
