//! Per-IP rate limiting using the token bucket algorithm.

use axum::Router;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Token bucket parameters.
#[derive(Debug, Clone, Copy)]
pub struct Quota {
    /// Seconds needed to refill one token.
    pub per_second: u64,
    pub burst_size: u32,
}

/// Public pages and link redirects: one token every 2 seconds, burst of 100.
pub const PUBLIC: Quota = Quota {
    per_second: 2,
    burst_size: 100,
};

/// Authenticated API and dashboard: one token per second, burst of 20.
pub const STRICT: Quota = Quota {
    per_second: 1,
    burst_size: 20,
};

/// How client requests are keyed for rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimit {
    /// No limiter. For embedding the router behind another limiter and in tests.
    Disabled,
    /// Per client IP. With `behind_proxy` the IP comes from
    /// `X-Forwarded-For` / `X-Real-IP` / `Forwarded`, otherwise from the peer
    /// socket address (requires `ConnectInfo<SocketAddr>`).
    PerIp { behind_proxy: bool },
}

/// Wraps `router` in a limiter with the given quota.
///
/// Requests over the limit receive `429 Too Many Requests`.
pub fn apply(router: Router<AppState>, quota: Quota, mode: RateLimit) -> Router<AppState> {
    match mode {
        RateLimit::Disabled => router,
        RateLimit::PerIp { behind_proxy: true } => {
            let config = GovernorConfigBuilder::default()
                .key_extractor(SmartIpKeyExtractor)
                .per_second(quota.per_second)
                .burst_size(quota.burst_size)
                .finish()
                .expect("rate limit quota is non-zero");

            router.layer(GovernorLayer::new(Arc::new(config)))
        }
        RateLimit::PerIp {
            behind_proxy: false,
        } => {
            let config = GovernorConfigBuilder::default()
                .key_extractor(PeerIpKeyExtractor)
                .per_second(quota.per_second)
                .burst_size(quota.burst_size)
                .finish()
                .expect("rate limit quota is non-zero");

            router.layer(GovernorLayer::new(Arc::new(config)))
        }
    }
}
