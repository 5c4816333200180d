//! Rate limiting middleware using a token bucket per client IP.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Sustained rate per client, requests per second.
const PER_SECOND: u64 = 2;

/// Burst allowance per client.
const BURST: u32 = 100;

/// Rate limiter keyed by the socket peer address.
///
/// Use when the service terminates client connections directly.
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(PER_SECOND)
            .burst_size(BURST)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}

/// Rate limiter reading the client IP from `X-Forwarded-For` / `X-Real-IP`.
///
/// Only meaningful behind a trusted reverse proxy that overwrites these
/// headers; otherwise clients can trivially pick their own bucket.
pub fn proxy_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(PER_SECOND)
            .burst_size(BURST)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
