//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Applies the public rate limit to a router.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// With `behind_proxy` the client IP is read from forwarding headers
/// (`X-Forwarded-For` / `X-Real-IP`); otherwise the socket peer address is
/// used. Only enable `behind_proxy` behind a trusted reverse proxy, since
/// the headers are client-controlled.
pub fn public<S>(router: Router<S>, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    apply(router, behind_proxy, 2, 100)
}

/// Applies the stricter authenticated-endpoint rate limit to a router.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
pub fn secure<S>(router: Router<S>, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    apply(router, behind_proxy, 1, 10)
}

fn apply<S>(router: Router<S>, behind_proxy: bool, per_second: u64, burst: u32) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        let conf = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(SmartIpKeyExtractor)
                .per_second(per_second)
                .burst_size(burst)
                .finish()
                .unwrap(),
        );
        router.layer(GovernorLayer::new(conf))
    } else {
        let conf = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(PeerIpKeyExtractor)
                .per_second(per_second)
                .burst_size(burst)
                .finish()
                .unwrap(),
        );
        router.layer(GovernorLayer::new(conf))
    }
}
