//! Per-IP rate limits for the public routes.
//!
//! Route groups build their layer with [`make_rate_limit_layer!`](crate::make_rate_limit_layer),
//! which keys on the client IP (`X-Forwarded-For`, `X-Real-IP`, then the peer address).
//! Each quota is a burst size plus the interval after which one request is
//! replenished.

/// Login and registration: a burst of 10, then 5 requests per second
pub const AUTH_REPLENISH_MS: u64 = 200;
pub const AUTH_BURST_SIZE: u32 = 10;

/// Everything else: a burst of 20, then 10 requests per second
pub const GENERAL_REPLENISH_MS: u64 = 100;
pub const GENERAL_BURST_SIZE: u32 = 20;

/// Build a `GovernorLayer` from a replenish interval in milliseconds and a burst size
#[macro_export]
macro_rules! make_rate_limit_layer {
    ($replenish_ms:expr, $burst:expr) => {{
        let config = ::tower_governor::governor::GovernorConfigBuilder::default()
            .per_millisecond($replenish_ms)
            .burst_size($burst)
            .key_extractor(::tower_governor::key_extractor::SmartIpKeyExtractor)
            .use_headers()
            .finish()
            .expect("rate limit configuration has non-zero period and burst");

        ::tower_governor::GovernorLayer::new(config)
    }};
}
