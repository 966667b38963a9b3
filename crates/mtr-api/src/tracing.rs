//! Logging setup.
//!
//! Development gets pretty, human-readable output with source locations.
//! Production gets flattened JSON events for log aggregation. `RUST_LOG`
//! overrides the default filter in both modes (e.g. `RUST_LOG=debug,tower_http=trace`).

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

const DEVELOPMENT_FILTER: &str = "debug,tower_http=debug,sqlx=warn";
const PRODUCTION_FILTER: &str = "info,tower_http=info,sqlx=warn";

pub fn init_tracing(env: &Environment) {
    let default_filter = if env.is_development() {
        DEVELOPMENT_FILTER
    } else {
        PRODUCTION_FILTER
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let output = if env.is_development() {
        fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .flatten_event(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(output)
        .init();

    tracing::info!(environment = ?env, "tracing initialized");
}
