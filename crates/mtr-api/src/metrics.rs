//! Prometheus metrics for request traffic and account events.

use std::{sync::LazyLock, time::Instant};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use regex::Regex;

static UUID_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .expect("uuid pattern is valid")
});
static NUMERIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+(/|$)").expect("numeric pattern is valid"));

/// Install the Prometheus recorder and return the handle used to render it
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Middleware recording request count, latency and in-flight gauge
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let in_flight = gauge!("http_requests_in_flight", "method" => method.clone(), "path" => path.clone());
    in_flight.increment(1.0);

    let response = next.run(req).await;

    in_flight.decrement(1.0);

    let status = response.status().as_u16().to_string();
    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// Replace UUID and numeric path segments with `:id` to bound label cardinality
fn normalize_path(path: &str) -> String {
    let without_uuids = UUID_SEGMENT.replace_all(path, ":id");
    NUMERIC_SEGMENT
        .replace_all(&without_uuids, "/:id$1")
        .into_owned()
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

fn outcome(success: bool) -> &'static str {
    if success { "success" } else { "failure" }
}

/// Record a login or token check
pub fn record_auth_event(event_type: &'static str, success: bool) {
    counter!(
        "auth_events_total",
        "type" => event_type,
        "status" => outcome(success)
    )
    .increment(1);
}

/// Record a registration attempt for the given role
pub fn record_registration_event(role: &'static str, success: bool) {
    counter!(
        "registration_events_total",
        "role" => role,
        "status" => outcome(success)
    )
    .increment(1);
}

/// Record an enrollment attempt
pub fn record_enrollment_event(success: bool) {
    counter!("enrollment_events_total", "status" => outcome(success)).increment(1);
}
