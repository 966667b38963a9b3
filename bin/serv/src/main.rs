use std::net::SocketAddr;

use axum::{Router, middleware, routing::get};
use mtr_api::{config::ApiConfig, state::ApiState};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    mtr_api::tracing::init_tracing(&config.env);

    let metrics_handle = mtr_api::metrics::init_metrics()?;
    tracing::info!("Prometheus metrics exporter initialized");

    let pool = mtr_db::create_pool(&config.database_url, config.db_max_connections).await?;
    mtr_db::ensure_db_and_migrate(&config.database_url, &pool).await?;
    tracing::info!("Database migrations applied");

    let state = ApiState::new(&config, pool);

    let cors = mtr_api::middleware::cors::create_cors_layer(config.parsed_allowed_origins());

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Scraped separately, so it carries its own state
    let metrics_app = Router::new()
        .route("/metrics", get(mtr_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = mtr_api::router::router()
        .merge(metrics_app)
        .with_state(state)
        .layer(cors)
        .layer(trace_layer)
        .layer(middleware::from_fn(mtr_api::metrics::track_metrics))
        .layer(middleware::from_fn(
            mtr_api::middleware::request_id::request_id_middleware,
        ));

    let app = mtr_api::middleware::security_headers::apply_security_headers(app, config.env.clone());

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, environment = ?config.env, "server listening");

    // Rate limiting falls back to the peer address, so serve with connect info
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
