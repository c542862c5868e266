use anyhow::Context;
use axum::{routing::get, Json, Router};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{app::OptimizerApp, config::ServerConfig, optimizer::WorkflowOptimizer};

/// Install the JSON tracing subscriber
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}={level},tower_http={level}",
                    env!("CARGO_CRATE_NAME"),
                    level = log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .context("Failed to install tracing subscriber")
}

/// Full service router: optimizer routes, health check, tracing and CORS
pub fn router<O: WorkflowOptimizer>(app: OptimizerApp<O>) -> Router {
    app.into_router().route("/health", get(health_check)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

/// Bind `config.port` and serve the app until the server stops
pub async fn serve<O: WorkflowOptimizer>(
    config: &ServerConfig,
    app: OptimizerApp<O>,
) -> anyhow::Result<()> {
    tracing::info!(
        port = config.port,
        base_path = %app.base_path(),
        "Starting optimizer API"
    );

    let router = router(app);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await.context("Server error")
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
