//! # seqecho-server
//!
//! REST API server for the SeqEcho sequence analysis engine.
//!
//! Routes:
//! - POST /predict: classify, predict, and remember
//! - POST /validate: classify only
//! - GET /memories, DELETE /memories, POST /clear
//! - GET /statistics
//! - GET /samples
//! - GET /export, POST /import
//! - GET /health

use axum::{
    routing::{get, post},
    Router,
};
use parking_lot::Mutex;
use seqecho::SeqEcho;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod routes;

use config::ServerConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    echo: Arc<Mutex<SeqEcho>>,
}

impl AppState {
    pub fn new(echo: SeqEcho) -> Self {
        Self {
            echo: Arc::new(Mutex::new(echo)),
        }
    }
}

fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route("/predict", post(routes::predict))
        .route("/validate", post(routes::validate))
        .route("/memories", get(routes::memories).delete(routes::clear))
        .route("/clear", post(routes::clear))
        .route("/statistics", get(routes::statistics))
        .route("/samples", get(routes::list_samples))
        .route("/export", get(routes::export))
        .route("/import", post(routes::import))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_filter().into()),
        )
        .init();

    let state = AppState::new(SeqEcho::with_config(config.engine.clone()));
    let app = build_router(state);

    let addr = config.addr()?;
    tracing::info!(
        "seqecho-server v{} listening on {} (max predictions {}, verbose {})",
        env!("CARGO_PKG_VERSION"),
        addr,
        config.engine.max_predict_count,
        config.verbose
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
