//! Router assembly and process lifecycle: `build_router`, `start_server`,
//! `shutdown_signal`. No API-key auth layer — this API doesn't need one.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::middleware::{log_requests, request_id};
use crate::routes::{api_info, feedback, health, not_found, resolve};
use crate::state::ServerState;

/// Builds the router: public probes, the resolution/feedback surface, and
/// the shared middleware stack (timeout, CORS, request-id, logging, trace),
/// applied outermost-first so every request gets an id before anything else
/// touches it.
fn build_router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/resolve-intent", post(resolve::resolve_intent))
        .route("/feedback", post(feedback::submit_feedback))
        .route("/feedback/stats", get(feedback::feedback_stats))
        .route("/feedback/review-queue", get(feedback::review_queue))
        .fallback(not_found)
        .layer(TimeoutLayer::new(state.config.timeout()))
        .layer(DefaultBodyLimit::max(state.config.max_body_size()))
        .layer(cors)
        .layer(axum::middleware::from_fn(request_id))
        .layer(axum::middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http());

    router.with_state(state)
}

/// Starts the service: structured logging, state construction (corpus load,
/// Fast Memory replay, review-queue replay), router build, graceful
/// shutdown on Ctrl+C/SIGTERM.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.clone())
        .with_target(false)
        .json()
        .init();

    let addr: SocketAddr = config.socket_addr()?;
    let state = Arc::new(ServerState::new(config)?);

    tracing::info!(%addr, "starting intentd");

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
