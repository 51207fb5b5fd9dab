//! Router, listener, and graceful shutdown.

use std::future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use roaster_config::RoasterConfig;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::time;
use tower_http::trace::TraceLayer;

use crate::error::ServerResult;
use crate::routes::{analyze, health};
use crate::state::AppState;

/// Build the router. Exposed for in-process tests.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/analyze", post(analyze::analyze))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolve server settings from `config`, apply an optional `bind` override,
/// and serve.
pub async fn serve_config(config: &RoasterConfig, bind: Option<SocketAddr>) -> ServerResult<()> {
    let state = state_from_config(config, bind)?;
    serve(state).await
}

/// Build the state `serve_config` would serve, without binding.
pub fn state_from_config(config: &RoasterConfig, bind: Option<SocketAddr>) -> ServerResult<AppState> {
    let mut settings = config.server().resolve()?;
    if let Some(bind) = bind {
        settings.bind = bind;
    }
    AppState::from_config(&config.fetch(), settings)
}

/// Bind `state.settings.bind` and serve until Ctrl+C or SIGTERM.
pub async fn serve(state: AppState) -> ServerResult<()> {
    let addr = state.settings.bind;
    let state = Arc::new(state);

    spawn_sweeper(&state);

    let app = build_router(Arc::clone(&state));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Starting SEO Roaster on {}", listener.local_addr().unwrap_or(addr));
    tracing::info!(
        "Rate limit: {} requests per {}s, analysis timeout: {}s",
        state.settings.rate_limit_max_requests,
        state.settings.rate_limit_window.as_secs(),
        state.settings.timeout.as_secs()
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Sweep idle rate-limit entries once per window.
fn spawn_sweeper(state: &Arc<AppState>) {
    let limiter = Arc::clone(&state.limiter);
    tokio::spawn(async move {
        let mut ticker = time::interval(limiter.window().max(Duration::from_secs(1)));
        // First tick fires immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            limiter.sweep();
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
            future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal as unix_signal};

        match unix_signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {err}");
                future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        () = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
