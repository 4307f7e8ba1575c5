//! HTTP gateway for filecommander.
//!
//! Exposes the operation engine under `/api/filesystem`:
//!
//! | Route | Body | Success |
//! |-------|------|---------|
//! | `GET /drives` | | JSON array of root paths |
//! | `GET /entries?path=<dir>` | | JSON array of entries |
//! | `POST /copy` | `{"sourcePaths": [..], "destinationDirectory": ".."}` | 204 |
//! | `POST /move` | `{"sourcePaths": [..], "destinationDirectory": ".."}` | 204 |
//! | `POST /delete` | `[..]` | 204 |
//!
//! Missing directories answer 404; every other failure answers 400 with the
//! error message as the body. A mutating request whose client goes away
//! cancels the running batch at its next source.

mod error;
mod routes;

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use filecommander_core::ServerConfig;
use filecommander_ops::OperationExecutor;

pub use error::ApiError;

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Shared handler state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub executor: OperationExecutor,
}

/// Build the application router for a configuration.
pub fn router(config: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/drives", get(routes::drives))
        .route("/entries", get(routes::entries))
        .route("/copy", post(routes::copy))
        .route("/move", post(routes::move_items))
        .route("/delete", post(routes::delete))
        .with_state(AppState::default());

    let mut app = Router::new()
        .nest("/api/filesystem", api)
        .route("/health", get(|| async { "OK" }));

    if let Some(dir) = &config.static_dir {
        let index = ServeFile::new(dir.join("index.html"));
        app = app.fallback_service(ServeDir::new(dir).fallback(index));
    }

    if config.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    app.layer(TraceLayer::new_for_http())
}

/// Bind and serve until `shutdown` is cancelled.
pub async fn serve(config: ServerConfig, shutdown: CancellationToken) -> Result<(), ServerError> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let local = listener.local_addr().unwrap_or(addr);

    info!("Listening on http://{local}");
    if let Some(dir) = &config.static_dir {
        info!("Serving static assets from {}", dir.display());
    }

    axum::serve(listener, router(&config))
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            info!("Shutting down HTTP server");
        })
        .await
        .map_err(ServerError::Serve)
}
