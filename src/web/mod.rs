//! Web layer module
//!
//! HTTP interface for the series API.
//!
//! # Architecture
//!
//! - **Handlers**: HTTP request handlers organized by domain
//! - **Responses**: Standardized error envelope and status mapping
//! - **Extractors**: Payload validation and the per-request database session
//! - **Middleware**: Request logging and size limiting
//! - **Utils**: Common utilities for web operations

use anyhow::{Context, Result};
use axum::{Router, extract::DefaultBodyLimit, routing::get};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{config::Config, database::Database};

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod utils;

// Re-export commonly used types
pub use extractors::{RequestContext, ValidatedJson};
pub use responses::{ApiResponse, handle_error};

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config, database: Database) -> Result<Self> {
        let addr: SocketAddr = config
            .bind_address()
            .parse()
            .with_context(|| format!("Invalid bind address: {}", config.bind_address()))?;

        let state = AppState { database, config };
        let app = create_router(state);

        Ok(Self { app, addr })
    }

    /// Serve with a notification when the server is actually listening or fails to bind
    ///
    /// Runs until SIGINT or SIGTERM, then drains in-flight requests.
    pub async fn serve_with_signal(
        self,
        ready_signal: tokio::sync::oneshot::Sender<Result<()>>,
    ) -> Result<()> {
        match tokio::net::TcpListener::bind(&self.addr).await {
            Ok(listener) => {
                let _ = ready_signal.send(Ok(()));
                info!("Web server listening on http://{}", self.addr);

                axum::serve(listener, self.app)
                    .with_graceful_shutdown(shutdown_signal())
                    .await?;

                info!("Web server stopped");
                Ok(())
            }
            Err(bind_error) => {
                let bind_err_msg = format!("Failed to bind to {}: {}", self.addr, bind_error);
                let _ = ready_signal.send(Err(anyhow::anyhow!("{}", bind_err_msg)));
                Err(anyhow::anyhow!("{}", bind_err_msg))
            }
        }
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Build the application router over the given state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/series",
            get(handlers::series::list_series).post(handlers::series::create_series),
        )
        .route("/health", get(handlers::health::health_check))
        .merge(openapi_routes())
        // Middleware (applied in reverse order)
        .layer(DefaultBodyLimit::max(state.config.web.max_request_size))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_size_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(
            middleware::request_logging_middleware,
        ))
        .with_state(state)
}

/// OpenAPI documentation routes
fn openapi_routes() -> Router<AppState> {
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        // Swagger UI serves both /docs and /api/openapi.json
        .merge(SwaggerUi::new("/docs").url("/api/openapi.json", openapi::get_openapi_spec()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), shutting down gracefully");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub config: Config,
}
