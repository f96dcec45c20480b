//! Health check HTTP handlers

use axum::{
    extract::State,
    http::{Method, Uri},
    response::IntoResponse,
};

use crate::database::Database;
use crate::web::{
    AppState,
    extractors::RequestContext,
    responses::{DatabaseHealth, HealthResponse, ok},
    utils::log_request,
};

/// Health check endpoint
///
/// Reports the service as healthy when the database answers a ping.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health, including database connectivity"),
    )
)]
pub async fn health_check(
    State(state): State<AppState>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&Method::GET, &Uri::from_static("/health"), &context);

    let db_health = check_database_health(&state.database).await;

    let response = if db_health.status == "connected" {
        HealthResponse::healthy(db_health)
    } else {
        HealthResponse::unhealthy(db_health, "Database connection failed".to_string())
    };

    ok(response)
}

async fn check_database_health(database: &Database) -> DatabaseHealth {
    let backend = database.database_type().to_string();

    match database.ping().await {
        Ok(()) => DatabaseHealth {
            status: "connected".to_string(),
            backend,
        },
        Err(e) => {
            tracing::warn!("Database health check failed: {:#}", e);
            DatabaseHealth {
                status: "disconnected".to_string(),
                backend,
            }
        }
    }
}
