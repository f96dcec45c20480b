//! Series HTTP handlers
//!
//! Both handlers run against the request's [`DbSession`]. Creation commits
//! it; listing leaves it to roll back when the request completes.

use axum::{
    Json,
    http::{Method, Uri},
};

use crate::database::{DbSession, repositories::SeriesSeaOrmRepository};
use crate::errors::AppResult;
use crate::models::{Series, SeriesCreateRequest};
use crate::web::{
    extractors::{RequestContext, ValidatedJson},
    utils::log_request,
};

/// Create a series
#[utoipa::path(
    post,
    path = "/series",
    tag = "series",
    request_body = SeriesCreateRequest,
    responses(
        (status = 200, description = "Series created", body = Series),
        (status = 413, description = "Request body too large"),
        (status = 422, description = "Payload failed validation"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn create_series(
    context: RequestContext,
    mut session: DbSession,
    ValidatedJson(request): ValidatedJson<SeriesCreateRequest>,
) -> AppResult<Json<Series>> {
    log_request(&Method::POST, &Uri::from_static("/series"), &context);

    let series = SeriesSeaOrmRepository::new(&mut session)
        .create(request)
        .await?;

    tracing::info!(request_id = %context.request_id, "Created series {}", series.id);
    Ok(Json(series))
}

/// List every stored series
#[utoipa::path(
    get,
    path = "/series",
    tag = "series",
    responses(
        (status = 200, description = "All stored series", body = Vec<Series>),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn list_series(
    context: RequestContext,
    mut session: DbSession,
) -> AppResult<Json<Vec<Series>>> {
    log_request(&Method::GET, &Uri::from_static("/series"), &context);

    let series = SeriesSeaOrmRepository::new(&mut session).list().await?;
    Ok(Json(series))
}
