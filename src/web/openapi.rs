//! OpenAPI documentation generated from the handler annotations

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Series API",
        description = "Create and list TV series."
    ),
    tags(
        (name = "series", description = "Series catalogue"),
        (name = "health", description = "Service health monitoring"),
    ),
    paths(
        crate::web::handlers::series::create_series,
        crate::web::handlers::series::list_series,
        crate::web::handlers::health::health_check,
    ),
    components(
        schemas(
            crate::models::Series,
            crate::models::SeriesCreateRequest,
            crate::models::FieldError,
            crate::web::responses::HealthResponse,
            crate::web::responses::DatabaseHealth,
        )
    )
)]
pub struct ApiDoc;

/// OpenAPI document with the crate version filled in
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.info.version = env!("CARGO_PKG_VERSION").to_string();
    openapi
}
