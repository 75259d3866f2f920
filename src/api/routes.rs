//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{Json, Router, extract::DefaultBodyLimit, http::StatusCode, middleware, routing::get};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers::{
    beverages::beverage_routes, greetings::greeting_routes, pets::pet_routes,
};
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::config::ServerConfig;
use crate::state::AppState;

/// Where the generated OpenAPI document is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Where Swagger UI is mounted when enabled.
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. CORS and compression
/// 2. Request ID - generates/propagates request IDs
/// 3. Logging - logs requests with request IDs
/// 4. Global error handler - JSON envelope for every error response
/// 5. Request timeout (408) and body size limit (413)
///
/// # Routes
/// - `/api/hello`, `/api/good-bye` - Greetings
/// - `/api/pets` - Pet intake (no-op)
/// - `/api/beverages/{drink}` - Beverage orders
/// - `/api-docs/openapi.json` and optionally `/swagger-ui`
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let api_routes = OpenApiRouter::new()
        .merge(greeting_routes())
        .merge(pet_routes())
        .merge(beverage_routes());

    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", api_routes)
        .split_for_parts();

    let router = if server.swagger_ui {
        router.merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, openapi))
    } else {
        let document = Json(openapi);
        router.route(
            OPENAPI_PATH,
            get(move || std::future::ready(document.clone())),
        )
    };

    router
        .layer(DefaultBodyLimit::max(server.body_limit))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            server.request_timeout(),
        ))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
