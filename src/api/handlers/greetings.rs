//! Greeting handlers.

use axum::Json;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::GREETING_TAG;
use crate::api::dto::{GoodByeResponse, HelloResponse};
use crate::state::AppState;

/// Register greeting routes.
pub fn greeting_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(hello))
        .routes(routes!(good_bye))
}

/// GET /api/hello - Greet the world.
#[utoipa::path(
    get,
    path = "/hello",
    tag = GREETING_TAG,
    responses(
        (status = 200, description = "Greeting", body = HelloResponse)
    )
)]
async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse::default())
}

/// GET /api/good-bye - Say good bye to the visitor.
#[utoipa::path(
    get,
    path = "/good-bye",
    tag = GREETING_TAG,
    responses(
        (status = 200, description = "Farewell", body = GoodByeResponse)
    )
)]
async fn good_bye() -> Json<GoodByeResponse> {
    Json(GoodByeResponse::default())
}
