//! Beverage ordering handlers.

use axum::{Json, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::BEVERAGE_TAG;
use crate::api::dto::{
    BeverageBody, BeverageParams, BeverageQuery, BeverageResponse, ErrorResponse,
};
use crate::models::Drink;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedPath, ValidatedQuery};

/// Register beverage routes.
pub fn beverage_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(order_beverage))
}

/// POST /api/beverages/{drink} - Prepare a beverage.
///
/// Path, query and body are checked against their schemas, in that order,
/// before this handler runs.
#[utoipa::path(
    post,
    path = "/beverages/{drink}",
    tag = BEVERAGE_TAG,
    params(
        ("drink" = Drink, Path, description = "Drink to prepare"),
        BeverageQuery
    ),
    request_body = BeverageBody,
    responses(
        (status = 201, description = "Beverage prepared", body = BeverageResponse),
        (status = 400, description = "Request validation failed", body = ErrorResponse)
    )
)]
async fn order_beverage(
    ValidatedPath(params): ValidatedPath<BeverageParams>,
    ValidatedQuery(query): ValidatedQuery<BeverageQuery>,
    ValidatedJson(body): ValidatedJson<BeverageBody>,
) -> (StatusCode, Json<BeverageResponse>) {
    let order = body.into_order(params, query);
    tracing::debug!(drink = %order.drink, kind = %order.kind, "Beverage ordered");
    (StatusCode::CREATED, Json(order.into()))
}
