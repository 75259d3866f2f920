//! Pet handlers.

use axum::body::Bytes;
use axum::http::StatusCode;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::PET_TAG;
use crate::api::dto::PetCreationRequest;
use crate::state::AppState;

/// Register pet routes.
pub fn pet_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(create_pet))
}

/// POST /api/pets - Accept a pet description.
///
/// The body is read but nothing is stored, and a body of any other shape is
/// accepted as well.
#[utoipa::path(
    post,
    path = "/pets",
    tag = PET_TAG,
    request_body = PetCreationRequest,
    responses(
        (status = 200, description = "Pet accepted, nothing is stored")
    )
)]
async fn create_pet(body: Bytes) -> StatusCode {
    match serde_json::from_slice::<PetCreationRequest>(&body) {
        Ok(request) => {
            let pet = request.into_pet();
            tracing::debug!(name = %pet.name, kind = ?pet.kind, "Pet received");
        }
        Err(e) => {
            tracing::debug!(error = %e, bytes = body.len(), "Pet body ignored");
        }
    }
    StatusCode::OK
}
