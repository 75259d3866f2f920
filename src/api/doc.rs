use utoipa::OpenApi;

pub const GREETING_TAG: &str = "Greetings";
pub const PET_TAG: &str = "Pets";
pub const BEVERAGE_TAG: &str = "Beverages";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Beverage API",
        description = "A small api server that greets visitors and prepares beverages",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::error::ValidationFieldError,
            crate::models::Drink,
            crate::models::YesNo,
        )
    ),
    tags(
        (name = GREETING_TAG, description = "Greeting endpoints"),
        (name = PET_TAG, description = "Pet endpoints"),
        (name = BEVERAGE_TAG, description = "Beverage ordering endpoints"),
    )
)]
pub struct ApiDoc;
