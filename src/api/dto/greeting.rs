//! Greeting response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `GET /api/hello`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "hello": "World!" }))]
pub struct HelloResponse {
    pub hello: String,
}

impl Default for HelloResponse {
    fn default() -> Self {
        Self {
            hello: "World!".to_string(),
        }
    }
}

/// Body of `GET /api/good-bye`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "message": "Good Bye Visitor!" }))]
pub struct GoodByeResponse {
    pub message: String,
}

impl Default for GoodByeResponse {
    fn default() -> Self {
        Self {
            message: "Good Bye Visitor!".to_string(),
        }
    }
}
