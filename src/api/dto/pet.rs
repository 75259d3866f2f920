//! Pet DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::{Pet, PetKind};

/// Request body accepted by `POST /api/pets`.
///
/// The shape is documented but not enforced.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({ "name": "Tom", "kind": "cat" }))]
pub struct PetCreationRequest {
    pub name: String,
    pub kind: PetKind,
}

impl PetCreationRequest {
    pub fn into_pet(self) -> Pet {
        Pet {
            name: self.name,
            kind: self.kind,
        }
    }
}
