use serde::{Deserialize, Serialize};

/// Kinds of pet the pets endpoint knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PetKind {
    Cat,
    Dog,
}

/// A pet as submitted to `POST /api/pets`. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pet {
    pub name: String,
    pub kind: PetKind,
}
