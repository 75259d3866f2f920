//! Application state for Axum web framework.
//!
//! Holds the resources shared by every request handler.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::api::schema::{SchemaError, SchemaRegistry};

/// Application state shared across all request handlers.
///
/// Cloning is cheap since the schema registry sits behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Compiled request schemas used by the validating extractors
    pub schemas: Arc<SchemaRegistry>,
}

impl AppState {
    /// Creates a new AppState, compiling every request schema.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            schemas: Arc::new(SchemaRegistry::compile()?),
        })
    }
}

impl FromRef<AppState> for Arc<SchemaRegistry> {
    fn from_ref(state: &AppState) -> Self {
        state.schemas.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_clone_shares_registry() {
        let state = AppState::new().unwrap();
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.schemas, &cloned.schemas));
        assert!(Arc::ptr_eq(
            &Arc::<SchemaRegistry>::from_ref(&state),
            &state.schemas
        ));
    }
}
