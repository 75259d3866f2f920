//! JSON schema documents for request validation.
//!
//! Every validated request part is described by a schema document. The
//! documents are compiled once into a [`SchemaRegistry`] that lives in the
//! application state, and the validating extractors in
//! [`crate::utils::validate`] consult it before any handler runs.

use std::collections::HashMap;
use std::fmt;

use jsonschema::Validator;
use serde_json::{Value, json};
use thiserror::Error;

use crate::error::{AppError, AppResult, ValidationFieldError};

/// The part of an HTTP request a schema applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestPart {
    Params,
    Querystring,
    Body,
}

impl RequestPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestPart::Params => "params",
            RequestPart::Querystring => "querystring",
            RequestPart::Body => "body",
        }
    }

    /// Field label for an error at `pointer` inside this part.
    fn field(&self, pointer: &str) -> String {
        if pointer.is_empty() {
            self.as_str().to_string()
        } else {
            format!("{}{}", self.as_str(), pointer)
        }
    }
}

/// Identifies one registered schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaId {
    BeverageParams,
    BeverageQuery,
    BeverageBody,
}

impl SchemaId {
    pub const ALL: [SchemaId; 3] = [
        SchemaId::BeverageParams,
        SchemaId::BeverageQuery,
        SchemaId::BeverageBody,
    ];

    pub fn part(&self) -> RequestPart {
        match self {
            SchemaId::BeverageParams => RequestPart::Params,
            SchemaId::BeverageQuery => RequestPart::Querystring,
            SchemaId::BeverageBody => RequestPart::Body,
        }
    }

    pub fn document(&self) -> Value {
        match self {
            SchemaId::BeverageParams => beverage_params_schema(),
            SchemaId::BeverageQuery => beverage_query_schema(),
            SchemaId::BeverageBody => beverage_body_schema(),
        }
    }
}

/// Path parameters of `POST /api/beverages/{drink}`.
pub fn beverage_params_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "drink": { "enum": ["tea", "coffee", "chai"] }
        },
        "required": ["drink"],
        "additionalProperties": false
    })
}

/// Query string of `POST /api/beverages/{drink}`.
pub fn beverage_query_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "milk": { "enum": ["yes", "no"] },
            "sugar": { "enum": ["yes", "no"] }
        },
        "additionalProperties": false
    })
}

/// Body of `POST /api/beverages/{drink}`.
pub fn beverage_body_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "kind": { "type": "string" }
        },
        "required": ["kind"],
        "additionalProperties": false
    })
}

/// Implemented by request shapes that must pass a schema before they are
/// deserialized.
pub trait RequestSchema {
    const SCHEMA: SchemaId;
}

/// A schema document that could not be compiled.
#[derive(Debug, Error)]
#[error("Failed to compile schema {id:?}: {message}")]
pub struct SchemaError {
    pub id: SchemaId,
    pub message: String,
}

/// Compiled validators for every [`SchemaId`].
pub struct SchemaRegistry {
    validators: HashMap<SchemaId, Validator>,
}

impl SchemaRegistry {
    /// Compile all schema documents.
    pub fn compile() -> Result<Self, SchemaError> {
        let mut validators = HashMap::with_capacity(SchemaId::ALL.len());
        for id in SchemaId::ALL {
            let validator =
                jsonschema::validator_for(&id.document()).map_err(|e| SchemaError {
                    id,
                    message: e.to_string(),
                })?;
            validators.insert(id, validator);
        }

        tracing::debug!(count = validators.len(), "Request schemas compiled");
        Ok(Self { validators })
    }

    /// Validate `instance` against the schema `id`.
    ///
    /// Every violation is reported, each labelled with the request part and
    /// the JSON pointer of the offending value.
    pub fn validate(&self, id: SchemaId, instance: &Value) -> AppResult<()> {
        let validator = self.validators.get(&id).ok_or_else(|| AppError::Internal {
            source: anyhow::anyhow!("schema {:?} is not registered", id),
        })?;

        let part = id.part();
        let errors: Vec<ValidationFieldError> = validator
            .iter_errors(instance)
            .map(|e| ValidationFieldError::new(part.field(e.instance_path().as_str()), e.to_string()))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(schema = ?id, errors = errors.len(), "Request rejected by schema");
            Err(AppError::ValidationErrors { errors })
        }
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("schemas", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::compile().unwrap()
    }

    fn errors_of(result: AppResult<()>) -> Vec<ValidationFieldError> {
        match result {
            Err(AppError::ValidationErrors { errors }) => errors,
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_all_schemas_compile() {
        let registry = registry();
        for id in SchemaId::ALL {
            assert!(registry.validators.contains_key(&id));
        }
    }

    #[test]
    fn test_documents_are_closed_objects() {
        for id in SchemaId::ALL {
            let doc = id.document();
            assert_eq!(doc["type"], "object");
            assert_eq!(doc["additionalProperties"], false);
        }
    }

    #[test]
    fn test_params_enum() {
        let registry = registry();
        for drink in ["tea", "coffee", "chai"] {
            assert!(registry.validate(SchemaId::BeverageParams, &json!({ "drink": drink })).is_ok());
        }

        let errors = errors_of(registry.validate(SchemaId::BeverageParams, &json!({ "drink": "latte" })));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "params/drink");
    }

    #[test]
    fn test_query_accepts_empty_and_toggles() {
        let registry = registry();
        assert!(registry.validate(SchemaId::BeverageQuery, &json!({})).is_ok());
        assert!(
            registry
                .validate(SchemaId::BeverageQuery, &json!({ "milk": "yes", "sugar": "no" }))
                .is_ok()
        );
    }

    #[test]
    fn test_query_rejects_unknown_value_and_key() {
        let registry = registry();

        let errors = errors_of(registry.validate(SchemaId::BeverageQuery, &json!({ "milk": "maybe" })));
        assert_eq!(errors[0].field, "querystring/milk");

        let errors = errors_of(registry.validate(SchemaId::BeverageQuery, &json!({ "honey": "yes" })));
        assert_eq!(errors[0].field, "querystring");
        assert!(errors[0].message.contains("honey"));
    }

    #[test]
    fn test_body_requires_string_kind() {
        let registry = registry();
        assert!(registry.validate(SchemaId::BeverageBody, &json!({ "kind": "green" })).is_ok());

        let errors = errors_of(registry.validate(SchemaId::BeverageBody, &json!({})));
        assert_eq!(errors[0].field, "body");
        assert!(errors[0].message.contains("kind"));

        let errors = errors_of(registry.validate(SchemaId::BeverageBody, &json!({ "kind": 5 })));
        assert_eq!(errors[0].field, "body/kind");
    }

    #[test]
    fn test_body_rejects_extra_property() {
        let registry = registry();
        let errors = errors_of(
            registry.validate(SchemaId::BeverageBody, &json!({ "kind": "spiced", "extra": "x" })),
        );
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("extra"));
    }

    #[test]
    fn test_body_rejects_non_object() {
        let registry = registry();
        assert!(registry.validate(SchemaId::BeverageBody, &Value::Null).is_err());
        assert!(registry.validate(SchemaId::BeverageBody, &json!(["kind"])).is_err());
    }
}
