//! Schema-validating extractors.
//!
//! Each extractor turns one request part into a JSON value, checks it
//! against the schema bound to the target type and only then deserializes
//! it. A handler that takes these extractors never observes invalid input.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRef, FromRequest, FromRequestParts, Query, RawPathParams, Request};
use axum::http::{HeaderMap, StatusCode, header, request::Parts};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::api::schema::{RequestSchema, SchemaRegistry};
use crate::error::{AppError, AppResult};

/// Path parameters validated against `T::SCHEMA`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

/// Query string validated against `T::SCHEMA`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

/// JSON body validated against `T::SCHEMA`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + RequestSchema,
    S: Send + Sync,
    Arc<SchemaRegistry>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let params = RawPathParams::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest {
                message: e.body_text(),
            })?;

        let value = Value::Object(
            params
                .iter()
                .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
                .collect(),
        );

        check_and_deserialize(&Arc::<SchemaRegistry>::from_ref(state), value).map(ValidatedPath)
    }
}

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + RequestSchema,
    S: Send + Sync,
    Arc<SchemaRegistry>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest {
                message: e.body_text(),
            })?;

        check_and_deserialize(&Arc::<SchemaRegistry>::from_ref(state), query_object(pairs))
            .map(ValidatedQuery)
    }
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + RequestSchema,
    S: Send + Sync,
    Arc<SchemaRegistry>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(bytes_rejection)?;

        // An absent body is validated as `null` so that the schema reports it.
        let value = if bytes.is_empty() {
            Value::Null
        } else if !is_json {
            return Err(AppError::UnsupportedMediaType {
                message: "Expected request with `Content-Type: application/json`".to_string(),
            });
        } else {
            serde_json::from_slice(&bytes).map_err(|e| AppError::BadRequest {
                message: format!("Body is not valid JSON: {}", e),
            })?
        };

        check_and_deserialize(&Arc::<SchemaRegistry>::from_ref(state), value).map(ValidatedJson)
    }
}

fn check_and_deserialize<T>(registry: &SchemaRegistry, value: Value) -> AppResult<T>
where
    T: DeserializeOwned + RequestSchema,
{
    registry.validate(T::SCHEMA, &value)?;
    serde_json::from_value(value)
        .map_err(|e| AppError::validation(T::SCHEMA.part().as_str(), e.to_string()))
}

/// Builds the JSON object a query string is validated as.
///
/// A key given more than once becomes an array, which no enum accepts.
fn query_object(pairs: Vec<(String, String)>) -> Value {
    let mut object = Map::new();
    for (key, value) in pairs {
        match object.get_mut(&key) {
            Some(Value::Array(values)) => values.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                object.insert(key, Value::String(value));
            }
        }
    }
    Value::Object(object)
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

fn bytes_rejection(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge {
            message: rejection.body_text(),
        }
    } else {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{BeverageBody, BeverageQuery};
    use crate::models::YesNo;
    use axum::body::Body;
    use axum::http::Method;
    use serde_json::json;

    fn registry() -> Arc<SchemaRegistry> {
        Arc::new(SchemaRegistry::compile().unwrap())
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn query(uri: &str) -> AppResult<ValidatedQuery<BeverageQuery>> {
        let (mut parts, _) = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
            .into_parts();
        ValidatedQuery::<BeverageQuery>::from_request_parts(&mut parts, &registry()).await
    }

    #[tokio::test]
    async fn test_valid_json_body() {
        let result =
            ValidatedJson::<BeverageBody>::from_request(json_request(r#"{"kind":"green"}"#), &registry())
                .await;

        let ValidatedJson(body) = result.unwrap();
        assert_eq!(body.kind, "green");
    }

    #[tokio::test]
    async fn test_missing_kind_is_validation_error() {
        let result = ValidatedJson::<BeverageBody>::from_request(json_request("{}"), &registry()).await;

        match result.unwrap_err() {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "body");
                assert!(errors[0].message.contains("kind"));
            }
            other => panic!("Expected ValidationErrors error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wrong_kind_type_is_validation_error() {
        let result =
            ValidatedJson::<BeverageBody>::from_request(json_request(r#"{"kind":42}"#), &registry())
                .await;

        match result.unwrap_err() {
            AppError::ValidationErrors { errors } => assert_eq!(errors[0].field, "body/kind"),
            other => panic!("Expected ValidationErrors error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_body_is_validation_error() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::empty())
            .unwrap();

        let result = ValidatedJson::<BeverageBody>::from_request(request, &registry()).await;
        assert!(matches!(result, Err(AppError::ValidationErrors { .. })));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let result =
            ValidatedJson::<BeverageBody>::from_request(json_request(r#"{"kind":"#), &registry()).await;

        match result.unwrap_err() {
            AppError::BadRequest { message } => assert!(message.contains("not valid JSON")),
            other => panic!("Expected BadRequest error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_content_type_is_rejected() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from(r#"{"kind":"green"}"#))
            .unwrap();

        let result = ValidatedJson::<BeverageBody>::from_request(request, &registry()).await;
        assert!(matches!(result, Err(AppError::UnsupportedMediaType { .. })));
    }

    #[tokio::test]
    async fn test_query_toggles() {
        let ValidatedQuery(q) = query("/test?sugar=yes&milk=no").await.unwrap();
        assert_eq!(q.milk, Some(YesNo::No));
        assert_eq!(q.sugar, Some(YesNo::Yes));

        let ValidatedQuery(q) = query("/test").await.unwrap();
        assert!(q.milk.is_none() && q.sugar.is_none());
    }

    #[tokio::test]
    async fn test_query_rejects_unknown_value() {
        match query("/test?milk=maybe").await.unwrap_err() {
            AppError::ValidationErrors { errors } => assert_eq!(errors[0].field, "querystring/milk"),
            other => panic!("Expected ValidationErrors error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_query_rejects_extra_key() {
        assert!(matches!(
            query("/test?milk=yes&honey=yes").await,
            Err(AppError::ValidationErrors { .. })
        ));
    }

    #[tokio::test]
    async fn test_query_rejects_repeated_key() {
        assert!(matches!(
            query("/test?milk=yes&milk=no").await,
            Err(AppError::ValidationErrors { .. })
        ));
    }

    #[test]
    fn test_query_object_groups_repeated_keys() {
        let value = query_object(vec![
            ("milk".to_string(), "yes".to_string()),
            ("milk".to_string(), "no".to_string()),
            ("sugar".to_string(), "yes".to_string()),
        ]);
        assert_eq!(value, json!({ "milk": ["yes", "no"], "sugar": "yes" }));
    }

    #[test]
    fn test_json_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!has_json_content_type(&headers));

        headers.insert(header::CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(has_json_content_type(&headers));

        headers.insert(header::CONTENT_TYPE, "application/vnd.api+json".parse().unwrap());
        assert!(has_json_content_type(&headers));

        headers.insert(header::CONTENT_TYPE, "text/json".parse().unwrap());
        assert!(!has_json_content_type(&headers));
    }
}
