//! Beverage order DTOs.
//!
//! The request is split the way it arrives: path parameters, query string
//! and JSON body. Each part is bound to its schema through [`RequestSchema`].

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::schema::{RequestSchema, SchemaId};
use crate::models::{BeverageOrder, Drink, YesNo};

// ============================================================================
// Request DTOs
// ============================================================================

/// Path parameters of `POST /api/beverages/{drink}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BeverageParams {
    pub drink: Drink,
}

impl RequestSchema for BeverageParams {
    const SCHEMA: SchemaId = SchemaId::BeverageParams;
}

/// Optional additions passed in the query string.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BeverageQuery {
    /// Add milk
    #[param(example = "yes")]
    pub milk: Option<YesNo>,
    /// Add sugar
    #[param(example = "no")]
    pub sugar: Option<YesNo>,
}

impl RequestSchema for BeverageQuery {
    const SCHEMA: SchemaId = SchemaId::BeverageQuery;
}

/// Request body for ordering a beverage.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({ "kind": "green" }))]
pub struct BeverageBody {
    /// Variety of the drink, e.g. "green" or "black"
    pub kind: String,
}

impl RequestSchema for BeverageBody {
    const SCHEMA: SchemaId = SchemaId::BeverageBody;
}

impl BeverageBody {
    /// Combines the validated request parts into an order.
    pub fn into_order(self, params: BeverageParams, query: BeverageQuery) -> BeverageOrder {
        BeverageOrder::new(params.drink, query.milk, query.sugar, self.kind)
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for a prepared beverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "drink": "black coffee", "with": ["milk", "sugar"] }))]
pub struct BeverageResponse {
    /// `"<kind> <drink>"`
    pub drink: String,
    /// Additions, milk before sugar
    pub with: Vec<String>,
}

impl From<BeverageOrder> for BeverageResponse {
    fn from(order: BeverageOrder) -> Self {
        Self {
            drink: order.label(),
            with: order.additions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_from_order() {
        let body = BeverageBody {
            kind: "black".to_string(),
        };
        let order = body.into_order(
            BeverageParams {
                drink: Drink::Coffee,
            },
            BeverageQuery {
                milk: Some(YesNo::Yes),
                sugar: Some(YesNo::Yes),
            },
        );

        let response = BeverageResponse::from(order);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "drink": "black coffee", "with": ["milk", "sugar"] })
        );
    }

    #[test]
    fn test_empty_additions_serialize_as_array() {
        let order = BeverageOrder::new(Drink::Tea, None, None, "green".to_string());
        let value = serde_json::to_value(BeverageResponse::from(order)).unwrap();
        assert_eq!(value, json!({ "drink": "green tea", "with": [] }));
    }

    #[test]
    fn test_query_deserializes_missing_toggles() {
        let query: BeverageQuery = serde_json::from_value(json!({})).unwrap();
        assert!(query.milk.is_none());
        assert!(query.sugar.is_none());
    }
}
