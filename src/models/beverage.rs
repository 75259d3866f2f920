//! Beverage order model.
//!
//! A `BeverageOrder` is assembled from already validated request parts and
//! knows how to describe itself. It holds no state beyond one request.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Enums
// ============================================================================

/// Drinks served by the `/api/beverages/{drink}` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Drink {
    Tea,
    Coffee,
    Chai,
}

impl Drink {
    pub fn as_str(&self) -> &'static str {
        match self {
            Drink::Tea => "tea",
            Drink::Coffee => "coffee",
            Drink::Chai => "chai",
        }
    }
}

impl fmt::Display for Drink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A "yes"/"no" toggle as it appears in query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

// ============================================================================
// Order
// ============================================================================

/// Addition names in the order they are reported.
pub const MILK: &str = "milk";
pub const SUGAR: &str = "sugar";

/// A validated beverage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeverageOrder {
    pub drink: Drink,
    pub milk: Option<YesNo>,
    pub sugar: Option<YesNo>,
    pub kind: String,
}

impl BeverageOrder {
    pub fn new(drink: Drink, milk: Option<YesNo>, sugar: Option<YesNo>, kind: String) -> Self {
        Self {
            drink,
            milk,
            sugar,
            kind,
        }
    }

    /// `"<kind> <drink>"`, e.g. `"green tea"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.kind, self.drink)
    }

    /// Requested additions. Milk always precedes sugar.
    pub fn additions(&self) -> Vec<String> {
        let mut with = Vec::with_capacity(2);
        if self.milk.is_some_and(|m| m.is_yes()) {
            with.push(MILK.to_string());
        }
        if self.sugar.is_some_and(|s| s.is_yes()) {
            with.push(SUGAR.to_string());
        }
        with
    }
}
