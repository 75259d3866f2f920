//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `beverage` - Beverage order request parts and response
//! - `greeting` - Greeting responses
//! - `pet` - Pet creation request
//! - `error` - Common error response DTOs

mod beverage;
mod error;
mod greeting;
mod pet;

pub use beverage::{BeverageBody, BeverageParams, BeverageQuery, BeverageResponse};
pub use error::ErrorResponse;
pub use greeting::{GoodByeResponse, HelloResponse};
pub use pet::PetCreationRequest;
