//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod beverages;
pub mod greetings;
pub mod pets;
