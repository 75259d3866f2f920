//! Shared request utilities.

pub mod validate;
