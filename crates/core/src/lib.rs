//! `billdesk-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod number;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use number::{coerce_number, format_amount, format_plain};
pub use value_object::ValueObject;
