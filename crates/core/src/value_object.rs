//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity; two instances with the same attribute values
/// are interchangeable. In this workspace that covers computed figures such as
/// ledger totals and the display snapshots built from them, as well as plain
/// records like the invoice header.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Totals { net: f64, vat: f64 }
///
/// impl ValueObject for Totals {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
