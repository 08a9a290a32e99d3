//! Invoicing domain module.
//!
//! Line items, the invoice ledger and its totals, the invoice header and the
//! draft that ties them together. Pure domain logic: no IO, no storage.

pub mod draft;
pub mod header;
pub mod ledger;
pub mod line_item;
pub mod summary;

pub use draft::{DraftCommand, InvoiceDraft};
pub use header::{HeaderField, InvoiceHeader};
pub use ledger::{Ledger, Totals, VAT_PERCENT, VAT_RATE};
pub use line_item::{LineField, LineItem, Unit};
pub use summary::{DraftSummary, LineView, TotalsView, DISPLAY_CURRENCY};
