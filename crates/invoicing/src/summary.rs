//! Display snapshot of a draft.
//!
//! Everything here is derived from the draft on demand. Monetary figures are
//! rounded to two decimals at this point and nowhere else.

use serde::Serialize;

use billdesk_core::{format_amount, format_plain, ValueObject};

use crate::draft::InvoiceDraft;
use crate::header::InvoiceHeader;
use crate::ledger::{Totals, VAT_PERCENT};
use crate::line_item::{LineItem, Unit};

/// Currency suffix shown next to every summary figure.
pub const DISPLAY_CURRENCY: &str = "THB";

/// One row of the item table, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub number: u32,
    pub product_code: String,
    pub quantity: String,
    pub weight: String,
    pub unit_price: String,
    pub unit: String,
    pub price_before_discount: String,
    pub discount: String,
    pub final_price: String,
}

impl From<&LineItem> for LineView {
    fn from(item: &LineItem) -> Self {
        Self {
            number: item.sequence_number(),
            product_code: item.product_code().to_string(),
            quantity: format_plain(item.quantity()),
            weight: format_plain(item.weight()),
            unit_price: format_plain(item.unit_price()),
            unit: item.unit().label().to_string(),
            price_before_discount: format_amount(item.price_before_discount()),
            discount: format_plain(item.discount_percent()),
            final_price: format_amount(item.final_price()),
        }
    }
}

impl ValueObject for LineView {}

/// The totals row and the summary panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsView {
    pub total_qty: String,
    pub total_weight: String,
    pub total_before_discount: String,
    pub total_net_price: String,
    pub bill_discount: String,
    pub total_after_bill_discount: String,
    pub vat_label: String,
    pub total_vat: String,
    pub total_grand: String,
    pub currency: &'static str,
}

impl TotalsView {
    pub fn new(totals: &Totals, bill_discount: f64) -> Self {
        Self {
            total_qty: format_plain(totals.total_qty),
            total_weight: format_plain(totals.total_weight),
            total_before_discount: format_amount(totals.total_before_discount),
            total_net_price: format_amount(totals.total_net_price),
            bill_discount: format_amount(bill_discount),
            total_after_bill_discount: format_amount(totals.total_after_bill_discount),
            vat_label: vat_label(),
            total_vat: format_amount(totals.total_vat),
            total_grand: format_amount(totals.total_grand),
            currency: DISPLAY_CURRENCY,
        }
    }

    /// "192.60 THB"
    pub fn grand_total_with_currency(&self) -> String {
        format!("{} {}", self.total_grand, self.currency)
    }
}

impl ValueObject for TotalsView {}

/// Everything the presentation layer needs to re-render the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummary {
    pub header: InvoiceHeader,
    pub lines: Vec<LineView>,
    pub totals: TotalsView,
    /// Labels for the unit selector, in display order.
    pub unit_options: Vec<String>,
    pub note: String,
    pub remark: String,
}

impl DraftSummary {
    pub fn from_draft(draft: &InvoiceDraft) -> Self {
        let ledger = draft.ledger();
        Self {
            header: draft.header().clone(),
            lines: ledger.items().iter().map(LineView::from).collect(),
            totals: TotalsView::new(&ledger.compute_totals(), ledger.bill_discount()),
            unit_options: Unit::choices().into_iter().map(String::from).collect(),
            note: ledger.note().to_string(),
            remark: ledger.remark().to_string(),
        }
    }
}

impl ValueObject for DraftSummary {}

fn vat_label() -> String {
    format!("Vat ({}%)", format_plain(VAT_PERCENT))
}
