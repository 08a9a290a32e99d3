use serde::{Deserialize, Serialize};

use billdesk_core::{coerce_number, ValueObject};

use crate::line_item::{LineField, LineItem};

/// Fixed VAT percentage.
pub const VAT_PERCENT: f64 = 7.0;

/// VAT as a fraction, applied to the total after bill discount.
pub const VAT_RATE: f64 = VAT_PERCENT / 100.0;

/// Document-level aggregates. Values are unrounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_qty: f64,
    pub total_weight: f64,
    pub total_before_discount: f64,
    pub total_net_price: f64,
    pub total_after_bill_discount: f64,
    pub total_vat: f64,
    pub total_grand: f64,
}

impl ValueObject for Totals {}

/// Line items plus the bill-level discount, note and remark.
///
/// Invariant: `items[i].sequence_number() == i + 1` after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    items: Vec<LineItem>,
    bill_discount: f64,
    note: String,
    remark: String,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// A fresh ledger holding a single blank item.
    pub fn new() -> Self {
        Self {
            items: vec![LineItem::new(1)],
            bill_discount: 0.0,
            note: String::new(),
            remark: String::new(),
        }
    }

    /// Rebuild a ledger from restored state.
    ///
    /// Items are renumbered by position; their final prices were already
    /// recomputed when they were constructed. An empty list stays empty.
    pub fn from_parts(
        items: Vec<LineItem>,
        bill_discount: f64,
        note: String,
        remark: String,
    ) -> Self {
        let mut ledger = Self {
            items,
            bill_discount: if bill_discount.is_finite() { bill_discount } else { 0.0 },
            note,
            remark,
        };
        ledger.renumber();
        ledger
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn bill_discount(&self) -> f64 {
        self.bill_discount
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn remark(&self) -> &str {
        &self.remark
    }

    /// Write raw input into one field of the item at `index`.
    ///
    /// Numeric fields that fail to parse store `0`. Out-of-range indexes are
    /// ignored and yield `None`.
    pub fn update_field(&mut self, index: usize, field: LineField, raw: &str) -> Option<&LineItem> {
        let item = self.items.get_mut(index)?;
        item.set_field(field, raw);
        Some(item)
    }

    /// Append a blank item numbered `len + 1`.
    pub fn add_item(&mut self) -> &LineItem {
        let next = self.next_sequence_number();
        self.items.push(LineItem::new(next));
        &self.items[self.items.len() - 1]
    }

    /// Remove the item at `index` and renumber the rest. Out of range is a no-op.
    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.renumber();
        Some(removed)
    }

    pub fn set_bill_discount(&mut self, raw: &str) {
        self.bill_discount = coerce_number(raw);
    }

    pub fn set_note(&mut self, value: impl Into<String>) {
        self.note = value.into();
    }

    pub fn set_remark(&mut self, value: impl Into<String>) {
        self.remark = value.into();
    }

    /// Aggregate the current items and bill discount.
    pub fn compute_totals(&self) -> Totals {
        let mut totals = self.items.iter().fold(Totals::default(), |mut t, item| {
            t.total_qty += item.quantity();
            t.total_weight += item.weight();
            t.total_before_discount += item.price_before_discount();
            t.total_net_price += item.net_amount();
            t
        });

        totals.total_after_bill_discount = totals.total_net_price - self.bill_discount;
        totals.total_vat = totals.total_after_bill_discount * VAT_RATE;
        totals.total_grand = totals.total_after_bill_discount + totals.total_vat;
        totals
    }

    /// Back to a single blank item, zero discount and empty texts.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn next_sequence_number(&self) -> u32 {
        u32::try_from(self.items.len()).map_or(u32::MAX, |n| n.saturating_add(1))
    }

    fn renumber(&mut self) {
        for (position, item) in (1u32..).zip(self.items.iter_mut()) {
            item.renumber(position);
        }
    }
}
