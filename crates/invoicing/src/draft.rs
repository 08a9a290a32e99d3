//! The whole invoice form: header plus ledger, edited through commands.

use serde::{Deserialize, Serialize};

use crate::header::{HeaderField, InvoiceHeader};
use crate::ledger::{Ledger, Totals};
use crate::line_item::LineField;
use crate::summary::DraftSummary;

/// One user edit forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DraftCommand {
    UpdateLineField {
        index: usize,
        field: LineField,
        value: String,
    },
    AddLine,
    RemoveLine {
        index: usize,
    },
    SetBillDiscount {
        value: String,
    },
    SetHeaderField {
        field: HeaderField,
        value: String,
    },
    SetNote {
        value: String,
    },
    SetRemark {
        value: String,
    },
    Reset,
}

impl DraftCommand {
    pub fn command_type(&self) -> &'static str {
        match self {
            DraftCommand::UpdateLineField { .. } => "update_line_field",
            DraftCommand::AddLine => "add_line",
            DraftCommand::RemoveLine { .. } => "remove_line",
            DraftCommand::SetBillDiscount { .. } => "set_bill_discount",
            DraftCommand::SetHeaderField { .. } => "set_header_field",
            DraftCommand::SetNote { .. } => "set_note",
            DraftCommand::SetRemark { .. } => "set_remark",
            DraftCommand::Reset => "reset",
        }
    }
}

/// Invoice draft: the unit the repository loads, saves and clears.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceDraft {
    header: InvoiceHeader,
    ledger: Ledger,
}

impl InvoiceDraft {
    /// Blank header and a ledger with one blank item.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(header: InvoiceHeader, ledger: Ledger) -> Self {
        Self { header, ledger }
    }

    pub fn header(&self) -> &InvoiceHeader {
        &self.header
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn totals(&self) -> Totals {
        self.ledger.compute_totals()
    }

    pub fn summary(&self) -> DraftSummary {
        DraftSummary::from_draft(self)
    }

    /// Apply one edit. Edits never fail; bad indexes and bad numbers degrade
    /// silently.
    pub fn handle(&mut self, command: DraftCommand) {
        tracing::debug!(command = command.command_type(), "applying draft command");

        match command {
            DraftCommand::UpdateLineField {
                index,
                field,
                value,
            } => {
                if self.ledger.update_field(index, field, &value).is_none() {
                    tracing::debug!(index, %field, "line index out of range; edit ignored");
                }
            }
            DraftCommand::AddLine => {
                self.ledger.add_item();
            }
            DraftCommand::RemoveLine { index } => {
                if self.ledger.remove_item(index).is_none() {
                    tracing::debug!(index, "line index out of range; removal ignored");
                }
            }
            DraftCommand::SetBillDiscount { value } => self.ledger.set_bill_discount(&value),
            DraftCommand::SetHeaderField { field, value } => self.header.set(field, value),
            DraftCommand::SetNote { value } => self.ledger.set_note(value),
            DraftCommand::SetRemark { value } => self.ledger.set_remark(value),
            DraftCommand::Reset => self.reset(),
        }
    }

    /// Replace everything with defaults.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
