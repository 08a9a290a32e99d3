use core::str::FromStr;

use serde::{Deserialize, Serialize};

use billdesk_core::{DomainError, ValueObject};

/// Invoice header: free-text document metadata.
///
/// Dates and currency are kept as typed; nothing here is parsed or computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceHeader {
    pub doc_number: String,
    pub issue_date: String,
    pub due_date: String,
    pub customer_name: String,
    pub billing_address: String,
    pub shipping_address: String,
    pub reference_doc: String,
    pub currency: String,
}

impl ValueObject for InvoiceHeader {}

/// Header field selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderField {
    DocNumber,
    IssueDate,
    DueDate,
    CustomerName,
    BillingAddress,
    ShippingAddress,
    ReferenceDoc,
    Currency,
}

impl HeaderField {
    pub const ALL: [HeaderField; 8] = [
        HeaderField::DocNumber,
        HeaderField::IssueDate,
        HeaderField::DueDate,
        HeaderField::CustomerName,
        HeaderField::BillingAddress,
        HeaderField::ShippingAddress,
        HeaderField::ReferenceDoc,
        HeaderField::Currency,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HeaderField::DocNumber => "docNumber",
            HeaderField::IssueDate => "issueDate",
            HeaderField::DueDate => "dueDate",
            HeaderField::CustomerName => "customerName",
            HeaderField::BillingAddress => "billingAddress",
            HeaderField::ShippingAddress => "shippingAddress",
            HeaderField::ReferenceDoc => "referenceDoc",
            HeaderField::Currency => "currency",
        }
    }
}

impl FromStr for HeaderField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeaderField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| DomainError::unknown_field("header", s))
    }
}

impl core::fmt::Display for HeaderField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl InvoiceHeader {
    pub fn get(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::DocNumber => &self.doc_number,
            HeaderField::IssueDate => &self.issue_date,
            HeaderField::DueDate => &self.due_date,
            HeaderField::CustomerName => &self.customer_name,
            HeaderField::BillingAddress => &self.billing_address,
            HeaderField::ShippingAddress => &self.shipping_address,
            HeaderField::ReferenceDoc => &self.reference_doc,
            HeaderField::Currency => &self.currency,
        }
    }

    /// Store `value` verbatim; other fields are untouched.
    pub fn set(&mut self, field: HeaderField, value: impl Into<String>) {
        let slot = match field {
            HeaderField::DocNumber => &mut self.doc_number,
            HeaderField::IssueDate => &mut self.issue_date,
            HeaderField::DueDate => &mut self.due_date,
            HeaderField::CustomerName => &mut self.customer_name,
            HeaderField::BillingAddress => &mut self.billing_address,
            HeaderField::ShippingAddress => &mut self.shipping_address,
            HeaderField::ReferenceDoc => &mut self.reference_doc,
            HeaderField::Currency => &mut self.currency,
        };
        *slot = value.into();
    }

    pub fn is_blank(&self) -> bool {
        HeaderField::ALL.into_iter().all(|f| self.get(f).is_empty())
    }
}
