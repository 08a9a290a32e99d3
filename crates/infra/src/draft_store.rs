//! Draft persistence over a key-value store.
//!
//! A draft is stored under five independent keys. Any key that is absent on
//! load falls back to its default, so a partially written store still loads.

use serde::de::DeserializeOwned;
use serde::Serialize;

use billdesk_core::{coerce_number, format_plain};
use billdesk_invoicing::{InvoiceDraft, InvoiceHeader, Ledger, LineItem};

use crate::kv::{KeyValueStore, StoreError};

pub const ITEMS_KEY: &str = "items";
pub const HEADER_KEY: &str = "headerInfo";
pub const NOTE_KEY: &str = "note";
pub const REMARK_KEY: &str = "remark";
pub const BILL_DISCOUNT_KEY: &str = "billDiscount";

/// Every key a draft occupies.
pub const DRAFT_KEYS: [&str; 5] = [ITEMS_KEY, HEADER_KEY, NOTE_KEY, REMARK_KEY, BILL_DISCOUNT_KEY];

/// Bill discount shown when nothing has been saved yet.
pub const DEFAULT_BILL_DISCOUNT: &str = "0.00";

/// Result of a load that is not allowed to fail.
#[derive(Debug)]
pub struct LoadOutcome {
    pub draft: InvoiceDraft,
    /// Set when the stored draft could not be read and defaults were used.
    pub error: Option<StoreError>,
}

impl LoadOutcome {
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// Loads, saves and clears the working draft.
#[derive(Debug, Clone)]
pub struct DraftRepository<S> {
    store: S,
}

impl<S> DraftRepository<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rehydrate the saved draft. Absent or empty keys take their defaults.
    pub fn load(&self) -> Result<InvoiceDraft, StoreError> {
        let items: Vec<LineItem> = match self.get_non_empty(ITEMS_KEY)? {
            Some(raw) => decode(ITEMS_KEY, &raw)?,
            None => vec![LineItem::new(1)],
        };
        let header: InvoiceHeader = match self.get_non_empty(HEADER_KEY)? {
            Some(raw) => decode(HEADER_KEY, &raw)?,
            None => InvoiceHeader::default(),
        };
        let note = self.get_non_empty(NOTE_KEY)?.unwrap_or_default();
        let remark = self.get_non_empty(REMARK_KEY)?.unwrap_or_default();
        let bill_discount = self
            .get_non_empty(BILL_DISCOUNT_KEY)?
            .unwrap_or_else(|| DEFAULT_BILL_DISCOUNT.to_string());

        let ledger = Ledger::from_parts(items, coerce_number(&bill_discount), note, remark);
        tracing::debug!(items = ledger.len(), "draft loaded");
        Ok(InvoiceDraft::from_parts(header, ledger))
    }

    /// Like [`load`](Self::load), but a failure yields the default draft and
    /// hands the error back for the caller to report.
    pub fn load_or_default(&self) -> LoadOutcome {
        match self.load() {
            Ok(draft) => LoadOutcome { draft, error: None },
            Err(err) => {
                tracing::warn!(error = %err, "stored draft unreadable; starting from defaults");
                LoadOutcome {
                    draft: InvoiceDraft::new(),
                    error: Some(err),
                }
            }
        }
    }

    /// Overwrite all five keys with the draft's current state.
    pub fn save(&self, draft: &InvoiceDraft) -> Result<(), StoreError> {
        let ledger = draft.ledger();
        let entries = vec![
            (ITEMS_KEY.to_string(), encode(ITEMS_KEY, ledger.items())?),
            (HEADER_KEY.to_string(), encode(HEADER_KEY, draft.header())?),
            (NOTE_KEY.to_string(), ledger.note().to_string()),
            (REMARK_KEY.to_string(), ledger.remark().to_string()),
            (
                BILL_DISCOUNT_KEY.to_string(),
                format_plain(ledger.bill_discount()),
            ),
        ];

        self.store.set_many(entries)?;
        tracing::info!(items = ledger.len(), "draft saved");
        Ok(())
    }

    /// Remove every draft key and return the default draft to continue with.
    pub fn clear(&self) -> Result<InvoiceDraft, StoreError> {
        self.store.remove_many(&DRAFT_KEYS)?;
        tracing::info!("draft cleared");
        Ok(InvoiceDraft::new())
    }

    /// An empty stored string counts as absent.
    fn get_non_empty(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.store.get(key)?.filter(|raw| !raw.is_empty()))
    }
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, StoreError> {
    serde_json::from_str(raw).map_err(|err| StoreError::serialization(key, err))
}

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|err| StoreError::serialization(key, err))
}
