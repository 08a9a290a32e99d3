//! Infrastructure layer: draft persistence, storage backends, config.

pub mod config;
pub mod draft_store;
pub mod kv;


pub use config::StorageConfig;
pub use draft_store::{DraftRepository, LoadOutcome};
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StoreError};
