//! Credential Store
//!
//! Storage layer for login records, consumed by the detail screen through a
//! narrow asynchronous contract.

pub mod models;
pub mod schema;
pub mod sqlite;

use thiserror::Error;

// Re-exports
pub use models::{CredentialRecord, RecordId, UsageMetadata};
pub use sqlite::{SqliteStore, StoreConfig};

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Asynchronous contract the detail controller holds against the store.
///
/// All three calls are expected to resume on the same single-threaded context
/// the controller runs on. The controller performs no retries and holds no
/// cancellation handle; a completion arriving after the screen is gone must
/// simply find nobody listening.
#[allow(async_fn_in_trait)]
pub trait CredentialStore {
    /// Fetch usage metadata for a record. Never fails the caller: "no data"
    /// is a valid success value, and any internal error degrades to `None`.
    async fn get_usage_data(&self, id: &RecordId) -> Option<UsageMetadata>;

    /// Read the authoritative record by id.
    async fn get_record(&self, id: &RecordId) -> Option<CredentialRecord>;

    /// Persist an updated record. `significant` asks the store to refresh
    /// change-tracking metadata (the password-changed timestamp) as part of
    /// the write.
    async fn update_record(
        &self,
        id: &RecordId,
        updated: &CredentialRecord,
        significant: bool,
    ) -> StoreResult<()>;
}
