//! Ledger store trait.
//!
//! The contract for the append-only transaction log. Storage-specific
//! details live in concrete implementations outside this crate.

use async_trait::async_trait;

use super::ledger_model::LedgerEntry;
use crate::errors::Result;

/// Contract for the append-only ledger store.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Appends one completed entry. Entries are never mutated or deleted.
    async fn append(&self, entry: &LedgerEntry) -> Result<()>;

    /// Lists the full, unfiltered history for an account in chronological
    /// order. Symbol/kind/date filtering is a storage-side extension, not
    /// part of this contract.
    async fn list_by_account(&self, account_id: &str) -> Result<Vec<LedgerEntry>>;
}
