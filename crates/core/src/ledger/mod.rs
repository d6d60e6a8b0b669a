//! Append-only transaction log.

pub mod ledger_model;
pub mod ledger_traits;


pub use ledger_model::{EntryKind, LedgerEntry};
pub use ledger_traits::LedgerStore;
