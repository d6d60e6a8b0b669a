//! Lotbook Core - accounting core for investor accounts.
//!
//! Tracks cash and instrument holdings inside an account aggregate,
//! enforces solvency and share invariants on every operation, and computes
//! realized/unrealized gain with lot-level FIFO cost-basis matching over
//! exact decimals. Persistence, transport, and live market data are
//! boundary concerns expressed here only as traits.

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod holdings;
pub mod ledger;
pub mod money;
pub mod performance;
pub mod quotes;

// Re-export the domain surface
pub use accounts::{Account, AccountService, AccountServiceTrait, AccountStore};
pub use holdings::{Holding, Lot, SellOutcome};
pub use ledger::{EntryKind, LedgerEntry, LedgerStore};
pub use money::{Money, Price, Quantity};
pub use performance::{aggregate_performance, HoldingPerformance, PerformanceService};
pub use quotes::QuoteProvider;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
