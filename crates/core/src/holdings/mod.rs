//! Lot-level position tracking with FIFO matching.

pub mod holdings_model;


pub use holdings_model::{Holding, Lot, SellOutcome};
