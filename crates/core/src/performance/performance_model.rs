//! Performance reporting models.

use serde::{Deserialize, Serialize};

use crate::money::{Money, Quantity};

/// Per-instrument performance row derived from the ledger and live prices.
///
/// A returned collection of rows is a frozen snapshot; it is never mutated
/// after aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingPerformance {
    pub symbol: String,
    /// Sum of all buy quantities ever recorded for the symbol.
    pub total_bought: Quantity,
    /// Shares still held, taken from the live account holding.
    pub remaining_quantity: Quantity,
    /// Cost-weighted average purchase price, rounded half-up to two decimals.
    pub average_purchase_price: Money,
    /// Live price, or zero when the price map has no entry for the symbol.
    pub current_price: Money,
    /// Paper gain over the live lots; zero when the current price is unknown.
    pub unrealized_gain: Money,
    /// Sum of realized profits from sell entries.
    pub realized_gain: Money,
}
