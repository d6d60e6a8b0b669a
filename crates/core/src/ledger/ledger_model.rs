//! Ledger entry domain models.
//!
//! A ledger entry is the immutable record of one completed account
//! operation. Entries form an append-only log persisted separately from the
//! account aggregate and joined only by account id, so reading an account's
//! current state never requires loading its full history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::holdings::SellOutcome;
use crate::money::{Money, Price, Quantity};

/// Kind of completed operation recorded by a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    Deposit,
    Withdrawal,
    Buy,
    Sell,
}

/// Immutable record of one completed operation.
///
/// `symbol` and `unit_price` are absent for pure cash movements; `quantity`
/// is zero for them. `realized_profit` is zero unless the kind is `Sell`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    pub account_id: String,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub quantity: Quantity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Price>,
    pub total_amount: Money,
    pub realized_profit: Money,
    pub recorded_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Records a completed cash deposit.
    pub fn deposit(account_id: &str, amount: Money) -> Self {
        Self::cash(account_id, EntryKind::Deposit, amount)
    }

    /// Records a completed cash withdrawal.
    pub fn withdrawal(account_id: &str, amount: Money) -> Self {
        Self::cash(account_id, EntryKind::Withdrawal, amount)
    }

    /// Records a completed purchase. `total_cost` is `unit_price x quantity`.
    pub fn buy(
        account_id: &str,
        symbol: &str,
        quantity: Quantity,
        unit_price: Price,
        total_cost: Money,
    ) -> Self {
        LedgerEntry {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            kind: EntryKind::Buy,
            symbol: Some(symbol.to_string()),
            quantity,
            unit_price: Some(unit_price),
            total_amount: total_cost,
            realized_profit: Money::zero(),
            recorded_at: Utc::now(),
        }
    }

    /// Records a completed sale from its outcome.
    pub fn sell(
        account_id: &str,
        symbol: &str,
        quantity: Quantity,
        unit_price: Price,
        outcome: &SellOutcome,
    ) -> Self {
        LedgerEntry {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            kind: EntryKind::Sell,
            symbol: Some(symbol.to_string()),
            quantity,
            unit_price: Some(unit_price),
            total_amount: outcome.proceeds(),
            realized_profit: outcome.profit(),
            recorded_at: Utc::now(),
        }
    }

    fn cash(account_id: &str, kind: EntryKind, amount: Money) -> Self {
        LedgerEntry {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            kind,
            symbol: None,
            quantity: Quantity::ZERO,
            unit_price: None,
            total_amount: amount,
            realized_profit: Money::zero(),
            recorded_at: Utc::now(),
        }
    }

    /// True for entries that reference an instrument (buy/sell).
    pub fn is_trade(&self) -> bool {
        self.symbol.is_some()
    }
}
