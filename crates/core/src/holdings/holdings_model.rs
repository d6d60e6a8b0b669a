//! Lot and Holding domain models.
//!
//! A `Holding` is one instrument position inside an account, composed of
//! purchase lots in chronological order. Lot order is the FIFO contract:
//! lots are always appended on purchase and never re-sorted.
//!
//! Mutating methods are `pub(crate)`: only the owning [`Account`] may alter
//! a holding's lots. External code sees read-only views.
//!
//! [`Account`]: crate::accounts::Account

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AccountError, Result};
use crate::money::{Money, Price, Quantity};

/// One discrete purchase batch of an instrument.
///
/// The initial quantity and unit price are fixed at purchase; only the
/// remaining quantity shrinks as sales are matched against the lot.
/// Invariant: `0 <= remaining <= initial`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    id: String,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
    unit_price: Price,
    purchased_at: DateTime<Utc>,
}

impl Lot {
    /// Creates a new lot with `remaining = initial`.
    pub fn new(quantity: Quantity, unit_price: Price, purchased_at: DateTime<Utc>) -> Self {
        Lot {
            id: Uuid::new_v4().to_string(),
            initial_quantity: quantity,
            remaining_quantity: quantity,
            unit_price,
            purchased_at,
        }
    }

    /// Rebuilds a lot from stored values, re-checking the lot invariant.
    pub fn from_parts(
        id: String,
        initial_quantity: Quantity,
        remaining_quantity: Quantity,
        unit_price: Price,
        purchased_at: DateTime<Utc>,
    ) -> Result<Self> {
        if remaining_quantity > initial_quantity {
            return Err(crate::errors::ValidationError::InvalidQuantity(format!(
                "lot {} remaining ({}) exceeds initial ({})",
                id, remaining_quantity, initial_quantity
            ))
            .into());
        }
        Ok(Lot {
            id,
            initial_quantity,
            remaining_quantity,
            unit_price,
            purchased_at,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    pub fn purchased_at(&self) -> DateTime<Utc> {
        self.purchased_at
    }

    /// True once every share in the lot has been sold.
    pub fn is_depleted(&self) -> bool {
        self.remaining_quantity.is_zero()
    }

    /// Reduces the remaining quantity. Callers clamp `taken` to the
    /// remaining quantity first.
    pub(crate) fn reduce(&mut self, taken: Quantity) {
        self.remaining_quantity = self.remaining_quantity.sub(taken);
    }
}

/// Result of one completed sale: proceeds, matched cost basis, and the
/// realized profit (`proceeds - cost_basis`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellOutcome {
    proceeds: Money,
    cost_basis: Money,
    profit: Money,
}

impl SellOutcome {
    pub fn new(proceeds: Money, cost_basis: Money) -> Self {
        SellOutcome {
            proceeds,
            cost_basis,
            profit: proceeds - cost_basis,
        }
    }

    pub fn proceeds(&self) -> Money {
        self.proceeds
    }

    pub fn cost_basis(&self) -> Money {
        self.cost_basis
    }

    pub fn profit(&self) -> Money {
        self.profit
    }

    pub fn is_profitable(&self) -> bool {
        self.profit.is_positive()
    }

    pub fn is_loss(&self) -> bool {
        self.profit.is_negative()
    }
}

/// An ordered collection of lots for one instrument.
///
/// Created empty on the first purchase of a symbol and kept for the life of
/// the account, even after every lot is sold; an empty holding stays
/// addressable for historical queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    id: String,
    symbol: String,
    lots: VecDeque<Lot>,
}

impl Holding {
    /// Creates an empty holding for a symbol.
    pub fn new(symbol: &str) -> Self {
        Holding {
            id: Uuid::new_v4().to_string(),
            symbol: symbol.to_string(),
            lots: VecDeque::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Total remaining shares across all lots.
    pub fn total_quantity(&self) -> Quantity {
        self.lots
            .iter()
            .fold(Quantity::ZERO, |acc, lot| acc.add(lot.remaining_quantity()))
    }

    /// Read-only view of the lots in purchase order.
    pub fn lots(&self) -> impl Iterator<Item = &Lot> {
        self.lots.iter()
    }

    /// Snapshot copy of the lots in purchase order.
    pub fn lots_snapshot(&self) -> Vec<Lot> {
        self.lots.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// Appends a new lot for a purchase. Always appended at the end; the
    /// resulting order is the FIFO matching order.
    pub(crate) fn buy(&mut self, quantity: Quantity, unit_price: Price, at: DateTime<Utc>) {
        let lot = Lot::new(quantity, unit_price, at);
        debug!(
            "Holding {}: appending lot {} ({} @ {})",
            self.symbol,
            lot.id(),
            quantity,
            unit_price
        );
        self.lots.push_back(lot);
    }

    /// Sells `quantity` shares at `unit_price` using FIFO lot matching.
    ///
    /// Fails with `ConflictQuantity` and mutates nothing when the requested
    /// quantity exceeds the total remaining shares. On success, depleted
    /// lots are purged from the list.
    pub(crate) fn sell(&mut self, quantity: Quantity, unit_price: Price) -> Result<SellOutcome> {
        let available = self.total_quantity();
        if quantity > available {
            return Err(AccountError::ConflictQuantity {
                symbol: self.symbol.clone(),
                requested: quantity.value(),
                available: available.value(),
            }
            .into());
        }

        let mut to_sell = quantity;
        let mut cost_basis = Money::zero();
        for lot in self.lots.iter_mut() {
            if to_sell.is_zero() {
                break;
            }
            if lot.is_depleted() {
                continue;
            }
            let taken = to_sell.min(lot.remaining_quantity());
            cost_basis = cost_basis + lot.unit_price().total(taken);
            lot.reduce(taken);
            to_sell = to_sell.sub(taken);
        }

        self.lots.retain(|lot| !lot.is_depleted());

        let proceeds = unit_price.total(quantity);
        Ok(SellOutcome::new(proceeds, cost_basis))
    }

    /// Rebuilds a holding from stored lots, preserving their order.
    ///
    /// Lot order in `lots` must be purchase order; it is taken as-is and
    /// never re-sorted. Fails with `DuplicateEntity` on a repeated lot id.
    pub fn from_parts(id: String, symbol: String, lots: Vec<Lot>) -> Result<Self> {
        let mut holding = Holding {
            id,
            symbol,
            lots: VecDeque::with_capacity(lots.len()),
        };
        for lot in lots {
            if holding.lots.iter().any(|existing| existing.id() == lot.id()) {
                return Err(AccountError::DuplicateEntity(format!(
                    "lot {} already exists in holding {}",
                    lot.id(),
                    holding.symbol
                ))
                .into());
            }
            holding.lots.push_back(lot);
        }
        Ok(holding)
    }
}
