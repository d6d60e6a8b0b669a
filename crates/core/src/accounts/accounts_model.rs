//! Account aggregate.
//!
//! The account is the aggregate root owning a cash balance and the holdings
//! keyed by instrument symbol. It is the sole authority over its holdings'
//! lots: every mutation routes through an account operation, and every
//! validation failure aborts before any state change.
//!
//! Invariants: cash balance is never negative; a buy requires the full cost
//! in cash; a sell requires an existing holding with enough remaining
//! shares. These hold only under the single-writer precondition documented
//! on [`AccountService`](super::AccountService).

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::SYMBOL_PATTERN;
use crate::errors::{AccountError, Result, ValidationError};
use crate::holdings::{Holding, SellOutcome};
use crate::money::{Money, Price, Quantity};

fn symbol_regex() -> &'static Regex {
    static SYMBOL_RE: OnceLock<Regex> = OnceLock::new();
    SYMBOL_RE.get_or_init(|| Regex::new(SYMBOL_PATTERN).expect("symbol pattern is valid"))
}

/// Validates an instrument symbol against the fixed uppercase format.
pub fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol_regex().is_match(symbol) {
        Ok(())
    } else {
        Err(ValidationError::InvalidSymbol(symbol.to_string()).into())
    }
}

/// Aggregate root for one investor account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    id: String,
    owner_name: String,
    cash_balance: Money,
    created_at: DateTime<Utc>,
    holdings: HashMap<String, Holding>,
}

impl Account {
    /// Opens a new account with a zero balance.
    pub fn open(owner_name: &str) -> Result<Self> {
        if owner_name.trim().is_empty() {
            return Err(ValidationError::InvalidInput(
                "Owner name cannot be empty".to_string(),
            )
            .into());
        }
        Ok(Account {
            id: Uuid::new_v4().to_string(),
            owner_name: owner_name.to_string(),
            cash_balance: Money::zero(),
            created_at: Utc::now(),
            holdings: HashMap::new(),
        })
    }

    /// Rebuilds an account from stored values, re-checking the solvency
    /// invariant. Holdings are attached afterwards via [`insert_holding`].
    ///
    /// [`insert_holding`]: Account::insert_holding
    pub fn from_parts(
        id: String,
        owner_name: String,
        cash_balance: Money,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        if cash_balance.is_negative() {
            return Err(ValidationError::InvalidAmount(format!(
                "stored balance for account {} is negative: {}",
                id, cash_balance
            ))
            .into());
        }
        Ok(Account {
            id,
            owner_name,
            cash_balance,
            created_at,
            holdings: HashMap::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn cash_balance(&self) -> Money {
        self.cash_balance
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Read-only view of one holding. A holding with zero shares still
    /// exists; `None` means the symbol was never bought.
    pub fn holding(&self, symbol: &str) -> Option<&Holding> {
        self.holdings.get(symbol)
    }

    /// Read-only view of all holdings, in no particular order.
    pub fn holdings(&self) -> impl Iterator<Item = &Holding> {
        self.holdings.values()
    }

    /// Adds cash to the balance.
    ///
    /// Fails with `InvalidAmount` when `amount` is not strictly positive.
    pub fn deposit(&mut self, amount: Money) -> Result<()> {
        if !amount.is_positive() {
            return Err(ValidationError::InvalidAmount(format!(
                "deposit amount must be strictly positive, got {}",
                amount
            ))
            .into());
        }
        self.cash_balance = self.cash_balance + amount;
        debug!("Account {}: deposited {}", self.id, amount);
        Ok(())
    }

    /// Removes cash from the balance.
    ///
    /// Fails with `InvalidAmount` for a non-positive amount and with
    /// `InsufficientFunds` when the balance does not cover it.
    pub fn withdraw(&mut self, amount: Money) -> Result<()> {
        if !amount.is_positive() {
            return Err(ValidationError::InvalidAmount(format!(
                "withdrawal amount must be strictly positive, got {}",
                amount
            ))
            .into());
        }
        if self.cash_balance < amount {
            return Err(AccountError::InsufficientFunds {
                requested: amount.amount(),
                available: self.cash_balance.amount(),
            }
            .into());
        }
        self.cash_balance = self.cash_balance - amount;
        debug!("Account {}: withdrew {}", self.id, amount);
        Ok(())
    }

    /// Buys `quantity` shares of `symbol` at `unit_price`.
    ///
    /// Validates symbol format, positive quantity, and sufficient cash
    /// before touching any state, then appends a new lot to the symbol's
    /// holding (creating it on first purchase) and deducts the total cost.
    /// Returns the total cost.
    pub fn buy(
        &mut self,
        symbol: &str,
        quantity: Quantity,
        unit_price: Price,
        at: DateTime<Utc>,
    ) -> Result<Money> {
        validate_symbol(symbol)?;
        if quantity.is_zero() {
            return Err(ValidationError::InvalidQuantity(
                "buy quantity must be at least one share".to_string(),
            )
            .into());
        }
        let total_cost = unit_price.total(quantity);
        if self.cash_balance < total_cost {
            return Err(AccountError::InsufficientFunds {
                requested: total_cost.amount(),
                available: self.cash_balance.amount(),
            }
            .into());
        }

        self.holdings
            .entry(symbol.to_string())
            .or_insert_with(|| Holding::new(symbol))
            .buy(quantity, unit_price, at);
        self.cash_balance = self.cash_balance - total_cost;
        debug!(
            "Account {}: bought {} {} @ {} for {}",
            self.id, quantity, symbol, unit_price, total_cost
        );
        Ok(total_cost)
    }

    /// Sells `quantity` shares of `symbol` at `unit_price` using FIFO
    /// matching, crediting the proceeds to the balance.
    ///
    /// Fails with `HoldingNotFound` for a symbol never bought and with
    /// `ConflictQuantity` when the holding has fewer remaining shares than
    /// requested; either failure leaves the account untouched.
    pub fn sell(
        &mut self,
        symbol: &str,
        quantity: Quantity,
        unit_price: Price,
    ) -> Result<SellOutcome> {
        validate_symbol(symbol)?;
        if quantity.is_zero() {
            return Err(ValidationError::InvalidQuantity(
                "sell quantity must be at least one share".to_string(),
            )
            .into());
        }
        let holding = self
            .holdings
            .get_mut(symbol)
            .ok_or_else(|| AccountError::HoldingNotFound {
                symbol: symbol.to_string(),
            })?;

        let outcome = holding.sell(quantity, unit_price)?;
        self.cash_balance = self.cash_balance + outcome.proceeds();
        debug!(
            "Account {}: sold {} {} @ {} (profit {})",
            self.id,
            quantity,
            symbol,
            unit_price,
            outcome.profit()
        );
        Ok(outcome)
    }

    /// Attaches a reconstructed holding. Fails with `DuplicateEntity` when
    /// the symbol is already present.
    pub fn insert_holding(&mut self, holding: Holding) -> Result<()> {
        let symbol = holding.symbol().to_string();
        if self.holdings.contains_key(&symbol) {
            return Err(AccountError::DuplicateEntity(format!(
                "holding for symbol {} already exists in account {}",
                symbol, self.id
            ))
            .into());
        }
        self.holdings.insert(symbol, holding);
        Ok(())
    }
}
