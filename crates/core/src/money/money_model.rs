//! Monetary and share-count value types.
//!
//! All monetary arithmetic runs through [`Money`], which normalizes every
//! result to [`MONEY_SCALE`] fractional digits with half-up rounding. A
//! single implicit currency is modeled; there is no currency mixing.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::constants::MONEY_SCALE;
use crate::errors::{Result, ValidationError};

/// An exact decimal amount at a fixed scale of two fractional digits.
///
/// Immutable; every constructor and arithmetic result is rounded half-up
/// to the fixed scale. Amounts may be negative (e.g., a realized loss);
/// positivity requirements are enforced by the operations that need them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value, rounding half-up to the fixed scale.
    pub fn new(amount: Decimal) -> Self {
        Money(amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero))
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// The underlying decimal amount, always at the fixed scale.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiplies by an integer factor.
    pub fn times(&self, factor: u64) -> Self {
        Money::new(self.0 * Decimal::from(factor))
    }

    /// Multiplies by a share quantity.
    pub fn times_quantity(&self, quantity: Quantity) -> Self {
        self.times(quantity.value())
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money::new(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money::new(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A strictly positive per-unit price.
///
/// Zero or negative amounts are rejected at construction; prices are used
/// only for per-unit values, never for totals or balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Money);

impl Price {
    pub fn new(amount: Decimal) -> Result<Self> {
        let money = Money::new(amount);
        if !money.is_positive() {
            return Err(ValidationError::InvalidAmount(format!(
                "price must be strictly positive, got {}",
                money
            ))
            .into());
        }
        Ok(Price(money))
    }

    /// The per-unit amount as Money.
    pub fn amount(&self) -> Money {
        self.0
    }

    /// The underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0.amount()
    }

    /// Total cost of `quantity` units at this price.
    pub fn total(&self, quantity: Quantity) -> Money {
        self.0.times_quantity(quantity)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = crate::Error;

    fn try_from(amount: Decimal) -> Result<Self> {
        Price::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.value()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative integer count of shares.
///
/// Subtraction underflow is a programming error, not a domain error:
/// callers clamp with [`Quantity::min`] before reducing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    /// Creates a quantity; zero is allowed (reconstruction and cash entries).
    pub fn new(count: u64) -> Self {
        Quantity(count)
    }

    /// Creates a quantity that must be at least one unit (trade requests).
    pub fn positive(count: u64) -> Result<Self> {
        if count == 0 {
            return Err(ValidationError::InvalidQuantity(
                "quantity must be at least one share".to_string(),
            )
            .into());
        }
        Ok(Quantity(count))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }

    pub fn add(&self, other: Quantity) -> Quantity {
        Quantity(self.0 + other.0)
    }

    /// Subtracts `other` from this quantity.
    ///
    /// # Panics
    /// Panics on underflow; callers clamp with [`Quantity::min`] first.
    pub fn sub(&self, other: Quantity) -> Quantity {
        Quantity(
            self.0
                .checked_sub(other.0)
                .expect("quantity subtraction underflow"),
        )
    }

    pub fn min(&self, other: Quantity) -> Quantity {
        Quantity(self.0.min(other.0))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
