//! Core error types for the lotbook accounting core.
//!
//! This module defines storage-agnostic error types. Adapter-specific errors
//! (from a database driver, an HTTP client, etc.) are converted to these
//! types by the boundary that produced them.

use rust_decimal::Decimal;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the accounting core.
///
/// Every error is recoverable at the boundary; none is fatal to the process.
/// A failed operation leaves the aggregate untouched.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Account operation failed: {0}")]
    Account(#[from] AccountError),

    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Quote lookup failed: {0}")]
    Quote(#[from] QuoteError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for values crossing into the core.
///
/// All domain validation re-happens on reconstruction from storage; the core
/// does not trust pre-validated input crossing a boundary.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A monetary input was not strictly positive where positivity is required.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A share quantity was not strictly positive where positivity is required.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// An instrument symbol failed format validation.
    #[error("Invalid symbol '{0}': expected 1-10 uppercase letters")]
    InvalidSymbol(String),

    /// A non-monetary input (owner label, identifier) was malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Domain-rule violations raised by the Account aggregate.
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Decimal, available: Decimal },

    #[error("Not enough shares of {symbol}: requested {requested}, available {available}")]
    ConflictQuantity {
        symbol: String,
        requested: u64,
        available: u64,
    },

    #[error("No holding found for symbol {symbol}")]
    HoldingNotFound { symbol: String },

    #[error("Entity already exists: {0}")]
    DuplicateEntity(String),
}

/// Storage-agnostic error type for the account and ledger stores.
///
/// Uses `String` payloads so concrete adapters can map driver errors into
/// this format without leaking their types into the core.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A query failed to execute.
    #[error("Store query failed: {0}")]
    QueryFailed(String),

    /// An optimistic version check failed; the caller may retry. The core
    /// itself never retries.
    #[error("Version conflict: {0}")]
    VersionConflict(String),
}

/// Errors from the external price-quote source.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Quote provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("No quote data for symbol {0}")]
    NoData(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
