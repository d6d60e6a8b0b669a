//! Account store and service traits.
//!
//! These traits define the contracts for account persistence and account
//! operations without any storage-specific types; concrete adapters live
//! outside this crate.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::accounts_model::Account;
use crate::errors::Result;
use crate::holdings::SellOutcome;

/// Contract for loading and saving the account aggregate.
///
/// The implementation must serialize mutating access per account identity
/// (exclusive lock at load, or an optimistic version check surfacing
/// `StoreError::VersionConflict`); the core assumes single-writer access
/// for the duration of one operation.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Loads an account with its holdings and lots.
    ///
    /// Fails with `StoreError::NotFound` when no such account exists.
    async fn load(&self, account_id: &str) -> Result<Account>;

    /// Persists the account aggregate.
    async fn save(&self, account: &Account) -> Result<()>;
}

/// Contract for account operations at the service boundary.
///
/// Monetary and quantity inputs cross this boundary as plain primitives;
/// all domain validation re-happens inside.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Opens a new account with a zero balance and persists it.
    async fn open_account(&self, owner_name: &str) -> Result<Account>;

    /// Loads an account by id.
    async fn get_account(&self, account_id: &str) -> Result<Account>;

    /// Deposits cash and logs a ledger entry.
    async fn deposit(&self, account_id: &str, amount: Decimal) -> Result<Account>;

    /// Withdraws cash and logs a ledger entry.
    async fn withdraw(&self, account_id: &str, amount: Decimal) -> Result<Account>;

    /// Buys shares and logs a ledger entry.
    async fn buy(
        &self,
        account_id: &str,
        symbol: &str,
        quantity: u64,
        unit_price: Decimal,
    ) -> Result<Account>;

    /// Sells shares FIFO and logs a ledger entry with the realized profit.
    async fn sell(
        &self,
        account_id: &str,
        symbol: &str,
        quantity: u64,
        unit_price: Decimal,
    ) -> Result<SellOutcome>;
}
