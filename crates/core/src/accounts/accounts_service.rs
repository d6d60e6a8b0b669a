//! Account service.
//!
//! Orchestrates one account operation end to end: serialize per account,
//! load the aggregate, apply the domain operation, append the ledger entry,
//! and save. The aggregate itself stays pure and synchronous; everything
//! async lives here.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use super::accounts_model::Account;
use super::accounts_traits::{AccountServiceTrait, AccountStore};
use crate::errors::Result;
use crate::holdings::SellOutcome;
use crate::ledger::{LedgerEntry, LedgerStore};
use crate::money::{Money, Price, Quantity};

/// Service for account operations.
///
/// Holds one mutex per account identity so that at most one mutating
/// operation per account is in flight at a time; the aggregate's invariants
/// depend on this discipline.
pub struct AccountService {
    account_store: Arc<dyn AccountStore>,
    ledger_store: Arc<dyn LedgerStore>,
    account_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl AccountService {
    pub fn new(account_store: Arc<dyn AccountStore>, ledger_store: Arc<dyn LedgerStore>) -> Self {
        Self {
            account_store,
            ledger_store,
            account_locks: DashMap::new(),
        }
    }

    fn lock_for(&self, account_id: &str) -> Arc<Mutex<()>> {
        self.account_locks
            .entry(account_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[async_trait]
impl AccountServiceTrait for AccountService {
    async fn open_account(&self, owner_name: &str) -> Result<Account> {
        let account = Account::open(owner_name)?;
        debug!("Opening account {} for {}", account.id(), owner_name);
        self.account_store.save(&account).await?;
        Ok(account)
    }

    async fn get_account(&self, account_id: &str) -> Result<Account> {
        self.account_store.load(account_id).await
    }

    async fn deposit(&self, account_id: &str, amount: Decimal) -> Result<Account> {
        let lock = self.lock_for(account_id);
        let _guard = lock.lock().await;

        let mut account = self.account_store.load(account_id).await?;
        let amount = Money::new(amount);
        account.deposit(amount)?;
        self.account_store.save(&account).await?;
        self.ledger_store
            .append(&LedgerEntry::deposit(account_id, amount))
            .await?;
        Ok(account)
    }

    async fn withdraw(&self, account_id: &str, amount: Decimal) -> Result<Account> {
        let lock = self.lock_for(account_id);
        let _guard = lock.lock().await;

        let mut account = self.account_store.load(account_id).await?;
        let amount = Money::new(amount);
        account.withdraw(amount)?;
        self.account_store.save(&account).await?;
        self.ledger_store
            .append(&LedgerEntry::withdrawal(account_id, amount))
            .await?;
        Ok(account)
    }

    async fn buy(
        &self,
        account_id: &str,
        symbol: &str,
        quantity: u64,
        unit_price: Decimal,
    ) -> Result<Account> {
        let quantity = Quantity::positive(quantity)?;
        let unit_price = Price::new(unit_price)?;

        let lock = self.lock_for(account_id);
        let _guard = lock.lock().await;

        let mut account = self.account_store.load(account_id).await?;
        let total_cost = account.buy(symbol, quantity, unit_price, chrono::Utc::now())?;
        self.account_store.save(&account).await?;
        self.ledger_store
            .append(&LedgerEntry::buy(
                account_id, symbol, quantity, unit_price, total_cost,
            ))
            .await?;
        Ok(account)
    }

    async fn sell(
        &self,
        account_id: &str,
        symbol: &str,
        quantity: u64,
        unit_price: Decimal,
    ) -> Result<SellOutcome> {
        let quantity = Quantity::positive(quantity)?;
        let unit_price = Price::new(unit_price)?;

        let lock = self.lock_for(account_id);
        let _guard = lock.lock().await;

        let mut account = self.account_store.load(account_id).await?;
        let outcome = account.sell(symbol, quantity, unit_price)?;
        self.account_store.save(&account).await?;
        self.ledger_store
            .append(&LedgerEntry::sell(
                account_id, symbol, quantity, unit_price, &outcome,
            ))
            .await?;
        Ok(outcome)
    }
}
