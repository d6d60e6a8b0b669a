//! Read-side performance aggregation.
//!
//! `aggregate_performance` is a stateless fold over an account's ledger
//! entries joined with its live holdings and current prices. It is the one
//! place allowed to join the account aggregate with the ledger log, and it
//! only reads.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::warn;
use rust_decimal::Decimal;

use super::performance_model::HoldingPerformance;
use crate::accounts::{Account, AccountStore};
use crate::errors::{AccountError, Result};
use crate::ledger::{EntryKind, LedgerEntry, LedgerStore};
use crate::money::{Money, Price, Quantity};
use crate::quotes::QuoteProvider;

#[derive(Default)]
struct SymbolAccumulator {
    total_bought: u64,
    total_cost: Money,
    realized_gain: Money,
}

/// Folds a transaction log plus live prices into per-instrument rows.
///
/// Cash-only entries are skipped. `remaining` comes from the account's
/// current holding, never re-derived from the log (the log alone cannot
/// tell which lots are still open). A symbol present in the ledger but
/// absent from the account is a consistency violation and fails with
/// `HoldingNotFound`. A symbol missing from the price map degrades to a
/// zero current price and zero unrealized gain.
pub fn aggregate_performance(
    account: &Account,
    entries: &[LedgerEntry],
    prices: &HashMap<String, Price>,
) -> Result<Vec<HoldingPerformance>> {
    let mut accumulators: BTreeMap<String, SymbolAccumulator> = BTreeMap::new();

    for entry in entries {
        let symbol = match &entry.symbol {
            Some(symbol) => symbol,
            None => continue,
        };
        let acc = accumulators.entry(symbol.clone()).or_default();
        match entry.kind {
            EntryKind::Buy => {
                acc.total_bought += entry.quantity.value();
                acc.total_cost = acc.total_cost + entry.total_amount;
            }
            EntryKind::Sell => {
                acc.realized_gain = acc.realized_gain + entry.realized_profit;
            }
            EntryKind::Deposit | EntryKind::Withdrawal => {}
        }
    }

    let mut rows = Vec::with_capacity(accumulators.len());
    for (symbol, acc) in accumulators {
        let holding = account
            .holding(&symbol)
            .ok_or_else(|| AccountError::HoldingNotFound {
                symbol: symbol.clone(),
            })?;

        let average_purchase_price = if acc.total_bought == 0 {
            Money::zero()
        } else {
            Money::new(acc.total_cost.amount() / Decimal::from(acc.total_bought))
        };

        let (current_price, unrealized_gain) = match prices.get(&symbol) {
            Some(price) => {
                let gain: Money = holding
                    .lots()
                    .map(|lot| {
                        (price.amount() - lot.unit_price().amount())
                            .times_quantity(lot.remaining_quantity())
                    })
                    .sum();
                (price.amount(), gain)
            }
            None => (Money::zero(), Money::zero()),
        };

        rows.push(HoldingPerformance {
            symbol,
            total_bought: Quantity::new(acc.total_bought),
            remaining_quantity: holding.total_quantity(),
            average_purchase_price,
            current_price,
            unrealized_gain,
            realized_gain: acc.realized_gain,
        });
    }

    Ok(rows)
}

/// Service joining the account store, ledger store, and quote provider
/// into an account-level performance report.
pub struct PerformanceService {
    account_store: Arc<dyn AccountStore>,
    ledger_store: Arc<dyn LedgerStore>,
    quote_provider: Arc<dyn QuoteProvider>,
}

impl PerformanceService {
    pub fn new(
        account_store: Arc<dyn AccountStore>,
        ledger_store: Arc<dyn LedgerStore>,
        quote_provider: Arc<dyn QuoteProvider>,
    ) -> Self {
        Self {
            account_store,
            ledger_store,
            quote_provider,
        }
    }

    /// Builds the performance rows for one account.
    ///
    /// A provider outage degrades to an empty price map (zero current
    /// prices, zero unrealized gains) rather than failing the report.
    pub async fn account_performance(&self, account_id: &str) -> Result<Vec<HoldingPerformance>> {
        let account = self.account_store.load(account_id).await?;
        let entries = self.ledger_store.list_by_account(account_id).await?;

        let mut symbols: Vec<String> = entries.iter().filter_map(|e| e.symbol.clone()).collect();
        symbols.sort();
        symbols.dedup();

        let prices = match self.quote_provider.get_prices(&symbols).await {
            Ok(prices) => prices,
            Err(err) => {
                warn!(
                    "Quote provider unavailable for account {}: {}. Reporting without live prices.",
                    account_id, err
                );
                HashMap::new()
            }
        };

        aggregate_performance(&account, &entries, &prices)
    }
}
