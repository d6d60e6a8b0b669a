//! Price source contract.
//!
//! The core never fetches prices itself; it consumes this trait. Concrete
//! providers (HTTP market data, fixtures, caches) live outside this crate.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::Result;
use crate::money::Price;

/// Contract for the external live-price source.
///
/// Either method may fail with `QuoteError::ProviderUnavailable`; the
/// caller, not the core, decides how to degrade.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Current price for one symbol.
    async fn get_price(&self, symbol: &str) -> Result<Price>;

    /// Current prices for a batch of symbols. Symbols the provider cannot
    /// quote are simply absent from the result; that is not an error.
    async fn get_prices(&self, symbols: &[String]) -> Result<HashMap<String, Price>>;
}
