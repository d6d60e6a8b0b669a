//! External price-quote boundary.

pub mod quotes_traits;

pub use quotes_traits::QuoteProvider;
