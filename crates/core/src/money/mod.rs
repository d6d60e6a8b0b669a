//! Monetary and share-count value types.

pub mod money_model;


pub use money_model::{Money, Price, Quantity};
