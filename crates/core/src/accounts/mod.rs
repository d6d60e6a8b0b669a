//! Account aggregate, store contract, and service.

pub mod accounts_model;
pub mod accounts_service;
pub mod accounts_traits;

#[cfg(test)]
mod accounts_model_tests;

pub use accounts_model::{validate_symbol, Account};
pub use accounts_service::AccountService;
pub use accounts_traits::{AccountServiceTrait, AccountStore};
