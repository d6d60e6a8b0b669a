//! Tests for the Account aggregate.

#[cfg(test)]
mod tests {
    use crate::accounts::{validate_symbol, Account};
    use crate::errors::{AccountError, ValidationError};
    use crate::money::{Money, Price, Quantity};
    use crate::Error;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn funded_account(balance: rust_decimal::Decimal) -> Account {
        let mut account = Account::open("Test Owner").unwrap();
        account.deposit(Money::new(balance)).unwrap();
        account
    }

    fn price(value: rust_decimal::Decimal) -> Price {
        Price::new(value).unwrap()
    }

    // ==================== open ====================

    #[test]
    fn test_open_rejects_blank_owner() {
        assert!(Account::open("").is_err());
        assert!(Account::open("   ").is_err());
    }

    #[test]
    fn test_open_starts_with_zero_balance_and_no_holdings() {
        let account = Account::open("Test Owner").unwrap();
        assert!(account.cash_balance().is_zero());
        assert_eq!(account.holdings().count(), 0);
    }

    // ==================== deposit / withdraw ====================

    #[test]
    fn test_deposit_rejects_non_positive_amount() {
        let mut account = Account::open("Test Owner").unwrap();
        assert!(matches!(
            account.deposit(Money::zero()),
            Err(Error::Validation(ValidationError::InvalidAmount(_)))
        ));
        assert!(account.deposit(Money::new(dec!(-5))).is_err());
        assert!(account.cash_balance().is_zero());
    }

    #[test]
    fn test_withdraw_more_than_balance_fails() {
        let mut account = funded_account(dec!(100));
        let result = account.withdraw(Money::new(dec!(100.01)));
        assert!(matches!(
            result,
            Err(Error::Account(AccountError::InsufficientFunds { .. }))
        ));
        assert_eq!(account.cash_balance().amount(), dec!(100.00));
    }

    #[test]
    fn test_deposit_then_withdraw() {
        let mut account = funded_account(dec!(100));
        account.withdraw(Money::new(dec!(40.50))).unwrap();
        assert_eq!(account.cash_balance().amount(), dec!(59.50));
    }

    // ==================== buy ====================

    #[test]
    fn test_buy_deducts_total_cost_and_creates_holding() {
        let mut account = funded_account(dec!(2000));
        let total = account
            .buy("ACME", Quantity::new(10), price(dec!(100)), Utc::now())
            .unwrap();

        assert_eq!(total.amount(), dec!(1000.00));
        assert_eq!(account.cash_balance().amount(), dec!(1000.00));
        let holding = account.holding("ACME").unwrap();
        assert_eq!(holding.total_quantity(), Quantity::new(10));
    }

    #[test]
    fn test_buy_with_insufficient_funds_leaves_no_partial_state() {
        let mut account = funded_account(dec!(500));
        let result = account.buy("ACME", Quantity::new(10), price(dec!(100)), Utc::now());

        assert!(matches!(
            result,
            Err(Error::Account(AccountError::InsufficientFunds { .. }))
        ));
        assert_eq!(account.cash_balance().amount(), dec!(500.00));
        assert!(account.holding("ACME").is_none());
    }

    #[test]
    fn test_buy_rejects_zero_quantity() {
        let mut account = funded_account(dec!(1000));
        let result = account.buy("ACME", Quantity::ZERO, price(dec!(100)), Utc::now());
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidQuantity(_)))
        ));
    }

    #[test]
    fn test_buy_rejects_malformed_symbol() {
        let mut account = funded_account(dec!(1000));
        for symbol in ["", "acme", "ACME1", "TOOLONGSYMBOL"] {
            let result = account.buy(symbol, Quantity::new(1), price(dec!(10)), Utc::now());
            assert!(
                matches!(
                    result,
                    Err(Error::Validation(ValidationError::InvalidSymbol(_)))
                ),
                "symbol {:?} should be rejected",
                symbol
            );
        }
    }

    // ==================== sell ====================

    #[test]
    fn test_sell_credits_proceeds() {
        let mut account = funded_account(dec!(2000));
        account
            .buy("ACME", Quantity::new(10), price(dec!(100)), Utc::now())
            .unwrap();

        let outcome = account
            .sell("ACME", Quantity::new(8), price(dec!(150)))
            .unwrap();

        assert_eq!(outcome.proceeds().amount(), dec!(1200.00));
        assert_eq!(outcome.cost_basis().amount(), dec!(800.00));
        assert_eq!(outcome.profit().amount(), dec!(400.00));
        // 2000 - 1000 + 1200
        assert_eq!(account.cash_balance().amount(), dec!(2200.00));
    }

    #[test]
    fn test_sell_unknown_symbol_fails_with_holding_not_found() {
        let mut account = funded_account(dec!(1000));
        let result = account.sell("ACME", Quantity::new(1), price(dec!(10)));
        assert!(matches!(
            result,
            Err(Error::Account(AccountError::HoldingNotFound { .. }))
        ));
    }

    #[test]
    fn test_sold_out_holding_still_exists_for_sell_check() {
        let mut account = funded_account(dec!(1000));
        account
            .buy("ACME", Quantity::new(5), price(dec!(100)), Utc::now())
            .unwrap();
        account
            .sell("ACME", Quantity::new(5), price(dec!(100)))
            .unwrap();

        // Holding remains addressable with zero shares; selling again is a
        // quantity conflict, not HoldingNotFound.
        assert!(account.holding("ACME").is_some());
        let result = account.sell("ACME", Quantity::new(1), price(dec!(100)));
        assert!(matches!(
            result,
            Err(Error::Account(AccountError::ConflictQuantity { .. }))
        ));
    }

    #[test]
    fn test_oversell_leaves_balance_and_lots_unchanged() {
        let mut account = funded_account(dec!(2000));
        account
            .buy("ACME", Quantity::new(10), price(dec!(100)), Utc::now())
            .unwrap();
        let balance_before = account.cash_balance();

        let result = account.sell("ACME", Quantity::new(11), price(dec!(150)));
        assert!(result.is_err());
        assert_eq!(account.cash_balance(), balance_before);
        assert_eq!(
            account.holding("ACME").unwrap().total_quantity(),
            Quantity::new(10)
        );
    }

    // ==================== invariants over sequences ====================

    #[test]
    fn test_solvency_and_share_invariants_over_operation_sequence() {
        let mut account = funded_account(dec!(10000));

        account
            .buy("ACME", Quantity::new(10), price(dec!(100)), Utc::now())
            .unwrap();
        account
            .buy("ACME", Quantity::new(15), price(dec!(120)), Utc::now())
            .unwrap();
        account
            .buy("WIDG", Quantity::new(5), price(dec!(140)), Utc::now())
            .unwrap();
        account
            .sell("ACME", Quantity::new(22), price(dec!(150)))
            .unwrap();
        account.withdraw(Money::new(dec!(500))).unwrap();

        assert!(!account.cash_balance().is_negative());
        // ACME: 25 bought, 22 sold.
        assert_eq!(
            account.holding("ACME").unwrap().total_quantity(),
            Quantity::new(3)
        );
        assert_eq!(
            account.holding("WIDG").unwrap().total_quantity(),
            Quantity::new(5)
        );
    }

    // ==================== reconstruction ====================

    #[test]
    fn test_from_parts_rejects_negative_balance() {
        let result = Account::from_parts(
            "acct-1".into(),
            "Owner".into(),
            Money::new(dec!(-0.01)),
            Utc::now(),
        );
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidAmount(_)))
        ));
    }

    #[test]
    fn test_insert_holding_rejects_duplicate_symbol() {
        let mut account = Account::open("Owner").unwrap();
        account
            .insert_holding(crate::holdings::Holding::new("ACME"))
            .unwrap();
        let result = account.insert_holding(crate::holdings::Holding::new("ACME"));
        assert!(matches!(
            result,
            Err(Error::Account(AccountError::DuplicateEntity(_)))
        ));
    }

    // ==================== symbol validation ====================

    #[test]
    fn test_validate_symbol() {
        assert!(validate_symbol("A").is_ok());
        assert!(validate_symbol("ACME").is_ok());
        assert!(validate_symbol("ABCDEFGHIJ").is_ok());
        assert!(validate_symbol("").is_err());
        assert!(validate_symbol("abc").is_err());
        assert!(validate_symbol("AB-C").is_err());
        assert!(validate_symbol("ABCDEFGHIJK").is_err());
    }
}
