//! Property-based tests for pricing and payment status.

use crate::operations::pricing::price;
use crate::{Money, PaymentStatus};
use proptest::prelude::*;
use rust_decimal::Decimal;

// Amounts in cents, up to a million.
fn money_strategy() -> impl Strategy<Value = Money> {
    (0i64..100_000_000).prop_map(|cents| Money::new(cents, 2))
}

fn rate_strategy() -> impl Strategy<Value = Money> {
    (1i64..10_000_000).prop_map(|cents| Money::new(cents, 2))
}

// Tax percent with up to two decimals.
fn tax_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Totals are never negative and never exceed subtotal + tax
    #[test]
    fn total_bounded(
        nights in 1u32..=60,
        rate in rate_strategy(),
        tax in tax_strategy(),
        discount in money_strategy(),
    ) {
        let quote = price(nights, rate, tax, discount).unwrap();
        prop_assert!(!quote.total.is_negative());
        prop_assert!(quote.total <= quote.subtotal.checked_add(quote.tax).unwrap());
    }

    // With no discount the total is exactly subtotal + tax
    #[test]
    fn total_without_discount(nights in 1u32..=60, rate in rate_strategy(), tax in tax_strategy()) {
        let quote = price(nights, rate, tax, Money::ZERO).unwrap();
        prop_assert_eq!(quote.total, quote.subtotal.checked_add(quote.tax).unwrap());
    }

    // Every derived amount carries at most two decimal places
    #[test]
    fn amounts_have_two_decimals(
        nights in 1u32..=60,
        rate in (1i64..10_000_000).prop_map(|v| Money::new(v, 3)),
        tax in tax_strategy(),
        discount in money_strategy(),
    ) {
        let quote = price(nights, rate, tax, discount).unwrap();
        prop_assert!(quote.subtotal.value().scale() <= 2);
        prop_assert!(quote.tax.value().scale() <= 2);
        prop_assert!(quote.total.value().scale() <= 2);
    }

    // Payment status matches the threshold rule
    #[test]
    fn payment_status_thresholds(paid in money_strategy(), total in money_strategy()) {
        let status = PaymentStatus::derive(paid, total);
        let expected = if !paid.is_positive() {
            PaymentStatus::Unpaid
        } else if paid >= total {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        };
        prop_assert_eq!(status, expected);
    }

    // Paying the exact total always lands on PAID
    #[test]
    fn paying_total_is_paid(total in rate_strategy()) {
        prop_assert_eq!(PaymentStatus::derive(total, total), PaymentStatus::Paid);
    }
}
