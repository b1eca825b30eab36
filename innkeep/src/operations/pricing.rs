//! Stay pricing.
//!
//! Every derived quantity is rounded half-up to two decimal places before
//! it feeds the next one:
//!
//! ```text
//! subtotal = round2(nights * rate)
//! tax      = round2(subtotal * tax_rate / 100)
//! total    = max(0, round2(subtotal + tax - discount))
//! ```
//!
//! The discount is taken as given; only the total it feeds is rounded.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::ConfigValidator;
use crate::error::{Error, Result};
use crate::money::out_of_range;
use crate::Money;

/// A priced stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Nights charged.
    pub nights: u32,
    /// Nightly rate used.
    pub rate: Money,
    /// `nights * rate`.
    pub subtotal: Money,
    /// Tax rate percent used.
    pub tax_rate: Decimal,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Discount taken off.
    pub discount: Money,
    /// Amount due, never negative.
    pub total: Money,
}

/// Prices `nights` at `rate` with a tax percent and a flat discount.
///
/// # Errors
///
/// Returns a validation error if `nights` or `rate` is not positive, the
/// tax rate is outside `[0, 100]`, the discount is negative, or an amount
/// overflows.
///
/// # Examples
///
/// ```
/// use innkeep::operations::pricing::price;
/// use innkeep::Money;
/// use rust_decimal::Decimal;
///
/// let quote = price(5, Money::new(10000, 2), Decimal::TEN, Money::new(20, 0)).unwrap();
/// assert_eq!(quote.subtotal.to_string(), "500.00");
/// assert_eq!(quote.tax.to_string(), "50.00");
/// assert_eq!(quote.total.to_string(), "530.00");
/// ```
pub fn price(nights: u32, rate: Money, tax_rate: Decimal, discount: Money) -> Result<Quote> {
    if nights == 0 {
        return Err(Error::validation("nights", "must be at least 1"));
    }
    if !rate.is_positive() {
        return Err(Error::validation(
            "rate_per_night",
            format!("room rate {rate} must be greater than zero"),
        ));
    }
    ConfigValidator::validate_tax_rate("tax_rate", tax_rate)?;
    if discount.is_negative() {
        return Err(Error::validation("discount", "cannot be negative"));
    }

    let subtotal = rate
        .checked_times(nights)
        .ok_or_else(|| out_of_range("rate_per_night"))?
        .round2();
    let tax = subtotal
        .checked_percent(tax_rate)
        .ok_or_else(|| out_of_range("tax"))?
        .round2();
    let total = subtotal
        .checked_add(tax)
        .and_then(|gross| gross.checked_sub(discount))
        .ok_or_else(|| out_of_range("discount"))?
        .round2()
        .floor_zero();

    Ok(Quote {
        nights,
        rate,
        subtotal,
        tax_rate,
        tax,
        discount,
        total,
    })
}
