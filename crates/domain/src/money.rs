//! Money helpers.
//!
//! Prices are [`Decimal`] throughout; binary floating point never touches a
//! currency amount.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept on every computed total.
pub const MONEY_PLACES: u32 = 2;

/// Round to `places` decimal places using banker's rounding (`ROUND_HALF_EVEN`).
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use hearth_domain::money::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
#[must_use]
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}
