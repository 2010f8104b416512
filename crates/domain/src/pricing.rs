//! Pricing: the total for a proposed stay.
//!
//! The total is a guarded, stateful value rather than a pure derivation: it
//! is only overwritten when the selection spans at least one night *and* the
//! nightly price is positive. Otherwise the previous total is kept as-is,
//! which is why a same-day selection never resets the quote to zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::date_interval::DateInterval;
use crate::money::{MONEY_PLACES, round_money};

/// Total price for `range` at `nightly_price`, or `previous` when the guard
/// does not pass.
///
/// The guard passes when `range.nights() > 0` and `nightly_price > 0`; the
/// result is then `nights * nightly_price` rounded with [`round_money`]. A
/// product that does not fit in a [`Decimal`] also keeps `previous`.
#[must_use]
pub fn compute_total_price(
    range: &DateInterval,
    nightly_price: Decimal,
    previous: Decimal,
) -> Decimal {
    let nights = range.nights();
    if nights == 0 || nightly_price <= Decimal::ZERO {
        return previous;
    }
    match Decimal::from(nights).checked_mul(nightly_price) {
        Some(total) => round_money(total, MONEY_PLACES),
        None => previous,
    }
}

/// The conditionally overwritten total for an in-progress booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub total_price: Decimal,
}

impl PriceQuote {
    /// Start a quote at the listing's nightly price, the value shown before
    /// any range has been picked.
    #[must_use]
    pub fn seeded(nightly_price: Decimal) -> Self {
        Self {
            total_price: nightly_price,
        }
    }

    /// Apply a new selection. Returns `true` when the total was overwritten.
    pub fn update(&mut self, range: &DateInterval, nightly_price: Decimal) -> bool {
        let next = compute_total_price(range, nightly_price, self.total_price);
        let changed = next != self.total_price;
        self.total_price = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn range(start: (u32, u32), end: (u32, u32)) -> DateInterval {
        DateInterval::new(
            NaiveDate::from_ymd_opt(2024, start.0, start.1).unwrap(),
            NaiveDate::from_ymd_opt(2024, end.0, end.1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn should_multiply_nights_by_nightly_price() {
        let total = compute_total_price(&range((3, 1), (3, 4)), dec!(100), dec!(0));
        assert_eq!(total, dec!(300));
    }

    #[test]
    fn should_keep_previous_total_when_range_is_same_day() {
        let total = compute_total_price(&range((3, 1), (3, 1)), dec!(100), dec!(450));
        assert_eq!(total, dec!(450));
    }

    #[test]
    fn should_keep_previous_total_when_price_is_zero() {
        let total = compute_total_price(&range((3, 1), (3, 4)), dec!(0), dec!(450));
        assert_eq!(total, dec!(450));
    }

    #[test]
    fn should_round_fractional_nightly_prices_to_cents() {
        let total = compute_total_price(&range((3, 1), (3, 4)), dec!(99.995), dec!(0));
        // 3 * 99.995 = 299.985, halfway rounds to the even cent
        assert_eq!(total, dec!(299.98));
    }

    #[test]
    fn should_keep_previous_total_when_product_overflows() {
        let total = compute_total_price(&range((3, 1), (3, 3)), Decimal::MAX, dec!(450));
        assert_eq!(total, dec!(450));
    }

    #[test]
    fn should_leave_seeded_quote_untouched_on_overflow() {
        let mut quote = PriceQuote::seeded(Decimal::MAX);
        assert!(!quote.update(&range((3, 1), (3, 3)), Decimal::MAX));
        assert_eq!(quote.total_price, Decimal::MAX);
    }

    #[test]
    fn should_start_quote_at_nightly_price() {
        let quote = PriceQuote::seeded(dec!(120));
        assert_eq!(quote.total_price, dec!(120));
    }

    #[test]
    fn should_report_change_only_when_total_is_overwritten() {
        let mut quote = PriceQuote::seeded(dec!(100));
        assert!(quote.update(&range((1, 1), (1, 3)), dec!(100)));
        assert_eq!(quote.total_price, dec!(200));

        assert!(!quote.update(&range((1, 5), (1, 5)), dec!(100)));
        assert_eq!(quote.total_price, dec!(200));
    }
}
