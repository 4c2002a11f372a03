//! Billing unit and currency rounding helpers.
//!
//! Tariffs bill gross tonnage in whole blocks (usually per 100 GT) and days
//! alongside in whole days. A partial block is always billed as a full one.

use rust_decimal::{Decimal, RoundingStrategy};

/// Size of the gross tonnage block most tariffs are quoted per.
pub fn gt_block_size() -> Decimal {
    Decimal::ONE_HUNDRED
}

/// Returns the number of whole `unit_size` blocks needed to cover `value`.
///
/// Computes `ceil(value / unit_size)`. `unit_size` must be positive.
///
/// # Examples
///
/// ```
/// use port_tariff_engine::calculation::ceil_units;
/// use rust_decimal::Decimal;
///
/// assert_eq!(ceil_units(Decimal::from(51300), Decimal::ONE_HUNDRED), Decimal::from(513));
/// assert_eq!(ceil_units(Decimal::from(51301), Decimal::ONE_HUNDRED), Decimal::from(514));
/// assert_eq!(ceil_units(Decimal::ZERO, Decimal::ONE_HUNDRED), Decimal::ZERO);
/// ```
pub fn ceil_units(value: Decimal, unit_size: Decimal) -> Decimal {
    debug_assert!(unit_size > Decimal::ZERO, "unit size must be positive");
    (value / unit_size).ceil()
}

/// Returns the number of 100 GT blocks billed for a gross tonnage.
pub fn gt_units(gross_tonnage: Decimal) -> Decimal {
    ceil_units(gross_tonnage, gt_block_size())
}

/// Rounds an amount to cents.
///
/// Ties go to the even cent.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_exact_multiple_is_not_rounded_up() {
        assert_eq!(ceil_units(dec("10000"), dec("100")), dec("100"));
    }

    #[test]
    fn test_partial_block_billed_as_full_block() {
        assert_eq!(ceil_units(dec("10000.01"), dec("100")), dec("101"));
        assert_eq!(ceil_units(dec("1"), dec("100")), dec("1"));
    }

    #[test]
    fn test_zero_value_is_zero_units() {
        assert_eq!(ceil_units(Decimal::ZERO, dec("100")), Decimal::ZERO);
    }

    #[test]
    fn test_day_units() {
        assert_eq!(ceil_units(dec("3.39"), Decimal::ONE), dec("4"));
        assert_eq!(ceil_units(dec("3"), Decimal::ONE), dec("3"));
    }

    #[test]
    fn test_gt_units() {
        assert_eq!(gt_units(dec("51300")), dec("513"));
        assert_eq!(gt_units(dec("120000")), dec("1200"));
    }

    #[test]
    fn test_round_currency_to_two_places() {
        assert_eq!(round_currency(dec("33345.0000")), dec("33345.00"));
        assert_eq!(round_currency(dec("12.3456")), dec("12.35"));
    }

    #[test]
    fn test_round_currency_ties_to_even() {
        assert_eq!(round_currency(dec("0.125")), dec("0.12"));
        assert_eq!(round_currency(dec("0.135")), dec("0.14"));
    }
}
