//! Rounding and clamping shared by the calculators.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole paise (two decimal places), midpoint away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(52500.004)), dec!(52500.00));
/// assert_eq!(round_half_up(dec!(0.125)), dec!(0.13));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Floors `value` at zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-10)), dec!(0));
/// assert_eq!(non_negative(dec!(10)), dec!(10));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Smaller of the claimed amount and its statutory limit.
///
/// Negative claims are treated as zero.
pub fn capped(
    claimed: Decimal,
    limit: Decimal,
) -> Decimal {
    non_negative(claimed).min(limit)
}

/// Percentage of `amount`, with `percent` in 0-100.
///
/// Saturates at [`Decimal::MAX`] or [`Decimal::MIN`] instead of overflowing.
pub fn percent_of(
    amount: Decimal,
    percent: Decimal,
) -> Decimal {
    match amount.checked_mul(percent) {
        Some(product) => product / Decimal::ONE_HUNDRED,
        None => (amount / Decimal::ONE_HUNDRED).saturating_mul(percent),
    }
}

/// Sum of `amounts`, saturating at [`Decimal::MAX`].
pub fn saturating_sum<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |total, amount| total.saturating_add(amount))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_midpoint_away_from_zero() {
        assert_eq!(round_half_up(dec!(10.005)), dec!(10.01));
        assert_eq!(round_half_up(dec!(-10.005)), dec!(-10.01));
    }

    #[test]
    fn round_half_up_keeps_whole_rupees() {
        assert_eq!(round_half_up(dec!(157500)), dec!(157500));
    }

    #[test]
    fn non_negative_passes_zero_through() {
        assert_eq!(non_negative(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn capped_returns_claim_below_limit() {
        assert_eq!(capped(dec!(9000), dec!(10000)), dec!(9000));
    }

    #[test]
    fn capped_returns_limit_above_it() {
        assert_eq!(capped(dec!(12000), dec!(10000)), dec!(10000));
    }

    #[test]
    fn capped_treats_negative_claim_as_zero() {
        assert_eq!(capped(dec!(-500), dec!(10000)), dec!(0));
    }

    #[test]
    fn percent_of_handles_fractional_rates() {
        assert_eq!(percent_of(dec!(1), dec!(5)), dec!(0.05));
        assert_eq!(percent_of(dec!(600000), dec!(40)), dec!(240000));
    }

    #[test]
    fn percent_of_huge_amount_does_not_overflow() {
        let result = percent_of(Decimal::MAX, dec!(50));

        assert!(result > Decimal::ZERO);
        assert!(result < Decimal::MAX);
        assert_eq!(percent_of(Decimal::MAX, dec!(100)), Decimal::MAX);
    }

    #[test]
    fn saturating_sum_stops_at_max() {
        assert_eq!(saturating_sum([dec!(1), dec!(2), dec!(3)]), dec!(6));
        assert_eq!(saturating_sum([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
    }
}
