//! House Rent Allowance exemption.
//!
//! The exempt portion of HRA is the least of:
//!
//! | Rule | Amount |
//! |------|--------|
//! | 1    | HRA actually received |
//! | 2    | 50% of basic salary in a metro city, 40% elsewhere |
//! | 3    | Rent paid in excess of 10% of basic salary (never below zero) |
//!
//! Inputs are used in whatever period they are given, so monthly and annual
//! figures must not be mixed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::SalaryDetails;
use crate::calculations::common::{non_negative, percent_of};

const METRO_BASIC_PERCENT: Decimal = dec!(50);
const NON_METRO_BASIC_PERCENT: Decimal = dec!(40);
const RENT_BASIC_THRESHOLD_PERCENT: Decimal = dec!(10);

/// The three candidate amounts and the resulting exemption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HraExemption {
    /// Rule 1.
    pub actual_hra_received: Decimal,

    /// Rule 2.
    pub percent_of_basic: Decimal,

    /// Rule 3.
    pub rent_in_excess_of_basic: Decimal,

    /// Least of the three rules.
    pub exemption: Decimal,
}

impl HraExemption {
    /// Evaluates the three rules for `salary`.
    ///
    /// Negative amounts are treated as zero, so the exemption is never
    /// negative.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use itax_core::SalaryDetails;
    /// use itax_core::calculations::HraExemption;
    ///
    /// let salary = SalaryDetails {
    ///     basic: dec!(50000),
    ///     hra_received: dec!(25000),
    ///     rent_paid: dec!(20000),
    ///     is_metro_city: true,
    /// };
    ///
    /// let hra = HraExemption::calculate(&salary);
    ///
    /// assert_eq!(hra.rent_in_excess_of_basic, dec!(15000));
    /// assert_eq!(hra.exemption, dec!(15000));
    /// ```
    pub fn calculate(salary: &SalaryDetails) -> Self {
        let basic = non_negative(salary.basic);
        let actual_hra_received = non_negative(salary.hra_received);
        let percent_of_basic = percent_of(basic, Self::basic_percent(salary.is_metro_city));
        let rent_in_excess_of_basic = non_negative(
            non_negative(salary.rent_paid) - percent_of(basic, RENT_BASIC_THRESHOLD_PERCENT),
        );

        let exemption = actual_hra_received
            .min(percent_of_basic)
            .min(rent_in_excess_of_basic);

        debug!(
            %actual_hra_received,
            %percent_of_basic,
            %rent_in_excess_of_basic,
            %exemption,
            "HRA exemption computed"
        );

        Self {
            actual_hra_received,
            percent_of_basic,
            rent_in_excess_of_basic,
            exemption,
        }
    }

    fn basic_percent(is_metro_city: bool) -> Decimal {
        if is_metro_city {
            METRO_BASIC_PERCENT
        } else {
            NON_METRO_BASIC_PERCENT
        }
    }
}

/// Exempt HRA for `salary`, in the same period as its inputs.
pub fn compute_hra_exemption(salary: &SalaryDetails) -> Decimal {
    HraExemption::calculate(salary).exemption
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn salary(
        basic: Decimal,
        hra_received: Decimal,
        rent_paid: Decimal,
        is_metro_city: bool,
    ) -> SalaryDetails {
        SalaryDetails {
            basic,
            hra_received,
            rent_paid,
            is_metro_city,
        }
    }

    #[test]
    fn metro_rent_rule_is_least() {
        let result = HraExemption::calculate(&salary(dec!(50000), dec!(25000), dec!(20000), true));

        assert_eq!(
            result,
            HraExemption {
                actual_hra_received: dec!(25000),
                percent_of_basic: dec!(25000),
                rent_in_excess_of_basic: dec!(15000),
                exemption: dec!(15000),
            }
        );
    }

    #[test]
    fn annualized_inputs_scale_the_exemption() {
        let monthly = salary(dec!(50000), dec!(25000), dec!(20000), true);

        assert_eq!(compute_hra_exemption(&monthly.annualized()), dec!(180000));
    }

    #[test]
    fn non_metro_uses_forty_percent_of_basic() {
        let result = HraExemption::calculate(&salary(dec!(50000), dec!(30000), dec!(40000), false));

        assert_eq!(result.percent_of_basic, dec!(20000));
        assert_eq!(result.exemption, dec!(20000));
    }

    #[test]
    fn actual_hra_is_least() {
        let result = HraExemption::calculate(&salary(dec!(50000), dec!(8000), dec!(30000), true));

        assert_eq!(result.exemption, dec!(8000));
    }

    #[test]
    fn rent_below_ten_percent_of_basic_gives_no_exemption() {
        let result = HraExemption::calculate(&salary(dec!(50000), dec!(25000), dec!(4000), true));

        assert_eq!(result.rent_in_excess_of_basic, dec!(0));
        assert_eq!(result.exemption, dec!(0));
    }

    #[test]
    fn no_hra_received_gives_no_exemption() {
        let result = compute_hra_exemption(&salary(dec!(50000), dec!(0), dec!(20000), true));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn negative_hra_received_is_treated_as_zero() {
        let salary = salary(dec!(600000), dec!(-100000), dec!(240000), true);

        let result = HraExemption::calculate(&salary);

        assert_eq!(result.actual_hra_received, dec!(0));
        assert_eq!(result.exemption, dec!(0));
    }

    #[test]
    fn negative_basic_is_treated_as_zero() {
        let salary = salary(dec!(-600000), dec!(300000), dec!(240000), true);

        let result = HraExemption::calculate(&salary);

        assert_eq!(result.percent_of_basic, dec!(0));
        assert_eq!(result.exemption, dec!(0));
    }

    #[test]
    fn default_salary_gives_no_exemption() {
        assert_eq!(compute_hra_exemption(&SalaryDetails::default()), dec!(0));
    }
}
