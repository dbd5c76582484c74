//! Old-regime deduction aggregation.
//!
//! Each component is capped on its own, except 80C investments and home loan
//! principal which share one ceiling. The capped components are summed and
//! subtracted, together with the standard deduction, from gross income.
//!
//! | Component | Deductible amount |
//! |-----------|-------------------|
//! | 80C + home loan principal | `min(80C + principal, combined limit)` |
//! | 80D | `min(self limit + parents limit, self premium + parents premium)`; tiers are not capped separately |
//! | 80CCD | `min(80CCD, limit)` |
//! | 80TTA | `min(80TTA, limit)` |
//! | 80G | `min(80G, limit)` |
//! | HRA | least of the three HRA rules |
//! | Home loan interest | `min(interest, limit)` |
//! | Additional NPS, education loan interest | claimed in full |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{capped, non_negative, saturating_sum};
use crate::calculations::hra_exemption::HraExemption;
use crate::{DeductionInputs, DeductionLimits, SalaryDetails, Section80DPremiums};

/// Deductible value of every component after its cap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// 80C investments and home loan principal under their shared ceiling.
    pub section_80c: Decimal,
    pub section_80d: Decimal,
    pub section_80ccd: Decimal,
    pub section_80tta: Decimal,
    pub section_80g: Decimal,
    pub hra: HraExemption,
    pub home_loan_interest: Decimal,
    pub nps_additional: Decimal,
    pub education_loan_interest: Decimal,

    /// Sum of all of the above, excluding the standard deduction.
    pub total: Decimal,
}

/// Applies [`DeductionLimits`] to claimed deductions.
#[derive(Debug, Clone)]
pub struct DeductionAggregator {
    limits: DeductionLimits,
}

impl DeductionAggregator {
    pub fn new(limits: DeductionLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &DeductionLimits {
        &self.limits
    }

    /// Caps every component and totals them.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use itax_core::{DeductionInputs, DeductionLimits, SalaryDetails};
    /// use itax_core::calculations::DeductionAggregator;
    ///
    /// let inputs = DeductionInputs {
    ///     section_80c: dec!(100000),
    ///     home_loan_principal: dec!(100000),
    ///     ..Default::default()
    /// };
    ///
    /// let aggregator = DeductionAggregator::new(DeductionLimits::fy2025_26());
    /// let breakdown = aggregator.breakdown(&inputs, &SalaryDetails::default());
    ///
    /// assert_eq!(breakdown.section_80c, dec!(150000));
    /// assert_eq!(breakdown.total, dec!(150000));
    /// ```
    pub fn breakdown(
        &self,
        inputs: &DeductionInputs,
        salary: &SalaryDetails,
    ) -> DeductionBreakdown {
        let section_80c = self.section_80c(inputs.section_80c, inputs.home_loan_principal);
        let section_80d = self.section_80d(&inputs.section_80d);
        let section_80ccd = capped(inputs.section_80ccd, self.limits.section_80ccd);
        let section_80tta = capped(inputs.section_80tta, self.limits.section_80tta);
        let section_80g = capped(inputs.section_80g, self.limits.section_80g);
        let hra = HraExemption::calculate(salary);
        let home_loan_interest = capped(inputs.home_loan_interest, self.limits.home_loan_interest);
        let nps_additional = non_negative(inputs.nps_additional);
        let education_loan_interest = non_negative(inputs.education_loan_interest);

        let total = saturating_sum([
            section_80c,
            section_80d,
            section_80ccd,
            section_80tta,
            section_80g,
            hra.exemption,
            home_loan_interest,
            nps_additional,
            education_loan_interest,
        ]);

        DeductionBreakdown {
            section_80c,
            section_80d,
            section_80ccd,
            section_80tta,
            section_80g,
            hra,
            home_loan_interest,
            nps_additional,
            education_loan_interest,
            total,
        }
    }

    /// Total deductible amount, excluding the standard deduction.
    pub fn total_deductions(
        &self,
        inputs: &DeductionInputs,
        salary: &SalaryDetails,
    ) -> Decimal {
        self.breakdown(inputs, salary).total
    }

    /// Gross income less the standard deduction and all capped deductions,
    /// floored at zero.
    pub fn old_regime_taxable_income(
        &self,
        gross_income: Decimal,
        inputs: &DeductionInputs,
        salary: &SalaryDetails,
        standard_deduction: Decimal,
    ) -> Decimal {
        let total = self.total_deductions(inputs, salary);
        self.taxable_income(gross_income, standard_deduction, total)
    }

    pub(crate) fn taxable_income(
        &self,
        gross_income: Decimal,
        standard_deduction: Decimal,
        total_deductions: Decimal,
    ) -> Decimal {
        non_negative(
            gross_income
                .saturating_sub(standard_deduction)
                .saturating_sub(total_deductions),
        )
    }

    /// 80C investments and home loan principal share one ceiling; the excess
    /// is dropped without attributing it to either.
    fn section_80c(
        &self,
        investments: Decimal,
        home_loan_principal: Decimal,
    ) -> Decimal {
        let claimed = non_negative(investments).saturating_add(non_negative(home_loan_principal));
        if claimed > self.limits.combined_80c {
            debug!(
                %claimed,
                limit = %self.limits.combined_80c,
                "80C claim exceeds combined limit; excess not deductible"
            );
        }
        claimed.min(self.limits.combined_80c)
    }

    /// The premiums paid, up to the sum of the self and parents tier limits.
    ///
    /// The cap applies to the combined premium, so a self-and-family premium
    /// above its own tier limit can use unused parents headroom.
    fn section_80d(
        &self,
        premiums: &Section80DPremiums,
    ) -> Decimal {
        let tier_limit = self.limits.section_80d_self
            + self
                .limits
                .section_80d_parents_limit(premiums.parents_are_senior_citizens);
        let paid =
            non_negative(premiums.self_and_family).saturating_add(non_negative(premiums.parents));
        paid.min(tier_limit)
    }
}

impl Default for DeductionAggregator {
    fn default() -> Self {
        Self::new(DeductionLimits::fy2025_26())
    }
}

/// Old-regime taxable income under the FY 2025-26 limits.
pub fn compute_old_regime_taxable_income(
    gross_income: Decimal,
    inputs: &DeductionInputs,
    salary: &SalaryDetails,
    standard_deduction: Decimal,
) -> Decimal {
    DeductionAggregator::default().old_regime_taxable_income(
        gross_income,
        inputs,
        salary,
        standard_deduction,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn aggregator() -> DeductionAggregator {
        DeductionAggregator::default()
    }

    fn premiums(
        self_and_family: Decimal,
        parents: Decimal,
        parents_are_senior_citizens: bool,
    ) -> Section80DPremiums {
        Section80DPremiums {
            self_and_family,
            parents,
            parents_are_senior_citizens,
        }
    }

    // =========================================================================
    // 80C
    // =========================================================================

    #[test]
    fn section_80c_combined_claim_is_capped() {
        let result = aggregator().section_80c(dec!(100000), dec!(100000));

        assert_eq!(result, dec!(150000));
    }

    #[test]
    fn section_80c_below_limit_is_claimed_in_full() {
        let result = aggregator().section_80c(dec!(60000), dec!(40000));

        assert_eq!(result, dec!(100000));
    }

    #[test]
    fn section_80c_principal_alone_hits_the_shared_ceiling() {
        let result = aggregator().section_80c(dec!(0), dec!(180000));

        assert_eq!(result, dec!(150000));
    }

    // =========================================================================
    // 80D
    // =========================================================================

    #[test]
    fn section_80d_senior_parents_raise_the_ceiling() {
        let result = aggregator().section_80d(&premiums(dec!(30000), dec!(40000), true));

        // Ceiling is 25000 + 50000; the 70000 paid fits under it.
        assert_eq!(result, dec!(70000));
    }

    #[test]
    fn section_80d_non_senior_parents_cap_at_fifty_thousand() {
        let result = aggregator().section_80d(&premiums(dec!(30000), dec!(40000), false));

        assert_eq!(result, dec!(50000));
    }

    #[test]
    fn section_80d_large_premiums_cap_at_tier_sum() {
        let result = aggregator().section_80d(&premiums(dec!(60000), dec!(90000), true));

        assert_eq!(result, dec!(75000));
    }

    #[test]
    fn section_80d_self_premium_uses_unused_parents_headroom() {
        let result = aggregator().section_80d(&premiums(dec!(60000), dec!(0), false));

        assert_eq!(result, dec!(50000));
    }

    #[test]
    fn section_80d_small_premiums_are_claimed_in_full() {
        let result = aggregator().section_80d(&premiums(dec!(12000), dec!(0), false));

        assert_eq!(result, dec!(12000));
    }

    // =========================================================================
    // breakdown
    // =========================================================================

    #[test]
    fn breakdown_caps_each_component_independently() {
        let inputs = DeductionInputs {
            section_80c: dec!(120000),
            home_loan_principal: dec!(50000),
            section_80d: premiums(dec!(20000), dec!(0), false),
            section_80ccd: dec!(80000),
            section_80tta: dec!(15000),
            section_80g: dec!(250000),
            home_loan_interest: dec!(300000),
            nps_additional: dec!(70000),
            education_loan_interest: dec!(45000),
        };

        let result = aggregator().breakdown(&inputs, &SalaryDetails::default());

        assert_eq!(result.section_80c, dec!(150000));
        assert_eq!(result.section_80d, dec!(20000));
        assert_eq!(result.section_80ccd, dec!(50000));
        assert_eq!(result.section_80tta, dec!(10000));
        assert_eq!(result.section_80g, dec!(100000));
        assert_eq!(result.home_loan_interest, dec!(200000));
        assert_eq!(result.nps_additional, dec!(70000));
        assert_eq!(result.education_loan_interest, dec!(45000));
        assert_eq!(result.hra.exemption, dec!(0));
        assert_eq!(result.total, dec!(645000));
    }

    #[test]
    fn breakdown_includes_hra_exemption() {
        let salary = SalaryDetails {
            basic: dec!(600000),
            hra_received: dec!(300000),
            rent_paid: dec!(240000),
            is_metro_city: true,
        };

        let result = aggregator().breakdown(&DeductionInputs::default(), &salary);

        assert_eq!(result.hra.exemption, dec!(180000));
        assert_eq!(result.total, dec!(180000));
    }

    #[test]
    fn breakdown_of_empty_inputs_is_zero() {
        let result = aggregator().breakdown(&DeductionInputs::default(), &SalaryDetails::default());

        assert_eq!(result, DeductionBreakdown::default());
    }

    #[test]
    fn negative_claims_contribute_nothing() {
        let inputs = DeductionInputs {
            section_80tta: dec!(-5000),
            education_loan_interest: dec!(-1000),
            ..Default::default()
        };

        let result = aggregator().total_deductions(&inputs, &SalaryDetails::default());

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn negative_hra_received_does_not_raise_taxable_income() {
        let salary = SalaryDetails {
            basic: dec!(600000),
            hra_received: dec!(-100000),
            rent_paid: dec!(240000),
            is_metro_city: true,
        };

        let breakdown = aggregator().breakdown(&DeductionInputs::default(), &salary);
        let taxable = aggregator().old_regime_taxable_income(
            dec!(1000000),
            &DeductionInputs::default(),
            &salary,
            dec!(50000),
        );

        assert_eq!(breakdown.hra.exemption, dec!(0));
        assert_eq!(breakdown.total, dec!(0));
        assert_eq!(taxable, dec!(950000));
    }

    #[test]
    fn huge_uncapped_claims_saturate() {
        let inputs = DeductionInputs {
            nps_additional: Decimal::MAX,
            education_loan_interest: Decimal::MAX,
            ..Default::default()
        };

        let breakdown = aggregator().breakdown(&inputs, &SalaryDetails::default());
        let taxable = aggregator().old_regime_taxable_income(
            dec!(1000000),
            &inputs,
            &SalaryDetails::default(),
            dec!(50000),
        );

        assert_eq!(breakdown.total, Decimal::MAX);
        assert_eq!(taxable, dec!(0));
    }

    // =========================================================================
    // taxable income
    // =========================================================================

    #[test]
    fn taxable_income_subtracts_standard_and_capped_deductions() {
        let inputs = DeductionInputs {
            section_80c: dec!(200000),
            section_80tta: dec!(8000),
            ..Default::default()
        };

        let result = aggregator().old_regime_taxable_income(
            dec!(1200000),
            &inputs,
            &SalaryDetails::default(),
            dec!(50000),
        );

        assert_eq!(result, dec!(992000));
    }

    #[test]
    fn taxable_income_never_goes_negative() {
        let inputs = DeductionInputs {
            home_loan_interest: dec!(200000),
            ..Default::default()
        };

        let result = compute_old_regime_taxable_income(
            dec!(100000),
            &inputs,
            &SalaryDetails::default(),
            dec!(50000),
        );

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn custom_limits_are_respected() {
        let limits = DeductionLimits {
            section_80tta: dec!(5000),
            ..DeductionLimits::fy2025_26()
        };
        let inputs = DeductionInputs {
            section_80tta: dec!(8000),
            ..Default::default()
        };

        let result = DeductionAggregator::new(limits).breakdown(&inputs, &SalaryDetails::default());

        assert_eq!(result.section_80tta, dec!(5000));
    }
}
