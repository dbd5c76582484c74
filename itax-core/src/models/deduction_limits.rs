use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Statutory caps and standard deductions for one financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLimits {
    /// Ceiling shared by 80C investments and home loan principal.
    pub combined_80c: Decimal,
    pub section_80d_self: Decimal,
    pub section_80d_parents: Decimal,
    pub section_80d_parents_senior: Decimal,
    pub section_80ccd: Decimal,
    pub section_80tta: Decimal,
    pub section_80g: Decimal,
    pub home_loan_interest: Decimal,
    pub new_regime_standard_deduction: Decimal,
    pub old_regime_standard_deduction: Decimal,
}

impl DeductionLimits {
    pub fn fy2025_26() -> Self {
        Self {
            combined_80c: dec!(150000),
            section_80d_self: dec!(25000),
            section_80d_parents: dec!(25000),
            section_80d_parents_senior: dec!(50000),
            section_80ccd: dec!(50000),
            section_80tta: dec!(10000),
            section_80g: dec!(100000),
            home_loan_interest: dec!(200000),
            new_regime_standard_deduction: dec!(75000),
            old_regime_standard_deduction: dec!(50000),
        }
    }

    /// 80D cap for the parents' premium.
    pub fn section_80d_parents_limit(
        &self,
        parents_are_senior_citizens: bool,
    ) -> Decimal {
        if parents_are_senior_citizens {
            self.section_80d_parents_senior
        } else {
            self.section_80d_parents
        }
    }
}

impl Default for DeductionLimits {
    fn default() -> Self {
        Self::fy2025_26()
    }
}
