use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Regime;

/// Tax attributed to one slab during a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabContribution {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,

    /// Portion of taxable income that fell inside the slab.
    pub taxable_amount: Decimal,

    /// Fixed amount plus `taxable_amount * rate / 100`.
    pub tax: Decimal,

    /// Surcharge added to the running total after this slab.
    pub surcharge: Decimal,
}

/// Outcome of one regime's calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub regime: Regime,
    pub gross_income: Decimal,
    pub standard_deduction: Decimal,

    /// Deductions beyond the standard deduction. Always zero for the new regime.
    pub total_deductions: Decimal,

    pub taxable_income: Decimal,
    pub tax_payable: Decimal,
    pub slabs: Vec<SlabContribution>,
}
