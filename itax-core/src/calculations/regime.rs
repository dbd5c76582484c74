//! End-to-end tax under each regime, and the comparison between them.
//!
//! - New regime: gross income less the new-regime standard deduction, taxed on
//!   the new slabs. No other deduction applies.
//! - Old regime: gross income less the old-regime standard deduction and every
//!   capped deduction, taxed on the old slabs.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itax_core::{DeductionInputs, Regime, SalaryDetails};
//! use itax_core::calculations::RegimeTaxOrchestrator;
//!
//! let engine = RegimeTaxOrchestrator::fy2025_26();
//! let comparison = engine.compare(
//!     dec!(1200000),
//!     &DeductionInputs::default(),
//!     &SalaryDetails::default(),
//! );
//!
//! assert_eq!(comparison.new_regime.tax_payable, dec!(52500));
//! assert_eq!(comparison.old_regime.tax_payable, dec!(157500));
//! assert_eq!(comparison.recommended, Regime::New);
//! assert_eq!(comparison.savings, dec!(105000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::non_negative;
use crate::calculations::deductions::{DeductionAggregator, DeductionBreakdown};
use crate::calculations::slab_tax::SlabTaxCalculator;
use crate::{
    DeductionInputs, DeductionLimits, FinancialYear, Regime, RegimeSlabTable, SalaryDetails,
    TaxResult,
};

/// Errors raised when building an orchestrator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Only the tables for FY 2025-26 are built in.
    #[error("no tax tables for financial year {0}")]
    UnsupportedYear(FinancialYear),

    /// A slab table was supplied for the wrong regime.
    #[error("expected a {expected} slab table, got {actual}")]
    RegimeMismatch { expected: Regime, actual: Regime },
}

/// Both regimes computed from the same inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub new_regime: TaxResult,
    pub old_regime: TaxResult,

    /// Old-regime deductions, itemised.
    pub deductions: DeductionBreakdown,

    pub recommended: Regime,

    /// Difference between the two tax amounts.
    pub savings: Decimal,
}

impl RegimeComparison {
    pub fn result(
        &self,
        regime: Regime,
    ) -> &TaxResult {
        match regime {
            Regime::New => &self.new_regime,
            Regime::Old => &self.old_regime,
        }
    }
}

/// Regime picked for the given tax amounts.
///
/// The new regime wins only when strictly cheaper; equal amounts keep the old
/// regime.
pub fn recommend(
    new_regime_tax: Decimal,
    old_regime_tax: Decimal,
) -> Regime {
    if new_regime_tax < old_regime_tax {
        Regime::New
    } else {
        Regime::Old
    }
}

/// Runs the slab and deduction calculators for both regimes.
#[derive(Debug, Clone)]
pub struct RegimeTaxOrchestrator {
    financial_year: FinancialYear,
    new_slabs: RegimeSlabTable,
    old_slabs: RegimeSlabTable,
    deductions: DeductionAggregator,
}

impl RegimeTaxOrchestrator {
    /// Builds an orchestrator from explicit tables and limits.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RegimeMismatch`] if either table belongs to the
    /// other regime.
    pub fn new(
        financial_year: FinancialYear,
        new_slabs: RegimeSlabTable,
        old_slabs: RegimeSlabTable,
        limits: DeductionLimits,
    ) -> Result<Self, EngineError> {
        for (expected, table) in [(Regime::New, &new_slabs), (Regime::Old, &old_slabs)] {
            if table.regime() != expected {
                return Err(EngineError::RegimeMismatch {
                    expected,
                    actual: table.regime(),
                });
            }
        }

        Ok(Self {
            financial_year,
            new_slabs,
            old_slabs,
            deductions: DeductionAggregator::new(limits),
        })
    }

    /// The built-in FY 2025-26 tables and limits.
    pub fn fy2025_26() -> Self {
        Self {
            financial_year: FinancialYear::FY_2025_26,
            new_slabs: RegimeSlabTable::new_regime_fy2025_26(),
            old_slabs: RegimeSlabTable::old_regime_fy2025_26(),
            deductions: DeductionAggregator::new(DeductionLimits::fy2025_26()),
        }
    }

    /// The built-in tables for `financial_year`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedYear`] for any year other than 2025-26.
    pub fn for_year(financial_year: FinancialYear) -> Result<Self, EngineError> {
        if financial_year == FinancialYear::FY_2025_26 {
            Ok(Self::fy2025_26())
        } else {
            Err(EngineError::UnsupportedYear(financial_year))
        }
    }

    pub fn financial_year(&self) -> FinancialYear {
        self.financial_year
    }

    pub fn limits(&self) -> &DeductionLimits {
        self.deductions.limits()
    }

    pub fn slab_table(
        &self,
        regime: Regime,
    ) -> &RegimeSlabTable {
        match regime {
            Regime::New => &self.new_slabs,
            Regime::Old => &self.old_slabs,
        }
    }

    /// New-regime tax on `gross_income`.
    pub fn new_regime_tax(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        self.new_regime(gross_income).tax_payable
    }

    /// Old-regime tax on `gross_income` after all deductions.
    pub fn old_regime_tax(
        &self,
        gross_income: Decimal,
        inputs: &DeductionInputs,
        salary: &SalaryDetails,
    ) -> Decimal {
        self.old_regime(gross_income, inputs, salary).tax_payable
    }

    /// New-regime result with its slab breakdown.
    pub fn new_regime(
        &self,
        gross_income: Decimal,
    ) -> TaxResult {
        let gross_income = self.checked_gross(gross_income);
        let standard_deduction = self.limits().new_regime_standard_deduction;
        let taxable_income = non_negative(gross_income - standard_deduction);

        self.tax_result(
            Regime::New,
            gross_income,
            standard_deduction,
            Decimal::ZERO,
            taxable_income,
        )
    }

    /// Old-regime result with its slab breakdown.
    pub fn old_regime(
        &self,
        gross_income: Decimal,
        inputs: &DeductionInputs,
        salary: &SalaryDetails,
    ) -> TaxResult {
        let breakdown = self.deductions.breakdown(inputs, salary);
        self.old_regime_from_breakdown(gross_income, &breakdown)
    }

    /// Computes both regimes and recommends the cheaper one.
    pub fn compare(
        &self,
        gross_income: Decimal,
        inputs: &DeductionInputs,
        salary: &SalaryDetails,
    ) -> RegimeComparison {
        let deductions = self.deductions.breakdown(inputs, salary);
        let new_regime = self.new_regime(gross_income);
        let old_regime = self.old_regime_from_breakdown(gross_income, &deductions);

        let recommended = recommend(new_regime.tax_payable, old_regime.tax_payable);
        let savings = (old_regime.tax_payable - new_regime.tax_payable).abs();

        debug!(
            fy = %self.financial_year,
            new_tax = %new_regime.tax_payable,
            old_tax = %old_regime.tax_payable,
            %recommended,
            "regimes compared"
        );

        RegimeComparison {
            new_regime,
            old_regime,
            deductions,
            recommended,
            savings,
        }
    }

    fn old_regime_from_breakdown(
        &self,
        gross_income: Decimal,
        breakdown: &DeductionBreakdown,
    ) -> TaxResult {
        let gross_income = self.checked_gross(gross_income);
        let standard_deduction = self.limits().old_regime_standard_deduction;
        let taxable_income =
            self.deductions
                .taxable_income(gross_income, standard_deduction, breakdown.total);

        self.tax_result(
            Regime::Old,
            gross_income,
            standard_deduction,
            breakdown.total,
            taxable_income,
        )
    }

    fn tax_result(
        &self,
        regime: Regime,
        gross_income: Decimal,
        standard_deduction: Decimal,
        total_deductions: Decimal,
        taxable_income: Decimal,
    ) -> TaxResult {
        let slabs = SlabTaxCalculator::new(self.slab_table(regime)).calculate(taxable_income);

        TaxResult {
            regime,
            gross_income,
            standard_deduction,
            total_deductions,
            taxable_income,
            tax_payable: slabs.total_tax,
            slabs: slabs.contributions,
        }
    }

    fn checked_gross(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        if gross_income < Decimal::ZERO {
            warn!(%gross_income, "negative gross income; treating as zero");
        }
        non_negative(gross_income)
    }
}

impl Default for RegimeTaxOrchestrator {
    fn default() -> Self {
        Self::fy2025_26()
    }
}

/// New-regime tax under the FY 2025-26 tables.
pub fn compute_new_regime_tax(gross_income: Decimal) -> Decimal {
    RegimeTaxOrchestrator::fy2025_26().new_regime_tax(gross_income)
}

/// Old-regime tax under the FY 2025-26 tables and limits.
pub fn compute_old_regime_tax(
    gross_income: Decimal,
    inputs: &DeductionInputs,
    salary: &SalaryDetails,
) -> Decimal {
    RegimeTaxOrchestrator::fy2025_26().old_regime_tax(gross_income, inputs, salary)
}
