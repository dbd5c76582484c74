//! Progressive slab tax.
//!
//! Income is poured into the slabs in ascending order. Each bounded slab
//! absorbs at most its [`TaxSlab::width`]; the final slab absorbs whatever
//! remains. A slab contributes its fixed amount (if any) plus
//! `amount_in_slab * rate / 100`. When a slab carries a surcharge, the
//! surcharge percentage is applied to the running total tax, including that
//! slab's own contribution, and added to the total before the next slab.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itax_core::RegimeSlabTable;
//! use itax_core::calculations::SlabTaxCalculator;
//!
//! let table = RegimeSlabTable::new_regime_fy2025_26();
//! let calculator = SlabTaxCalculator::new(&table);
//!
//! assert_eq!(calculator.tax(dec!(400000)), dec!(0));
//! assert_eq!(calculator.tax(dec!(400001)), dec!(0.05));
//! assert_eq!(calculator.tax(dec!(1125000)), dec!(52500));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{non_negative, percent_of, round_half_up};
use crate::{RegimeSlabTable, SlabContribution, TaxSlab};

/// Per-slab contributions and the resulting tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabTaxBreakdown {
    /// Income the slabs were applied to, after clamping at zero.
    pub taxable_income: Decimal,

    /// One entry per slab that received income, in ascending order.
    pub contributions: Vec<SlabContribution>,

    /// Sum of all contributions and surcharges, rounded to two places.
    pub total_tax: Decimal,
}

/// Applies a [`RegimeSlabTable`] to taxable income.
#[derive(Debug, Clone, Copy)]
pub struct SlabTaxCalculator<'a> {
    table: &'a RegimeSlabTable,
}

impl<'a> SlabTaxCalculator<'a> {
    pub fn new(table: &'a RegimeSlabTable) -> Self {
        Self { table }
    }

    /// Computes the tax and the contribution of every slab reached.
    ///
    /// Zero or negative income yields no tax and an empty breakdown.
    pub fn calculate(
        &self,
        taxable_income: Decimal,
    ) -> SlabTaxBreakdown {
        if taxable_income < Decimal::ZERO {
            warn!(
                %taxable_income,
                "negative taxable income passed to slab calculator; treating as zero"
            );
        }
        let income = non_negative(taxable_income);

        let mut remaining = income;
        let mut running_total = Decimal::ZERO;
        let mut contributions = Vec::new();

        for slab in self.table.slabs() {
            if remaining <= Decimal::ZERO {
                break;
            }

            let taxable_amount = self.amount_in_slab(slab, remaining);
            let tax = self.slab_tax(slab, taxable_amount);
            running_total = running_total.saturating_add(tax);

            let surcharge = self.surcharge(slab, running_total);
            running_total = running_total.saturating_add(surcharge);

            remaining -= taxable_amount;

            contributions.push(SlabContribution {
                lower_bound: slab.lower_bound,
                upper_bound: slab.upper_bound,
                rate: slab.rate,
                taxable_amount,
                tax,
                surcharge,
            });
        }

        let total_tax = round_half_up(running_total);
        debug!(
            regime = %self.table.regime(),
            %income,
            slabs_reached = contributions.len(),
            %total_tax,
            "slab tax computed"
        );

        SlabTaxBreakdown {
            taxable_income: income,
            contributions,
            total_tax,
        }
    }

    /// Convenience wrapper returning only the total.
    pub fn tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        self.calculate(taxable_income).total_tax
    }

    /// Income that falls inside `slab`; the unbounded slab takes all of it.
    fn amount_in_slab(
        &self,
        slab: &TaxSlab,
        remaining: Decimal,
    ) -> Decimal {
        match slab.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        }
    }

    fn slab_tax(
        &self,
        slab: &TaxSlab,
        taxable_amount: Decimal,
    ) -> Decimal {
        slab.fixed_amount
            .unwrap_or(Decimal::ZERO)
            .saturating_add(percent_of(taxable_amount, slab.rate))
    }

    /// Surcharge on the running total, compounding with earlier slabs.
    fn surcharge(
        &self,
        slab: &TaxSlab,
        running_total: Decimal,
    ) -> Decimal {
        slab.surcharge_percent
            .map(|percent| percent_of(running_total, percent))
            .unwrap_or(Decimal::ZERO)
    }
}

/// Tax on `taxable_income` under `table`.
pub fn compute_slab_tax(
    taxable_income: Decimal,
    table: &RegimeSlabTable,
) -> Decimal {
    SlabTaxCalculator::new(table).tax(taxable_income)
}
