//! Plain-text rendering of comparisons and slab tables.

use std::fmt;

use itax_core::calculations::DeductionBreakdown;
use itax_core::{RegimeComparison, RegimeSlabTable, SlabContribution, TaxResult};
use itax_data::Scenario;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::format::{format_inr, format_rate, format_whole};

const LABEL_WIDTH: usize = 34;
const AMOUNT_WIDTH: usize = 16;

/// A scenario together with its computed comparison.
#[derive(Debug, Serialize)]
pub struct ScenarioOutcome<'a> {
    pub scenario: &'a Scenario,
    pub comparison: &'a RegimeComparison,
}

fn line(
    f: &mut fmt::Formatter<'_>,
    indent: usize,
    label: &str,
    amount: Decimal,
) -> fmt::Result {
    writeln!(
        f,
        "{:indent$}{label:<width$}{:>AMOUNT_WIDTH$}",
        "",
        format_inr(amount),
        width = LABEL_WIDTH - indent,
    )
}

fn slab_range(
    lower_bound: Decimal,
    upper_bound: Option<Decimal>,
) -> String {
    match upper_bound {
        Some(upper) => format!("{} - {}", format_whole(lower_bound), format_whole(upper)),
        None => format!("above {}", format_whole(lower_bound - Decimal::ONE)),
    }
}

fn write_slabs(
    f: &mut fmt::Formatter<'_>,
    slabs: &[SlabContribution],
) -> fmt::Result {
    if slabs.is_empty() {
        return writeln!(f, "    (no taxable income)");
    }
    for slab in slabs {
        let label = format!(
            "{} @ {}",
            slab_range(slab.lower_bound, slab.upper_bound),
            format_rate(slab.rate)
        );
        writeln!(
            f,
            "    {label:<30}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
            format_inr(slab.taxable_amount),
            format_inr(slab.tax),
        )?;
        if slab.surcharge > Decimal::ZERO {
            line(f, 6, "surcharge", slab.surcharge)?;
        }
    }
    Ok(())
}

fn write_deductions(
    f: &mut fmt::Formatter<'_>,
    d: &DeductionBreakdown,
) -> fmt::Result {
    let rows = [
        ("80C + home loan principal", d.section_80c),
        ("80D health insurance", d.section_80d),
        ("80CCD NPS", d.section_80ccd),
        ("80TTA savings interest", d.section_80tta),
        ("80G donations", d.section_80g),
        ("HRA exemption", d.hra.exemption),
        ("Home loan interest", d.home_loan_interest),
        ("Additional NPS", d.nps_additional),
        ("Education loan interest", d.education_loan_interest),
    ];
    for (label, amount) in rows {
        if amount > Decimal::ZERO {
            line(f, 4, label, amount)?;
        }
    }
    line(f, 2, "Total deductions", d.total)
}

fn write_regime(
    f: &mut fmt::Formatter<'_>,
    result: &TaxResult,
    deductions: Option<&DeductionBreakdown>,
) -> fmt::Result {
    writeln!(f, "{}", result.regime)?;
    line(f, 2, "Standard deduction", result.standard_deduction)?;
    if let Some(d) = deductions {
        write_deductions(f, d)?;
    }
    line(f, 2, "Taxable income", result.taxable_income)?;
    writeln!(f, "  Slabs")?;
    write_slabs(f, &result.slabs)?;
    line(f, 2, "Tax payable", result.tax_payable)
}

impl fmt::Display for ScenarioOutcome<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let c = self.comparison;

        writeln!(
            f,
            "{} (FY {})",
            self.scenario.name, self.scenario.financial_year
        )?;
        line(f, 0, "Gross income", self.scenario.gross_income)?;
        writeln!(f)?;
        write_regime(f, &c.new_regime, None)?;
        writeln!(f)?;
        write_regime(f, &c.old_regime, Some(&c.deductions))?;
        writeln!(f)?;
        write!(f, "Recommended: {}", c.recommended)?;
        if c.savings > Decimal::ZERO {
            write!(f, " (saves {})", format_inr(c.savings))?;
        } else {
            write!(f, " (both regimes cost the same)")?;
        }
        writeln!(f)
    }
}

/// Renders a slab table.
pub struct SlabTableReport<'a>(pub &'a RegimeSlabTable);

impl fmt::Display for SlabTableReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", self.0.regime())?;
        for slab in self.0.slabs() {
            writeln!(
                f,
                "  {:<30}{:>8}",
                slab_range(slab.lower_bound, slab.upper_bound),
                format_rate(slab.rate)
            )?;
        }
        Ok(())
    }
}
