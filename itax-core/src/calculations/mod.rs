//! Tax calculators for the new and old regimes.
//!
//! [`SlabTaxCalculator`] applies a slab table, [`HraExemption`] evaluates the
//! HRA rules, [`DeductionAggregator`] caps and totals old-regime deductions,
//! and [`RegimeTaxOrchestrator`] combines them for each regime.

pub mod common;
pub mod deductions;
pub mod hra_exemption;
pub mod regime;
pub mod slab_tax;

pub use deductions::{DeductionAggregator, DeductionBreakdown, compute_old_regime_taxable_income};
pub use hra_exemption::{HraExemption, compute_hra_exemption};
pub use regime::{
    EngineError, RegimeComparison, RegimeTaxOrchestrator, compute_new_regime_tax,
    compute_old_regime_tax, recommend,
};
pub use slab_tax::{SlabTaxBreakdown, SlabTaxCalculator, compute_slab_tax};
