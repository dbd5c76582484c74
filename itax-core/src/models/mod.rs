mod deduction_inputs;
mod deduction_limits;
mod financial_year;
mod regime;
mod salary_details;
mod tax_result;
mod tax_slab;

pub use deduction_inputs::{DeductionInputs, Section80DPremiums};
pub use deduction_limits::DeductionLimits;
pub use financial_year::FinancialYear;
pub use regime::Regime;
pub use salary_details::SalaryDetails;
pub use tax_result::{SlabContribution, TaxResult};
pub use tax_slab::{INCLUSIVE_BOUND_OFFSET, RegimeSlabTable, SlabTableError, TaxSlab};
