//! Input adapters for the tax engine: lenient amount parsing, TOML scenario
//! files and CSV scenario batches.

pub mod csv_loader;
pub mod decimal;
pub mod scenario;

pub use csv_loader::CsvLoadError;
pub use decimal::{ParseDecimalError, parse_decimal, parse_decimal_or_zero, parse_flag};
pub use scenario::{SalaryPeriod, Scenario, ScenarioError};
