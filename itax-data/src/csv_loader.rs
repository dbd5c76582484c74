//! CSV loader for batches of scenarios.
//!
//! ## CSV Format
//!
//! Columns are matched by header name, so their order does not matter. Every
//! column except `gross_income` may be omitted, and empty cells count as zero
//! (or `false` for flags). Amounts may use Indian digit grouping when quoted,
//! e.g. `"12,00,000"`.
//!
//! | Column                    | Type    | Notes |
//! |---------------------------|---------|-------|
//! | `name`                    | string  | Defaults to `row N` |
//! | `financial_year`          | string  | `2025-26` or `2025`; defaults to 2025-26 |
//! | `gross_income`            | decimal | Annual gross income |
//! | `salary_period`           | string  | `monthly` (default) or `annual` |
//! | `basic`                   | decimal | Basic salary |
//! | `hra_received`            | decimal | |
//! | `rent_paid`               | decimal | |
//! | `metro_city`              | flag    | `true`/`yes`/`1` |
//! | `section_80c`             | decimal | |
//! | `home_loan_principal`     | decimal | |
//! | `section_80d_self`        | decimal | |
//! | `section_80d_parents`     | decimal | |
//! | `parents_senior_citizens` | flag    | |
//! | `section_80ccd`           | decimal | |
//! | `section_80tta`           | decimal | |
//! | `section_80g`             | decimal | |
//! | `home_loan_interest`      | decimal | |
//! | `nps_additional`          | decimal | |
//! | `education_loan_interest` | decimal | |
//!
//! ### Minimal example
//!
//! ```csv
//! name,gross_income
//! Fresher,600000
//! Senior engineer,3200000
//! ```

use std::path::{Path, PathBuf};

use itax_core::{DeductionInputs, SalaryDetails, Section80DPremiums};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::decimal::{deserialize_amount, deserialize_flag};
use crate::scenario::{Scenario, SalaryPeriod, financial_year_or_default};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    financial_year: Option<String>,
    #[serde(deserialize_with = "deserialize_amount")]
    gross_income: Decimal,
    #[serde(default)]
    salary_period: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    basic: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    hra_received: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    rent_paid: Decimal,
    #[serde(default, deserialize_with = "deserialize_flag")]
    metro_city: bool,
    #[serde(default, deserialize_with = "deserialize_amount")]
    section_80c: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    home_loan_principal: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    section_80d_self: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    section_80d_parents: Decimal,
    #[serde(default, deserialize_with = "deserialize_flag")]
    parents_senior_citizens: bool,
    #[serde(default, deserialize_with = "deserialize_amount")]
    section_80ccd: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    section_80tta: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    section_80g: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    home_loan_interest: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    nps_additional: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    education_loan_interest: Decimal,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structurally invalid CSV or a missing `gross_income` column.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based (header = row 0).
    #[error("invalid financial year '{value}' on row {row}")]
    InvalidFinancialYear { value: String, row: usize },

    #[error("invalid salary period '{value}' on row {row}")]
    InvalidSalaryPeriod { value: String, row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, CsvLoadError> {
    let financial_year =
        financial_year_or_default(row.financial_year.as_deref()).ok_or_else(|| {
            CsvLoadError::InvalidFinancialYear {
                value: row.financial_year.clone().unwrap_or_default(),
                row: row_number,
            }
        })?;

    let period_text = row.salary_period.unwrap_or_default();
    let period =
        SalaryPeriod::parse(&period_text).ok_or(CsvLoadError::InvalidSalaryPeriod {
            value: period_text.clone(),
            row: row_number,
        })?;

    let name = row
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("row {row_number}"));

    Ok(Scenario {
        name,
        financial_year,
        gross_income: row.gross_income,
        salary: period.to_annual(SalaryDetails {
            basic: row.basic,
            hra_received: row.hra_received,
            rent_paid: row.rent_paid,
            is_metro_city: row.metro_city,
        }),
        deductions: DeductionInputs {
            section_80c: row.section_80c,
            home_loan_principal: row.home_loan_principal,
            section_80d: Section80DPremiums {
                self_and_family: row.section_80d_self,
                parents: row.section_80d_parents,
                parents_are_senior_citizens: row.parents_senior_citizens,
            },
            section_80ccd: row.section_80ccd,
            section_80tta: row.section_80tta,
            section_80g: row.section_80g,
            home_loan_interest: row.home_loan_interest,
            nps_additional: row.nps_additional,
            education_loan_interest: row.education_loan_interest,
        },
    })
}

/// Parses CSV text into scenarios, in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid or lacks a
///   `gross_income` column.
/// * [`CsvLoadError::InvalidFinancialYear`] or
///   [`CsvLoadError::InvalidSalaryPeriod`] for an unrecognised value.
pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<Scenario>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
