//! Taxpayer scenarios read from TOML.
//!
//! ```toml
//! name = "Metro salaried"
//! financial_year = "2025-26"
//! gross_income = "18,00,000"
//!
//! [salary]
//! period = "monthly"        # or "annual"; defaults to monthly
//! basic = 50000
//! hra_received = 25000
//! rent_paid = 20000
//! metro_city = true
//!
//! [deductions]
//! section_80c = 150000
//! section_80d_self = 25000
//! section_80d_parents = 30000
//! parents_senior_citizens = true
//! home_loan_interest = 200000
//! ```
//!
//! Every amount is optional and defaults to zero. Unparsable amounts are
//! treated as zero.

use std::path::{Path, PathBuf};

use itax_core::{DeductionInputs, FinancialYear, SalaryDetails, Section80DPremiums};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::decimal::{deserialize_amount, deserialize_flag};

/// Errors that can occur while loading a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("cannot read scenario '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid financial year '{0}', expected e.g. 2025-26")]
    InvalidFinancialYear(String),

    #[error("invalid salary period '{0}', expected 'monthly' or 'annual'")]
    InvalidSalaryPeriod(String),
}

/// Period the salary figures are expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SalaryPeriod {
    #[default]
    Monthly,
    Annual,
}

impl SalaryPeriod {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "monthly" | "month" => Some(Self::Monthly),
            "annual" | "yearly" | "year" => Some(Self::Annual),
            _ => None,
        }
    }

    /// Converts salary figures in this period to annual amounts.
    pub fn to_annual(
        self,
        salary: SalaryDetails,
    ) -> SalaryDetails {
        match self {
            Self::Monthly => salary.annualized(),
            Self::Annual => salary,
        }
    }
}

/// One complete set of inputs for a comparison.
///
/// Salary figures are always annual once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub name: String,
    pub financial_year: FinancialYear,
    pub gross_income: Decimal,
    pub salary: SalaryDetails,
    pub deductions: DeductionInputs,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ScenarioFile {
    name: Option<String>,
    financial_year: Option<String>,
    #[serde(deserialize_with = "deserialize_amount")]
    gross_income: Decimal,
    salary: SalarySection,
    deductions: DeductionSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SalarySection {
    period: Option<String>,
    #[serde(deserialize_with = "deserialize_amount")]
    basic: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    hra_received: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    rent_paid: Decimal,
    #[serde(deserialize_with = "deserialize_flag")]
    metro_city: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DeductionSection {
    #[serde(deserialize_with = "deserialize_amount")]
    section_80c: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    home_loan_principal: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    section_80d_self: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    section_80d_parents: Decimal,
    #[serde(deserialize_with = "deserialize_flag")]
    parents_senior_citizens: bool,
    #[serde(deserialize_with = "deserialize_amount")]
    section_80ccd: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    section_80tta: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    section_80g: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    home_loan_interest: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    nps_additional: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    education_loan_interest: Decimal,
}

impl From<DeductionSection> for DeductionInputs {
    fn from(d: DeductionSection) -> Self {
        DeductionInputs {
            section_80c: d.section_80c,
            home_loan_principal: d.home_loan_principal,
            section_80d: Section80DPremiums {
                self_and_family: d.section_80d_self,
                parents: d.section_80d_parents,
                parents_are_senior_citizens: d.parents_senior_citizens,
            },
            section_80ccd: d.section_80ccd,
            section_80tta: d.section_80tta,
            section_80g: d.section_80g,
            home_loan_interest: d.home_loan_interest,
            nps_additional: d.nps_additional,
            education_loan_interest: d.education_loan_interest,
        }
    }
}

/// Parses an optional financial year, defaulting to FY 2025-26.
pub(crate) fn financial_year_or_default(value: Option<&str>) -> Option<FinancialYear> {
    match value.map(str::trim) {
        None | Some("") => Some(FinancialYear::FY_2025_26),
        Some(s) => FinancialYear::parse(s),
    }
}

impl ScenarioFile {
    fn into_scenario(
        self,
        default_name: &str,
    ) -> Result<Scenario, ScenarioError> {
        let year_text = self.financial_year;
        let financial_year = financial_year_or_default(year_text.as_deref()).ok_or_else(|| {
            ScenarioError::InvalidFinancialYear(year_text.clone().unwrap_or_default())
        })?;

        let period_text = self.salary.period.unwrap_or_default();
        let period = SalaryPeriod::parse(&period_text)
            .ok_or(ScenarioError::InvalidSalaryPeriod(period_text))?;

        let salary = period.to_annual(SalaryDetails {
            basic: self.salary.basic,
            hra_received: self.salary.hra_received,
            rent_paid: self.salary.rent_paid,
            is_metro_city: self.salary.metro_city,
        });

        Ok(Scenario {
            name: self.name.unwrap_or_else(|| default_name.to_string()),
            financial_year,
            gross_income: self.gross_income,
            salary,
            deductions: self.deductions.into(),
        })
    }
}

/// Parses a scenario from TOML text.
///
/// # Errors
///
/// Returns [`ScenarioError`] for malformed TOML, unknown keys, or an
/// unrecognised financial year or salary period.
pub fn load_from_str(input: &str) -> Result<Scenario, ScenarioError> {
    let file: ScenarioFile = toml::from_str(input)?;
    file.into_scenario("scenario")
}

/// Reads a scenario file. The file stem names the scenario unless the file
/// sets `name`.
///
/// # Errors
///
/// Returns [`ScenarioError::Io`] when the file cannot be read, otherwise as
/// [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Scenario, ScenarioError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ScenarioFile = toml::from_str(&contents)?;
    let default_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scenario".to_string());

    debug!(path = %path.display(), "scenario file parsed");
    file.into_scenario(&default_name)
}
