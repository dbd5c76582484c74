use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Indian financial year, running 1 April to 31 March.
///
/// The wrapped value is the calendar year in which the financial year starts,
/// so `FinancialYear(2025)` is FY 2025-26.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FinancialYear(pub i32);

impl FinancialYear {
    pub const FY_2025_26: FinancialYear = FinancialYear(2025);

    /// Returns the financial year containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        if date.month() >= 4 {
            FinancialYear(date.year())
        } else {
            FinancialYear(date.year() - 1)
        }
    }

    /// 1 April of the starting year.
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0, 4, 1)
    }

    /// 31 March of the following year.
    pub fn end_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0.checked_add(1)?, 3, 31)
    }

    /// Parses either `"2025-26"` or a bare starting year `"2025"`.
    ///
    /// The two-digit suffix must follow the starting year.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.split_once('-') {
            Some((start, end)) => {
                let start: i32 = start.parse().ok()?;
                let end: i32 = end.parse().ok()?;
                if end == start.checked_add(1)? % 100 {
                    Some(FinancialYear(start))
                } else {
                    None
                }
            }
            None => s.parse().ok().map(FinancialYear),
        }
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let suffix = (i64::from(self.0) + 1).rem_euclid(100);
        write!(f, "{}-{:02}", self.0, suffix)
    }
}
