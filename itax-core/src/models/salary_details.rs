use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Salary figures used for the HRA exemption.
///
/// All amounts must be expressed over the same period. Use
/// [`SalaryDetails::annualized`] to turn monthly figures into yearly ones
/// before mixing them with annual income.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryDetails {
    pub basic: Decimal,
    pub hra_received: Decimal,
    pub rent_paid: Decimal,
    pub is_metro_city: bool,
}

impl SalaryDetails {
    const MONTHS_PER_YEAR: Decimal = dec!(12);

    /// Scales monthly amounts to a full year, saturating on overflow.
    pub fn annualized(&self) -> Self {
        Self {
            basic: self.basic.saturating_mul(Self::MONTHS_PER_YEAR),
            hra_received: self.hra_received.saturating_mul(Self::MONTHS_PER_YEAR),
            rent_paid: self.rent_paid.saturating_mul(Self::MONTHS_PER_YEAR),
            is_metro_city: self.is_metro_city,
        }
    }
}
