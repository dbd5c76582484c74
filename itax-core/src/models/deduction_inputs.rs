use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Health insurance premiums claimed under Section 80D.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section80DPremiums {
    pub self_and_family: Decimal,
    pub parents: Decimal,
    pub parents_are_senior_citizens: bool,
}

/// Amounts claimed under each old-regime deduction, before any cap applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionInputs {
    /// Section 80C investments (PPF, ELSS, life insurance, ...).
    pub section_80c: Decimal,

    /// Home loan principal repaid. Shares the 80C ceiling.
    pub home_loan_principal: Decimal,

    pub section_80d: Section80DPremiums,

    /// NPS contribution under Section 80CCD.
    pub section_80ccd: Decimal,

    /// Savings account interest under Section 80TTA.
    pub section_80tta: Decimal,

    /// Donations under Section 80G.
    pub section_80g: Decimal,

    /// Home loan interest under Section 24(b).
    pub home_loan_interest: Decimal,

    pub nps_additional: Decimal,
    pub education_loan_interest: Decimal,
}
