//! Indian personal income tax under the new and old regimes.
//!
//! All amounts are [`rust_decimal::Decimal`] rupees. Every calculation is a
//! pure function of its inputs.

pub mod calculations;
pub mod models;

pub use calculations::{EngineError, RegimeComparison, RegimeTaxOrchestrator};
pub use models::*;
