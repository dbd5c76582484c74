//! Progressive slab tables.
//!
//! Slab bounds number rupees from 1: the rupee at position `k` of an income
//! falls in the slab whose `lower_bound <= k <= upper_bound`. Adjacent slabs
//! are therefore spaced one apart (`1..=400000`, `400001..=800000`, ...) and
//! the width of a bounded slab is `upper_bound - lower_bound + 1`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Regime;

/// Added to `upper_bound - lower_bound` to get the number of rupees a bounded
/// slab holds, since both bounds are inclusive.
pub const INCLUSIVE_BOUND_OFFSET: Decimal = Decimal::ONE;

/// One progressive bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// First rupee taxed in this slab (inclusive).
    pub lower_bound: Decimal,

    /// Last rupee taxed in this slab (inclusive). `None` for the final,
    /// unbounded slab.
    pub upper_bound: Option<Decimal>,

    /// Marginal rate as a percentage (0-100).
    pub rate: Decimal,

    /// Flat amount added when income reaches this slab. Used by tables that
    /// encode the tax on lower slabs up front.
    #[serde(default)]
    pub fixed_amount: Option<Decimal>,

    /// Surcharge percentage applied to the running total tax once this slab
    /// has been added.
    #[serde(default)]
    pub surcharge_percent: Option<Decimal>,
}

impl TaxSlab {
    pub fn bounded(
        lower_bound: Decimal,
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound: Some(upper_bound),
            rate,
            fixed_amount: None,
            surcharge_percent: None,
        }
    }

    pub fn unbounded(
        lower_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound: None,
            rate,
            fixed_amount: None,
            surcharge_percent: None,
        }
    }

    pub fn with_fixed_amount(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.fixed_amount = Some(amount);
        self
    }

    pub fn with_surcharge(
        mut self,
        percent: Decimal,
    ) -> Self {
        self.surcharge_percent = Some(percent);
        self
    }

    /// Number of rupees this slab can hold, or `None` when unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.upper_bound
            .map(|upper| upper - self.lower_bound + INCLUSIVE_BOUND_OFFSET)
    }
}

/// Errors raised when a slab table is malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlabTableError {
    #[error("slab table has no slabs")]
    Empty,

    /// Slab `index` does not start one rupee after the previous slab ends.
    #[error("slab {index} starts at {lower_bound}, expected {expected}")]
    NotContiguous {
        index: usize,
        lower_bound: Decimal,
        expected: Decimal,
    },

    #[error("slab {index} has upper bound {upper_bound} below its lower bound {lower_bound}")]
    InvertedBounds {
        index: usize,
        lower_bound: Decimal,
        upper_bound: Decimal,
    },

    #[error("slab {0} is unbounded but is not the final slab")]
    UnboundedBeforeEnd(usize),

    #[error("final slab must be unbounded")]
    BoundedFinalSlab,

    #[error("slab {index} has rate {rate}, expected a percentage between 0 and 100")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("slab {index} has a negative fixed amount or surcharge")]
    NegativeAdjustment { index: usize },
}

/// Ordered, validated slabs for one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegimeSlabTable {
    regime: Regime,
    slabs: Vec<TaxSlab>,
}

impl RegimeSlabTable {
    /// Builds a table after checking that the slabs are ascending, contiguous
    /// and end with a single unbounded slab.
    ///
    /// # Errors
    ///
    /// Returns [`SlabTableError`] describing the first violation found.
    pub fn new(
        regime: Regime,
        slabs: Vec<TaxSlab>,
    ) -> Result<Self, SlabTableError> {
        if slabs.is_empty() {
            return Err(SlabTableError::Empty);
        }

        let last = slabs.len() - 1;
        let mut expected_lower: Option<Decimal> = None;

        for (index, slab) in slabs.iter().enumerate() {
            if slab.rate < Decimal::ZERO || slab.rate > Decimal::ONE_HUNDRED {
                return Err(SlabTableError::InvalidRate {
                    index,
                    rate: slab.rate,
                });
            }
            let negative = |v: Option<Decimal>| v.is_some_and(|v| v < Decimal::ZERO);
            if negative(slab.fixed_amount) || negative(slab.surcharge_percent) {
                return Err(SlabTableError::NegativeAdjustment { index });
            }

            if let Some(expected) = expected_lower {
                if slab.lower_bound != expected {
                    return Err(SlabTableError::NotContiguous {
                        index,
                        lower_bound: slab.lower_bound,
                        expected,
                    });
                }
            }

            match slab.upper_bound {
                Some(upper) => {
                    if index == last {
                        return Err(SlabTableError::BoundedFinalSlab);
                    }
                    if upper < slab.lower_bound {
                        return Err(SlabTableError::InvertedBounds {
                            index,
                            lower_bound: slab.lower_bound,
                            upper_bound: upper,
                        });
                    }
                    expected_lower = Some(upper + INCLUSIVE_BOUND_OFFSET);
                }
                None if index != last => return Err(SlabTableError::UnboundedBeforeEnd(index)),
                None => {}
            }
        }

        Ok(Self { regime, slabs })
    }

    /// New regime slabs for FY 2025-26.
    pub fn new_regime_fy2025_26() -> Self {
        Self {
            regime: Regime::New,
            slabs: vec![
                TaxSlab::bounded(dec!(1), dec!(400000), dec!(0)),
                TaxSlab::bounded(dec!(400001), dec!(800000), dec!(5)),
                TaxSlab::bounded(dec!(800001), dec!(1200000), dec!(10)),
                TaxSlab::bounded(dec!(1200001), dec!(1600000), dec!(15)),
                TaxSlab::bounded(dec!(1600001), dec!(2000000), dec!(20)),
                TaxSlab::bounded(dec!(2000001), dec!(2400000), dec!(25)),
                TaxSlab::unbounded(dec!(2400001), dec!(30)),
            ],
        }
    }

    /// Old regime slabs for FY 2025-26 (individuals below 60).
    pub fn old_regime_fy2025_26() -> Self {
        Self {
            regime: Regime::Old,
            slabs: vec![
                TaxSlab::bounded(dec!(1), dec!(250000), dec!(0)),
                TaxSlab::bounded(dec!(250001), dec!(500000), dec!(5)),
                TaxSlab::bounded(dec!(500001), dec!(1000000), dec!(20)),
                TaxSlab::unbounded(dec!(1000001), dec!(30)),
            ],
        }
    }

    pub fn fy2025_26(regime: Regime) -> Self {
        match regime {
            Regime::New => Self::new_regime_fy2025_26(),
            Regime::Old => Self::old_regime_fy2025_26(),
        }
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    pub fn slabs(&self) -> &[TaxSlab] {
        &self.slabs
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn width_includes_both_bounds() {
        let slab = TaxSlab::bounded(dec!(400001), dec!(800000), dec!(5));

        assert_eq!(slab.width(), Some(dec!(400000)));
    }

    #[test]
    fn width_of_unbounded_slab_is_none() {
        let slab = TaxSlab::unbounded(dec!(2400001), dec!(30));

        assert_eq!(slab.width(), None);
    }

    #[test]
    fn built_in_tables_pass_validation() {
        for regime in Regime::ALL {
            let table = RegimeSlabTable::fy2025_26(regime);

            let rebuilt = RegimeSlabTable::new(regime, table.slabs().to_vec());

            assert_eq!(rebuilt, Ok(table));
        }
    }

    #[test]
    fn built_in_rates_are_non_decreasing() {
        for regime in Regime::ALL {
            let table = RegimeSlabTable::fy2025_26(regime);

            assert!(table.slabs().windows(2).all(|w| w[0].rate <= w[1].rate));
        }
    }

    #[test]
    fn new_rejects_empty_table() {
        let result = RegimeSlabTable::new(Regime::New, vec![]);

        assert_eq!(result, Err(SlabTableError::Empty));
    }

    #[test]
    fn new_rejects_gap_between_slabs() {
        let slabs = vec![
            TaxSlab::bounded(dec!(1), dec!(1000), dec!(0)),
            TaxSlab::unbounded(dec!(1002), dec!(10)),
        ];

        let result = RegimeSlabTable::new(Regime::New, slabs);

        assert_eq!(
            result,
            Err(SlabTableError::NotContiguous {
                index: 1,
                lower_bound: dec!(1002),
                expected: dec!(1001),
            })
        );
    }

    #[test]
    fn new_rejects_descending_slabs() {
        let slabs = vec![
            TaxSlab::bounded(dec!(1), dec!(1000), dec!(0)),
            TaxSlab::bounded(dec!(1001), dec!(500), dec!(5)),
            TaxSlab::unbounded(dec!(501), dec!(10)),
        ];

        let result = RegimeSlabTable::new(Regime::Old, slabs);

        assert_eq!(
            result,
            Err(SlabTableError::InvertedBounds {
                index: 1,
                lower_bound: dec!(1001),
                upper_bound: dec!(500),
            })
        );
    }

    #[test]
    fn new_rejects_unbounded_slab_before_end() {
        let slabs = vec![
            TaxSlab::unbounded(dec!(1), dec!(0)),
            TaxSlab::unbounded(dec!(1001), dec!(10)),
        ];

        let result = RegimeSlabTable::new(Regime::New, slabs);

        assert_eq!(result, Err(SlabTableError::UnboundedBeforeEnd(0)));
    }

    #[test]
    fn new_rejects_bounded_final_slab() {
        let slabs = vec![TaxSlab::bounded(dec!(1), dec!(1000), dec!(0))];

        let result = RegimeSlabTable::new(Regime::New, slabs);

        assert_eq!(result, Err(SlabTableError::BoundedFinalSlab));
    }

    #[test]
    fn new_rejects_rate_above_one_hundred() {
        let slabs = vec![TaxSlab::unbounded(dec!(1), dec!(100.5))];

        let result = RegimeSlabTable::new(Regime::New, slabs);

        assert_eq!(
            result,
            Err(SlabTableError::InvalidRate {
                index: 0,
                rate: dec!(100.5),
            })
        );
    }

    #[test]
    fn new_rejects_negative_surcharge() {
        let slabs = vec![TaxSlab::unbounded(dec!(1), dec!(10)).with_surcharge(dec!(-1))];

        let result = RegimeSlabTable::new(Regime::New, slabs);

        assert_eq!(result, Err(SlabTableError::NegativeAdjustment { index: 0 }));
    }
}
