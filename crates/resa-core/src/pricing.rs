//! Cabin fare strategies.
//!
//! Pricing is pluggable: either the flat per-cabin table baked into the
//! layout, or a multiplier over a flight's base fare.

use serde::{Deserialize, Serialize};

use crate::layout::{CabinName, CabinRange};

/// How a cabin's seat price is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum FareStrategy {
    /// Use the fixed price carried by each cabin range.
    FlatTable,
    /// Derive the price as `base_fare * multiplier(cabin)`.
    BaseFareMultiplier {
        base_fare: f64,
        economy: f64,
        business: f64,
        first: f64,
    },
}

impl Default for FareStrategy {
    fn default() -> Self {
        FareStrategy::FlatTable
    }
}

impl FareStrategy {
    /// Multiplier strategy with conventional cabin spreads over a base fare.
    pub fn multiplier(base_fare: f64) -> Self {
        FareStrategy::BaseFareMultiplier {
            base_fare,
            economy: 1.0,
            business: 1.5,
            first: 2.2,
        }
    }

    /// Price of a seat in the given cabin under this strategy.
    pub fn price(&self, cabin: &CabinRange) -> f64 {
        match self {
            FareStrategy::FlatTable => cabin.price,
            FareStrategy::BaseFareMultiplier {
                base_fare,
                economy,
                business,
                first,
            } => {
                let factor = match cabin.name {
                    CabinName::Economy => *economy,
                    CabinName::Business => *business,
                    CabinName::First => *first,
                };
                base_fare * factor
            }
        }
    }
}
