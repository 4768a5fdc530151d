use serde::{Deserialize, Serialize};

use super::asset::Asset;
use super::position::PositionSet;
use crate::errors::LedgerError;

/// The target allocation percentages derived once from the initial
/// allocation. Immutable after derivation; rebalancing always resets
/// amounts toward these weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetWeights {
    weights: Vec<(Asset, f64)>,
}

impl TargetWeights {
    /// Derive weights from the initial allocation: each asset's share of
    /// the total investment, times 100. Fails on a non-positive total.
    pub fn from_allocation(allocation: &PositionSet) -> Result<Self, LedgerError> {
        let total = allocation.total();
        if total <= 0.0 {
            return Err(LedgerError::NonPositiveAllocation);
        }
        let weights = allocation
            .iter()
            .map(|p| (p.asset, p.amount * 100.0 / total))
            .collect();
        Ok(Self { weights })
    }

    /// The target percentage for an asset. Assets outside the configured
    /// order carry no weight.
    #[must_use]
    pub fn percent_of(&self, asset: Asset) -> f64 {
        self.weights
            .iter()
            .find(|(a, _)| *a == asset)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Asset, f64)> + '_ {
        self.weights.iter().copied()
    }
}
