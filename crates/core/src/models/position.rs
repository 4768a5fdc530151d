use serde::{Deserialize, Serialize};

use super::asset::{Asset, AssetOrder};
use super::rates::RateSet;
use super::weights::TargetWeights;
use crate::errors::LedgerError;

/// A single asset's monetary amount within a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub asset: Asset,
    pub amount: f64,
}

/// A complete per-asset monetary snapshot for one point in time.
///
/// Always holds exactly one entry per configured asset, in the fixed
/// asset order — construction enforces it and no operation changes the
/// shape afterwards. Rendering floors each amount to an integer and
/// joins with single spaces, which is the canonical output format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSet {
    positions: Vec<Position>,
}

impl PositionSet {
    /// Zip `amounts` positionally against the configured asset order.
    /// Fails if the lengths differ.
    pub fn from_amounts(order: &AssetOrder, amounts: &[f64]) -> Result<Self, LedgerError> {
        if amounts.len() != order.len() {
            return Err(LedgerError::InputLengthMismatch {
                expected: order.len(),
                actual: amounts.len(),
            });
        }
        let positions = order
            .iter()
            .zip(amounts.iter().copied())
            .map(|(asset, amount)| Position { asset, amount })
            .collect();
        Ok(Self { positions })
    }

    /// Total investment across all assets.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.positions.iter().map(|p| p.amount).sum()
    }

    /// Amount held in a specific asset, if it is part of this snapshot.
    #[must_use]
    pub fn amount_of(&self, asset: Asset) -> Option<f64> {
        self.positions
            .iter()
            .find(|p| p.asset == asset)
            .map(|p| p.amount)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter()
    }

    /// Amounts floored to integers, in asset order. This is what both
    /// the canonical rendering and the summary export show.
    #[must_use]
    pub fn floored_amounts(&self) -> Vec<i64> {
        self.positions
            .iter()
            .map(|p| p.amount.floor() as i64)
            .collect()
    }

    /// Add the monthly contribution to each asset, flooring the result.
    /// Positional: `schedule` must come from the same asset order.
    pub fn apply_contribution(&mut self, schedule: &PositionSet) {
        debug_assert_eq!(self.positions.len(), schedule.positions.len());
        for (position, contribution) in self.positions.iter_mut().zip(schedule.positions.iter()) {
            position.amount = (position.amount + contribution.amount).floor();
        }
    }

    /// Apply a month's market-change rate to each asset, flooring the
    /// result. A rate of 5 means +5%; negative rates represent loss.
    pub fn apply_change(&mut self, rates: &RateSet) {
        for position in &mut self.positions {
            let rate = rates.rate_of(position.asset).unwrap_or(0.0);
            position.amount = (position.amount * (1.0 + rate / 100.0)).floor();
        }
    }

    /// Redistribute the current total across assets according to the
    /// target weights, flooring each resulting amount.
    pub fn rebalance_to(&mut self, weights: &TargetWeights) {
        let total = self.total();
        for position in &mut self.positions {
            let weight = weights.percent_of(position.asset);
            position.amount = (total * weight / 100.0).floor();
        }
    }
}

impl std::fmt::Display for PositionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self
            .floored_amounts()
            .iter()
            .map(i64::to_string)
            .collect();
        f.write_str(&rendered.join(" "))
    }
}
