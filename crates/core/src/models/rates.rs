use serde::{Deserialize, Serialize};

use super::asset::{Asset, AssetOrder};
use crate::errors::LedgerError;

/// The market growth/loss percentages registered for one month, one
/// entry per configured asset in the fixed asset order.
///
/// Values are plain percentages (5 means +5%); negatives are allowed
/// and no bound is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSet {
    rates: Vec<(Asset, f64)>,
}

impl RateSet {
    /// Zip `rates` positionally against the configured asset order.
    /// Fails if the lengths differ.
    pub fn from_rates(order: &AssetOrder, rates: &[f64]) -> Result<Self, LedgerError> {
        if rates.len() != order.len() {
            return Err(LedgerError::InputLengthMismatch {
                expected: order.len(),
                actual: rates.len(),
            });
        }
        let rates = order.iter().zip(rates.iter().copied()).collect();
        Ok(Self { rates })
    }

    /// The percentage registered for a specific asset.
    #[must_use]
    pub fn rate_of(&self, asset: Asset) -> Option<f64> {
        self.rates
            .iter()
            .find(|(a, _)| *a == asset)
            .map(|(_, rate)| *rate)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Asset, f64)> + '_ {
        self.rates.iter().copied()
    }
}
