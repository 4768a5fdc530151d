use chrono::Month;
use std::collections::BTreeMap;

use super::asset::AssetOrder;
use super::position::PositionSet;
use super::rates::RateSet;
use super::weights::TargetWeights;

/// Whether the portfolio has received its one-time initial allocation.
///
/// Target weights only exist alongside an allocation, so the pair lives
/// in one state instead of two independently-nullable fields.
#[derive(Debug, Clone, Default)]
pub enum AllocationState {
    #[default]
    Unallocated,
    Allocated {
        initial: PositionSet,
        target_weights: TargetWeights,
    },
}

/// The single mutable aggregate all operations work against.
///
/// `balances` is derived state: written only by the recurrence in
/// `LedgerService`, never directly by callers. Both maps are keyed by
/// calendar month so iteration always respects calendar order no matter
/// the registration order.
#[derive(Debug, Clone)]
pub struct Ledger {
    /// Fixed positional asset order for all input and output.
    pub assets: AssetOrder,

    /// Write-once initial allocation plus the weights derived from it.
    pub allocation: AllocationState,

    /// Write-once fixed monthly contribution, applied from the second
    /// simulated month onward.
    pub contribution: Option<PositionSet>,

    /// Sparse per-month market-change rates; one entry per month,
    /// immutable once written.
    pub change_rates: BTreeMap<Month, RateSet>,

    /// Memoized per-month balances, appended by the recurrence.
    pub balances: BTreeMap<Month, PositionSet>,
}

impl Ledger {
    /// An empty ledger over the given asset order.
    #[must_use]
    pub fn new(assets: AssetOrder) -> Self {
        Self {
            assets,
            allocation: AllocationState::Unallocated,
            contribution: None,
            change_rates: BTreeMap::new(),
            balances: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_allocated(&self) -> bool {
        matches!(self.allocation, AllocationState::Allocated { .. })
    }

    /// The initial allocation, once set.
    #[must_use]
    pub fn initial_allocation(&self) -> Option<&PositionSet> {
        match &self.allocation {
            AllocationState::Unallocated => None,
            AllocationState::Allocated { initial, .. } => Some(initial),
        }
    }

    /// The target weights derived from the initial allocation, once set.
    #[must_use]
    pub fn target_weights(&self) -> Option<&TargetWeights> {
        match &self.allocation {
            AllocationState::Unallocated => None,
            AllocationState::Allocated { target_weights, .. } => Some(target_weights),
        }
    }

    /// Latest month with a computed balance.
    #[must_use]
    pub fn computed_through(&self) -> Option<Month> {
        self.balances.keys().next_back().copied()
    }

    /// Latest month with a registered market-change rate.
    #[must_use]
    pub fn latest_rated_month(&self) -> Option<Month> {
        self.change_rates.keys().next_back().copied()
    }

    /// Number of configured assets.
    #[must_use]
    pub fn supported_assets(&self) -> usize {
        self.assets.len()
    }
}
