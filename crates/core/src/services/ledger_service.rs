use chrono::Month;
use tracing::{debug, info};

use crate::errors::LedgerError;
use crate::models::asset::AssetOrder;
use crate::models::ledger::{AllocationState, Ledger};
use crate::models::position::PositionSet;
use crate::models::rates::RateSet;
use crate::models::weights::TargetWeights;

/// Sentinel returned by the rebalance query while the checkpoint month
/// has not been computed yet.
pub const CANNOT_REBALANCE: &str = "CANNOT_REBALANCE";

/// Runs the month-by-month balance projection and the setup operations
/// that feed it.
///
/// Pure business logic — no I/O. All state lives in the [`Ledger`]
/// passed to each call, so the service itself is stateless and trivially
/// shareable.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    // ── Setup ───────────────────────────────────────────────────────

    /// Record the one-time initial allocation and derive the target
    /// weights from it. Fails if already allocated, if the amount count
    /// doesn't match the configured assets, or on negative amounts.
    pub fn allocate(&self, ledger: &mut Ledger, amounts: &[f64]) -> Result<(), LedgerError> {
        if ledger.is_allocated() {
            return Err(LedgerError::AlreadyAllocated);
        }
        let initial = Self::positions_from(&ledger.assets, amounts)?;
        let target_weights = TargetWeights::from_allocation(&initial)?;
        info!(
            allocation = %initial,
            weights = ?target_weights,
            "portfolio initialized with initial allocation"
        );
        ledger.allocation = AllocationState::Allocated {
            initial,
            target_weights,
        };
        Ok(())
    }

    /// Record the one-time monthly contribution schedule. Independent of
    /// allocation — it only becomes meaningful once balances are
    /// projected, but may be configured first.
    pub fn set_contribution_schedule(
        &self,
        ledger: &mut Ledger,
        amounts: &[f64],
    ) -> Result<(), LedgerError> {
        if ledger.contribution.is_some() {
            return Err(LedgerError::ContributionAlreadyConfigured);
        }
        let schedule = Self::positions_from(&ledger.assets, amounts)?;
        debug!(contribution = %schedule, "monthly contribution schedule configured");
        ledger.contribution = Some(schedule);
        Ok(())
    }

    /// Register the market-change rate for one month. Each month accepts
    /// exactly one registration; entries are immutable once written.
    pub fn register_rate(
        &self,
        ledger: &mut Ledger,
        rates: &[f64],
        month: Month,
    ) -> Result<(), LedgerError> {
        if ledger.change_rates.contains_key(&month) {
            return Err(LedgerError::RateAlreadyRegistered(month));
        }
        let rate_set = RateSet::from_rates(&ledger.assets, rates)?;
        debug!(month = month.name(), rates = ?rate_set, "market change rate registered");
        ledger.change_rates.insert(month, rate_set);
        Ok(())
    }

    // ── Projection ──────────────────────────────────────────────────

    /// Bring the balance table up to date with the registered rates.
    ///
    /// Idempotent: invoked before every query. Seeds January from the
    /// initial allocation (growth only, no contribution), then walks
    /// forward one calendar month at a time — carry over the previous
    /// balance, add the contribution, apply the month's rate, and
    /// rebalance on the June/December checkpoints. Every arithmetic step
    /// floors its result. A month already cached is never overwritten.
    ///
    /// Seeding strictly requires January's rate; a gap in the registered
    /// months fails with the missing month's lookup error, leaving the
    /// months computed so far cached.
    pub fn update_balances(&self, ledger: &mut Ledger) -> Result<(), LedgerError> {
        let last_rated = ledger
            .latest_rated_month()
            .ok_or(LedgerError::RatesNotRegistered)?;

        if ledger.balances.is_empty() {
            let initial = ledger
                .initial_allocation()
                .ok_or(LedgerError::NotAllocated)?;
            let january = ledger
                .change_rates
                .get(&Month::January)
                .ok_or(LedgerError::RateNotRegistered(Month::January))?;
            let mut seed = initial.clone();
            seed.apply_change(january);
            debug!(balance = %seed, "seeded January balance");
            ledger.balances.insert(Month::January, seed);
        }

        loop {
            let last_computed = match ledger.computed_through() {
                Some(month) => month,
                None => return Ok(()),
            };
            if month_ordinal(last_computed) >= month_ordinal(last_rated) {
                return Ok(());
            }
            let current = last_computed.succ();

            let mut balance = match ledger.balances.get(&last_computed) {
                Some(carry_over) => carry_over.clone(),
                None => return Ok(()),
            };
            if let Some(schedule) = &ledger.contribution {
                balance.apply_contribution(schedule);
            }
            let rate = ledger
                .change_rates
                .get(&current)
                .ok_or(LedgerError::RateNotRegistered(current))?;
            balance.apply_change(rate);

            if is_rebalance_month(current) {
                let weights = ledger
                    .target_weights()
                    .ok_or(LedgerError::NotAllocated)?;
                balance.rebalance_to(weights);
                info!(
                    month = current.name(),
                    balance = %balance,
                    "rebalanced to target weights"
                );
            }

            debug!(month = current.name(), balance = %balance, "computed monthly balance");
            ledger.balances.entry(current).or_insert(balance);
        }
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Canonical rendering of the balance as of `month`. Fails if the
    /// month lies beyond what the registered rates allow computing.
    pub fn balance(&self, ledger: &mut Ledger, month: Month) -> Result<String, LedgerError> {
        self.update_balances(ledger)?;
        ledger
            .balances
            .get(&month)
            .map(PositionSet::to_string)
            .ok_or(LedgerError::BalanceUnavailable(month))
    }

    /// Canonical rendering of the most recently rebalanced balance.
    ///
    /// The checkpoint is December when the projection has reached
    /// December, June otherwise (fixed two-point policy). Returns the
    /// [`CANNOT_REBALANCE`] sentinel while that checkpoint's balance is
    /// not yet computed; recomputation failures still propagate.
    pub fn last_rebalanced_balance(&self, ledger: &mut Ledger) -> Result<String, LedgerError> {
        self.update_balances(ledger)?;
        let checkpoint = match ledger.computed_through() {
            Some(Month::December) => Month::December,
            _ => Month::June,
        };
        Ok(ledger
            .balances
            .get(&checkpoint)
            .map(PositionSet::to_string)
            .unwrap_or_else(|| CANNOT_REBALANCE.to_string()))
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Build a position set from raw amounts, rejecting negatives.
    fn positions_from(order: &AssetOrder, amounts: &[f64]) -> Result<PositionSet, LedgerError> {
        let positions = PositionSet::from_amounts(order, amounts)?;
        for position in positions.iter() {
            if position.amount < 0.0 {
                return Err(LedgerError::NegativeAmount {
                    asset: position.asset.label(),
                    amount: position.amount,
                });
            }
        }
        Ok(positions)
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebalancing happens on the fixed June and December checkpoints.
fn is_rebalance_month(month: Month) -> bool {
    matches!(month, Month::June | Month::December)
}

fn month_ordinal(month: Month) -> u32 {
    month.number_from_month()
}
