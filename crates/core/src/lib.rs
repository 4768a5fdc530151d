pub mod errors;
pub mod models;
pub mod services;

pub use chrono::Month;

use models::asset::{Asset, AssetOrder};
use models::ledger::Ledger;
use models::position::PositionSet;
use models::summary::{AssetWeight, LedgerSummary, MonthlyBalance};
use models::weights::TargetWeights;
use services::ledger_service::LedgerService;

use errors::LedgerError;

pub use services::ledger_service::CANNOT_REBALANCE;

/// Main entry point for the portfolio-ledger core library.
///
/// Owns the authoritative ledger state and the projection service, and
/// exposes the operations the command layer drives: one-time allocation
/// and contribution setup, per-month rate registration, and the balance
/// and rebalance queries. The projection itself runs lazily, on demand,
/// before every query.
#[must_use]
pub struct PortfolioLedger {
    ledger: Ledger,
    service: LedgerService,
}

impl std::fmt::Debug for PortfolioLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioLedger")
            .field("assets", &self.ledger.assets.assets())
            .field("allocated", &self.ledger.is_allocated())
            .field("rated_months", &self.ledger.change_rates.len())
            .field("computed_months", &self.ledger.balances.len())
            .finish()
    }
}

impl PortfolioLedger {
    /// A new empty ledger over the standard EQUITY, DEBT, GOLD order.
    pub fn new() -> Self {
        Self::build(AssetOrder::default())
    }

    /// A new empty ledger over a custom asset order. The order is fixed
    /// for the lifetime of the ledger; empty orders and duplicates are
    /// rejected.
    pub fn with_assets(assets: Vec<Asset>) -> Result<Self, LedgerError> {
        Ok(Self::build(AssetOrder::new(assets)?))
    }

    // ── Setup ───────────────────────────────────────────────────────

    /// Set the one-time initial allocation, one amount per configured
    /// asset in order. Derives the target weights used by every later
    /// rebalance.
    pub fn allocate(&mut self, amounts: &[f64]) -> Result<(), LedgerError> {
        self.service.allocate(&mut self.ledger, amounts)
    }

    /// Set the one-time fixed monthly contribution, one amount per
    /// configured asset in order. Applied from the second simulated
    /// month onward.
    pub fn set_contribution_schedule(&mut self, amounts: &[f64]) -> Result<(), LedgerError> {
        self.service
            .set_contribution_schedule(&mut self.ledger, amounts)
    }

    /// Register the market growth/loss percentages for one month, one
    /// rate per configured asset in order. Negative rates represent
    /// loss; each month accepts exactly one registration.
    pub fn register_rate(&mut self, rates: &[f64], month: Month) -> Result<(), LedgerError> {
        self.service.register_rate(&mut self.ledger, rates, month)
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// The balance as of `month`, rendered as floored integers
    /// space-joined in asset order. Projects any months the registered
    /// rates allow before looking up.
    pub fn balance(&mut self, month: Month) -> Result<String, LedgerError> {
        self.service.balance(&mut self.ledger, month)
    }

    /// The most recently rebalanced balance, or [`CANNOT_REBALANCE`]
    /// while the June/December checkpoint has not been reached yet.
    pub fn last_rebalanced_balance(&mut self) -> Result<String, LedgerError> {
        self.service.last_rebalanced_balance(&mut self.ledger)
    }

    /// Number of configured assets; callers use this to validate input
    /// line shapes before invoking the operations above.
    #[must_use]
    pub fn supported_asset_count(&self) -> usize {
        self.ledger.supported_assets()
    }

    // ── Introspection ───────────────────────────────────────────────

    /// The configured assets in their fixed positional order.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        self.ledger.assets.assets()
    }

    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.ledger.is_allocated()
    }

    /// Target weights derived from the initial allocation, once set.
    #[must_use]
    pub fn target_weights(&self) -> Option<&TargetWeights> {
        self.ledger.target_weights()
    }

    /// Latest month with a computed balance.
    #[must_use]
    pub fn computed_through(&self) -> Option<Month> {
        self.ledger.computed_through()
    }

    /// Latest month with a registered market-change rate.
    #[must_use]
    pub fn latest_rated_month(&self) -> Option<Month> {
        self.ledger.latest_rated_month()
    }

    /// Number of months with a registered rate.
    #[must_use]
    pub fn registered_rate_count(&self) -> usize {
        self.ledger.change_rates.len()
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Snapshot of the whole ledger for display or export. Months come
    /// out in calendar order; amounts are floored like the canonical
    /// rendering.
    #[must_use]
    pub fn summary(&self) -> LedgerSummary {
        let target_weights = self
            .ledger
            .target_weights()
            .map(|weights| {
                weights
                    .iter()
                    .map(|(asset, percent)| AssetWeight {
                        asset: asset.label().to_string(),
                        percent,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let balances = self
            .ledger
            .balances
            .iter()
            .map(|(month, positions)| {
                let amounts = positions.floored_amounts();
                let total = amounts.iter().sum();
                MonthlyBalance {
                    month: month.name().to_string(),
                    amounts,
                    total,
                }
            })
            .collect();

        LedgerSummary {
            assets: self
                .ledger
                .assets
                .iter()
                .map(|asset| asset.label().to_string())
                .collect(),
            allocated: self.ledger.is_allocated(),
            contribution_active: self.ledger.contribution.is_some(),
            target_weights,
            rated_months: self
                .ledger
                .change_rates
                .keys()
                .map(|month| month.name().to_string())
                .collect(),
            balances,
        }
    }

    /// The summary serialized as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(&self.summary())?)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(assets: AssetOrder) -> Self {
        Self {
            ledger: Ledger::new(assets),
            service: LedgerService::new(),
        }
    }

    /// Direct access to a computed month's snapshot, mainly for tests
    /// and display layers that want amounts rather than text.
    #[must_use]
    pub fn balance_positions(&self, month: Month) -> Option<&PositionSet> {
        self.ledger.balances.get(&month)
    }
}

impl Default for PortfolioLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `MonthLabel` as it appears in command input ("JANUARY",
/// "June", "sep"). Empty input is a missing argument; anything else that
/// fails to parse is a format problem.
pub fn parse_month_label(label: &str) -> Result<Month, LedgerError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::MissingInput("month"));
    }
    trimmed
        .parse::<Month>()
        .map_err(|_| LedgerError::InvalidMonth(trimmed.to_string()))
}
