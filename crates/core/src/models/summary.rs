use serde::{Deserialize, Serialize};

/// Snapshot of the whole ledger, suitable for display or JSON export.
/// Months appear in calendar order; amounts are floored the same way
/// the canonical text rendering floors them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Asset labels in the fixed positional order
    pub assets: Vec<String>,

    /// Whether the initial allocation has been set
    pub allocated: bool,

    /// Whether a monthly contribution schedule is configured
    pub contribution_active: bool,

    /// Target allocation percentages, one per asset
    pub target_weights: Vec<AssetWeight>,

    /// Months with a registered market-change rate, calendar order
    pub rated_months: Vec<String>,

    /// Computed per-month balances, calendar order
    pub balances: Vec<MonthlyBalance>,
}

/// One asset's target allocation percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetWeight {
    /// Asset label (e.g. "EQUITY")
    pub asset: String,

    /// Share of the total investment, 0–100
    pub percent: f64,
}

/// One computed month in the balance table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyBalance {
    /// Calendar month name (e.g. "January")
    pub month: String,

    /// Floored amounts in asset order
    pub amounts: Vec<i64>,

    /// Sum of the floored amounts
    pub total: i64,
}
