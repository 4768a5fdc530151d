use chrono::Month;
use thiserror::Error;

/// Coarse classification of ledger failures, matching the three error
/// categories the command layer distinguishes when formatting replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation invoked in an invalid state (double setup, missing data).
    State,
    /// Input doesn't match the configured asset count or is malformed.
    Format,
    /// A required argument was absent.
    NullInput,
}

/// Unified error type for the entire portfolio-ledger-core library.
/// Every fallible public function returns `Result<T, LedgerError>`.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ── Setup ───────────────────────────────────────────────────────
    #[error("the funds are already allocated")]
    AlreadyAllocated,

    #[error("the monthly contribution schedule is already configured")]
    ContributionAlreadyConfigured,

    #[error("the funds are not yet allocated")]
    NotAllocated,

    // ── Rate registration ───────────────────────────────────────────
    #[error("the rate of change for month {} is already registered", .0.name())]
    RateAlreadyRegistered(Month),

    #[error("rate of change is not defined")]
    RatesNotRegistered,

    #[error("no rate of change registered for month {}", .0.name())]
    RateNotRegistered(Month),

    // ── Queries ─────────────────────────────────────────────────────
    #[error("the balance requested for month {} has no data", .0.name())]
    BalanceUnavailable(Month),

    // ── Input shape ─────────────────────────────────────────────────
    #[error("the input is not in the desired format: expected {expected} values, got {actual}")]
    InputLengthMismatch { expected: usize, actual: usize },

    #[error("amount for {asset} must be non-negative, got {amount}")]
    NegativeAmount { asset: &'static str, amount: f64 },

    #[error("total allocation must be positive")]
    NonPositiveAllocation,

    #[error("'{0}' is not a calendar month")]
    InvalidMonth(String),

    #[error("invalid asset order: {0}")]
    InvalidAssetOrder(String),

    #[error("required input '{0}' is missing")]
    MissingInput(&'static str),

    // ── Export ──────────────────────────────────────────────────────
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        LedgerError::Serialization(e.to_string())
    }
}

impl LedgerError {
    /// Classify this error into the category the caller reports on.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::AlreadyAllocated
            | LedgerError::ContributionAlreadyConfigured
            | LedgerError::NotAllocated
            | LedgerError::RateAlreadyRegistered(_)
            | LedgerError::RatesNotRegistered
            | LedgerError::RateNotRegistered(_)
            | LedgerError::BalanceUnavailable(_) => ErrorKind::State,

            LedgerError::InputLengthMismatch { .. }
            | LedgerError::NegativeAmount { .. }
            | LedgerError::NonPositiveAllocation
            | LedgerError::InvalidMonth(_)
            | LedgerError::InvalidAssetOrder(_)
            | LedgerError::Serialization(_) => ErrorKind::Format,

            LedgerError::MissingInput(_) => ErrorKind::NullInput,
        }
    }
}
