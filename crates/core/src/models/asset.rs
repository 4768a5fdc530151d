use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::LedgerError;

/// One of the fixed investment categories the ledger tracks.
///
/// The set is closed at compile time; which members participate, and in
/// which order, is decided once at construction via [`AssetOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Asset {
    Equity,
    Debt,
    Gold,
}

impl Asset {
    /// Upper-case label used in command input and output lines.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Asset::Equity => "EQUITY",
            Asset::Debt => "DEBT",
            Asset::Gold => "GOLD",
        }
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Asset {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EQUITY" => Ok(Asset::Equity),
            "DEBT" => Ok(Asset::Debt),
            "GOLD" => Ok(Asset::Gold),
            other => Err(LedgerError::InvalidAssetOrder(format!(
                "unknown asset '{other}'"
            ))),
        }
    }
}

/// The fixed, insertion-ordered asset sequence used for positional
/// parsing and rendering everywhere. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetOrder {
    assets: Vec<Asset>,
}

impl AssetOrder {
    /// Build a custom asset order. Rejects empty orders and duplicates.
    pub fn new(assets: Vec<Asset>) -> Result<Self, LedgerError> {
        if assets.is_empty() {
            return Err(LedgerError::InvalidAssetOrder(
                "at least one asset is required".into(),
            ));
        }
        for (i, asset) in assets.iter().enumerate() {
            if assets[..i].contains(asset) {
                return Err(LedgerError::InvalidAssetOrder(format!(
                    "duplicate asset '{asset}'"
                )));
            }
        }
        Ok(Self { assets })
    }

    /// Number of configured assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// The assets in their fixed positional order.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn iter(&self) -> impl Iterator<Item = Asset> + '_ {
        self.assets.iter().copied()
    }
}

impl Default for AssetOrder {
    /// The standard order: EQUITY, DEBT, GOLD.
    fn default() -> Self {
        Self {
            assets: vec![Asset::Equity, Asset::Debt, Asset::Gold],
        }
    }
}
