pub mod asset;
pub mod ledger;
pub mod position;
pub mod rates;
pub mod summary;
pub mod weights;
