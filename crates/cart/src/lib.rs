//! Shopping cart domain module.
//!
//! Line items are keyed by (artwork id, license type); prices are snapshots
//! taken at add time, never re-derived from the catalog.

pub mod store;

pub use store::{CartItem, CartStore};
