//! `artglass-core` — shared storefront-state building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no storage concerns).

pub mod error;
pub mod id;
pub mod notify;

pub use error::{StoreError, StoreResult};
pub use id::{ArtworkId, CartItemId, OrderId, UserId};
pub use notify::{ChangeNotifier, StoreChange, Subscription};
