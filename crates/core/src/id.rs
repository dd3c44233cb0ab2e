//! Strongly-typed identifiers used across the stores.
//!
//! Catalog and user fixtures address entities by human-readable string ids
//! (`art-001`, `user-admin`, …), so these are string newtypes rather than
//! raw UUIDs. Synthesized ids (registration, cart line items) are derived
//! through the constructors below.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a catalog artwork.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtworkId(String);

/// Identifier of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

/// Identifier of an order history entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

/// Identifier of a cart line item.
///
/// Used only for external identification of a line; uniqueness of cart
/// contents is enforced on the (artwork id, license type) pair, never on
/// this id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(String);

macro_rules! impl_str_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_str_newtype!(ArtworkId);
impl_str_newtype!(UserId);
impl_str_newtype!(OrderId);
impl_str_newtype!(CartItemId);

impl UserId {
    /// Synthesize an id for a newly registered account.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing ids explicitly in tests
    /// for determinism.
    pub fn generate() -> Self {
        Self(format!("user-{}", Uuid::now_v7()))
    }
}

impl CartItemId {
    /// Derive a line-item id from the artwork, license tag, and creation
    /// instant.
    pub fn derive(artwork: &ArtworkId, license: &str, at: DateTime<Utc>) -> Self {
        Self(format!("{artwork}-{license}-{}", at.timestamp_millis()))
    }
}
