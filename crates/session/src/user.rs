//! User accounts and order history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use artglass_core::{ArtworkId, OrderId, UserId};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Artist,
    Admin,
    User,
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Partial profile update, shallow-merged into the logged-in [`User`].
///
/// Omitted fields (`None`) retain their previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl User {
    /// Shallow-merge a profile patch into this account.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = Some(avatar);
        }
    }
}

/// An order history entry, scoped to the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub artwork_ids: Vec<ArtworkId>,
    /// Total in smallest currency unit (e.g., cents).
    pub total: u64,
    pub placed_at: DateTime<Utc>,
}
