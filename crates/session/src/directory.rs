//! Upstream user directory abstraction.

use async_trait::async_trait;

use artglass_catalog::Artwork;
use artglass_core::UserId;

use crate::user::{Order, User};

/// Where the session store resolves accounts and per-user collections.
///
/// The shipped implementation is a static fixture set; a production system
/// would put the account API behind this trait. Newly registered accounts
/// are NOT written back through it — that would be the backend's job.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up an account by email. Login succeeds purely on an email match.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    /// Order history for a user. Empty by default.
    async fn orders_for(&self, _user: &UserId) -> anyhow::Result<Vec<Order>> {
        Ok(Vec::new())
    }

    /// Saved wishlist for a user. Empty by default.
    async fn wishlist_for(&self, _user: &UserId) -> anyhow::Result<Vec<Artwork>> {
        Ok(Vec::new())
    }
}
