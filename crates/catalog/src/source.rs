//! Upstream artwork source abstraction.

use async_trait::async_trait;

use artglass_core::ArtworkId;

use crate::artwork::Artwork;

/// Where the catalog store loads its collection from.
///
/// The shipped implementation is a static fixture set; a production system
/// would put a remote fetch behind this trait. Implementations may suspend
/// (simulated or real latency) but must always resume and return — there is
/// no cancellation primitive at this layer.
#[async_trait]
pub trait ArtworkSource: Send + Sync {
    /// Fetch the full artwork collection.
    async fn fetch_all(&self) -> anyhow::Result<Vec<Artwork>>;

    /// Fetch the featured subset (independent of the main collection cache).
    async fn fetch_featured(&self) -> anyhow::Result<Vec<Artwork>> {
        Ok(self
            .fetch_all()
            .await?
            .into_iter()
            .filter(|a| a.featured)
            .collect())
    }

    /// Fetch a single artwork by id, `None` on a lookup miss.
    async fn fetch_by_id(&self, id: &ArtworkId) -> anyhow::Result<Option<Artwork>> {
        Ok(self.fetch_all().await?.into_iter().find(|a| &a.id == id))
    }
}
