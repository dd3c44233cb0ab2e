//! Catalog domain module: artworks, query state, and the catalog store.
//!
//! This crate owns the full artwork collection and answers filtered, sorted,
//! paginated queries against it. The filter/sort/paginate pipeline is pure
//! deterministic logic (no IO); the store layers loading, pagination state,
//! and change notification on top.

pub mod artwork;
pub mod query;
pub mod source;
pub mod store;

pub use artwork::{Artwork, ArtworkCategory, ArtworkFormat, LicenseType, LicenseVariant};
pub use query::{FilterOptions, FilterUpdate, SortOption};
pub use source::ArtworkSource;
pub use store::CatalogStore;
