//! Query state and the deterministic filter/sort/paginate pipeline.
//!
//! These are pure functions of their inputs so the matching behavior is
//! independent of how filters are combined and can be tested without a
//! store instance.

use serde::{Deserialize, Serialize};

use crate::artwork::{Artwork, ArtworkCategory, ArtworkFormat};

/// Sort key applied after filtering. Exactly one comparator per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    Latest,
    Oldest,
    PriceLow,
    PriceHigh,
    Popular,
}

/// Active filter set.
///
/// Empty collections mean "no restriction"; the price range is always
/// applied with inclusive bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub categories: Vec<ArtworkCategory>,
    pub formats: Vec<ArtworkFormat>,
    /// Inclusive [min, max] in smallest currency unit.
    pub price_range: (u64, u64),
    /// OR semantics: an artwork matches if it carries any listed tag.
    pub tags: Vec<String>,
    pub featured_only: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            formats: Vec::new(),
            price_range: (0, 100_000),
            tags: Vec::new(),
            featured_only: false,
        }
    }
}

/// Partial filter update, shallow-merged into [`FilterOptions`].
///
/// Omitted fields (`None`) retain their previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub categories: Option<Vec<ArtworkCategory>>,
    pub formats: Option<Vec<ArtworkFormat>>,
    pub price_range: Option<(u64, u64)>,
    pub tags: Option<Vec<String>>,
    pub featured_only: Option<bool>,
}

impl FilterOptions {
    /// Shallow-merge an update into this filter set.
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(categories) = update.categories {
            self.categories = categories;
        }
        if let Some(formats) = update.formats {
            self.formats = formats;
        }
        if let Some(price_range) = update.price_range {
            self.price_range = price_range;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(featured_only) = update.featured_only {
            self.featured_only = featured_only;
        }
    }
}

/// Apply the filter predicates in their fixed order:
/// text → category → format → price range → tags → featured-only.
pub fn filter_artworks(artworks: &[Artwork], query: &str, filters: &FilterOptions) -> Vec<Artwork> {
    let mut filtered: Vec<Artwork> = artworks.to_vec();

    if !query.is_empty() {
        let query = query.to_lowercase();
        filtered.retain(|a| text_matches(a, &query));
    }

    if !filters.categories.is_empty() {
        filtered.retain(|a| filters.categories.contains(&a.category));
    }

    if !filters.formats.is_empty() {
        filtered.retain(|a| filters.formats.contains(&a.format));
    }

    let (min, max) = filters.price_range;
    filtered.retain(|a| a.price >= min && a.price <= max);

    if !filters.tags.is_empty() {
        filtered.retain(|a| filters.tags.iter().any(|t| a.tags.contains(t)));
    }

    if filters.featured_only {
        filtered.retain(|a| a.featured);
    }

    filtered
}

/// Case-insensitive substring match over title, description, and tags.
/// `query` must already be lowercased.
fn text_matches(artwork: &Artwork, query: &str) -> bool {
    artwork.title.to_lowercase().contains(query)
        || artwork.description.to_lowercase().contains(query)
        || artwork
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query))
}

/// Apply exactly one sort comparator per sort key. `Popular` treats an
/// absent rating as zero.
pub fn sort_artworks(artworks: &mut [Artwork], sort: SortOption) {
    match sort {
        SortOption::Latest => artworks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOption::Oldest => artworks.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOption::PriceLow => artworks.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceHigh => artworks.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOption::Popular => artworks.sort_by(|a, b| {
            b.rating
                .unwrap_or(0.0)
                .total_cmp(&a.rating.unwrap_or(0.0))
        }),
    }
}

/// `ceil(filtered / per_page)`, floored at 1 page so pagination UI stays
/// well-defined even for an empty result set.
pub fn total_pages(filtered: usize, per_page: usize) -> u32 {
    if per_page == 0 {
        return 1;
    }
    (filtered.div_ceil(per_page)).max(1) as u32
}

/// Slice `[(page-1)*per_page, page*per_page)` out of the sorted set.
///
/// No bounds validation: an out-of-range page yields an empty slice.
pub fn page_slice(artworks: &[Artwork], page: u32, per_page: usize) -> &[Artwork] {
    let start = (page.saturating_sub(1) as usize).saturating_mul(per_page);
    if start >= artworks.len() {
        return &[];
    }
    let end = (start + per_page).min(artworks.len());
    &artworks[start..end]
}
