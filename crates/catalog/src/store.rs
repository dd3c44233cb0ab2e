//! Catalog query store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use artglass_core::{ArtworkId, ChangeNotifier, StoreChange, StoreError, Subscription};
use artglass_storage::StateStorage;

use crate::artwork::Artwork;
use crate::query::{self, FilterOptions, FilterUpdate, SortOption};
use crate::source::ArtworkSource;

/// Durable-record address of this store.
pub const STORE_NAME: &str = "catalog-store";

const DEFAULT_PAGE_SIZE: usize = 12;

/// Subset of the store state persisted across restarts.
///
/// The artwork collection itself is never durable; it is always reloaded
/// from the upstream source at start.
#[derive(Debug, Serialize, Deserialize)]
struct DurableRecord {
    filters: FilterOptions,
    sort_option: SortOption,
    current_page: u32,
    items_per_page: usize,
}

/// Owns the full artwork collection and the current query parameters, and
/// answers filtered/sorted/paginated queries against them.
///
/// Async loads suspend only at the upstream-source await; once resumed they
/// always write their result. No request fencing is provided — callers that
/// issue overlapping loads must discard stale results themselves.
pub struct CatalogStore {
    source: Arc<dyn ArtworkSource>,
    storage: Option<Arc<dyn StateStorage>>,
    artworks: Vec<Artwork>,
    featured: Vec<Artwork>,
    current_artwork: Option<Artwork>,
    is_loading: bool,
    error: Option<StoreError>,
    search_query: String,
    filters: FilterOptions,
    sort_option: SortOption,
    current_page: u32,
    items_per_page: usize,
    total_pages: u32,
    version: u64,
    notifier: ChangeNotifier,
}

impl CatalogStore {
    pub fn new(source: Arc<dyn ArtworkSource>) -> Self {
        Self {
            source,
            storage: None,
            artworks: Vec::new(),
            featured: Vec::new(),
            current_artwork: None,
            is_loading: false,
            error: None,
            search_query: String::new(),
            filters: FilterOptions::default(),
            sort_option: SortOption::default(),
            current_page: 1,
            items_per_page: DEFAULT_PAGE_SIZE,
            total_pages: 1,
            version: 0,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Construct with a durable-record backend, hydrating the persisted
    /// query state if a record exists.
    pub fn with_storage(source: Arc<dyn ArtworkSource>, storage: Arc<dyn StateStorage>) -> Self {
        let mut store = Self::new(source);
        match storage.read(STORE_NAME) {
            Ok(Some(blob)) => match serde_json::from_value::<DurableRecord>(blob) {
                Ok(record) => {
                    store.filters = record.filters;
                    store.sort_option = record.sort_option;
                    store.current_page = record.current_page;
                    store.items_per_page = record.items_per_page;
                }
                Err(err) => {
                    tracing::warn!("discarding unreadable catalog record: {err}");
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("failed to read catalog record: {err:?}");
            }
        }
        store.storage = Some(storage);
        store
    }

    /// Override the page size (construction-time only; the page size is
    /// fixed for the lifetime of the store).
    pub fn with_page_size(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    /// Register a subscriber for change notifications.
    pub fn subscribe(&mut self) -> Subscription<StoreChange> {
        self.notifier.subscribe()
    }

    // ── Async loads ─────────────────────────────────────────────────────

    /// Replace the full collection from the upstream source.
    pub async fn load(&mut self) {
        self.begin();
        match self.source.fetch_all().await {
            Ok(artworks) => {
                self.total_pages = query::total_pages(artworks.len(), self.items_per_page);
                tracing::debug!(count = artworks.len(), "catalog collection loaded");
                self.artworks = artworks;
            }
            Err(err) => {
                self.error = Some(StoreError::load_failed(err.to_string()));
            }
        }
        self.is_loading = false;
        self.touch();
    }

    /// Refresh the featured subset (cached independently of the main
    /// collection).
    pub async fn load_featured(&mut self) {
        self.begin();
        match self.source.fetch_featured().await {
            Ok(featured) => self.featured = featured,
            Err(err) => {
                self.error = Some(StoreError::load_failed(err.to_string()));
            }
        }
        self.is_loading = false;
        self.touch();
    }

    /// Look up a single artwork. A miss records [`StoreError::NotFound`] and
    /// leaves the current-artwork slot untouched, so a previously displayed
    /// artwork does not flicker away.
    pub async fn load_by_id(&mut self, id: &ArtworkId) {
        self.begin();
        match self.source.fetch_by_id(id).await {
            Ok(Some(artwork)) => self.current_artwork = Some(artwork),
            Ok(None) => self.error = Some(StoreError::NotFound),
            Err(err) => {
                self.error = Some(StoreError::load_failed(err.to_string()));
            }
        }
        self.is_loading = false;
        self.touch();
    }

    // ── Query state ─────────────────────────────────────────────────────

    /// Set the free-text query. Resets pagination to page 1.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.search_query = text.into();
        self.current_page = 1;
        self.persist();
        self.touch();
    }

    /// Set the sort key. Resets pagination to page 1.
    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort_option = sort;
        self.current_page = 1;
        self.persist();
        self.touch();
    }

    /// Shallow-merge a filter update. Resets pagination to page 1.
    pub fn set_filters(&mut self, update: FilterUpdate) {
        self.filters.merge(update);
        self.current_page = 1;
        self.persist();
        self.touch();
    }

    /// Restore filters, sort, and query text to their defaults, page 1.
    pub fn reset_filters(&mut self) {
        self.filters = FilterOptions::default();
        self.search_query.clear();
        self.sort_option = SortOption::default();
        self.current_page = 1;
        self.persist();
        self.touch();
    }

    /// Set the current page. No bounds validation at this layer: an
    /// out-of-range page legitimately yields an empty page; callers clamp
    /// against [`Self::total_pages`] if they want different behavior.
    pub fn set_page(&mut self, page: u32) {
        self.current_page = page;
        self.persist();
        self.touch();
    }

    // ── Derived views ───────────────────────────────────────────────────

    /// The derived query: filter → sort → paginate over the current state.
    ///
    /// Recomputes (and caches as a side effect) `total_pages`; the cache is
    /// only trustworthy after this has run for the latest query state. The
    /// cache refresh does not bump the store version.
    pub fn current_page_items(&mut self) -> Vec<Artwork> {
        let mut filtered =
            query::filter_artworks(&self.artworks, &self.search_query, &self.filters);
        query::sort_artworks(&mut filtered, self.sort_option);
        self.total_pages = query::total_pages(filtered.len(), self.items_per_page);
        query::page_slice(&filtered, self.current_page, self.items_per_page).to_vec()
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn featured(&self) -> &[Artwork] {
        &self.featured
    }

    pub fn current_artwork(&self) -> Option<&Artwork> {
        self.current_artwork.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn filters(&self) -> &FilterOptions {
        &self.filters
    }

    pub fn sort_option(&self) -> SortOption {
        self.sort_option
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.version += 1;
        self.notifier.publish(StoreChange {
            store: STORE_NAME,
            version: self.version,
        });
    }

    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let record = DurableRecord {
            filters: self.filters.clone(),
            sort_option: self.sort_option,
            current_page: self.current_page,
            items_per_page: self.items_per_page,
        };
        let blob = match serde_json::to_value(&record) {
            Ok(blob) => blob,
            Err(err) => {
                tracing::warn!("failed to serialize catalog record: {err}");
                return;
            }
        };
        if let Err(err) = storage.write(STORE_NAME, &blob) {
            tracing::warn!("failed to persist catalog record: {err:?}");
        }
    }
}

impl core::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("artworks", &self.artworks.len())
            .field("search_query", &self.search_query)
            .field("sort_option", &self.sort_option)
            .field("current_page", &self.current_page)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artwork::{ArtworkCategory, ArtworkFormat, LicenseType, LicenseVariant};
    use artglass_storage::MemoryStorage;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};

    struct VecSource(Vec<Artwork>);

    #[async_trait]
    impl ArtworkSource for VecSource {
        async fn fetch_all(&self) -> anyhow::Result<Vec<Artwork>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ArtworkSource for FailingSource {
        async fn fetch_all(&self) -> anyhow::Result<Vec<Artwork>> {
            anyhow::bail!("source unavailable")
        }
    }

    fn test_artwork(n: usize) -> Artwork {
        let price = 100 * (n as u64 + 1);
        Artwork {
            id: ArtworkId::new(format!("art-{n:03}")),
            title: format!("Piece {n}"),
            description: "test artwork".into(),
            category: ArtworkCategory::DigitalPainting,
            format: ArtworkFormat::Png,
            price,
            tags: vec!["test".into()],
            created_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
                + Duration::days(n as i64),
            featured: n % 2 == 0,
            rating: None,
            licenses: vec![LicenseVariant {
                license_type: LicenseType::Standard,
                price,
            }],
        }
    }

    fn store_of(n: usize) -> CatalogStore {
        let artworks = (0..n).map(test_artwork).collect();
        CatalogStore::new(Arc::new(VecSource(artworks)))
    }

    #[tokio::test]
    async fn load_replaces_the_collection_and_clears_loading() {
        let mut store = store_of(3);
        store.load().await;
        assert_eq!(store.artworks().len(), 3);
        assert!(!store.is_loading());
        assert!(store.error().is_none());
        assert_eq!(store.total_pages(), 1);
    }

    #[tokio::test]
    async fn load_failure_records_error_and_store_stays_usable() {
        let mut store = CatalogStore::new(Arc::new(FailingSource));
        store.load().await;
        assert!(!store.is_loading());
        assert!(matches!(store.error(), Some(StoreError::LoadFailed(_))));

        // Recoverable: query actions still work against the empty collection.
        store.set_query("dusk");
        assert!(store.current_page_items().is_empty());
        assert_eq!(store.total_pages(), 1);
    }

    #[tokio::test]
    async fn load_featured_caches_the_featured_subset_independently() {
        let mut store = store_of(5);
        store.load_featured().await;
        assert_eq!(store.featured().len(), 3); // n = 0, 2, 4
        assert!(store.artworks().is_empty()); // main collection untouched
    }

    #[tokio::test]
    async fn load_by_id_hit_fills_the_current_slot() {
        let mut store = store_of(3);
        store.load_by_id(&ArtworkId::new("art-001")).await;
        assert_eq!(
            store.current_artwork().map(|a| a.id.as_str()),
            Some("art-001")
        );
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn load_by_id_miss_records_not_found_and_keeps_previous_artwork() {
        let mut store = store_of(3);
        store.load_by_id(&ArtworkId::new("art-001")).await;
        store.load_by_id(&ArtworkId::new("art-999")).await;

        assert_eq!(store.error(), Some(&StoreError::NotFound));
        // The previously displayed artwork is not cleared.
        assert_eq!(
            store.current_artwork().map(|a| a.id.as_str()),
            Some("art-001")
        );
    }

    #[tokio::test]
    async fn query_filter_and_sort_changes_reset_the_page() {
        let mut store = store_of(30);
        store.load().await;

        store.set_page(3);
        assert_eq!(store.current_page(), 3);
        store.set_query("piece");
        assert_eq!(store.current_page(), 1);

        store.set_page(3);
        store.set_sort(SortOption::PriceHigh);
        assert_eq!(store.current_page(), 1);

        store.set_page(3);
        store.set_filters(FilterUpdate {
            featured_only: Some(true),
            ..Default::default()
        });
        assert_eq!(store.current_page(), 1);
    }

    #[tokio::test]
    async fn set_filters_merges_shallowly() {
        let mut store = store_of(0);
        store.set_filters(FilterUpdate {
            categories: Some(vec![ArtworkCategory::PixelArt]),
            ..Default::default()
        });
        store.set_filters(FilterUpdate {
            price_range: Some((5, 50)),
            ..Default::default()
        });

        assert_eq!(store.filters().categories, vec![ArtworkCategory::PixelArt]);
        assert_eq!(store.filters().price_range, (5, 50));
    }

    #[tokio::test]
    async fn reset_filters_restores_all_defaults() {
        let mut store = store_of(0);
        store.set_query("dusk");
        store.set_sort(SortOption::Popular);
        store.set_filters(FilterUpdate {
            featured_only: Some(true),
            ..Default::default()
        });
        store.set_page(4);

        store.reset_filters();
        assert_eq!(store.search_query(), "");
        assert_eq!(store.sort_option(), SortOption::Latest);
        assert_eq!(store.filters(), &FilterOptions::default());
        assert_eq!(store.current_page(), 1);
    }

    #[tokio::test]
    async fn out_of_range_page_yields_an_empty_page() {
        let mut store = store_of(5);
        store.load().await;
        store.set_page(9);
        assert!(store.current_page_items().is_empty());
        assert_eq!(store.total_pages(), 1);
    }

    #[tokio::test]
    async fn thirteen_artworks_split_into_two_price_sorted_pages() {
        let mut store = store_of(13);
        store.load().await;
        store.set_sort(SortOption::PriceLow);

        let page1 = store.current_page_items();
        assert_eq!(page1.len(), 12);
        assert!(page1.windows(2).all(|w| w[0].price <= w[1].price));
        assert_eq!(store.total_pages(), 2);

        store.set_page(2);
        let page2 = store.current_page_items();
        assert_eq!(page2.len(), 1);
        assert_eq!(page2[0].price, 1300); // the most expensive of the 13
    }

    #[tokio::test]
    async fn current_page_never_exceeds_the_page_size() {
        let mut store = store_of(40);
        store.load().await;
        for page in 1..=store.total_pages() {
            store.set_page(page);
            assert!(store.current_page_items().len() <= store.items_per_page());
        }
    }

    #[tokio::test]
    async fn mutations_notify_subscribers_with_increasing_versions() {
        let mut store = store_of(2);
        let sub = store.subscribe();

        store.set_query("a");
        store.set_page(2);

        let first = sub.try_recv().unwrap();
        let second = sub.try_recv().unwrap();
        assert_eq!(first.store, STORE_NAME);
        assert!(second.version > first.version);
    }

    #[tokio::test]
    async fn durable_query_state_survives_a_restart() {
        let storage = Arc::new(MemoryStorage::new());
        let artworks: Vec<Artwork> = (0..3).map(test_artwork).collect();

        let mut store = CatalogStore::with_storage(
            Arc::new(VecSource(artworks.clone())),
            storage.clone(),
        );
        store.load().await;
        store.set_sort(SortOption::PriceHigh);
        store.set_filters(FilterUpdate {
            featured_only: Some(true),
            ..Default::default()
        });
        store.set_page(2);

        let restarted =
            CatalogStore::with_storage(Arc::new(VecSource(artworks)), storage);
        assert_eq!(restarted.sort_option(), SortOption::PriceHigh);
        assert!(restarted.filters().featured_only);
        assert_eq!(restarted.current_page(), 2);
        // The collection itself is never durable.
        assert!(restarted.artworks().is_empty());
    }

    #[tokio::test]
    async fn unreadable_durable_record_is_discarded() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(STORE_NAME, serde_json::json!({ "sort_option": 42 }));

        let store = CatalogStore::with_storage(Arc::new(VecSource(Vec::new())), storage);
        assert_eq!(store.sort_option(), SortOption::Latest);
        assert_eq!(store.current_page(), 1);
    }
}
