//! Cart store: line items, totals, and the open/closed flag.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use artglass_catalog::{Artwork, LicenseType};
use artglass_core::{CartItemId, ChangeNotifier, StoreChange, Subscription};
use artglass_storage::StateStorage;

/// Durable-record address of this store.
pub const STORE_NAME: &str = "cart-store";

/// One (artwork, license-type) pairing in the cart.
///
/// Invariant: at most one line item exists per (artwork id, license type)
/// pair; a repeated add increments the quantity on the existing line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// External identification only; uniqueness is enforced on the
    /// (artwork id, license type) pair.
    pub id: CartItemId,
    pub artwork: Artwork,
    pub license_type: LicenseType,
    /// Price snapshot taken when the line was created. Later catalog price
    /// changes do not affect lines already in the cart.
    pub unit_price: u64,
    pub quantity: u32,
}

/// Entire cart state is durable: item list plus the open/closed flag.
#[derive(Debug, Serialize, Deserialize)]
struct DurableRecord {
    items: Vec<CartItem>,
    is_open: bool,
}

/// Owns the cart line items. All operations are synchronous and total;
/// malformed input (unknown license variant, quantity below 1) is ignored
/// rather than rejected with an error.
pub struct CartStore {
    items: Vec<CartItem>,
    is_open: bool,
    storage: Option<Arc<dyn StateStorage>>,
    version: u64,
    notifier: ChangeNotifier,
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            is_open: false,
            storage: None,
            version: 0,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Construct with a durable-record backend, hydrating the persisted
    /// cart if a record exists.
    pub fn with_storage(storage: Arc<dyn StateStorage>) -> Self {
        let mut store = Self::new();
        match storage.read(STORE_NAME) {
            Ok(Some(blob)) => match serde_json::from_value::<DurableRecord>(blob) {
                Ok(record) => {
                    store.items = record.items;
                    store.is_open = record.is_open;
                }
                Err(err) => {
                    tracing::warn!("discarding unreadable cart record: {err}");
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("failed to read cart record: {err:?}");
            }
        }
        store.storage = Some(storage);
        store
    }

    /// Register a subscriber for change notifications.
    pub fn subscribe(&mut self) -> Subscription<StoreChange> {
        self.notifier.subscribe()
    }

    // ── Actions ─────────────────────────────────────────────────────────

    /// Add one unit of `artwork` under the given license.
    ///
    /// If the artwork carries no variant of that license type, this is a
    /// silent no-op. If a line for the (artwork id, license type) pair
    /// already exists, its quantity is incremented instead of appending a
    /// duplicate line.
    pub fn add_item(&mut self, artwork: &Artwork, license_type: LicenseType) {
        let Some(license) = artwork.license(license_type) else {
            return;
        };
        let unit_price = license.price;

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.artwork.id == artwork.id && item.license_type == license_type)
        {
            existing.quantity += 1;
        } else {
            self.items.push(CartItem {
                id: CartItemId::derive(&artwork.id, &license_type.to_string(), Utc::now()),
                artwork: artwork.clone(),
                license_type,
                unit_price,
                quantity: 1,
            });
        }
        self.persist();
        self.touch();
    }

    /// Remove a line item by id. Removing an unknown id changes nothing.
    pub fn remove_item(&mut self, item_id: &CartItemId) {
        let before = self.items.len();
        self.items.retain(|item| &item.id != item_id);
        if self.items.len() != before {
            self.persist();
            self.touch();
        }
    }

    /// Set a line's quantity. Quantities below 1 are rejected as a silent
    /// no-op (zero/negative never means removal).
    pub fn set_quantity(&mut self, item_id: &CartItemId, quantity: i64) {
        if quantity < 1 {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| &item.id == item_id) {
            item.quantity = quantity as u32;
            self.persist();
            self.touch();
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
        self.touch();
    }

    /// Flip the cart's UI-visibility flag (orthogonal to cart contents).
    pub fn toggle_open(&mut self) {
        self.is_open = !self.is_open;
        self.persist();
        self.touch();
    }

    // ── Derived views ───────────────────────────────────────────────────

    /// Sum of quantities across all lines (not the line count).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Σ(unit-price snapshot × quantity) over all lines.
    pub fn subtotal(&self) -> u64 {
        self.items
            .iter()
            .map(|item| item.unit_price * u64::from(item.quantity))
            .sum()
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    // ── Internals ───────────────────────────────────────────────────────

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
            items: self.items.clone(),
            is_open: self.is_open,
        };
        let blob = match serde_json::to_value(&record) {
            Ok(blob) => blob,
            Err(err) => {
                tracing::warn!("failed to serialize cart record: {err}");
                return;
            }
        };
        if let Err(err) = storage.write(STORE_NAME, &blob) {
            tracing::warn!("failed to persist cart record: {err:?}");
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.items.len())
            .field("is_open", &self.is_open)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artglass_catalog::{ArtworkCategory, ArtworkFormat, LicenseVariant};
    use artglass_core::ArtworkId;
    use artglass_storage::MemoryStorage;
    use chrono::{TimeZone, Utc};

    fn test_artwork(id: &str, standard_price: u64) -> Artwork {
        Artwork {
            id: ArtworkId::new(id),
            title: format!("Piece {id}"),
            description: "test artwork".into(),
            category: ArtworkCategory::GenerativeArt,
            format: ArtworkFormat::Svg,
            price: standard_price,
            tags: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2023, 3, 10, 0, 0, 0).unwrap(),
            featured: false,
            rating: None,
            licenses: vec![
                LicenseVariant {
                    license_type: LicenseType::Standard,
                    price: standard_price,
                },
                LicenseVariant {
                    license_type: LicenseType::Extended,
                    price: standard_price * 3,
                },
            ],
        }
    }

    #[test]
    fn repeated_add_increments_quantity_on_one_line() {
        let mut cart = CartStore::new();
        let artwork = test_artwork("art-001", 50);

        cart.add_item(&artwork, LicenseType::Standard);
        cart.add_item(&artwork, LicenseType::Standard);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.subtotal(), 100);
    }

    #[test]
    fn different_licenses_of_one_artwork_are_separate_lines() {
        let mut cart = CartStore::new();
        let artwork = test_artwork("art-001", 50);

        cart.add_item(&artwork, LicenseType::Standard);
        cart.add_item(&artwork, LicenseType::Extended);

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.subtotal(), 50 + 150);
    }

    #[test]
    fn unknown_license_type_is_a_silent_no_op() {
        let mut cart = CartStore::new();
        let artwork = test_artwork("art-001", 50);

        cart.add_item(&artwork, LicenseType::Exclusive);

        assert!(!cart.has_items());
        assert_eq!(cart.version(), 0); // not even a notification
    }

    #[test]
    fn subtotal_uses_the_price_snapshot_not_the_live_artwork() {
        let mut cart = CartStore::new();
        let mut artwork = test_artwork("art-001", 50);
        cart.add_item(&artwork, LicenseType::Standard);

        // Catalog-side price change after the add.
        artwork.price = 9999;
        artwork.licenses[0].price = 9999;

        assert_eq!(cart.subtotal(), 50);
    }

    #[test]
    fn quantities_below_one_are_rejected_without_mutation() {
        let mut cart = CartStore::new();
        let artwork = test_artwork("art-001", 50);
        cart.add_item(&artwork, LicenseType::Standard);
        let id = cart.items()[0].id.clone();
        let version = cart.version();

        cart.set_quantity(&id, 0);
        cart.set_quantity(&id, -1);

        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.version(), version);
    }

    #[test]
    fn set_quantity_updates_the_matching_line() {
        let mut cart = CartStore::new();
        let artwork = test_artwork("art-001", 50);
        cart.add_item(&artwork, LicenseType::Standard);
        let id = cart.items()[0].id.clone();

        cart.set_quantity(&id, 5);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.subtotal(), 250);
    }

    #[test]
    fn item_count_sums_quantities_not_lines() {
        let mut cart = CartStore::new();
        let first = test_artwork("art-001", 50);
        let second = test_artwork("art-002", 80);

        cart.add_item(&first, LicenseType::Standard);
        cart.add_item(&first, LicenseType::Standard);
        cart.add_item(&second, LicenseType::Standard);

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn remove_and_clear_empty_the_cart() {
        let mut cart = CartStore::new();
        let first = test_artwork("art-001", 50);
        let second = test_artwork("art-002", 80);
        cart.add_item(&first, LicenseType::Standard);
        cart.add_item(&second, LicenseType::Standard);

        let id = cart.items()[0].id.clone();
        cart.remove_item(&id);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].artwork.id.as_str(), "art-002");

        cart.clear();
        assert!(!cart.has_items());
        assert_eq!(cart.subtotal(), 0);
    }

    #[test]
    fn removing_an_unknown_id_changes_nothing() {
        let mut cart = CartStore::new();
        cart.add_item(&test_artwork("art-001", 50), LicenseType::Standard);
        let version = cart.version();

        cart.remove_item(&CartItemId::new("missing"));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.version(), version);
    }

    #[test]
    fn toggle_open_is_orthogonal_to_contents() {
        let mut cart = CartStore::new();
        assert!(!cart.is_open());
        cart.toggle_open();
        assert!(cart.is_open());
        cart.toggle_open();
        assert!(!cart.is_open());
        assert!(!cart.has_items());
    }

    #[test]
    fn mutations_notify_subscribers() {
        let mut cart = CartStore::new();
        let sub = cart.subscribe();

        cart.add_item(&test_artwork("art-001", 50), LicenseType::Standard);
        cart.toggle_open();

        assert_eq!(sub.try_recv().unwrap().version, 1);
        assert_eq!(sub.try_recv().unwrap().version, 2);
        assert!(sub.try_recv().is_err());
    }

    #[test]
    fn entire_cart_state_survives_a_restart() {
        let storage = Arc::new(MemoryStorage::new());

        let mut cart = CartStore::with_storage(storage.clone());
        cart.add_item(&test_artwork("art-001", 50), LicenseType::Standard);
        cart.add_item(&test_artwork("art-001", 50), LicenseType::Standard);
        cart.toggle_open();

        let restarted = CartStore::with_storage(storage);
        assert_eq!(restarted.items().len(), 1);
        assert_eq!(restarted.items()[0].quantity, 2);
        assert_eq!(restarted.subtotal(), 100);
        assert!(restarted.is_open());
    }
}
