//! Session store: auth lifecycle, order history, wishlist.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use artglass_catalog::Artwork;
use artglass_core::{ArtworkId, ChangeNotifier, StoreChange, StoreError, Subscription, UserId};
use artglass_storage::StateStorage;

use crate::directory::UserDirectory;
use crate::user::{Order, Role, User, UserPatch};

/// Durable-record address of this store.
pub const STORE_NAME: &str = "session-store";

/// Only the identity survives a restart; loading/error flags, orders, and
/// the wishlist are transient and start empty.
#[derive(Debug, Serialize, Deserialize)]
struct DurableRecord {
    user: Option<User>,
    is_logged_in: bool,
}

/// State machine over {logged out, logged in} with async transitions that
/// stub out remote-call semantics.
///
/// Every async action drives the `{is_loading, error}` pair: both are set at
/// entry and cleared/populated at exit. Failures land in the error slot and
/// never cross the store boundary as a panic or `Err`. Suspension happens
/// only at the directory await; a resumed action always writes its result
/// (no cancellation, no request fencing).
pub struct SessionStore {
    directory: Arc<dyn UserDirectory>,
    storage: Option<Arc<dyn StateStorage>>,
    user: Option<User>,
    is_logged_in: bool,
    is_loading: bool,
    error: Option<StoreError>,
    orders: Vec<Order>,
    wishlist: Vec<Artwork>,
    version: u64,
    notifier: ChangeNotifier,
}

impl SessionStore {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            directory,
            storage: None,
            user: None,
            is_logged_in: false,
            is_loading: false,
            error: None,
            orders: Vec::new(),
            wishlist: Vec::new(),
            version: 0,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Construct with a durable-record backend, hydrating `{user,
    /// is_logged_in}` if a record exists.
    pub fn with_storage(directory: Arc<dyn UserDirectory>, storage: Arc<dyn StateStorage>) -> Self {
        let mut store = Self::new(directory);
        match storage.read(STORE_NAME) {
            Ok(Some(blob)) => match serde_json::from_value::<DurableRecord>(blob) {
                Ok(record) => {
                    store.user = record.user;
                    store.is_logged_in = record.is_logged_in;
                }
                Err(err) => {
                    tracing::warn!("discarding unreadable session record: {err}");
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("failed to read session record: {err:?}");
            }
        }
        store.storage = Some(storage);
        store
    }

    /// Register a subscriber for change notifications.
    pub fn subscribe(&mut self) -> Subscription<StoreChange> {
        self.notifier.subscribe()
    }

    // ── Auth lifecycle ──────────────────────────────────────────────────

    /// Log in by email. The password is accepted but not validated against
    /// any stored credential — the lookup succeeds purely on an email match
    /// (stub semantics). A miss records [`StoreError::InvalidCredentials`]
    /// and leaves the store logged out.
    pub async fn login(&mut self, email: &str, _password: &str) {
        self.begin();
        match self.directory.find_by_email(email).await {
            Ok(Some(user)) => {
                tracing::debug!(user = %user.id, "login succeeded");
                self.user = Some(user);
                self.is_logged_in = true;
                self.persist();
            }
            Ok(None) => {
                self.error = Some(StoreError::InvalidCredentials);
            }
            Err(err) => {
                self.error = Some(StoreError::load_failed(err.to_string()));
            }
        }
        self.is_loading = false;
        self.touch();
    }

    /// Register a new account. A duplicate email records
    /// [`StoreError::EmailInUse`] and leaves the user slot untouched;
    /// otherwise a fresh account with role [`Role::User`] is synthesized and
    /// logged in. The directory itself is not updated.
    pub async fn register(&mut self, username: &str, email: &str, _password: &str) {
        self.begin();
        match self.directory.find_by_email(email).await {
            Ok(Some(_)) => {
                self.error = Some(StoreError::EmailInUse);
            }
            Ok(None) => {
                let user = User {
                    id: UserId::generate(),
                    username: username.to_owned(),
                    email: email.to_owned(),
                    avatar: None,
                    role: Role::User,
                    created_at: Utc::now(),
                };
                tracing::debug!(user = %user.id, "account registered");
                self.user = Some(user);
                self.is_logged_in = true;
                self.persist();
            }
            Err(err) => {
                self.error = Some(StoreError::load_failed(err.to_string()));
            }
        }
        self.is_loading = false;
        self.touch();
    }

    /// Transition to logged out, clearing the user slot, order history, and
    /// wishlist. Always succeeds.
    pub fn logout(&mut self) {
        self.user = None;
        self.is_logged_in = false;
        self.orders.clear();
        self.wishlist.clear();
        self.persist();
        self.touch();
    }

    /// Shallow-merge a profile patch into the logged-in user. Records
    /// [`StoreError::NotAuthenticated`] when nobody is logged in.
    pub async fn update_profile(&mut self, patch: UserPatch) {
        self.begin();
        match self.user.as_mut() {
            Some(user) => {
                user.apply(patch);
                self.persist();
            }
            None => {
                self.error = Some(StoreError::NotAuthenticated);
            }
        }
        self.is_loading = false;
        self.touch();
    }

    // ── Orders ──────────────────────────────────────────────────────────

    /// Populate the order history from the upstream directory.
    pub async fn fetch_orders(&mut self) {
        self.begin();
        if let Some(user_id) = self.user.as_ref().map(|u| u.id.clone()) {
            match self.directory.orders_for(&user_id).await {
                Ok(orders) => self.orders = orders,
                Err(err) => {
                    self.error = Some(StoreError::load_failed(err.to_string()));
                }
            }
        } else {
            self.orders.clear();
        }
        self.is_loading = false;
        self.touch();
    }

    // ── Wishlist ────────────────────────────────────────────────────────

    /// Populate the wishlist from the upstream directory.
    pub async fn fetch_wishlist(&mut self) {
        self.begin();
        if let Some(user_id) = self.user.as_ref().map(|u| u.id.clone()) {
            match self.directory.wishlist_for(&user_id).await {
                Ok(wishlist) => self.wishlist = wishlist,
                Err(err) => {
                    self.error = Some(StoreError::load_failed(err.to_string()));
                }
            }
        } else {
            self.wishlist.clear();
        }
        self.is_loading = false;
        self.touch();
    }

    /// Append an artwork to the wishlist.
    ///
    /// There is deliberately no dedup guard here (unlike the cart's dedup
    /// rule): repeated adds of the same artwork produce repeated entries.
    pub async fn add_to_wishlist(&mut self, artwork: &Artwork) {
        self.begin();
        self.wishlist.push(artwork.clone());
        self.is_loading = false;
        self.touch();
    }

    /// Remove every wishlist entry with the given artwork id.
    pub async fn remove_from_wishlist(&mut self, artwork_id: &ArtworkId) {
        self.begin();
        self.wishlist.retain(|a| &a.id != artwork_id);
        self.is_loading = false;
        self.touch();
    }

    /// Membership test composed with add/remove, keyed on artwork id.
    pub async fn toggle_wishlist(&mut self, artwork: &Artwork) {
        if self.is_in_wishlist(&artwork.id) {
            self.remove_from_wishlist(&artwork.id).await;
        } else {
            self.add_to_wishlist(artwork).await;
        }
    }

    /// Pure membership predicate by artwork id equality.
    pub fn is_in_wishlist(&self, artwork_id: &ArtworkId) -> bool {
        self.wishlist.iter().any(|a| &a.id == artwork_id)
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn wishlist(&self) -> &[Artwork] {
        &self.wishlist
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
            user: self.user.clone(),
            is_logged_in: self.is_logged_in,
        };
        let blob = match serde_json::to_value(&record) {
            Ok(blob) => blob,
            Err(err) => {
                tracing::warn!("failed to serialize session record: {err}");
                return;
            }
        };
        if let Err(err) = storage.write(STORE_NAME, &blob) {
            tracing::warn!("failed to persist session record: {err:?}");
        }
    }
}

impl core::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.user.as_ref().map(|u| u.id.as_str()))
            .field("is_logged_in", &self.is_logged_in)
            .field("wishlist", &self.wishlist.len())
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
