//! Persisted favorites
//!
//! Keeps the list of favorited destination ids in memory and mirrors it to a
//! [`KeyValueStore`] after every change. Storage trouble is never the
//! caller's problem: a bad stored value loads as empty, a failed write is
//! logged and the in-memory list stays authoritative for the session.

use crate::models::FavoriteId;
use serde::Serialize;
use std::fmt;
use tourease_storage::KeyValueStore;
use tracing::{debug, warn};

/// Storage key the favorites live under
pub const FAVORITES_KEY: &str = "favorites";

/// Insertion-ordered set of favorite ids
///
/// Serializes as a plain JSON array. Collections are tiny (a handful of
/// destinations), so membership is a linear scan over a `Vec`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FavoritesCollection {
    ids: Vec<FavoriteId>,
}

impl FavoritesCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored value. Anything that isn't an array of ids is an error.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        let ids: Vec<FavoriteId> = serde_json::from_str(raw)?;
        Ok(ids.into_iter().collect())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn contains(&self, id: &FavoriteId) -> bool {
        self.ids.contains(id)
    }

    /// Add `id` at the end. Returns false if it was already there.
    pub fn insert(&mut self, id: FavoriteId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns false if `id` wasn't there
    pub fn remove(&mut self, id: &FavoriteId) -> bool {
        match self.ids.iter().position(|existing| existing == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    /// Flip membership. Returns true if `id` is now a favorite.
    pub fn toggle(&mut self, id: FavoriteId) -> bool {
        if self.remove(&id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FavoriteId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Later duplicates are dropped, the first occurrence keeps its position
impl FromIterator<FavoriteId> for FavoritesCollection {
    fn from_iter<I: IntoIterator<Item = FavoriteId>>(iter: I) -> Self {
        let mut collection = Self::new();
        for id in iter {
            collection.insert(id);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a FavoritesCollection {
    type Item = &'a FavoriteId;
    type IntoIter = std::slice::Iter<'a, FavoriteId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

/// Read favorites from `storage` under `key`
///
/// Absent, unreadable, or malformed data all come back as an empty collection.
pub fn load_favorites<S: KeyValueStore + ?Sized>(storage: &S, key: &str) -> FavoritesCollection {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored favorites under '{}'", key);
            return FavoritesCollection::new();
        }
        Err(e) => {
            warn!("Could not read favorites from storage, starting empty: {}", e);
            return FavoritesCollection::new();
        }
    };

    match FavoritesCollection::from_json(&raw) {
        Ok(collection) => {
            debug!("Loaded {} favorites", collection.len());
            collection
        }
        Err(e) => {
            warn!("Stored favorites under '{}' are malformed, starting empty: {}", key, e);
            FavoritesCollection::new()
        }
    }
}

/// Handle returned by [`FavoritesStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&FavoritesCollection)>;

/// The favorites list plus the storage it's mirrored to
///
/// Single-threaded by construction: subscribers are plain `FnMut` closures
/// and every mutation goes through `&mut self`.
pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    key: String,
    favorites: FavoritesCollection,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Load from `storage` under the default key
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, FAVORITES_KEY)
    }

    /// Load from `storage` under a custom key
    pub fn load_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let favorites = load_favorites(&storage, &key);
        Self {
            storage,
            key,
            favorites,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn is_favorite(&self, id: &FavoriteId) -> bool {
        self.favorites.contains(id)
    }

    /// Add `id` if absent, remove it if present, persist, notify
    ///
    /// Returns a snapshot of the collection after the toggle.
    pub fn toggle_favorite(&mut self, id: impl Into<FavoriteId>) -> FavoritesCollection {
        let id = id.into();
        let added = self.favorites.toggle(id.clone());
        debug!("{} favorite {}", if added { "Added" } else { "Removed" }, id);
        self.commit()
    }

    /// Apply several toggles in order, then persist and notify once
    ///
    /// The same id twice in `ids` cancels out.
    pub fn toggle_all<I>(&mut self, ids: I) -> FavoritesCollection
    where
        I: IntoIterator,
        I::Item: Into<FavoriteId>,
    {
        for id in ids {
            self.favorites.toggle(id.into());
        }
        self.commit()
    }

    /// Current members in insertion order
    ///
    /// The iterator is `Clone`, so it can be walked more than once.
    pub fn favorite_ids(&self) -> std::slice::Iter<'_, FavoriteId> {
        self.favorites.iter()
    }

    pub fn collection(&self) -> &FavoritesCollection {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Get called with the new collection after every mutation
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&FavoritesCollection) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was never subscribed (or already removed)
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    fn commit(&mut self) -> FavoritesCollection {
        self.persist();
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.favorites);
        }
        self.favorites.clone()
    }

    /// Best effort: on failure memory stays authoritative, nothing is returned
    fn persist(&mut self) {
        let raw = match self.favorites.to_json() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not serialize favorites: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.write(&self.key, &raw) {
            warn!(
                "Could not persist {} favorites, keeping them in memory only: {}",
                self.favorites.len(),
                e
            );
        }
    }
}

impl<S: KeyValueStore> fmt::Debug for FavoritesStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("key", &self.key)
            .field("favorites", &self.favorites)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
