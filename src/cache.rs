//! Session-lifetime memoization of catalog responses.
//!
//! Entries are written once per key and never evicted or refreshed, so a
//! resource is requested at most once per run.

use crate::api::CatalogClient;
use crate::error::Result;
use crate::filter::sort_by_name;
use crate::types::{Episode, Show};
use log::debug;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Key identifying one cached catalog resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Sentinel key for the full show list
    AllShows,
    /// Episodes of one show
    Show(u32),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::AllShows => write!(f, "all-shows"),
            CacheKey::Show(id) => write!(f, "show-{}", id),
        }
    }
}

/// A write-once map from [`CacheKey`] to a fetched value.
#[derive(Debug)]
pub struct SessionCache<V> {
    entries: HashMap<CacheKey, V>,
    hits: usize,
    misses: usize,
}

impl<V> Default for SessionCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<V: Clone> SessionCache<V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value cached under `key`, fetching and storing it on a miss.
    ///
    /// A failed fetch stores nothing, so a later call will try again.
    pub async fn get_or_fetch<F, Fut>(&mut self, key: CacheKey, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.entries.get(&key) {
            self.hits += 1;
            debug!("Cache hit for {}", key);
            return Ok(value.clone());
        }

        self.misses += 1;
        debug!("Cache miss for {}", key);
        let fetched = fetch().await?;

        // First write wins
        let stored = match self.entries.entry(key) {
            Entry::Occupied(existing) => existing.into_mut(),
            Entry::Vacant(slot) => slot.insert(fetched),
        };
        Ok(stored.clone())
    }

    /// Cached value for `key`, without fetching.
    pub fn get(&self, key: CacheKey) -> Option<&V> {
        self.entries.get(&key)
    }

    /// Whether `key` has been fetched successfully.
    pub fn contains(&self, key: CacheKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Lookups that had to fetch.
    pub fn misses(&self) -> usize {
        self.misses
    }
}

/// A catalog client fronted by session caches.
///
/// The show list is sorted by name before it is stored, so the sort runs
/// once per fetched list.
#[derive(Debug)]
pub struct CachedCatalog<C> {
    client: C,
    shows: SessionCache<Arc<[Show]>>,
    episodes: SessionCache<Arc<[Episode]>>,
}

impl<C: CatalogClient> CachedCatalog<C> {
    /// Wrap `client` with empty caches.
    pub fn new(client: C) -> Self {
        Self {
            client,
            shows: SessionCache::new(),
            episodes: SessionCache::new(),
        }
    }

    /// The sorted show list, fetched on first use.
    pub async fn show_list(&mut self) -> Result<Arc<[Show]>> {
        let client = &self.client;
        self.shows
            .get_or_fetch(CacheKey::AllShows, || async move {
                let mut shows = client.fetch_show_list().await?;
                sort_by_name(&mut shows);
                Ok(Arc::from(shows))
            })
            .await
    }

    /// Episodes of `show_id`, fetched on first use.
    pub async fn episodes(&mut self, show_id: u32) -> Result<Arc<[Episode]>> {
        let client = &self.client;
        self.episodes
            .get_or_fetch(CacheKey::Show(show_id), || async move {
                let episodes = client.fetch_episodes(show_id).await?;
                Ok(Arc::from(episodes))
            })
            .await
    }

    /// The wrapped client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Cache of the show list.
    pub fn show_cache(&self) -> &SessionCache<Arc<[Show]>> {
        &self.shows
    }

    /// Cache of per-show episode lists.
    pub fn episode_cache(&self) -> &SessionCache<Arc<[Episode]>> {
        &self.episodes
    }
}
