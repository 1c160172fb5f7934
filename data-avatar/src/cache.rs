use std::sync::{Mutex, PoisonError};

use linked_hash_map::LinkedHashMap;
use url::Url;

use data_error::Result;

/// Exact inputs a URL was built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub style: String,
    pub seed: String,
    pub size: u32,
    pub params: String,
}

impl CacheKey {
    /// `seed` must already be percent-encoded and `params` is the JSON
    /// text of the parameter map.
    pub fn new(style: &str, seed: &str, size: u32, params: String) -> Self {
        Self {
            style: style.to_owned(),
            seed: seed.to_owned(),
            size,
            params,
        }
    }
}

/// Bounded least-recently-used memo of built URLs.
///
/// Entries are only dropped by eviction. The lock is held across
/// lookup and insert.
pub struct UrlCache {
    entries: Mutex<LinkedHashMap<CacheKey, Url>>,
    capacity: usize,
}

impl UrlCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        log::debug!("cache/urls: initialized with {} entries limit", capacity);
        Self {
            entries: Mutex::new(LinkedHashMap::new()),
            capacity,
        }
    }

    /// Returns the cached URL for `key`, building and storing it on a
    /// miss. A failed build leaves the cache untouched.
    pub fn get_or_insert_with<F>(&self, key: CacheKey, build: F) -> Result<Url>
    where
        F: FnOnce() -> Result<Url>,
    {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(url) = entries.get_refresh(&key) {
            log::debug!("cache/urls: hit for {}", url);
            return Ok(url.clone());
        }

        let url = build()?;
        log::debug!("cache/urls: stored {}", url);
        entries.insert(key, url.clone());

        while entries.len() > self.capacity {
            if let Some((evicted, _)) = entries.pop_front() {
                log::debug!(
                    "cache/urls: evicted {}/{} (size {})",
                    evicted.style,
                    evicted.seed,
                    evicted.size
                );
            }
        }
        Ok(url)
    }

    /// Looks up a key without touching recency.
    pub fn peek(&self, key: &CacheKey) -> Option<Url> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.peek(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
