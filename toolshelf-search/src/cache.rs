//! Per-query result cache.

use std::collections::{HashMap, VecDeque};
use std::ops::Deref;
use std::sync::Arc;
use tracing::debug;

use crate::Searchable;

/// Default number of cached queries.
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Trims and lowercases a raw query into its cache key.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Counters describing cache behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Full passes over a candidate list.
    pub scans: u64,
    pub evictions: u64,
}

/// The outcome of a lookup.
///
/// An empty query yields the candidate list itself; anything else yields a
/// shared, cached match list. Both dereference to a slice.
#[derive(Debug)]
pub enum SearchResults<'a, T> {
    All(&'a [T]),
    Matched(Arc<[T]>),
}

impl<T> Deref for SearchResults<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        match self {
            Self::All(items) => items,
            Self::Matched(items) => items,
        }
    }
}

/// Memoized search results keyed by normalized query.
///
/// Holds at most `capacity` entries and evicts the oldest-inserted entry
/// first. Entries never expire; [`invalidate`](Self::invalidate) must be
/// called whenever the candidate list changes.
#[derive(Debug)]
pub struct SearchCache<T> {
    capacity: usize,
    entries: HashMap<String, Arc<[T]>>,
    order: VecDeque<String>,
    stats: CacheStats,
}

impl<T> Default for SearchCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl<T> SearchCache<T> {
    /// Creates an empty cache holding at most `capacity` queries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
            stats: CacheStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of cached queries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `query` (normalized) has a cached entry.
    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(&normalize_query(query))
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drops every cached entry.
    pub fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            debug!("invalidating {} cached searches", self.entries.len());
        }
        self.entries.clear();
        self.order.clear();
    }

    fn insert(&mut self, key: String, matched: Arc<[T]>) {
        self.order.push_back(key.clone());
        self.entries.insert(key, matched);
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.evictions += 1;
            debug!("evicted cached search {:?}", oldest);
        }
    }
}

impl<T: Searchable + Clone> SearchCache<T> {
    /// Returns the items matching `query`, in their original order.
    ///
    /// An empty (or blank) query returns `items` unchanged without touching
    /// the cache.
    pub fn lookup<'a>(&mut self, items: &'a [T], query: &str) -> SearchResults<'a, T> {
        let key = normalize_query(query);
        if key.is_empty() {
            return SearchResults::All(items);
        }
        if let Some(hit) = self.entries.get(&key) {
            self.stats.hits += 1;
            return SearchResults::Matched(Arc::clone(hit));
        }

        self.stats.misses += 1;
        self.stats.scans += 1;
        let matched: Arc<[T]> = items
            .iter()
            .filter(|item| item.matches(&key))
            .cloned()
            .collect();
        self.insert(key, Arc::clone(&matched));
        SearchResults::Matched(matched)
    }
}
