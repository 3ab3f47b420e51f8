//! The debounced search front end.

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheStats, SearchCache, SearchResults};
use crate::debounce::Debounce;
use crate::Searchable;

/// Turns live query text into filtered results.
///
/// [`set_query`](Self::set_query) records every keystroke; only once the
/// input has been stable for the configured delay does it become the active
/// query that [`results`](Self::results) filters by.
#[derive(Debug)]
pub struct DebouncedSearch<T> {
    debounce: Debounce<String>,
    raw_query: String,
    active_query: String,
    cache: SearchCache<T>,
}

impl<T> Default for DebouncedSearch<T> {
    fn default() -> Self {
        Self {
            debounce: Debounce::default(),
            raw_query: String::new(),
            active_query: String::new(),
            cache: SearchCache::default(),
        }
    }
}

impl<T> DebouncedSearch<T> {
    pub fn new(delay: Duration, cache_capacity: usize) -> Self {
        Self {
            debounce: Debounce::new(delay),
            raw_query: String::new(),
            active_query: String::new(),
            cache: SearchCache::new(cache_capacity),
        }
    }

    /// Records the latest raw input and restarts the delay.
    pub fn set_query(&mut self, raw: impl Into<String>) {
        self.set_query_at(raw, Instant::now());
    }

    /// Records the latest raw input as if typed at `now`.
    pub fn set_query_at(&mut self, raw: impl Into<String>, now: Instant) {
        self.raw_query = raw.into();
        self.debounce.schedule_at(self.raw_query.clone(), now);
    }

    /// True while the raw query has not yet become active.
    pub fn is_searching(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Promotes the raw query if its delay has elapsed.
    ///
    /// Returns true when the active query was updated.
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> bool {
        match self.debounce.poll_at(now) {
            Some(query) => self.activate(query),
            None => false,
        }
    }

    /// Waits out the delay and promotes the raw query.
    pub async fn settled(&mut self) -> bool {
        match self.debounce.fire().await {
            Some(query) => self.activate(query),
            None => false,
        }
    }

    /// Promotes the raw query immediately.
    pub fn flush(&mut self) -> bool {
        match self.debounce.flush() {
            Some(query) => self.activate(query),
            None => false,
        }
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn active_query(&self) -> &str {
        &self.active_query
    }

    /// Clears cached results. Call whenever the candidate list changes.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    pub fn cache(&self) -> &SearchCache<T> {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn activate(&mut self, query: String) -> bool {
        debug!("search query settled on {:?}", query);
        self.active_query = query;
        true
    }
}

impl<T: Searchable + Clone> DebouncedSearch<T> {
    /// Filters `items` by the active query.
    pub fn results<'a>(&mut self, items: &'a [T]) -> SearchResults<'a, T> {
        self.cache.lookup(items, &self.active_query)
    }

    /// Filters `items` by an explicit query, bypassing the debounce.
    pub fn lookup<'a>(&mut self, items: &'a [T], query: &str) -> SearchResults<'a, T> {
        self.cache.lookup(items, query)
    }
}
