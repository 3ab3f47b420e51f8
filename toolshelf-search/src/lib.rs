//! Catalogue search for Toolshelf.
//!
//! - [`SearchCache`]: case-insensitive substring matching over the fields a
//!   [`Searchable`] item exposes, memoized per normalized query with a
//!   bounded, oldest-first cache.
//! - [`Debounce`]: a trailing-edge timer held as plain state, so callers
//!   (and tests) decide when time moves.
//! - [`DebouncedSearch`]: the two combined; the raw query only becomes the
//!   active query once typing has paused.

mod cache;
mod debounce;
mod search;

pub use cache::{normalize_query, CacheStats, SearchCache, SearchResults, DEFAULT_CACHE_CAPACITY};
pub use debounce::{Debounce, DEFAULT_DELAY};
pub use search::DebouncedSearch;

use toolshelf_types::Tool;

/// Something a free-text query can be matched against.
pub trait Searchable {
    /// The text fields a query is matched against.
    fn search_fields(&self) -> impl Iterator<Item = &str>;

    /// Returns true if any field contains `needle`, ignoring case.
    ///
    /// `needle` must already be normalized.
    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Searchable for Tool {
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.name.as_str()),
            Some(self.description.as_str()),
            Some(self.category.as_str()),
            self.subcategory.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}
