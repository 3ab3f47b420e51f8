//! Property tests for the search cache.

use proptest::prelude::*;
use toolshelf_search::SearchCache;
use toolshelf_types::{Tool, ToolId};

fn tool_strategy() -> impl Strategy<Value = Tool> {
    (
        "[a-z]{1,10}",
        "[A-Za-z ]{0,20}",
        "[A-Za-z ]{0,30}",
        "[A-Za-z]{1,12}",
    )
        .prop_map(|(id, name, description, category)| {
            Tool::new(
                ToolId::parse(&id).unwrap(),
                name,
                description,
                format!("https://{id}.example"),
                category,
            )
        })
}

fn catalogue_strategy() -> impl Strategy<Value = Vec<Tool>> {
    prop::collection::vec(tool_strategy(), 0..20)
}

proptest! {
    /// Looking the same query up twice returns the same items and scans once.
    #[test]
    fn lookup_is_idempotent(items in catalogue_strategy(), query in "[a-z]{1,3}") {
        let mut cache = SearchCache::new(8);
        let first: Vec<Tool> = cache.lookup(&items, &query).to_vec();
        let second: Vec<Tool> = cache.lookup(&items, &query).to_vec();
        prop_assert_eq!(first, second);
        prop_assert_eq!(cache.stats().scans, 1);
    }

    /// Upper- and lowercase spellings of a query give identical results.
    #[test]
    fn lookup_ignores_case(items in catalogue_strategy(), query in "[a-z]{1,3}") {
        let mut cache = SearchCache::new(8);
        let lower: Vec<Tool> = cache.lookup(&items, &query).to_vec();
        cache.invalidate();
        let upper: Vec<Tool> = cache.lookup(&items, &query.to_uppercase()).to_vec();
        prop_assert_eq!(lower, upper);
    }

    /// Results are a subsequence of the input, in input order.
    #[test]
    fn results_preserve_order(items in catalogue_strategy(), query in "[a-z]{1,2}") {
        let mut cache = SearchCache::new(8);
        let results = cache.lookup(&items, &query);
        let mut remaining = items.iter();
        for found in results.iter() {
            prop_assert!(remaining.any(|item| item == found));
        }
    }

    /// The cache never grows past its bound and keeps the newest queries.
    #[test]
    fn cache_stays_bounded(
        capacity in 1usize..6,
        queries in prop::collection::hash_set("[a-z]{1,4}", 1..30),
    ) {
        let items: Vec<Tool> = Vec::new();
        let mut cache = SearchCache::new(capacity);
        let queries: Vec<String> = queries.into_iter().collect();
        for query in &queries {
            cache.lookup(&items, query);
            prop_assert!(cache.len() <= capacity);
        }
        for query in queries.iter().rev().take(capacity) {
            prop_assert!(cache.contains(query));
        }
    }
}
