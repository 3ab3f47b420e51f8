//! Property tests for the synced store.

use proptest::prelude::*;
use toolshelf_storage::Origin;
use toolshelf_store::{SyncedLocalStore, Update};

fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z-]{0,20}").unwrap()
}

fn list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[a-z0-9-]{1,12}").unwrap(), 0..8)
}

proptest! {
    /// Writing V under K and reading K in the same context yields V.
    #[test]
    fn write_then_read(key in key_strategy(), value in list_strategy()) {
        let store = SyncedLocalStore::new(Origin::in_memory().open_context());
        let mut observer = store.observe(key.clone(), Vec::<String>::new());
        observer.set(value.clone());

        prop_assert_eq!(observer.get(), &value);
        prop_assert_eq!(store.read(&key, Vec::<String>::new()), value);
    }

    /// Every independent observer converges after one poll.
    #[test]
    fn observers_converge(
        key in key_strategy(),
        writes in prop::collection::vec(list_strategy(), 1..6),
    ) {
        let store = SyncedLocalStore::new(Origin::in_memory().open_context());
        let mut writer = store.observe(key.clone(), Vec::<String>::new());
        let mut reader = store.observe(key, Vec::<String>::new());

        for value in &writes {
            writer.set(value.clone());
        }
        reader.poll_changes();
        prop_assert_eq!(reader.get(), writer.get());
    }

    /// An updater f gives the same result as writing f(current) literally.
    #[test]
    fn updater_matches_literal(start in list_strategy(), extra in "[a-z]{1,8}") {
        let store = SyncedLocalStore::new(Origin::in_memory().open_context());
        let mut functional = store.observe("functional", start.clone());
        let mut literal = store.observe("literal", start.clone());

        let pushed = extra.clone();
        functional.write(Update::with(move |prev: &Vec<String>| {
            let mut next = prev.clone();
            next.push(pushed);
            next
        }));
        let mut expected = start;
        expected.push(extra);
        literal.write(expected);

        prop_assert_eq!(functional.get(), literal.get());
    }

    /// However writes from two tabs interleave with polling, every observer
    /// ends up on the last write once all notifications are processed.
    #[test]
    fn cross_context_writes_converge(
        steps in prop::collection::vec((0usize..3, 0u8..4, any::<bool>()), 1..24),
    ) {
        let origin = Origin::in_memory();
        let tab_a = SyncedLocalStore::new(origin.open_context());
        let tab_c = SyncedLocalStore::new(origin.open_context());
        let mut observers = [
            tab_a.observe("floating-sidebar-y", 0_u8),
            tab_a.observe("floating-sidebar-y", 0_u8),
            tab_c.observe("floating-sidebar-y", 0_u8),
        ];

        let mut last = 0_u8;
        for (writer, value, poll_first) in steps {
            if poll_first {
                observers[writer].poll_changes();
            }
            observers[writer].set(value);
            last = value;
        }
        for observer in &mut observers {
            observer.poll_changes();
        }

        prop_assert_eq!(tab_a.read("floating-sidebar-y", 0_u8), last);
        for observer in &observers {
            prop_assert_eq!(*observer.get(), last);
        }
    }
}
