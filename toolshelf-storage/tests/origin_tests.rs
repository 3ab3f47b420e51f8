use std::sync::Arc;
use toolshelf_storage::{MemoryStorage, Origin, Received, StorageEvent};

fn expect_event(received: Option<Received>) -> StorageEvent {
    match received {
        Some(Received::Event(event)) => event,
        other => panic!("expected an event, got {other:?}"),
    }
}

#[test]
fn contexts_share_the_backend() {
    let origin = Origin::in_memory();
    let tab_a = origin.open_context();
    let tab_b = origin.open_context();
    assert_ne!(tab_a.context_id(), tab_b.context_id());

    tab_a.set_item("favorites", "[]").unwrap();
    assert_eq!(tab_b.get_item("favorites").unwrap().as_deref(), Some("[]"));
}

#[test]
fn writes_are_announced_to_other_contexts_only() {
    let origin = Origin::in_memory();
    let tab_a = origin.open_context();
    let tab_b = origin.open_context();
    let mut events_a = tab_a.subscribe();
    let mut events_b = tab_b.subscribe();

    tab_a.set_item("view-mode", r#""list""#).unwrap();

    assert_eq!(events_a.try_recv(), None);
    let event = expect_event(events_b.try_recv());
    assert_eq!(event.key.as_deref(), Some("view-mode"));
    assert_eq!(event.old_value, None);
    assert_eq!(event.new_value.as_deref(), Some(r#""list""#));
    assert_eq!(event.source, tab_a.context_id());
}

#[test]
fn unchanged_write_is_silent() {
    let origin = Origin::in_memory();
    let tab_a = origin.open_context();
    let mut events_b = origin.open_context().subscribe();

    tab_a.set_item("k", "1").unwrap();
    let _ = expect_event(events_b.try_recv());
    tab_a.set_item("k", "1").unwrap();
    assert_eq!(events_b.try_recv(), None);
}

#[test]
fn remove_and_clear_events() {
    let origin = Origin::in_memory();
    let tab_a = origin.open_context();
    let mut events_b = origin.open_context().subscribe();

    tab_a.remove_item("missing").unwrap();
    assert_eq!(events_b.try_recv(), None);

    tab_a.set_item("k", "1").unwrap();
    tab_a.remove_item("k").unwrap();
    let _ = expect_event(events_b.try_recv());
    let removed = expect_event(events_b.try_recv());
    assert_eq!(removed.old_value.as_deref(), Some("1"));
    assert_eq!(removed.new_value, None);

    tab_a.set_item("k", "2").unwrap();
    tab_a.clear().unwrap();
    let _ = expect_event(events_b.try_recv());
    let cleared = expect_event(events_b.try_recv());
    assert_eq!(cleared.key, None);
}

#[test]
fn sequence_numbers_order_changes_across_contexts() {
    let origin = Origin::in_memory();
    let tab_a = origin.open_context();
    let tab_b = origin.open_context();
    let mut events_c = origin.open_context().subscribe();
    assert_eq!(tab_a.last_seq(), 0);

    tab_a.set_item("view-mode", r#""list""#).unwrap();
    let reserved = tab_b.next_seq();
    tab_b.set_item("view-mode", r#""grid""#).unwrap();

    let first = expect_event(events_c.try_recv());
    let second = expect_event(events_c.try_recv());
    assert!(first.seq < reserved && reserved < second.seq);
    assert_eq!(tab_a.last_seq(), second.seq);
}

#[test]
fn slow_subscriber_reports_lag() {
    let origin = Origin::with_event_capacity(Arc::new(MemoryStorage::new()), 2);
    let tab_a = origin.open_context();
    let mut events_b = origin.open_context().subscribe();

    for i in 0..5 {
        tab_a.set_item("k", &i.to_string()).unwrap();
    }

    assert!(matches!(events_b.try_recv(), Some(Received::Lagged(_))));
    let latest = std::iter::from_fn(|| events_b.try_recv())
        .filter_map(|r| match r {
            Received::Event(e) => e.new_value,
            Received::Lagged(_) => None,
        })
        .last();
    assert_eq!(latest.as_deref(), Some("4"));
}

#[tokio::test]
async fn recv_waits_for_foreign_write() {
    let origin = Origin::in_memory();
    let tab_a = origin.open_context();
    let mut events_b = origin.open_context().subscribe();

    let writer = tokio::spawn(async move {
        tab_a.set_item("floating-sidebar-y", "42").unwrap();
    });

    let event = expect_event(events_b.recv().await);
    assert_eq!(event.new_value.as_deref(), Some("42"));
    writer.await.unwrap();
}
