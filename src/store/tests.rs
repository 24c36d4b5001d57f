//! Store Integration Tests
//!
//! Mutations, cascade deletion and the notification contract.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{Duration, TimeZone, Utc};
use futures::{FutureExt, StreamExt};

use crate::domain::{ListOrder, ListPatch};
use crate::store::{ListStore, Snapshots, StoreEvent};

/// Store whose clock advances one second per call
fn ticking_store() -> ListStore {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let tick = Cell::new(0);
    ListStore::with_clock(move || {
        let n = tick.get();
        tick.set(n + 1);
        base + Duration::seconds(n)
    })
}

/// Next snapshot if one is ready, without waiting
fn ready<T>(stream: &mut Snapshots<T>) -> Option<T> {
    stream.next().now_or_never().flatten()
}

fn record_events(store: &ListStore) -> Rc<RefCell<Vec<StoreEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    store.subscribe(|_| true, move |_, event| sink.borrow_mut().push(event.clone()));
    seen
}

#[test]
fn test_create_then_subscribe_yields_new_entry() {
    let store = ListStore::new();
    let list = store
        .create_list("Groceries", Some("🛒".into()), Some("#FFAA00".into()))
        .unwrap();

    let mut lists = store.subscribe_lists(ListOrder::default());
    let snapshot = ready(&mut lists).unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, list.id);
    assert_eq!(snapshot[0].title, "Groceries");
    assert_eq!(snapshot[0].emoji.as_deref(), Some("🛒"));
    assert_eq!(snapshot[0].color.as_deref(), Some("#FFAA00"));
    assert!(ready(&mut lists).is_none());
}

#[test]
fn test_each_mutation_emits_exactly_once() {
    let store = ListStore::new();
    let mut lists = store.subscribe_lists(ListOrder::default());
    assert_eq!(ready(&mut lists).unwrap().len(), 0);

    let list = store.create_list("Hardware", None, None).unwrap();
    assert_eq!(ready(&mut lists).unwrap().len(), 1);
    assert!(ready(&mut lists).is_none());

    store.update_list(list.id, ListPatch::title("Tools")).unwrap();
    assert_eq!(ready(&mut lists).unwrap()[0].title, "Tools");
    assert!(ready(&mut lists).is_none());

    assert!(store.delete_list(list.id));
    assert!(ready(&mut lists).unwrap().is_empty());
    assert!(ready(&mut lists).is_none());
}

#[test]
fn test_ids_are_unique() {
    let store = ListStore::new();
    let a = store.create_list("A", None, None).unwrap();
    let b = store.create_list("A", None, None).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(store.list_count(), 2);
}

#[test]
fn test_empty_title_rejected_without_emission() {
    let store = ListStore::new();
    let events = record_events(&store);

    let err = store.create_list("  ", None, None).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(store.list_count(), 0);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_update_missing_list_is_not_found() {
    let store = ListStore::new();
    let other = ListStore::new().create_list("Elsewhere", None, None).unwrap();

    let err = store.update_list(other.id, ListPatch::title("x")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_failed_update_leaves_list_unchanged() {
    let store = ListStore::new();
    let list = store.create_list("Party", Some("🎉".into()), None).unwrap();
    let events = record_events(&store);

    let patch = ListPatch::title("").with_emoji(None);
    assert!(store.update_list(list.id, patch).unwrap_err().is_validation());

    let stored = store.get_list(list.id).unwrap();
    assert_eq!(stored, list);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_update_applies_patch() {
    let store = ticking_store();
    let list = store.create_list("Party", Some("🎉".into()), None).unwrap();

    let updated = store
        .update_list(list.id, ListPatch::default().with_color(Some("#00FF00".into())))
        .unwrap();
    assert_eq!(updated.title, "Party");
    assert_eq!(updated.color.as_deref(), Some("#00FF00"));
    assert_eq!(updated.created_at, list.created_at);
    assert!(updated.updated_at > list.updated_at);
}

#[test]
fn test_delete_list_cascades_items() {
    let store = ListStore::new();
    let list = store.create_list("Weekly", None, None).unwrap();
    let keep = store.create_list("Other", None, None).unwrap();
    let milk = store.add_item(list.id, "Milk").unwrap();
    store.add_item(list.id, "Bread").unwrap();
    let nails = store.add_item(keep.id, "Nails").unwrap();

    let mut items = store.subscribe_items(list.id);
    assert_eq!(ready(&mut items).unwrap().len(), 2);

    assert!(store.delete_list(list.id));

    assert!(ready(&mut items).unwrap().is_empty());
    assert!(ready(&mut items).is_none());
    assert!(store.get_item(milk.id).is_none());
    assert!(store.get_item(nails.id).is_some());

    let mut again = store.subscribe_items(list.id);
    assert!(ready(&mut again).unwrap().is_empty());
}

#[test]
fn test_cascade_is_a_single_event() {
    let store = ListStore::new();
    let list = store.create_list("Weekly", None, None).unwrap();
    let a = store.add_item(list.id, "A").unwrap();
    let b = store.add_item(list.id, "B").unwrap();
    let events = record_events(&store);

    store.delete_list(list.id);

    assert_eq!(
        *events.borrow(),
        vec![StoreEvent::ListDeleted { list_id: list.id, removed_items: vec![a.id, b.id] }]
    );
}

#[test]
fn test_delete_missing_list_is_noop() {
    let store = ListStore::new();
    let list = store.create_list("Once", None, None).unwrap();
    assert!(store.delete_list(list.id));

    let events = record_events(&store);
    assert!(!store.delete_list(list.id));
    assert!(events.borrow().is_empty());
}

#[test]
fn test_add_item_to_missing_list() {
    let store = ListStore::new();
    let list = store.create_list("Real", None, None).unwrap();
    let ghost = ListStore::new().create_list("Ghost", None, None).unwrap();

    let mut lists = store.subscribe_lists(ListOrder::default());
    let mut items = store.subscribe_items(list.id);
    ready(&mut lists);
    ready(&mut items);
    let events = record_events(&store);

    let err = store.add_item(ghost.id, "Milk").unwrap_err();
    assert!(err.is_not_found());
    assert!(events.borrow().is_empty());
    assert!(ready(&mut lists).is_none());
    assert!(ready(&mut items).is_none());
}

#[test]
fn test_add_item_empty_name() {
    let store = ListStore::new();
    let list = store.create_list("Real", None, None).unwrap();
    assert!(store.add_item(list.id, "").unwrap_err().is_validation());
    assert!(store.items(list.id).is_empty());
}

#[test]
fn test_toggle_twice_restores() {
    let store = ListStore::new();
    let list = store.create_list("Weekly", None, None).unwrap();
    let item = store.add_item(list.id, "Eggs").unwrap();

    assert!(store.toggle_item(item.id).unwrap().completed);
    assert!(!store.toggle_item(item.id).unwrap().completed);
    assert_eq!(store.get_item(item.id).unwrap(), item);
}

#[test]
fn test_toggle_missing_item() {
    let store = ListStore::new();
    let list = store.create_list("Weekly", None, None).unwrap();
    let item = store.add_item(list.id, "Eggs").unwrap();
    store.delete_item(item.id);

    assert!(store.toggle_item(item.id).unwrap_err().is_not_found());
}

#[test]
fn test_rename_item() {
    let store = ListStore::new();
    let list = store.create_list("Weekly", None, None).unwrap();
    let item = store.add_item(list.id, "Eggs").unwrap();

    assert_eq!(store.rename_item(item.id, "Eggs x12").unwrap().name, "Eggs x12");
    assert!(store.rename_item(item.id, "").unwrap_err().is_validation());
    assert_eq!(store.get_item(item.id).unwrap().name, "Eggs x12");
}

#[test]
fn test_delete_item_idempotent() {
    let store = ListStore::new();
    let list = store.create_list("Weekly", None, None).unwrap();
    let item = store.add_item(list.id, "Eggs").unwrap();
    let events = record_events(&store);

    assert!(store.delete_item(item.id));
    assert!(!store.delete_item(item.id));
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn test_item_streams_are_scoped() {
    let store = ListStore::new();
    let a = store.create_list("A", None, None).unwrap();
    let b = store.create_list("B", None, None).unwrap();

    let mut lists = store.subscribe_lists(ListOrder::default());
    let mut a_items = store.subscribe_items(a.id);
    let mut b_items = store.subscribe_items(b.id);
    ready(&mut lists);
    ready(&mut a_items);
    ready(&mut b_items);

    let item = store.add_item(a.id, "Apples").unwrap();
    store.toggle_item(item.id).unwrap();

    assert!(ready(&mut lists).is_none());
    assert!(ready(&mut b_items).is_none());

    let first = ready(&mut a_items).unwrap();
    assert!(!first[0].completed);
    let second = ready(&mut a_items).unwrap();
    assert!(second[0].completed);
    assert!(ready(&mut a_items).is_none());
}

#[test]
fn test_ordering() {
    let store = ticking_store();
    store.create_list("banana", None, None).unwrap();
    store.create_list("Apple", None, None).unwrap();
    store.create_list("cherry", None, None).unwrap();

    let titles = |order| -> Vec<String> { store.lists(order).into_iter().map(|l| l.title).collect() };
    assert_eq!(titles(ListOrder::CreatedAsc), vec!["banana", "Apple", "cherry"]);
    assert_eq!(titles(ListOrder::CreatedDesc), vec!["cherry", "Apple", "banana"]);
    assert_eq!(titles(ListOrder::TitleAsc), vec!["Apple", "banana", "cherry"]);

    let mut desc = store.subscribe_lists(ListOrder::CreatedDesc);
    assert_eq!(ready(&mut desc).unwrap()[0].title, "cherry");
}

#[test]
fn test_items_in_creation_order() {
    let store = ticking_store();
    let list = store.create_list("Weekly", None, None).unwrap();
    for name in ["one", "two", "three"] {
        store.add_item(list.id, name).unwrap();
    }
    let names: Vec<_> = store.items(list.id).into_iter().map(|i| i.name).collect();
    assert_eq!(names, vec!["one", "two", "three"]);
}

#[test]
fn test_summaries_track_progress() {
    let store = ListStore::new();
    let list = store.create_list("Weekly", None, None).unwrap();
    let mut summaries = store.subscribe_summaries(ListOrder::default());
    assert_eq!(ready(&mut summaries).unwrap()[0].progress.total, 0);

    let item = store.add_item(list.id, "Eggs").unwrap();
    store.add_item(list.id, "Ham").unwrap();
    store.toggle_item(item.id).unwrap();

    let latest = summaries.latest().unwrap();
    assert_eq!(latest[0].progress.total, 2);
    assert_eq!(latest[0].progress.completed, 1);
    assert!(summaries.latest().is_none());
}

#[test]
fn test_subscriber_sees_committed_state() {
    let store = ListStore::new();
    let seen = Rc::new(Cell::new(0));
    let sink = seen.clone();
    store.subscribe(
        StoreEvent::touches_lists,
        move |store, _| sink.set(store.list_count()),
    );

    store.create_list("One", None, None).unwrap();
    assert_eq!(seen.get(), 1);
    store.create_list("Two", None, None).unwrap();
    assert_eq!(seen.get(), 2);
}

#[test]
fn test_unsubscribe_stops_callbacks() {
    let store = ListStore::new();
    let calls = Rc::new(Cell::new(0));
    let sink = calls.clone();
    let id = store.subscribe(|_| true, move |_, _| sink.set(sink.get() + 1));

    store.create_list("One", None, None).unwrap();
    assert!(store.unsubscribe(id));
    store.create_list("Two", None, None).unwrap();
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_unsubscribe_during_notification() {
    let store = ListStore::new();
    let late_calls = Rc::new(Cell::new(0));
    let victim = Rc::new(Cell::new(None));

    let target = victim.clone();
    store.subscribe(|_| true, move |store, _| {
        if let Some(id) = target.get() {
            store.unsubscribe(id);
        }
    });
    let sink = late_calls.clone();
    victim.set(Some(store.subscribe(|_| true, move |_, _| sink.set(sink.get() + 1))));

    store.create_list("One", None, None).unwrap();
    assert_eq!(late_calls.get(), 0);
    assert_eq!(store.subscriber_count(), 1);
}

#[test]
fn test_mutation_inside_callback_is_queued() {
    let store = ListStore::new();
    let events = record_events(&store);

    // Every new list gets a starter item
    store.subscribe(
        |event| matches!(event, StoreEvent::ListCreated(_)),
        |store, event| {
            store.add_item(event.list_id(), "Water").unwrap();
        },
    );

    let list = store.create_list("Camping", None, None).unwrap();

    assert_eq!(store.items(list.id).len(), 1);
    let events = events.borrow();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], StoreEvent::ListCreated(list.id));
    assert!(matches!(events[1], StoreEvent::ItemAdded { list_id, .. } if list_id == list.id));
}

#[test]
fn test_dropping_stream_unsubscribes() {
    let store = ListStore::new();
    let lists = store.subscribe_lists(ListOrder::default());
    let items = store.subscribe_items(store.create_list("A", None, None).unwrap().id);
    assert_eq!(store.subscriber_count(), 2);

    drop(lists);
    assert_eq!(store.subscriber_count(), 1);
    drop(items);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn test_unsubscribing_stream_by_id() {
    let store = ListStore::new();
    let mut lists = store.subscribe_lists(ListOrder::default());
    ready(&mut lists);

    assert!(store.unsubscribe(lists.subscription_id()));
    store.create_list("Unseen", None, None).unwrap();
    assert!(ready(&mut lists).is_none());
    assert_eq!(store.subscriber_count(), 0);

    // Drop after an explicit unsubscribe is harmless
    drop(lists);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn test_latest_drains_backlog() {
    let store = ListStore::new();
    let mut lists = store.subscribe_lists(ListOrder::default());
    for n in 0..50 {
        store.create_list(format!("List {}", n), None, None).unwrap();
    }

    assert_eq!(lists.latest().unwrap().len(), 50);
    assert!(ready(&mut lists).is_none());
}

#[test]
fn test_stream_restarts_from_current_state() {
    let store = ListStore::new();
    let mut first = store.subscribe_lists(ListOrder::default());
    store.create_list("A", None, None).unwrap();
    store.create_list("B", None, None).unwrap();
    drop(first.latest());
    drop(first);

    let mut second = store.subscribe_lists(ListOrder::default());
    assert_eq!(ready(&mut second).unwrap().len(), 2);
    assert!(ready(&mut second).is_none());
}

#[test]
fn test_stream_ends_when_store_dropped() {
    let store = ListStore::new();
    let mut lists = store.subscribe_lists(ListOrder::default());
    ready(&mut lists);

    drop(store);
    assert_eq!(lists.next().now_or_never(), Some(None));
}

#[test]
fn test_json_round_trip() {
    let store = ListStore::new();
    let list = store.create_list("Weekly", Some("🥦".into()), None).unwrap();
    let item = store.add_item(list.id, "Broccoli").unwrap();
    store.toggle_item(item.id).unwrap();

    let restored = ListStore::from_json(&store.to_json().unwrap()).unwrap();
    assert_eq!(restored.get_list(list.id), Some(list.clone()));
    assert!(restored.get_item(item.id).unwrap().completed);
    assert_eq!(restored.progress(list.id).completed, 1);
}

#[test]
fn test_json_rejects_dangling_items() {
    let store = ListStore::new();
    let list = store.create_list("Weekly", None, None).unwrap();
    store.add_item(list.id, "Broccoli").unwrap();

    let mut document: serde_json::Value = serde_json::from_str(&store.to_json().unwrap()).unwrap();
    document["lists"] = serde_json::json!([]);

    let err = ListStore::from_json(&document.to_string()).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_json_rejects_garbage_and_versions() {
    assert!(ListStore::from_json("not json").unwrap_err().is_validation());

    let doc = serde_json::json!({ "version": 99, "lists": [], "items": [] });
    assert!(ListStore::from_json(&doc.to_string()).unwrap_err().is_validation());
}

#[test]
fn test_json_rejects_duplicate_ids() {
    let store = ListStore::new();
    store.create_list("Weekly", None, None).unwrap();

    let mut document: serde_json::Value = serde_json::from_str(&store.to_json().unwrap()).unwrap();
    let list = document["lists"][0].clone();
    document["lists"] = serde_json::json!([list.clone(), list]);

    let err = ListStore::from_json(&document.to_string()).unwrap_err();
    assert!(err.to_string().contains("Duplicate id"));
}
