//! Store Observers
//!
//! Push-based publish/subscribe between the store and its readers.
//! Subscribers register a predicate over [`StoreEvent`] and a callback; the
//! callback runs synchronously for every matching event.
//!
//! Events published while a notification round is already running (a
//! callback that mutates the store) are queued and delivered, in order, before
//! the outermost mutation returns. A subscriber removed mid-round receives
//! nothing further, not even events already queued.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use super::list_store::ListStore;
use crate::domain::{ItemId, ListId};

/// What changed in the store. One event per successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    ListCreated(ListId),
    ListUpdated(ListId),
    /// A list and, by cascade, all of its items
    ListDeleted { list_id: ListId, removed_items: Vec<ItemId> },
    ItemAdded { list_id: ListId, item_id: ItemId },
    ItemUpdated { list_id: ListId, item_id: ItemId },
    ItemDeleted { list_id: ListId, item_id: ItemId },
}

impl StoreEvent {
    /// The list the event is scoped to
    pub fn list_id(&self) -> ListId {
        match self {
            StoreEvent::ListCreated(id) | StoreEvent::ListUpdated(id) => *id,
            StoreEvent::ListDeleted { list_id, .. }
            | StoreEvent::ItemAdded { list_id, .. }
            | StoreEvent::ItemUpdated { list_id, .. }
            | StoreEvent::ItemDeleted { list_id, .. } => *list_id,
        }
    }

    /// Whether a list row was created, changed or removed
    pub fn touches_lists(&self) -> bool {
        matches!(
            self,
            StoreEvent::ListCreated(_) | StoreEvent::ListUpdated(_) | StoreEvent::ListDeleted { .. }
        )
    }

    /// Whether the item set of `list_id` may have changed.
    /// Deleting the list counts: its items are gone with it.
    pub fn touches_items_of(&self, list_id: ListId) -> bool {
        match self {
            StoreEvent::ListCreated(_) | StoreEvent::ListUpdated(_) => false,
            other => other.list_id() == list_id,
        }
    }
}

/// Handle returned by [`ListStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Predicate = Box<dyn Fn(&StoreEvent) -> bool>;
type Callback = Box<dyn FnMut(&ListStore, &StoreEvent)>;

struct Observer {
    id: SubscriptionId,
    active: Cell<bool>,
    predicate: Predicate,
    callback: RefCell<Callback>,
}

#[derive(Default)]
pub(super) struct ObserverRegistry {
    next_id: Cell<u64>,
    observers: RefCell<Vec<Rc<Observer>>>,
    pending: RefCell<VecDeque<StoreEvent>>,
    flushing: Cell<bool>,
}

impl ObserverRegistry {
    fn add(&self, predicate: Predicate, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        self.observers.borrow_mut().push(Rc::new(Observer {
            id,
            active: Cell::new(true),
            predicate,
            callback: RefCell::new(callback),
        }));
        id
    }

    pub(super) fn remove(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.borrow_mut();
        match observers.iter().position(|observer| observer.id == id) {
            Some(index) => {
                observers.remove(index).active.set(false);
                true
            }
            None => false,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    pub(super) fn publish(&self, store: &ListStore, event: StoreEvent) {
        self.pending.borrow_mut().push_back(event);
        if self.flushing.get() {
            return;
        }

        let _round = FlushRound::start(self);
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };

            // Callbacks may subscribe or unsubscribe, so iterate a copy
            let targets: Vec<Rc<Observer>> = self.observers.borrow().clone();
            for observer in targets {
                if !observer.active.get() || !(observer.predicate)(&event) {
                    continue;
                }
                let mut callback = observer.callback.borrow_mut();
                (&mut **callback)(store, &event);
            }
        }
    }
}

/// Marks a notification round; a panicking callback must not leave the
/// registry stuck in flushing mode or replay stale events later.
struct FlushRound<'a> {
    registry: &'a ObserverRegistry,
}

impl<'a> FlushRound<'a> {
    fn start(registry: &'a ObserverRegistry) -> Self {
        registry.flushing.set(true);
        Self { registry }
    }
}

impl Drop for FlushRound<'_> {
    fn drop(&mut self) {
        self.registry.flushing.set(false);
        self.registry.pending.borrow_mut().clear();
    }
}

impl ListStore {
    /// Register `callback` for every event matching `predicate`.
    ///
    /// The callback receives the store itself and may read or mutate it.
    pub fn subscribe<P, C>(&self, predicate: P, callback: C) -> SubscriptionId
    where
        P: Fn(&StoreEvent) -> bool + 'static,
        C: FnMut(&ListStore, &StoreEvent) + 'static,
    {
        let id = self.inner.observers.add(Box::new(predicate), Box::new(callback));
        log::trace!("Subscriber {:?} registered", id);
        id
    }

    /// Stop notifications for `id`. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.observers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.observers.len()
    }
}
