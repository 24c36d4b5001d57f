//! Snapshot Streams
//!
//! Lazy, infinite views of the store. Each stream yields the current snapshot
//! first and then one fresh snapshot per relevant mutation. Subscribing again
//! restarts from the current state. Dropping the stream unsubscribes it.

use std::pin::Pin;
use std::rc::Weak;
use std::task::{Context, Poll};

use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::{FutureExt, Stream, StreamExt};

use super::list_store::{ListStore, StoreInner};
use super::observer::{StoreEvent, SubscriptionId};
use crate::domain::{ListId, ListOrder, ListSummary, ShoppingItem, ShoppingList};

/// Stream of reactive snapshots.
///
/// Snapshots queue up until read: a holder that stops polling keeps one
/// rendered snapshot per matching event. Call [`Snapshots::latest`] (as the
/// screens do on refresh) or drop the stream when it is no longer shown.
pub struct Snapshots<T> {
    receiver: UnboundedReceiver<T>,
    store: Weak<StoreInner>,
    subscription: SubscriptionId,
}

impl<T> Snapshots<T> {
    pub fn subscription_id(&self) -> SubscriptionId {
        self.subscription
    }

    /// Drain everything already delivered and return the newest snapshot,
    /// or `None` if nothing arrived since the last read
    pub fn latest(&mut self) -> Option<T> {
        let mut newest = None;
        while let Some(Some(snapshot)) = self.receiver.next().now_or_never() {
            newest = Some(snapshot);
        }
        newest
    }
}

impl<T> Stream for Snapshots<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.receiver.poll_next_unpin(cx)
    }
}

impl<T> Drop for Snapshots<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.observers.remove(self.subscription);
        }
    }
}

impl ListStore {
    /// Snapshot stream rendering `render` after every event matching `predicate`
    pub fn snapshots<T, P, R>(&self, predicate: P, render: R) -> Snapshots<T>
    where
        T: 'static,
        P: Fn(&StoreEvent) -> bool + 'static,
        R: Fn(&ListStore) -> T + 'static,
    {
        let (sender, receiver) = mpsc::unbounded();
        let _ = sender.unbounded_send(render(self));

        let subscription = self.subscribe(predicate, move |store, _event| {
            if sender.unbounded_send(render(store)).is_err() {
                log::trace!("Snapshot receiver already closed");
            }
        });

        Snapshots {
            receiver,
            store: std::rc::Rc::downgrade(&self.inner),
            subscription,
        }
    }

    /// Lists in `order`, re-emitted whenever a list row changes
    pub fn subscribe_lists(&self, order: ListOrder) -> Snapshots<Vec<ShoppingList>> {
        self.snapshots(StoreEvent::touches_lists, move |store| store.lists(order))
    }

    /// Items of `list_id`, re-emitted on any item change in that list.
    /// Once the list is deleted the stream yields an empty snapshot.
    pub fn subscribe_items(&self, list_id: ListId) -> Snapshots<Vec<ShoppingItem>> {
        self.snapshots(
            move |event: &StoreEvent| event.touches_items_of(list_id),
            move |store| store.items(list_id),
        )
    }

    /// Lists with completion counts, re-emitted on every change
    pub fn subscribe_summaries(&self, order: ListOrder) -> Snapshots<Vec<ListSummary>> {
        self.snapshots(|_: &StoreEvent| true, move |store| store.summaries(order))
    }
}
