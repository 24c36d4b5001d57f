//! List Store - Core Table and List Operations
//!
//! The store is a cheap, clonable handle around shared single-threaded state.
//! Item operations live in `item_ops`, subscriptions in `observer`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::observer::{ObserverRegistry, StoreEvent};
use crate::domain::{
    DomainError, DomainResult, ItemId, ListId, ListOrder, ListPatch, ListProgress, ListSummary,
    ShoppingItem, ShoppingList,
};

/// Raw rows, both in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct Tables {
    pub lists: Vec<ShoppingList>,
    pub items: Vec<ShoppingItem>,
}

pub(super) struct StoreInner {
    pub tables: RefCell<Tables>,
    pub observers: ObserverRegistry,
    clock: Box<dyn Fn() -> DateTime<Utc>>,
}

/// Handle to the shopping list store.
///
/// Clones share the same tables and subscribers. Create one per app session
/// and pass it to whoever needs it.
#[derive(Clone)]
pub struct ListStore {
    pub(super) inner: Rc<StoreInner>,
}

impl ListStore {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Store whose timestamps come from `clock`
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        Self::from_tables(Tables::default(), Box::new(clock))
    }

    pub(super) fn from_tables(tables: Tables, clock: Box<dyn Fn() -> DateTime<Utc>>) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                tables: RefCell::new(tables),
                observers: ObserverRegistry::default(),
                clock,
            }),
        }
    }

    pub(super) fn now(&self) -> DateTime<Utc> {
        (self.inner.clock)()
    }

    /// Deliver `event` to subscribers. Must be called with no table borrow held.
    pub(super) fn publish(&self, event: StoreEvent) {
        self.inner.observers.publish(self, event);
    }

    // ========================
    // List mutations
    // ========================

    /// Create a list. Fails with `Validation` on an empty title.
    pub fn create_list(
        &self,
        title: impl Into<String>,
        emoji: Option<String>,
        color: Option<String>,
    ) -> DomainResult<ShoppingList> {
        let list = ShoppingList::new(title.into(), emoji, color, self.now()).map_err(|e| {
            log::warn!("Rejected new list: {}", e);
            e
        })?;

        self.inner.tables.borrow_mut().lists.push(list.clone());
        log::debug!("Created list {} ({:?})", list.id, list.title);

        self.publish(StoreEvent::ListCreated(list.id));
        Ok(list)
    }

    /// Apply a partial update to a list, all fields or none
    pub fn update_list(&self, id: ListId, patch: ListPatch) -> DomainResult<ShoppingList> {
        let now = self.now();
        let updated = {
            let mut tables = self.inner.tables.borrow_mut();
            let slot = tables
                .lists
                .iter_mut()
                .find(|list| list.id == id)
                .ok_or_else(|| DomainError::NotFound(format!("List {} not found", id)))?;

            let updated = slot.patched(&patch, now)?;
            *slot = updated.clone();
            updated
        };
        log::debug!("Updated list {}", id);

        self.publish(StoreEvent::ListUpdated(id));
        Ok(updated)
    }

    /// Delete a list and every item in it.
    ///
    /// Deleting an unknown id is a no-op: returns `false` and publishes nothing.
    pub fn delete_list(&self, id: ListId) -> bool {
        let removed_items: Vec<ItemId> = {
            let mut tables = self.inner.tables.borrow_mut();
            let before = tables.lists.len();
            tables.lists.retain(|list| list.id != id);
            if tables.lists.len() == before {
                log::debug!("Delete of unknown list {} ignored", id);
                return false;
            }

            let removed = tables
                .items
                .iter()
                .filter(|item| item.list_id == id)
                .map(|item| item.id)
                .collect();
            tables.items.retain(|item| item.list_id != id);
            removed
        };
        log::debug!("Deleted list {} with {} items", id, removed_items.len());

        self.publish(StoreEvent::ListDeleted { list_id: id, removed_items });
        true
    }

    // ========================
    // Read views
    // ========================

    pub fn get_list(&self, id: ListId) -> Option<ShoppingList> {
        self.inner.tables.borrow().lists.iter().find(|list| list.id == id).cloned()
    }

    pub fn contains_list(&self, id: ListId) -> bool {
        self.inner.tables.borrow().lists.iter().any(|list| list.id == id)
    }

    pub fn list_count(&self) -> usize {
        self.inner.tables.borrow().lists.len()
    }

    /// All lists in the requested order
    pub fn lists(&self, order: ListOrder) -> Vec<ShoppingList> {
        let mut lists = self.inner.tables.borrow().lists.clone();
        order.sort(&mut lists);
        lists
    }

    /// Completion counts for one list; zeroes for an unknown id
    pub fn progress(&self, list_id: ListId) -> ListProgress {
        let tables = self.inner.tables.borrow();
        tables
            .items
            .iter()
            .filter(|item| item.list_id == list_id)
            .fold(ListProgress::default(), |mut acc, item| {
                acc.total += 1;
                if item.completed {
                    acc.completed += 1;
                }
                acc
            })
    }

    /// Every list with its completion counts
    pub fn summaries(&self, order: ListOrder) -> Vec<ListSummary> {
        self.lists(order)
            .into_iter()
            .map(|list| {
                let progress = self.progress(list.id);
                ListSummary { list, progress }
            })
            .collect()
    }
}

impl Default for ListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ListStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.inner.tables.borrow();
        f.debug_struct("ListStore")
            .field("lists", &tables.lists.len())
            .field("items", &tables.items.len())
            .field("subscribers", &self.inner.observers.len())
            .finish()
    }
}
