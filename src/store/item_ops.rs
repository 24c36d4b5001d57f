//! Item Operations
//!
//! Item CRUD. Items can only be created inside an existing list.

use super::list_store::ListStore;
use super::observer::StoreEvent;
use crate::domain::{DomainError, DomainResult, ItemId, ListId, ShoppingItem};

impl ListStore {
    /// Add an item to a list.
    ///
    /// Fails with `NotFound` for an unknown list and `Validation` on an empty
    /// name; neither failure publishes anything.
    pub fn add_item(&self, list_id: ListId, name: impl Into<String>) -> DomainResult<ShoppingItem> {
        if !self.contains_list(list_id) {
            log::warn!("Rejected item for unknown list {}", list_id);
            return Err(DomainError::NotFound(format!("List {} not found", list_id)));
        }
        let item = ShoppingItem::new(list_id, name.into(), self.now())?;

        self.inner.tables.borrow_mut().items.push(item.clone());
        log::debug!("Added item {} to list {}", item.id, list_id);

        self.publish(StoreEvent::ItemAdded { list_id, item_id: item.id });
        Ok(item)
    }

    /// Flip the completed flag
    pub fn toggle_item(&self, id: ItemId) -> DomainResult<ShoppingItem> {
        self.replace_item(id, |item| Ok(item.toggled()))
    }

    pub fn rename_item(&self, id: ItemId, name: impl Into<String>) -> DomainResult<ShoppingItem> {
        let name = name.into();
        self.replace_item(id, move |item| item.renamed(name))
    }

    /// Delete an item. Unknown ids are ignored and return `false`.
    pub fn delete_item(&self, id: ItemId) -> bool {
        let removed = {
            let mut tables = self.inner.tables.borrow_mut();
            let position = tables.items.iter().position(|item| item.id == id);
            position.map(|index| tables.items.remove(index))
        };

        match removed {
            Some(item) => {
                log::debug!("Deleted item {} from list {}", id, item.list_id);
                self.publish(StoreEvent::ItemDeleted { list_id: item.list_id, item_id: id });
                true
            }
            None => false,
        }
    }

    pub fn get_item(&self, id: ItemId) -> Option<ShoppingItem> {
        self.inner.tables.borrow().items.iter().find(|item| item.id == id).cloned()
    }

    /// Items of one list, oldest first. Empty for an unknown list.
    pub fn items(&self, list_id: ListId) -> Vec<ShoppingItem> {
        let mut items: Vec<ShoppingItem> = self
            .inner
            .tables
            .borrow()
            .items
            .iter()
            .filter(|item| item.list_id == list_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        items
    }

    fn replace_item<F>(&self, id: ItemId, change: F) -> DomainResult<ShoppingItem>
    where
        F: FnOnce(&ShoppingItem) -> DomainResult<ShoppingItem>,
    {
        let updated = {
            let mut tables = self.inner.tables.borrow_mut();
            let slot = tables
                .items
                .iter_mut()
                .find(|item| item.id == id)
                .ok_or_else(|| DomainError::NotFound(format!("Item {} not found", id)))?;

            let updated = change(slot)?;
            *slot = updated.clone();
            updated
        };
        log::debug!("Updated item {}", id);

        self.publish(StoreEvent::ItemUpdated { list_id: updated.list_id, item_id: id });
        Ok(updated)
    }
}
