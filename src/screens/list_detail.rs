//! List Detail Screen
//!
//! One list and its items. Item changes arrive through the list's item
//! stream; list fields are re-read from the store on refresh.

use crate::domain::{
    DomainError, DomainResult, ItemId, ListId, ListPatch, ListProgress, ShoppingItem, ShoppingList,
};
use crate::store::{ListStore, Snapshots};

pub struct ListDetailScreen {
    store: ListStore,
    list_id: ListId,
    list: Option<ShoppingList>,
    stream: Snapshots<Vec<ShoppingItem>>,
    items: Vec<ShoppingItem>,
}

impl ListDetailScreen {
    /// Open the screen for `list_id`; `NotFound` if the list does not exist
    pub fn open(store: ListStore, list_id: ListId) -> DomainResult<Self> {
        let list = store
            .get_list(list_id)
            .ok_or_else(|| DomainError::NotFound(format!("List {} not found", list_id)))?;

        let mut stream = store.subscribe_items(list_id);
        let items = stream.latest().unwrap_or_default();
        Ok(Self {
            store,
            list_id,
            list: Some(list),
            stream,
            items,
        })
    }

    pub fn refresh(&mut self) {
        if let Some(items) = self.stream.latest() {
            self.items = items;
        }
        self.list = self.store.get_list(self.list_id);
    }

    pub fn list_id(&self) -> ListId {
        self.list_id
    }

    /// `None` once the list was deleted elsewhere
    pub fn list(&self) -> Option<&ShoppingList> {
        self.list.as_ref()
    }

    /// The list was deleted; the shell should navigate back
    pub fn is_gone(&self) -> bool {
        self.list.is_none()
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn progress(&self) -> ListProgress {
        ListProgress {
            total: self.items.len(),
            completed: self.items.iter().filter(|item| item.completed).count(),
        }
    }

    pub fn add_item(&mut self, name: &str) -> DomainResult<ShoppingItem> {
        let item = self.store.add_item(self.list_id, name.trim())?;
        self.refresh();
        Ok(item)
    }

    pub fn toggle_item(&mut self, id: ItemId) -> DomainResult<ShoppingItem> {
        let item = self.store.toggle_item(id)?;
        self.refresh();
        Ok(item)
    }

    pub fn rename_item(&mut self, id: ItemId, name: &str) -> DomainResult<ShoppingItem> {
        let item = self.store.rename_item(id, name.trim())?;
        self.refresh();
        Ok(item)
    }

    pub fn delete_item(&mut self, id: ItemId) -> bool {
        let removed = self.store.delete_item(id);
        self.refresh();
        removed
    }

    /// Rename, re-emoji or recolor the list. An empty patch writes nothing.
    pub fn update_list(&mut self, patch: ListPatch) -> DomainResult<ShoppingList> {
        if patch.is_empty() {
            return self
                .store
                .get_list(self.list_id)
                .ok_or_else(|| DomainError::NotFound(format!("List {} not found", self.list_id)));
        }
        let list = self.store.update_list(self.list_id, patch)?;
        self.refresh();
        Ok(list)
    }
}
