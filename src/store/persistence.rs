//! JSON export/import of the full table.
//!
//! Import checks every invariant a live store maintains before accepting the
//! data: non-empty text, unique ids, no item pointing at a missing list.

use std::collections::HashSet;
use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::list_store::{ListStore, Tables};
use crate::domain::{validate_text, DomainError, DomainResult, Entity, ShoppingItem, ShoppingList};

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    lists: Vec<ShoppingList>,
    items: Vec<ShoppingItem>,
}

impl ListStore {
    pub fn to_json(&self) -> DomainResult<String> {
        let tables = self.inner.tables.borrow();
        let document = StoreDocument {
            version: FORMAT_VERSION,
            lists: tables.lists.clone(),
            items: tables.items.clone(),
        };
        serde_json::to_string_pretty(&document).map_err(|e| DomainError::Internal(e.to_string()))
    }

    /// Build a new store from JSON produced by [`ListStore::to_json`]
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let document: StoreDocument = serde_json::from_str(json)
            .map_err(|e| DomainError::Validation(format!("Malformed store document: {}", e)))?;

        if document.version != FORMAT_VERSION {
            return Err(DomainError::Validation(format!(
                "Unsupported store document version {}",
                document.version
            )));
        }
        check_integrity(&document)?;

        log::info!(
            "Loaded store with {} lists and {} items",
            document.lists.len(),
            document.items.len()
        );
        Ok(Self::from_tables(
            Tables {
                lists: document.lists,
                items: document.items,
            },
            Box::new(Utc::now),
        ))
    }
}

fn check_integrity(document: &StoreDocument) -> DomainResult<()> {
    for list in &document.lists {
        validate_text("title", &list.title)?;
    }
    for item in &document.items {
        validate_text("name", &item.name)?;
    }

    let list_ids = unique_ids(&document.lists)?;
    unique_ids(&document.items)?;

    if let Some(orphan) = document.items.iter().find(|item| !list_ids.contains(&item.list_id)) {
        return Err(DomainError::Validation(format!(
            "Item {} references missing list {}",
            orphan.id, orphan.list_id
        )));
    }
    Ok(())
}

/// Collect ids, failing on the first duplicate
fn unique_ids<T: Entity>(rows: &[T]) -> DomainResult<HashSet<T::Id>>
where
    T::Id: fmt::Display,
{
    let mut ids = HashSet::with_capacity(rows.len());
    for row in rows {
        if !ids.insert(row.id()) {
            return Err(DomainError::Validation(format!("Duplicate id {}", row.id())));
        }
    }
    Ok(ids)
}
