//! Shopping Item Entity
//!
//! A single product entry, always owned by exactly one list.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{validate_text, DomainResult, Entity};
use super::shopping_list::ListId;

/// Unique identifier of a shopping item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: ItemId,
    /// Owning list
    pub list_id: ListId,
    pub name: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl ShoppingItem {
    pub fn new(list_id: ListId, name: String, now: DateTime<Utc>) -> DomainResult<Self> {
        validate_text("name", &name)?;
        Ok(Self {
            id: ItemId::new(),
            list_id,
            name,
            completed: false,
            created_at: now,
        })
    }

    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    pub fn renamed(&self, name: String) -> DomainResult<Self> {
        validate_text("name", &name)?;
        Ok(Self {
            name,
            ..self.clone()
        })
    }
}

impl Entity for ShoppingItem {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
