//! Shopping List Entity
//!
//! A named list with an optional emoji and background color.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{validate_text, DomainResult, Entity};

/// Unique identifier of a shopping list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(Uuid);

impl ListId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    /// Unique identifier
    pub id: ListId,
    /// Display title, never empty
    pub title: String,
    /// Optional glyph shown next to the title
    pub emoji: Option<String>,
    /// Optional background color token (e.g. "#FFAA00")
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShoppingList {
    /// Create a new list stamped with `now`
    pub fn new(title: String, emoji: Option<String>, color: Option<String>, now: DateTime<Utc>) -> DomainResult<Self> {
        validate_text("title", &title)?;
        Ok(Self {
            id: ListId::new(),
            title,
            emoji,
            color,
            created_at: now,
            updated_at: now,
        })
    }

    /// Return a copy with `patch` applied, leaving `self` untouched
    pub fn patched(&self, patch: &ListPatch, now: DateTime<Utc>) -> DomainResult<Self> {
        if let Some(title) = &patch.title {
            validate_text("title", title)?;
        }

        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(emoji) = &patch.emoji {
            next.emoji = emoji.clone();
        }
        if let Some(color) = &patch.color {
            next.color = color.clone();
        }
        next.updated_at = now;
        Ok(next)
    }
}

impl Entity for ShoppingList {
    type Id = ListId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Partial update of a list.
///
/// `None` leaves a field alone; for the optional fields `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPatch {
    pub title: Option<String>,
    pub emoji: Option<Option<String>>,
    pub color: Option<Option<String>>,
}

impl ListPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_emoji(mut self, emoji: Option<String>) -> Self {
        self.emoji = Some(emoji);
        self
    }

    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = Some(color);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.emoji.is_none() && self.color.is_none()
    }
}

/// Sort order for list snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
    /// Oldest first
    #[default]
    CreatedAsc,
    /// Newest first
    CreatedDesc,
    /// Case-insensitive by title, oldest first on ties
    TitleAsc,
}

impl ListOrder {
    /// Sort `lists` in place. Expects them in insertion order, which breaks ties.
    pub fn sort(&self, lists: &mut [ShoppingList]) {
        match self {
            ListOrder::CreatedAsc => lists.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            ListOrder::CreatedDesc => {
                lists.reverse();
                lists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            ListOrder::TitleAsc => {
                lists.sort_by(|a, b| {
                    a.title
                        .to_lowercase()
                        .cmp(&b.title.to_lowercase())
                        .then(a.created_at.cmp(&b.created_at))
                })
            }
        }
    }
}

/// Completion counts of one list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListProgress {
    pub total: usize,
    pub completed: usize,
}

impl ListProgress {
    pub fn remaining(&self) -> usize {
        self.total - self.completed
    }

    /// True once the list has items and every one is checked off
    pub fn is_done(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// A list together with its completion counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    pub list: ShoppingList,
    pub progress: ListProgress,
}
