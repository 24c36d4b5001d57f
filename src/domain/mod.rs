//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! No storage or UI concerns live here.

mod entity;
mod shopping_item;
mod shopping_list;

pub use entity::{validate_text, DomainError, DomainResult, Entity};
pub use shopping_item::{ItemId, ShoppingItem};
pub use shopping_list::{ListId, ListOrder, ListPatch, ListProgress, ListSummary, ShoppingList};
