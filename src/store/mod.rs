//! List Store
//!
//! In-memory reactive table of shopping lists and their items, split into:
//! - list_store: the store handle, list CRUD and read views
//! - item_ops: item CRUD scoped to an existing list
//! - observer: push-based publish/subscribe of [`StoreEvent`]s
//! - snapshots: lazy snapshot streams built on the observer interface
//! - persistence: JSON export/import of the whole table
//!
//! The store runs on a single logical thread. Every successful mutation
//! publishes exactly one event, and all interested subscribers have been
//! called by the time the mutating method returns.

mod item_ops;
mod list_store;
mod observer;
mod persistence;
mod snapshots;

#[cfg(test)]
mod tests;

pub use list_store::ListStore;
pub use observer::{StoreEvent, SubscriptionId};
pub use snapshots::Snapshots;
