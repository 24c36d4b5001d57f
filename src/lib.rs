//! Shopping Lists Core
//!
//! Layered architecture:
//! - domain: entities, ids and errors
//! - store: reactive in-memory list/item store
//! - session: multi-screen list creation draft
//! - auth: identity provider boundary
//! - screens: headless view models for each screen
//! - context: wires config, store and session together

pub mod auth;
pub mod config;
pub mod context;
pub mod domain;
pub mod palette;
pub mod screens;
pub mod session;
pub mod store;

pub use config::AppConfig;
pub use context::{AppContext, BootstrapError};
pub use domain::{
    DomainError, DomainResult, ItemId, ListId, ListOrder, ListPatch, ListProgress, ListSummary,
    ShoppingItem, ShoppingList,
};
pub use session::{CreationDraft, CreationSession, SessionState};
pub use store::{ListStore, Snapshots, StoreEvent, SubscriptionId};
