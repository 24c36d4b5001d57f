//! List Overview Screen
//!
//! All lists with their completion counts, kept current through a
//! summaries stream.

use crate::domain::{ListId, ListOrder, ListSummary};
use crate::store::{ListStore, Snapshots};

pub struct ListOverviewScreen {
    store: ListStore,
    summaries: Snapshots<Vec<ListSummary>>,
    rows: Vec<ListSummary>,
}

impl ListOverviewScreen {
    pub fn new(store: ListStore, order: ListOrder) -> Self {
        let mut summaries = store.subscribe_summaries(order);
        let rows = summaries.latest().unwrap_or_default();
        Self { store, summaries, rows }
    }

    /// Pull pending snapshots. Returns `true` if the rows changed.
    pub fn refresh(&mut self) -> bool {
        match self.summaries.latest() {
            Some(rows) => {
                self.rows = rows;
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> &[ListSummary] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Swipe-to-delete
    pub fn delete_list(&mut self, id: ListId) -> bool {
        let removed = self.store.delete_list(id);
        self.refresh();
        removed
    }
}
