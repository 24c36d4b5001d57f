//! List Creation Session
//!
//! Holds the single in-flight draft shared by the new-list form and the
//! emoji/color pickers. Screens get the session by `&mut` reference; the
//! draft only reaches the store on [`CreationSession::commit`].
//!
//! States: `Empty -> Drafting` on any setter, `Drafting -> Committing` on
//! commit, then `Empty` on success or back to `Drafting` (draft kept) on
//! failure.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult, ShoppingList};
use crate::store::ListStore;

/// Fields gathered before the list exists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationDraft {
    pub title: String,
    pub emoji: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Empty,
    Drafting,
    Committing,
}

pub struct CreationSession {
    store: ListStore,
    draft: CreationDraft,
    state: SessionState,
}

impl CreationSession {
    pub fn new(store: ListStore) -> Self {
        Self {
            store,
            draft: CreationDraft::default(),
            state: SessionState::Empty,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn draft(&self) -> &CreationDraft {
        &self.draft
    }

    pub fn set_title(&mut self, text: impl Into<String>) {
        self.draft.title = text.into();
        self.state = SessionState::Drafting;
    }

    pub fn set_emoji(&mut self, glyph: impl Into<String>) {
        self.draft.emoji = Some(glyph.into());
        self.state = SessionState::Drafting;
    }

    pub fn set_color(&mut self, token: impl Into<String>) {
        self.draft.color = Some(token.into());
        self.state = SessionState::Drafting;
    }

    /// Clear the draft. Called on flow entry and on cancel.
    pub fn reset(&mut self) {
        self.draft = CreationDraft::default();
        self.state = SessionState::Empty;
    }

    /// Create the list from the draft and reset.
    ///
    /// On failure the draft is left as it was so the user can fix it.
    pub fn commit(&mut self) -> DomainResult<ShoppingList> {
        if self.state == SessionState::Empty {
            return Err(DomainError::Validation("title must not be empty".to_string()));
        }

        self.state = SessionState::Committing;
        let CreationDraft { title, emoji, color } = self.draft.clone();

        match self.store.create_list(title, emoji, color) {
            Ok(list) => {
                log::info!("Committed new list {} ({:?})", list.id, list.title);
                self.reset();
                Ok(list)
            }
            Err(e) => {
                self.state = SessionState::Drafting;
                Err(e)
            }
        }
    }
}
