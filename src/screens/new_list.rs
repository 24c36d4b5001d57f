//! New List Screen
//!
//! Title entry plus the current emoji/color choices. The screen keeps no
//! state of its own: everything lives in the [`CreationSession`] passed in,
//! so the pickers can write to the same draft.

use crate::domain::{DomainResult, ShoppingList};
use crate::palette::Palette;
use crate::session::CreationSession;

/// What the form shows right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListView {
    pub title: String,
    /// Draft emoji, or the placeholder when none was picked
    pub emoji: String,
    /// Draft color, or the placeholder when none was picked
    pub color: String,
    pub can_create: bool,
}

pub struct NewListScreen {
    placeholder_emoji: String,
    placeholder_color: String,
}

impl NewListScreen {
    pub fn new(palette: &Palette) -> Self {
        Self {
            placeholder_emoji: palette.emojis.first().cloned().unwrap_or_default(),
            placeholder_color: palette.colors.first().cloned().unwrap_or_default(),
        }
    }

    /// Start a fresh flow
    pub fn enter(&self, session: &mut CreationSession) {
        session.reset();
    }

    pub fn view(&self, session: &CreationSession) -> NewListView {
        let draft = session.draft();
        NewListView {
            title: draft.title.clone(),
            emoji: draft.emoji.clone().unwrap_or_else(|| self.placeholder_emoji.clone()),
            color: draft.color.clone().unwrap_or_else(|| self.placeholder_color.clone()),
            can_create: !draft.title.trim().is_empty(),
        }
    }

    pub fn set_title(&self, session: &mut CreationSession, text: &str) {
        session.set_title(text);
    }

    /// Commit the draft. On failure the draft stays for another try.
    pub fn create(&self, session: &mut CreationSession) -> DomainResult<ShoppingList> {
        session.commit()
    }

    pub fn cancel(&self, session: &mut CreationSession) {
        log::debug!("New list flow cancelled");
        session.reset();
    }
}
