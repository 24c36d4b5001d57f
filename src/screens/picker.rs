//! Emoji and color pickers
//!
//! Grid of choices; selecting one writes it into the creation draft.

use crate::domain::{DomainError, DomainResult};
use crate::palette::Palette;
use crate::session::CreationSession;

/// Cells per grid row
pub const PICKER_COLUMNS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Emoji,
    Color,
}

impl PickerKind {
    pub fn title(&self) -> &'static str {
        match self {
            PickerKind::Emoji => "Choose an emoji",
            PickerKind::Color => "Choose a color",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Picker {
    kind: PickerKind,
    choices: Vec<String>,
}

impl Picker {
    pub fn emoji(palette: &Palette) -> Self {
        Self {
            kind: PickerKind::Emoji,
            choices: palette.emojis.clone(),
        }
    }

    pub fn color(palette: &Palette) -> Self {
        Self {
            kind: PickerKind::Color,
            choices: palette.colors.clone(),
        }
    }

    pub fn kind(&self) -> PickerKind {
        self.kind
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Choices laid out in rows of [`PICKER_COLUMNS`]
    pub fn grid(&self) -> Vec<&[String]> {
        self.choices.chunks(PICKER_COLUMNS).collect()
    }

    /// Write the choice at `index` into the draft and return it
    pub fn select<'a>(&'a self, session: &mut CreationSession, index: usize) -> DomainResult<&'a str> {
        let choice = self.choices.get(index).ok_or_else(|| {
            DomainError::Validation(format!("No {:?} choice at index {}", self.kind, index))
        })?;

        match self.kind {
            PickerKind::Emoji => session.set_emoji(choice.as_str()),
            PickerKind::Color => session.set_color(choice.as_str()),
        }
        Ok(choice)
    }
}
