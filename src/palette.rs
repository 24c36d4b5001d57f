//! Picker choices for list emojis and background colors

use serde::{Deserialize, Serialize};

pub const DEFAULT_EMOJIS: &[&str] = &[
    "🛒", "🍎", "🥦", "🥩", "🧀", "🥖", "🍝", "🍕", "🍰", "☕", "🍷", "🧃", "🧴", "🧻", "🧼",
    "💊", "🐶", "🐱", "👶", "🎁", "🎉", "🏕️", "🔧", "🪴", "📚",
];

pub const DEFAULT_COLORS: &[&str] = &[
    "#FF3B30", "#FF9500", "#FFCC00", "#FFAA00", "#34C759", "#00C7BE", "#30B0C7", "#32ADE6",
    "#007AFF", "#5856D6", "#AF52DE", "#FF2D55", "#A2845E", "#8E8E93", "#1C1C1E",
];

/// Choices offered by the emoji and color pickers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub emojis: Vec<String>,
    pub colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            emojis: DEFAULT_EMOJIS.iter().map(|s| s.to_string()).collect(),
            colors: DEFAULT_COLORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
