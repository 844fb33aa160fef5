//! Category catalog model
//!
//! A category pairs a name with the display color every expense in that
//! category carries. New installs start from a preset list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories a fresh catalog starts with
pub const PRESET_CATEGORIES: [(&str, &str); 8] = [
    ("Food & Dining", "#ef4444"),
    ("Transportation", "#3b82f6"),
    ("Shopping", "#8b5cf6"),
    ("Housing", "#f59e0b"),
    ("Entertainment", "#10b981"),
    ("Healthcare", "#f97316"),
    ("Utilities", "#84cc16"),
    ("Other", "#6b7280"),
];

/// Suggested colors for custom categories
pub const COLOR_PALETTE: [&str; 18] = [
    "#ef4444", "#f97316", "#f59e0b", "#eab308", "#84cc16", "#22c55e", "#10b981", "#14b8a6",
    "#06b6d4", "#0ea5e9", "#3b82f6", "#6366f1", "#8b5cf6", "#a855f7", "#d946ef", "#ec4899",
    "#f43f5e", "#6b7280",
];

const MAX_NAME_LENGTH: usize = 50;

/// A named category with its display color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category name, matched exactly against expense categories
    pub name: String,

    /// Hex color, `#rrggbb` or `#rgb`
    pub color: String,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }

    /// The preset catalog
    pub fn presets() -> Vec<Self> {
        PRESET_CATEGORIES
            .iter()
            .map(|(name, color)| Self::new(*name, *color))
            .collect()
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(CategoryValidationError::NameTooLong(name.chars().count()));
        }

        if !is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.color)
    }
}

/// Whether `s` is a `#rgb` or `#rrggbb` color
pub fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} characters, max {})",
                len, MAX_NAME_LENGTH
            ),
            Self::InvalidColor(color) => write!(
                f,
                "Invalid color '{}'; use a hex color such as #3b82f6",
                color
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
