use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A named, ordered list of colors with its creation time.
///
/// The stored form keeps colors as `#RRGGBB` strings, so the library file
/// stays hand-editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub colors: Vec<Color>,
    pub created_at: DateTime<Utc>,
}

impl Palette {
    /// Create a palette stamped with the current time.
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> Self {
        Self {
            name: name.into(),
            colors,
            created_at: Utc::now(),
        }
    }

    /// Export as plain text: one uppercase `#RRGGBB` per line, palette order
    /// preserved, trailing newline.
    pub fn export_hex(&self) -> String {
        let mut out = String::new();
        for color in &self.colors {
            out.push_str(&color.format_hex());
            out.push('\n');
        }
        out
    }
}
