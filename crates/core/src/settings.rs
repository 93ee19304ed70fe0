//! Palette editing settings: channel ranges and the hue-mode bound.
//!
//! Settings load from JSON. Missing fields fall back to the defaults below,
//! which match a general-purpose editor: full lightness, chroma up to 0.47,
//! the whole hue circle, and at most four hue modes per generation pass.

use crate::channel_range::ChannelRange;
use crate::error::PaletteError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Channel ranges (L, C, H) and the maximum number of hue modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    pub lightness: ChannelRange,
    pub chroma: ChannelRange,
    pub hue: ChannelRange,
    pub mode_quantity: usize,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            lightness: ChannelRange::new(0.0, 1.0, 0.01).expect("lightness range is valid"),
            chroma: ChannelRange::new(0.0, 0.47, 0.01).expect("chroma range is valid"),
            hue: ChannelRange::new(0.0, 360.0, 1.0).expect("hue range is valid"),
            mode_quantity: 4,
        }
    }
}

impl PaletteSettings {
    /// Parses settings from a JSON string and validates them.
    pub fn from_json(json: &str) -> Result<Self, PaletteError> {
        let settings: PaletteSettings = serde_json::from_str(json)
            .map_err(|e| PaletteError::InvalidPalette(format!("invalid settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and parses a JSON settings file.
    pub fn load(path: &Path) -> Result<Self, PaletteError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| PaletteError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Checks that `mode_quantity >= 1`. Ranges validate themselves on construction.
    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.mode_quantity == 0 {
            return Err(PaletteError::InvalidPalette(
                "mode_quantity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The ranges in L, C, H order.
    pub fn ranges(&self) -> [ChannelRange; 3] {
        [self.lightness, self.chroma, self.hue]
    }
}
