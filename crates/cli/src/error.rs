//! Errors surfaced by the `palette-swap` binary.
//!
//! Every variant owns an exit code so scripts can tell an image that does
//! not fit its palette apart from a bad argument or an unreadable file:
//!
//! | code | meaning |
//! |------|---------|
//! | 2    | usage error (reported by clap before `run`) |
//! | 10   | palette rejected an operation |
//! | 11   | image or config file could not be read or written |
//! | 12   | malformed `--palette`, `--original`, or `--config` |
//! | 13   | JSON output could not be encoded |
//! | 14   | a pixel matched no color of the original palette |

use palette_swap_core::{PaletteError, Srgb};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Palette(PaletteError),

    #[error("{0}")]
    Io(String),

    #[error("{0}")]
    Input(String),

    #[error("failed to encode JSON output: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("pixel ({x},{y}) has color {color}, which is not in the original palette")]
    UnmatchedPixel { x: u32, y: u32, color: String },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Palette(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
            CliError::UnmatchedPixel { .. } => 14,
        }
    }

    /// Maps a parse or validation failure of the argument `flag` to an
    /// input error. File access failures stay I/O errors.
    pub fn input(flag: &'static str) -> impl Fn(PaletteError) -> CliError {
        move |e| match e {
            PaletteError::Io(msg) => CliError::Io(msg),
            other => CliError::Input(format!("invalid {flag}: {other}")),
        }
    }

    /// Machine-readable report for `--json` mode.
    pub fn to_json(&self) -> Value {
        let mut report = json!({
            "error": self.to_string(),
            "exit_code": self.exit_code(),
        });
        if let CliError::UnmatchedPixel { x, y, color } = self {
            report["pixel"] = json!({ "x": x, "y": y, "color": color });
        }
        report
    }
}

impl From<PaletteError> for CliError {
    fn from(e: PaletteError) -> Self {
        match e {
            PaletteError::Io(msg) => CliError::Io(msg),
            PaletteError::UnmatchedPixel { x, y, r, g, b } => CliError::UnmatchedPixel {
                x,
                y,
                color: Srgb::from_rgb8([r, g, b]).to_hex(),
            },
            other => CliError::Palette(other),
        }
    }
}
