//! Error types for palette-swap.

use thiserror::Error;

/// Errors produced by palette construction, editing, and image remapping.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// A palette could not be constructed from the given arguments.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A channel range had `max <= min`, a non-positive step, or non-finite bounds.
    #[error("invalid channel range: {0}")]
    InvalidRange(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette index was past the end of the palette.
    #[error("index {index} out of bounds for palette of {len} colors")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The original and replacement palettes passed to a remap differ in size.
    #[error("palette length mismatch: original has {original} colors, new has {new}")]
    PaletteLengthMismatch { original: usize, new: usize },

    /// An image pixel matched no entry of the original palette.
    #[error("pixel ({x},{y}) with RGB=({r},{g},{b}) does not match any color in the original palette")]
    UnmatchedPixel {
        x: u32,
        y: u32,
        r: u8,
        g: u8,
        b: u8,
    },

    /// Reading or writing an image or settings file failed.
    #[error("i/o error: {0}")]
    Io(String),
}
