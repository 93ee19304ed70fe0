#![deny(unsafe_code)]
//! Applies palettes to images.
//!
//! An image whose every pixel is one of a palette's original colors can be
//! recolored by pairing each original color with the palette's current
//! color at the same index. This crate sits between `palette-swap-core`
//! (pure color math and palette editing) and the CLI, and owns everything
//! that touches pixel buffers.

pub mod extract;
pub mod remap;

#[cfg(feature = "png")]
pub mod io;

pub use extract::{
    distinct_colors, distinct_colors_rgba, palette_from_image, palette_from_image_rgba,
};
pub use remap::{apply_palette, apply_pattern, apply_pattern_rgba, Remapper, MATCH_TOLERANCE};
