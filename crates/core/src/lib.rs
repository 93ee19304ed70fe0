#![deny(unsafe_code)]
//! Core types for the palette-swap color engine.
//!
//! Provides color types (`Srgb`, `LinearRgb`, `OkLab`, `OkLch`) with the
//! conversions between them, `ChannelRange` bounds, the editable `Palette`
//! and its generators, `PaletteSettings`, and the `Xorshift64` PRNG that
//! every randomized operation draws from.

pub mod channel_range;
pub mod color;
pub mod error;
pub mod palette;
pub mod prng;
pub mod settings;

pub use channel_range::ChannelRange;
pub use color::{LinearRgb, OkLab, OkLch, Rgb8, Srgb};
pub use error::PaletteError;
pub use palette::{parse_hex_list, Palette};
pub use prng::Xorshift64;
pub use settings::PaletteSettings;
