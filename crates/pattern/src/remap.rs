//! Recolors an image by pairing original palette entries with new ones.
//!
//! Matching is exact up to [`MATCH_TOLERANCE`] per sRGB channel. A pixel
//! that matches no original entry is an error; there is no nearest-color
//! fallback.

use image::{RgbImage, RgbaImage};
use palette_swap_core::color::{
    oklab_to_srgb, oklch_to_oklab, oklch_to_srgb_gamut_safe, OkLch, Rgb8, Srgb,
};
use palette_swap_core::{Palette, PaletteError};

/// Largest per-channel difference (in [0, 1] sRGB units) accepted as a match.
pub const MATCH_TOLERANCE: f64 = 0.01;

/// Pairing of original-palette reference colors with new output bytes.
///
/// Built once per remap and discarded afterwards.
#[derive(Debug, Clone)]
pub struct Remapper {
    keys: Vec<Srgb>,
    targets: Vec<Rgb8>,
}

impl Remapper {
    /// Builds the pairing.
    ///
    /// Each original color's key is its plain sRGB conversion, clamped per
    /// channel to [0, 1] with no chroma reduction. Each new color's output
    /// is the gamut-safe byte conversion.
    pub fn new(original: &[OkLch], new: &[OkLch]) -> Result<Self, PaletteError> {
        if original.len() != new.len() {
            return Err(PaletteError::PaletteLengthMismatch {
                original: original.len(),
                new: new.len(),
            });
        }
        let keys = original
            .iter()
            .map(|&c| oklab_to_srgb(oklch_to_oklab(c)))
            .collect();
        let targets = new
            .iter()
            .map(|&c| oklch_to_srgb_gamut_safe(c).to_rgb8())
            .collect();
        Ok(Self { keys, targets })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Index of the first original entry within tolerance of `rgb`.
    pub fn find(&self, rgb: Rgb8) -> Option<usize> {
        let px = Srgb::from_rgb8(rgb);
        self.keys.iter().position(|k| {
            (k.r - px.r).abs() <= MATCH_TOLERANCE
                && (k.g - px.g).abs() <= MATCH_TOLERANCE
                && (k.b - px.b).abs() <= MATCH_TOLERANCE
        })
    }

    /// The new color paired with the original entry `rgb` matches.
    pub fn remap(&self, rgb: Rgb8) -> Option<Rgb8> {
        self.find(rgb).map(|i| self.targets[i])
    }

    fn remap_at(&self, x: u32, y: u32, rgb: Rgb8) -> Result<Rgb8, PaletteError> {
        self.remap(rgb).ok_or(PaletteError::UnmatchedPixel {
            x,
            y,
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
        })
    }
}

/// Returns a recolored copy of `image`.
///
/// Every pixel must match an entry of `original`; the first pixel that does
/// not yields [`PaletteError::UnmatchedPixel`]. The input is not modified.
pub fn apply_pattern(
    image: &RgbImage,
    original: &[OkLch],
    new: &[OkLch],
) -> Result<RgbImage, PaletteError> {
    let remapper = Remapper::new(original, new)?;
    let mut out = image.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        px.0 = remapper.remap_at(x, y, px.0)?;
    }
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        colors = remapper.len(),
        "Remapped RGB image"
    );
    Ok(out)
}

/// RGBA variant of [`apply_pattern`]. Alpha is copied through and ignored
/// when matching.
pub fn apply_pattern_rgba(
    image: &RgbaImage,
    original: &[OkLch],
    new: &[OkLch],
) -> Result<RgbaImage, PaletteError> {
    let remapper = Remapper::new(original, new)?;
    let mut out = image.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        let [r, g, b, a] = px.0;
        let [r, g, b] = remapper.remap_at(x, y, [r, g, b])?;
        px.0 = [r, g, b, a];
    }
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        colors = remapper.len(),
        "Remapped RGBA image"
    );
    Ok(out)
}

/// Recolors `image` from the palette's original colors to its current ones.
pub fn apply_palette(image: &RgbImage, palette: &Palette) -> Result<RgbImage, PaletteError> {
    apply_pattern(image, palette.original(), palette.colors())
}
