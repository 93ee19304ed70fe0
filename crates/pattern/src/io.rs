//! PNG load and save.
//!
//! Feature-gated behind `png` (default on) so the remapping code can be
//! used on in-memory buffers without pulling in an image codec.

use image::RgbaImage;
use palette_swap_core::PaletteError;
use std::path::Path;

/// Decodes the image at `path` into 8-bit RGBA.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, PaletteError> {
    let img = image::open(path)
        .map_err(|e| PaletteError::Io(format!("{}: {e}", path.display())))?
        .to_rgba8();
    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "Loaded image"
    );
    Ok(img)
}

/// Writes `image` to `path`. The format follows the file extension.
pub fn save_rgba(image: &RgbaImage, path: &Path) -> Result<(), PaletteError> {
    image
        .save(path)
        .map_err(|e| PaletteError::Io(format!("{}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "Saved image");
    Ok(())
}
