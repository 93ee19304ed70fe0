//! Distinct-color extraction, used to seed a palette from an image.

use image::{RgbImage, RgbaImage};
use palette_swap_core::color::{srgb_to_oklab, srgb_to_oklch, OkLch, Rgb8, Srgb};
use std::collections::BTreeSet;

/// Distinct pixel colors of `image`, darkest first.
///
/// Colors are ordered by OKLab lightness, with ties broken by byte value,
/// so a generated lightness ramp lands dark-to-dark.
pub fn distinct_colors(image: &RgbImage) -> Vec<Rgb8> {
    by_lightness(image.pixels().map(|px| px.0).collect())
}

/// Like [`distinct_colors`], ignoring alpha.
pub fn distinct_colors_rgba(image: &RgbaImage) -> Vec<Rgb8> {
    by_lightness(
        image
            .pixels()
            .map(|px| {
                let [r, g, b, _] = px.0;
                [r, g, b]
            })
            .collect(),
    )
}

/// The distinct colors of `image` as OKLCh, ready for `Palette::new`.
pub fn palette_from_image(image: &RgbImage) -> Vec<OkLch> {
    to_oklch(distinct_colors(image))
}

/// Like [`palette_from_image`], ignoring alpha.
pub fn palette_from_image_rgba(image: &RgbaImage) -> Vec<OkLch> {
    to_oklch(distinct_colors_rgba(image))
}

fn to_oklch(colors: Vec<Rgb8>) -> Vec<OkLch> {
    colors
        .into_iter()
        .map(|rgb| srgb_to_oklch(Srgb::from_rgb8(rgb)))
        .collect()
}

fn by_lightness(colors: BTreeSet<Rgb8>) -> Vec<Rgb8> {
    let mut keyed: Vec<(f64, Rgb8)> = colors
        .into_iter()
        .map(|rgb| (srgb_to_oklab(Srgb::from_rgb8(rgb)).l, rgb))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    keyed.into_iter().map(|(_, rgb)| rgb).collect()
}
