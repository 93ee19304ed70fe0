//! Color types and conversion functions for palette-swap.
//!
//! Provides four color types (`Srgb`, `LinearRgb`, `OkLab`, `OkLch`) plus the
//! byte triple [`Rgb8`], and pure conversion functions between them. Every
//! conversion is total: out-of-range inputs propagate geometrically instead
//! of being rejected. Uses `f64` throughout.
//!
//! Palettes are stored in OKLCh. Colors leave OKLCh either through the plain
//! clamped path ([`oklch_to_srgb`]) or the gamut-safe path
//! ([`oklch_to_srgb_gamut_safe`]), which gives up chroma, never hue or
//! lightness, until the color fits in sRGB.

use crate::error::PaletteError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ceiling applied to chroma when converting OKLab to OKLCh.
///
/// This bounds usable chroma for editing and generation; it is not a gamut
/// limit. Every 8-bit sRGB color sits well below it (the largest is
/// magenta at roughly 0.32).
pub const MAX_CHROMA: f64 = 0.37;

/// Number of bisection steps used by [`oklch_to_srgb_gamut_safe`].
pub const GAMUT_SEARCH_STEPS: usize = 20;

/// Round-off allowance when accepting a requested color as already in gamut.
pub const GAMUT_EPSILON: f64 = 1e-9;

/// An 8-bit sRGB color `[r, g, b]`.
pub type Rgb8 = [u8; 3];

/// sRGB color with components nominally in [0, 1].
///
/// Serializes as a hex string `"#RRGGBB"` for human-readable formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear RGB color (gamma-decoded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// OKLab perceptual color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// OKLCh (cylindrical form of OKLab). Hue is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OkLch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl OkLch {
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }
}

impl Srgb {
    /// Builds a color from 8-bit components, each divided by 255.
    pub fn from_rgb8(rgb: Rgb8) -> Srgb {
        Srgb {
            r: rgb[0] as f64 / 255.0,
            g: rgb[1] as f64 / 255.0,
            b: rgb[2] as f64 / 255.0,
        }
    }

    /// Quantizes to 8-bit: `round(clamp01(c) * 255)` per channel.
    pub fn to_rgb8(self) -> Rgb8 {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b)]
    }

    /// Parses a hex color string like "#FF00AA" or "ff00aa" (case insensitive).
    ///
    /// Returns `PaletteError::InvalidColor` unless exactly six hex digits
    /// remain after stripping an optional leading `'#'`.
    pub fn from_hex(hex: &str) -> Result<Srgb, PaletteError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(PaletteError::InvalidColor(format!(
                "expected 6 hex digits in {hex:?}, got {}",
                digits.chars().count()
            )));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PaletteError::InvalidColor(format!(
                "{hex:?} contains a non-hex character"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| PaletteError::InvalidColor(format!("{hex:?}: {e}")))
        };
        Ok(Srgb::from_rgb8([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }

    /// Converts the color to an uppercase hex string like `"#RRGGBB"`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn to_byte(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Inverse sRGB companding, mirrored for negative inputs.
fn srgb_component_to_linear(c: f64) -> f64 {
    let abs = c.abs();
    if abs <= 0.04045 {
        c / 12.92
    } else {
        ((abs + 0.055) / 1.055).powf(2.4).copysign(c)
    }
}

/// sRGB companding. Non-positive inputs encode to 0.
fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0 {
        0.0
    } else if c < 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts sRGB to linear RGB by applying inverse sRGB gamma.
pub fn srgb_to_linear(c: Srgb) -> LinearRgb {
    LinearRgb {
        r: srgb_component_to_linear(c.r),
        g: srgb_component_to_linear(c.g),
        b: srgb_component_to_linear(c.b),
    }
}

/// Converts linear RGB to sRGB by applying sRGB gamma. Does not clamp above 1.
pub fn linear_to_srgb(c: LinearRgb) -> Srgb {
    Srgb {
        r: linear_component_to_srgb(c.r),
        g: linear_component_to_srgb(c.g),
        b: linear_component_to_srgb(c.b),
    }
}

/// Converts linear RGB to OKLab via the OKLab matrix transform.
pub fn linear_to_oklab(c: LinearRgb) -> OkLab {
    let l_ = 0.4122214708 * c.r + 0.5363325363 * c.g + 0.0514459929 * c.b;
    let m_ = 0.2119034982 * c.r + 0.6806995451 * c.g + 0.1073969566 * c.b;
    let s_ = 0.0883024619 * c.r + 0.2817188376 * c.g + 0.6299787005 * c.b;

    let l_c = l_.cbrt();
    let m_c = m_.cbrt();
    let s_c = s_.cbrt();

    OkLab {
        l: 0.2104542553 * l_c + 0.7936177850 * m_c - 0.0040720468 * s_c,
        a: 1.9779984951 * l_c - 2.4285922050 * m_c + 0.4505937099 * s_c,
        b: 0.0259040371 * l_c + 0.7827717662 * m_c - 0.8086757660 * s_c,
    }
}

/// Converts OKLab to linear RGB via the inverse OKLab matrix transform.
///
/// The result is not clamped; use [`in_gamut`] to test it.
pub fn oklab_to_linear(c: OkLab) -> LinearRgb {
    let l_ = c.l + 0.3963377774 * c.a + 0.2158037573 * c.b;
    let m_ = c.l - 0.1055613458 * c.a - 0.0638541728 * c.b;
    let s_ = c.l - 0.0894841775 * c.a - 1.2914855480 * c.b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    LinearRgb {
        r: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
        g: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
        b: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
    }
}

/// Converts sRGB in [0, 1] to OKLab.
pub fn srgb_to_oklab(c: Srgb) -> OkLab {
    linear_to_oklab(srgb_to_linear(c))
}

/// Converts OKLab to companded sRGB, clamped to [0, 1] per channel.
///
/// This is the plain conversion: out-of-gamut colors are clipped channel
/// by channel, which can shift their hue.
pub fn oklab_to_srgb(c: OkLab) -> Srgb {
    let srgb = linear_to_srgb(oklab_to_linear(c));
    Srgb {
        r: srgb.r.clamp(0.0, 1.0),
        g: srgb.g.clamp(0.0, 1.0),
        b: srgb.b.clamp(0.0, 1.0),
    }
}

/// Converts OKLab to OKLCh (cylindrical form).
///
/// Chroma is capped at [`MAX_CHROMA`]. If chroma is below 1e-10 the hue is
/// set to 0.0 to avoid indeterminate `atan2(0, 0)` results.
pub fn oklab_to_oklch(c: OkLab) -> OkLch {
    let ch = c.a.hypot(c.b);
    let h = if ch < 1e-10 {
        0.0
    } else {
        normalize_hue(c.b.atan2(c.a).to_degrees())
    };
    OkLch {
        l: c.l,
        c: ch.min(MAX_CHROMA),
        h,
    }
}

/// Wraps a hue angle into [0, 360).
pub fn normalize_hue(h: f64) -> f64 {
    let n = h.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if n >= 360.0 {
        0.0
    } else {
        n
    }
}

/// Converts OKLCh to OKLab.
pub fn oklch_to_oklab(c: OkLch) -> OkLab {
    let h_rad = c.h.to_radians();
    OkLab {
        l: c.l,
        a: c.c * h_rad.cos(),
        b: c.c * h_rad.sin(),
    }
}

/// Convenience: sRGB to OKLCh via the chain sRGB -> linear -> OKLab -> OKLCh.
pub fn srgb_to_oklch(c: Srgb) -> OkLch {
    oklab_to_oklch(srgb_to_oklab(c))
}

/// Convenience: OKLCh to sRGB via the chain OKLCh -> OKLab -> sRGB,
/// with output clamped to [0, 1].
pub fn oklch_to_srgb(c: OkLch) -> Srgb {
    oklab_to_srgb(oklch_to_oklab(c))
}

/// Returns true when every linear channel lies in [0, 1].
pub fn in_gamut(c: LinearRgb) -> bool {
    [c.r, c.g, c.b].iter().all(|v| (0.0..=1.0).contains(v))
}

/// Converts OKLCh to sRGB, reducing chroma until the color is in gamut.
///
/// A color already in gamut (within [`GAMUT_EPSILON`] of round-off) is
/// returned at its requested chroma. Otherwise chroma is bisected in
/// `[0, c.c]` for [`GAMUT_SEARCH_STEPS`] iterations, keeping the largest
/// chroma whose linear RGB passed [`in_gamut`]. Lightness and hue are never
/// altered. The result is companded and clamped.
///
/// Near the blue corner of sRGB the gamut is not convex along constant hue
/// and lightness, so a midpoint chroma can fail [`in_gamut`] while the full
/// chroma passes. Bisecting an in-gamut color would therefore move some
/// byte colors (pure blue lands on `(0,49,229)`) and break the
/// hex-to-palette-to-hex round trip; skipping the search for colors that
/// already fit keeps every byte color stable while out-of-gamut colors still
/// get the fixed 20-step search.
pub fn oklch_to_srgb_gamut_safe(c: OkLch) -> Srgb {
    let requested = oklab_to_linear(oklch_to_oklab(c));
    if [requested.r, requested.g, requested.b]
        .iter()
        .all(|v| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(v))
    {
        return oklch_to_srgb(c);
    }

    let mut lo = 0.0;
    let mut hi = c.c;
    for _ in 0..GAMUT_SEARCH_STEPS {
        let mid = (lo + hi) / 2.0;
        let linear = oklab_to_linear(oklch_to_oklab(OkLch { c: mid, ..c }));
        if in_gamut(linear) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    oklch_to_srgb(OkLch { c: lo, ..c })
}

/// OKLab as display percentages: `[L*100, a/0.4*100, b/0.4*100]`.
pub fn oklab_percent(c: OkLab) -> [f64; 3] {
    [c.l * 100.0, c.a / 0.4 * 100.0, c.b / 0.4 * 100.0]
}

/// OKLCh as display percentages: `[L*100, C/0.4*100, H/360*100]`.
pub fn oklch_percent(c: OkLch) -> [f64; 3] {
    [c.l * 100.0, c.c / 0.4 * 100.0, c.h / 360.0 * 100.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn srgb(r: f64, g: f64, b: f64) -> Srgb {
        Srgb { r, g, b }
    }

    // -- Companding --

    #[test]
    fn srgb_to_linear_black_is_zero_and_white_is_one() {
        let black = srgb_to_linear(srgb(0.0, 0.0, 0.0));
        assert!(approx_eq(black.r, 0.0) && approx_eq(black.g, 0.0) && approx_eq(black.b, 0.0));
        let white = srgb_to_linear(srgb(1.0, 1.0, 1.0));
        assert!(approx_eq(white.r, 1.0) && approx_eq(white.g, 1.0) && approx_eq(white.b, 1.0));
    }

    #[test]
    fn srgb_gamma_boundary_at_0_04045() {
        let lin = srgb_to_linear(srgb(0.04045, 0.0, 0.0));
        assert!(approx_eq(lin.r, 0.04045 / 12.92));

        let above = srgb_to_linear(srgb(0.04046, 0.0, 0.0));
        let expected = ((0.04046 + 0.055) / 1.055_f64).powf(2.4);
        assert!(approx_eq(above.r, expected));
    }

    #[test]
    fn inverse_companding_is_sign_symmetric() {
        let pos = srgb_to_linear(srgb(0.5, 0.02, 0.0));
        let neg = srgb_to_linear(srgb(-0.5, -0.02, 0.0));
        assert!(approx_eq(pos.r, -neg.r), "{} vs {}", pos.r, neg.r);
        assert!(approx_eq(pos.g, -neg.g), "{} vs {}", pos.g, neg.g);
    }

    #[test]
    fn companding_maps_non_positive_to_zero() {
        let out = linear_to_srgb(LinearRgb {
            r: -0.2,
            g: 0.0,
            b: 0.001,
        });
        assert_eq!(out.r, 0.0);
        assert_eq!(out.g, 0.0);
        assert!(approx_eq(out.b, 0.001 * 12.92));
    }

    #[test]
    fn linear_to_srgb_boundary_at_0_0031308() {
        let below = linear_to_srgb(LinearRgb {
            r: 0.0031307,
            g: 0.0,
            b: 0.0,
        });
        assert!(approx_eq(below.r, 0.0031307 * 12.92));

        let at = linear_to_srgb(LinearRgb {
            r: 0.0031308,
            g: 0.0,
            b: 0.0,
        });
        let expected = 1.055 * 0.0031308_f64.powf(1.0 / 2.4) - 0.055;
        assert!(approx_eq(at.r, expected));
    }

    // -- OKLab / OKLCh --

    #[test]
    fn white_in_oklab_has_l_near_one_and_zero_chroma() {
        let lab = srgb_to_oklab(srgb(1.0, 1.0, 1.0));
        assert!(approx_eq(lab.l, 1.0), "expected L~1.0, got {}", lab.l);
        assert!(approx_eq(lab.a, 0.0), "expected a~0.0, got {}", lab.a);
        assert!(approx_eq(lab.b, 0.0), "expected b~0.0, got {}", lab.b);
    }

    #[test]
    fn black_in_oklab_has_l_near_zero() {
        let lab = srgb_to_oklab(srgb(0.0, 0.0, 0.0));
        assert!(approx_eq(lab.l, 0.0), "expected L~0.0, got {}", lab.l);
    }

    #[test]
    fn oklab_linear_round_trip_primaries() {
        for (r, g, b) in [(1.0, 0.0, 0.0), (0.0, 1.0, 0.0), (0.0, 0.0, 1.0)] {
            let lin = LinearRgb { r, g, b };
            let back = oklab_to_linear(linear_to_oklab(lin));
            assert!(approx_eq(back.r, r), "r: {} vs {r}", back.r);
            assert!(approx_eq(back.g, g), "g: {} vs {g}", back.g);
            assert!(approx_eq(back.b, b), "b: {} vs {b}", back.b);
        }
    }

    #[test]
    fn oklch_pure_red_has_hue_near_29_degrees() {
        let lch = srgb_to_oklch(srgb(1.0, 0.0, 0.0));
        assert!((lch.h - 29.2).abs() < 1.0, "expected red hue ~29.2, got {}", lch.h);
        assert!((lch.l - 0.628).abs() < 0.01, "expected red L ~0.628, got {}", lch.l);
        assert!(lch.c > 0.2, "expected strong chroma for red, got {}", lch.c);
    }

    #[test]
    fn oklch_pure_green_has_hue_near_142_degrees() {
        let lch = srgb_to_oklch(srgb(0.0, 1.0, 0.0));
        assert!((lch.h - 142.5).abs() < 1.5, "expected green hue ~142.5, got {}", lch.h);
    }

    #[test]
    fn oklch_zero_chroma_sets_hue_to_zero() {
        let lch = oklab_to_oklch(OkLab {
            l: 0.5,
            a: 0.0,
            b: 0.0,
        });
        assert_eq!(lch.h, 0.0, "achromatic color should have hue=0");
        assert!(lch.c < 1e-10);
    }

    #[test]
    fn oklab_to_oklch_caps_chroma() {
        let lch = oklab_to_oklch(OkLab {
            l: 0.5,
            a: 0.5,
            b: 0.0,
        });
        assert_eq!(lch.c, MAX_CHROMA);
        assert!(approx_eq(lch.h, 0.0));
    }

    #[test]
    fn negative_hue_is_normalized() {
        let lch = oklab_to_oklch(OkLab {
            l: 0.5,
            a: 0.0,
            b: -0.1,
        });
        assert!(approx_eq(lch.h, 270.0), "expected 270, got {}", lch.h);
    }

    #[test]
    fn normalize_hue_wraps_into_half_open_circle() {
        assert_eq!(normalize_hue(-1e-17), 0.0);
        assert!(approx_eq(normalize_hue(-90.0), 270.0));
        assert!(approx_eq(normalize_hue(720.0), 0.0));
        assert!(approx_eq(normalize_hue(359.5), 359.5));
    }

    #[test]
    fn oklch_oklab_round_trip() {
        let original = OkLch::new(0.7, 0.15, 250.0);
        let back = oklab_to_oklch(oklch_to_oklab(original));
        assert!(approx_eq(back.l, original.l), "L: {} vs {}", back.l, original.l);
        assert!(approx_eq(back.c, original.c), "C: {} vs {}", back.c, original.c);
        assert!(approx_eq(back.h, original.h), "h: {} vs {}", back.h, original.h);
    }

    #[test]
    fn srgb_oklab_round_trip_known_colors() {
        let colors = [
            srgb(1.0, 0.0, 0.0),
            srgb(0.0, 1.0, 0.0),
            srgb(0.0, 0.0, 1.0),
            srgb(1.0, 1.0, 1.0),
            srgb(0.0, 0.0, 0.0),
            srgb(0.5, 0.3, 0.8),
        ];
        for (i, &color) in colors.iter().enumerate() {
            let back = oklab_to_srgb(srgb_to_oklab(color));
            assert!(approx_eq(back.r, color.r), "color {i}: r={} vs {}", back.r, color.r);
            assert!(approx_eq(back.g, color.g), "color {i}: g={} vs {}", back.g, color.g);
            assert!(approx_eq(back.b, color.b), "color {i}: b={} vs {}", back.b, color.b);
        }
    }

    #[test]
    fn oklch_to_srgb_clamps_out_of_gamut() {
        let srgb = oklch_to_srgb(OkLch::new(0.9, 0.4, 150.0));
        assert!((0.0..=1.0).contains(&srgb.r), "r out of range: {}", srgb.r);
        assert!((0.0..=1.0).contains(&srgb.g), "g out of range: {}", srgb.g);
        assert!((0.0..=1.0).contains(&srgb.b), "b out of range: {}", srgb.b);
    }

    // -- Gamut --

    #[test]
    fn in_gamut_accepts_unit_cube_edges() {
        assert!(in_gamut(LinearRgb {
            r: 0.0,
            g: 1.0,
            b: 0.5
        }));
        assert!(!in_gamut(LinearRgb {
            r: 1.0001,
            g: 0.5,
            b: 0.5
        }));
        assert!(!in_gamut(LinearRgb {
            r: 0.5,
            g: -0.0001,
            b: 0.5
        }));
    }

    #[test]
    fn gamut_safe_preserves_hue_and_lightness_of_out_of_gamut_color() {
        let requested = OkLch::new(0.7, 0.4, 150.0);
        assert!(!in_gamut(oklab_to_linear(oklch_to_oklab(requested))));

        let out = srgb_to_oklch(oklch_to_srgb_gamut_safe(requested));
        assert!((out.h - 150.0).abs() < 0.5, "hue drifted to {}", out.h);
        assert!((out.l - 0.7).abs() < 1e-3, "lightness drifted to {}", out.l);
        assert!(out.c < 0.4, "chroma not reduced: {}", out.c);
    }

    #[test]
    fn gamut_safe_leaves_in_gamut_color_nearly_unchanged() {
        let requested = OkLch::new(0.6, 0.05, 40.0);
        let safe = oklch_to_srgb_gamut_safe(requested);
        let plain = oklch_to_srgb(requested);
        assert!((safe.r - plain.r).abs() < 1e-4);
        assert!((safe.g - plain.g).abs() < 1e-4);
        assert!((safe.b - plain.b).abs() < 1e-4);
    }

    #[test]
    fn gamut_safe_keeps_pure_blue() {
        let blue = srgb_to_oklch(srgb(0.0, 0.0, 1.0));
        assert_eq!(oklch_to_srgb_gamut_safe(blue).to_rgb8(), [0, 0, 255]);
        let navy = srgb_to_oklch(Srgb::from_rgb8([0, 0, 128]));
        assert_eq!(oklch_to_srgb_gamut_safe(navy).to_rgb8(), [0, 0, 128]);
    }

    #[test]
    fn gamut_safe_with_zero_chroma_is_gray() {
        let out = oklch_to_srgb_gamut_safe(OkLch::new(0.5, 0.0, 123.0));
        assert!(approx_eq(out.r, out.g) && approx_eq(out.g, out.b), "{out:?}");
    }

    // -- Bytes and hex --

    #[test]
    fn to_rgb8_rounds_and_clamps() {
        assert_eq!(srgb(1.5, -0.1, 0.5).to_rgb8(), [255, 0, 128]);
        assert_eq!(srgb(0.0, 1.0, 0.2).to_rgb8(), [0, 255, 51]);
    }

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        let red = Srgb::from_hex("#ff0000").unwrap();
        assert_eq!(red.to_rgb8(), [255, 0, 0]);
        let green = Srgb::from_hex("00FF00").unwrap();
        assert_eq!(green.to_rgb8(), [0, 255, 0]);
    }

    #[test]
    fn from_hex_is_case_insensitive() {
        let upper = Srgb::from_hex("#FF00AA").unwrap();
        let lower = Srgb::from_hex("#ff00aa").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn from_hex_rejects_wrong_digit_counts() {
        assert!(Srgb::from_hex("ABC").is_err());
        assert!(Srgb::from_hex("#1234567").is_err());
        assert!(Srgb::from_hex("").is_err());
        assert!(Srgb::from_hex("#").is_err());
        assert!(Srgb::from_hex("##123456").is_err());
    }

    #[test]
    fn from_hex_rejects_non_hex_characters() {
        assert!(Srgb::from_hex("#gggggg").is_err());
        assert!(Srgb::from_hex("+fffff").is_err());
        assert!(Srgb::from_hex("#12 456").is_err());
        assert!(Srgb::from_hex("éééé").is_err());
    }

    #[test]
    fn to_hex_is_uppercase() {
        assert_eq!(srgb(1.0, 0.0, 0.0).to_hex(), "#FF0000");
        assert_eq!(Srgb::from_rgb8([0xc0, 0xff, 0xee]).to_hex(), "#C0FFEE");
    }

    #[test]
    fn to_hex_clamps_out_of_range() {
        assert_eq!(srgb(1.5, -0.1, 0.5).to_hex(), "#FF0080");
    }

    #[test]
    fn srgb_serializes_as_hex_string() {
        let json = serde_json::to_string(&srgb(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(json, "\"#FF0000\"");
        let green: Srgb = serde_json::from_str("\"#00ff00\"").unwrap();
        assert_eq!(green.to_rgb8(), [0, 255, 0]);
    }

    #[test]
    fn srgb_deserialize_rejects_invalid_hex() {
        let result: Result<Srgb, _> = serde_json::from_str("\"not-a-color\"");
        assert!(result.is_err());
    }

    // -- Percentages --

    #[test]
    fn percentages_scale_each_channel() {
        let lab = oklab_percent(OkLab {
            l: 0.5,
            a: 0.2,
            b: -0.4,
        });
        assert!(approx_eq(lab[0], 50.0) && approx_eq(lab[1], 50.0) && approx_eq(lab[2], -100.0));

        let lch = oklch_percent(OkLch::new(0.25, 0.1, 90.0));
        assert!(approx_eq(lch[0], 25.0) && approx_eq(lch[1], 25.0) && approx_eq(lch[2], 25.0));
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn srgb_component() -> impl Strategy<Value = f64> {
            0.0_f64..=1.0
        }

        proptest! {
            #[test]
            fn srgb_oklab_linear_round_trip_within_epsilon(
                r in srgb_component(),
                g in srgb_component(),
                b in srgb_component(),
            ) {
                let original = Srgb { r, g, b };
                let expected = srgb_to_linear(original);
                let back = oklab_to_linear(srgb_to_oklab(original));
                prop_assert!((back.r - expected.r).abs() < 1e-5, "r: {} vs {}", back.r, expected.r);
                prop_assert!((back.g - expected.g).abs() < 1e-5, "g: {} vs {}", back.g, expected.g);
                prop_assert!((back.b - expected.b).abs() < 1e-5, "b: {} vs {}", back.b, expected.b);
            }

            #[test]
            fn srgb_oklab_round_trip_within_epsilon(
                r in srgb_component(),
                g in srgb_component(),
                b in srgb_component(),
            ) {
                let original = Srgb { r, g, b };
                let back = oklab_to_srgb(srgb_to_oklab(original));
                prop_assert!((back.r - r).abs() < 1e-5, "r: {} vs {r}", back.r);
                prop_assert!((back.g - g).abs() < 1e-5, "g: {} vs {g}", back.g);
                prop_assert!((back.b - b).abs() < 1e-5, "b: {} vs {b}", back.b);
            }

            #[test]
            fn oklab_oklch_round_trip_preserves_a_b(
                l in 0.0_f64..=1.0,
                a in -0.25_f64..=0.25,
                b in -0.25_f64..=0.25,
            ) {
                let lab = OkLab { l, a, b };
                let back = oklch_to_oklab(oklab_to_oklch(lab));
                prop_assert!((back.a - a).abs() < 1e-9, "a: {} vs {a}", back.a);
                prop_assert!((back.b - b).abs() < 1e-9, "b: {} vs {b}", back.b);
                prop_assert!((back.l - l).abs() < 1e-12);
            }

            #[test]
            fn gamut_safe_output_is_valid_and_never_gains_chroma(
                l in 0.0_f64..=1.0,
                c in 0.0_f64..=0.5,
                h in 0.0_f64..360.0,
            ) {
                let out = oklch_to_srgb_gamut_safe(OkLch { l, c, h });
                for v in [out.r, out.g, out.b] {
                    prop_assert!((0.0..=1.0).contains(&v), "channel out of range: {v}");
                }
                let effective = srgb_to_oklch(out).c;
                prop_assert!(effective <= c + 1e-6, "effective chroma {effective} > requested {c}");
            }

            #[test]
            fn oklch_hue_is_never_nan(
                l in 0.0_f64..=1.0,
                a in -0.5_f64..=0.5,
                b_val in -0.5_f64..=0.5,
            ) {
                let lch = oklab_to_oklch(OkLab { l, a, b: b_val });
                prop_assert!(!lch.h.is_nan(), "hue is NaN for a={a}, b={b_val}");
                prop_assert!(lch.h >= 0.0 && lch.h < 360.0, "hue {} out of [0, 360)", lch.h);
                prop_assert!(lch.c <= MAX_CHROMA);
            }

            #[test]
            fn byte_color_survives_oklch_and_gamut_safe_path(r: u8, g: u8, b: u8) {
                let lch = srgb_to_oklch(Srgb::from_rgb8([r, g, b]));
                let back = oklch_to_srgb_gamut_safe(lch).to_rgb8();
                prop_assert_eq!(back, [r, g, b]);
            }
        }
    }
}
