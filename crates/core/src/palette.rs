//! Editable palette of OKLCh colors with an immutable original snapshot.
//!
//! A [`Palette`] holds the current colors, which every generator and edit
//! overwrites in place, next to the colors it was constructed with, which
//! never change. `reset` copies originals back. The palette never changes
//! size after construction.
//!
//! Generators draw from an explicit [`Xorshift64`], so a given seed always
//! yields the same palette. A generation pass picks:
//!
//! - a lightness window `[l_min, l_max]` in [0, 1] at least 0.25 wide,
//! - a number of hue modes in `[1, min(mode_quantity, N)]`,
//! - evenly spaced hue anchors starting at a random hue, clockwise or not,
//! - one chroma shared by the whole palette.

use crate::channel_range::ChannelRange;
use crate::color::{
    normalize_hue, oklab_to_oklch, oklch_to_oklab, oklch_to_srgb, oklch_to_srgb_gamut_safe,
    srgb_to_oklch, OkLab, OkLch, Rgb8, Srgb,
};
use crate::error::PaletteError;
use crate::prng::Xorshift64;
use crate::settings::PaletteSettings;

/// Narrowest lightness window a generation pass will use.
pub const MIN_LIGHTNESS_SPAN: f64 = 0.25;

/// A fixed-size palette of OKLCh colors with reset-to-original support.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<OkLch>,
    original: Vec<OkLch>,
    ranges: [ChannelRange; 3],
    mode_quantity: usize,
}

/// Random choices shared by the generators.
#[derive(Debug, Clone, PartialEq)]
struct GenerationPlan {
    l_min: f64,
    l_max: f64,
    hues: Vec<f64>,
    clockwise: bool,
    chroma: f64,
}

impl Palette {
    /// Creates a palette from at least one OKLCh color, exactly three channel
    /// ranges (L, C, H order), and a hue-mode bound of at least 1.
    pub fn new(
        initial: Vec<OkLch>,
        ranges: &[ChannelRange],
        mode_quantity: usize,
    ) -> Result<Self, PaletteError> {
        if initial.is_empty() {
            return Err(PaletteError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        let ranges: [ChannelRange; 3] = ranges.try_into().map_err(|_| {
            PaletteError::InvalidPalette(format!(
                "palette requires exactly 3 channel ranges, got {}",
                ranges.len()
            ))
        })?;
        if mode_quantity < 1 {
            return Err(PaletteError::InvalidPalette(
                "mode quantity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            original: initial.clone(),
            colors: initial,
            ranges,
            mode_quantity,
        })
    }

    /// Creates a palette using the ranges and mode bound from `settings`.
    pub fn from_settings(
        initial: Vec<OkLch>,
        settings: &PaletteSettings,
    ) -> Result<Self, PaletteError> {
        Self::new(initial, &settings.ranges(), settings.mode_quantity)
    }

    /// Creates a palette by parsing hex color strings ("#RRGGBB" or "RRGGBB").
    pub fn from_hex(hexes: &[&str], settings: &PaletteSettings) -> Result<Self, PaletteError> {
        let colors = hexes
            .iter()
            .map(|h| Srgb::from_hex(h).map(srgb_to_oklch))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_settings(colors, settings)
    }

    /// Returns the number of colors in this palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if this palette has no colors. (Always false for valid palettes.)
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The current colors.
    pub fn colors(&self) -> &[OkLch] {
        &self.colors
    }

    /// The colors the palette was constructed with.
    pub fn original(&self) -> &[OkLch] {
        &self.original
    }

    /// Channel ranges in L, C, H order.
    pub fn ranges(&self) -> &[ChannelRange; 3] {
        &self.ranges
    }

    pub fn mode_quantity(&self) -> usize {
        self.mode_quantity
    }

    fn check_index(&self, index: usize) -> Result<(), PaletteError> {
        if index < self.colors.len() {
            Ok(())
        } else {
            Err(PaletteError::IndexOutOfBounds {
                index,
                len: self.colors.len(),
            })
        }
    }

    /// Returns the current color at `index`.
    pub fn color(&self, index: usize) -> Result<OkLch, PaletteError> {
        self.check_index(index)?;
        Ok(self.colors[index])
    }

    /// Overwrites the current color at `index`. The original is untouched.
    pub fn set_color(&mut self, index: usize, color: OkLch) -> Result<(), PaletteError> {
        self.check_index(index)?;
        self.colors[index] = color;
        Ok(())
    }

    // -- Generators --

    /// Segment generation: contiguous blocks share a hue anchor, the whole
    /// palette shares one chroma, and lightness ramps across every index.
    pub fn generate(&mut self, rng: &mut Xorshift64) {
        self.reset_all();
        let plan = self.draw_plan(rng);
        self.apply_segments(&plan);
    }

    /// Interpolated generation: anchors are placed at evenly spaced key
    /// indices and the colors between them are blended in OKLab.
    pub fn generate_interpolated(&mut self, rng: &mut Xorshift64) {
        self.reset_all();
        let plan = self.draw_plan(rng);
        self.apply_interpolated(&plan);
    }

    /// Spread generation: each block sweeps its share of the hue circle,
    /// starting at its anchor. Chroma is shared; lightness keeps the
    /// original values.
    pub fn generate_spread(&mut self, rng: &mut Xorshift64) {
        self.reset_all();
        let plan = self.draw_plan(rng);
        self.apply_spread(&plan);
    }

    fn draw_plan(&self, rng: &mut Xorshift64) -> GenerationPlan {
        let (l_min, l_max) = lightness_window(rng.next_f64(), rng.next_f64());
        let max_modes = self.mode_quantity.min(self.len());
        let modes = 1 + rng.next_usize(max_modes);
        let hue_start = rng.next_range(0.0, 360.0);
        let clockwise = rng.next_bool();
        let chroma = self.ranges[1].sample(rng);
        GenerationPlan {
            l_min,
            l_max,
            hues: hue_anchors(hue_start, modes, clockwise),
            clockwise,
            chroma,
        }
    }

    /// Lightness for flat index `i` on a ramp across the whole palette.
    fn ramp(&self, plan: &GenerationPlan, i: usize) -> f64 {
        let n = self.len();
        if n == 1 {
            plan.l_min
        } else {
            plan.l_min + (i as f64 / (n - 1) as f64) * (plan.l_max - plan.l_min)
        }
    }

    fn apply_segments(&mut self, plan: &GenerationPlan) {
        let blocks = block_sizes(self.len(), plan.hues.len(), false);
        let mut index = 0;
        for (&hue, size) in plan.hues.iter().zip(blocks) {
            for _ in 0..size {
                self.colors[index] = OkLch {
                    l: self.ramp(plan, index),
                    c: plan.chroma,
                    h: hue,
                };
                index += 1;
            }
        }
    }

    fn apply_interpolated(&mut self, plan: &GenerationPlan) {
        let n = self.len();
        let modes = plan.hues.len();
        if modes == 1 {
            for i in 0..n {
                self.colors[i] = OkLch {
                    l: self.ramp(plan, i),
                    c: plan.chroma,
                    h: plan.hues[0],
                };
            }
            return;
        }

        let span = (modes - 1) as f64;
        let keys: Vec<usize> = (0..modes)
            .map(|i| (i as f64 * (n - 1) as f64 / span).round() as usize)
            .collect();
        for (i, (&pos, &hue)) in keys.iter().zip(&plan.hues).enumerate() {
            self.colors[pos] = OkLch {
                l: plan.l_min + (i as f64 / span) * (plan.l_max - plan.l_min),
                c: plan.chroma,
                h: hue,
            };
        }
        for pair in keys.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let from = oklch_to_oklab(self.colors[start]);
            let to = oklch_to_oklab(self.colors[end]);
            for j in start + 1..end {
                let t = (j - start) as f64 / (end - start) as f64;
                self.colors[j] = oklab_to_oklch(lerp_oklab(from, to, t));
            }
        }
    }

    fn apply_spread(&mut self, plan: &GenerationPlan) {
        let modes = plan.hues.len();
        let arc = 360.0 / modes as f64;
        let direction = if plan.clockwise { 1.0 } else { -1.0 };
        let blocks = block_sizes(self.len(), modes, true);
        let mut index = 0;
        for (&anchor, size) in plan.hues.iter().zip(blocks) {
            for k in 0..size {
                let offset = arc * k as f64 / size as f64;
                self.colors[index].c = plan.chroma;
                self.colors[index].h = normalize_hue(anchor + direction * offset);
                index += 1;
            }
        }
    }

    // -- Randomization --

    /// Draws L, C, and H independently within their ranges for one color.
    pub fn random_single(&mut self, index: usize, rng: &mut Xorshift64) -> Result<(), PaletteError> {
        self.check_index(index)?;
        self.colors[index] = self.random_color(rng);
        Ok(())
    }

    /// Independent per-color, per-channel draws for every color.
    pub fn random_all(&mut self, rng: &mut Xorshift64) {
        for i in 0..self.colors.len() {
            self.colors[i] = self.random_color(rng);
        }
    }

    fn random_color(&self, rng: &mut Xorshift64) -> OkLch {
        let [l, c, h] = &self.ranges;
        OkLch {
            l: l.sample(rng),
            c: c.sample(rng),
            h: h.sample(rng),
        }
    }

    /// Rotates every hue by 180 degrees. Lightness and chroma are unchanged.
    pub fn invert(&mut self) {
        for color in &mut self.colors {
            color.h = normalize_hue(color.h + 180.0);
        }
    }

    // -- Reset --

    /// Restores the color at `index` to its construction-time value.
    pub fn reset(&mut self, index: usize) -> Result<(), PaletteError> {
        self.check_index(index)?;
        self.colors[index] = self.original[index];
        Ok(())
    }

    /// Restores every color to its construction-time value.
    pub fn reset_all(&mut self) {
        self.colors.copy_from_slice(&self.original);
    }

    // -- Hex and byte conversion --

    /// The color at `index` as uppercase `"#RRGGBB"`, via the gamut-safe path.
    pub fn hex(&self, index: usize) -> Result<String, PaletteError> {
        Ok(oklch_to_srgb_gamut_safe(self.color(index)?).to_hex())
    }

    /// The whole palette as `"[#RRGGBB,#RRGGBB,...]"`.
    pub fn to_hex_list(&self) -> String {
        let hexes: Vec<String> = self
            .colors
            .iter()
            .map(|&c| oklch_to_srgb_gamut_safe(c).to_hex())
            .collect();
        format!("[{}]", hexes.join(","))
    }

    /// Parses `hex` and overwrites the current color at `index`.
    ///
    /// The original is not updated, so a later [`reset`](Self::reset)
    /// restores the construction-time color rather than this one.
    pub fn set_hex(&mut self, index: usize, hex: &str) -> Result<(), PaletteError> {
        self.check_index(index)?;
        self.colors[index] = srgb_to_oklch(Srgb::from_hex(hex)?);
        Ok(())
    }

    /// Overwrites every color from a `"[#RRGGBB,...]"` list.
    ///
    /// Brackets and whitespace are optional. The list must have exactly
    /// [`len`](Self::len) entries; nothing is written unless every entry parses.
    pub fn set_hex_list(&mut self, list: &str) -> Result<(), PaletteError> {
        let colors = parse_hex_list(list)?;
        if colors.len() != self.len() {
            return Err(PaletteError::InvalidColor(format!(
                "expected {} colors, got {}",
                self.len(),
                colors.len()
            )));
        }
        self.colors = colors;
        Ok(())
    }

    /// The color at `index` as bytes via the plain clamped conversion.
    pub fn rgb8(&self, index: usize) -> Result<Rgb8, PaletteError> {
        Ok(oklch_to_srgb(self.color(index)?).to_rgb8())
    }

    /// Every color as bytes via the plain clamped conversion.
    pub fn to_rgb8(&self) -> Vec<Rgb8> {
        self.colors
            .iter()
            .map(|&c| oklch_to_srgb(c).to_rgb8())
            .collect()
    }
}

/// Parses a `"[#RRGGBB,...]"` list into OKLCh colors.
///
/// Brackets, `'#'` prefixes, and whitespace around entries are optional.
pub fn parse_hex_list(list: &str) -> Result<Vec<OkLch>, PaletteError> {
    let trimmed = list.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);
    inner
        .split(',')
        .map(|h| Srgb::from_hex(h.trim()).map(srgb_to_oklch))
        .collect()
}

/// Orders two draws and widens the window to at least [`MIN_LIGHTNESS_SPAN`].
///
/// Widening extends `l_max` when that stays within 1, otherwise it lowers
/// `l_min` (floored at 0).
fn lightness_window(a: f64, b: f64) -> (f64, f64) {
    let (mut l_min, mut l_max) = if a > b { (b, a) } else { (a, b) };
    if l_max - l_min < MIN_LIGHTNESS_SPAN {
        if l_max + MIN_LIGHTNESS_SPAN <= 1.0 {
            l_max += MIN_LIGHTNESS_SPAN;
        } else {
            l_min = (l_min - MIN_LIGHTNESS_SPAN).max(0.0);
        }
    }
    (l_min, l_max)
}

/// `modes` hues spaced `360 / modes` apart from `start`, in the chosen direction.
fn hue_anchors(start: f64, modes: usize, clockwise: bool) -> Vec<f64> {
    let step = 360.0 / modes as f64;
    let direction = if clockwise { 1.0 } else { -1.0 };
    (0..modes)
        .map(|m| normalize_hue(start + direction * m as f64 * step))
        .collect()
}

/// Splits `n` slots into `modes` contiguous blocks of `n / modes`.
///
/// The remainder goes one-per-block to the leading blocks, or entirely to
/// the last block when `remainder_last` is set.
fn block_sizes(n: usize, modes: usize, remainder_last: bool) -> Vec<usize> {
    let base = n / modes;
    let remainder = n % modes;
    (0..modes)
        .map(|m| {
            if remainder_last {
                base + if m == modes - 1 { remainder } else { 0 }
            } else {
                base + usize::from(m < remainder)
            }
        })
        .collect()
}

fn lerp_oklab(from: OkLab, to: OkLab, t: f64) -> OkLab {
    OkLab {
        l: from.l + t * (to.l - from.l),
        a: from.a + t * (to.a - from.a),
        b: from.b + t * (to.b - from.b),
    }
}
