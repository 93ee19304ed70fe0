//! Bounds for a single OKLCh channel.
//!
//! A [`ChannelRange`] limits random draws for one channel and sets the
//! editing granularity (`step`). Stored palette colors are never clamped
//! to it after the fact.

use crate::error::PaletteError;
use crate::prng::Xorshift64;
use serde::{Deserialize, Deserializer, Serialize};

/// A `(min, max, step)` interval with `max > min` and `step > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelRange {
    min: f64,
    max: f64,
    step: f64,
}

impl ChannelRange {
    /// Creates a range, rejecting non-finite bounds, `max <= min`, and `step <= 0`.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, PaletteError> {
        if !(min.is_finite() && max.is_finite() && step.is_finite()) {
            return Err(PaletteError::InvalidRange(format!(
                "bounds must be finite, got ({min}, {max}, {step})"
            )));
        }
        if max <= min {
            return Err(PaletteError::InvalidRange(format!(
                "max ({max}) must be greater than min ({min})"
            )));
        }
        if step <= 0.0 {
            return Err(PaletteError::InvalidRange(format!(
                "step ({step}) must be greater than 0"
            )));
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Clamps `v` into `[min, max]`.
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }

    /// Maps `v` to `[0, 1]` across the range, clamping first.
    pub fn normalize(&self, v: f64) -> f64 {
        (self.clamp(v) - self.min) / (self.max - self.min)
    }

    /// Inverse of [`normalize`](Self::normalize).
    pub fn denormalize(&self, t: f64) -> f64 {
        self.min + t.clamp(0.0, 1.0) * (self.max - self.min)
    }

    /// Rounds `v` to the nearest multiple of `step` above `min`, then clamps.
    pub fn snap(&self, v: f64) -> f64 {
        let steps = ((v - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }

    /// Draws uniformly from `[min, max)`.
    pub fn sample(&self, rng: &mut Xorshift64) -> f64 {
        rng.next_range(self.min, self.max)
    }
}

#[derive(Deserialize)]
struct RawChannelRange {
    min: f64,
    max: f64,
    step: f64,
}

impl<'de> Deserialize<'de> for ChannelRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawChannelRange::deserialize(deserializer)?;
        ChannelRange::new(raw.min, raw.max, raw.step).map_err(serde::de::Error::custom)
    }
}
