use serde::Serialize;
use std::fmt;

/// Numeric control bounds with quantization step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    /// Bounds are ordered and not NaN.
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// What a slider does with a raw input: clamp to `[min, max]`, then snap
    /// to the nearest `min + k·step` that does not pass `max`. A `max` that
    /// sits on the grid up to f32 rounding of `step` counts as on the grid.
    /// NaN input and invalid bounds map to `min`.
    pub fn quantize(&self, v: f32) -> f32 {
        if v.is_nan() || !self.is_valid() {
            return self.min;
        }
        let clamped = v.clamp(self.min, self.max);
        if !(self.step > 0.0) {
            return clamped;
        }
        let (min, step) = (self.min as f64, self.step as f64);
        let span = (self.max as f64 - min) / step;
        let last = (span + span * 1e-6).floor();
        let k = ((clamped as f64 - min) / step).round().min(last);
        let snapped = min + k * step;
        if (snapped - self.max as f64).abs() < step * 1e-3 {
            return self.max;
        }
        (snapped as f32).clamp(self.min, self.max)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] step {}", self.min, self.max, self.step)
    }
}
