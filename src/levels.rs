//! Contour level sets.
//!
//! A level set is the ordered sequence of evenly spaced thresholds shared by
//! the filled-band and isoline rendering paths.

use serde::{Deserialize, Serialize};

use crate::error::{HadleyError, Result};

/// An evenly spaced `(start, stop, step)` range, stop exclusive.
///
/// This is the serializable form carried in chart configurations; call
/// [`LevelSpec::build`] to obtain the materialized [`LevelSet`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelSpec {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl LevelSpec {
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    /// Materialize the spec into a strictly increasing level set.
    pub fn build(&self) -> Result<LevelSet> {
        LevelSet::arange(self.start, self.stop, self.step)
    }
}

/// An ordered, strictly increasing sequence of contour thresholds.
#[derive(Debug, Clone)]
pub struct LevelSet {
    values: Vec<f64>,
    step: f64,
}

impl LevelSet {
    /// Build a level set with `arange` semantics: values start at `start` and
    /// advance by `step` while strictly below `stop`.
    pub fn arange(start: f64, stop: f64, step: f64) -> Result<Self> {
        if !start.is_finite() || !stop.is_finite() || !step.is_finite() {
            return Err(HadleyError::InvalidParameter {
                param: "levels".to_string(),
                message: "Level range must be finite".to_string(),
            });
        }
        if step <= 0.0 {
            return Err(HadleyError::InvalidParameter {
                param: "levels".to_string(),
                message: format!("Level step must be positive, got {}", step),
            });
        }
        if stop <= start {
            return Err(HadleyError::InvalidParameter {
                param: "levels".to_string(),
                message: format!("Level stop ({}) must exceed start ({})", stop, start),
            });
        }

        // Compute each value from the start to avoid accumulated float error;
        // the epsilon keeps e.g. (-5.5, 6.0, 0.5) from picking up a 24th value.
        let count = ((stop - start) / step - 1e-9).floor() as usize + 1;
        let values: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();

        Ok(Self { values, step })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> f64 {
        self.values[0]
    }

    pub fn last(&self) -> f64 {
        *self.values.last().unwrap()
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of fill bands between consecutive levels.
    pub fn num_bands(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// Locate the band `[values[i], values[i+1])` containing `value`.
    ///
    /// Values below the first or above the last level fall outside every band
    /// (the fill path leaves them unpainted). The top edge belongs to the last
    /// band so the maximum level itself is still colored.
    pub fn band_of(&self, value: f64) -> Option<usize> {
        if self.values.len() < 2 || !value.is_finite() {
            return None;
        }
        if value < self.first() || value > self.last() {
            return None;
        }
        if value == self.last() {
            return Some(self.num_bands() - 1);
        }
        let band = ((value - self.first()) / self.step).floor() as usize;
        Some(band.min(self.num_bands() - 1))
    }

    /// Normalized position of `value` within [first, last], for colorbar ticks.
    pub fn position_of(&self, value: f64) -> f64 {
        let span = self.last() - self.first();
        ((value - self.first()) / span).clamp(0.0, 1.0)
    }
}
