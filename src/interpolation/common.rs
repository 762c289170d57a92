//! Common utilities for interpolation algorithms.
//!
//! This module provides shared functionality used by the interpolation
//! methods and by the renderer when converting coordinates to grid indices.

use crate::error::{HadleyError, Result};

/// Map a coordinate value to a fractional grid index.
///
/// `coord_values` must be monotonically increasing but need not be evenly
/// spaced (gaussian latitudes, for example). Values outside the coordinate
/// range return None so callers can leave those pixels unpainted.
pub fn coord_to_index(coord: f64, coord_values: &[f64]) -> Option<f64> {
    if coord_values.len() < 2 {
        return None;
    }
    let first = coord_values[0];
    let last = *coord_values.last()?;
    if coord < first || coord > last {
        return None;
    }

    // Binary search for the cell containing the coordinate.
    let upper = coord_values.partition_point(|&v| v <= coord);
    if upper == coord_values.len() {
        return Some((coord_values.len() - 1) as f64);
    }
    let i = upper - 1;
    let lo = coord_values[i];
    let hi = coord_values[upper];
    if hi <= lo {
        return Some(i as f64);
    }
    Some(i as f64 + (coord - lo) / (hi - lo))
}

/// Clamp an index to valid bounds
pub fn clamp_index(index: f64, size: usize) -> f64 {
    index.max(0.0).min((size - 1) as f64)
}

/// Get the weight for linear interpolation
pub fn linear_weight(fraction: f64) -> (f64, f64) {
    (1.0 - fraction, fraction)
}

/// Flatten multi-dimensional indices into an offset in row-major order.
pub fn flat_index(indices: &[usize], shape: &[usize]) -> Result<usize> {
    if indices.len() != shape.len() {
        return Err(HadleyError::Interpolation {
            message: format!(
                "Dimension mismatch: {} indices for {} dimensions",
                indices.len(),
                shape.len()
            ),
        });
    }

    let mut flat = 0;
    for (i, (&idx, &dim)) in indices.iter().zip(shape.iter()).enumerate() {
        if idx >= dim {
            return Err(HadleyError::Interpolation {
                message: format!("Index {} out of bounds for axis {} of length {}", idx, i, dim),
            });
        }
        flat = flat * dim + idx;
    }
    Ok(flat)
}
