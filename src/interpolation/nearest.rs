//! Nearest-neighbor sampling.
//!
//! Snaps each fractional index to the closest grid point. Blockier than
//! bilinear, but exact at the sample points, which suits step-like fields.

use super::Interpolator;
use crate::error::{HadleyError, Result};
use crate::interpolation::common;

/// Nearest neighbor interpolator
pub struct NearestInterpolator;

impl Interpolator for NearestInterpolator {
    fn interpolate(&self, data: &[f32], shape: &[usize], indices: &[f64]) -> Result<f32> {
        if indices.len() != shape.len() {
            return Err(HadleyError::Interpolation {
                message: format!(
                    "Expected {} indices for a rank-{} grid, got {}",
                    shape.len(),
                    shape.len(),
                    indices.len()
                ),
            });
        }

        let snapped: Vec<usize> = indices
            .iter()
            .zip(shape.iter())
            .map(|(&index, &size)| common::clamp_index(index.round(), size) as usize)
            .collect();

        Ok(data[common::flat_index(&snapped, shape)?])
    }

    fn name(&self) -> &str {
        "nearest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(data: &[f32], shape: &[usize], indices: &[f64]) -> f32 {
        NearestInterpolator
            .interpolate(data, shape, indices)
            .unwrap()
    }

    #[test]
    fn test_snaps_to_closest_sample() {
        let data = [10.0, 20.0, 30.0];
        assert_eq!(sample(&data, &[3], &[0.0]), 10.0);
        assert_eq!(sample(&data, &[3], &[0.4]), 10.0);
        assert_eq!(sample(&data, &[3], &[0.6]), 20.0);
        assert_eq!(sample(&data, &[3], &[1.9]), 30.0);
    }

    #[test]
    fn test_clamps_outside_the_grid() {
        let data = [10.0, 20.0, 30.0];
        assert_eq!(sample(&data, &[3], &[-2.0]), 10.0);
        assert_eq!(sample(&data, &[3], &[9.0]), 30.0);
    }

    #[test]
    fn test_row_major_addressing() {
        // shape (2, 3): row 0 is 0,1,2 and row 1 is 3,4,5
        let data = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(sample(&data, &[2, 3], &[1.0, 2.0]), 5.0);
        assert_eq!(sample(&data, &[2, 3], &[0.49, 0.51]), 1.0);
        assert_eq!(sample(&data, &[2, 3], &[0.51, 0.49]), 3.0);
    }

    #[test]
    fn test_rank_mismatch_is_an_error() {
        let data = [1.0, 2.0];
        let result = NearestInterpolator.interpolate(&data, &[2, 1], &[0.0]);
        assert!(result.is_err());
    }
}
