//! Colormap trait and utilities.
//!
//! This module defines the common interface for all colormaps.

use crate::error::{HadleyError, Result};

/// Trait for color mapping implementations
pub trait Colormap: Send + Sync {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    fn map_normalized(&self, value: f32) -> [u8; 4];

    /// Color for one fill band out of `num_bands`, sampled at the band center
    /// so the first and last bands don't collapse onto the colormap endpoints.
    fn map_band(&self, band: usize, num_bands: usize) -> [u8; 4] {
        if num_bands == 0 {
            return self.map_normalized(0.5);
        }
        let t = (band as f32 + 0.5) / num_bands as f32;
        self.map_normalized(t)
    }

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// Get a colormap by name
pub fn get_colormap(name: &str) -> Result<Box<dyn Colormap>> {
    use super::diverging::{BlWhRe, Coolwarm};
    use super::sequential::SequentialColormap;

    match name.to_lowercase().as_str() {
        "blwhre" => Ok(Box::new(BlWhRe)),
        "coolwarm" => Ok(Box::new(Coolwarm)),
        "viridis" => Ok(Box::new(SequentialColormap::viridis())),
        "plasma" => Ok(Box::new(SequentialColormap::plasma())),
        "inferno" => Ok(Box::new(SequentialColormap::inferno())),
        "magma" => Ok(Box::new(SequentialColormap::magma())),
        "cividis" => Ok(Box::new(SequentialColormap::cividis())),
        _ => Err(HadleyError::InvalidParameter {
            param: "colormap".to_string(),
            message: format!("Unknown colormap: {}", name),
        }),
    }
}

/// Linear interpolation between two colors
pub fn lerp_color(c1: [u8; 3], c2: [u8; 3], t: f32) -> [u8; 3] {
    [
        (c1[0] as f32 * (1.0 - t) + c2[0] as f32 * t) as u8,
        (c1[1] as f32 * (1.0 - t) + c2[1] as f32 * t) as u8,
        (c1[2] as f32 * (1.0 - t) + c2[2] as f32 * t) as u8,
    ]
}

/// Sample an evenly spaced anchor table at a normalized position.
pub fn sample_table(colors: &[[u8; 3]], value: f32) -> [u8; 4] {
    let value = value.clamp(0.0, 1.0);
    let position = value * (colors.len() - 1) as f32;
    let index = position.floor() as usize;

    if index >= colors.len() - 1 {
        let last = colors[colors.len() - 1];
        return [last[0], last[1], last[2], 255];
    }

    let t = position - index as f32;
    let rgb = lerp_color(colors[index], colors[index + 1], t);
    [rgb[0], rgb[1], rgb[2], 255]
}
