//! Diverging colormaps (two-hue progression with center).
//!
//! These colormaps are suitable for anomaly data that diverges from a
//! central value.

use super::colormap::{sample_table, Colormap};

/// Blue-white-red colormap for anomaly fields.
///
/// Saturated blue through white at the midpoint to saturated red, the
/// classic scheme for temperature anomalies.
pub struct BlWhRe;

impl Colormap for BlWhRe {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        let colors = [
            [0, 0, 140],     // Deep blue
            [0, 40, 200],
            [30, 90, 240],
            [90, 145, 252],
            [160, 195, 255],
            [215, 230, 255],
            [255, 255, 255], // White at the midpoint
            [255, 230, 215],
            [255, 190, 155],
            [252, 135, 90],
            [240, 80, 35],
            [200, 30, 0],
            [140, 0, 0],     // Deep red
        ];

        sample_table(&colors, value)
    }

    fn name(&self) -> &str {
        "blwhre"
    }
}

/// Coolwarm colormap - blue to red through a pale gray
pub struct Coolwarm;

impl Colormap for Coolwarm {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        let colors = [
            [59, 76, 192],   // Dark blue
            [98, 130, 234],
            [141, 176, 254],
            [184, 208, 249],
            [221, 221, 221], // Gray in the middle
            [245, 196, 173],
            [244, 154, 123],
            [222, 96, 77],
            [180, 4, 38],    // Dark red
        ];

        sample_table(&colors, value)
    }

    fn name(&self) -> &str {
        "coolwarm"
    }
}
