//! Sequential colormaps (single-hue progression).
//!
//! These colormaps are suitable for data that progresses from low to high.
//! The tables come from the colorgrad preset gradients, sampled once into a
//! lookup table so per-pixel mapping stays cheap.

use super::colormap::Colormap;

const LUT_SIZE: usize = 256;

/// A sequential colormap backed by a precomputed lookup table.
pub struct SequentialColormap {
    name: &'static str,
    lut: Vec<[u8; 4]>,
}

impl SequentialColormap {
    fn from_gradient(name: &'static str, gradient: colorgrad::Gradient) -> Self {
        let lut = (0..LUT_SIZE)
            .map(|i| {
                let t = i as f64 / (LUT_SIZE - 1) as f64;
                gradient.at(t).to_rgba8()
            })
            .collect();
        Self { name, lut }
    }

    pub fn viridis() -> Self {
        Self::from_gradient("viridis", colorgrad::viridis())
    }

    pub fn plasma() -> Self {
        Self::from_gradient("plasma", colorgrad::plasma())
    }

    pub fn inferno() -> Self {
        Self::from_gradient("inferno", colorgrad::inferno())
    }

    pub fn magma() -> Self {
        Self::from_gradient("magma", colorgrad::magma())
    }

    pub fn cividis() -> Self {
        Self::from_gradient("cividis", colorgrad::cividis())
    }
}

impl Colormap for SequentialColormap {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        let value = if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let index = (value * (LUT_SIZE - 1) as f32).round() as usize;
        self.lut[index]
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colormap_names() {
        assert_eq!(SequentialColormap::viridis().name(), "viridis");
        assert_eq!(SequentialColormap::plasma().name(), "plasma");
        assert_eq!(SequentialColormap::inferno().name(), "inferno");
        assert_eq!(SequentialColormap::magma().name(), "magma");
        assert_eq!(SequentialColormap::cividis().name(), "cividis");
    }

    #[test]
    fn test_viridis_progression() {
        let cmap = SequentialColormap::viridis();
        let low = cmap.map_normalized(0.0);
        let high = cmap.map_normalized(1.0);

        // Viridis runs dark purple to bright yellow
        assert!(low[2] > low[1]);
        assert!(high[1] > high[2]);
        assert_eq!(low[3], 255);
        assert_eq!(high[3], 255);
    }

    #[test]
    fn test_non_finite_input() {
        let cmap = SequentialColormap::magma();
        // NaN falls back to the low end rather than panicking
        assert_eq!(cmap.map_normalized(f32::NAN), cmap.map_normalized(0.0));
    }
}
