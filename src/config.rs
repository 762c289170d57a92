//! Configuration for hadley charts.
//!
//! A chart is fully described by a [`ChartConfig`]: which files and variables
//! to read, which indices to pin, whether to pad the seam, the contour level
//! range, and the ordered draw styles. Configs come from the built-in recipes
//! or from a JSON file; either way they are validated before any data file is
//! opened.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{HadleyError, Result};
use crate::levels::LevelSpec;

/// Command-line arguments for hadley
#[derive(Parser, Debug)]
#[command(name = "hadley")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Name of a built-in chart recipe (see --list)
    pub recipe: Option<String>,

    /// Path to a JSON chart configuration (alternative to a recipe name)
    #[arg(short, long, env = "HADLEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output PNG path (defaults to <recipe>.png)
    #[arg(short, long, env = "HADLEY_OUTPUT")]
    pub output: Option<PathBuf>,

    /// List the built-in recipes and exit
    #[arg(long)]
    pub list: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "HADLEY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Complete description of one chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Main title drawn above the frame
    #[serde(default)]
    pub title: Option<String>,

    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// The coordinate frame the layers are drawn into
    pub frame: FrameConfig,

    /// Ordered draw layers (first is drawn at the bottom)
    pub layers: Vec<LayerConfig>,

    /// Land/coastline features, drawn between fills and line contours
    #[serde(default)]
    pub features: Option<FeatureConfig>,

    /// Colorbar for the first filled layer
    #[serde(default)]
    pub colorbar: Option<ColorbarConfig>,
}

/// The drawing frame: a map window or a Cartesian plot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameConfig {
    Map(MapFrameConfig),
    Cartesian(CartesianFrameConfig),
}

/// A plate carrée map window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapFrameConfig {
    /// Longitude placed at the horizontal center of the projection
    #[serde(default)]
    pub center_lon: f64,

    /// Visible window as [lon_min, lon_max, lat_min, lat_max] in true
    /// degrees; defaults to the whole globe around the center longitude
    #[serde(default)]
    pub extent: Option<[f64; 4]>,
}

/// A Cartesian frame with explicit limits and tick spacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartesianFrameConfig {
    pub xlim: [f64; 2],
    pub ylim: [f64; 2],
    pub x_major: f64,
    pub y_major: f64,
    #[serde(default = "default_minor_per_major")]
    pub x_minor_per_major: u32,
    #[serde(default = "default_minor_per_major")]
    pub y_minor_per_major: u32,
    #[serde(default)]
    pub xlabel: Option<String>,
    /// Defaults to the layer variable's long_name + units
    #[serde(default)]
    pub ylabel: Option<String>,
}

/// One draw layer: a data selection plus a style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerConfig {
    /// NetCDF file the layer reads from
    pub file: PathBuf,

    /// Variable to render
    pub variable: String,

    /// Fixed-index selectors: named axis -> index
    #[serde(default)]
    pub select: BTreeMap<String, usize>,

    /// Append a wrap-around longitude sample before rendering
    #[serde(default)]
    pub cyclic: bool,

    /// Contour levels (required by filled and line styles)
    #[serde(default)]
    pub levels: Option<LevelSpec>,

    /// How the layer is drawn
    pub style: LayerStyle,
}

/// The draw style of a layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerStyle {
    /// Filled contour bands colored by a named colormap
    Filled {
        colormap: String,
        /// Grid sampling method for the per-pixel fill
        #[serde(default = "default_interpolation")]
        interpolation: String,
    },
    /// Stroked isolines with optional inline labels
    Lines(LineStyle),
    /// An XY curve over the remaining axis
    Curve(CurveStyle),
}

/// Stroked isoline styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineStyle {
    #[serde(default = "default_line_color")]
    pub color: [u8; 4],
    #[serde(default = "default_line_width")]
    pub width: f32,
    #[serde(default)]
    pub labels: bool,
    #[serde(default = "default_label_size")]
    pub label_size: f32,
    /// A level drawn with its own (usually heavier) width
    #[serde(default)]
    pub emphasis: Option<EmphasisLevel>,
}

/// An isoline level with its own stroke width.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmphasisLevel {
    pub level: f64,
    pub width: f32,
}

impl LineStyle {
    /// Stroke width for a level, honoring the emphasis override.
    pub fn width_for(&self, level: f64) -> f32 {
        if let Some(emphasis) = &self.emphasis {
            if (emphasis.level - level).abs() < 1e-9 {
                return emphasis.width;
            }
        }
        self.width
    }
}

/// XY curve styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveStyle {
    #[serde(default = "default_line_color")]
    pub color: [u8; 4],
    #[serde(default = "default_curve_width")]
    pub width: f32,
    #[serde(default)]
    pub error_bars: Option<ErrorBarStyle>,
}

/// Error-bar whiskers drawn on a curve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ErrorBarStyle {
    /// Draw a whisker at every `stride`-th point
    pub stride: usize,
    /// Whisker half-length in data units
    pub size: f64,
    /// Cap half-width in pixels
    #[serde(default = "default_cap")]
    pub cap: f32,
}

/// Map feature layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// GeoJSON FeatureCollection with land polygons / coastlines
    pub file: PathBuf,
    #[serde(flatten)]
    pub style: FeatureStyle,
}

/// Colors and stroke width of the feature layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureStyle {
    #[serde(default = "default_land_color")]
    pub land_color: [u8; 4],
    #[serde(default = "default_coast_color")]
    pub coast_color: [u8; 4],
    #[serde(default = "default_coast_width")]
    pub coast_width: f32,
}

impl Default for FeatureStyle {
    fn default() -> Self {
        Self {
            land_color: default_land_color(),
            coast_color: default_coast_color(),
            coast_width: default_coast_width(),
        }
    }
}

/// Colorbar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorbarConfig {
    /// Tick values labeled beside the bar
    #[serde(default)]
    pub ticks: Vec<f64>,
    /// Stroke the edges between cells
    #[serde(default = "default_true")]
    pub draw_edges: bool,
}

impl ChartConfig {
    /// Load a chart configuration from a JSON file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ChartConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration before any data file is opened.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HadleyError::Config {
                message: format!("Canvas size {}x{} is invalid", self.width, self.height),
            });
        }

        if self.layers.is_empty() {
            return Err(HadleyError::Config {
                message: "A chart needs at least one layer".to_string(),
            });
        }

        for (i, layer) in self.layers.iter().enumerate() {
            match &layer.style {
                LayerStyle::Filled {
                    colormap,
                    interpolation,
                } => {
                    // Reject unknown colormap and interpolator names up front
                    crate::colormaps::get_colormap(colormap)?;
                    crate::interpolation::get_interpolator(interpolation)?;
                    let spec = layer.levels.ok_or_else(|| HadleyError::Config {
                        message: format!("Layer {} (filled) needs a level range", i),
                    })?;
                    spec.build()?;
                    if !matches!(self.frame, FrameConfig::Map(_)) {
                        return Err(HadleyError::Config {
                            message: format!("Layer {} (filled) requires a map frame", i),
                        });
                    }
                }
                LayerStyle::Lines(_) => {
                    let spec = layer.levels.ok_or_else(|| HadleyError::Config {
                        message: format!("Layer {} (lines) needs a level range", i),
                    })?;
                    spec.build()?;
                    if !matches!(self.frame, FrameConfig::Map(_)) {
                        return Err(HadleyError::Config {
                            message: format!("Layer {} (lines) requires a map frame", i),
                        });
                    }
                }
                LayerStyle::Curve(_) => {
                    if !matches!(self.frame, FrameConfig::Cartesian(_)) {
                        return Err(HadleyError::Config {
                            message: format!("Layer {} (curve) requires a cartesian frame", i),
                        });
                    }
                }
            }
        }

        if self.colorbar.is_some()
            && !self
                .layers
                .iter()
                .any(|l| matches!(l.style, LayerStyle::Filled { .. }))
        {
            return Err(HadleyError::Config {
                message: "A colorbar needs a filled layer to describe".to_string(),
            });
        }

        if let FrameConfig::Map(map) = &self.frame {
            if let Some([lon_min, lon_max, lat_min, lat_max]) = map.extent {
                if lon_max <= lon_min || lat_max <= lat_min {
                    return Err(HadleyError::Config {
                        message: format!(
                            "Degenerate map extent [{}, {}, {}, {}]",
                            lon_min, lon_max, lat_min, lat_max
                        ),
                    });
                }
            }
        }

        if let FrameConfig::Cartesian(cart) = &self.frame {
            if cart.xlim[1] <= cart.xlim[0] || cart.ylim[1] <= cart.ylim[0] {
                return Err(HadleyError::Config {
                    message: "Cartesian limits must be increasing".to_string(),
                });
            }
            if cart.x_major <= 0.0 || cart.y_major <= 0.0 {
                return Err(HadleyError::Config {
                    message: "Tick spacing must be positive".to_string(),
                });
            }
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    800
}

fn default_minor_per_major() -> u32 {
    1
}

fn default_interpolation() -> String {
    "bilinear".to_string()
}

fn default_line_color() -> [u8; 4] {
    [0, 0, 0, 255]
}

fn default_line_width() -> f32 {
    0.8
}

fn default_curve_width() -> f32 {
    1.5
}

fn default_label_size() -> f32 {
    10.0
}

fn default_cap() -> f32 {
    4.0
}

fn default_land_color() -> [u8; 4] {
    [211, 211, 211, 255]
}

fn default_coast_color() -> [u8; 4] {
    [128, 128, 128, 255]
}

fn default_coast_width() -> f32 {
    0.5
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_chart() -> ChartConfig {
        ChartConfig {
            title: Some("test".to_string()),
            width: 400,
            height: 400,
            frame: FrameConfig::Map(MapFrameConfig {
                center_lon: -160.0,
                extent: Some([100.0, 300.0, -60.0, 60.0]),
            }),
            layers: vec![LayerConfig {
                file: PathBuf::from("data.nc"),
                variable: "ssta".to_string(),
                select: BTreeMap::from([("time".to_string(), 11)]),
                cyclic: true,
                levels: Some(LevelSpec::new(-5.5, 6.0, 0.5)),
                style: LayerStyle::Filled {
                    colormap: "blwhre".to_string(),
                    interpolation: "bilinear".to_string(),
                },
            }],
            features: None,
            colorbar: None,
        }
    }

    #[test]
    fn test_valid_map_chart() {
        assert!(map_chart().validate().is_ok());
    }

    #[test]
    fn test_filled_layer_needs_levels() {
        let mut config = map_chart();
        config.layers[0].levels = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_colormap_rejected() {
        let mut config = map_chart();
        config.layers[0].style = LayerStyle::Filled {
            colormap: "sparkles".to_string(),
            interpolation: "bilinear".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_interpolation_rejected() {
        let mut config = map_chart();
        config.layers[0].style = LayerStyle::Filled {
            colormap: "blwhre".to_string(),
            interpolation: "bicubic".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_level_range_rejected() {
        let mut config = map_chart();
        config.layers[0].levels = Some(LevelSpec::new(5.0, -5.0, 0.5));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_curve_requires_cartesian_frame() {
        let mut config = map_chart();
        config.layers[0].style = LayerStyle::Curve(CurveStyle {
            color: [0, 0, 0, 255],
            width: 1.0,
            error_bars: None,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_colorbar_requires_filled_layer() {
        let mut config = map_chart();
        config.layers[0].style = LayerStyle::Lines(LineStyle {
            color: [0, 0, 0, 255],
            width: 0.5,
            labels: false,
            label_size: 10.0,
            emphasis: None,
        });
        config.colorbar = Some(ColorbarConfig {
            ticks: vec![],
            draw_edges: true,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_canvas_rejected() {
        let mut config = map_chart();
        config.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_degenerate_extent_rejected() {
        let mut config = map_chart();
        config.frame = FrameConfig::Map(MapFrameConfig {
            center_lon: 0.0,
            extent: Some([100.0, 100.0, -60.0, 60.0]),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = map_chart();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ChartConfig = serde_json::from_str(&json).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.layers.len(), 1);
        assert_eq!(parsed.layers[0].variable, "ssta");
    }

    #[test]
    fn test_line_style_emphasis_width() {
        let style = LineStyle {
            color: [0, 0, 0, 255],
            width: 0.5,
            labels: true,
            label_size: 10.0,
            emphasis: Some(EmphasisLevel {
                level: 0.0,
                width: 1.5,
            }),
        };
        assert_eq!(style.width_for(0.0), 1.5);
        assert_eq!(style.width_for(10.0), 0.5);
    }
}
