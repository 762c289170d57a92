//! Built-in chart recipes.
//!
//! Each recipe is a fully hard-coded [`ChartConfig`]: file names, indices,
//! level ranges, and styles are fixed, so a recipe run is deterministic given
//! its input files.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::{
    ChartConfig, ColorbarConfig, CurveStyle, EmphasisLevel, ErrorBarStyle, FeatureConfig,
    FeatureStyle, FrameConfig, LayerConfig, LayerStyle, LineStyle, MapFrameConfig,
    CartesianFrameConfig,
};
use crate::error::{HadleyError, Result};
use crate::levels::LevelSpec;

/// Registry of built-in recipes.
static RECIPES: Lazy<BTreeMap<&'static str, fn() -> ChartConfig>> = Lazy::new(|| {
    let mut map: BTreeMap<&'static str, fn() -> ChartConfig> = BTreeMap::new();
    map.insert("sst-olr", sst_olr_overlay as fn() -> ChartConfig);
    map.insert("zonal-wind", zonal_wind_errorbars as fn() -> ChartConfig);
    map
});

/// Names of the built-in recipes, sorted.
pub fn recipe_names() -> Vec<&'static str> {
    RECIPES.keys().copied().collect()
}

/// Look up a recipe by name.
pub fn get_recipe(name: &str) -> Result<ChartConfig> {
    RECIPES
        .get(name)
        .map(|build| build())
        .ok_or_else(|| HadleyError::InvalidParameter {
            param: "recipe".to_string(),
            message: format!(
                "Unknown recipe: {} (available: {})",
                name,
                recipe_names().join(", ")
            ),
        })
}

/// SST anomaly filled contours with OLR anomaly isolines overlaid on a
/// Pacific-centered map, land mask and coastline above the fill, labeled
/// isolines with the zero line drawn heavier, and a colorbar.
fn sst_olr_overlay() -> ChartConfig {
    ChartConfig {
        title: None,
        width: 800,
        height: 800,
        frame: FrameConfig::Map(MapFrameConfig {
            center_lon: -160.0,
            extent: Some([100.0, 300.0, -60.0, 60.0]),
        }),
        layers: vec![
            LayerConfig {
                file: PathBuf::from("data/sst8292a.nc"),
                variable: "SSTA".to_string(),
                // December 1982
                select: BTreeMap::from([("time".to_string(), 11)]),
                cyclic: true,
                levels: Some(LevelSpec::new(-5.5, 6.0, 0.5)),
                style: LayerStyle::Filled {
                    colormap: "blwhre".to_string(),
                    interpolation: "bilinear".to_string(),
                },
            },
            LayerConfig {
                file: PathBuf::from("data/olr7991a.nc"),
                variable: "OLRA".to_string(),
                select: BTreeMap::from([("time".to_string(), 47)]),
                cyclic: true,
                levels: Some(LevelSpec::new(-80.0, 50.0, 10.0)),
                style: LayerStyle::Lines(LineStyle {
                    color: [0, 0, 0, 255],
                    width: 0.5,
                    labels: true,
                    label_size: 10.0,
                    emphasis: Some(EmphasisLevel {
                        level: 0.0,
                        width: 1.4,
                    }),
                }),
            },
        ],
        features: Some(FeatureConfig {
            file: PathBuf::from("data/coastline.geojson"),
            style: FeatureStyle::default(),
        }),
        colorbar: Some(ColorbarConfig {
            ticks: (-5..=5).map(f64::from).collect(),
            draw_edges: true,
        }),
    }
}

/// Meridional wind at one time step and latitude row, drawn as an XY curve
/// over longitude with error-bar whiskers.
fn zonal_wind_errorbars() -> ChartConfig {
    ChartConfig {
        title: Some("Example of error bars".to_string()),
        width: 800,
        height: 800,
        frame: FrameConfig::Cartesian(CartesianFrameConfig {
            xlim: [0.0, 70.0],
            ylim: [-9.0, 9.0],
            x_major: 10.0,
            y_major: 3.0,
            x_minor_per_major: 5,
            y_minor_per_major: 3,
            xlabel: None,
            ylabel: None,
        }),
        layers: vec![LayerConfig {
            file: PathBuf::from("data/uv300.nc"),
            variable: "V".to_string(),
            select: BTreeMap::from([("time".to_string(), 0), ("lat".to_string(), 30)]),
            cyclic: false,
            levels: None,
            style: LayerStyle::Curve(CurveStyle {
                color: [0, 0, 0, 255],
                width: 1.5,
                error_bars: Some(ErrorBarStyle {
                    stride: 8,
                    size: 2.5,
                    cap: 4.0,
                }),
            }),
        }],
        features: None,
        colorbar: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contents() {
        assert_eq!(recipe_names(), vec!["sst-olr", "zonal-wind"]);
    }

    #[test]
    fn test_unknown_recipe() {
        assert!(get_recipe("nope").is_err());
    }

    #[test]
    fn test_all_recipes_validate() {
        for name in recipe_names() {
            let config = get_recipe(name).unwrap();
            assert!(config.validate().is_ok(), "recipe {} failed validation", name);
        }
    }

    #[test]
    fn test_sst_olr_levels() {
        let config = get_recipe("sst-olr").unwrap();
        let levels = config.layers[0].levels.unwrap().build().unwrap();
        assert_eq!(levels.len(), 23);
        assert_eq!(levels.first(), -5.5);
        assert_eq!(levels.last(), 5.5);
    }
}
