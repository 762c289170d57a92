//! Map feature layer: land fill and coastlines.
//!
//! Features come from a GeoJSON FeatureCollection referenced by the chart
//! configuration. Polygon exterior rings are filled as land and stroked as
//! coastline; LineString features are stroked only. The layer sits above the
//! filled contours and below the line contours.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::canvas::Canvas;
use super::frame::MapFrame;
use crate::config::FeatureStyle;
use crate::error::{HadleyError, Result};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    #[serde(other)]
    Unsupported,
}

/// Geometry reduced to rings (closed, fillable) and open lines.
#[derive(Debug, Default)]
struct FeatureSet {
    rings: Vec<Vec<[f64; 2]>>,
    lines: Vec<Vec<[f64; 2]>>,
}

fn load_features(path: &Path) -> Result<FeatureSet> {
    let content = fs::read_to_string(path).map_err(|e| {
        HadleyError::Io(std::io::Error::new(
            e.kind(),
            format!("Feature file {}: {}", path.display(), e),
        ))
    })?;
    let collection: FeatureCollection = serde_json::from_str(&content)?;

    let mut set = FeatureSet::default();
    for feature in collection.features {
        match feature.geometry {
            Geometry::Polygon { coordinates } => {
                // Exterior ring only; coarse coastline data has no holes
                if let Some(exterior) = coordinates.into_iter().next() {
                    set.rings.push(exterior);
                }
            }
            Geometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    if let Some(exterior) = polygon.into_iter().next() {
                        set.rings.push(exterior);
                    }
                }
            }
            Geometry::LineString { coordinates } => set.lines.push(coordinates),
            Geometry::MultiLineString { coordinates } => set.lines.extend(coordinates),
            Geometry::Unsupported => {}
        }
    }

    debug!(
        rings = set.rings.len(),
        lines = set.lines.len(),
        "Loaded map features"
    );
    Ok(set)
}

fn project(frame: &MapFrame, ring: &[[f64; 2]], offset: f64) -> Vec<(f32, f32)> {
    ring.iter()
        .map(|&[lon, lat]| (frame.x_of_lon(lon + offset), frame.y_of_lat(lat)))
        .collect()
}

fn visible(frame: &MapFrame, pixels: &[(f32, f32)]) -> bool {
    let min_x = pixels.iter().map(|p| p.0).fold(f32::INFINITY, f32::min);
    let max_x = pixels.iter().map(|p| p.0).fold(f32::NEG_INFINITY, f32::max);
    max_x >= frame.area.x0 && min_x <= frame.area.x1()
}

/// Draw the land/coastline layer from a GeoJSON file.
pub fn draw_features(
    canvas: &mut Canvas,
    frame: &MapFrame,
    path: &Path,
    style: &FeatureStyle,
) -> Result<()> {
    let set = load_features(path)?;

    // Fill land first so coastline strokes stay crisp on top of it.
    for ring in &set.rings {
        for offset in [-360.0, 0.0, 360.0] {
            let pixels = project(frame, ring, offset);
            if visible(frame, &pixels) {
                canvas.fill_polygon(&pixels, style.land_color);
            }
        }
    }

    for ring in &set.rings {
        for offset in [-360.0, 0.0, 360.0] {
            let pixels = project(frame, ring, offset);
            if visible(frame, &pixels) {
                canvas.stroke_polyline(&pixels, style.coast_color, style.coast_width, true);
            }
        }
    }

    for line in &set.lines {
        for offset in [-360.0, 0.0, 360.0] {
            let pixels = project(frame, line, offset);
            if visible(frame, &pixels) {
                canvas.stroke_polyline(&pixels, style.coast_color, style.coast_width, false);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::frame::PlotArea;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "island"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[150.0, 10.0], [170.0, 10.0], [170.0, 30.0], [150.0, 30.0], [150.0, 10.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[100.0, 0.0], [140.0, 5.0]]
                }
            }
        ]
    }"#;

    fn write_sample() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_features() {
        let file = write_sample();
        let set = load_features(file.path()).unwrap();
        assert_eq!(set.rings.len(), 1);
        assert_eq!(set.lines.len(), 1);
        assert_eq!(set.rings[0].len(), 5);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = load_features(Path::new("/nonexistent/coast.geojson"));
        assert!(result.is_err());
    }

    #[test]
    fn test_draw_features_paints_land() {
        let file = write_sample();
        let mut canvas = Canvas::new(200, 120).unwrap();
        let frame = MapFrame::new(
            PlotArea {
                x0: 0.0,
                y0: 0.0,
                width: 200.0,
                height: 120.0,
            },
            -160.0,
            Some([100.0, 300.0, -60.0, 60.0]),
        );
        let style = FeatureStyle::default();

        draw_features(&mut canvas, &frame, file.path(), &style).unwrap();

        let image = canvas.into_image().unwrap();
        // Center of the island: lon 160 -> x = 60, lat 20 -> y = 40
        let px = image.get_pixel(60, 40).0;
        assert_eq!(px, style.land_color);
    }
}
