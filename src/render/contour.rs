//! Contour rendering: filled bands and isolines.
//!
//! Isolines come from a marching-squares pass over the grid, chained into
//! polylines and smoothed with one round of corner cutting. Filled bands are
//! painted per pixel by inverse-projecting each pixel into data coordinates,
//! sampling the grid bilinearly, and quantizing into the level set's bands.

use ndarray::ArrayView2;
use tracing::debug;

use super::canvas::Canvas;
use super::frame::MapFrame;
use super::text;
use crate::colormaps::Colormap;
use crate::config::LineStyle;
use crate::error::{HadleyError, Result};
use crate::grid::Grid;
use crate::interpolation::{common, get_interpolator, Interpolator};
use crate::levels::LevelSet;

/// Minimum on-screen length before a contour receives any label.
const LABEL_SPACING: f32 = 150.0;
/// Minimum distance between two labels.
const LABEL_CLEARANCE: f32 = 48.0;

/// A point in 2D space (grid-index or pixel coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A line segment between two points
#[derive(Debug, Clone)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// A complete contour line (polyline) at one level
#[derive(Debug, Clone)]
pub struct Contour {
    pub level: f64,
    pub points: Vec<Point>,
    pub closed: bool,
}

/// Marching squares over a 2D grid, in grid-index space.
pub fn march_squares(data: &ArrayView2<f32>, level: f32) -> Vec<Segment> {
    let (rows, cols) = data.dim();
    if rows < 2 || cols < 2 {
        return vec![];
    }

    let mut segments = Vec::new();

    for y in 0..(rows - 1) {
        for x in 0..(cols - 1) {
            let tl = data[[y, x]];
            let tr = data[[y, x + 1]];
            let bl = data[[y + 1, x]];
            let br = data[[y + 1, x + 1]];

            if tl.is_nan() || tr.is_nan() || bl.is_nan() || br.is_nan() {
                continue;
            }

            let mut cell_index = 0u8;
            if tl >= level {
                cell_index |= 1;
            }
            if tr >= level {
                cell_index |= 2;
            }
            if br >= level {
                cell_index |= 4;
            }
            if bl >= level {
                cell_index |= 8;
            }

            segments.extend(cell_segments(
                cell_index, x as f32, y as f32, tl, tr, br, bl, level,
            ));
        }
    }

    segments
}

/// Line segments for one marching-squares cell, with edge crossings placed
/// by linear interpolation.
#[allow(clippy::too_many_arguments)]
fn cell_segments(
    cell_index: u8,
    x: f32,
    y: f32,
    tl: f32,
    tr: f32,
    br: f32,
    bl: f32,
    level: f32,
) -> Vec<Segment> {
    let top = interpolate_edge(x, y, x + 1.0, y, tl, tr, level);
    let right = interpolate_edge(x + 1.0, y, x + 1.0, y + 1.0, tr, br, level);
    let bottom = interpolate_edge(x, y + 1.0, x + 1.0, y + 1.0, bl, br, level);
    let left = interpolate_edge(x, y, x, y + 1.0, tl, bl, level);

    match cell_index {
        0 | 15 => vec![],
        1 | 14 => vec![Segment { start: left, end: top }],
        2 | 13 => vec![Segment { start: top, end: right }],
        3 | 12 => vec![Segment { start: left, end: right }],
        4 | 11 => vec![Segment { start: right, end: bottom }],
        5 => vec![
            // Saddle: two separate segments
            Segment { start: left, end: top },
            Segment { start: right, end: bottom },
        ],
        6 | 9 => vec![Segment { start: top, end: bottom }],
        7 | 8 => vec![Segment { start: left, end: bottom }],
        10 => vec![
            Segment { start: top, end: right },
            Segment { start: left, end: bottom },
        ],
        _ => vec![],
    }
}

fn interpolate_edge(x1: f32, y1: f32, x2: f32, y2: f32, val1: f32, val2: f32, level: f32) -> Point {
    if (val2 - val1).abs() < 1e-6 {
        return Point::new((x1 + x2) / 2.0, (y1 + y2) / 2.0);
    }

    let t = ((level - val1) / (val2 - val1)).clamp(0.0, 1.0);
    Point::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1))
}

/// Connect unordered segments into continuous polylines.
pub fn connect_segments(segments: Vec<Segment>) -> Vec<Contour> {
    if segments.is_empty() {
        return vec![];
    }

    let mut contours = Vec::new();
    let mut used = vec![false; segments.len()];
    let epsilon = 0.001;

    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }

        let mut points = vec![segments[start_idx].start, segments[start_idx].end];
        used[start_idx] = true;

        let mut changed = true;
        while changed {
            changed = false;
            let current_end = *points.last().unwrap();

            for (i, seg) in segments.iter().enumerate() {
                if used[i] {
                    continue;
                }

                let dist_start = ((seg.start.x - current_end.x).powi(2)
                    + (seg.start.y - current_end.y).powi(2))
                .sqrt();
                let dist_end = ((seg.end.x - current_end.x).powi(2)
                    + (seg.end.y - current_end.y).powi(2))
                .sqrt();

                if dist_start < epsilon {
                    points.push(seg.end);
                    used[i] = true;
                    changed = true;
                    break;
                } else if dist_end < epsilon {
                    points.push(seg.start);
                    used[i] = true;
                    changed = true;
                    break;
                }
            }
        }

        let first = points[0];
        let last = *points.last().unwrap();
        let closed = ((first.x - last.x).powi(2) + (first.y - last.y).powi(2)).sqrt() < epsilon;

        if points.len() >= 2 {
            contours.push(Contour {
                level: 0.0, // set by the caller
                points,
                closed,
            });
        }
    }

    contours
}

/// One round of Chaikin corner cutting.
pub fn smooth_contour(contour: &Contour, iterations: u32) -> Contour {
    if iterations == 0 || contour.points.len() < 3 {
        return contour.clone();
    }

    let mut points = contour.points.clone();

    for _ in 0..iterations {
        let mut new_points = Vec::with_capacity(points.len() * 2);

        let segment_count = if contour.closed {
            points.len()
        } else {
            points.len() - 1
        };
        for i in 0..segment_count {
            let p1 = points[i];
            let p2 = points[(i + 1) % points.len()];

            new_points.push(Point::new(
                0.75 * p1.x + 0.25 * p2.x,
                0.75 * p1.y + 0.25 * p2.y,
            ));
            new_points.push(Point::new(
                0.25 * p1.x + 0.75 * p2.x,
                0.25 * p1.y + 0.75 * p2.y,
            ));
        }

        if !contour.closed {
            new_points.insert(0, points[0]);
            if let Some(&last) = points.last() {
                new_points.push(last);
            }
        }

        points = new_points;
    }

    Contour {
        level: contour.level,
        points,
        closed: contour.closed,
    }
}

/// Coordinate value at a fractional grid index (linear between samples).
fn fractional_coord(coords: &[f64], index: f32) -> f64 {
    let clamped = common::clamp_index(index as f64, coords.len());
    let lo = clamped.floor() as usize;
    let hi = (lo + 1).min(coords.len() - 1);
    let t = clamped - lo as f64;
    coords[lo] * (1.0 - t) + coords[hi] * t
}

/// Samples a grid at (lon, lat) data coordinates, tolerating flipped
/// coordinate axes and longitude aliases.
pub struct GridSampler {
    flat: Vec<f32>,
    shape: [usize; 2],
    x_asc: Vec<f64>,
    y_asc: Vec<f64>,
    x_rev: bool,
    y_rev: bool,
    interpolator: Box<dyn Interpolator>,
}

impl GridSampler {
    pub fn new(grid: &Grid, interpolation: &str) -> Result<Self> {
        let (rows, cols) = grid.data.dim();
        if grid.x_coords.len() != cols || grid.y_coords.len() != rows {
            return Err(HadleyError::Render {
                message: format!(
                    "Grid shape ({}, {}) does not match coordinates ({}, {})",
                    rows,
                    cols,
                    grid.y_coords.len(),
                    grid.x_coords.len()
                ),
            });
        }

        let x_rev = grid.x_coords.first() > grid.x_coords.last();
        let y_rev = grid.y_coords.first() > grid.y_coords.last();
        let x_asc = if x_rev {
            grid.x_coords.iter().rev().cloned().collect()
        } else {
            grid.x_coords.clone()
        };
        let y_asc = if y_rev {
            grid.y_coords.iter().rev().cloned().collect()
        } else {
            grid.y_coords.clone()
        };

        let standard = grid.data.as_standard_layout();
        let flat = standard.iter().cloned().collect();

        Ok(Self {
            flat,
            shape: [rows, cols],
            x_asc,
            y_asc,
            x_rev,
            y_rev,
            interpolator: get_interpolator(interpolation)?,
        })
    }

    /// Sample at a single (lon, lat); None outside the grid.
    fn sample_exact(&self, lon: f64, lat: f64) -> Option<f32> {
        let fx = common::coord_to_index(lon, &self.x_asc)?;
        let fy = common::coord_to_index(lat, &self.y_asc)?;
        let fx = if self.x_rev {
            (self.shape[1] - 1) as f64 - fx
        } else {
            fx
        };
        let fy = if self.y_rev {
            (self.shape[0] - 1) as f64 - fy
        } else {
            fy
        };

        self.interpolator
            .interpolate(&self.flat, &self.shape, &[fy, fx])
            .ok()
            .filter(|v| v.is_finite())
    }

    /// Sample at (lon, lat), also trying the ±360° longitude aliases.
    pub fn sample(&self, lon: f64, lat: f64) -> Option<f32> {
        for candidate in [lon, lon - 360.0, lon + 360.0] {
            if let Some(v) = self.sample_exact(candidate, lat) {
                return Some(v);
            }
        }
        None
    }
}

/// Paint the filled-contour base layer.
///
/// Pixels whose value falls outside the level range, or which miss the grid
/// entirely, are left unpainted.
pub fn draw_filled_contours(
    canvas: &mut Canvas,
    frame: &MapFrame,
    grid: &Grid,
    levels: &LevelSet,
    colormap: &dyn Colormap,
    interpolation: &str,
) -> Result<()> {
    if levels.num_bands() == 0 {
        return Err(HadleyError::Render {
            message: "Filled contours need at least two levels".to_string(),
        });
    }

    let sampler = GridSampler::new(grid, interpolation)?;
    let num_bands = levels.num_bands();

    let x0 = frame.area.x0.max(0.0) as u32;
    let y0 = frame.area.y0.max(0.0) as u32;
    let x1 = (frame.area.x1() as u32).min(canvas.width());
    let y1 = (frame.area.y1() as u32).min(canvas.height());

    for py in y0..y1 {
        let lat = frame.lat_of_y(py as f32 + 0.5);
        for px in x0..x1 {
            let lon = frame.lon_of_x(px as f32 + 0.5);
            if let Some(value) = sampler.sample(lon, lat) {
                if let Some(band) = levels.band_of(value as f64) {
                    canvas.set_pixel(px, py, colormap.map_band(band, num_bands));
                }
            }
        }
    }

    Ok(())
}

/// Draw the line-contour layer with optional inline labels.
pub fn draw_line_contours(
    canvas: &mut Canvas,
    frame: &MapFrame,
    grid: &Grid,
    levels: &LevelSet,
    style: &LineStyle,
) -> Result<()> {
    let (rows, cols) = grid.data.dim();
    if grid.x_coords.len() != cols || grid.y_coords.len() != rows {
        return Err(HadleyError::Render {
            message: format!(
                "Grid shape ({}, {}) does not match coordinates ({}, {})",
                rows,
                cols,
                grid.y_coords.len(),
                grid.x_coords.len()
            ),
        });
    }

    let mut contours = Vec::new();
    for &level in levels.values() {
        let segments = march_squares(&grid.data.view(), level as f32);
        let mut connected = connect_segments(segments);
        for contour in &mut connected {
            contour.level = level;
            *contour = smooth_contour(contour, 1);
        }
        contours.extend(connected);
    }

    debug!(
        num_levels = levels.len(),
        num_contours = contours.len(),
        "Generated line contours"
    );

    let mut labels: Vec<(f32, f32, f32, String)> = Vec::new();

    for contour in &contours {
        let width = style.width_for(contour.level);

        // The grid may span the seam of the frame; draw each alias and let
        // the clip region discard the off-frame copies.
        for offset in [-360.0, 0.0, 360.0] {
            let pixels: Vec<(f32, f32)> = contour
                .points
                .iter()
                .map(|p| {
                    let lon = fractional_coord(&grid.x_coords, p.x) + offset;
                    let lat = fractional_coord(&grid.y_coords, p.y);
                    (frame.x_of_lon(lon), frame.y_of_lat(lat))
                })
                .collect();

            // Skip aliases that lie entirely outside the plot area.
            let min_x = pixels.iter().map(|p| p.0).fold(f32::INFINITY, f32::min);
            let max_x = pixels.iter().map(|p| p.0).fold(f32::NEG_INFINITY, f32::max);
            if max_x < frame.area.x0 || min_x > frame.area.x1() {
                continue;
            }

            canvas.stroke_polyline(&pixels, style.color, width, contour.closed);

            if style.labels {
                collect_label_positions(
                    &pixels,
                    &text::format_tick(contour.level),
                    style.label_size,
                    frame,
                    &mut labels,
                );
            }
        }
    }

    for (x, y, angle, label) in &labels {
        text::draw_label_with_background(
            canvas,
            *x,
            *y,
            label,
            style.label_size,
            style.color,
            [255, 255, 255, 220],
            *angle,
        );
    }

    Ok(())
}

/// Walk a contour polyline in pixel space and pick evenly spaced, in-bounds,
/// non-overlapping label positions aligned with the local line direction.
fn collect_label_positions(
    pixels: &[(f32, f32)],
    label: &str,
    label_size: f32,
    frame: &MapFrame,
    labels: &mut Vec<(f32, f32, f32, String)>,
) {
    let total_length: f32 = pixels
        .windows(2)
        .map(|w| ((w[1].0 - w[0].0).powi(2) + (w[1].1 - w[0].1).powi(2)).sqrt())
        .sum();
    if total_length < LABEL_SPACING * 0.5 {
        return;
    }

    let num_labels = ((total_length / LABEL_SPACING).floor() as usize).max(1);
    let spacing = total_length / (num_labels as f32 + 1.0);
    let margin = label_size * 2.0;

    let mut accumulated = 0.0;
    let mut next_label_at = spacing;
    let mut placed = 0;

    for w in pixels.windows(2) {
        if placed >= num_labels {
            break;
        }

        let (x1, y1) = w[0];
        let (x2, y2) = w[1];
        let dx = x2 - x1;
        let dy = y2 - y1;
        let segment_length = (dx * dx + dy * dy).sqrt();

        while accumulated + segment_length >= next_label_at && placed < num_labels {
            let t = (next_label_at - accumulated) / segment_length;
            let x = x1 + t * dx;
            let y = y1 + t * dy;

            let in_bounds = x > frame.area.x0 + margin
                && x < frame.area.x1() - margin
                && y > frame.area.y0 + margin
                && y < frame.area.y1() - margin;

            if in_bounds {
                let mut angle = dy.atan2(dx);
                // Keep text upright
                if angle.abs() > std::f32::consts::FRAC_PI_2 {
                    angle += std::f32::consts::PI;
                }

                let overlaps = labels.iter().any(|(lx, ly, _, _)| {
                    (lx - x).powi(2) + (ly - y).powi(2) < LABEL_CLEARANCE * LABEL_CLEARANCE
                });
                if !overlaps {
                    labels.push((x, y, angle, label.to_string()));
                }
            }

            next_label_at += spacing;
            placed += 1;
        }

        accumulated += segment_length;
    }
}
