//! Drawing frames: the coordinate systems charts are drawn into.
//!
//! A frame owns the mapping between data coordinates and canvas pixels, plus
//! the decorations (border, ticks, labels, title) drawn around the plot
//! area. Two frames exist: a plate carrée map window with a configurable
//! center longitude, and a plain Cartesian frame for XY plots.

use super::canvas::Canvas;
use super::text::{self, Anchor};

const BORDER_COLOR: [u8; 4] = [0, 0, 0, 255];
const TICK_LABEL_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 16.0;
const AXIS_LABEL_SIZE: f32 = 13.0;

/// The rectangle of the canvas that data is drawn into.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub x0: f32,
    pub y0: f32,
    pub width: f32,
    pub height: f32,
}

impl PlotArea {
    pub fn x1(&self) -> f32 {
        self.x0 + self.width
    }

    pub fn y1(&self) -> f32 {
        self.y0 + self.height
    }
}

/// A cylindrical (plate carrée) map window.
///
/// The visible extent is given in true degrees and may run past 360 (e.g.
/// 100..300 for a Pacific-centered view); the center longitude describes
/// where the frame is centered and never alters the data itself.
#[derive(Debug, Clone)]
pub struct MapFrame {
    pub area: PlotArea,
    pub center_lon: f64,
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl MapFrame {
    pub fn new(area: PlotArea, center_lon: f64, extent: Option<[f64; 4]>) -> Self {
        let [lon_min, lon_max, lat_min, lat_max] =
            extent.unwrap_or([center_lon - 180.0, center_lon + 180.0, -90.0, 90.0]);
        Self {
            area,
            center_lon,
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        }
    }

    pub fn x_of_lon(&self, lon: f64) -> f32 {
        let t = (lon - self.lon_min) / (self.lon_max - self.lon_min);
        self.area.x0 + (t as f32) * self.area.width
    }

    /// Latitude maximum maps to the top edge.
    pub fn y_of_lat(&self, lat: f64) -> f32 {
        let t = (self.lat_max - lat) / (self.lat_max - self.lat_min);
        self.area.y0 + (t as f32) * self.area.height
    }

    pub fn lon_of_x(&self, x: f32) -> f64 {
        let t = ((x - self.area.x0) / self.area.width) as f64;
        self.lon_min + t * (self.lon_max - self.lon_min)
    }

    pub fn lat_of_y(&self, y: f32) -> f64 {
        let t = ((y - self.area.y0) / self.area.height) as f64;
        self.lat_max - t * (self.lat_max - self.lat_min)
    }

}

/// A Cartesian frame with major/minor tick configuration.
#[derive(Debug, Clone)]
pub struct CartesianFrame {
    pub area: PlotArea,
    pub xlim: (f64, f64),
    pub ylim: (f64, f64),
    pub x_major: f64,
    pub y_major: f64,
    pub x_minor_per_major: u32,
    pub y_minor_per_major: u32,
}

impl CartesianFrame {
    pub fn x_of(&self, v: f64) -> f32 {
        let t = (v - self.xlim.0) / (self.xlim.1 - self.xlim.0);
        self.area.x0 + (t as f32) * self.area.width
    }

    pub fn y_of(&self, v: f64) -> f32 {
        let t = (self.ylim.1 - v) / (self.ylim.1 - self.ylim.0);
        self.area.y0 + (t as f32) * self.area.height
    }

    pub fn x_major_ticks(&self) -> Vec<f64> {
        ticks_between(self.xlim.0, self.xlim.1, self.x_major)
    }

    pub fn y_major_ticks(&self) -> Vec<f64> {
        ticks_between(self.ylim.0, self.ylim.1, self.y_major)
    }

    pub fn x_minor_ticks(&self) -> Vec<f64> {
        minor_ticks(self.xlim.0, self.xlim.1, self.x_major, self.x_minor_per_major)
    }

    pub fn y_minor_ticks(&self) -> Vec<f64> {
        minor_ticks(self.ylim.0, self.ylim.1, self.y_major, self.y_minor_per_major)
    }
}

/// Evenly spaced tick positions from `start` through `stop` inclusive.
fn ticks_between(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || stop <= start {
        return vec![];
    }
    let count = ((stop - start) / step + 1e-9).floor() as usize + 1;
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Minor tick positions, skipping those that coincide with majors.
fn minor_ticks(start: f64, stop: f64, major: f64, per_major: u32) -> Vec<f64> {
    if per_major < 2 {
        return vec![];
    }
    let minor = major / per_major as f64;
    ticks_between(start, stop, minor)
        .into_iter()
        .filter(|v| {
            let offset = (v - start) / major;
            (offset - offset.round()).abs() > 1e-6
        })
        .collect()
}

/// Draw the map frame border and title.
pub fn draw_map_decorations(canvas: &mut Canvas, frame: &MapFrame, title: Option<&str>) {
    let a = frame.area;
    canvas.stroke_rect(a.x0, a.y0, a.width, a.height, BORDER_COLOR, 1.2);

    if let Some(title) = title {
        text::draw_text(
            canvas,
            a.x0 + a.width / 2.0,
            a.y0 - TITLE_SIZE,
            title,
            TITLE_SIZE,
            BORDER_COLOR,
            Anchor::Middle,
            0.0,
        );
    }
}

/// Draw the Cartesian frame: border, inward major/minor ticks on all four
/// sides, tick labels on the bottom and left, and the title/axis labels.
pub fn draw_cartesian_decorations(
    canvas: &mut Canvas,
    frame: &CartesianFrame,
    title: Option<&str>,
    xlabel: Option<&str>,
    ylabel: Option<&str>,
) {
    let a = frame.area;
    canvas.stroke_rect(a.x0, a.y0, a.width, a.height, BORDER_COLOR, 1.2);

    let major_len = 8.0;
    let minor_len = 4.0;

    // Major x ticks with labels, mirrored on the top edge
    for v in frame.x_major_ticks() {
        let x = frame.x_of(v);
        canvas.stroke_line(x, a.y1(), x, a.y1() - major_len, BORDER_COLOR, 1.0);
        canvas.stroke_line(x, a.y0, x, a.y0 + major_len, BORDER_COLOR, 1.0);
        text::draw_text(
            canvas,
            x,
            a.y1() + TICK_LABEL_SIZE,
            &text::format_tick(v),
            TICK_LABEL_SIZE,
            BORDER_COLOR,
            Anchor::Middle,
            0.0,
        );
    }
    for v in frame.x_minor_ticks() {
        let x = frame.x_of(v);
        canvas.stroke_line(x, a.y1(), x, a.y1() - minor_len, BORDER_COLOR, 0.8);
        canvas.stroke_line(x, a.y0, x, a.y0 + minor_len, BORDER_COLOR, 0.8);
    }

    // Major y ticks with labels, mirrored on the right edge
    for v in frame.y_major_ticks() {
        let y = frame.y_of(v);
        canvas.stroke_line(a.x0, y, a.x0 + major_len, y, BORDER_COLOR, 1.0);
        canvas.stroke_line(a.x1(), y, a.x1() - major_len, y, BORDER_COLOR, 1.0);
        text::draw_text(
            canvas,
            a.x0 - 8.0,
            y,
            &text::format_tick(v),
            TICK_LABEL_SIZE,
            BORDER_COLOR,
            Anchor::End,
            0.0,
        );
    }
    for v in frame.y_minor_ticks() {
        let y = frame.y_of(v);
        canvas.stroke_line(a.x0, y, a.x0 + minor_len, y, BORDER_COLOR, 0.8);
        canvas.stroke_line(a.x1(), y, a.x1() - minor_len, y, BORDER_COLOR, 0.8);
    }

    if let Some(title) = title {
        text::draw_text(
            canvas,
            a.x0 + a.width / 2.0,
            a.y0 - TITLE_SIZE * 1.2,
            title,
            TITLE_SIZE,
            BORDER_COLOR,
            Anchor::Middle,
            0.0,
        );
    }
    if let Some(xlabel) = xlabel {
        text::draw_text(
            canvas,
            a.x0 + a.width / 2.0,
            a.y1() + TICK_LABEL_SIZE * 2.6,
            xlabel,
            AXIS_LABEL_SIZE,
            BORDER_COLOR,
            Anchor::Middle,
            0.0,
        );
    }
    if let Some(ylabel) = ylabel {
        text::draw_text(
            canvas,
            a.x0 - TICK_LABEL_SIZE * 3.2,
            a.y0 + a.height / 2.0,
            ylabel,
            AXIS_LABEL_SIZE,
            BORDER_COLOR,
            Anchor::Middle,
            -std::f32::consts::FRAC_PI_2,
        );
    }
}
