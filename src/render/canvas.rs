//! RGBA drawing surface.
//!
//! Wraps a tiny-skia pixmap with the primitives the chart layers need:
//! stroked polylines, filled polygons, rectangles, per-pixel writes for the
//! filled-contour base layer, and PNG encoding of the finished figure.

use image::RgbaImage;
use std::path::Path;
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Mask, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

use crate::error::{HadleyError, Result};

/// An RGBA canvas with an optional rectangular clip region.
pub struct Canvas {
    pixmap: Pixmap,
    clip: Option<Mask>,
}

impl Canvas {
    /// Create a canvas filled with an opaque white page.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| HadleyError::Render {
            message: format!("Invalid canvas size {}x{}", width, height),
        })?;
        pixmap.fill(Color::WHITE);
        Ok(Self { pixmap, clip: None })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Confine subsequent path drawing to a rectangle.
    pub fn set_clip_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<()> {
        let rect = Rect::from_xywh(x, y, w, h).ok_or_else(|| HadleyError::Render {
            message: format!("Invalid clip rectangle {}x{} at ({}, {})", w, h, x, y),
        })?;
        let mut mask = Mask::new(self.pixmap.width(), self.pixmap.height()).ok_or_else(|| {
            HadleyError::Render {
                message: "Failed to allocate clip mask".to_string(),
            }
        })?;
        let path = PathBuilder::from_rect(rect);
        mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
        self.clip = Some(mask);
        Ok(())
    }

    /// Remove the clip region.
    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    /// Write one opaque-or-transparent pixel directly.
    ///
    /// Used by the filled-contour layer, which computes its own bounds; the
    /// clip region does not apply here.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return;
        }
        if color[3] == 0 {
            return;
        }
        let idx = (y * self.pixmap.width() + x) as usize;
        let pixel = tiny_skia::ColorU8::from_rgba(color[0], color[1], color[2], color[3])
            .premultiply();
        self.pixmap.pixels_mut()[idx] = pixel;
    }

    fn make_paint(color: [u8; 4]) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
        paint.anti_alias = true;
        paint
    }

    fn make_stroke(width: f32) -> Stroke {
        Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        }
    }

    /// Stroke a single line segment.
    pub fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: [u8; 4], width: f32) {
        self.stroke_polyline(&[(x1, y1), (x2, y2)], color, width, false);
    }

    /// Stroke a polyline, optionally closing it.
    pub fn stroke_polyline(&mut self, points: &[(f32, f32)], color: [u8; 4], width: f32, closed: bool) {
        if points.len() < 2 {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].0, points[0].1);
        for &(x, y) in &points[1..] {
            pb.line_to(x, y);
        }
        if closed {
            pb.close();
        }
        if let Some(path) = pb.finish() {
            let paint = Self::make_paint(color);
            let stroke = Self::make_stroke(width);
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), self.clip.as_ref());
        }
    }

    /// Fill a closed polygon.
    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: [u8; 4]) {
        if points.len() < 3 {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].0, points[0].1);
        for &(x, y) in &points[1..] {
            pb.line_to(x, y);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            let paint = Self::make_paint(color);
            self.pixmap.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                self.clip.as_ref(),
            );
        }
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 4]) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            let paint = Self::make_paint(color);
            self.pixmap
                .fill_rect(rect, &paint, Transform::identity(), self.clip.as_ref());
        }
    }

    /// Stroke the outline of an axis-aligned rectangle.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 4], width: f32) {
        self.stroke_polyline(
            &[(x, y), (x + w, y), (x + w, y + h), (x, y + h)],
            color,
            width,
            true,
        );
    }

    /// Convert the canvas into a straight-alpha RGBA image.
    pub fn into_image(self) -> Result<RgbaImage> {
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        let mut raw = Vec::with_capacity((width * height * 4) as usize);
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            raw.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        RgbaImage::from_raw(width, height, raw).ok_or_else(|| HadleyError::Render {
            message: "Failed to convert canvas into image buffer".to_string(),
        })
    }

    /// Encode the canvas as a PNG file.
    pub fn save_png(self, path: &Path) -> Result<()> {
        let image = self.into_image()?;
        image.save(path).map_err(|e| HadleyError::Render {
            message: format!("Failed to write {}: {}", path.display(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_white() {
        let canvas = Canvas::new(4, 3).unwrap();
        let image = canvas.into_image().unwrap();
        assert_eq!(image.dimensions(), (4, 3));
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(3, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_set_pixel() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.set_pixel(1, 2, [10, 20, 30, 255]);
        // Out-of-bounds writes are ignored
        canvas.set_pixel(100, 100, [1, 2, 3, 255]);

        let image = canvas.into_image().unwrap();
        assert_eq!(image.get_pixel(1, 2).0, [10, 20, 30, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_fill_rect() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.fill_rect(2.0, 2.0, 4.0, 4.0, [255, 0, 0, 255]);
        let image = canvas.into_image().unwrap();
        assert_eq!(image.get_pixel(4, 4).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(9, 9).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_clip_confines_fill() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.set_clip_rect(0.0, 0.0, 5.0, 10.0).unwrap();
        canvas.fill_rect(0.0, 0.0, 10.0, 10.0, [0, 0, 255, 255]);
        let image = canvas.into_image().unwrap();
        assert_eq!(image.get_pixel(2, 2).0, [0, 0, 255, 255]);
        // Right half stayed untouched
        assert_eq!(image.get_pixel(8, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_invalid_canvas_size() {
        assert!(Canvas::new(0, 10).is_err());
    }
}
