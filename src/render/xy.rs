//! XY curve rendering with error bars.

use super::canvas::Canvas;
use super::frame::CartesianFrame;
use crate::config::CurveStyle;
use crate::error::{HadleyError, Result};
use crate::grid::Series;

/// Draw a series as a polyline, with optional error-bar whiskers.
///
/// The frame's x-limits crop the visible window; points outside are clipped
/// by the canvas clip region rather than dropped, so the curve runs cleanly
/// off the frame edge.
pub fn draw_curve(
    canvas: &mut Canvas,
    frame: &CartesianFrame,
    series: &Series,
    style: &CurveStyle,
) -> Result<()> {
    if series.data.len() != series.coords.len() {
        return Err(HadleyError::Render {
            message: format!(
                "Series length {} does not match coordinate length {}",
                series.data.len(),
                series.coords.len()
            ),
        });
    }
    if series.data.is_empty() {
        return Err(HadleyError::Render {
            message: "Cannot draw an empty series".to_string(),
        });
    }

    let pixels: Vec<(f32, f32)> = series
        .coords
        .iter()
        .zip(series.data.iter())
        .filter(|(_, v)| v.is_finite())
        .map(|(&c, &v)| (frame.x_of(c), frame.y_of(v as f64)))
        .collect();

    canvas.stroke_polyline(&pixels, style.color, style.width, false);

    if let Some(bars) = &style.error_bars {
        let stride = bars.stride.max(1);
        for (i, (&c, &v)) in series.coords.iter().zip(series.data.iter()).enumerate() {
            if i % stride != 0 || !v.is_finite() {
                continue;
            }
            let x = frame.x_of(c);
            let y_top = frame.y_of(v as f64 + bars.size);
            let y_bottom = frame.y_of(v as f64 - bars.size);

            canvas.stroke_line(x, y_top, x, y_bottom, style.color, style.width);
            canvas.stroke_line(x - bars.cap, y_top, x + bars.cap, y_top, style.color, style.width);
            canvas.stroke_line(
                x - bars.cap,
                y_bottom,
                x + bars.cap,
                y_bottom,
                style.color,
                style.width,
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorBarStyle;
    use crate::render::frame::PlotArea;
    use ndarray::Array1;

    fn frame() -> CartesianFrame {
        CartesianFrame {
            area: PlotArea {
                x0: 10.0,
                y0: 10.0,
                width: 100.0,
                height: 80.0,
            },
            xlim: (0.0, 10.0),
            ylim: (-5.0, 5.0),
            x_major: 2.0,
            y_major: 1.0,
            x_minor_per_major: 2,
            y_minor_per_major: 2,
        }
    }

    fn series(values: Vec<f32>) -> Series {
        let coords: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
        Series {
            data: Array1::from(values),
            coords,
            axis_name: "lon".to_string(),
            units: None,
            long_name: None,
        }
    }

    #[test]
    fn test_draw_curve_paints_line() {
        let mut canvas = Canvas::new(120, 100).unwrap();
        let style = CurveStyle {
            color: [200, 0, 0, 255],
            width: 2.0,
            error_bars: None,
        };

        draw_curve(&mut canvas, &frame(), &series(vec![0.0; 11]), &style).unwrap();

        let image = canvas.into_image().unwrap();
        // y=0 maps to the vertical center of the plot area
        let y = frame().y_of(0.0) as u32;
        let px = image.get_pixel(60, y).0;
        assert_eq!(px, [200, 0, 0, 255]);
    }

    #[test]
    fn test_draw_curve_with_error_bars() {
        let mut canvas = Canvas::new(120, 100).unwrap();
        let style = CurveStyle {
            color: [0, 0, 0, 255],
            width: 2.0,
            error_bars: Some(ErrorBarStyle {
                stride: 5,
                size: 2.0,
                cap: 3.0,
            }),
        };

        draw_curve(&mut canvas, &frame(), &series(vec![0.0; 11]), &style).unwrap();

        let image = canvas.into_image().unwrap();
        // A whisker rises 2 data units above the curve at x index 5
        let x = frame().x_of(5.0) as u32;
        let y = frame().y_of(1.5) as u32;
        assert_eq!(image.get_pixel(x, y).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_draw_curve_rejects_mismatched_series() {
        let mut canvas = Canvas::new(120, 100).unwrap();
        let style = CurveStyle {
            color: [0, 0, 0, 255],
            width: 1.0,
            error_bars: None,
        };
        let mut bad = series(vec![1.0, 2.0, 3.0]);
        bad.coords.pop();

        assert!(draw_curve(&mut canvas, &frame(), &bad, &style).is_err());
    }
}
