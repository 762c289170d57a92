//! Stroked vector glyphs for labels.
//!
//! Chart text (isoline labels, tick values, titles) is drawn as stroked
//! polyline glyphs rather than from a bundled font file. Each glyph is a set
//! of polylines in a unit box: x in [0, 0.6], y in [0, 1] with y growing
//! downward. Lowercase input renders as small caps.

use super::canvas::Canvas;

/// Horizontal anchoring of a text run relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Glyph advance in em units (glyph box plus spacing).
const ADVANCE: f32 = 0.78;

/// Width of a rendered text run in pixels.
pub fn text_width(text: &str, size: f32) -> f32 {
    let n = text.chars().count();
    if n == 0 {
        return 0.0;
    }
    (n as f32 * ADVANCE - (ADVANCE - 0.6)) * size
}

/// Draw a text run.
///
/// `(x, y)` is the anchor point on the text baseline axis: vertically it is
/// the center of the glyph box; horizontally it is the start, middle, or end
/// of the run per `anchor`. `angle` rotates the whole run around the anchor
/// point (radians, clockwise in screen coordinates).
#[allow(clippy::too_many_arguments)]
pub fn draw_text(
    canvas: &mut Canvas,
    x: f32,
    y: f32,
    text: &str,
    size: f32,
    color: [u8; 4],
    anchor: Anchor,
    angle: f32,
) {
    let total_width = text_width(text, size);
    let start_offset = match anchor {
        Anchor::Start => 0.0,
        Anchor::Middle => -total_width / 2.0,
        Anchor::End => -total_width,
    };

    let cos_a = angle.cos();
    let sin_a = angle.sin();
    let stroke_width = (size * 0.11).max(1.0);

    // Position of each glyph in unrotated run coordinates, then rotated
    // around the anchor point.
    let mut pen_x = start_offset;
    for ch in text.chars() {
        if let Some(polylines) = glyph(ch.to_ascii_uppercase()) {
            for polyline in polylines {
                let points: Vec<(f32, f32)> = polyline
                    .iter()
                    .map(|&(gx, gy)| {
                        // Glyph-local to run-local (vertical center at 0)
                        let rx = pen_x + gx * size;
                        let ry = (gy - 0.5) * size;
                        // Rotate around the anchor
                        (rx * cos_a - ry * sin_a + x, rx * sin_a + ry * cos_a + y)
                    })
                    .collect();
                canvas.stroke_polyline(&points, color, stroke_width, false);
            }
        }
        pen_x += ADVANCE * size;
    }
}

/// Draw a label over a filled background pad so it stays readable on top of
/// contour lines.
#[allow(clippy::too_many_arguments)]
pub fn draw_label_with_background(
    canvas: &mut Canvas,
    x: f32,
    y: f32,
    text: &str,
    size: f32,
    color: [u8; 4],
    background: [u8; 4],
    angle: f32,
) {
    let pad = size * 0.25;
    let half_w = text_width(text, size) / 2.0 + pad;
    let half_h = size / 2.0 + pad;

    let cos_a = angle.cos();
    let sin_a = angle.sin();
    let corners: Vec<(f32, f32)> = [
        (-half_w, -half_h),
        (half_w, -half_h),
        (half_w, half_h),
        (-half_w, half_h),
    ]
    .iter()
    .map(|&(cx, cy)| (cx * cos_a - cy * sin_a + x, cx * sin_a + cy * cos_a + y))
    .collect();
    canvas.fill_polygon(&corners, background);

    draw_text(canvas, x, y, text, size, color, Anchor::Middle, angle);
}

/// Format a tick value compactly: integers without a decimal point,
/// fractional values with their shortest representation.
pub fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Polylines for one glyph, or None for unknown characters (skipped).
#[allow(clippy::type_complexity)]
fn glyph(ch: char) -> Option<&'static [&'static [(f32, f32)]]> {
    let strokes: &'static [&'static [(f32, f32)]] = match ch {
        '0' => &[&[(0.0, 0.0), (0.6, 0.0), (0.6, 1.0), (0.0, 1.0), (0.0, 0.0)]],
        '1' => &[&[(0.3, 0.0), (0.3, 1.0)]],
        '2' => &[&[
            (0.0, 0.0),
            (0.6, 0.0),
            (0.6, 0.5),
            (0.0, 0.5),
            (0.0, 1.0),
            (0.6, 1.0),
        ]],
        '3' => &[
            &[(0.0, 0.0), (0.6, 0.0), (0.6, 1.0), (0.0, 1.0)],
            &[(0.2, 0.5), (0.6, 0.5)],
        ],
        '4' => &[
            &[(0.0, 0.0), (0.0, 0.5), (0.6, 0.5)],
            &[(0.6, 0.0), (0.6, 1.0)],
        ],
        '5' => &[&[
            (0.6, 0.0),
            (0.0, 0.0),
            (0.0, 0.5),
            (0.6, 0.5),
            (0.6, 1.0),
            (0.0, 1.0),
        ]],
        '6' => &[&[
            (0.6, 0.0),
            (0.0, 0.0),
            (0.0, 1.0),
            (0.6, 1.0),
            (0.6, 0.5),
            (0.0, 0.5),
        ]],
        '7' => &[&[(0.0, 0.0), (0.6, 0.0), (0.25, 1.0)]],
        '8' => &[
            &[(0.0, 0.0), (0.6, 0.0), (0.6, 1.0), (0.0, 1.0), (0.0, 0.0)],
            &[(0.0, 0.5), (0.6, 0.5)],
        ],
        '9' => &[&[
            (0.6, 0.5),
            (0.0, 0.5),
            (0.0, 0.0),
            (0.6, 0.0),
            (0.6, 1.0),
            (0.0, 1.0),
        ]],
        'A' => &[
            &[(0.0, 1.0), (0.3, 0.0), (0.6, 1.0)],
            &[(0.12, 0.62), (0.48, 0.62)],
        ],
        'B' => &[
            &[(0.0, 0.0), (0.0, 1.0)],
            &[(0.0, 0.0), (0.5, 0.0), (0.6, 0.25), (0.5, 0.5), (0.0, 0.5)],
            &[(0.5, 0.5), (0.6, 0.75), (0.5, 1.0), (0.0, 1.0)],
        ],
        'C' => &[&[
            (0.6, 0.1),
            (0.4, 0.0),
            (0.1, 0.0),
            (0.0, 0.2),
            (0.0, 0.8),
            (0.1, 1.0),
            (0.4, 1.0),
            (0.6, 0.9),
        ]],
        'D' => &[
            &[(0.0, 0.0), (0.0, 1.0)],
            &[(0.0, 0.0), (0.4, 0.0), (0.6, 0.25), (0.6, 0.75), (0.4, 1.0), (0.0, 1.0)],
        ],
        'E' => &[
            &[(0.6, 0.0), (0.0, 0.0), (0.0, 1.0), (0.6, 1.0)],
            &[(0.0, 0.5), (0.45, 0.5)],
        ],
        'F' => &[
            &[(0.6, 0.0), (0.0, 0.0), (0.0, 1.0)],
            &[(0.0, 0.5), (0.45, 0.5)],
        ],
        'G' => &[&[
            (0.6, 0.1),
            (0.4, 0.0),
            (0.1, 0.0),
            (0.0, 0.2),
            (0.0, 0.8),
            (0.1, 1.0),
            (0.5, 1.0),
            (0.6, 0.8),
            (0.6, 0.55),
            (0.35, 0.55),
        ]],
        'H' => &[
            &[(0.0, 0.0), (0.0, 1.0)],
            &[(0.6, 0.0), (0.6, 1.0)],
            &[(0.0, 0.5), (0.6, 0.5)],
        ],
        'I' => &[
            &[(0.3, 0.0), (0.3, 1.0)],
            &[(0.1, 0.0), (0.5, 0.0)],
            &[(0.1, 1.0), (0.5, 1.0)],
        ],
        'J' => &[&[(0.6, 0.0), (0.6, 0.85), (0.45, 1.0), (0.15, 1.0), (0.0, 0.85)]],
        'K' => &[
            &[(0.0, 0.0), (0.0, 1.0)],
            &[(0.6, 0.0), (0.0, 0.5), (0.6, 1.0)],
        ],
        'L' => &[&[(0.0, 0.0), (0.0, 1.0), (0.6, 1.0)]],
        'M' => &[&[(0.0, 1.0), (0.0, 0.0), (0.3, 0.45), (0.6, 0.0), (0.6, 1.0)]],
        'N' => &[&[(0.0, 1.0), (0.0, 0.0), (0.6, 1.0), (0.6, 0.0)]],
        'O' => &[&[(0.0, 0.0), (0.6, 0.0), (0.6, 1.0), (0.0, 1.0), (0.0, 0.0)]],
        'P' => &[&[
            (0.0, 1.0),
            (0.0, 0.0),
            (0.5, 0.0),
            (0.6, 0.2),
            (0.5, 0.45),
            (0.0, 0.45),
        ]],
        'Q' => &[
            &[(0.0, 0.0), (0.6, 0.0), (0.6, 1.0), (0.0, 1.0), (0.0, 0.0)],
            &[(0.35, 0.7), (0.6, 1.0)],
        ],
        'R' => &[
            &[(0.0, 1.0), (0.0, 0.0), (0.5, 0.0), (0.6, 0.2), (0.5, 0.45), (0.0, 0.45)],
            &[(0.3, 0.45), (0.6, 1.0)],
        ],
        'S' => &[&[
            (0.6, 0.0),
            (0.0, 0.0),
            (0.0, 0.5),
            (0.6, 0.5),
            (0.6, 1.0),
            (0.0, 1.0),
        ]],
        'T' => &[&[(0.0, 0.0), (0.6, 0.0)], &[(0.3, 0.0), (0.3, 1.0)]],
        'U' => &[&[(0.0, 0.0), (0.0, 0.85), (0.15, 1.0), (0.45, 1.0), (0.6, 0.85), (0.6, 0.0)]],
        'V' => &[&[(0.0, 0.0), (0.3, 1.0), (0.6, 0.0)]],
        'W' => &[&[(0.0, 0.0), (0.12, 1.0), (0.3, 0.55), (0.48, 1.0), (0.6, 0.0)]],
        'X' => &[&[(0.0, 0.0), (0.6, 1.0)], &[(0.6, 0.0), (0.0, 1.0)]],
        'Y' => &[
            &[(0.0, 0.0), (0.3, 0.5), (0.6, 0.0)],
            &[(0.3, 0.5), (0.3, 1.0)],
        ],
        'Z' => &[&[(0.0, 0.0), (0.6, 0.0), (0.0, 1.0), (0.6, 1.0)]],
        '-' => &[&[(0.1, 0.5), (0.5, 0.5)]],
        '+' => &[&[(0.3, 0.25), (0.3, 0.75)], &[(0.05, 0.5), (0.55, 0.5)]],
        '.' => &[&[(0.26, 0.93), (0.32, 0.99)]],
        ',' => &[&[(0.32, 0.88), (0.24, 1.02)]],
        ':' => &[&[(0.27, 0.25), (0.33, 0.31)], &[(0.27, 0.75), (0.33, 0.81)]],
        '/' => &[&[(0.6, 0.0), (0.0, 1.0)]],
        '(' => &[&[(0.45, 0.0), (0.3, 0.25), (0.3, 0.75), (0.45, 1.0)]],
        ')' => &[&[(0.15, 0.0), (0.3, 0.25), (0.3, 0.75), (0.15, 1.0)]],
        '°' => &[&[(0.2, 0.0), (0.4, 0.0), (0.4, 0.22), (0.2, 0.22), (0.2, 0.0)]],
        '%' => &[
            &[(0.6, 0.0), (0.0, 1.0)],
            &[(0.02, 0.02), (0.2, 0.02), (0.2, 0.25), (0.02, 0.25), (0.02, 0.02)],
            &[(0.4, 0.75), (0.58, 0.75), (0.58, 0.98), (0.4, 0.98), (0.4, 0.75)],
        ],
        ' ' => &[],
        _ => return None,
    };
    Some(strokes)
}
