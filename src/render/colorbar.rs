//! Vertical colorbar for filled contour layers.
//!
//! One cell per level band, in the same band colors the fill layer uses,
//! with optional edges between cells and tick labels at configured values.

use super::canvas::Canvas;
use super::frame::PlotArea;
use super::text::{self, Anchor};
use crate::colormaps::Colormap;
use crate::config::ColorbarConfig;
use crate::levels::LevelSet;

const BAR_GAP: f32 = 16.0;
const BAR_WIDTH: f32 = 18.0;
const EDGE_COLOR: [u8; 4] = [0, 0, 0, 255];
const LABEL_SIZE: f32 = 11.0;

/// Draw a vertical colorbar to the right of the plot area.
pub fn draw_colorbar(
    canvas: &mut Canvas,
    area: &PlotArea,
    levels: &LevelSet,
    colormap: &dyn Colormap,
    config: &ColorbarConfig,
) {
    let num_bands = levels.num_bands();
    if num_bands == 0 {
        return;
    }

    let bar_x = area.x1() + BAR_GAP;
    let bar_y = area.y0;
    let bar_h = area.height;
    let cell_h = bar_h / num_bands as f32;

    // Cells run bottom-up: band 0 (lowest values) at the bottom.
    for band in 0..num_bands {
        let y = bar_y + bar_h - (band as f32 + 1.0) * cell_h;
        canvas.fill_rect(bar_x, y, BAR_WIDTH, cell_h, colormap.map_band(band, num_bands));
    }

    if config.draw_edges {
        for band in 1..num_bands {
            let y = bar_y + bar_h - band as f32 * cell_h;
            canvas.stroke_line(bar_x, y, bar_x + BAR_WIDTH, y, EDGE_COLOR, 0.8);
        }
    }
    canvas.stroke_rect(bar_x, bar_y, BAR_WIDTH, bar_h, EDGE_COLOR, 1.0);

    for &tick in &config.ticks {
        if tick < levels.first() || tick > levels.last() {
            continue;
        }
        let y = bar_y + bar_h * (1.0 - levels.position_of(tick) as f32);
        canvas.stroke_line(
            bar_x + BAR_WIDTH,
            y,
            bar_x + BAR_WIDTH + 4.0,
            y,
            EDGE_COLOR,
            1.0,
        );
        text::draw_text(
            canvas,
            bar_x + BAR_WIDTH + 8.0,
            y,
            &text::format_tick(tick),
            LABEL_SIZE,
            EDGE_COLOR,
            Anchor::Start,
            0.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormaps::get_colormap;

    #[test]
    fn test_colorbar_cells_match_band_colors() {
        let mut canvas = Canvas::new(300, 200).unwrap();
        let area = PlotArea {
            x0: 20.0,
            y0: 20.0,
            width: 160.0,
            height: 160.0,
        };
        let levels = LevelSet::arange(-2.0, 2.5, 0.5).unwrap();
        let cmap = get_colormap("blwhre").unwrap();
        let config = ColorbarConfig {
            ticks: vec![-2.0, 0.0, 2.0],
            draw_edges: true,
        };

        draw_colorbar(&mut canvas, &area, &levels, cmap.as_ref(), &config);

        let image = canvas.into_image().unwrap();
        let bar_x = (area.x1() + BAR_GAP + BAR_WIDTH / 2.0) as u32;

        // Sample the center of the bottom and top cells
        let num_bands = levels.num_bands() as f32;
        let cell_h = area.height / num_bands;
        let bottom_y = (area.y1() - cell_h / 2.0) as u32;
        let top_y = (area.y0 + cell_h / 2.0) as u32;

        assert_eq!(
            image.get_pixel(bar_x, bottom_y).0,
            cmap.map_band(0, levels.num_bands())
        );
        assert_eq!(
            image.get_pixel(bar_x, top_y).0,
            cmap.map_band(levels.num_bands() - 1, levels.num_bands())
        );
    }

    #[test]
    fn test_colorbar_empty_levels_is_noop() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        let area = PlotArea {
            x0: 10.0,
            y0: 10.0,
            width: 40.0,
            height: 80.0,
        };
        // A level set always has >= 1 value; a single level has zero bands
        let levels = LevelSet::arange(0.0, 0.5, 1.0).unwrap();
        assert_eq!(levels.num_bands(), 0);
        let cmap = get_colormap("coolwarm").unwrap();
        let config = ColorbarConfig {
            ticks: vec![],
            draw_edges: false,
        };

        draw_colorbar(&mut canvas, &area, &levels, cmap.as_ref(), &config);
        let image = canvas.into_image().unwrap();
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }
}
