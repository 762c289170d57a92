//! The chart pipeline: load, select, pad, build levels, layered draw.
//!
//! Overlay ordering is fixed: filled contour layers first, then map
//! features, then line contour layers so labeled isolines stay visible above
//! the fill and the land mask. Frame decorations and the colorbar are drawn
//! last.

use image::RgbaImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::colormaps::get_colormap;
use crate::config::{ChartConfig, FrameConfig, LayerConfig, LayerStyle};
use crate::data_loader::{load_netcdf, Dataset};
use crate::error::{HadleyError, Result};
use crate::grid::{select_grid, select_series, Grid};
use crate::levels::LevelSet;
use crate::render::canvas::Canvas;
use crate::render::colorbar::draw_colorbar;
use crate::render::contour::{draw_filled_contours, draw_line_contours};
use crate::render::features::draw_features;
use crate::render::frame::{
    draw_cartesian_decorations, draw_map_decorations, CartesianFrame, MapFrame, PlotArea,
};
use crate::render::xy::draw_curve;

/// Render a chart to an RGBA image.
pub fn render_chart(config: &ChartConfig) -> Result<RgbaImage> {
    render_to_canvas(config)?.into_image()
}

/// Render a chart and write it as a PNG.
pub fn render_chart_to_file(config: &ChartConfig, path: &Path) -> Result<()> {
    let canvas = render_to_canvas(config)?;
    canvas.save_png(path)?;
    info!("Wrote chart to {}", path.display());
    Ok(())
}

fn render_to_canvas(config: &ChartConfig) -> Result<Canvas> {
    config.validate()?;

    // Each referenced file is opened once, however many layers read from it.
    let mut datasets: HashMap<PathBuf, Dataset> = HashMap::new();
    for layer in &config.layers {
        if !datasets.contains_key(&layer.file) {
            let dataset = load_netcdf(&layer.file)?;
            datasets.insert(layer.file.clone(), dataset);
        }
    }

    let mut canvas = Canvas::new(config.width, config.height)?;

    match &config.frame {
        FrameConfig::Map(map) => {
            let area = map_plot_area(config);
            let frame = MapFrame::new(area, map.center_lon, map.extent);
            render_map_chart(&mut canvas, &frame, config, &datasets)?;
        }
        FrameConfig::Cartesian(cart) => {
            let area = cartesian_plot_area(config);
            let frame = CartesianFrame {
                area,
                xlim: (cart.xlim[0], cart.xlim[1]),
                ylim: (cart.ylim[0], cart.ylim[1]),
                x_major: cart.x_major,
                y_major: cart.y_major,
                x_minor_per_major: cart.x_minor_per_major,
                y_minor_per_major: cart.y_minor_per_major,
            };
            render_cartesian_chart(&mut canvas, &frame, config, &datasets)?;
        }
    }

    Ok(canvas)
}

fn map_plot_area(config: &ChartConfig) -> PlotArea {
    let left = 40.0;
    let right = if config.colorbar.is_some() { 100.0 } else { 40.0 };
    let top = if config.title.is_some() { 56.0 } else { 40.0 };
    let bottom = 40.0;
    PlotArea {
        x0: left,
        y0: top,
        width: config.width as f32 - left - right,
        height: config.height as f32 - top - bottom,
    }
}

fn cartesian_plot_area(config: &ChartConfig) -> PlotArea {
    let left = 90.0;
    let right = 40.0;
    let top = if config.title.is_some() { 64.0 } else { 40.0 };
    let bottom = 80.0;
    PlotArea {
        x0: left,
        y0: top,
        width: config.width as f32 - left - right,
        height: config.height as f32 - top - bottom,
    }
}

/// Materialize a contour layer: select, optionally pad, build levels.
fn prepare_grid(
    layer: &LayerConfig,
    datasets: &HashMap<PathBuf, Dataset>,
) -> Result<(Grid, LevelSet)> {
    let dataset = &datasets[&layer.file];
    let mut grid = select_grid(dataset, &layer.variable, &layer.select)?;
    if layer.cyclic {
        grid = grid.add_cyclic_x();
    }
    let spec = layer.levels.ok_or_else(|| HadleyError::Config {
        message: format!("Layer {} has no level range", layer.variable),
    })?;
    let levels = spec.build()?;

    debug!(
        variable = %layer.variable,
        rows = grid.data.dim().0,
        cols = grid.data.dim().1,
        num_levels = levels.len(),
        cyclic = layer.cyclic,
        "Prepared contour layer"
    );

    Ok((grid, levels))
}

fn render_map_chart(
    canvas: &mut Canvas,
    frame: &MapFrame,
    config: &ChartConfig,
    datasets: &HashMap<PathBuf, Dataset>,
) -> Result<()> {
    let a = frame.area;
    canvas.set_clip_rect(a.x0, a.y0, a.width, a.height)?;

    // Kept for the colorbar after the layer pass
    let mut first_filled: Option<(LevelSet, String)> = None;

    // z0: filled contour base layers
    for layer in &config.layers {
        if let LayerStyle::Filled {
            colormap,
            interpolation,
        } = &layer.style
        {
            let (grid, levels) = prepare_grid(layer, datasets)?;
            let cmap = get_colormap(colormap)?;
            draw_filled_contours(canvas, frame, &grid, &levels, cmap.as_ref(), interpolation)?;
            if first_filled.is_none() {
                first_filled = Some((levels, colormap.clone()));
            }
        }
    }

    // z1: land mask and coastlines above the fill
    if let Some(features) = &config.features {
        draw_features(canvas, frame, &features.file, &features.style)?;
    }

    // z2: labeled isolines on top
    for layer in &config.layers {
        if let LayerStyle::Lines(style) = &layer.style {
            let (grid, levels) = prepare_grid(layer, datasets)?;
            draw_line_contours(canvas, frame, &grid, &levels, style)?;
        }
    }

    canvas.clear_clip();
    draw_map_decorations(canvas, frame, config.title.as_deref());

    if let Some(colorbar) = &config.colorbar {
        // Validation guarantees a filled layer exists when a colorbar is set
        if let Some((levels, colormap)) = &first_filled {
            let cmap = get_colormap(colormap)?;
            draw_colorbar(canvas, &frame.area, levels, cmap.as_ref(), colorbar);
        }
    }

    Ok(())
}

fn render_cartesian_chart(
    canvas: &mut Canvas,
    frame: &CartesianFrame,
    config: &ChartConfig,
    datasets: &HashMap<PathBuf, Dataset>,
) -> Result<()> {
    let a = frame.area;
    canvas.set_clip_rect(a.x0, a.y0, a.width, a.height)?;

    let mut derived_ylabel: Option<String> = None;

    for layer in &config.layers {
        if let LayerStyle::Curve(style) = &layer.style {
            let dataset = &datasets[&layer.file];
            let series = select_series(dataset, &layer.variable, &layer.select)?;
            if derived_ylabel.is_none() {
                derived_ylabel = series.label();
            }
            draw_curve(canvas, frame, &series, style)?;
        }
    }

    canvas.clear_clip();

    let (xlabel, ylabel) = match &config.frame {
        FrameConfig::Cartesian(cart) => (
            cart.xlabel.clone(),
            cart.ylabel.clone().or(derived_ylabel),
        ),
        _ => (None, None),
    };
    draw_cartesian_decorations(
        canvas,
        frame,
        config.title.as_deref(),
        xlabel.as_deref(),
        ylabel.as_deref(),
    );

    Ok(())
}
