//! # hadley
//!
//! A static chart renderer for gridded climate datasets.
//!
//! This library loads NetCDF files into memory and renders them as PNG
//! charts: filled/line contour maps on a cylindrical projection, and XY line
//! plots with error bars.
//!
//! ## Key Features
//!
//! - **Reusable pipeline**: extract a fixed index, optionally pad the
//!   longitude seam, build a level set, draw ordered layers
//! - **Configuration-driven**: every chart is a [`config::ChartConfig`],
//!   from a built-in recipe or a JSON file
//! - **Matplotlib-inspired colormaps** for filled bands and colorbars
//!
//! ## Architecture
//!
//! - **Data Layer**: loads NetCDF files into memory and slices them
//! - **Level sets**: evenly spaced thresholds shared by fills and isolines
//! - **Renderer**: layered drawing onto an RGBA canvas, encoded as PNG

pub mod colormaps;
pub mod config;
pub mod data_loader;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod levels;
pub mod logging;
pub mod pipeline;
pub mod recipes;
pub mod render;

pub use config::{Args, ChartConfig};
pub use data_loader::{load_netcdf, AttributeValue, Dataset, Dimension, Metadata, Variable};
pub use error::{HadleyError, Result};
pub use levels::{LevelSet, LevelSpec};
pub use logging::{init_tracing, log_dataset_summary, time_stage};
pub use pipeline::{render_chart, render_chart_to_file};
