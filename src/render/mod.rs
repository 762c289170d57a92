//! Chart rendering.
//!
//! The renderer draws ordered layers onto an RGBA canvas: a filled contour
//! base, map features, line contours with inline labels, or an XY curve,
//! followed by frame decorations and an optional colorbar.

pub mod canvas;
pub mod colorbar;
pub mod contour;
pub mod features;
pub mod frame;
pub mod text;
pub mod xy;

pub use canvas::Canvas;
pub use frame::{CartesianFrame, MapFrame, PlotArea};
