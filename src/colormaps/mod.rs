//! Colormap implementations for chart rendering.
//!
//! This module provides the color schemes used to paint filled contour bands
//! and colorbars.

pub mod colormap;
pub mod diverging;
pub mod sequential;

pub use colormap::{get_colormap, Colormap};

// Re-export commonly used colormaps
pub use diverging::{BlWhRe, Coolwarm};
pub use sequential::SequentialColormap;
