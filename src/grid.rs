//! Fixed-index selection and cyclic longitude padding.
//!
//! Charts never draw a full hypercube: they draw one 2D field (a map) or one
//! 1D series (a curve) carved out of a variable by pinning every other axis
//! to a fixed index. Selection is a pure slice: the pinned axes are dropped
//! and the remaining axes keep their values and order.

use ndarray::{Array1, Array2, Axis};
use std::collections::BTreeMap;

use crate::data_loader::Dataset;
use crate::error::{HadleyError, Result};

/// A 2D field over (y, x) with its coordinate vectors, ready for contouring.
///
/// For geographic data y is latitude and x is longitude, but the type only
/// assumes "row axis" and "column axis".
#[derive(Debug, Clone)]
pub struct Grid {
    pub data: Array2<f32>,
    pub x_coords: Vec<f64>,
    pub y_coords: Vec<f64>,
    pub x_name: String,
    pub y_name: String,
    pub units: Option<String>,
    pub long_name: Option<String>,
}

impl Grid {
    /// Append one wrap-around sample along the x (longitude) axis so that
    /// contouring across the seam of a cylindrical projection is continuous.
    ///
    /// The appended column equals the first column; the appended coordinate
    /// equals the first coordinate plus a full revolution.
    pub fn add_cyclic_x(&self) -> Grid {
        let (rows, cols) = self.data.dim();
        let mut padded = Array2::zeros((rows, cols + 1));
        padded
            .slice_mut(ndarray::s![.., ..cols])
            .assign(&self.data);
        padded
            .column_mut(cols)
            .assign(&self.data.column(0));

        let mut x_coords = self.x_coords.clone();
        x_coords.push(self.x_coords[0] + 360.0);

        Grid {
            data: padded,
            x_coords,
            y_coords: self.y_coords.clone(),
            x_name: self.x_name.clone(),
            y_name: self.y_name.clone(),
            units: self.units.clone(),
            long_name: self.long_name.clone(),
        }
    }
}

/// A 1D series over one remaining axis, for XY plots.
#[derive(Debug, Clone)]
pub struct Series {
    pub data: Array1<f32>,
    pub coords: Vec<f64>,
    pub axis_name: String,
    pub units: Option<String>,
    pub long_name: Option<String>,
}

impl Series {
    /// Assemble an axis label from the variable's descriptive attributes,
    /// e.g. "meridional wind m/s".
    pub fn label(&self) -> Option<String> {
        match (&self.long_name, &self.units) {
            (Some(name), Some(units)) => Some(format!("{} {}", name, units)),
            (Some(name), None) => Some(name.clone()),
            (None, Some(units)) => Some(units.clone()),
            (None, None) => None,
        }
    }
}

/// Apply fixed-index selectors to a variable, dropping the selected axes.
///
/// Returns the reduced data plus the names of the remaining axes, in the
/// variable's own axis order.
fn select(
    dataset: &Dataset,
    var_name: &str,
    selectors: &BTreeMap<String, usize>,
) -> Result<(ndarray::ArrayD<f32>, Vec<String>)> {
    let var = dataset.variable_metadata_checked(var_name)?;
    let array = dataset.variable_checked(var_name)?;

    // Every selector must name an axis of this variable and stay in range.
    let mut pinned: Vec<(usize, usize)> = Vec::with_capacity(selectors.len());
    for (axis, &index) in selectors {
        let pos = var
            .dimensions
            .iter()
            .position(|d| d == axis)
            .ok_or_else(|| HadleyError::DataNotFound {
                message: format!("Variable {} has no axis named {}", var_name, axis),
            })?;
        let size = var.shape[pos];
        if index >= size {
            return Err(HadleyError::InvalidParameter {
                param: axis.clone(),
                message: format!(
                    "Index {} out of range for axis {} of length {}",
                    index, axis, size
                ),
            });
        }
        pinned.push((pos, index));
    }

    // Drop selected axes from highest position to lowest so earlier
    // index_axis calls don't shift the positions of later ones.
    pinned.sort_by(|a, b| b.0.cmp(&a.0));

    let mut reduced = array.clone();
    for &(pos, index) in &pinned {
        reduced = reduced.index_axis(Axis(pos), index).to_owned();
    }

    let remaining: Vec<String> = var
        .dimensions
        .iter()
        .filter(|d| !selectors.contains_key(d.as_str()))
        .cloned()
        .collect();

    Ok((reduced, remaining))
}

/// Select a 2D grid from a variable; exactly two axes must remain.
pub fn select_grid(
    dataset: &Dataset,
    var_name: &str,
    selectors: &BTreeMap<String, usize>,
) -> Result<Grid> {
    let var = dataset.variable_metadata_checked(var_name)?.clone();
    let (reduced, remaining) = select(dataset, var_name, selectors)?;

    if remaining.len() != 2 {
        return Err(HadleyError::InvalidParameter {
            param: "select".to_string(),
            message: format!(
                "Grid selection for {} must leave 2 axes, got {:?}",
                var_name, remaining
            ),
        });
    }

    let data = reduced
        .into_dimensionality::<ndarray::Ix2>()
        .map_err(|e| HadleyError::DataNotFound {
            message: format!("Selected data for {} is not 2D: {}", var_name, e),
        })?;

    let y_name = remaining[0].clone();
    let x_name = remaining[1].clone();
    let y_coords = dataset.coordinate_checked(&y_name)?.clone();
    let x_coords = dataset.coordinate_checked(&x_name)?.clone();

    Ok(Grid {
        data,
        x_coords,
        y_coords,
        x_name,
        y_name,
        units: var.attr_text("units").map(str::to_string),
        long_name: var.attr_text("long_name").map(str::to_string),
    })
}

/// Select a 1D series from a variable; exactly one axis must remain.
pub fn select_series(
    dataset: &Dataset,
    var_name: &str,
    selectors: &BTreeMap<String, usize>,
) -> Result<Series> {
    let var = dataset.variable_metadata_checked(var_name)?.clone();
    let (reduced, remaining) = select(dataset, var_name, selectors)?;

    if remaining.len() != 1 {
        return Err(HadleyError::InvalidParameter {
            param: "select".to_string(),
            message: format!(
                "Series selection for {} must leave 1 axis, got {:?}",
                var_name, remaining
            ),
        });
    }

    let data = reduced
        .into_dimensionality::<ndarray::Ix1>()
        .map_err(|e| HadleyError::DataNotFound {
            message: format!("Selected data for {} is not 1D: {}", var_name, e),
        })?;

    let axis_name = remaining[0].clone();
    let coords = dataset.coordinate_checked(&axis_name)?.clone();

    Ok(Series {
        data,
        coords,
        axis_name,
        units: var.attr_text("units").map(str::to_string),
        long_name: var.attr_text("long_name").map(str::to_string),
    })
}
