//! NetCDF data loading functionality.
//!
//! This module handles reading NetCDF files and loading them into memory.
//! It converts NetCDF variables and metadata into a format that can be
//! efficiently sliced and rendered by the chart pipeline.

use ndarray::{Array, IxDyn};
use netcdf::types::NcVariableType;
use netcdf::{self, Attribute, Variable as NetCDFVariable};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{HadleyError, Result};

/// Metadata about a NetCDF dimension
#[derive(Debug, Clone)]
pub struct Dimension {
    /// Name of the dimension
    pub name: String,
    /// Size of the dimension
    pub size: usize,
    /// Whether this dimension is unlimited
    pub is_unlimited: bool,
}

/// Metadata about a NetCDF variable
#[derive(Debug, Clone)]
pub struct Variable {
    /// Name of the variable
    pub name: String,
    /// Dimensions of the variable
    pub dimensions: Vec<String>,
    /// Shape of the variable (dimension sizes)
    pub shape: Vec<usize>,
    /// Variable attributes
    pub attributes: HashMap<String, AttributeValue>,
    /// Data type as string
    pub dtype: String,
}

impl Variable {
    /// Look up a text attribute such as `units` or `long_name`.
    pub fn attr_text(&self, name: &str) -> Option<&str> {
        match self.attributes.get(name) {
            Some(AttributeValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Possible attribute values in NetCDF
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// String attribute
    Text(String),
    /// Numeric attribute (stored as f64 for simplicity)
    Number(f64),
    /// Array of numbers
    NumberArray(Vec<f64>),
}

/// Complete metadata for a NetCDF file
#[derive(Debug, Clone)]
pub struct Metadata {
    /// File-level attributes
    pub global_attributes: HashMap<String, AttributeValue>,
    /// Dimensions in the file
    pub dimensions: HashMap<String, Dimension>,
    /// Variables in the file
    pub variables: HashMap<String, Variable>,
    /// Coordinate variables (subset of variables that match dimension names)
    pub coordinates: HashMap<String, Vec<f64>>,
}

/// A NetCDF file loaded into memory: metadata plus per-variable data arrays.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// File metadata
    pub metadata: Metadata,
    /// Loaded data arrays
    pub data: HashMap<String, Array<f32, IxDyn>>,
}

impl Dataset {
    /// Get a variable's data array
    pub fn variable(&self, name: &str) -> Option<&Array<f32, IxDyn>> {
        self.data.get(name)
    }

    /// Get a variable's data array with error handling
    pub fn variable_checked(&self, name: &str) -> Result<&Array<f32, IxDyn>> {
        self.data.get(name).ok_or_else(|| HadleyError::DataNotFound {
            message: format!("Variable not found: {}", name),
        })
    }

    /// Get coordinate values for a dimension
    pub fn coordinate(&self, name: &str) -> Option<&Vec<f64>> {
        self.metadata.coordinates.get(name)
    }

    /// Get coordinate values for a dimension with error handling
    pub fn coordinate_checked(&self, name: &str) -> Result<&Vec<f64>> {
        self.metadata
            .coordinates
            .get(name)
            .ok_or_else(|| HadleyError::DataNotFound {
                message: format!("Coordinate not found: {}", name),
            })
    }

    /// Get variable metadata with error handling
    pub fn variable_metadata_checked(&self, name: &str) -> Result<&Variable> {
        self.metadata
            .variables
            .get(name)
            .ok_or_else(|| HadleyError::DataNotFound {
                message: format!("Variable metadata not found: {}", name),
            })
    }

    /// Check if a variable exists
    pub fn has_variable(&self, name: &str) -> bool {
        self.metadata.variables.contains_key(name)
    }
}

/// Load a NetCDF file into memory.
pub fn load_netcdf(path: &Path) -> Result<Dataset> {
    // Check if the file exists before handing the path to libnetcdf so the
    // caller sees a plain NotFound instead of a cryptic NC error code.
    if !path.exists() {
        return Err(HadleyError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let file = netcdf::open(path)?;
    debug!(
        file = %path.display(),
        "Opened NetCDF file"
    );

    let metadata = extract_metadata(&file)?;
    let data = extract_data(&file, &metadata)?;

    let dataset = Dataset { metadata, data };
    validate_dataset(&dataset)?;

    let data_bytes: usize = dataset
        .data
        .values()
        .map(|a| a.len() * std::mem::size_of::<f32>())
        .sum();
    crate::logging::log_dataset_summary(path, &dataset.metadata, data_bytes);

    Ok(dataset)
}

/// Extract metadata from the NetCDF file
fn extract_metadata(file: &netcdf::File) -> Result<Metadata> {
    // Extract global attributes
    let mut global_attributes = HashMap::new();
    for attr in file.attributes() {
        let value = convert_attribute(&attr)?;
        global_attributes.insert(attr.name().to_string(), value);
    }

    // Extract dimensions
    let mut dimensions = HashMap::new();
    for dim in file.dimensions() {
        let dimension = Dimension {
            name: dim.name().to_string(),
            size: dim.len(),
            is_unlimited: dim.is_unlimited(),
        };
        dimensions.insert(dim.name().to_string(), dimension);
    }

    // Extract variables and their metadata
    let mut variables = HashMap::new();
    let mut coordinates = HashMap::new();

    for var in file.variables() {
        // Skip variables we can't handle (non-numeric types)
        if !is_supported_variable(&var) {
            warn!("Skipping unsupported variable: {}", var.name());
            continue;
        }

        let var_dims: Vec<String> = var
            .dimensions()
            .iter()
            .map(|dim| dim.name().to_string())
            .collect();

        let var_shape: Vec<usize> = var.dimensions().iter().map(|dim| dim.len()).collect();

        let mut var_attrs = HashMap::new();
        for attr in var.attributes() {
            let value = convert_attribute(&attr)?;
            var_attrs.insert(attr.name().to_string(), value);
        }

        let variable = Variable {
            name: var.name().to_string(),
            dimensions: var_dims,
            shape: var_shape,
            attributes: var_attrs,
            dtype: format!("{:?}", var.vartype()),
        };

        variables.insert(var.name().to_string(), variable);

        // If this is a coordinate variable (name matches a dimension),
        // extract the coordinate values
        if file.dimension(&var.name()).is_some() {
            let coord_values = var.get_values::<f64, _>(..)?;
            coordinates.insert(var.name().to_string(), coord_values);
        }
    }

    // Check for missing coordinate variables and create them if needed
    for (dim_name, dim) in &dimensions {
        if !coordinates.contains_key(dim_name) {
            // Fall back to 0-based index coordinates
            let coord_values: Vec<f64> = (0..dim.size).map(|i| i as f64).collect();
            coordinates.insert(dim_name.to_string(), coord_values);

            warn!("Created default coordinates for dimension: {}", dim_name);
        }
    }

    Ok(Metadata {
        global_attributes,
        dimensions,
        variables,
        coordinates,
    })
}

/// Check if a variable has a supported type that we can work with
fn is_supported_variable(var: &NetCDFVariable) -> bool {
    matches!(
        var.vartype(),
        NcVariableType::Int(_) | NcVariableType::Float(_)
    )
}

/// Convert a NetCDF attribute to our AttributeValue enum
fn convert_attribute(attr: &Attribute) -> Result<AttributeValue> {
    use netcdf::AttributeValue as NcAttributeValue;

    let value = attr.value()?;

    match value {
        NcAttributeValue::Str(s) => Ok(AttributeValue::Text(s)),

        NcAttributeValue::Uchar(v) => Ok(AttributeValue::Number(v as f64)),
        NcAttributeValue::Schar(v) => Ok(AttributeValue::Number(v as f64)),
        NcAttributeValue::Ushort(v) => Ok(AttributeValue::Number(v as f64)),
        NcAttributeValue::Short(v) => Ok(AttributeValue::Number(v as f64)),
        NcAttributeValue::Uint(v) => Ok(AttributeValue::Number(v as f64)),
        NcAttributeValue::Int(v) => Ok(AttributeValue::Number(v as f64)),
        NcAttributeValue::Ulonglong(v) => Ok(AttributeValue::Number(v as f64)),
        NcAttributeValue::Longlong(v) => Ok(AttributeValue::Number(v as f64)),
        NcAttributeValue::Float(v) => Ok(AttributeValue::Number(v as f64)),
        NcAttributeValue::Double(v) => Ok(AttributeValue::Number(v)),

        NcAttributeValue::Uchars(v) => Ok(AttributeValue::NumberArray(
            v.into_iter().map(|x| x as f64).collect(),
        )),
        NcAttributeValue::Schars(v) => Ok(AttributeValue::NumberArray(
            v.into_iter().map(|x| x as f64).collect(),
        )),
        NcAttributeValue::Ushorts(v) => Ok(AttributeValue::NumberArray(
            v.into_iter().map(|x| x as f64).collect(),
        )),
        NcAttributeValue::Shorts(v) => Ok(AttributeValue::NumberArray(
            v.into_iter().map(|x| x as f64).collect(),
        )),
        NcAttributeValue::Uints(v) => Ok(AttributeValue::NumberArray(
            v.into_iter().map(|x| x as f64).collect(),
        )),
        NcAttributeValue::Ints(v) => Ok(AttributeValue::NumberArray(
            v.into_iter().map(|x| x as f64).collect(),
        )),
        NcAttributeValue::Ulonglongs(v) => Ok(AttributeValue::NumberArray(
            v.into_iter().map(|x| x as f64).collect(),
        )),
        NcAttributeValue::Longlongs(v) => Ok(AttributeValue::NumberArray(
            v.into_iter().map(|x| x as f64).collect(),
        )),
        NcAttributeValue::Floats(v) => Ok(AttributeValue::NumberArray(
            v.into_iter().map(|x| x as f64).collect(),
        )),
        NcAttributeValue::Doubles(v) => Ok(AttributeValue::NumberArray(v)),

        // Anything exotic (string arrays, opaque types) keeps a debug rendering
        other => Ok(AttributeValue::Text(format!("{:?}", other))),
    }
}

/// Extract data from the NetCDF variables
fn extract_data(
    file: &netcdf::File,
    metadata: &Metadata,
) -> Result<HashMap<String, Array<f32, IxDyn>>> {
    let mut data = HashMap::new();

    for var_name in metadata.variables.keys() {
        if let Some(var) = file.variable(var_name) {
            if !is_supported_variable(&var) {
                continue;
            }

            let shape = &metadata.variables[var_name].shape;

            // libnetcdf converts any numeric storage type on read
            let values = var.get_values::<f32, _>(..)?;
            let array =
                Array::from_shape_vec(IxDyn(shape), values).map_err(|e| HadleyError::DataNotFound {
                    message: format!("Variable {} has inconsistent shape: {}", var_name, e),
                })?;
            data.insert(var_name.clone(), array);
        }
    }

    Ok(data)
}

/// Validate the loaded NetCDF data for consistency
fn validate_dataset(dataset: &Dataset) -> Result<()> {
    let metadata = &dataset.metadata;

    if metadata.variables.is_empty() {
        return Err(HadleyError::DataNotFound {
            message: "No variables found in NetCDF file".to_string(),
        });
    }

    for (var_name, var) in &metadata.variables {
        if var.dimensions.is_empty() {
            return Err(HadleyError::DataNotFound {
                message: format!("Variable {} has no dimensions", var_name),
            });
        }

        for dim_name in &var.dimensions {
            if !metadata.dimensions.contains_key(dim_name) {
                return Err(HadleyError::DataNotFound {
                    message: format!(
                        "Variable {} references non-existent dimension {}",
                        var_name, dim_name
                    ),
                });
            }
        }

        let array = dataset
            .data
            .get(var_name)
            .ok_or_else(|| HadleyError::DataNotFound {
                message: format!("Data array for variable {} not found", var_name),
            })?;

        let shape = array.shape();
        if shape.len() != var.dimensions.len() {
            return Err(HadleyError::DataNotFound {
                message: format!(
                    "Variable {} has inconsistent dimensions: metadata has {}, data has {}",
                    var_name,
                    var.dimensions.len(),
                    shape.len()
                ),
            });
        }

        for (i, dim_name) in var.dimensions.iter().enumerate() {
            let expected_size = metadata.dimensions[dim_name].size;
            if shape[i] != expected_size {
                return Err(HadleyError::DataNotFound {
                    message: format!(
                        "Variable {} dimension {} has inconsistent size: expected {}, got {}",
                        var_name, dim_name, expected_size, shape[i]
                    ),
                });
            }
        }
    }

    for dim_name in metadata.dimensions.keys() {
        if !metadata.coordinates.contains_key(dim_name) {
            return Err(HadleyError::DataNotFound {
                message: format!("Coordinate values for dimension {} not found", dim_name),
            });
        }
    }

    Ok(())
}

/// Create a test NetCDF file with sample data for testing
#[cfg(test)]
fn create_test_netcdf_file(path: &Path) -> Result<()> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("lon", 4)?;
    file.add_dimension("lat", 3)?;
    file.add_dimension("time", 2)?;

    file.add_attribute("title", "Hadley Test File")?;
    file.add_attribute("source", "test")?;

    let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
    lon_var.put_attribute("units", "degrees_east")?;
    lon_var.put_values(&[0.0, 1.0, 2.0, 3.0], ..)?;

    let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
    lat_var.put_attribute("units", "degrees_north")?;
    lat_var.put_values(&[0.0, 1.0, 2.0], ..)?;

    let mut time_var = file.add_variable::<f64>("time", &["time"])?;
    time_var.put_attribute("units", "days since 2000-01-01")?;
    time_var.put_values(&[0.0, 1.0], ..)?;

    let mut temp_var = file.add_variable::<f32>("temperature", &["time", "lat", "lon"])?;
    temp_var.put_attribute("units", "K")?;
    temp_var.put_attribute("long_name", "Temperature")?;

    // 2 time steps, 3 lat, 4 lon = 24 values
    let temp_data: Vec<f32> = (0..24).map(|i| i as f32).collect();
    temp_var.put_values(&temp_data, ..)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_not_found() {
        let result = load_netcdf(Path::new("/nonexistent/file.nc"));
        assert!(result.is_err());
        match result.unwrap_err() {
            HadleyError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("Expected IO error"),
        }
    }

    #[test]
    fn test_netcdf_loading() -> Result<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.nc");

        create_test_netcdf_file(&file_path)?;

        let dataset = load_netcdf(&file_path)?;
        let metadata = &dataset.metadata;

        assert!(metadata.global_attributes.contains_key("title"));
        assert!(metadata.dimensions.contains_key("lon"));
        assert!(metadata.dimensions.contains_key("lat"));
        assert!(metadata.dimensions.contains_key("time"));
        assert!(metadata.variables.contains_key("temperature"));
        assert!(metadata.coordinates.contains_key("lon"));

        assert_eq!(metadata.dimensions["lon"].size, 4);
        assert_eq!(metadata.dimensions["lat"].size, 3);
        assert_eq!(metadata.dimensions["time"].size, 2);
        assert_eq!(metadata.variables["temperature"].dimensions.len(), 3);

        assert_eq!(metadata.coordinates["lon"], vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(metadata.coordinates["lat"], vec![0.0, 1.0, 2.0]);
        assert_eq!(metadata.coordinates["time"], vec![0.0, 1.0]);

        let temp_data = dataset.variable_checked("temperature")?;
        assert_eq!(temp_data.shape(), &[2, 3, 4]);

        assert_eq!(temp_data[[0, 0, 0]], 0.0);
        assert_eq!(temp_data[[0, 0, 1]], 1.0);
        assert_eq!(temp_data[[0, 0, 2]], 2.0);

        Ok(())
    }

    #[test]
    fn test_attribute_conversion() -> Result<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.nc");

        create_test_netcdf_file(&file_path)?;

        let dataset = load_netcdf(&file_path)?;
        let metadata = &dataset.metadata;

        match &metadata.global_attributes["title"] {
            AttributeValue::Text(text) => assert_eq!(text, "Hadley Test File"),
            _ => panic!("Expected Text attribute"),
        }

        let temp = &metadata.variables["temperature"];
        assert_eq!(temp.attr_text("units"), Some("K"));
        assert_eq!(temp.attr_text("long_name"), Some("Temperature"));

        Ok(())
    }

    #[test]
    fn test_missing_variable_lookup() -> Result<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.nc");

        create_test_netcdf_file(&file_path)?;

        let dataset = load_netcdf(&file_path)?;
        assert!(dataset.variable_checked("no_such_variable").is_err());
        assert!(dataset.coordinate_checked("no_such_dim").is_err());
        assert!(dataset.has_variable("temperature"));

        Ok(())
    }
}
