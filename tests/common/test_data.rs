//! Test data generation utilities.
//!
//! This module provides functions to generate synthetic NetCDF files and
//! GeoJSON feature files with known data patterns for testing the chart
//! pipeline.

use std::f64::consts::PI;
use std::path::Path;

type Result<T> = std::result::Result<T, netcdf::Error>;

/// Creates an anomaly-style dataset: `var_name(time, lat, lon)` with a
/// smooth, longitude-periodic pattern so cyclic padding is seamless.
///
/// lon runs 0..360 exclusive (evenly spaced), lat spans -60..60 inclusive.
/// The value at (t, lat, lon) is
/// `amplitude * sin(lon) * cos(pi * lat / 120) * (1 + 0.1 * t)`.
pub fn create_anomaly_nc(
    path: &Path,
    var_name: &str,
    time_steps: usize,
    lat_n: usize,
    lon_n: usize,
    amplitude: f64,
) -> Result<()> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("lon", lon_n)?;
    file.add_dimension("lat", lat_n)?;
    file.add_dimension("time", time_steps)?;

    file.add_attribute("title", "Synthetic anomaly data")?;
    file.add_attribute("institution", "hadley test suite")?;

    let lon_values: Vec<f64> = (0..lon_n).map(|i| i as f64 * 360.0 / lon_n as f64).collect();
    let lat_values: Vec<f64> = (0..lat_n)
        .map(|i| -60.0 + i as f64 * 120.0 / (lat_n - 1) as f64)
        .collect();
    let time_values: Vec<f64> = (0..time_steps).map(|i| i as f64).collect();

    let mut data = Vec::with_capacity(time_steps * lat_n * lon_n);
    for t in 0..time_steps {
        for y in 0..lat_n {
            for x in 0..lon_n {
                let lon_rad = lon_values[x] * PI / 180.0;
                let lat_term = (PI * lat_values[y] / 120.0).cos();
                let value = amplitude * lon_rad.sin() * lat_term * (1.0 + 0.1 * t as f64);
                data.push(value as f32);
            }
        }
    }

    {
        let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
        lon_var.put_attribute("units", "degrees_east")?;
        lon_var.put_values(&lon_values, ..)?;
    }
    {
        let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
        lat_var.put_attribute("units", "degrees_north")?;
        lat_var.put_values(&lat_values, ..)?;
    }
    {
        let mut time_var = file.add_variable::<f64>("time", &["time"])?;
        time_var.put_attribute("units", "months since 1982-01-01")?;
        time_var.put_values(&time_values, ..)?;
    }
    {
        let mut var = file.add_variable::<f32>(var_name, &["time", "lat", "lon"])?;
        var.put_attribute("units", "degC")?;
        var.put_attribute("long_name", "Synthetic Anomaly")?;
        var.put_values(&data, ..)?;
    }

    Ok(())
}

/// Creates a dataset whose values encode their own indices:
/// `value = t * 100 + y * 10 + x`, so slicing results are exactly checkable.
pub fn create_indexed_nc(
    path: &Path,
    time_steps: usize,
    lat_n: usize,
    lon_n: usize,
) -> Result<()> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("lon", lon_n)?;
    file.add_dimension("lat", lat_n)?;
    file.add_dimension("time", time_steps)?;

    let lon_values: Vec<f64> = (0..lon_n).map(|i| i as f64 * 360.0 / lon_n as f64).collect();
    let lat_values: Vec<f64> = (0..lat_n)
        .map(|i| -60.0 + i as f64 * 120.0 / (lat_n - 1) as f64)
        .collect();
    let time_values: Vec<f64> = (0..time_steps).map(|i| i as f64).collect();

    let mut data = Vec::with_capacity(time_steps * lat_n * lon_n);
    for t in 0..time_steps {
        for y in 0..lat_n {
            for x in 0..lon_n {
                data.push((t * 100 + y * 10 + x) as f32);
            }
        }
    }

    {
        let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
        lon_var.put_attribute("units", "degrees_east")?;
        lon_var.put_values(&lon_values, ..)?;
    }
    {
        let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
        lat_var.put_attribute("units", "degrees_north")?;
        lat_var.put_values(&lat_values, ..)?;
    }
    {
        let mut time_var = file.add_variable::<f64>("time", &["time"])?;
        time_var.put_attribute("units", "months since 2000-01-01")?;
        time_var.put_values(&time_values, ..)?;
    }
    {
        let mut var = file.add_variable::<f32>("indexed", &["time", "lat", "lon"])?;
        var.put_attribute("long_name", "Index Pattern")?;
        var.put_values(&data, ..)?;
    }

    Ok(())
}

/// Creates a two-tone dataset: +3 where lon is in [90, 270), -3 elsewhere,
/// constant over lat and time. Band colors are therefore unambiguous well
/// away from the two steps.
pub fn create_two_tone_nc(path: &Path, lat_n: usize, lon_n: usize) -> Result<()> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("lon", lon_n)?;
    file.add_dimension("lat", lat_n)?;
    file.add_dimension("time", 1)?;

    let lon_values: Vec<f64> = (0..lon_n).map(|i| i as f64 * 360.0 / lon_n as f64).collect();
    let lat_values: Vec<f64> = (0..lat_n)
        .map(|i| -60.0 + i as f64 * 120.0 / (lat_n - 1) as f64)
        .collect();

    let mut data = Vec::with_capacity(lat_n * lon_n);
    for _y in 0..lat_n {
        for x in 0..lon_n {
            let lon = lon_values[x];
            let value = if (90.0..270.0).contains(&lon) { 3.0 } else { -3.0 };
            data.push(value as f32);
        }
    }

    {
        let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
        lon_var.put_attribute("units", "degrees_east")?;
        lon_var.put_values(&lon_values, ..)?;
    }
    {
        let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
        lat_var.put_attribute("units", "degrees_north")?;
        lat_var.put_values(&lat_values, ..)?;
    }
    {
        let mut time_var = file.add_variable::<f64>("time", &["time"])?;
        time_var.put_values(&[0.0], ..)?;
    }
    {
        let mut var = file.add_variable::<f32>("tone", &["time", "lat", "lon"])?;
        var.put_attribute("long_name", "Two Tone Pattern")?;
        var.put_values(&data, ..)?;
    }

    Ok(())
}

/// Creates a wind-style dataset: `V(time, lat, lon)` bounded within ±8 m/s,
/// suitable for the XY error-bar chart.
pub fn create_wind_nc(path: &Path, time_steps: usize, lat_n: usize, lon_n: usize) -> Result<()> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("lon", lon_n)?;
    file.add_dimension("lat", lat_n)?;
    file.add_dimension("time", time_steps)?;

    let lon_values: Vec<f64> = (0..lon_n).map(|i| i as f64 * 360.0 / lon_n as f64).collect();
    let lat_values: Vec<f64> = (0..lat_n)
        .map(|i| -90.0 + i as f64 * 180.0 / (lat_n - 1) as f64)
        .collect();
    let time_values: Vec<f64> = (0..time_steps).map(|i| i as f64).collect();

    let mut data = Vec::with_capacity(time_steps * lat_n * lon_n);
    for t in 0..time_steps {
        for y in 0..lat_n {
            for x in 0..lon_n {
                let lon_rad = lon_values[x] * PI / 180.0;
                let lat_rad = lat_values[y] * PI / 180.0;
                let value = 6.0 * (3.0 * lon_rad).sin() * lat_rad.cos() + 0.5 * t as f64;
                data.push(value as f32);
            }
        }
    }

    {
        let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
        lon_var.put_attribute("units", "degrees_east")?;
        lon_var.put_values(&lon_values, ..)?;
    }
    {
        let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
        lat_var.put_attribute("units", "degrees_north")?;
        lat_var.put_values(&lat_values, ..)?;
    }
    {
        let mut time_var = file.add_variable::<f64>("time", &["time"])?;
        time_var.put_attribute("units", "days since 2000-01-01")?;
        time_var.put_values(&time_values, ..)?;
    }
    {
        let mut var = file.add_variable::<f32>("V", &["time", "lat", "lon"])?;
        var.put_attribute("units", "m/s")?;
        var.put_attribute("long_name", "meridional wind")?;
        var.put_values(&data, ..)?;
    }

    Ok(())
}

/// Writes a tiny GeoJSON FeatureCollection: one island polygon inside the
/// Pacific window plus one open coastline segment.
pub fn create_coastline_geojson(path: &Path) -> std::io::Result<()> {
    let content = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": {"name": "island"},
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[140.0, -10.0], [160.0, -10.0], [160.0, 10.0], [140.0, 10.0], [140.0, -10.0]]]
      }
    },
    {
      "type": "Feature",
      "properties": {"name": "shoreline"},
      "geometry": {
        "type": "LineString",
        "coordinates": [[110.0, -40.0], [130.0, -35.0], [150.0, -42.0]]
      }
    }
  ]
}
"#;
    std::fs::write(path, content)
}
