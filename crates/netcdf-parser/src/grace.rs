//! GRACE mascon reading using the native netcdf library.

use std::path::Path;
use std::sync::Once;

use chrono::{DateTime, Utc};
use geo_common::{date_label, decode_time_axis, GridAxes};
use tracing::{debug, info};

use crate::error::{NetCdfError, NetCdfResult};

/// Name of the LWE thickness variable in GRACE mascon files.
pub const DEFAULT_VARIABLE: &str = "lwe_thickness";

const LAT_NAMES: [&str; 2] = ["lat", "latitude"];
const LON_NAMES: [&str; 2] = ["lon", "longitude"];

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints diagnostics even when a missing optional
/// attribute is handled on the Rust side. Safe to call many times; only the
/// first call does anything.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 with null handlers is the documented way to
        // turn off automatic error printing.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// A time series of LWE thickness grids.
#[derive(Debug, Clone)]
pub struct LweDataset {
    pub axes: GridAxes,
    pub times: Vec<DateTime<Utc>>,
    /// `[time][lat][lon]`, row-major, latitude in file order.
    pub frames: Vec<f32>,
    pub units: String,
    pub variable: String,
}

impl LweDataset {
    pub fn n_times(&self) -> usize {
        self.times.len()
    }

    fn frame_len(&self) -> usize {
        self.axes.nlat() * self.axes.nlon()
    }

    /// One time step, latitude in file order.
    ///
    /// # Panics
    ///
    /// Panics if `t >= n_times()`.
    pub fn frame(&self, t: usize) -> &[f32] {
        let len = self.frame_len();
        &self.frames[t * len..(t + 1) * len]
    }

    /// One time step with row 0 at the northernmost latitude.
    pub fn north_up_frame(&self, t: usize) -> Vec<f32> {
        let frame = self.frame(t);
        if !self.axes.lat_ascending() {
            return frame.to_vec();
        }

        let nlon = self.axes.nlon();
        frame
            .chunks_exact(nlon)
            .rev()
            .flat_map(|row| row.iter().copied())
            .collect()
    }

    /// `YYYY-MM-DD` for every time step.
    pub fn time_labels(&self) -> Vec<String> {
        self.times.iter().map(date_label).collect()
    }
}

/// Read a GRACE mascon file using the default `lwe_thickness` variable.
pub fn read_grace(path: impl AsRef<Path>) -> NetCdfResult<LweDataset> {
    read_grace_variable(path, DEFAULT_VARIABLE)
}

/// Read only the lat/lon axes of a GRACE file.
pub fn read_grace_axes(path: impl AsRef<Path>) -> NetCdfResult<GridAxes> {
    let path = path.as_ref();
    silence_hdf5_errors();

    let file = netcdf::open(path)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to open NetCDF: {}", e)))?;
    let lat = read_coordinate(&file, &LAT_NAMES)?;
    let lon = read_coordinate(&file, &LON_NAMES)?;
    let axes = GridAxes::new(lat, lon)?;

    debug!(path = %path.display(), nlat = axes.nlat(), nlon = axes.nlon(), "Read GRACE axes");
    Ok(axes)
}

/// Read a `(time, lat, lon)` variable and its coordinate axes.
pub fn read_grace_variable(path: impl AsRef<Path>, variable: &str) -> NetCdfResult<LweDataset> {
    let path = path.as_ref();
    silence_hdf5_errors();

    if !path.exists() {
        return Err(NetCdfError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        )));
    }

    let file = netcdf::open(path)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to open NetCDF: {}", e)))?;

    let lat = read_coordinate(&file, &LAT_NAMES)?;
    let lon = read_coordinate(&file, &LON_NAMES)?;
    let axes = GridAxes::new(lat, lon)?;

    let time_var = file
        .variable("time")
        .ok_or_else(|| NetCdfError::MissingData("time variable".to_string()))?;
    let time_values: Vec<f64> = time_var.get_values(..)?;
    let time_units = get_string_attr(&time_var, "units")
        .ok_or_else(|| NetCdfError::MissingData("time units attribute".to_string()))?;
    let times = decode_time_axis(&time_values, &time_units)?;

    let var = file
        .variable(variable)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", variable)))?;

    let expected = vec![times.len(), axes.nlat(), axes.nlon()];
    let actual: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    if actual != expected {
        return Err(NetCdfError::ShapeMismatch { expected, actual });
    }
    debug!(
        variable = variable,
        dims = ?var.dimensions().iter().map(|d| d.name()).collect::<Vec<_>>(),
        "Variable dimensions"
    );

    let raw: Vec<f64> = var.get_values(..)?;
    let scale_factor = get_f64_attr(&var, "scale_factor").unwrap_or(1.0);
    let add_offset = get_f64_attr(&var, "add_offset").unwrap_or(0.0);
    let fill_values: Vec<f64> = ["_FillValue", "missing_value"]
        .iter()
        .filter_map(|name| get_f64_attr(&var, name))
        .collect();

    let frames: Vec<f32> = raw
        .iter()
        .map(|&v| {
            if v.is_nan() || fill_values.iter().any(|&fill| v == fill) {
                f32::NAN
            } else {
                (v * scale_factor + add_offset) as f32
            }
        })
        .collect();

    let units = get_string_attr(&var, "units").unwrap_or_else(|| "cm".to_string());

    info!(
        path = %path.display(),
        variable = variable,
        time_steps = times.len(),
        nlat = axes.nlat(),
        nlon = axes.nlon(),
        "Loaded GRACE dataset"
    );

    Ok(LweDataset {
        axes,
        times,
        frames,
        units,
        variable: variable.to_string(),
    })
}

// =============================================================================
// Internal helpers
// =============================================================================

fn read_coordinate(file: &netcdf::File, names: &[&str]) -> NetCdfResult<Vec<f64>> {
    let var = names
        .iter()
        .find_map(|name| file.variable(name))
        .ok_or_else(|| NetCdfError::MissingData(format!("{} coordinate", names[0])))?;
    Ok(var.get_values(..)?)
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}

fn get_string_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}
