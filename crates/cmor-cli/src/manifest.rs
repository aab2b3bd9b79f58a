//! JSON sidecar manifests describing a data file's temporal content.
//!
//! The validator reads file contents through a [`TemporalDataSource`];
//! this adapter loads that content from a `<file>.json` sidecar sitting
//! next to the data file. A sidecar states the payload variable, the time
//! axis (units, calendar, points, optional bounds and cell methods),
//! attributes, and optionally the payload values themselves:
//!
//! ```json
//! {
//!   "variable": "tas",
//!   "time": {
//!     "units": "days since 1850-01-01",
//!     "calendar": "360_day",
//!     "points": [15.0, 45.0],
//!     "bounds": [[0.0, 30.0], [30.0, 60.0]]
//!   },
//!   "variable_attributes": { "units": "K" },
//!   "global_attributes": { "institution_id": "MOHC" },
//!   "data": { "shape": [2, 1, 1], "values": [284.1, 284.9] }
//! }
//! ```

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use cmor_model::{Calendar, Result, TimeUnits, ValidationError};
use cmor_validate::{MemorySource, TemporalDataSource};

#[derive(Debug, Deserialize)]
struct Manifest {
    variable: String,
    #[serde(default)]
    time: Option<TimeAxis>,
    #[serde(default)]
    global_attributes: BTreeMap<String, String>,
    #[serde(default)]
    variable_attributes: BTreeMap<String, String>,
    #[serde(default)]
    data: Option<DataBlock>,
}

#[derive(Debug, Deserialize)]
struct TimeAxis {
    units: String,
    #[serde(default = "default_calendar")]
    calendar: String,
    #[serde(default)]
    points: Vec<f64>,
    #[serde(default)]
    bounds: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    cell_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DataBlock {
    shape: Vec<usize>,
    values: Vec<f64>,
    #[serde(default)]
    fill_value: Option<f64>,
}

fn default_calendar() -> String {
    "standard".to_string()
}

/// Path of the sidecar next to a data file: the full filename plus `.json`.
pub fn sidecar_path(data_path: &Path) -> PathBuf {
    let mut name = OsString::from(data_path.as_os_str());
    name.push(".json");
    PathBuf::from(name)
}

/// Opens the sidecar manifest for a data file as a [`TemporalDataSource`].
///
/// Every way this can fail, from a missing sidecar to an unknown calendar,
/// reports as unreadable content metadata for the data file.
pub fn open_source(path: &Path) -> Result<Box<dyn TemporalDataSource>> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    let missing = |detail: String| ValidationError::MissingContentMetadata {
        filename: filename.clone(),
        detail,
    };

    let sidecar = sidecar_path(path);
    let text = std::fs::read_to_string(&sidecar)
        .map_err(|err| missing(format!("cannot read sidecar {}: {err}", sidecar.display())))?;
    let manifest: Manifest = serde_json::from_str(&text)
        .map_err(|err| missing(format!("malformed sidecar {}: {err}", sidecar.display())))?;

    let mut source = MemorySource::new(manifest.variable);
    if let Some(time) = manifest.time {
        let units = TimeUnits::parse(&time.units).map_err(|err| missing(err.to_string()))?;
        let calendar = Calendar::parse(&time.calendar).map_err(|err| missing(err.to_string()))?;
        source = source
            .with_time_points(time.points)
            .with_time_units(units, calendar);
        if let Some(bounds) = time.bounds {
            source = source.with_time_bounds(bounds);
        }
        for method in time.cell_methods {
            source = source.with_cell_method("time", method);
        }
    }
    for (name, value) in manifest.global_attributes {
        source = source.with_global_attribute(name, value);
    }
    for (name, value) in manifest.variable_attributes {
        source = source.with_variable_attribute(name, value);
    }
    if let Some(data) = manifest.data {
        source = source.with_data(data.shape, data.values);
        if let Some(fill_value) = data.fill_value {
            source = source.with_fill_value(fill_value);
        }
    }

    Ok(Box::new(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SIDECAR: &str = r#"{
        "variable": "tas",
        "time": {
            "units": "days since 1850-01-01",
            "calendar": "360_day",
            "points": [15.0, 45.0],
            "bounds": [[0.0, 30.0], [30.0, 60.0]],
            "cell_methods": ["mean"]
        },
        "variable_attributes": { "units": "K" },
        "global_attributes": { "institution_id": "MOHC" },
        "data": { "shape": [2], "values": [284.1, 284.9] }
    }"#;

    #[test]
    fn loads_a_complete_sidecar() {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("tas_Amon_M_h_r1i1p1_185001-185002.nc");
        std::fs::write(sidecar_path(&data_path), SIDECAR).unwrap();

        let source = open_source(&data_path).unwrap();
        assert_eq!(source.variable_name(), "tas");
        assert_eq!(source.time_points(), &[15.0, 45.0]);
        assert_eq!(source.time_bounds().unwrap().len(), 2);
        assert!(source.cell_methods("time").contains("mean"));
        assert_eq!(source.variable_attribute("units"), Some("K"));
        assert_eq!(source.read_element(&[1]).unwrap(), 284.9);
    }

    #[test]
    fn missing_sidecar_is_missing_metadata() {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("tas_Amon_M_h_r1i1p1_185001-185002.nc");
        let error = open_source(&data_path).unwrap_err();
        assert!(matches!(
            error,
            ValidationError::MissingContentMetadata { .. }
        ));
    }

    #[test]
    fn unknown_calendar_is_missing_metadata() {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("tas.nc");
        let sidecar = r#"{
            "variable": "tas",
            "time": { "units": "days since 1850-01-01", "calendar": "julian" }
        }"#;
        std::fs::write(sidecar_path(&data_path), sidecar).unwrap();
        let error = open_source(&data_path).unwrap_err();
        assert!(matches!(
            error,
            ValidationError::MissingContentMetadata { ref detail, .. }
                if detail.contains("julian")
        ));
    }
}
