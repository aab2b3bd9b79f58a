//! Read-only access to the temporal content of a data file.
//!
//! The checks never touch a file format directly; they go through
//! [`TemporalDataSource`], which exposes exactly the handful of things the
//! validator needs: the time coordinate (points, optional bounds, units,
//! calendar, cell methods), global and variable attributes, and random
//! access to single payload elements. [`MemorySource`] is the in-process
//! implementation used by adapters and tests.

use std::collections::{BTreeMap, BTreeSet};

use cmor_model::{Calendar, CalendarDateTime, TimeUnits};
use thiserror::Error;

/// Failure reading from a data source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("index {index:?} is out of bounds for shape {shape:?}")]
    OutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    #[error("element at {index:?} is masked or missing")]
    MaskedElement { index: Vec<usize> },

    #[error("{0}")]
    Backend(String),
}

/// The slice of a data file the validator reads.
///
/// Implementations must be cheap to query repeatedly; the checker calls
/// `time_points` and `decode_time` once per endpoint and `read_element`
/// once per file.
pub trait TemporalDataSource: std::fmt::Debug {
    /// Numeric values of the time coordinate, in file order.
    fn time_points(&self) -> &[f64];

    /// Cell bounds of the time coordinate, if the file carries them.
    fn time_bounds(&self) -> Option<&[[f64; 2]]>;

    /// Decodes a numeric time value to a calendar timestamp using the
    /// file's time units and calendar.
    fn decode_time(&self, value: f64) -> Result<CalendarDateTime, SourceError>;

    /// Cell methods recorded against a coordinate, e.g. `point` or `mean`.
    fn cell_methods(&self, coordinate: &str) -> BTreeSet<String>;

    /// A global attribute by name.
    fn global_attribute(&self, name: &str) -> Option<&str>;

    /// An attribute of the payload variable by name.
    fn variable_attribute(&self, name: &str) -> Option<&str>;

    /// Name of the payload variable.
    fn variable_name(&self) -> &str;

    /// Shape of the payload variable, outermost dimension first.
    fn shape(&self) -> &[usize];

    /// Reads one payload element at a full multi-dimensional index.
    fn read_element(&self, index: &[usize]) -> Result<f64, SourceError>;
}

/// An in-memory [`TemporalDataSource`].
///
/// Built field by field; everything is optional except the variable name,
/// so tests only state what the case under test exercises.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    variable_name: String,
    time_points: Vec<f64>,
    time_bounds: Option<Vec<[f64; 2]>>,
    time_units: Option<TimeUnits>,
    calendar: Calendar,
    cell_methods: BTreeMap<String, BTreeSet<String>>,
    global_attributes: BTreeMap<String, String>,
    variable_attributes: BTreeMap<String, String>,
    shape: Vec<usize>,
    data: Vec<f64>,
    fill_value: Option<f64>,
}

impl MemorySource {
    pub fn new(variable_name: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            ..Self::default()
        }
    }

    pub fn with_time_points(mut self, points: Vec<f64>) -> Self {
        self.time_points = points;
        self
    }

    pub fn with_time_bounds(mut self, bounds: Vec<[f64; 2]>) -> Self {
        self.time_bounds = Some(bounds);
        self
    }

    /// Sets the units string and calendar used to decode time values.
    pub fn with_time_units(mut self, units: TimeUnits, calendar: Calendar) -> Self {
        self.time_units = Some(units);
        self.calendar = calendar;
        self
    }

    pub fn with_cell_method(
        mut self,
        coordinate: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        self.cell_methods
            .entry(coordinate.into())
            .or_default()
            .insert(method.into());
        self
    }

    pub fn with_global_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.global_attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_variable_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.variable_attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the payload as a row-major buffer with the given shape.
    pub fn with_data(mut self, shape: Vec<usize>, data: Vec<f64>) -> Self {
        self.shape = shape;
        self.data = data;
        self
    }

    /// Values equal to the fill value read back as masked.
    pub fn with_fill_value(mut self, fill_value: f64) -> Self {
        self.fill_value = Some(fill_value);
        self
    }

    fn flat_index(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0usize;
        for (&i, &extent) in index.iter().zip(&self.shape) {
            if i >= extent {
                return None;
            }
            flat = flat * extent + i;
        }
        Some(flat)
    }
}

impl TemporalDataSource for MemorySource {
    fn time_points(&self) -> &[f64] {
        &self.time_points
    }

    fn time_bounds(&self) -> Option<&[[f64; 2]]> {
        self.time_bounds.as_deref()
    }

    fn decode_time(&self, value: f64) -> Result<CalendarDateTime, SourceError> {
        let units = self
            .time_units
            .as_ref()
            .ok_or_else(|| SourceError::Backend("time coordinate has no units".to_string()))?;
        Ok(units.decode(value, self.calendar))
    }

    fn cell_methods(&self, coordinate: &str) -> BTreeSet<String> {
        self.cell_methods.get(coordinate).cloned().unwrap_or_default()
    }

    fn global_attribute(&self, name: &str) -> Option<&str> {
        self.global_attributes.get(name).map(String::as_str)
    }

    fn variable_attribute(&self, name: &str) -> Option<&str> {
        self.variable_attributes.get(name).map(String::as_str)
    }

    fn variable_name(&self) -> &str {
        &self.variable_name
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn read_element(&self, index: &[usize]) -> Result<f64, SourceError> {
        let flat = self.flat_index(index).ok_or_else(|| SourceError::OutOfBounds {
            index: index.to_vec(),
            shape: self.shape.clone(),
        })?;
        let value = self.data.get(flat).copied().ok_or_else(|| SourceError::OutOfBounds {
            index: index.to_vec(),
            shape: self.shape.clone(),
        })?;
        if !value.is_finite() || self.fill_value.is_some_and(|fill| value == fill) {
            return Err(SourceError::MaskedElement {
                index: index.to_vec(),
            });
        }
        Ok(value)
    }
}
