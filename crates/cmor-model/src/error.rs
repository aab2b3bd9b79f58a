//! The validation error taxonomy.
//!
//! Every way a file can fail validation is a distinguishable variant with a
//! message naming the offending file and, where applicable, the offending
//! value. Errors are caught at the file boundary, logged and counted; no
//! single bad file aborts a batch.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("unknown filename format: {filename}")]
    MalformedFilename { filename: String },

    #[error("unknown date format in filename: {filename}")]
    MalformedDateInFilename {
        filename: String,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("unable to calculate frequency from table name {table_id}")]
    UnresolvedFrequency { table_id: String },

    #[error("unsupported frequency string {frequency}")]
    UnsupportedFrequency { frequency: String },

    #[error("invalid date string '{value}' for frequency {frequency}")]
    InvalidDateString { value: String, frequency: String },

    #[error("unable to extract metadata from the contents of file {filename}: {detail}")]
    MissingContentMetadata { filename: String, detail: String },

    #[error(
        "start date in filename does not match the first time in the file ({actual}): {filename}"
    )]
    StartDateMismatch { filename: String, actual: String },

    #[error(
        "end date in filename does not match the last time in the file ({actual}): {filename}"
    )]
    EndDateMismatch { filename: String, actual: String },

    #[error("the points in the time dimension in the file are not contiguous: {filename}")]
    NonContiguousTimeAxis { filename: String },

    #[error("unable to extract data point {index:?} from file: {filename}")]
    UnreadableDataPoint { filename: String, index: Vec<usize> },
}

pub type Result<T> = std::result::Result<T, ValidationError>;
