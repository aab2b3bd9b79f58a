//! Metadata records derived from filenames and file contents.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::date::PartialDate;

/// Naming schema a filename is decoded against.
///
/// The schema is an input parameter chosen by the caller, never inferred
/// from the filename itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileNameSchema {
    /// Five leading fields: variable, table, model, experiment,
    /// ensemble member.
    LegacyFiveField,
    /// Six leading fields: adds a grid label after the ensemble member.
    SixFieldGridded,
}

impl FileNameSchema {
    /// Ordered field names preceding the date-range token.
    pub fn leading_fields(&self) -> &'static [&'static str] {
        match self {
            Self::LegacyFiveField => &[
                "variable_id",
                "table_id",
                "model_id",
                "experiment_id",
                "ensemble_member",
            ],
            Self::SixFieldGridded => &[
                "variable_id",
                "table_id",
                "model_id",
                "experiment_id",
                "ensemble_member",
                "grid_label",
            ],
        }
    }

    pub fn has_grid_label(&self) -> bool {
        matches!(self, Self::SixFieldGridded)
    }
}

/// Everything a conforming filename declares about its file.
///
/// Built once per file by the filename decoder and never mutated. Fixed
/// (time-invariant) products have no date range, so `start_date` and
/// `end_date` stay unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMetadata {
    pub basename: String,
    pub directory: PathBuf,
    pub variable_id: String,
    pub table_id: String,
    pub model_id: String,
    pub experiment_id: String,
    pub ensemble_member: String,
    pub grid_label: Option<String>,
    pub start_date: Option<PartialDate>,
    pub end_date: Option<PartialDate>,
    /// Secondary frequency classification of the table field; empty when
    /// nothing in the vocabulary matched. Drives the sub-daily rounding
    /// policy only.
    pub frequency: String,
    pub file_size: u64,
}

/// A decoded filename: the metadata record plus the climatology marker.
///
/// The `-clim` marker changes how the time axis is read (period bounds
/// instead of sample points) but is not itself part of the metadata record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedFilename {
    pub metadata: FileMetadata,
    pub climatology: bool,
}

/// Essential metadata read from a file's contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentsMetadata {
    pub var_name: String,
    pub units: String,
    pub long_name: Option<String>,
    pub standard_name: Option<String>,
    pub activity_id: String,
    pub institute: String,
}
