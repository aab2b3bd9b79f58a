//! Validation engine for CMOR-style climate model output files.
//!
//! Checks, in order per file: the filename decodes against the chosen
//! naming schema; required metadata exists in the contents; the filename's
//! date range matches the file's time axis; the time axis is contiguous;
//! and a randomly chosen payload element is readable. Batches run the same
//! sequence per file in parallel, collecting failures instead of aborting.

pub mod checks;
pub mod contents;
pub mod filename;
pub mod frequency;
pub mod orchestrator;
pub mod source;

pub use checks::{check_contiguity, check_data_point, check_start_end_times};
pub use contents::identify_contents_metadata;
pub use filename::{encode_date_token, identify_filename_metadata, parse_date_token};
pub use frequency::resolve_frequency;
pub use orchestrator::{
    BatchOptions, BatchSummary, FileFailure, SourceFactory, ValidatedFile, validate_batch,
    validate_file,
};
pub use source::{MemorySource, SourceError, TemporalDataSource};
