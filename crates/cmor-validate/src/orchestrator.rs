//! Runs the full check sequence over single files and batches.

use std::path::{Path, PathBuf};

use cmor_model::{ContentsMetadata, FileMetadata, FileNameSchema, Result};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::checks::{check_contiguity, check_data_point, check_start_end_times};
use crate::contents::identify_contents_metadata;
use crate::filename::identify_filename_metadata;
use crate::source::TemporalDataSource;

/// Opens a data file as a [`TemporalDataSource`].
///
/// Batches fan out across threads, so factories must be shareable.
pub trait SourceFactory: Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn TemporalDataSource>>;
}

impl<F> SourceFactory for F
where
    F: Fn(&Path) -> Result<Box<dyn TemporalDataSource>> + Sync,
{
    fn open(&self, path: &Path) -> Result<Box<dyn TemporalDataSource>> {
        self(path)
    }
}

/// Everything learned about a file that passed every check.
#[derive(Debug, Serialize)]
pub struct ValidatedFile {
    pub metadata: FileMetadata,
    pub contents: ContentsMetadata,
    pub sample_value: f64,
}

/// Batch-wide settings; one schema and one fixed-field flag per run.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub schema: FileNameSchema,
    pub time_invariant: bool,
}

/// One file that failed, with the failure message for the report.
#[derive(Debug, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub checked: usize,
    pub failures: Vec<FileFailure>,
}

impl BatchSummary {
    pub fn passed(&self) -> bool {
        self.checked > 0 && self.failures.is_empty()
    }
}

/// Validates one file: filename decode, content metadata, temporal
/// consistency, contiguity, and a data-point spot read, in that order.
/// The first failing check decides the error.
pub fn validate_file(
    path: &Path,
    schema: FileNameSchema,
    time_invariant: bool,
    factory: &dyn SourceFactory,
) -> Result<ValidatedFile> {
    let decoded = identify_filename_metadata(path, schema, time_invariant)?;
    let metadata = decoded.metadata;
    debug!(filename = %metadata.basename, table = %metadata.table_id, "decoded filename");

    let source = factory.open(path)?;
    let contents = identify_contents_metadata(source.as_ref(), &metadata.basename)?;
    check_start_end_times(source.as_ref(), &metadata, decoded.climatology)?;
    check_contiguity(source.as_ref(), &metadata.basename)?;
    let sample_value =
        check_data_point(source.as_ref(), &metadata.basename, &mut rand::thread_rng())?;

    Ok(ValidatedFile {
        metadata,
        contents,
        sample_value,
    })
}

/// Validates a batch of files in parallel.
///
/// A failing file is recorded and logged; it never stops the rest of the
/// batch. Failures come back in the input order of the paths.
pub fn validate_batch(
    paths: &[PathBuf],
    options: BatchOptions,
    factory: &dyn SourceFactory,
) -> BatchSummary {
    let mut failures: Vec<(usize, FileFailure)> = paths
        .par_iter()
        .enumerate()
        .filter_map(|(position, path)| {
            match validate_file(path, options.schema, options.time_invariant, factory) {
                Ok(validated) => {
                    debug!(path = %path.display(), sample = validated.sample_value, "file passed");
                    None
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "file failed validation");
                    Some((
                        position,
                        FileFailure {
                            path: path.clone(),
                            message: err.to_string(),
                        },
                    ))
                }
            }
        })
        .collect();
    failures.sort_by_key(|(position, _)| *position);

    BatchSummary {
        checked: paths.len(),
        failures: failures.into_iter().map(|(_, failure)| failure).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_requires_files_and_no_failures() {
        let empty = BatchSummary::default();
        assert!(!empty.passed());

        let clean = BatchSummary {
            checked: 3,
            failures: Vec::new(),
        };
        assert!(clean.passed());

        let failed = BatchSummary {
            checked: 3,
            failures: vec![FileFailure {
                path: PathBuf::from("bad.nc"),
                message: "unknown filename format: bad.nc".to_string(),
            }],
        };
        assert!(!failed.passed());
    }
}
