//! Contiguity of the time axis.

use cmor_model::{Result, ValidationError};
use tracing::debug;

use crate::source::TemporalDataSource;

/// Checks that consecutive time cells share their bound edges.
///
/// Instantaneous data (a `point` cell method on time) is sampled, not
/// accumulated, so gaps between cells are expected and the check is
/// skipped. Files without time bounds have nothing to verify.
pub fn check_contiguity(source: &dyn TemporalDataSource, filename: &str) -> Result<()> {
    if source.cell_methods("time").contains("point") {
        debug!(filename, "instantaneous data, skipping contiguity check");
        return Ok(());
    }
    let Some(bounds) = source.time_bounds() else {
        return Ok(());
    };

    let contiguous = bounds
        .windows(2)
        .all(|pair| pair[0][1] == pair[1][0]);
    if !contiguous {
        return Err(ValidationError::NonContiguousTimeAxis {
            filename: filename.to_string(),
        });
    }
    Ok(())
}
