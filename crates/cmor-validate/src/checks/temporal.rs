//! Consistency between the filename's date range and the file's time axis.

use cmor_model::{CalendarDateTime, FileMetadata, Result, ValidationError, is_subdaily};
use tracing::debug;

use crate::source::TemporalDataSource;

/// Checks the filename's start and end dates against the time axis.
///
/// Regular files compare against the first and last time points. For
/// climatological summaries the points are mid-period representatives, so
/// the comparison uses the outer bound edges instead. Sub-daily data is
/// rounded to the nearest minute on both sides before comparing, since
/// stored values drift by seconds relative to the round times declared in
/// filenames.
pub fn check_start_end_times(
    source: &dyn TemporalDataSource,
    metadata: &FileMetadata,
    climatology: bool,
) -> Result<()> {
    let (Some(declared_start), Some(declared_end)) = (&metadata.start_date, &metadata.end_date)
    else {
        return Ok(());
    };
    let filename = metadata.basename.clone();

    let (first_value, last_value) = if climatology {
        let bounds = source.time_bounds().filter(|b| !b.is_empty()).ok_or_else(|| {
            ValidationError::MissingContentMetadata {
                filename: filename.clone(),
                detail: "climatology file has no time bounds".to_string(),
            }
        })?;
        (bounds[0][0], bounds[bounds.len() - 1][1])
    } else {
        let points = source.time_points();
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(ValidationError::MissingContentMetadata {
                filename,
                detail: "file has no time points".to_string(),
            });
        };
        (*first, *last)
    };

    let decode = |value: f64| -> Result<CalendarDateTime> {
        source
            .decode_time(value)
            .map_err(|err| ValidationError::MissingContentMetadata {
                filename: metadata.basename.clone(),
                detail: err.to_string(),
            })
    };
    let mut first_time = decode(first_value)?;
    let mut last_time = decode(last_value)?;

    if is_subdaily(&metadata.frequency) {
        first_time = first_time.rounded_to_minute();
        last_time = last_time.rounded_to_minute();
        debug!(
            frequency = %metadata.frequency,
            %first_time,
            %last_time,
            "rounded sub-daily endpoints to the minute"
        );
    }

    if !declared_start.matches(&first_time) {
        return Err(ValidationError::StartDateMismatch {
            filename,
            actual: first_time.to_string(),
        });
    }
    if !declared_end.matches(&last_time) {
        return Err(ValidationError::EndDateMismatch {
            filename,
            actual: last_time.to_string(),
        });
    }
    Ok(())
}
