//! Metadata read from inside a file, as opposed to from its name.

use cmor_model::{ContentsMetadata, Result, ValidationError};

use crate::source::TemporalDataSource;

/// Default project label when a file predates the `activity_id` attribute.
const DEFAULT_ACTIVITY_ID: &str = "HighResMIP";

/// Extracts the content metadata the validation report carries.
///
/// `units` and an institution identifier are required; `long_name` and
/// `standard_name` are optional because many variables only define one of
/// the two. The institution is read from `institution_id`, falling back to
/// the older `institute_id` spelling.
pub fn identify_contents_metadata(
    source: &dyn TemporalDataSource,
    filename: &str,
) -> Result<ContentsMetadata> {
    let missing = |detail: &str| ValidationError::MissingContentMetadata {
        filename: filename.to_string(),
        detail: detail.to_string(),
    };

    let units = source
        .variable_attribute("units")
        .ok_or_else(|| missing("variable has no units attribute"))?
        .to_string();
    let institute = source
        .global_attribute("institution_id")
        .or_else(|| source.global_attribute("institute_id"))
        .ok_or_else(|| missing("no institution_id or institute_id attribute"))?
        .to_string();
    let activity_id = source
        .global_attribute("activity_id")
        .unwrap_or(DEFAULT_ACTIVITY_ID)
        .to_string();

    Ok(ContentsMetadata {
        var_name: source.variable_name().to_string(),
        units,
        long_name: source.variable_attribute("long_name").map(str::to_string),
        standard_name: source
            .variable_attribute("standard_name")
            .map(str::to_string),
        activity_id,
        institute,
    })
}
