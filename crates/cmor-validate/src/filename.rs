//! Filename decomposition and frequency-dependent date-token parsing.
//!
//! Filenames follow `<token>_<token>_..._<start>-<end>.<ext>`, optionally
//! with a `-clim` climatological-summary marker before the extension. The
//! number and order of leading tokens is fixed by the schema selector; the
//! final token is always the compound date range, whose width is driven by
//! the frequency resolved from the table field.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use cmor_model::{
    DecodedFilename, FileMetadata, FileNameSchema, Frequency, PartialDate, Result,
    ValidationError, secondary_frequency,
};

use crate::frequency::resolve_frequency;

/// Suffix marking a climatological-summary file, sitting between the
/// date range and the extension.
const CLIMATOLOGY_MARKER: &str = "-clim";

/// Parses a fixed-width date token at the precision the frequency implies.
///
/// Layouts: `YYYY` (yearly/decadal), `YYYYMM` (monthly), `YYYYMMDD`
/// (daily), `YYYYMMDDhhmm` (hour-scale), `YYYYMMDDhhmmss` (sub-hourly).
/// A token of the wrong width, or with any non-digit character, is an
/// `InvalidDateString`; a frequency with no date layout (`fx`, or a code
/// outside the vocabulary) is an `UnsupportedFrequency`.
pub fn parse_date_token(value: &str, frequency: &str) -> Result<PartialDate> {
    let width = Frequency::from_code(frequency)
        .and_then(|f| f.date_token_width())
        .ok_or_else(|| ValidationError::UnsupportedFrequency {
            frequency: frequency.to_string(),
        })?;

    if value.len() != width || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidDateString {
            value: value.to_string(),
            frequency: frequency.to_string(),
        });
    }

    let field = |range: std::ops::Range<usize>| -> u32 {
        // Slices are all-digit and at most 4 characters, so this cannot fail.
        value[range].parse().unwrap_or(0)
    };

    let year = field(0..4) as i32;
    Ok(match width {
        4 => PartialDate::from_year(year),
        6 => PartialDate::from_ym(year, field(4..6)),
        8 => PartialDate::from_ymd(year, field(4..6), field(6..8)),
        12 => PartialDate::from_ymd_hm(year, field(4..6), field(6..8), field(8..10), field(10..12)),
        _ => PartialDate::from_ymd_hms(
            year,
            field(4..6),
            field(6..8),
            field(8..10),
            field(10..12),
            field(12..14),
        ),
    })
}

/// Renders a partial date back to its fixed-width token form.
///
/// Exact inverse of [`parse_date_token`] for a matching frequency: decoding
/// a date token and re-encoding it reproduces the original string.
pub fn encode_date_token(date: &PartialDate, frequency: &str) -> Result<String> {
    let width = Frequency::from_code(frequency)
        .and_then(|f| f.date_token_width())
        .ok_or_else(|| ValidationError::UnsupportedFrequency {
            frequency: frequency.to_string(),
        })?;

    let mut token = format!("{:04}", date.year());
    let components = [
        date.month(),
        date.day(),
        date.hour(),
        date.minute(),
        date.second(),
    ];
    for component in components.into_iter().flatten() {
        let _ = write!(token, "{component:02}");
    }

    if token.len() != width {
        return Err(ValidationError::InvalidDateString {
            value: token,
            frequency: frequency.to_string(),
        });
    }
    Ok(token)
}

/// Decodes a filename into its metadata record.
///
/// `time_invariant` is signaled by the caller for fixed-field products;
/// it is never inferred from the filename. Such files carry no date-range
/// token and their `start_date`/`end_date` stay unset.
pub fn identify_filename_metadata(
    path: &Path,
    schema: FileNameSchema,
    time_invariant: bool,
) -> Result<DecodedFilename> {
    let basename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ValidationError::MalformedFilename {
            filename: path.display().to_string(),
        })?
        .to_string();
    let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let stem = basename
        .rsplit_once('.')
        .map(|(stem, _ext)| stem)
        .unwrap_or(&basename);
    let (stem, climatology) = match stem.strip_suffix(CLIMATOLOGY_MARKER) {
        Some(stripped) => (stripped, true),
        None => (stem, false),
    };

    let mut tokens: Vec<String> = stem.split('_').map(str::to_string).collect();

    // Legacy naming artifact: the experiment "present_day" arrives split
    // into two tokens by the field delimiter. Merge before zipping fields.
    if tokens.len() > 4 && tokens[3] == "present" && tokens[4] == "day" {
        let day = tokens.remove(4);
        let experiment = &mut tokens[3];
        experiment.push('_');
        experiment.push_str(&day);
    }

    let fields = schema.leading_fields();
    let required = fields.len() + usize::from(!time_invariant);
    if tokens.len() < required {
        return Err(ValidationError::MalformedFilename {
            filename: basename.clone(),
        });
    }

    let grid_label = schema.has_grid_label().then(|| tokens[5].clone());
    let table_id = tokens[1].clone();

    let (start_date, end_date) = if time_invariant {
        (None, None)
    } else {
        let date_range = &tokens[fields.len()];
        let parts: Vec<&str> = date_range.split('-').collect();
        let [start_str, end_str] = parts.as_slice() else {
            return Err(ValidationError::MalformedFilename {
                filename: basename.clone(),
            });
        };

        let frequency = resolve_frequency(&table_id)?;
        let wrap = |source: ValidationError| ValidationError::MalformedDateInFilename {
            filename: basename.clone(),
            source: Box::new(source),
        };
        let start = parse_date_token(start_str, &frequency).map_err(wrap)?;
        let end = parse_date_token(end_str, &frequency).map_err(wrap)?;
        (Some(start), Some(end))
    };

    let frequency = secondary_frequency(&table_id).to_string();
    let file_size = fs::metadata(path).map(|meta| meta.len()).unwrap_or(0);

    let metadata = FileMetadata {
        basename,
        directory,
        variable_id: tokens[0].clone(),
        table_id,
        model_id: tokens[2].clone(),
        experiment_id: tokens[3].clone(),
        ensemble_member: tokens[4].clone(),
        grid_label,
        start_date,
        end_date,
        frequency,
        file_size,
    };

    Ok(DecodedFilename {
        metadata,
        climatology,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn decode(name: &str, schema: FileNameSchema) -> Result<DecodedFilename> {
        identify_filename_metadata(&PathBuf::from(name), schema, false)
    }

    #[test]
    fn decodes_five_field_monthly_filename() {
        let decoded = decode(
            "clt_Amon_Monty_historical_r1i1p1_185912-188411.nc",
            FileNameSchema::LegacyFiveField,
        )
        .unwrap();
        let meta = &decoded.metadata;
        assert_eq!(meta.variable_id, "clt");
        assert_eq!(meta.table_id, "Amon");
        assert_eq!(meta.model_id, "Monty");
        assert_eq!(meta.experiment_id, "historical");
        assert_eq!(meta.ensemble_member, "r1i1p1");
        assert_eq!(meta.grid_label, None);
        assert_eq!(meta.start_date, Some(PartialDate::from_ym(1859, 12)));
        assert_eq!(meta.end_date, Some(PartialDate::from_ym(1884, 11)));
        assert_eq!(meta.frequency, "mon");
        assert!(!decoded.climatology);
    }

    #[test]
    fn decodes_six_field_gridded_filename() {
        let decoded = decode(
            "tas_day_Monty_highres-future_r1i1p1f1_gn_20150101-20991230.nc",
            FileNameSchema::SixFieldGridded,
        )
        .unwrap();
        let meta = &decoded.metadata;
        assert_eq!(meta.grid_label.as_deref(), Some("gn"));
        assert_eq!(meta.start_date, Some(PartialDate::from_ymd(2015, 1, 1)));
        assert_eq!(meta.end_date, Some(PartialDate::from_ymd(2099, 12, 30)));
    }

    #[test]
    fn strips_climatology_marker() {
        let decoded = decode(
            "clt_Amon_Monty_historical_r1i1p1_185001-187912-clim.nc",
            FileNameSchema::LegacyFiveField,
        )
        .unwrap();
        assert!(decoded.climatology);
        assert_eq!(
            decoded.metadata.start_date,
            Some(PartialDate::from_ym(1850, 1))
        );
    }

    #[test]
    fn merges_legacy_present_day_experiment() {
        let decoded = decode(
            "clt_Amon_Monty_present_day_r1i1p1_185912-188411.nc",
            FileNameSchema::LegacyFiveField,
        )
        .unwrap();
        assert_eq!(decoded.metadata.experiment_id, "present_day");
        assert_eq!(decoded.metadata.ensemble_member, "r1i1p1");
    }

    #[test]
    fn wrong_width_date_token_is_invalid() {
        let error = decode(
            "clt_Amon_Monty_historical_r1i1p1_1859-1884.nc",
            FileNameSchema::LegacyFiveField,
        )
        .unwrap_err();
        let ValidationError::MalformedDateInFilename { source, .. } = error else {
            panic!("expected MalformedDateInFilename, got {error:?}");
        };
        assert!(matches!(
            *source,
            ValidationError::InvalidDateString { ref value, .. } if value == "1859"
        ));
    }

    #[test]
    fn too_few_tokens_is_malformed() {
        let error = decode("clt_Amon_185912-188411.nc", FileNameSchema::LegacyFiveField)
            .unwrap_err();
        assert!(matches!(error, ValidationError::MalformedFilename { .. }));
    }

    #[test]
    fn date_range_must_split_into_two() {
        let error = decode(
            "clt_Amon_Monty_historical_r1i1p1_185912.nc",
            FileNameSchema::LegacyFiveField,
        )
        .unwrap_err();
        assert!(matches!(error, ValidationError::MalformedFilename { .. }));
    }

    #[test]
    fn fixed_fields_carry_no_date_range() {
        let decoded = identify_filename_metadata(
            &PathBuf::from("orog_fx_Monty_historical_r0i0p0.nc"),
            FileNameSchema::LegacyFiveField,
            true,
        )
        .unwrap();
        assert_eq!(decoded.metadata.start_date, None);
        assert_eq!(decoded.metadata.end_date, None);
        assert_eq!(decoded.metadata.frequency, "fx");
    }

    #[test]
    fn date_tokens_round_trip() {
        let cases = [
            ("1859", "yr"),
            ("185912", "mon"),
            ("18591201", "day"),
            ("185912011830", "6hr"),
            ("18591201183015", "subhr"),
        ];
        for (token, frequency) in cases {
            let parsed = parse_date_token(token, frequency).unwrap();
            assert_eq!(encode_date_token(&parsed, frequency).unwrap(), token);
        }
    }

    #[test]
    fn non_numeric_token_is_invalid() {
        let error = parse_date_token("1859xx", "mon").unwrap_err();
        assert!(matches!(error, ValidationError::InvalidDateString { .. }));
    }

    #[test]
    fn fixed_frequency_has_no_date_layout() {
        let error = parse_date_token("1859", "fx").unwrap_err();
        assert!(matches!(error, ValidationError::UnsupportedFrequency { .. }));

        let error = parse_date_token("1859", "clim").unwrap_err();
        assert!(matches!(error, ValidationError::UnsupportedFrequency { .. }));
    }
}
