//! Sampling frequency codes and the date-token layouts they imply.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized sampling-interval tag encoded in a table identifier.
///
/// Each frequency fixes the width of the date tokens in a filename's
/// date-range field. Time-invariant (`fx`) products carry no date range
/// at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Annual means (`ann`).
    Annual,
    /// Decadal means (`dec`).
    Decadal,
    /// Yearly (`yr`).
    Yearly,
    /// Monthly (`mon`).
    Monthly,
    /// Daily (`day`).
    Daily,
    /// 6-hourly (`6hr`).
    SixHourly,
    /// 3-hourly (`3hr`).
    ThreeHourly,
    /// Hourly (`1hr`).
    OneHourly,
    /// Hourly, legacy spelling (`hr`).
    Hourly,
    /// Sub-hourly (`subhr`).
    SubHourly,
    /// Time-invariant fixed fields (`fx`).
    Fixed,
}

impl Frequency {
    /// Looks up a frequency from its lowercase code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ann" => Some(Self::Annual),
            "dec" => Some(Self::Decadal),
            "yr" => Some(Self::Yearly),
            "mon" => Some(Self::Monthly),
            "day" => Some(Self::Daily),
            "6hr" => Some(Self::SixHourly),
            "3hr" => Some(Self::ThreeHourly),
            "1hr" => Some(Self::OneHourly),
            "hr" => Some(Self::Hourly),
            "subhr" => Some(Self::SubHourly),
            "fx" => Some(Self::Fixed),
            _ => None,
        }
    }

    /// The lowercase code as it appears in table identifiers.
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Annual => "ann",
            Self::Decadal => "dec",
            Self::Yearly => "yr",
            Self::Monthly => "mon",
            Self::Daily => "day",
            Self::SixHourly => "6hr",
            Self::ThreeHourly => "3hr",
            Self::OneHourly => "1hr",
            Self::Hourly => "hr",
            Self::SubHourly => "subhr",
            Self::Fixed => "fx",
        }
    }

    /// Expected character count of one date token, `None` for fixed fields.
    pub fn date_token_width(&self) -> Option<usize> {
        match self {
            Self::Annual | Self::Decadal | Self::Yearly => Some(4),
            Self::Monthly => Some(6),
            Self::Daily => Some(8),
            Self::SixHourly | Self::ThreeHourly | Self::OneHourly | Self::Hourly => Some(12),
            Self::SubHourly => Some(14),
            Self::Fixed => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// Vocabulary for the coarse secondary classification of a table identifier.
///
/// This is a separate, substring-based pass over the table field, distinct
/// from the token-scanning resolver: its result feeds only the sub-daily
/// rounding policy and defaults to an empty string when nothing matches.
/// Order matters; the first member contained in the lowercased table wins.
pub const SECONDARY_FREQUENCIES: &[&str] =
    &["ann", "mon", "day", "6hr", "3hr", "1hr", "subhr", "fx"];

/// Classifies a table identifier against [`SECONDARY_FREQUENCIES`].
pub fn secondary_frequency(table_id: &str) -> &'static str {
    let lowered = table_id.to_lowercase();
    SECONDARY_FREQUENCIES
        .iter()
        .find(|code| lowered.contains(*code))
        .copied()
        .unwrap_or("")
}

/// Whether a secondary classification triggers minute rounding.
///
/// Sub-daily codes count with or without the `Pt` instantaneous-point
/// qualifier.
pub fn is_subdaily(frequency: &str) -> bool {
    matches!(
        frequency,
        "6hr" | "3hr" | "1hr" | "6hrPt" | "3hrPt" | "1hrPt"
    )
}
