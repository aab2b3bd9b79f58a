pub mod calendar;
pub mod date;
pub mod error;
pub mod frequency;
pub mod metadata;

pub use calendar::{Calendar, TimeUnit, TimeUnits, TimeUnitsError};
pub use date::{CalendarDateTime, PartialDate};
pub use error::{Result, ValidationError};
pub use frequency::{Frequency, SECONDARY_FREQUENCIES, is_subdaily, secondary_frequency};
pub use metadata::{ContentsMetadata, DecodedFilename, FileMetadata, FileNameSchema};
