//! The individual file checks run by the orchestrator.

mod contiguity;
mod sample;
mod temporal;

pub use contiguity::check_contiguity;
pub use sample::check_data_point;
pub use temporal::check_start_end_times;
