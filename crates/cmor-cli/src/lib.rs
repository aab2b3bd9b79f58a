//! CLI library components for the CMOR output validator.

pub mod discovery;
pub mod logging;
pub mod manifest;
