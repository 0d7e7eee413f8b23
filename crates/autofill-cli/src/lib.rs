//! CLI library components for the MedDRA autofill batch driver.

pub mod logging;
pub mod pipeline;
pub mod types;
