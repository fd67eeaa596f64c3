//! Error types and the run-wide diagnostics collector

pub mod scan_error;
pub mod diagnostics;

pub use scan_error::*;
pub use diagnostics::*;
