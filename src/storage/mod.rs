//! Data persistence and file operations

pub mod outputs;
pub mod summary;

pub use outputs::*;
pub use summary::*;
