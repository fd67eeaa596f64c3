//! Network providers, retries and contract reads

pub mod providers;
pub mod reader;
pub mod retry;
#[cfg(test)]
pub mod mock;

pub use providers::*;
pub use reader::*;
pub use retry::*;
