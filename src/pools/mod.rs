//! Pool discovery, enrichment and validation

pub mod factory;
pub mod fetcher;
pub mod tokens;
pub mod validation;
pub mod scanner;

pub use factory::*;
pub use fetcher::*;
pub use tokens::*;
pub use validation::*;
pub use scanner::*;
