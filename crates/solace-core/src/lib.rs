//! Shared vocabulary for the Solace support client: configuration, the
//! top-level error type, and the small value types every other crate speaks.

pub mod config;
pub mod error;
pub mod types;

pub use config::SolaceConfig;
pub use error::{Result, SolaceError};
pub use types::*;
