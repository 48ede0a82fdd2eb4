//! Domain model for funcscope
//!
//! Core types shared across the locator, the CLI drivers and the report
//! tools, plus structured errors for the failures that are real failures
//! (I/O, unparseable files). Lookup misses are `Option`, not errors.

pub mod errors;
pub mod types;

pub use errors::{FoldError, ImageError};
pub use types::FunctionRange;
