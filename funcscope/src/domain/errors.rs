//! Structured error types for funcscope
//!
//! Using thiserror for automatic Display implementation and error chaining.
//!
//! Note the deliberate asymmetry with the locator: failing to *load* an
//! image is an error, but a lookup that finds nothing (not found, ambiguous
//! pattern, malformed metadata) resolves to `None` plus a logged diagnostic.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to parse object file: {0}")]
    Object(#[from] object::Error),

    #[error("Failed to read debug metadata: {0}")]
    Dwarf(#[from] gimli::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum FoldError {
    #[error("line {line}: expected '<prefix> <count>'")]
    MalformedLine { line: usize },

    #[error("line {line}: count is not an unsigned integer")]
    BadCount { line: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
