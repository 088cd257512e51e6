//! Error types for schema checks.

use thiserror::Error;

/// Error type for checking a declaration document.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Declaration document parsing error.
    #[error("declaration parse error: {0}")]
    Parse(#[from] wirecheck_model::ParseError),

    /// Resolver request the declarations cannot answer.
    #[error("resolve error: {0}")]
    Resolve(#[from] wirecheck_resolve::ResolveError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
