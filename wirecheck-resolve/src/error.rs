//! Error types for resolver contract violations.
//!
//! User-facing schema problems are reported as diagnostics; these errors
//! signal that a caller asked for something the declarations cannot answer.

use thiserror::Error;
use wirecheck_model::TypeDescriptor;

/// Error type for resolver operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Component type requested for a type that is not a container.
    #[error("type {ty} is not a container type")]
    NotAContainer {
        /// The offending type.
        ty: TypeDescriptor,
    },

    /// No declaration with the given qualified name.
    #[error("unknown declaration '{name}'")]
    UnknownDeclaration {
        /// Qualified name that was looked up.
        name: String,
    },

    /// Variant analysis requested for a declaration that is neither a
    /// message nor a message variant.
    #[error("'{name}' is not a message or message variant")]
    NotAMessage {
        /// Name of the declaration.
        name: String,
    },
}

impl ResolveError {
    /// Creates an unknown declaration error.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownDeclaration { name: name.into() }
    }
}
