//! # Wirecheck Model
//!
//! Declaration model and type descriptors for the wirecheck analyser.
//!
//! This crate provides:
//! - Type descriptors with a parser for written type expressions
//! - Annotations with typed argument values
//! - The read-only [`DeclarationModel`] trait the analyser queries
//! - An in-memory [`Snapshot`] implementation and its XML loader

pub mod annotation;
pub mod decl;
pub mod error;
pub mod parser;
pub mod snapshot;
pub mod tags;
pub mod types;

pub use annotation::{Annotation, AnnotationValue};
pub use decl::{DeclId, DeclKind, DeclarationModel, Modifiers};
pub use error::ParseError;
pub use parser::{parse_snapshot, parse_snapshot_file, parse_snapshot_into};
pub use snapshot::{Declaration, Snapshot, UNIVERSAL_BASE};
pub use types::{PrimitiveKind, TypeDescriptor};
