//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use wirecheck::prelude::*;
//! ```

// Facade
pub use crate::{CheckError, CheckReport, check_from_file, check_from_xml, check_message};

// Declaration model
pub use wirecheck_model::{
    Annotation, AnnotationValue, DeclId, DeclKind, DeclarationModel, Declaration, Modifiers,
    ParseError, Snapshot, TypeDescriptor, parse_snapshot, tags,
};

// Resolver
pub use wirecheck_resolve::{
    BoundParameter, Diagnostic, DiagnosticKind, DiagnosticSink, Diagnostics, FillSource,
    ResolveError, Resolver, ResolverBuilder, TypeOracle, VariantIr, WireFunction, WireType,
    WireTypeBinding,
};
