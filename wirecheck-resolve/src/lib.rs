//! # Wirecheck Resolve
//!
//! Semantic analysis of versioned wire-message schemas.
//!
//! This crate provides:
//! - Type classification of containers, messages and network enums
//! - Message hierarchy queries (polymorphic roots, one-level field inheritance)
//! - Constructability and throw-safety checks
//! - Wire function resolution with typed parameter roles
//! - Wire-type bindings of record fields
//! - Per-variant and whole-schema analysis producing generator IR
//!
//! Schema problems are reported to a [`DiagnosticSink`] and yield no IR;
//! [`ResolveError`] is reserved for requests the declarations cannot answer.
//!
//! ## Example
//!
//! ```ignore
//! use wirecheck_resolve::{Diagnostics, ResolverBuilder};
//!
//! let resolver = ResolverBuilder::new(&snapshot).build();
//! let mut diagnostics = Diagnostics::new();
//! let variants = resolver.analyze_schema(&mut diagnostics);
//! ```

pub mod analysis;
pub mod binding;
pub mod classify;
pub mod construct;
pub mod diagnostics;
pub mod error;
pub mod function;
pub mod hierarchy;
pub mod names;
pub mod oracle;
pub mod resolver;
pub mod throws;
pub mod wire;

pub use analysis::{FieldBinding, VariantIr};
pub use binding::{
    CustomFixSpec, DatafixSpec, DefaultConstructSpec, IntroduceSpec, LengthSpec, WireTypeBinding,
};
pub use classify::TypeClassifier;
pub use diagnostics::{
    Category, Diagnostic, DiagnosticKind, DiagnosticSink, Diagnostics, TracingSink,
    location_path,
};
pub use error::ResolveError;
pub use function::{ArgumentContext, BoundParameter, FillSource, FunctionLookup, WireFunction};
pub use names::{KnownType, NameTable};
pub use oracle::{DefaultOracle, TypeOracle};
pub use resolver::{Resolver, ResolverBuilder};
pub use wire::WireType;
