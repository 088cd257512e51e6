//! # Wirecheck
//!
//! Semantic analysis front end for versioned wire-message schemas.
//!
//! Wirecheck validates annotated message declarations before code generation:
//! it resolves the static helper methods generated code calls, classifies
//! every helper parameter by role, binds each record field to a wire
//! encoding and reports every schema problem as a diagnostic.
//!
//! ## Quick Start
//!
//! ```ignore
//! use wirecheck::prelude::*;
//!
//! let report = check_from_file("declarations.xml")?;
//! for message in report.messages() {
//!     eprintln!("{message}");
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`model`] - Declaration model, type descriptors and the XML loader
//! - [`resolve`] - Resolver, diagnostics and generator IR

pub mod error;
pub mod prelude;

pub use error::CheckError;

/// Declaration model and type descriptors.
pub mod model {
    pub use wirecheck_model::*;
}

/// Resolver, diagnostics and generator IR.
pub mod resolve {
    pub use wirecheck_resolve::*;
}

use std::path::Path;
use wirecheck_model::{DeclarationModel, Snapshot};
use wirecheck_resolve::{Diagnostics, Resolver, TracingSink, VariantIr};

/// Result of checking a declaration document.
#[derive(Debug)]
pub struct CheckReport {
    /// The loaded declarations.
    pub snapshot: Snapshot,
    /// Analysed messages and message variants.
    pub variants: Vec<VariantIr>,
    /// Every reported schema problem.
    pub diagnostics: Diagnostics,
}

impl CheckReport {
    /// Analyses every message in the snapshot with a default resolver.
    #[must_use]
    pub fn analyze(snapshot: Snapshot) -> Self {
        let mut sink = TracingSink::new(Diagnostics::new());
        let variants = Resolver::new(&snapshot).analyze_schema(&mut sink);
        Self {
            snapshot,
            variants,
            diagnostics: sink.into_inner(),
        }
    }

    /// Returns true if no schema problems were reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Looks up an analysed message by qualified name.
    #[must_use]
    pub fn variant(&self, qualified_name: &str) -> Option<&VariantIr> {
        self.variants.iter().find(|variant| variant.name == qualified_name)
    }

    /// Renders every diagnostic as `location: message`, in report order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics
            .iter()
            .map(|diagnostic| diagnostic.render(&self.snapshot))
            .collect()
    }
}

/// Checks every message of a declaration document.
///
/// # Errors
/// Returns `CheckError` if the document cannot be parsed.
pub fn check_from_xml(xml: &str) -> Result<CheckReport, CheckError> {
    let snapshot = wirecheck_model::parse_snapshot(xml)?;
    let report = CheckReport::analyze(snapshot);
    tracing::debug!(
        "Checked {} messages, {} problems",
        report.variants.len(),
        report.diagnostics.len()
    );
    Ok(report)
}

/// Checks every message of a declaration document on disk.
///
/// # Errors
/// Returns `CheckError` if reading or parsing fails.
pub fn check_from_file(path: impl AsRef<Path>) -> Result<CheckReport, CheckError> {
    let xml = std::fs::read_to_string(path)?;
    check_from_xml(&xml)
}

/// Checks a single message of a declaration document.
///
/// # Errors
/// Returns `CheckError` if the document cannot be parsed, or if
/// `qualified_name` names no message or message variant.
pub fn check_message(xml: &str, qualified_name: &str) -> Result<CheckReport, CheckError> {
    let snapshot = wirecheck_model::parse_snapshot(xml)?;
    let mut sink = TracingSink::new(Diagnostics::new());
    let variant = Resolver::new(&snapshot).analyze_named(qualified_name, &mut sink)?;
    tracing::debug!(
        "Checked {} ({} declarations)",
        qualified_name,
        snapshot.type_declarations().len()
    );
    Ok(CheckReport {
        snapshot,
        variants: vec![variant],
        diagnostics: sink.into_inner(),
    })
}
