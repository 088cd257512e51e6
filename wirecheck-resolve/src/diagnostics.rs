//! Diagnostics and diagnostic sinks.
//!
//! Every validation failure is reported once to a [`DiagnosticSink`] and the
//! offending declaration yields no IR. Reporting never aborts the pass.

use thiserror::Error;
use wirecheck_model::{DeclId, DeclKind, DeclarationModel, TypeDescriptor};

/// Broad class of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// Missing, overloaded or wrongly declared method or parameter layout.
    Structural,
    /// Invalid combination of parameter role arguments.
    Role,
    /// Type not accepted for its role.
    TypeCompatibility,
    /// Return type does not match its directives.
    ReturnShape,
}

/// A user-facing schema problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticKind {
    /// No method with the requested name.
    #[error("No methods named \"{name}\" were found in type {type_name}")]
    MethodNotFound {
        /// Requested method name.
        name: String,
        /// Simple name of the searched type.
        type_name: String,
    },

    /// Several methods share the requested name.
    #[error("Wire methods cannot have overloads")]
    Overloaded,

    /// The method is not static.
    #[error("Wire method must be static")]
    NotStatic,

    /// The method is not public.
    #[error("Wire method must be public")]
    NotPublic,

    /// The method declares checked exceptions.
    #[error("Wire methods must be throw safe")]
    NotThrowSafe,

    /// An untagged parameter follows a tagged one.
    #[error("Positional parameter detected after non-positional parameter")]
    PositionalAfterBound,

    /// The declaration model reports no type for a parameter.
    #[error("Wire method parameter has no type")]
    UntypedParameter,

    /// A parameter carries several role tags.
    #[error("Only one multiconnect parameter annotation is allowed")]
    MultipleRoles,

    /// An argument path names no field of the resolution context.
    #[error("Could not resolve argument \"{path}\"")]
    UnresolvedArgument {
        /// The argument path as written.
        path: String,
    },

    /// A default-constructed supplier has no type argument.
    #[error("Default construct supplier must have a type argument")]
    SupplierWithoutArgument,

    /// A default-constructed value has an unsupported type.
    #[error("Cannot default-construct non-multiconnect type")]
    NotDefaultConstructible,

    /// A filled argument names a registry and a version bound.
    #[error("Cannot specify fromRegistry and fromVersion or toVersion")]
    RegistryWithVersion,

    /// A registry fill targets a type that cannot hold registry ids.
    #[error("Cannot fill non-registry type from a registry")]
    NotRegistryType,

    /// Only one end of a version range is given.
    #[error("Cannot specify fromVersion without toVersion or vice versa")]
    HalfVersionRange,

    /// A version-range fill is not a conversion between variants of one message.
    #[error("Invalid filled variant conversion type")]
    InvalidVariantConversion,

    /// An auto-filled parameter has a type generated code cannot provide.
    #[error("Cannot fill type {ty}")]
    CannotFill {
        /// Parameter type.
        ty: TypeDescriptor,
    },

    /// A global data parameter is not a declared type or a sink of one.
    #[error("Invalid global type {ty}")]
    InvalidGlobalType {
        /// Parameter type.
        ty: TypeDescriptor,
    },

    /// Return type directives on a method not returning a list of objects.
    #[error("@ReturnType is only allowed on methods that return List<Object>")]
    ReturnTypeNotList,

    /// A record field has no wire type.
    #[error("Could not determine wire type for field \"{field}\"")]
    NoWireType {
        /// Field name.
        field: String,
    },
}

impl DiagnosticKind {
    /// Returns the category of this diagnostic.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::MethodNotFound { .. }
            | Self::Overloaded
            | Self::NotStatic
            | Self::NotPublic
            | Self::NotThrowSafe
            | Self::PositionalAfterBound
            | Self::UntypedParameter
            | Self::MultipleRoles => Category::Structural,
            Self::UnresolvedArgument { .. }
            | Self::SupplierWithoutArgument
            | Self::RegistryWithVersion
            | Self::HalfVersionRange => Category::Role,
            Self::NotDefaultConstructible
            | Self::NotRegistryType
            | Self::InvalidVariantConversion
            | Self::CannotFill { .. }
            | Self::InvalidGlobalType { .. }
            | Self::NoWireType { .. } => Category::TypeCompatibility,
            Self::ReturnTypeNotList => Category::ReturnShape,
        }
    }
}

/// A diagnostic anchored at a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// Declaration the problem is reported at.
    pub location: DeclId,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub const fn new(kind: DiagnosticKind, location: DeclId) -> Self {
        Self { kind, location }
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Formats the diagnostic as `location: message` using names from `model`.
    #[must_use]
    pub fn render(&self, model: &dyn DeclarationModel) -> String {
        format!("{}: {}", location_path(model, self.location), self.kind)
    }
}

/// Human readable path of a declaration, e.g. `a.Move.foo(x)`.
#[must_use]
pub fn location_path(model: &dyn DeclarationModel, decl: DeclId) -> String {
    if let Some(name) = model.qualified_name(decl) {
        return name.to_string();
    }
    let name = model.name(decl);
    match model.enclosing(decl) {
        Some(outer) if model.kind(decl) == DeclKind::Parameter => {
            format!("{}({name})", location_path(model, outer))
        }
        Some(outer) => format!("{}.{name}", location_path(model, outer)),
        None => name.to_string(),
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticSink {
    /// Records a diagnostic. Analysis continues afterwards.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Collecting sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of collected diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over diagnostics in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Number of diagnostics of the given kind.
    #[must_use]
    pub fn count(&self, kind: &DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == *kind).count()
    }

    /// Number of diagnostics in the given category.
    #[must_use]
    pub fn count_category(&self, category: Category) -> usize {
        self.entries
            .iter()
            .filter(|d| d.kind.category() == category)
            .count()
    }

    /// Returns the collected diagnostics.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }

    /// Returns the diagnostics sorted, for order-insensitive comparison.
    #[must_use]
    pub fn sorted(&self) -> Vec<Diagnostic> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| {
            a.location
                .cmp(&b.location)
                .then_with(|| a.kind.to_string().cmp(&b.kind.to_string()))
        });
        entries
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Sink adapter that logs every diagnostic with `tracing::warn!` before
/// forwarding it.
#[derive(Debug)]
pub struct TracingSink<S> {
    inner: S,
}

impl<S: DiagnosticSink> TracingSink<S> {
    /// Wraps a sink.
    #[must_use]
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Returns the wrapped sink.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: DiagnosticSink> DiagnosticSink for TracingSink<S> {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{} (at declaration {})", diagnostic.kind, diagnostic.location);
        self.inner.report(diagnostic);
    }
}
