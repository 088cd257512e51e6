//! Resolver configuration and entry point.

use crate::classify::TypeClassifier;
use crate::construct;
use crate::hierarchy;
use crate::names::NameTable;
use crate::oracle::{DefaultOracle, TypeOracle};
use crate::throws;
use wirecheck_model::{DeclId, DeclarationModel, TypeDescriptor};

/// Builder for configuring and creating a [`Resolver`].
pub struct ResolverBuilder<'a> {
    model: &'a dyn DeclarationModel,
    oracle: Option<Box<dyn TypeOracle + 'a>>,
    names: NameTable,
    allowed_exceptions: Vec<TypeDescriptor>,
}

impl<'a> ResolverBuilder<'a> {
    /// Creates a new builder over a declaration model with default settings.
    #[must_use]
    pub fn new(model: &'a dyn DeclarationModel) -> Self {
        Self {
            model,
            oracle: None,
            names: NameTable::DEFAULT,
            allowed_exceptions: Vec::new(),
        }
    }

    /// Sets the type-classification oracle.
    #[must_use]
    pub fn oracle(mut self, oracle: impl TypeOracle + 'a) -> Self {
        self.oracle = Some(Box::new(oracle));
        self
    }

    /// Sets the well-known name table.
    #[must_use]
    pub fn names(mut self, names: NameTable) -> Self {
        self.names = names;
        self
    }

    /// Allows an exception type (and its subtypes) in throw-safe methods.
    #[must_use]
    pub fn allow_exception(mut self, ty: TypeDescriptor) -> Self {
        self.allowed_exceptions.push(ty);
        self
    }

    /// Builds the resolver. Without an explicit oracle a [`DefaultOracle`]
    /// over the configured name table is used.
    #[must_use]
    pub fn build(self) -> Resolver<'a> {
        let oracle = self
            .oracle
            .unwrap_or_else(|| Box::new(DefaultOracle::new(self.names)));

        Resolver {
            model: self.model,
            oracle,
            classifier: TypeClassifier::new(self.names),
            allowed_exceptions: self.allowed_exceptions,
        }
    }
}

/// Declaration resolver and validator.
///
/// Read-only over the declaration model; every validation failure is
/// reported to the caller's sink and yields no IR.
pub struct Resolver<'a> {
    pub(crate) model: &'a dyn DeclarationModel,
    pub(crate) oracle: Box<dyn TypeOracle + 'a>,
    pub(crate) classifier: TypeClassifier,
    pub(crate) allowed_exceptions: Vec<TypeDescriptor>,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver with default settings.
    #[must_use]
    pub fn new(model: &'a dyn DeclarationModel) -> Self {
        ResolverBuilder::new(model).build()
    }

    /// Returns the declaration model.
    #[must_use]
    pub fn model(&self) -> &'a dyn DeclarationModel {
        self.model
    }

    /// Returns the type classifier.
    #[must_use]
    pub const fn classifier(&self) -> &TypeClassifier {
        &self.classifier
    }

    /// Returns the well-known name table.
    #[must_use]
    pub const fn names(&self) -> &NameTable {
        self.classifier.names()
    }

    /// Returns the type-classification oracle.
    #[must_use]
    pub fn oracle(&self) -> &dyn TypeOracle {
        self.oracle.as_ref()
    }

    /// Returns the exception types allowed in throw-safe methods.
    #[must_use]
    pub fn allowed_exceptions(&self) -> &[TypeDescriptor] {
        &self.allowed_exceptions
    }

    /// See [`hierarchy::is_polymorphic_root`].
    #[must_use]
    pub fn is_polymorphic_root(&self, decl: DeclId) -> bool {
        hierarchy::is_polymorphic_root(self.model, self.names(), decl)
    }

    /// See [`hierarchy::polymorphic_parent`].
    #[must_use]
    pub fn polymorphic_parent(&self, decl: DeclId) -> Option<DeclId> {
        hierarchy::polymorphic_parent(self.model, self.names(), decl)
    }

    /// See [`hierarchy::record_fields`].
    #[must_use]
    pub fn record_fields(&self, decl: DeclId) -> Vec<DeclId> {
        hierarchy::record_fields(self.model, decl)
    }

    /// See [`hierarchy::all_record_fields`].
    #[must_use]
    pub fn all_record_fields(&self, decl: DeclId) -> Vec<DeclId> {
        hierarchy::all_record_fields(self.model, self.names(), decl)
    }

    /// See [`hierarchy::enum_constants`].
    #[must_use]
    pub fn enum_constants(&self, decl: DeclId) -> Vec<DeclId> {
        hierarchy::enum_constants(self.model, decl)
    }

    /// Returns true if the class can be default-constructed by generated code.
    #[must_use]
    pub fn is_constructable(&self, decl: DeclId) -> bool {
        construct::is_constructable(self.model, self.names(), decl, &self.allowed_exceptions)
    }

    /// Returns true if the executable only throws unchecked exceptions, the
    /// resolver-wide allowed exceptions or any of `extra_allowed`.
    #[must_use]
    pub fn is_throw_safe(&self, executable: DeclId, extra_allowed: &[TypeDescriptor]) -> bool {
        if extra_allowed.is_empty() {
            return throws::is_throw_safe(
                self.model,
                self.names(),
                executable,
                &self.allowed_exceptions,
            );
        }
        let mut allowed = self.allowed_exceptions.clone();
        allowed.extend_from_slice(extra_allowed);
        throws::is_throw_safe(self.model, self.names(), executable, &allowed)
    }
}
