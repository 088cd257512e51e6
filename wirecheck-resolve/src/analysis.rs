//! Variant and schema analysis.
//!
//! Drives field binding, handler lookup and partial handler resolution for
//! each message and message variant, producing the IR consumed by the code
//! generator.

use crate::binding::WireTypeBinding;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::error::ResolveError;
use crate::function::WireFunction;
use crate::hierarchy;
use crate::resolver::Resolver;
use wirecheck_model::{DeclId, DeclarationModel};

/// A record field together with its wire-type binding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldBinding {
    /// Field declaration.
    pub field: DeclId,
    /// Field name.
    pub name: String,
    /// Wire encoding and directives.
    pub binding: WireTypeBinding,
}

/// Analysed message or message variant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantIr {
    /// Message declaration.
    pub decl: DeclId,
    /// Qualified name.
    pub name: String,
    /// Bound fields, polymorphic parent's first.
    pub fields: Vec<FieldBinding>,
    /// Handler method.
    pub handler: Option<DeclId>,
    /// Resolved partial handlers.
    pub partial_handlers: Vec<WireFunction>,
    /// Whether this is the root of a polymorphic hierarchy.
    pub polymorphic_root: bool,
}

impl VariantIr {
    /// Looks up a bound field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldBinding> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl Resolver<'_> {
    /// Analyses a message or message variant.
    ///
    /// Fields without a wire type are reported and left out of the result.
    ///
    /// # Errors
    /// Returns `ResolveError::NotAMessage` if `decl` is neither a message nor
    /// a message variant.
    pub fn analyze_variant(
        &self,
        decl: DeclId,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<VariantIr, ResolveError> {
        let model = self.model;
        let name = model
            .qualified_name(decl)
            .unwrap_or_else(|| model.name(decl))
            .to_string();
        if !hierarchy::is_message(model, decl) && !hierarchy::is_message_variant(model, decl) {
            return Err(ResolveError::NotAMessage { name });
        }
        tracing::debug!("Analysing {}", name);

        let mut fields = Vec::new();
        for field in self.all_record_fields(decl) {
            let field_name = model.name(field).to_string();
            match self.wire_type_binding(field) {
                Some(binding) => fields.push(FieldBinding {
                    field,
                    name: field_name,
                    binding,
                }),
                None => {
                    let kind = DiagnosticKind::NoWireType { field: field_name };
                    sink.report(Diagnostic::new(kind, field));
                }
            }
        }

        Ok(VariantIr {
            decl,
            name,
            fields,
            handler: self.handler(decl),
            partial_handlers: self.partial_handlers(decl, sink),
            polymorphic_root: self.is_polymorphic_root(decl),
        })
    }

    /// Analyses the message or message variant with the given qualified name.
    ///
    /// # Errors
    /// Returns `ResolveError::UnknownDeclaration` if no type has that name,
    /// or `ResolveError::NotAMessage` if it is not a message.
    pub fn analyze_named(
        &self,
        qualified_name: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<VariantIr, ResolveError> {
        let decl = self
            .model
            .lookup(qualified_name)
            .ok_or_else(|| ResolveError::unknown(qualified_name))?;
        self.analyze_variant(decl, sink)
    }

    /// Analyses every message and message variant, depth first in
    /// declaration order.
    pub fn analyze_schema(&self, sink: &mut dyn DiagnosticSink) -> Vec<VariantIr> {
        let model = self.model;
        model
            .type_declarations()
            .into_iter()
            .filter(|&decl| {
                hierarchy::is_message(model, decl) || hierarchy::is_message_variant(model, decl)
            })
            .filter_map(|decl| self.analyze_variant(decl, sink).ok())
            .collect()
    }
}
