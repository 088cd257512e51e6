//! Message hierarchy queries.
//!
//! Polymorphic messages are a single abstract root extending the universal
//! base type, with concrete subclasses. Only one level of inheritance is
//! followed when collecting fields.

use crate::names::NameTable;
use wirecheck_model::{DeclId, DeclKind, DeclarationModel, Modifiers, tags};

/// Returns true if the declaration is tagged as a message.
#[must_use]
pub fn is_message(model: &dyn DeclarationModel, decl: DeclId) -> bool {
    model.has_annotation(decl, tags::MESSAGE)
}

/// Returns true if the declaration is tagged as a message variant.
#[must_use]
pub fn is_message_variant(model: &dyn DeclarationModel, decl: DeclId) -> bool {
    model.has_annotation(decl, tags::MESSAGE_VARIANT)
}

/// Returns true if the declaration is tagged as a network enum.
#[must_use]
pub fn is_enum(model: &dyn DeclarationModel, decl: DeclId) -> bool {
    model.has_annotation(decl, tags::NETWORK_ENUM)
}

/// Returns true for an abstract class tagged polymorphic whose superclass is
/// the universal base type.
#[must_use]
pub fn is_polymorphic_root(model: &dyn DeclarationModel, names: &NameTable, decl: DeclId) -> bool {
    model.kind(decl) == DeclKind::Class
        && model.has_annotation(decl, tags::POLYMORPHIC)
        && model.has_modifier(decl, Modifiers::ABSTRACT)
        && model
            .superclass(decl)
            .and_then(|ty| ty.qualified_name())
            .is_some_and(|name| names.is_universal_base(name))
}

/// Returns the declared superclass unless it is the universal base type.
#[must_use]
pub fn polymorphic_parent(
    model: &dyn DeclarationModel,
    names: &NameTable,
    decl: DeclId,
) -> Option<DeclId> {
    if !model.kind(decl).is_type() {
        return None;
    }
    let parent = model.declaration_of(model.superclass(decl)?)?;
    let name = model.qualified_name(parent)?;
    (!names.is_universal_base(name)).then_some(parent)
}

/// Non-static fields declared directly in a type, in declaration order.
#[must_use]
pub fn record_fields(model: &dyn DeclarationModel, decl: DeclId) -> Vec<DeclId> {
    model
        .enclosed(decl)
        .iter()
        .copied()
        .filter(|&member| {
            model.kind(member).is_field() && !model.has_modifier(member, Modifiers::STATIC)
        })
        .collect()
}

/// Fields of the polymorphic parent followed by the type's own fields.
///
/// Only the parent's own fields are taken, never the grandparent's.
#[must_use]
pub fn all_record_fields(
    model: &dyn DeclarationModel,
    names: &NameTable,
    decl: DeclId,
) -> Vec<DeclId> {
    match polymorphic_parent(model, names, decl) {
        Some(parent) => {
            let mut fields = record_fields(model, parent);
            fields.extend(record_fields(model, decl));
            fields
        }
        None => record_fields(model, decl),
    }
}

/// Enum constants of a type, in declaration order.
#[must_use]
pub fn enum_constants(model: &dyn DeclarationModel, decl: DeclId) -> Vec<DeclId> {
    model
        .enclosed(decl)
        .iter()
        .copied()
        .filter(|&member| model.kind(member) == DeclKind::EnumConstant)
        .collect()
}
