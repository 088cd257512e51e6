//! Type classification.
//!
//! Pure queries over type descriptors. Nothing here reports diagnostics.

use crate::error::ResolveError;
use crate::hierarchy;
use crate::names::{KnownType, NameTable};
use wirecheck_model::{DeclarationModel, PrimitiveKind, TypeDescriptor};

/// Classifies type descriptors against a [`NameTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeClassifier {
    names: NameTable,
}

impl TypeClassifier {
    /// Creates a classifier over the given name table.
    #[must_use]
    pub const fn new(names: NameTable) -> Self {
        Self { names }
    }

    /// Returns the name table.
    #[must_use]
    pub const fn names(&self) -> &NameTable {
        &self.names
    }

    /// Returns true for integral primitives, `boolean` included.
    #[must_use]
    pub fn is_integral(&self, ty: &TypeDescriptor) -> bool {
        ty.primitive().is_some_and(|kind| kind.is_integral())
    }

    /// Returns true for `float` and `double`.
    #[must_use]
    pub fn is_floating_point(&self, ty: &TypeDescriptor) -> bool {
        ty.primitive().is_some_and(|kind| kind.is_floating_point())
    }

    /// Returns true if values of this type are written with a length.
    ///
    /// Arrays, generic lists with a type argument and the specialised
    /// numeric lists have a length.
    #[must_use]
    pub fn has_length(&self, ty: &TypeDescriptor) -> bool {
        if ty.is_array() {
            return true;
        }
        match self.names.role_of(ty) {
            Some(KnownType::List) => !ty.type_arguments().is_empty(),
            Some(KnownType::IntList | KnownType::LongList) => true,
            _ => false,
        }
    }

    /// Returns true for types that wrap a component: anything with a length,
    /// generic optionals with a type argument and the specialised optionals.
    #[must_use]
    pub fn is_container_type(&self, ty: &TypeDescriptor) -> bool {
        if self.has_length(ty) {
            return true;
        }
        match self.names.role_of(ty) {
            Some(KnownType::Optional) => !ty.type_arguments().is_empty(),
            Some(KnownType::OptionalInt | KnownType::OptionalLong) => true,
            _ => false,
        }
    }

    /// Returns the component type of a container.
    ///
    /// # Errors
    /// Returns `ResolveError::NotAContainer` if `ty` is not a container type.
    pub fn component_type(&self, ty: &TypeDescriptor) -> Result<TypeDescriptor, ResolveError> {
        self.unwrap_container(ty)
            .ok_or_else(|| ResolveError::NotAContainer { ty: ty.clone() })
    }

    /// Strips container layers until a non-container type remains.
    #[must_use]
    pub fn deep_component_type(&self, ty: &TypeDescriptor) -> TypeDescriptor {
        let mut current = ty.clone();
        while self.is_container_type(&current) {
            match self.unwrap_container(&current) {
                Some(component) => current = component,
                None => break,
            }
        }
        current
    }

    fn unwrap_container(&self, ty: &TypeDescriptor) -> Option<TypeDescriptor> {
        if let Some(element) = ty.element() {
            return Some(element.clone());
        }
        match self.names.role_of(ty)? {
            KnownType::List | KnownType::Optional => ty.type_arguments().first().cloned(),
            KnownType::OptionalInt | KnownType::IntList => Some(PrimitiveKind::Int.into()),
            KnownType::OptionalLong | KnownType::LongList => Some(PrimitiveKind::Long.into()),
            _ => None,
        }
    }

    /// Returns true if `ty` names a message type.
    #[must_use]
    pub fn is_message(&self, model: &dyn DeclarationModel, ty: &TypeDescriptor) -> bool {
        model
            .declaration_of(ty)
            .is_some_and(|decl| hierarchy::is_message(model, decl))
    }

    /// Returns true if `ty` names a message variant.
    #[must_use]
    pub fn is_message_variant(&self, model: &dyn DeclarationModel, ty: &TypeDescriptor) -> bool {
        model
            .declaration_of(ty)
            .is_some_and(|decl| hierarchy::is_message_variant(model, decl))
    }

    /// Returns true if `ty` names a network enum.
    #[must_use]
    pub fn is_enum(&self, model: &dyn DeclarationModel, ty: &TypeDescriptor) -> bool {
        model
            .declaration_of(ty)
            .is_some_and(|decl| hierarchy::is_enum(model, decl))
    }
}
