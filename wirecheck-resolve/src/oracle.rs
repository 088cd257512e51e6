//! Type-classification oracle.
//!
//! The oracle decides which host types the wire schema can carry. Hosts with
//! their own rules implement [`TypeOracle`]; [`DefaultOracle`] covers the
//! standard library and the well-known types of the [`NameTable`].

use crate::classify::TypeClassifier;
use crate::names::{KnownType, NameTable};
use crate::wire::WireType;
use wirecheck_model::{DeclarationModel, PrimitiveKind, TypeDescriptor};

/// Classification of types against the wire schema.
pub trait TypeOracle {
    /// Returns true if values of `ty` can be read and written by generated code.
    fn is_supported_type(&self, model: &dyn DeclarationModel, ty: &TypeDescriptor) -> bool;

    /// Returns true if `ty` can hold a registry id.
    fn is_registry_compatible(&self, model: &dyn DeclarationModel, ty: &TypeDescriptor) -> bool;

    /// Returns true if generated code can supply a value of `ty` on its own.
    fn can_auto_fill(&self, model: &dyn DeclarationModel, ty: &TypeDescriptor) -> bool;

    /// Wire type used for `ty` when a field has no explicit override.
    fn default_wire_type(
        &self,
        model: &dyn DeclarationModel,
        ty: &TypeDescriptor,
    ) -> Option<WireType>;
}

/// Oracle for the standard host library.
///
/// Supported types are the primitives other than `char` and their boxes,
/// strings, identifiers, UUIDs, bit sets, NBT compounds, network enums,
/// messages and containers of supported types. Integral primitives default
/// to variable-length encodings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOracle {
    classifier: TypeClassifier,
}

impl DefaultOracle {
    /// Creates an oracle over the given name table.
    #[must_use]
    pub const fn new(names: NameTable) -> Self {
        Self {
            classifier: TypeClassifier::new(names),
        }
    }

    fn names(&self) -> &NameTable {
        self.classifier.names()
    }

    fn is_schema_type(&self, model: &dyn DeclarationModel, ty: &TypeDescriptor) -> bool {
        self.classifier.is_message(model, ty)
            || self.classifier.is_message_variant(model, ty)
            || self.classifier.is_enum(model, ty)
    }
}

impl TypeOracle for DefaultOracle {
    fn is_supported_type(&self, model: &dyn DeclarationModel, ty: &TypeDescriptor) -> bool {
        if self.classifier.is_container_type(ty) {
            return self
                .classifier
                .component_type(ty)
                .is_ok_and(|component| self.is_supported_type(model, &component));
        }
        if let Some(kind) = self.names().unboxed(ty) {
            return kind != PrimitiveKind::Char;
        }
        match self.names().role_of(ty) {
            Some(
                KnownType::String
                | KnownType::Identifier
                | KnownType::Uuid
                | KnownType::BitSet
                | KnownType::NbtCompound,
            ) => true,
            _ => self.is_schema_type(model, ty),
        }
    }

    fn is_registry_compatible(&self, _model: &dyn DeclarationModel, ty: &TypeDescriptor) -> bool {
        let component = self.classifier.deep_component_type(ty);
        match self.names().unboxed(&component) {
            Some(kind) => matches!(
                kind,
                PrimitiveKind::Byte | PrimitiveKind::Short | PrimitiveKind::Int | PrimitiveKind::Long
            ),
            None => self.names().is(&component, KnownType::Identifier),
        }
    }

    fn can_auto_fill(&self, _model: &dyn DeclarationModel, ty: &TypeDescriptor) -> bool {
        matches!(
            self.names().role_of(ty),
            Some(KnownType::TypedMap | KnownType::NetworkHandler | KnownType::DelayedPacketSender)
        )
    }

    fn default_wire_type(
        &self,
        model: &dyn DeclarationModel,
        ty: &TypeDescriptor,
    ) -> Option<WireType> {
        if let Some(kind) = self.names().unboxed(ty) {
            return match kind {
                PrimitiveKind::Boolean => Some(WireType::Boolean),
                PrimitiveKind::Byte => Some(WireType::Byte),
                PrimitiveKind::Short => Some(WireType::Short),
                PrimitiveKind::Int => Some(WireType::VarInt),
                PrimitiveKind::Long => Some(WireType::VarLong),
                PrimitiveKind::Float => Some(WireType::Float),
                PrimitiveKind::Double => Some(WireType::Double),
                PrimitiveKind::Char => None,
            };
        }
        match self.names().role_of(ty) {
            Some(KnownType::String) => return Some(WireType::String),
            Some(KnownType::Identifier) => return Some(WireType::Identifier),
            Some(KnownType::Uuid) => return Some(WireType::Uuid),
            Some(KnownType::BitSet) => return Some(WireType::BitSet),
            Some(KnownType::NbtCompound) => return Some(WireType::NbtCompound),
            _ => {}
        }
        if self.classifier.is_enum(model, ty) {
            Some(WireType::VarInt)
        } else if self.classifier.is_message(model, ty) || self.classifier.is_message_variant(model, ty)
        {
            Some(WireType::Message)
        } else {
            None
        }
    }
}
