//! Declarations and the read-only declaration model.

use crate::annotation::Annotation;
use crate::types::TypeDescriptor;
use bitflags::bitflags;
use std::fmt;

/// Handle to a declaration inside a [`DeclarationModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclId(u32);

impl DeclId {
    /// Creates a handle from an arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclKind {
    /// Class.
    Class,
    /// Interface.
    Interface,
    /// Enum type.
    Enum,
    /// Field.
    Field,
    /// Constant of an enum type.
    EnumConstant,
    /// Method.
    Method,
    /// Constructor.
    Constructor,
    /// Method or constructor parameter.
    Parameter,
}

impl DeclKind {
    /// Returns true for classes, interfaces and enums.
    #[must_use]
    pub const fn is_type(&self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::Enum)
    }

    /// Returns true for fields and enum constants.
    #[must_use]
    pub const fn is_field(&self) -> bool {
        matches!(self, Self::Field | Self::EnumConstant)
    }

    /// Returns true for methods and constructors.
    #[must_use]
    pub const fn is_executable(&self) -> bool {
        matches!(self, Self::Method | Self::Constructor)
    }

    /// Parses a kind from its element name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "class" => Some(Self::Class),
            "interface" => Some(Self::Interface),
            "enum" => Some(Self::Enum),
            "field" => Some(Self::Field),
            "enumConstant" => Some(Self::EnumConstant),
            "method" => Some(Self::Method),
            "constructor" => Some(Self::Constructor),
            "param" => Some(Self::Parameter),
            _ => None,
        }
    }
}

bitflags! {
    /// Declaration modifiers.
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// `public`.
        const PUBLIC    = 0b0000_0001;
        /// `protected`.
        const PROTECTED = 0b0000_0010;
        /// `private`.
        const PRIVATE   = 0b0000_0100;
        /// `static`.
        const STATIC    = 0b0000_1000;
        /// `abstract`.
        const ABSTRACT  = 0b0001_0000;
        /// `final`.
        const FINAL     = 0b0010_0000;
    }
}

impl Modifiers {
    /// Parses a single modifier keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Self::PUBLIC),
            "protected" => Some(Self::PROTECTED),
            "private" => Some(Self::PRIVATE),
            "static" => Some(Self::STATIC),
            "abstract" => Some(Self::ABSTRACT),
            "final" => Some(Self::FINAL),
            _ => None,
        }
    }

    /// Parses a whitespace separated modifier list such as `"public static"`.
    #[must_use]
    pub fn parse_list(list: &str) -> Option<Self> {
        list.split_whitespace()
            .try_fold(Self::empty(), |acc, kw| Self::from_keyword(kw).map(|m| acc | m))
    }
}

/// Read-only view over a program's declarations.
///
/// Implementations must not change between calls during one analysis pass.
///
/// # Panics
/// Handles are only meaningful to the model that issued them. Implementations
/// may panic when given a `DeclId` from another model.
pub trait DeclarationModel {
    /// Kind of the declaration.
    fn kind(&self, decl: DeclId) -> DeclKind;

    /// Simple name. Constructors are named `<init>`.
    fn name(&self, decl: DeclId) -> &str;

    /// Qualified name of a class, interface or enum.
    fn qualified_name(&self, decl: DeclId) -> Option<&str>;

    /// Modifiers.
    fn modifiers(&self, decl: DeclId) -> Modifiers;

    /// Applied annotations in source order; repeatable tags appear once per use.
    fn annotations(&self, decl: DeclId) -> &[Annotation];

    /// Enclosing declaration; `None` for top-level types.
    fn enclosing(&self, decl: DeclId) -> Option<DeclId>;

    /// Members of a type in declaration order. Parameters are not members.
    fn enclosed(&self, decl: DeclId) -> &[DeclId];

    /// Declared type: the field or parameter type, the method return type, or
    /// the type a class-like declaration defines.
    fn type_of(&self, decl: DeclId) -> Option<&TypeDescriptor>;

    /// Declared superclass of a type.
    fn superclass(&self, decl: DeclId) -> Option<&TypeDescriptor>;

    /// Directly implemented or extended interfaces.
    fn interfaces(&self, decl: DeclId) -> &[TypeDescriptor];

    /// Parameters of a method or constructor.
    fn parameters(&self, decl: DeclId) -> &[DeclId];

    /// Declared thrown types of a method or constructor.
    fn thrown_types(&self, decl: DeclId) -> &[TypeDescriptor];

    /// Top-level declarations in declaration order.
    fn roots(&self) -> &[DeclId];

    /// Finds a type declaration by qualified name.
    fn lookup(&self, qualified_name: &str) -> Option<DeclId>;

    /// Returns true if `sub` is `sup` or one of its subtypes.
    fn is_subtype(&self, sub: &TypeDescriptor, sup: &TypeDescriptor) -> bool;

    /// Returns true if both descriptors denote the same type.
    fn same_type(&self, a: &TypeDescriptor, b: &TypeDescriptor) -> bool {
        a == b
    }

    /// Returns the type declaration a declared descriptor names.
    fn declaration_of(&self, ty: &TypeDescriptor) -> Option<DeclId> {
        ty.qualified_name().and_then(|name| self.lookup(name))
    }

    /// Returns true if the declaration has every modifier in `modifiers`.
    fn has_modifier(&self, decl: DeclId, modifiers: Modifiers) -> bool {
        self.modifiers(decl).contains(modifiers)
    }

    /// First annotation with the given tag.
    fn annotation(&self, decl: DeclId, tag: &str) -> Option<&Annotation> {
        self.annotations(decl).iter().find(|a| a.tag() == tag)
    }

    /// Every annotation with the given tag, in source order.
    fn annotations_of(&self, decl: DeclId, tag: &str) -> Vec<&Annotation> {
        self.annotations(decl)
            .iter()
            .filter(|a| a.tag() == tag)
            .collect()
    }

    /// Returns true if an annotation with the given tag is present.
    fn has_annotation(&self, decl: DeclId, tag: &str) -> bool {
        self.annotation(decl, tag).is_some()
    }

    /// Every type declaration, depth first in declaration order.
    fn type_declarations(&self) -> Vec<DeclId> {
        let mut out = Vec::new();
        let mut pending: Vec<DeclId> = self.roots().iter().rev().copied().collect();
        while let Some(id) = pending.pop() {
            if self.kind(id).is_type() {
                out.push(id);
            }
            pending.extend(self.enclosed(id).iter().rev().copied());
        }
        out
    }
}
