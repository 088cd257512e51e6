//! In-memory declaration snapshot.
//!
//! [`Snapshot`] is an arena of [`Declaration`]s implementing
//! [`DeclarationModel`]. It is built once (by hand or from an XML document,
//! see [`crate::parser`]) and then only queried.

use crate::annotation::Annotation;
use crate::decl::{DeclId, DeclKind, DeclarationModel, Modifiers};
use crate::types::TypeDescriptor;
use std::collections::{HashMap, HashSet};

/// Qualified name of the host's universal base type.
pub const UNIVERSAL_BASE: &str = "java.lang.Object";

/// Host library types seeded by [`Snapshot::with_prelude`]: (name, kind, superclass).
const PRELUDE: &[(&str, DeclKind, Option<&str>)] = &[
    ("java.lang.Throwable", DeclKind::Class, None),
    ("java.lang.Exception", DeclKind::Class, Some("java.lang.Throwable")),
    ("java.lang.RuntimeException", DeclKind::Class, Some("java.lang.Exception")),
    ("java.lang.Error", DeclKind::Class, Some("java.lang.Throwable")),
    ("java.lang.IllegalStateException", DeclKind::Class, Some("java.lang.RuntimeException")),
    ("java.io.IOException", DeclKind::Class, Some("java.lang.Exception")),
    ("java.lang.String", DeclKind::Class, None),
    ("java.util.List", DeclKind::Interface, None),
    ("java.util.Optional", DeclKind::Class, None),
    ("java.util.function.Supplier", DeclKind::Interface, None),
    ("java.util.function.Consumer", DeclKind::Interface, None),
    ("java.util.function.Function", DeclKind::Interface, None),
];

/// A single declaration stored in a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct Declaration {
    /// Declaration kind.
    pub kind: DeclKind,
    /// Simple name.
    pub name: String,
    /// Qualified name (types only, assigned on insertion).
    pub qualified_name: Option<String>,
    /// Modifiers.
    pub modifiers: Modifiers,
    /// Applied annotations.
    pub annotations: Vec<Annotation>,
    /// Enclosing declaration (assigned on insertion).
    pub enclosing: Option<DeclId>,
    /// Members (assigned on insertion of the members).
    pub enclosed: Vec<DeclId>,
    /// Declared type.
    pub ty: Option<TypeDescriptor>,
    /// Superclass of a type.
    pub superclass: Option<TypeDescriptor>,
    /// Implemented interfaces.
    pub interfaces: Vec<TypeDescriptor>,
    /// Parameters of an executable (assigned on insertion of the parameters).
    pub parameters: Vec<DeclId>,
    /// Thrown types of an executable.
    pub thrown: Vec<TypeDescriptor>,
}

impl Declaration {
    /// Creates a declaration with no modifiers, annotations or type.
    #[must_use]
    pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            qualified_name: None,
            modifiers: Modifiers::empty(),
            annotations: Vec::new(),
            enclosing: None,
            enclosed: Vec::new(),
            ty: None,
            superclass: None,
            interfaces: Vec::new(),
            parameters: Vec::new(),
            thrown: Vec::new(),
        }
    }

    /// Creates a class. Top-level classes take their qualified name here.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(DeclKind::Class, name)
    }

    /// Creates an interface.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(DeclKind::Interface, name)
    }

    /// Creates an enum type.
    #[must_use]
    pub fn enum_type(name: impl Into<String>) -> Self {
        Self::new(DeclKind::Enum, name)
    }

    /// Creates a field.
    #[must_use]
    pub fn field(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        let mut decl = Self::new(DeclKind::Field, name);
        decl.ty = Some(ty);
        decl
    }

    /// Creates an enum constant.
    #[must_use]
    pub fn enum_constant(name: impl Into<String>) -> Self {
        let mut decl = Self::new(DeclKind::EnumConstant, name);
        decl.modifiers = Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL;
        decl
    }

    /// Creates a method with the given return type.
    #[must_use]
    pub fn method(name: impl Into<String>, returns: TypeDescriptor) -> Self {
        let mut decl = Self::new(DeclKind::Method, name);
        decl.ty = Some(returns);
        decl
    }

    /// Creates a constructor.
    #[must_use]
    pub fn constructor() -> Self {
        Self::new(DeclKind::Constructor, "<init>")
    }

    /// Creates a parameter.
    #[must_use]
    pub fn parameter(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        let mut decl = Self::new(DeclKind::Parameter, name);
        decl.ty = Some(ty);
        decl
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the declared type.
    #[must_use]
    pub fn with_type(mut self, ty: TypeDescriptor) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Adds an annotation.
    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Sets the superclass.
    #[must_use]
    pub fn extends(mut self, superclass: TypeDescriptor) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn implements(mut self, interface: TypeDescriptor) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Adds a thrown type.
    #[must_use]
    pub fn throws(mut self, thrown: TypeDescriptor) -> Self {
        self.thrown.push(thrown);
        self
    }
}

/// Immutable-after-build arena of declarations.
///
/// # Panics
/// The [`DeclarationModel`] queries index the arena directly and panic on a
/// `DeclId` this snapshot did not issue. Use [`Snapshot::get`] for handles of
/// unknown origin.
#[derive(Debug, Clone)]
pub struct Snapshot {
    decls: Vec<Declaration>,
    roots: Vec<DeclId>,
    universal_base: String,
    /// Type lookup map (built during insertion).
    type_map: HashMap<String, DeclId>,
}

impl Snapshot {
    /// Creates an empty snapshot whose universal base is [`UNIVERSAL_BASE`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_universal_base(UNIVERSAL_BASE)
    }

    /// Creates an empty snapshot with a custom universal base type name.
    #[must_use]
    pub fn with_universal_base(name: impl Into<String>) -> Self {
        Self {
            decls: Vec::new(),
            roots: Vec::new(),
            universal_base: name.into(),
            type_map: HashMap::new(),
        }
    }

    /// Creates a snapshot seeded with the universal base, the throwable
    /// hierarchy and the library types schemas commonly reference.
    #[must_use]
    pub fn with_prelude() -> Self {
        let mut snapshot = Self::new();
        snapshot.insert(
            Declaration::class(UNIVERSAL_BASE).modifiers(Modifiers::PUBLIC),
            None,
        );
        for &(name, kind, superclass) in PRELUDE {
            let mut decl = Declaration::new(kind, name).modifiers(Modifiers::PUBLIC);
            decl.superclass = superclass.map(TypeDescriptor::declared);
            snapshot.insert(decl, None);
        }
        snapshot
    }

    /// Inserts a declaration under `enclosing` and returns its handle.
    ///
    /// Types get their qualified name (outer name + `.` + simple name when
    /// nested) and their defining type. Classes without a superclass extend
    /// the universal base. Parameters are attached to their executable's
    /// parameter list instead of its members.
    pub fn insert(&mut self, mut decl: Declaration, enclosing: Option<DeclId>) -> DeclId {
        let id = DeclId::new(self.decls.len() as u32);

        if decl.kind.is_type() {
            let outer = enclosing.and_then(|e| self.decls[e.index()].qualified_name.clone());
            let qualified = match outer {
                Some(outer) => format!("{outer}.{}", decl.name),
                None => {
                    let qualified = decl.name.clone();
                    if let Some((_, simple)) = qualified.rsplit_once('.') {
                        decl.name = simple.to_string();
                    }
                    qualified
                }
            };
            decl.ty = Some(TypeDescriptor::declared(qualified.clone()));
            if decl.kind == DeclKind::Class
                && decl.superclass.is_none()
                && qualified != self.universal_base
            {
                decl.superclass = Some(TypeDescriptor::declared(self.universal_base.clone()));
            }
            self.type_map.insert(qualified.clone(), id);
            decl.qualified_name = Some(qualified);
        }

        decl.enclosing = enclosing;
        let kind = decl.kind;
        self.decls.push(decl);

        match enclosing {
            Some(parent) if kind == DeclKind::Parameter => {
                self.decls[parent.index()].parameters.push(id);
            }
            Some(parent) => self.decls[parent.index()].enclosed.push(id),
            None => self.roots.push(id),
        }

        id
    }

    /// Returns the declaration behind a handle.
    #[must_use]
    pub fn get(&self, id: DeclId) -> Option<&Declaration> {
        self.decls.get(id.index())
    }

    /// Returns the declaration behind a handle for in-place completion while
    /// the snapshot is being built.
    pub fn get_mut(&mut self, id: DeclId) -> Option<&mut Declaration> {
        self.decls.get_mut(id.index())
    }

    /// Qualified name of the universal base type.
    #[must_use]
    pub fn universal_base(&self) -> &str {
        &self.universal_base
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Returns true if the snapshot holds no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationModel for Snapshot {
    fn kind(&self, decl: DeclId) -> DeclKind {
        self.decls[decl.index()].kind
    }

    fn name(&self, decl: DeclId) -> &str {
        &self.decls[decl.index()].name
    }

    fn qualified_name(&self, decl: DeclId) -> Option<&str> {
        self.decls[decl.index()].qualified_name.as_deref()
    }

    fn modifiers(&self, decl: DeclId) -> Modifiers {
        self.decls[decl.index()].modifiers
    }

    fn annotations(&self, decl: DeclId) -> &[Annotation] {
        &self.decls[decl.index()].annotations
    }

    fn enclosing(&self, decl: DeclId) -> Option<DeclId> {
        self.decls[decl.index()].enclosing
    }

    fn enclosed(&self, decl: DeclId) -> &[DeclId] {
        &self.decls[decl.index()].enclosed
    }

    fn type_of(&self, decl: DeclId) -> Option<&TypeDescriptor> {
        self.decls[decl.index()].ty.as_ref()
    }

    fn superclass(&self, decl: DeclId) -> Option<&TypeDescriptor> {
        self.decls[decl.index()].superclass.as_ref()
    }

    fn interfaces(&self, decl: DeclId) -> &[TypeDescriptor] {
        &self.decls[decl.index()].interfaces
    }

    fn parameters(&self, decl: DeclId) -> &[DeclId] {
        &self.decls[decl.index()].parameters
    }

    fn thrown_types(&self, decl: DeclId) -> &[TypeDescriptor] {
        &self.decls[decl.index()].thrown
    }

    fn roots(&self) -> &[DeclId] {
        &self.roots
    }

    fn lookup(&self, qualified_name: &str) -> Option<DeclId> {
        self.type_map.get(qualified_name).copied()
    }

    fn is_subtype(&self, sub: &TypeDescriptor, sup: &TypeDescriptor) -> bool {
        if sub == sup {
            return true;
        }
        match (sub, sup) {
            (TypeDescriptor::Array(sub_element), TypeDescriptor::Array(sup_element)) => {
                sub_element.primitive().is_none() && self.is_subtype(sub_element, sup_element)
            }
            (TypeDescriptor::Array(_), TypeDescriptor::Declared { name, .. }) => {
                *name == self.universal_base
            }
            (
                TypeDescriptor::Declared { .. },
                TypeDescriptor::Declared {
                    name: sup_name,
                    args: sup_args,
                },
            ) => {
                if *sup_name == self.universal_base {
                    return true;
                }
                let mut seen = HashSet::new();
                let mut pending = vec![sub];
                while let Some(current) = pending.pop() {
                    if current.has_qualified_name(sup_name)
                        && (sup_args.is_empty() || current.type_arguments() == sup_args.as_slice())
                    {
                        return true;
                    }
                    let Some(name) = current.qualified_name() else {
                        continue;
                    };
                    if !seen.insert(name) {
                        continue;
                    }
                    if let Some(id) = self.lookup(name) {
                        let decl = &self.decls[id.index()];
                        pending.extend(decl.superclass.iter());
                        pending.extend(decl.interfaces.iter());
                    }
                }
                false
            }
            _ => false,
        }
    }
}
