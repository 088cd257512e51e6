//! Well-known host type names.
//!
//! The resolver recognises a fixed set of library types by qualified name.
//! [`NameTable`] maps those names to a [`KnownType`] role and is handed to
//! the classifier and the oracle at construction time.

use wirecheck_model::{PrimitiveKind, TypeDescriptor};

/// Role of a well-known library type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnownType {
    /// Universal base type every class extends.
    UniversalBase,
    /// String.
    String,
    /// Base of unchecked exceptions.
    RuntimeException,
    /// Base of fatal errors.
    Error,
    /// Bit set.
    BitSet,
    /// Sized generic list.
    List,
    /// Generic optional.
    Optional,
    /// Optional specialised for `int`.
    OptionalInt,
    /// Optional specialised for `long`.
    OptionalLong,
    /// UUID.
    Uuid,
    /// Sink-of-T.
    Consumer,
    /// Conversion from one type to another.
    Function,
    /// Supplier-of-T.
    Supplier,
    /// List specialised for `int`.
    IntList,
    /// List specialised for `long`.
    LongList,
    /// NBT compound tag.
    NbtCompound,
    /// Namespaced identifier.
    Identifier,
    /// Client connection handler.
    NetworkHandler,
    /// Per-connection typed map.
    TypedMap,
    /// Delayed packet sender.
    DelayedPacketSender,
}

const DEFAULT_ENTRIES: &[(&str, KnownType)] = &[
    ("java.lang.Object", KnownType::UniversalBase),
    ("java.lang.String", KnownType::String),
    ("java.lang.RuntimeException", KnownType::RuntimeException),
    ("java.lang.Error", KnownType::Error),
    ("java.util.BitSet", KnownType::BitSet),
    ("java.util.List", KnownType::List),
    ("java.util.Optional", KnownType::Optional),
    ("java.util.OptionalInt", KnownType::OptionalInt),
    ("java.util.OptionalLong", KnownType::OptionalLong),
    ("java.util.UUID", KnownType::Uuid),
    ("java.util.function.Consumer", KnownType::Consumer),
    ("java.util.function.Function", KnownType::Function),
    ("java.util.function.Supplier", KnownType::Supplier),
    ("it.unimi.dsi.fastutil.ints.IntList", KnownType::IntList),
    ("it.unimi.dsi.fastutil.longs.LongList", KnownType::LongList),
    ("net.minecraft.nbt.NbtCompound", KnownType::NbtCompound),
    ("net.minecraft.util.Identifier", KnownType::Identifier),
    (
        "net.minecraft.client.network.ClientPlayNetworkHandler",
        KnownType::NetworkHandler,
    ),
    (
        "net.earthcomputer.multiconnect.protocols.generic.TypedMap",
        KnownType::TypedMap,
    ),
    (
        "net.earthcomputer.multiconnect.impl.DelayedPacketSender",
        KnownType::DelayedPacketSender,
    ),
];

const DEFAULT_BOXES: &[(&str, PrimitiveKind)] = &[
    ("java.lang.Boolean", PrimitiveKind::Boolean),
    ("java.lang.Byte", PrimitiveKind::Byte),
    ("java.lang.Character", PrimitiveKind::Char),
    ("java.lang.Short", PrimitiveKind::Short),
    ("java.lang.Integer", PrimitiveKind::Int),
    ("java.lang.Long", PrimitiveKind::Long),
    ("java.lang.Float", PrimitiveKind::Float),
    ("java.lang.Double", PrimitiveKind::Double),
];

/// Constant mapping from qualified names to well-known roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameTable {
    entries: &'static [(&'static str, KnownType)],
    boxes: &'static [(&'static str, PrimitiveKind)],
}

impl NameTable {
    /// Table for the standard host library.
    pub const DEFAULT: Self = Self::new(DEFAULT_ENTRIES, DEFAULT_BOXES);

    /// Creates a table from role entries and boxed-primitive entries.
    #[must_use]
    pub const fn new(
        entries: &'static [(&'static str, KnownType)],
        boxes: &'static [(&'static str, PrimitiveKind)],
    ) -> Self {
        Self { entries, boxes }
    }

    /// Returns the qualified name registered for a role.
    #[must_use]
    pub fn name(&self, role: KnownType) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, r)| *r == role)
            .map(|(name, _)| *name)
    }

    /// Returns the role of a qualified name.
    #[must_use]
    pub fn role(&self, qualified_name: &str) -> Option<KnownType> {
        self.entries
            .iter()
            .find(|(name, _)| *name == qualified_name)
            .map(|(_, role)| *role)
    }

    /// Returns the role of a declared type.
    #[must_use]
    pub fn role_of(&self, ty: &TypeDescriptor) -> Option<KnownType> {
        ty.qualified_name().and_then(|name| self.role(name))
    }

    /// Returns true if `ty` is the declared type registered for `role`.
    #[must_use]
    pub fn is(&self, ty: &TypeDescriptor, role: KnownType) -> bool {
        self.role_of(ty) == Some(role)
    }

    /// Returns true if `qualified_name` names the universal base type.
    #[must_use]
    pub fn is_universal_base(&self, qualified_name: &str) -> bool {
        self.role(qualified_name) == Some(KnownType::UniversalBase)
    }

    /// Returns the primitive a boxed type wraps, or the primitive itself.
    #[must_use]
    pub fn unboxed(&self, ty: &TypeDescriptor) -> Option<PrimitiveKind> {
        if let Some(kind) = ty.primitive() {
            return Some(kind);
        }
        let name = ty.qualified_name()?;
        self.boxes
            .iter()
            .find(|(boxed, _)| *boxed == name)
            .map(|(_, kind)| *kind)
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}
