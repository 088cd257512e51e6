//! Wire encodings.

use std::fmt;

/// Encoding of a value on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WireType {
    /// Single byte, 0 or 1.
    Boolean,
    /// Signed byte.
    Byte,
    /// Unsigned byte.
    UnsignedByte,
    /// Big-endian signed 16-bit integer.
    Short,
    /// Big-endian unsigned 16-bit integer.
    UnsignedShort,
    /// Big-endian signed 32-bit integer.
    Int,
    /// Variable-length 32-bit integer.
    VarInt,
    /// Big-endian signed 64-bit integer.
    Long,
    /// Variable-length 64-bit integer.
    VarLong,
    /// IEEE 754 single precision.
    Float,
    /// IEEE 754 double precision.
    Double,
    /// Length-prefixed UTF-8 string.
    String,
    /// Namespaced identifier written as a string.
    Identifier,
    /// NBT compound tag.
    NbtCompound,
    /// Two big-endian 64-bit halves.
    Uuid,
    /// Length-prefixed array of longs.
    BitSet,
    /// Nested message.
    Message,
}

impl WireType {
    /// Every wire type, in declaration order.
    pub const ALL: [Self; 17] = [
        Self::Boolean,
        Self::Byte,
        Self::UnsignedByte,
        Self::Short,
        Self::UnsignedShort,
        Self::Int,
        Self::VarInt,
        Self::Long,
        Self::VarLong,
        Self::Float,
        Self::Double,
        Self::String,
        Self::Identifier,
        Self::NbtCompound,
        Self::Uuid,
        Self::BitSet,
        Self::Message,
    ];

    /// Returns the enum-constant name used by the type override directive.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::Byte => "BYTE",
            Self::UnsignedByte => "UNSIGNED_BYTE",
            Self::Short => "SHORT",
            Self::UnsignedShort => "UNSIGNED_SHORT",
            Self::Int => "INT",
            Self::VarInt => "VAR_INT",
            Self::Long => "LONG",
            Self::VarLong => "VAR_LONG",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::String => "STRING",
            Self::Identifier => "IDENTIFIER",
            Self::NbtCompound => "NBT_COMPOUND",
            Self::Uuid => "UUID",
            Self::BitSet => "BITSET",
            Self::Message => "MESSAGE",
        }
    }

    /// Parses an enum-constant name, e.g. `UNSIGNED_BYTE`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
