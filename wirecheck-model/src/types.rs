//! Type descriptors.
//!
//! A [`TypeDescriptor`] is the immutable description of a host type as it is
//! written in a declaration: a primitive, an array, a declared (possibly
//! generic) type, or `void`. Descriptors compare structurally by qualified
//! name plus type arguments.

use crate::error::ParseError;
use std::fmt;
use std::str::FromStr;

/// Host primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveKind {
    /// `boolean`.
    Boolean,
    /// Signed 8-bit integer.
    Byte,
    /// UTF-16 code unit.
    Char,
    /// Signed 16-bit integer.
    Short,
    /// Signed 32-bit integer.
    Int,
    /// Signed 64-bit integer.
    Long,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
}

impl PrimitiveKind {
    /// Returns the keyword used to write this primitive.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Parses a primitive from its keyword.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(Self::Boolean),
            "byte" => Some(Self::Byte),
            "char" => Some(Self::Char),
            "short" => Some(Self::Short),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            _ => None,
        }
    }

    /// Returns true for the integral kinds. `boolean` counts as integral.
    #[must_use]
    pub const fn is_integral(&self) -> bool {
        matches!(
            self,
            Self::Boolean | Self::Byte | Self::Char | Self::Short | Self::Int | Self::Long
        )
    }

    /// Returns true for `float` and `double`.
    #[must_use]
    pub const fn is_floating_point(&self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }
}

/// Description of a host type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeDescriptor {
    /// The `void` return type.
    Void,
    /// A primitive type.
    Primitive(PrimitiveKind),
    /// An array with the given element type.
    Array(Box<TypeDescriptor>),
    /// A declared class, interface or enum type, with its type arguments.
    Declared {
        /// Fully qualified name.
        name: String,
        /// Type arguments, empty for raw or non-generic types.
        args: Vec<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    /// Creates a declared type without type arguments.
    #[must_use]
    pub fn declared(name: impl Into<String>) -> Self {
        Self::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Creates a declared type with type arguments.
    #[must_use]
    pub fn generic(name: impl Into<String>, args: Vec<TypeDescriptor>) -> Self {
        Self::Declared {
            name: name.into(),
            args,
        }
    }

    /// Creates an array of `element`.
    #[must_use]
    pub fn array(element: TypeDescriptor) -> Self {
        Self::Array(Box::new(element))
    }

    /// Parses a type expression such as `java.util.List<java.lang.Integer>` or `int[][]`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidType` if the expression is malformed.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut syntax = TypeSyntax { input, rest: input };
        let ty = syntax.parse_type(0)?;
        syntax.skip_whitespace();
        if !syntax.rest.is_empty() {
            return Err(syntax.error("unexpected trailing input"));
        }
        Ok(ty)
    }

    /// Returns the qualified name of a declared type.
    #[must_use]
    pub fn qualified_name(&self) -> Option<&str> {
        match self {
            Self::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns true if this is a declared type with the given qualified name.
    #[must_use]
    pub fn has_qualified_name(&self, name: &str) -> bool {
        self.qualified_name() == Some(name)
    }

    /// Returns the type arguments; empty for anything but generic declared types.
    #[must_use]
    pub fn type_arguments(&self) -> &[TypeDescriptor] {
        match self {
            Self::Declared { args, .. } => args,
            _ => &[],
        }
    }

    /// Returns the element type of an array.
    #[must_use]
    pub fn element(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the primitive kind, if this is a primitive.
    #[must_use]
    pub const fn primitive(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns true for declared types.
    #[must_use]
    pub const fn is_declared(&self) -> bool {
        matches!(self, Self::Declared { .. })
    }

    /// Returns true for arrays.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Number of descriptor nodes in this type.
    #[must_use]
    pub fn structural_size(&self) -> usize {
        match self {
            Self::Void | Self::Primitive(_) => 1,
            Self::Array(element) => 1 + element.structural_size(),
            Self::Declared { args, .. } => {
                1 + args.iter().map(TypeDescriptor::structural_size).sum::<usize>()
            }
        }
    }
}

impl From<PrimitiveKind> for TypeDescriptor {
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

impl FromStr for TypeDescriptor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Primitive(kind) => f.write_str(kind.name()),
            Self::Array(element) => write!(f, "{element}[]"),
            Self::Declared { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}

/// Deepest type-argument nesting accepted by the parser.
const MAX_TYPE_NESTING: usize = 64;
/// Most array dimensions accepted by the parser.
const MAX_ARRAY_DIMENSIONS: usize = 255;

/// Recursive-descent reader for type expressions.
struct TypeSyntax<'a> {
    input: &'a str,
    rest: &'a str,
}

impl<'a> TypeSyntax<'a> {
    fn parse_type(&mut self, depth: usize) -> Result<TypeDescriptor, ParseError> {
        if depth > MAX_TYPE_NESTING {
            return Err(self.error("nesting too deep"));
        }
        self.skip_whitespace();
        let name = self.identifier()?;

        let mut ty = if name == "void" {
            TypeDescriptor::Void
        } else if let Some(kind) = PrimitiveKind::from_name(name) {
            TypeDescriptor::Primitive(kind)
        } else {
            let mut args = Vec::new();
            self.skip_whitespace();
            if self.eat('<') {
                loop {
                    args.push(self.parse_type(depth + 1)?);
                    self.skip_whitespace();
                    if self.eat(',') {
                        continue;
                    }
                    if self.eat('>') {
                        break;
                    }
                    return Err(self.error("expected ',' or '>' in type arguments"));
                }
            }
            TypeDescriptor::generic(name, args)
        };

        let mut dimensions = 0;
        loop {
            self.skip_whitespace();
            if !self.eat('[') {
                break;
            }
            dimensions += 1;
            if dimensions > MAX_ARRAY_DIMENSIONS {
                return Err(self.error("too many array dimensions"));
            }
            self.skip_whitespace();
            if !self.eat(']') {
                return Err(self.error("expected ']'"));
            }
            if ty == TypeDescriptor::Void {
                return Err(self.error("void cannot be an array element"));
            }
            ty = TypeDescriptor::array(ty);
        }

        Ok(ty)
    }

    fn identifier(&mut self) -> Result<&'a str, ParseError> {
        let end = self
            .rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$' || c == '.'))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err(self.error("expected a type name"));
        }
        let (ident, rest) = self.rest.split_at(end);
        if ident.split('.').any(str::is_empty) {
            return Err(self.error("empty segment in qualified name"));
        }
        self.rest = rest;
        Ok(ident)
    }

    fn eat(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn error(&self, reason: &str) -> ParseError {
        let offset = self.input.len() - self.rest.len();
        ParseError::invalid_type(self.input, format!("{reason} at offset {offset}"))
    }
}
