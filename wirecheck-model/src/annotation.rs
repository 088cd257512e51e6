//! Applied annotations and their typed argument values.

use crate::types::TypeDescriptor;

/// Value of a single annotation argument.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnnotationValue {
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Floating point literal.
    Float(f64),
    /// String literal.
    Str(String),
    /// Enum constant, by simple name.
    Enum(String),
    /// Type literal, e.g. `Foo.class`.
    Type(TypeDescriptor),
    /// Array of values.
    Array(Vec<AnnotationValue>),
    /// Nested annotation.
    Annotation(Annotation),
}

impl AnnotationValue {
    /// Returns the string literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer literal.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean literal.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the enum constant name.
    #[must_use]
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            Self::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the type literal.
    #[must_use]
    pub const fn as_type(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Type(ty) => Some(ty),
            _ => None,
        }
    }

    /// Returns the nested annotation.
    #[must_use]
    pub const fn as_annotation(&self) -> Option<&Annotation> {
        match self {
            Self::Annotation(a) => Some(a),
            _ => None,
        }
    }
}

/// An annotation applied to a declaration.
///
/// Arguments keep their declaration order. Arguments left at their default
/// value may be absent; accessors return `None` for them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    tag: String,
    args: Vec<(String, AnnotationValue)>,
}

impl Annotation {
    /// Name of the implicit single-element argument.
    pub const VALUE: &'static str = "value";

    /// Creates an annotation without arguments.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            args: Vec::new(),
        }
    }

    /// Adds an argument, replacing an earlier one with the same name.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.set_arg(name, value);
        self
    }

    /// Sets an argument, replacing an earlier one with the same name.
    pub fn set_arg(&mut self, name: impl Into<String>, value: AnnotationValue) {
        let name = name.into();
        match self.args.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.args.push((name, value)),
        }
    }

    /// Returns the annotation tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns all arguments in declaration order.
    #[must_use]
    pub fn args(&self) -> &[(String, AnnotationValue)] {
        &self.args
    }

    /// Looks up an argument by name.
    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&AnnotationValue> {
        self.args.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Returns the `value` argument.
    #[must_use]
    pub fn value(&self) -> Option<&AnnotationValue> {
        self.arg(Self::VALUE)
    }

    /// Returns a string argument.
    #[must_use]
    pub fn str_arg(&self, name: &str) -> Option<&str> {
        self.arg(name).and_then(AnnotationValue::as_str)
    }

    /// Returns an integer argument.
    #[must_use]
    pub fn int_arg(&self, name: &str) -> Option<i64> {
        self.arg(name).and_then(AnnotationValue::as_int)
    }

    /// Returns a boolean argument.
    #[must_use]
    pub fn bool_arg(&self, name: &str) -> Option<bool> {
        self.arg(name).and_then(AnnotationValue::as_bool)
    }

    /// Returns an enum constant argument.
    #[must_use]
    pub fn enum_arg(&self, name: &str) -> Option<&str> {
        self.arg(name).and_then(AnnotationValue::as_enum)
    }

    /// Returns a type literal argument directly as a descriptor.
    #[must_use]
    pub fn type_arg(&self, name: &str) -> Option<&TypeDescriptor> {
        self.arg(name).and_then(AnnotationValue::as_type)
    }

    /// Returns every type literal of an argument that is either a single
    /// type literal or an array of them.
    #[must_use]
    pub fn type_args(&self, name: &str) -> Vec<&TypeDescriptor> {
        match self.arg(name) {
            Some(AnnotationValue::Type(ty)) => vec![ty],
            Some(AnnotationValue::Array(items)) => {
                items.iter().filter_map(AnnotationValue::as_type).collect()
            }
            _ => Vec::new(),
        }
    }
}
