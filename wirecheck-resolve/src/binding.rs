//! Wire-type bindings of message fields.
//!
//! A binding pairs a field's host type with the wire encoding generated code
//! uses for it, plus every field directive taken verbatim from its tags.

use crate::resolver::Resolver;
use crate::wire::WireType;
use wirecheck_model::{Annotation, AnnotationValue, DeclId, DeclarationModel, TypeDescriptor, tags};

/// Length prefix handling of a container field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LengthSpec {
    /// Fixed length, no prefix on the wire.
    pub constant: Option<i64>,
    /// Method computing the length.
    pub compute: Option<String>,
    /// Whether the prefix is written raw instead of as a var-int.
    pub raw: Option<bool>,
    /// Whether the field consumes the rest of the message.
    pub remaining_bytes: Option<bool>,
}

/// How a field is default-constructed when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefaultConstructSpec {
    /// Method computing the default.
    pub compute: Option<String>,
    /// Polymorphic subclass to construct.
    pub subclass: Option<TypeDescriptor>,
    /// Boolean literal default.
    pub boolean_value: Option<bool>,
    /// Integer literal default.
    pub int_value: Option<i64>,
    /// String literal default.
    pub string_value: Option<String>,
}

/// Datafixer applied to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DatafixSpec {
    /// Datafixer type name.
    pub datafix_type: Option<String>,
    /// Method run before the datafixer.
    pub preprocess: Option<String>,
}

/// Introduces a field that is absent in a neighbouring protocol version.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntroduceSpec {
    /// Translation direction the directive applies to.
    pub direction: Option<String>,
    /// Method computing the introduced value.
    pub compute: Option<String>,
    /// Whether the value is default-constructed.
    pub default_construct: Option<bool>,
    /// Literal value.
    pub literal: Option<AnnotationValue>,
}

/// Custom translation fix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomFixSpec {
    /// Fix method name.
    pub value: Option<String>,
    /// Whether the fix also applies to nested values.
    pub recursive: Option<bool>,
}

/// Wire encoding and directives of one field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WireTypeBinding {
    /// Declared host type.
    pub real_type: TypeDescriptor,
    /// Wire encoding of the deep component type.
    pub wire_type: WireType,
    /// Registry the value is an id of.
    pub registry: Option<String>,
    /// Length prefix handling.
    pub length: Option<LengthSpec>,
    /// Default construction.
    pub default_construct: Option<DefaultConstructSpec>,
    /// Inclusion predicate method.
    pub only_if: Option<String>,
    /// Datafixer.
    pub datafix: Option<DatafixSpec>,
    /// Field holding the polymorphic discriminator.
    pub polymorphic_by: Option<String>,
    /// Introduce directives in source order.
    pub introduce: Vec<IntroduceSpec>,
    /// Custom fixes in source order.
    pub custom_fix: Vec<CustomFixSpec>,
}

const LITERAL_ARGS: [&str; 4] = ["booleanValue", "intValue", "doubleValue", "stringValue"];

impl Resolver<'_> {
    /// Builds the wire-type binding of a field.
    ///
    /// The wire type comes from the field's `Type` override, or is inferred
    /// from the deep component type by the oracle. Returns `None` when
    /// neither yields a wire type. Overrides naming an unknown encoding are
    /// ignored.
    #[must_use]
    pub fn wire_type_binding(&self, field: DeclId) -> Option<WireTypeBinding> {
        let model = self.model;
        let real_type = model.type_of(field)?;
        let deep_component = self.classifier.deep_component_type(real_type);

        let overridden = model.annotation(field, tags::TYPE).and_then(|directive| {
            let name = directive
                .enum_arg(Annotation::VALUE)
                .or_else(|| directive.str_arg(Annotation::VALUE))?;
            let wire_type = WireType::from_name(name);
            if wire_type.is_none() {
                tracing::debug!(
                    "Ignoring unknown wire type {} on field {}",
                    name,
                    model.name(field)
                );
            }
            wire_type
        });
        let wire_type =
            overridden.or_else(|| self.oracle.default_wire_type(model, &deep_component))?;

        Some(WireTypeBinding {
            real_type: real_type.clone(),
            wire_type,
            registry: model.annotation(field, tags::REGISTRY).and_then(value_name),
            length: model.annotation(field, tags::LENGTH).map(length_spec),
            default_construct: model
                .annotation(field, tags::DEFAULT_CONSTRUCT)
                .map(default_construct_spec),
            only_if: model
                .annotation(field, tags::ONLY_IF)
                .and_then(|directive| owned(directive.str_arg(Annotation::VALUE))),
            datafix: model.annotation(field, tags::DATAFIX).map(datafix_spec),
            polymorphic_by: model
                .annotation(field, tags::POLYMORPHIC_BY)
                .and_then(|directive| owned(directive.str_arg("field"))),
            introduce: model
                .annotations_of(field, tags::INTRODUCE)
                .into_iter()
                .map(introduce_spec)
                .collect(),
            custom_fix: model
                .annotations_of(field, tags::CUSTOM_FIX)
                .into_iter()
                .map(custom_fix_spec)
                .collect(),
        })
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

/// Registry and datafixer names may be given as an enum constant or a string.
fn value_name(directive: &Annotation) -> Option<String> {
    owned(
        directive
            .enum_arg(Annotation::VALUE)
            .or_else(|| directive.str_arg(Annotation::VALUE)),
    )
}

fn length_spec(directive: &Annotation) -> LengthSpec {
    LengthSpec {
        constant: directive.int_arg("constant"),
        compute: owned(directive.str_arg("compute")),
        raw: directive.bool_arg("raw"),
        remaining_bytes: directive.bool_arg("remainingBytes"),
    }
}

fn default_construct_spec(directive: &Annotation) -> DefaultConstructSpec {
    DefaultConstructSpec {
        compute: owned(directive.str_arg("compute")),
        subclass: directive.type_arg("subclass").cloned(),
        boolean_value: directive.bool_arg("booleanValue"),
        int_value: directive.int_arg("intValue"),
        string_value: owned(directive.str_arg("stringValue")),
    }
}

fn datafix_spec(directive: &Annotation) -> DatafixSpec {
    DatafixSpec {
        datafix_type: value_name(directive),
        preprocess: owned(directive.str_arg("preprocess")),
    }
}

fn introduce_spec(directive: &Annotation) -> IntroduceSpec {
    IntroduceSpec {
        direction: owned(directive.enum_arg("direction")),
        compute: owned(directive.str_arg("compute")),
        default_construct: directive.bool_arg("defaultConstruct"),
        literal: LITERAL_ARGS
            .iter()
            .find_map(|&name| directive.arg(name))
            .cloned(),
    }
}

fn custom_fix_spec(directive: &Annotation) -> CustomFixSpec {
    CustomFixSpec {
        value: owned(directive.str_arg(Annotation::VALUE)),
        recursive: directive.bool_arg("recursive"),
    }
}
