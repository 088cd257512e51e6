//! XML declaration document loader.
//!
//! A declaration document describes the declarations a host compiler would
//! expose, so that schemas can be analysed outside the host:
//!
//! ```xml
//! <declarations>
//!   <package name="com.example">
//!     <class name="Move" modifiers="public">
//!       <annotation tag="MessageVariant"/>
//!       <field name="y" type="java.lang.String" modifiers="public"/>
//!       <method name="foo" returns="void" modifiers="public static">
//!         <param name="x" type="int"/>
//!         <param name="y" type="java.lang.String">
//!           <annotation tag="Argument"><arg name="value" string="y"/></annotation>
//!         </param>
//!       </method>
//!     </class>
//!   </package>
//! </declarations>
//! ```
//!
//! Argument values are given by one of the attributes `string`, `int`,
//! `bool`, `float`, `enum` or `type`; arrays use `<item>` children and nested
//! annotations an `<annotation>` child. Generic types are written with escaped
//! angle brackets (`java.util.List&lt;java.lang.Integer&gt;`).

use crate::annotation::{Annotation, AnnotationValue};
use crate::decl::{DeclId, DeclKind, DeclarationModel, Modifiers};
use crate::error::ParseError;
use crate::snapshot::{Declaration, Snapshot};
use crate::types::TypeDescriptor;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// Deepest element nesting accepted for types and annotations.
const MAX_NESTING: usize = 64;

/// Parses a declaration document into a snapshot seeded with
/// [`Snapshot::with_prelude`].
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid declarations.
pub fn parse_snapshot(xml: &str) -> Result<Snapshot, ParseError> {
    parse_snapshot_into(xml, Snapshot::with_prelude())
}

/// Reads and parses a declaration document from disk.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or the document is invalid.
pub fn parse_snapshot_file(path: impl AsRef<Path>) -> Result<Snapshot, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_snapshot(&xml)
}

/// Parses a declaration document, adding its declarations to `snapshot`.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid declarations.
pub fn parse_snapshot_into(xml: &str, mut snapshot: Snapshot) -> Result<Snapshot, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut found_root = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if found_root {
                    parse_top_level(&mut reader, e, true, &mut snapshot)?;
                } else if e.name().as_ref() == b"declarations" {
                    found_root = true;
                } else {
                    return Err(unknown(e, "document"));
                }
            }
            Ok(Event::Empty(ref e)) => {
                if found_root {
                    parse_top_level(&mut reader, e, false, &mut snapshot)?;
                } else if e.name().as_ref() == b"declarations" {
                    found_root = true;
                } else {
                    return Err(unknown(e, "document"));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if !found_root {
        return Err(ParseError::InvalidStructure {
            message: "No declarations element found".to_string(),
        });
    }

    Ok(snapshot)
}

/// Parses a package or a top-level type directly under `<declarations>`.
fn parse_top_level(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
    snapshot: &mut Snapshot,
) -> Result<(), ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let name = std::str::from_utf8(&name_bytes)?;
    match name {
        "package" => parse_package(reader, e, has_body, snapshot),
        "class" | "interface" | "enum" => {
            parse_type(reader, e, has_body, snapshot, None, None, 0)?;
            Ok(())
        }
        _ => Err(ParseError::unknown_element(name, "declarations")),
    }
}

/// Parses a package element and the types inside it.
fn parse_package(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
    snapshot: &mut Snapshot,
) -> Result<(), ParseError> {
    let mut package = None;
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "name" {
            package = Some(unescaped(&attr.value)?);
        }
    }
    let package = package.ok_or_else(|| ParseError::missing_attr("package", "name"))?;

    if !has_body {
        return Ok(());
    }

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                parse_package_member(reader, e, true, snapshot, &package)?;
            }
            Ok(Event::Empty(ref e)) => {
                parse_package_member(reader, e, false, snapshot, &package)?;
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof("package")),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_package_member(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
    snapshot: &mut Snapshot,
    package: &str,
) -> Result<(), ParseError> {
    match e.name().as_ref() {
        b"class" | b"interface" | b"enum" => {
            parse_type(reader, e, has_body, snapshot, None, Some(package), 0)?;
            Ok(())
        }
        _ => Err(unknown(e, "package")),
    }
}

/// Parses a class, interface or enum element and everything it encloses.
fn parse_type(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
    snapshot: &mut Snapshot,
    enclosing: Option<DeclId>,
    package: Option<&str>,
    depth: usize,
) -> Result<DeclId, ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let element = std::str::from_utf8(&name_bytes)?;
    let kind =
        DeclKind::from_name(element).ok_or_else(|| ParseError::unknown_element(element, "type"))?;

    let mut name = None;
    let mut modifiers = Modifiers::empty();
    let mut superclass = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = unescaped(&attr.value)?;

        match key {
            "name" => name = Some(value),
            "modifiers" => {
                modifiers = Modifiers::parse_list(&value)
                    .ok_or_else(|| ParseError::invalid_attr(element, "modifiers", &value))?
            }
            "extends" => superclass = Some(TypeDescriptor::parse(&value)?),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr(element, "name"))?;
    let name = match (enclosing, package) {
        (None, Some(package)) => format!("{package}.{name}"),
        _ => name,
    };

    let mut decl = Declaration::new(kind, name).modifiers(modifiers);
    decl.superclass = superclass;
    let id = snapshot.insert(decl, enclosing);

    if has_body {
        parse_members(reader, snapshot, id, element, depth)?;
    }

    Ok(id)
}

/// Parses the children of a type or executable until its end tag.
fn parse_members(
    reader: &mut Reader<&[u8]>,
    snapshot: &mut Snapshot,
    owner: DeclId,
    context: &str,
    depth: usize,
) -> Result<(), ParseError> {
    let depth = nested(depth, context)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => parse_member(reader, e, true, snapshot, owner, depth)?,
            Ok(Event::Empty(ref e)) => parse_member(reader, e, false, snapshot, owner, depth)?,
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof(context)),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses a single child element of a declaration.
fn parse_member(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
    snapshot: &mut Snapshot,
    owner: DeclId,
    depth: usize,
) -> Result<(), ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let element = std::str::from_utf8(&name_bytes)?;
    let owner_kind = snapshot.kind(owner);

    match element {
        "annotation" => {
            let annotation = parse_annotation(reader, e, has_body, depth)?;
            declaration_mut(snapshot, owner)?.annotations.push(annotation);
        }
        "implements" if owner_kind.is_type() => {
            let ty = required_type(e, element, "type")?;
            declaration_mut(snapshot, owner)?.interfaces.push(ty);
            skip_body(reader, has_body, element)?;
        }
        "throws" if owner_kind.is_executable() => {
            let ty = required_type(e, element, "type")?;
            declaration_mut(snapshot, owner)?.thrown.push(ty);
            skip_body(reader, has_body, element)?;
        }
        "class" | "interface" | "enum" if owner_kind.is_type() => {
            parse_type(reader, e, has_body, snapshot, Some(owner), None, depth)?;
        }
        "field" | "enumConstant" | "method" | "constructor" if owner_kind.is_type() => {
            parse_member_declaration(reader, e, has_body, snapshot, owner, element, depth)?;
        }
        "param" if owner_kind.is_executable() => {
            parse_member_declaration(reader, e, has_body, snapshot, owner, element, depth)?;
        }
        _ => {
            let context = snapshot.name(owner).to_string();
            return Err(ParseError::unknown_element(element, context));
        }
    }

    Ok(())
}

/// Parses a field, enum constant, method, constructor or parameter.
fn parse_member_declaration(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
    snapshot: &mut Snapshot,
    owner: DeclId,
    element: &str,
    depth: usize,
) -> Result<(), ParseError> {
    let kind =
        DeclKind::from_name(element).ok_or_else(|| ParseError::unknown_element(element, "member"))?;

    let mut name = None;
    let mut modifiers = None;
    let mut ty = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = unescaped(&attr.value)?;

        match key {
            "name" => name = Some(value),
            "modifiers" => {
                modifiers = Some(
                    Modifiers::parse_list(&value)
                        .ok_or_else(|| ParseError::invalid_attr(element, "modifiers", &value))?,
                )
            }
            "type" | "returns" => ty = Some(TypeDescriptor::parse(&value)?),
            _ => {}
        }
    }

    let mut decl = match kind {
        DeclKind::Constructor => Declaration::constructor(),
        DeclKind::EnumConstant => {
            let name = name.ok_or_else(|| ParseError::missing_attr(element, "name"))?;
            let mut decl = Declaration::enum_constant(name);
            decl.ty = snapshot.type_of(owner).cloned();
            decl
        }
        DeclKind::Method => {
            let name = name.ok_or_else(|| ParseError::missing_attr(element, "name"))?;
            Declaration::method(name, ty.unwrap_or(TypeDescriptor::Void))
        }
        _ => {
            let name = name.ok_or_else(|| ParseError::missing_attr(element, "name"))?;
            let ty = ty.ok_or_else(|| ParseError::missing_attr(element, "type"))?;
            Declaration::new(kind, name).with_type(ty)
        }
    };
    if let Some(modifiers) = modifiers {
        decl.modifiers = modifiers;
    }

    let id = snapshot.insert(decl, Some(owner));
    if has_body {
        parse_members(reader, snapshot, id, element, depth)?;
    }

    Ok(())
}

/// Parses an annotation element and its arguments.
fn parse_annotation(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
    depth: usize,
) -> Result<Annotation, ParseError> {
    let mut tag = None;
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "tag" {
            tag = Some(unescaped(&attr.value)?);
        }
    }
    let mut annotation = Annotation::new(tag.ok_or_else(|| ParseError::missing_attr("annotation", "tag"))?);

    if !has_body {
        return Ok(annotation);
    }
    let depth = nested(depth, "annotation")?;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"arg" => {
                let (name, value) = parse_arg(reader, e, true, depth)?;
                annotation.set_arg(name, value);
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"arg" => {
                let (name, value) = parse_arg(reader, e, false, depth)?;
                annotation.set_arg(name, value);
            }
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                return Err(unknown(e, "annotation"));
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof("annotation")),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(annotation)
}

/// Parses an annotation argument; the name defaults to `value`.
fn parse_arg(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
    depth: usize,
) -> Result<(String, AnnotationValue), ParseError> {
    let mut name = Annotation::VALUE.to_string();
    let mut value = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let raw = unescaped(&attr.value)?;
        if key == "name" {
            name = raw;
        } else if let Some(scalar) = scalar_value("arg", key, &raw)? {
            value = Some(scalar);
        }
    }

    if has_body {
        let children = parse_values(reader, depth)?;
        if value.is_none() {
            value = Some(children);
        }
    }

    let value = value.ok_or_else(|| ParseError::missing_attr("arg", "string|int|bool|float|enum|type"))?;
    Ok((name, value))
}

/// Parses the children of an `<arg>`: `<item>` scalars and nested annotations.
///
/// A single nested annotation becomes an annotation value, anything else an array.
fn parse_values(reader: &mut Reader<&[u8]>, depth: usize) -> Result<AnnotationValue, ParseError> {
    let mut items = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"annotation" => items.push(AnnotationValue::Annotation(parse_annotation(
                    reader, e, true, depth,
                )?)),
                b"item" => {
                    items.push(parse_item(e)?);
                    skip_body(reader, true, "item")?;
                }
                _ => return Err(unknown(e, "arg")),
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"annotation" => items.push(AnnotationValue::Annotation(parse_annotation(
                    reader, e, false, depth,
                )?)),
                b"item" => items.push(parse_item(e)?),
                _ => return Err(unknown(e, "arg")),
            },
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof("arg")),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if items.len() == 1 && matches!(items[0], AnnotationValue::Annotation(_)) {
        return Ok(items.remove(0));
    }
    Ok(AnnotationValue::Array(items))
}

/// Parses the scalar carried by an `<item>` element.
fn parse_item(e: &BytesStart<'_>) -> Result<AnnotationValue, ParseError> {
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let raw = unescaped(&attr.value)?;
        if let Some(scalar) = scalar_value("item", key, &raw)? {
            return Ok(scalar);
        }
    }
    Err(ParseError::missing_attr("item", "string|int|bool|float|enum|type"))
}

/// Converts a value attribute into an annotation value; `None` for other attributes.
fn scalar_value(
    element: &str,
    key: &str,
    value: &str,
) -> Result<Option<AnnotationValue>, ParseError> {
    let scalar = match key {
        "string" => AnnotationValue::Str(value.to_string()),
        "enum" => AnnotationValue::Enum(value.to_string()),
        "type" => AnnotationValue::Type(TypeDescriptor::parse(value)?),
        "int" => AnnotationValue::Int(
            value
                .parse()
                .map_err(|_| ParseError::invalid_attr(element, key, value))?,
        ),
        "float" => AnnotationValue::Float(
            value
                .parse()
                .map_err(|_| ParseError::invalid_attr(element, key, value))?,
        ),
        "bool" => AnnotationValue::Bool(
            value
                .parse()
                .map_err(|_| ParseError::invalid_attr(element, key, value))?,
        ),
        _ => return Ok(None),
    };
    Ok(Some(scalar))
}

/// Reads a required type-valued attribute.
fn required_type(
    e: &BytesStart<'_>,
    element: &str,
    attribute: &str,
) -> Result<TypeDescriptor, ParseError> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == attribute.as_bytes() {
            return TypeDescriptor::parse(&unescaped(&attr.value)?);
        }
    }
    Err(ParseError::missing_attr(element, attribute))
}

/// Skips over the content of an element whose start tag was already read.
fn skip_body(
    reader: &mut Reader<&[u8]>,
    has_body: bool,
    context: &str,
) -> Result<(), ParseError> {
    if !has_body {
        return Ok(());
    }

    let mut buf = Vec::new();
    let mut depth = 1;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(context)),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn declaration_mut(snapshot: &mut Snapshot, id: DeclId) -> Result<&mut Declaration, ParseError> {
    snapshot.get_mut(id).ok_or_else(|| ParseError::InvalidStructure {
        message: format!("declaration {id} vanished while loading"),
    })
}

/// Decodes and unescapes a raw attribute value.
fn unescaped(raw: &[u8]) -> Result<String, ParseError> {
    let text = std::str::from_utf8(raw)?;
    Ok(quick_xml::escape::unescape(text)?.into_owned())
}

fn unknown(e: &BytesStart<'_>, context: &str) -> ParseError {
    ParseError::unknown_element(String::from_utf8_lossy(e.name().as_ref()), context)
}

/// Steps one element level deeper, failing past `MAX_NESTING`.
fn nested(depth: usize, context: &str) -> Result<usize, ParseError> {
    if depth >= MAX_NESTING {
        return Err(ParseError::InvalidStructure {
            message: format!("nesting too deep inside '{context}'"),
        });
    }
    Ok(depth + 1)
}

fn unexpected_eof(context: &str) -> ParseError {
    ParseError::InvalidStructure {
        message: format!("unexpected end of document inside '{context}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<declarations>
  <package name="com.example">
    <interface name="Move" modifiers="public">
      <annotation tag="Message"/>
    </interface>
    <class name="Move_Latest" modifiers="public">
      <implements type="com.example.Move"/>
      <annotation tag="MessageVariant">
        <arg name="minVersion" int="759"/>
      </annotation>
      <field name="entries" type="java.util.List&lt;java.lang.Integer&gt;" modifiers="public"/>
      <field name="CONSTANT" type="int" modifiers="public static final"/>
      <method name="foo" returns="void" modifiers="public static">
        <annotation tag="PartialHandler"/>
        <annotation tag="ReturnType"><arg type="com.example.Move"/></annotation>
        <param name="x" type="int"/>
        <param name="y" type="java.lang.String">
          <annotation tag="Argument"><arg string="y"/><arg name="translate" bool="true"/></annotation>
        </param>
        <throws type="java.io.IOException"/>
      </method>
      <constructor modifiers="public"/>
      <enum name="Mode" modifiers="public static">
        <annotation tag="NetworkEnum"/>
        <enumConstant name="A"/>
        <enumConstant name="B"/>
      </enum>
    </class>
  </package>
</declarations>"#;

    #[test]
    fn test_parse_document() {
        let snapshot = parse_snapshot(DOCUMENT).expect("Failed to parse");
        let variant = snapshot.lookup("com.example.Move_Latest").unwrap();

        assert_eq!(snapshot.kind(variant), DeclKind::Class);
        assert!(snapshot.has_annotation(variant, tags::MESSAGE_VARIANT));
        assert_eq!(
            snapshot.annotation(variant, tags::MESSAGE_VARIANT).unwrap().int_arg("minVersion"),
            Some(759)
        );
        assert_eq!(snapshot.interfaces(variant), &[TypeDescriptor::declared("com.example.Move")]);
        assert_eq!(snapshot.enclosed(variant).len(), 5);
    }

    #[test]
    fn test_parse_members() {
        let snapshot = parse_snapshot(DOCUMENT).expect("Failed to parse");
        let variant = snapshot.lookup("com.example.Move_Latest").unwrap();
        let members = snapshot.enclosed(variant);

        let entries = members[0];
        assert_eq!(snapshot.name(entries), "entries");
        assert_eq!(
            snapshot.type_of(entries).unwrap().to_string(),
            "java.util.List<java.lang.Integer>"
        );
        assert!(snapshot.has_modifier(members[1], Modifiers::STATIC | Modifiers::FINAL));

        let method = members[2];
        assert_eq!(snapshot.kind(method), DeclKind::Method);
        assert_eq!(snapshot.type_of(method), Some(&TypeDescriptor::Void));
        assert_eq!(snapshot.parameters(method).len(), 2);
        assert_eq!(
            snapshot.thrown_types(method),
            &[TypeDescriptor::declared("java.io.IOException")]
        );
        let return_type = snapshot.annotation(method, tags::RETURN_TYPE).unwrap();
        assert_eq!(
            return_type.type_arg(Annotation::VALUE),
            Some(&TypeDescriptor::declared("com.example.Move"))
        );

        let y = snapshot.parameters(method)[1];
        let argument = snapshot.annotation(y, tags::ARGUMENT).unwrap();
        assert_eq!(argument.str_arg(Annotation::VALUE), Some("y"));
        assert_eq!(argument.bool_arg("translate"), Some(true));

        assert_eq!(snapshot.kind(members[3]), DeclKind::Constructor);
    }

    #[test]
    fn test_parse_nested_enum() {
        let snapshot = parse_snapshot(DOCUMENT).expect("Failed to parse");
        let mode = snapshot.lookup("com.example.Move_Latest.Mode").unwrap();
        assert_eq!(snapshot.kind(mode), DeclKind::Enum);
        let constants = snapshot.enclosed(mode);
        assert_eq!(constants.len(), 2);
        assert_eq!(snapshot.type_of(constants[0]), snapshot.type_of(mode));
        assert!(snapshot.has_modifier(constants[1], Modifiers::STATIC));
    }

    #[test]
    fn test_parse_array_and_nested_annotation_args() {
        let xml = r#"<declarations>
  <class name="a.A">
    <annotation tag="FilledArgument">
      <arg name="fromRegistry"><annotation tag="FromRegistry"><arg string="block"/></annotation></arg>
    </annotation>
    <annotation tag="X">
      <arg name="values"><item int="1"/><item enum="B"/><item type="int[]"/></arg>
    </annotation>
  </class>
</declarations>"#;
        let snapshot = parse_snapshot(xml).expect("Failed to parse");
        let a = snapshot.lookup("a.A").unwrap();

        let filled = snapshot.annotation(a, "FilledArgument").unwrap();
        let nested = filled.arg("fromRegistry").unwrap().as_annotation().unwrap();
        assert_eq!(nested.str_arg(Annotation::VALUE), Some("block"));

        let x = snapshot.annotation(a, "X").unwrap();
        assert_eq!(
            x.arg("values"),
            Some(&AnnotationValue::Array(vec![
                AnnotationValue::Int(1),
                AnnotationValue::Enum("B".to_string()),
                AnnotationValue::Type(TypeDescriptor::parse("int[]").unwrap()),
            ]))
        );
    }

    #[test]
    fn test_parse_missing_root() {
        let result = parse_snapshot("<class name=\"a.A\"/>");
        assert!(matches!(result, Err(ParseError::UnknownElement { .. })));
        assert!(matches!(
            parse_snapshot(""),
            Err(ParseError::InvalidStructure { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_misplaced_elements() {
        let xml = r#"<declarations><class name="a.A"><param name="x" type="int"/></class></declarations>"#;
        assert!(matches!(
            parse_snapshot(xml),
            Err(ParseError::UnknownElement { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_attributes() {
        let bad_modifier = r#"<declarations><class name="a.A" modifiers="sealed"/></declarations>"#;
        assert!(matches!(
            parse_snapshot(bad_modifier),
            Err(ParseError::InvalidAttribute { .. })
        ));

        let bad_type = r#"<declarations><class name="a.A"><field name="f" type="java.util.List&lt;"/></class></declarations>"#;
        assert!(matches!(
            parse_snapshot(bad_type),
            Err(ParseError::InvalidType { .. })
        ));

        let missing_type = r#"<declarations><class name="a.A"><field name="f"/></class></declarations>"#;
        assert!(matches!(
            parse_snapshot(missing_type),
            Err(ParseError::MissingAttribute { .. })
        ));
    }

    fn nested_classes(levels: usize) -> String {
        let mut xml = String::from("<declarations>");
        for level in 0..levels {
            xml.push_str(&format!("<class name=\"a.C{level}\">"));
        }
        xml.push_str(&"</class>".repeat(levels));
        xml.push_str("</declarations>");
        xml
    }

    fn nested_annotations(levels: usize) -> String {
        format!(
            "<declarations><class name=\"a.A\"><annotation tag=\"T\">{}{}</annotation></class></declarations>",
            "<arg><annotation tag=\"T\">".repeat(levels),
            "</annotation></arg>".repeat(levels)
        )
    }

    fn is_too_deep(result: Result<Snapshot, ParseError>) -> bool {
        matches!(result, Err(ParseError::InvalidStructure { message }) if message.starts_with("nesting too deep"))
    }

    #[test]
    fn test_parse_limits_nesting() {
        let snapshot = parse_snapshot(&nested_classes(8)).expect("Failed to parse");
        let outer = snapshot.lookup("a.C0").unwrap();
        assert_eq!(snapshot.enclosed(outer).len(), 1);
        assert!(is_too_deep(parse_snapshot(&nested_classes(10_000))));

        let snapshot = parse_snapshot(&nested_annotations(8)).expect("Failed to parse");
        let class = snapshot.lookup("a.A").unwrap();
        assert!(matches!(
            snapshot.annotation(class, "T").unwrap().arg(Annotation::VALUE),
            Some(AnnotationValue::Annotation(_))
        ));
        assert!(is_too_deep(parse_snapshot(&nested_annotations(10_000))));
    }
}
