//! Wire function resolution.
//!
//! A wire function is a static helper method that generated code calls while
//! reading or translating a message. Its leading untagged parameters are
//! positional; every later parameter carries exactly one role tag telling
//! generated code where the value comes from.

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::hierarchy;
use crate::names::KnownType;
use crate::resolver::Resolver;
use wirecheck_model::{Annotation, DeclId, DeclKind, DeclarationModel, Modifiers, TypeDescriptor, tags};

/// Argument path naming the value being read.
const THIS_PATH: &str = "this";
/// Prefix of argument paths into the enclosing message.
const OUTER_PREFIX: &str = "outer.";
/// Version bound meaning "unspecified".
const UNSPECIFIED_VERSION: i64 = -1;

/// A resolved wire function.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WireFunction {
    /// Method name.
    pub name: String,
    /// Declared return type.
    pub return_type: TypeDescriptor,
    /// Types of the leading untagged parameters.
    pub positional_parameters: Vec<TypeDescriptor>,
    /// Tagged parameters in declaration order.
    pub parameters: Vec<BoundParameter>,
    /// Element types a `List<Object>` return may contain, first occurrence order.
    pub possible_return_types: Vec<TypeDescriptor>,
}

/// Role of a tagged wire function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundParameter {
    /// Value of a field of the message being read.
    Argument {
        /// Parameter type.
        ty: TypeDescriptor,
        /// Field path: a field name, `this`, or `outer.`-prefixed.
        path: String,
        /// Whether the value is translated to the current version first.
        translate: bool,
    },
    /// Freshly default-constructed value.
    DefaultConstructed {
        /// Parameter type.
        ty: TypeDescriptor,
    },
    /// Supplier of freshly default-constructed values.
    SuppliedDefaultConstructed {
        /// Declared supplier type.
        supplier: TypeDescriptor,
        /// Supplied type.
        ty: TypeDescriptor,
    },
    /// Value filled in by generated code.
    Filled {
        /// Parameter type.
        ty: TypeDescriptor,
        /// Where the value comes from.
        source: FillSource,
    },
    /// Connection-wide global data.
    GlobalData {
        /// Parameter type, possibly a sink of the data type.
        ty: TypeDescriptor,
    },
}

impl BoundParameter {
    /// Returns the declared parameter type.
    #[must_use]
    pub const fn ty(&self) -> &TypeDescriptor {
        match self {
            Self::Argument { ty, .. }
            | Self::DefaultConstructed { ty }
            | Self::Filled { ty, .. }
            | Self::GlobalData { ty } => ty,
            Self::SuppliedDefaultConstructed { supplier, .. } => supplier,
        }
    }
}

/// Source of a filled parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillSource {
    /// Id from the named registry.
    Registry(String),
    /// Conversion between the variants valid at two protocol versions.
    VersionRange {
        /// Source protocol version.
        from: i64,
        /// Target protocol version.
        to: i64,
    },
    /// Context object supplied by generated code.
    AutoFill,
}

/// Type used to check argument paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArgumentContext {
    /// The type declaring the function.
    #[default]
    DeclaringType,
    /// Another message type.
    Type(DeclId),
    /// Argument paths are not checked.
    Disabled,
}

/// Options for [`Resolver::find_wire_function_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FunctionLookup {
    /// Type used to check argument paths.
    pub argument_context: ArgumentContext,
    /// Where lookup failures are reported; defaults to the declaring type.
    pub report_at: Option<DeclId>,
}

impl FunctionLookup {
    /// Creates lookup options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the argument context.
    #[must_use]
    pub const fn argument_context(mut self, context: ArgumentContext) -> Self {
        self.argument_context = context;
        self
    }

    /// Sets the location of lookup failures.
    #[must_use]
    pub const fn report_at(mut self, location: DeclId) -> Self {
        self.report_at = Some(location);
        self
    }
}

/// Parameter role selected from the tags present on a parameter.
#[derive(Debug)]
enum Role<'m> {
    Positional,
    Argument(&'m Annotation),
    DefaultConstruct,
    Filled(&'m Annotation),
    GlobalData,
}

/// Result of peeling a known single-argument wrapper off a type.
enum Wrapped<'t> {
    /// Not the wrapper type.
    No,
    /// The wrapper with its single type argument.
    Inner(&'t TypeDescriptor),
    /// The wrapper without exactly one type argument.
    Bare,
}

impl Resolver<'_> {
    /// Resolves the wire function `name` declared in `declaring`, checking
    /// argument paths against the declaring type.
    pub fn find_wire_function(
        &self,
        declaring: DeclId,
        name: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<WireFunction> {
        self.find_wire_function_with(declaring, name, FunctionLookup::default(), sink)
    }

    /// Resolves the wire function `name` declared in `declaring`.
    ///
    /// Returns `None` after reporting at least one diagnostic when the method
    /// is missing, overloaded, not `public static`, not throw-safe, or has an
    /// invalid parameter or return type.
    pub fn find_wire_function_with(
        &self,
        declaring: DeclId,
        name: &str,
        lookup: FunctionLookup,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<WireFunction> {
        let model = self.model;
        tracing::debug!(
            "Resolving wire function {} in {}",
            name,
            model.name(declaring)
        );

        let report_at = lookup.report_at.unwrap_or(declaring);
        let mut matching = model
            .enclosed(declaring)
            .iter()
            .copied()
            .filter(|&member| model.kind(member) == DeclKind::Method && model.name(member) == name);

        let method = match (matching.next(), matching.next()) {
            (Some(method), None) => method,
            (None, _) => {
                let kind = DiagnosticKind::MethodNotFound {
                    name: name.to_string(),
                    type_name: model.name(declaring).to_string(),
                };
                sink.report(Diagnostic::new(kind, report_at));
                return None;
            }
            (Some(_), Some(_)) => {
                sink.report(Diagnostic::new(DiagnosticKind::Overloaded, report_at));
                return None;
            }
        };

        if !model.has_modifier(method, Modifiers::STATIC) {
            sink.report(Diagnostic::new(DiagnosticKind::NotStatic, method));
            return None;
        }
        if !model.has_modifier(method, Modifiers::PUBLIC) {
            sink.report(Diagnostic::new(DiagnosticKind::NotPublic, method));
            return None;
        }
        if !self.is_throw_safe(method, &[]) {
            sink.report(Diagnostic::new(DiagnosticKind::NotThrowSafe, method));
            return None;
        }

        let context = match lookup.argument_context {
            ArgumentContext::DeclaringType => Some(declaring),
            ArgumentContext::Type(context) => Some(context),
            ArgumentContext::Disabled => None,
        };

        let mut positional_parameters = Vec::new();
        let mut parameters = Vec::new();
        for &param in model.parameters(method) {
            let role = self.parameter_role(param, sink)?;
            let Some(ty) = model.type_of(param) else {
                sink.report(Diagnostic::new(DiagnosticKind::UntypedParameter, param));
                return None;
            };
            tracing::trace!("Parameter {} of {} is {:?}", model.name(param), name, role);

            let bound = match role {
                Role::Positional => {
                    if !parameters.is_empty() {
                        sink.report(Diagnostic::new(DiagnosticKind::PositionalAfterBound, param));
                        return None;
                    }
                    positional_parameters.push(ty.clone());
                    continue;
                }
                Role::Argument(argument) => self.bind_argument(param, ty, argument, context, sink)?,
                Role::DefaultConstruct => self.bind_default_construct(param, ty, sink)?,
                Role::Filled(filled) => self.bind_filled(param, ty, filled, sink)?,
                Role::GlobalData => self.bind_global_data(param, ty, sink)?,
            };
            parameters.push(bound);
        }

        let return_type = model.type_of(method).cloned().unwrap_or(TypeDescriptor::Void);
        let possible_return_types = self.possible_return_types(method);
        if !possible_return_types.is_empty() && !self.returns_object_list(&return_type) {
            sink.report(Diagnostic::new(DiagnosticKind::ReturnTypeNotList, method));
            return None;
        }

        Some(WireFunction {
            name: name.to_string(),
            return_type,
            positional_parameters,
            parameters,
            possible_return_types,
        })
    }

    /// Resolves every method tagged as a partial handler of a message variant.
    ///
    /// Methods that fail to resolve are dropped; their diagnostics have
    /// already been reported.
    pub fn partial_handlers(
        &self,
        variant: DeclId,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<WireFunction> {
        let model = self.model;
        if !hierarchy::is_message_variant(model, variant) {
            return Vec::new();
        }
        model
            .enclosed(variant)
            .iter()
            .copied()
            .filter(|&member| {
                model.kind(member) == DeclKind::Method
                    && model.has_annotation(member, tags::PARTIAL_HANDLER)
            })
            .filter_map(|method| self.find_wire_function(variant, model.name(method), sink))
            .collect()
    }

    /// Returns the handler method of a message variant: the single enclosed
    /// declaration tagged as handler, provided it is a method.
    #[must_use]
    pub fn handler(&self, variant: DeclId) -> Option<DeclId> {
        let model = self.model;
        if !hierarchy::is_message_variant(model, variant) {
            return None;
        }
        let mut tagged = model
            .enclosed(variant)
            .iter()
            .copied()
            .filter(|&member| model.has_annotation(member, tags::HANDLER));
        match (tagged.next(), tagged.next()) {
            (Some(handler), None) if model.kind(handler) == DeclKind::Method => Some(handler),
            _ => None,
        }
    }

    /// Selects the role of a parameter from its tags; reports and returns
    /// `None` when several role tags are present.
    fn parameter_role<'m>(&'m self, param: DeclId, sink: &mut dyn DiagnosticSink) -> Option<Role<'m>> {
        let model = self.model;
        let argument = model.annotation(param, tags::ARGUMENT);
        let default_construct = model.has_annotation(param, tags::DEFAULT_CONSTRUCT);
        let filled = model.annotation(param, tags::FILLED_ARGUMENT);
        let global_data = model.has_annotation(param, tags::GLOBAL_DATA);

        match (argument, default_construct, filled, global_data) {
            (None, false, None, false) => Some(Role::Positional),
            (Some(argument), false, None, false) => Some(Role::Argument(argument)),
            (None, true, None, false) => Some(Role::DefaultConstruct),
            (None, false, Some(filled), false) => Some(Role::Filled(filled)),
            (None, false, None, true) => Some(Role::GlobalData),
            _ => {
                sink.report(Diagnostic::new(DiagnosticKind::MultipleRoles, param));
                None
            }
        }
    }

    fn bind_argument(
        &self,
        param: DeclId,
        ty: &TypeDescriptor,
        argument: &Annotation,
        context: Option<DeclId>,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<BoundParameter> {
        let path = argument.str_arg(Annotation::VALUE).unwrap_or_default();
        if let Some(context) = context {
            let resolvable = path == THIS_PATH
                || path.starts_with(OUTER_PREFIX)
                || self
                    .all_record_fields(context)
                    .into_iter()
                    .any(|field| self.model.name(field) == path);
            if !resolvable {
                let kind = DiagnosticKind::UnresolvedArgument {
                    path: path.to_string(),
                };
                sink.report(Diagnostic::new(kind, param));
                return None;
            }
        }

        Some(BoundParameter::Argument {
            ty: ty.clone(),
            path: path.to_string(),
            translate: argument.bool_arg("translate").unwrap_or(false),
        })
    }

    fn bind_default_construct(
        &self,
        param: DeclId,
        ty: &TypeDescriptor,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<BoundParameter> {
        let (constructed, bound) = match self.unwrap_wrapper(ty, KnownType::Supplier) {
            Wrapped::Bare => {
                sink.report(Diagnostic::new(DiagnosticKind::SupplierWithoutArgument, param));
                return None;
            }
            Wrapped::Inner(inner) => (
                inner,
                BoundParameter::SuppliedDefaultConstructed {
                    supplier: ty.clone(),
                    ty: inner.clone(),
                },
            ),
            Wrapped::No => (ty, BoundParameter::DefaultConstructed { ty: ty.clone() }),
        };

        if !self.oracle.is_supported_type(self.model, constructed) {
            sink.report(Diagnostic::new(DiagnosticKind::NotDefaultConstructible, param));
            return None;
        }
        Some(bound)
    }

    fn bind_filled(
        &self,
        param: DeclId,
        ty: &TypeDescriptor,
        filled: &Annotation,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<BoundParameter> {
        let registry = registry_name(filled);
        let from = version_bound(filled, "fromVersion");
        let to = version_bound(filled, "toVersion");

        let source = match (registry, from, to) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                sink.report(Diagnostic::new(DiagnosticKind::RegistryWithVersion, param));
                return None;
            }
            (Some(registry), None, None) => {
                if !self.oracle.is_registry_compatible(self.model, ty) {
                    sink.report(Diagnostic::new(DiagnosticKind::NotRegistryType, param));
                    return None;
                }
                FillSource::Registry(registry.to_string())
            }
            (None, Some(from), Some(to)) => {
                if !self.is_variant_conversion(ty) {
                    sink.report(Diagnostic::new(DiagnosticKind::InvalidVariantConversion, param));
                    return None;
                }
                FillSource::VersionRange { from, to }
            }
            (None, Some(_), None) | (None, None, Some(_)) => {
                sink.report(Diagnostic::new(DiagnosticKind::HalfVersionRange, param));
                return None;
            }
            (None, None, None) => {
                if !self.oracle.can_auto_fill(self.model, ty) {
                    let kind = DiagnosticKind::CannotFill { ty: ty.clone() };
                    sink.report(Diagnostic::new(kind, param));
                    return None;
                }
                FillSource::AutoFill
            }
        };

        Some(BoundParameter::Filled {
            ty: ty.clone(),
            source,
        })
    }

    fn bind_global_data(
        &self,
        param: DeclId,
        ty: &TypeDescriptor,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<BoundParameter> {
        let valid = match self.unwrap_wrapper(ty, KnownType::Consumer) {
            Wrapped::Inner(inner) => inner.is_declared(),
            Wrapped::Bare => false,
            Wrapped::No => ty.is_declared(),
        };
        if !valid {
            let kind = DiagnosticKind::InvalidGlobalType { ty: ty.clone() };
            sink.report(Diagnostic::new(kind, param));
            return None;
        }
        Some(BoundParameter::GlobalData { ty: ty.clone() })
    }

    /// Peels one layer of the given single-argument wrapper type.
    fn unwrap_wrapper<'t>(&self, ty: &'t TypeDescriptor, wrapper: KnownType) -> Wrapped<'t> {
        if !self.names().is(ty, wrapper) {
            return Wrapped::No;
        }
        match ty.type_arguments() {
            [inner] => Wrapped::Inner(inner),
            _ => Wrapped::Bare,
        }
    }

    /// Returns true for `Function<V1, V2>` where both are message variants of
    /// the same type or of the same single message interface.
    fn is_variant_conversion(&self, ty: &TypeDescriptor) -> bool {
        let model = self.model;
        if !self.names().is(ty, KnownType::Function) {
            return false;
        }
        let [from, to] = ty.type_arguments() else {
            return false;
        };
        if !self.classifier.is_message_variant(model, from)
            || !self.classifier.is_message_variant(model, to)
        {
            return false;
        }
        if model.same_type(from, to) {
            return true;
        }
        match (single_interface(model, from), single_interface(model, to)) {
            (Some(a), Some(b)) => model.same_type(a, b),
            _ => false,
        }
    }

    /// Type literals of every return type directive, deduplicated.
    fn possible_return_types(&self, method: DeclId) -> Vec<TypeDescriptor> {
        let mut types: Vec<TypeDescriptor> = Vec::new();
        for directive in self.model.annotations_of(method, tags::RETURN_TYPE) {
            for ty in directive.type_args(Annotation::VALUE) {
                if !types.contains(ty) {
                    types.push(ty.clone());
                }
            }
        }
        types
    }

    fn returns_object_list(&self, ty: &TypeDescriptor) -> bool {
        self.names().is(ty, KnownType::List)
            && ty
                .type_arguments()
                .first()
                .is_some_and(|element| self.names().is(element, KnownType::UniversalBase))
    }
}

/// Registry named by a filled argument, either as a string or as the value
/// of a nested registry annotation. Empty means unspecified.
fn registry_name(filled: &Annotation) -> Option<&str> {
    let value = filled.arg("fromRegistry")?;
    let name = value
        .as_str()
        .or_else(|| value.as_annotation().and_then(|nested| nested.str_arg(Annotation::VALUE)))?;
    (!name.is_empty()).then_some(name)
}

fn version_bound(filled: &Annotation, name: &str) -> Option<i64> {
    filled
        .int_arg(name)
        .filter(|&version| version != UNSPECIFIED_VERSION)
}

fn single_interface<'m>(
    model: &'m dyn DeclarationModel,
    ty: &TypeDescriptor,
) -> Option<&'m TypeDescriptor> {
    match model.interfaces(model.declaration_of(ty)?) {
        [interface] => Some(interface),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Category, Diagnostics};
    use crate::resolver::ResolverBuilder;
    use wirecheck_model::{AnnotationValue, Declaration, Snapshot};

    const PUBLIC_STATIC: Modifiers = Modifiers::PUBLIC.union(Modifiers::STATIC);

    fn parse(input: &str) -> TypeDescriptor {
        TypeDescriptor::parse(input).unwrap()
    }

    fn argument(path: &str) -> Annotation {
        Annotation::new(tags::ARGUMENT).with_arg(Annotation::VALUE, AnnotationValue::Str(path.to_string()))
    }

    fn filled_versions(from: i64, to: i64) -> Annotation {
        Annotation::new(tags::FILLED_ARGUMENT)
            .with_arg("fromVersion", AnnotationValue::Int(from))
            .with_arg("toVersion", AnnotationValue::Int(to))
    }

    /// Variant `a.Move_1` with field `y: String`.
    fn variant(snapshot: &mut Snapshot) -> DeclId {
        snapshot.insert(Declaration::interface("a.Move").annotated(Annotation::new(tags::MESSAGE)), None);
        let variant = snapshot.insert(
            Declaration::class("a.Move_1")
                .modifiers(Modifiers::PUBLIC)
                .annotated(Annotation::new(tags::MESSAGE_VARIANT))
                .implements(parse("a.Move")),
            None,
        );
        snapshot.insert(
            Declaration::field("y", parse("java.lang.String")).modifiers(Modifiers::PUBLIC),
            Some(variant),
        );
        variant
    }

    fn method(
        snapshot: &mut Snapshot,
        owner: DeclId,
        name: &str,
        modifiers: Modifiers,
        params: Vec<Declaration>,
    ) -> DeclId {
        let method = snapshot.insert(
            Declaration::method(name, TypeDescriptor::Void).modifiers(modifiers),
            Some(owner),
        );
        for param in params {
            snapshot.insert(param, Some(method));
        }
        method
    }

    fn resolve(snapshot: &Snapshot, owner: DeclId, name: &str) -> (Option<WireFunction>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let function = Resolver::new(snapshot).find_wire_function(owner, name, &mut diagnostics);
        (function, diagnostics)
    }

    fn single_param(snapshot: &mut Snapshot, param: Declaration) -> (Option<WireFunction>, Diagnostics) {
        let owner = variant(snapshot);
        method(snapshot, owner, "foo", PUBLIC_STATIC, vec![param]);
        resolve(snapshot, owner, "foo")
    }

    #[test]
    fn test_positional_and_argument() {
        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        method(
            &mut snapshot,
            owner,
            "foo",
            PUBLIC_STATIC,
            vec![
                Declaration::parameter("x", parse("int")),
                Declaration::parameter("y", parse("java.lang.String")).annotated(argument("y")),
            ],
        );

        let (function, diagnostics) = resolve(&snapshot, owner, "foo");
        assert!(diagnostics.is_empty());
        let function = function.unwrap();
        assert_eq!(function.name, "foo");
        assert_eq!(function.positional_parameters, vec![parse("int")]);
        assert_eq!(
            function.parameters,
            vec![BoundParameter::Argument {
                ty: parse("java.lang.String"),
                path: "y".to_string(),
                translate: false,
            }]
        );
        assert!(function.possible_return_types.is_empty());
    }

    #[test]
    fn test_non_static_method() {
        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        let foo = method(
            &mut snapshot,
            owner,
            "foo",
            Modifiers::PUBLIC,
            vec![Declaration::parameter("x", parse("int"))],
        );

        let (function, diagnostics) = resolve(&snapshot, owner, "foo");
        assert!(function.is_none());
        assert_eq!(diagnostics.into_vec(), vec![Diagnostic::new(DiagnosticKind::NotStatic, foo)]);
    }

    #[test]
    fn test_non_public_and_throwing_methods() {
        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        let hidden = method(&mut snapshot, owner, "hidden", Modifiers::STATIC, vec![]);
        let throwing = snapshot.insert(
            Declaration::method("throwing", TypeDescriptor::Void)
                .modifiers(PUBLIC_STATIC)
                .throws(parse("java.io.IOException")),
            Some(owner),
        );

        let (_, diagnostics) = resolve(&snapshot, owner, "hidden");
        assert_eq!(diagnostics.into_vec(), vec![Diagnostic::new(DiagnosticKind::NotPublic, hidden)]);
        let (_, diagnostics) = resolve(&snapshot, owner, "throwing");
        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::new(DiagnosticKind::NotThrowSafe, throwing)]
        );

        let lenient = ResolverBuilder::new(&snapshot)
            .allow_exception(parse("java.io.IOException"))
            .build();
        let mut diagnostics = Diagnostics::new();
        assert!(lenient.find_wire_function(owner, "throwing", &mut diagnostics).is_some());
    }

    #[test]
    fn test_missing_method() {
        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        snapshot.insert(Declaration::field("foo", parse("int")), Some(owner));

        let (function, diagnostics) = resolve(&snapshot, owner, "foo");
        assert!(function.is_none());
        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::new(
                DiagnosticKind::MethodNotFound {
                    name: "foo".to_string(),
                    type_name: "Move_1".to_string(),
                },
                owner
            )]
        );
    }

    #[test]
    fn test_overloads_reported_once_at_report_location() {
        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        let elsewhere = snapshot.insert(Declaration::class("a.Elsewhere"), None);
        method(&mut snapshot, owner, "foo", PUBLIC_STATIC, vec![]);
        method(
            &mut snapshot,
            owner,
            "foo",
            PUBLIC_STATIC,
            vec![Declaration::parameter("x", parse("int"))],
        );

        let mut diagnostics = Diagnostics::new();
        let function = Resolver::new(&snapshot).find_wire_function_with(
            owner,
            "foo",
            FunctionLookup::new().report_at(elsewhere),
            &mut diagnostics,
        );
        assert!(function.is_none());
        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::new(DiagnosticKind::Overloaded, elsewhere)]
        );
    }

    #[test]
    fn test_positional_after_bound() {
        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        let late = Declaration::parameter("x", parse("int"));
        let foo = method(
            &mut snapshot,
            owner,
            "foo",
            PUBLIC_STATIC,
            vec![
                Declaration::parameter("y", parse("java.lang.String")).annotated(argument("y")),
                late,
            ],
        );
        let x = snapshot.parameters(foo)[1];

        let (function, diagnostics) = resolve(&snapshot, owner, "foo");
        assert!(function.is_none());
        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::new(DiagnosticKind::PositionalAfterBound, x)]
        );
    }

    #[test]
    fn test_untyped_parameter_rejected() {
        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        let foo = method(
            &mut snapshot,
            owner,
            "foo",
            PUBLIC_STATIC,
            vec![
                Declaration::parameter("x", parse("int")),
                Declaration::new(DeclKind::Parameter, "y"),
            ],
        );
        let y = snapshot.parameters(foo)[1];

        let (function, diagnostics) = resolve(&snapshot, owner, "foo");
        assert!(function.is_none());
        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::new(DiagnosticKind::UntypedParameter, y)]
        );
    }

    #[test]
    fn test_multiple_roles_reported_before_role_checks() {
        let mut snapshot = Snapshot::with_prelude();
        let (function, diagnostics) = single_param(
            &mut snapshot,
            Declaration::parameter("y", parse("char"))
                .annotated(argument("missing"))
                .annotated(Annotation::new(tags::DEFAULT_CONSTRUCT)),
        );
        assert!(function.is_none());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.count(&DiagnosticKind::MultipleRoles), 1);
    }

    #[test]
    fn test_argument_paths() {
        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        method(
            &mut snapshot,
            owner,
            "ok",
            PUBLIC_STATIC,
            vec![
                Declaration::parameter("a", parse("a.Move_1")).annotated(argument("this")),
                Declaration::parameter("b", parse("int")).annotated(argument("outer.count")),
                Declaration::parameter("c", parse("java.lang.String")).annotated(
                    argument("y").with_arg("translate", AnnotationValue::Bool(true)),
                ),
            ],
        );
        method(
            &mut snapshot,
            owner,
            "bad",
            PUBLIC_STATIC,
            vec![Declaration::parameter("z", parse("int")).annotated(argument("z"))],
        );

        let (function, diagnostics) = resolve(&snapshot, owner, "ok");
        assert!(diagnostics.is_empty());
        let function = function.unwrap();
        assert_eq!(function.parameters.len(), 3);
        assert!(matches!(
            &function.parameters[2],
            BoundParameter::Argument { translate: true, .. }
        ));

        let (function, diagnostics) = resolve(&snapshot, owner, "bad");
        assert!(function.is_none());
        assert_eq!(
            diagnostics.count(&DiagnosticKind::UnresolvedArgument {
                path: "z".to_string()
            }),
            1
        );

        let mut diagnostics = Diagnostics::new();
        let unchecked = Resolver::new(&snapshot).find_wire_function_with(
            owner,
            "bad",
            FunctionLookup::new().argument_context(ArgumentContext::Disabled),
            &mut diagnostics,
        );
        assert!(unchecked.is_some());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_argument_context_other_type() {
        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        let helper = snapshot.insert(Declaration::class("a.Helpers"), None);
        method(
            &mut snapshot,
            helper,
            "read",
            PUBLIC_STATIC,
            vec![Declaration::parameter("y", parse("java.lang.String")).annotated(argument("y"))],
        );

        let resolver = Resolver::new(&snapshot);
        let mut diagnostics = Diagnostics::new();
        assert!(resolver.find_wire_function(helper, "read", &mut diagnostics).is_none());
        assert_eq!(diagnostics.count_category(Category::Role), 1);

        let mut diagnostics = Diagnostics::new();
        let function = resolver.find_wire_function_with(
            helper,
            "read",
            FunctionLookup::new().argument_context(ArgumentContext::Type(owner)),
            &mut diagnostics,
        );
        assert!(function.is_some());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_argument_paths_see_parent_fields_only() {
        let mut snapshot = Snapshot::with_prelude();
        let root = snapshot.insert(
            Declaration::class("a.Root")
                .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
                .annotated(Annotation::new(tags::POLYMORPHIC)),
            None,
        );
        snapshot.insert(Declaration::field("a", parse("int")), Some(root));
        let parent = snapshot.insert(
            Declaration::class("a.B")
                .modifiers(Modifiers::ABSTRACT)
                .annotated(Annotation::new(tags::MESSAGE_VARIANT))
                .extends(parse("a.Root")),
            None,
        );
        snapshot.insert(Declaration::field("b", parse("int")), Some(parent));
        let owner = snapshot.insert(
            Declaration::class("a.C")
                .annotated(Annotation::new(tags::MESSAGE_VARIANT))
                .extends(parse("a.B")),
            None,
        );
        snapshot.insert(Declaration::field("c", parse("int")), Some(owner));
        method(
            &mut snapshot,
            owner,
            "fromParent",
            PUBLIC_STATIC,
            vec![Declaration::parameter("b", parse("int")).annotated(argument("b"))],
        );
        method(
            &mut snapshot,
            owner,
            "fromGrandparent",
            PUBLIC_STATIC,
            vec![Declaration::parameter("a", parse("int")).annotated(argument("a"))],
        );

        let (function, diagnostics) = resolve(&snapshot, owner, "fromParent");
        assert!(diagnostics.is_empty());
        assert!(function.is_some());

        let (function, diagnostics) = resolve(&snapshot, owner, "fromGrandparent");
        assert!(function.is_none());
        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::new(
                DiagnosticKind::UnresolvedArgument {
                    path: "a".to_string()
                },
                snapshot.enclosed(snapshot.enclosed(owner)[2])[0],
            )]
        );
    }

    #[test]
    fn test_default_construct() {
        let mut snapshot = Snapshot::with_prelude();
        let (function, _) = single_param(
            &mut snapshot,
            Declaration::parameter("v", parse("java.util.function.Supplier<a.Move_1>"))
                .annotated(Annotation::new(tags::DEFAULT_CONSTRUCT)),
        );
        assert_eq!(
            function.unwrap().parameters,
            vec![BoundParameter::SuppliedDefaultConstructed {
                supplier: parse("java.util.function.Supplier<a.Move_1>"),
                ty: parse("a.Move_1"),
            }]
        );

        let mut snapshot = Snapshot::with_prelude();
        let (function, _) = single_param(
            &mut snapshot,
            Declaration::parameter("v", parse("java.util.List<java.lang.String>"))
                .annotated(Annotation::new(tags::DEFAULT_CONSTRUCT)),
        );
        assert!(matches!(
            function.unwrap().parameters[0],
            BoundParameter::DefaultConstructed { .. }
        ));
    }

    #[test]
    fn test_default_construct_failures() {
        let mut snapshot = Snapshot::with_prelude();
        let (function, diagnostics) = single_param(
            &mut snapshot,
            Declaration::parameter("v", parse("java.util.function.Supplier"))
                .annotated(Annotation::new(tags::DEFAULT_CONSTRUCT)),
        );
        assert!(function.is_none());
        assert_eq!(diagnostics.count(&DiagnosticKind::SupplierWithoutArgument), 1);

        let mut snapshot = Snapshot::with_prelude();
        let (function, diagnostics) = single_param(
            &mut snapshot,
            Declaration::parameter("v", parse("java.lang.Thread"))
                .annotated(Annotation::new(tags::DEFAULT_CONSTRUCT)),
        );
        assert!(function.is_none());
        assert_eq!(diagnostics.count(&DiagnosticKind::NotDefaultConstructible), 1);
    }

    #[test]
    fn test_filled_registry() {
        let registry = |value: AnnotationValue| {
            Annotation::new(tags::FILLED_ARGUMENT).with_arg("fromRegistry", value)
        };

        let mut snapshot = Snapshot::with_prelude();
        let (function, _) = single_param(
            &mut snapshot,
            Declaration::parameter("id", parse("int"))
                .annotated(registry(AnnotationValue::Str("block".to_string()))),
        );
        assert_eq!(
            function.unwrap().parameters,
            vec![BoundParameter::Filled {
                ty: parse("int"),
                source: FillSource::Registry("block".to_string()),
            }]
        );

        let nested = Annotation::new(tags::REGISTRY)
            .with_arg(Annotation::VALUE, AnnotationValue::Str("item".to_string()));
        let mut snapshot = Snapshot::with_prelude();
        let (function, _) = single_param(
            &mut snapshot,
            Declaration::parameter("id", parse("net.minecraft.util.Identifier"))
                .annotated(registry(AnnotationValue::Annotation(nested))),
        );
        assert!(function.is_some());

        let mut snapshot = Snapshot::with_prelude();
        let (function, diagnostics) = single_param(
            &mut snapshot,
            Declaration::parameter("id", parse("java.lang.String"))
                .annotated(registry(AnnotationValue::Str("block".to_string()))),
        );
        assert!(function.is_none());
        assert_eq!(diagnostics.count(&DiagnosticKind::NotRegistryType), 1);

        let mut snapshot = Snapshot::with_prelude();
        let (function, diagnostics) = single_param(
            &mut snapshot,
            Declaration::parameter("id", parse("int")).annotated(
                registry(AnnotationValue::Str("block".to_string()))
                    .with_arg("toVersion", AnnotationValue::Int(5)),
            ),
        );
        assert!(function.is_none());
        assert_eq!(diagnostics.count(&DiagnosticKind::RegistryWithVersion), 1);
    }

    #[test]
    fn test_filled_sentinels_mean_unspecified() {
        let mut snapshot = Snapshot::with_prelude();
        let (function, diagnostics) = single_param(
            &mut snapshot,
            Declaration::parameter(
                "map",
                parse("net.earthcomputer.multiconnect.protocols.generic.TypedMap"),
            )
            .annotated(
                filled_versions(-1, -1)
                    .with_arg("fromRegistry", AnnotationValue::Str(String::new())),
            ),
        );
        assert!(diagnostics.is_empty());
        assert!(matches!(
            &function.unwrap().parameters[0],
            BoundParameter::Filled {
                source: FillSource::AutoFill,
                ..
            }
        ));

        let mut snapshot = Snapshot::with_prelude();
        let (function, diagnostics) = single_param(
            &mut snapshot,
            Declaration::parameter("s", parse("java.lang.String"))
                .annotated(Annotation::new(tags::FILLED_ARGUMENT)),
        );
        assert!(function.is_none());
        assert_eq!(
            diagnostics.count(&DiagnosticKind::CannotFill {
                ty: parse("java.lang.String")
            }),
            1
        );
    }

    #[test]
    fn test_filled_half_version_range() {
        let mut snapshot = Snapshot::with_prelude();
        let (function, diagnostics) = single_param(
            &mut snapshot,
            Declaration::parameter("f", parse("java.util.function.Function<a.Move_1, a.Move_1>"))
                .annotated(filled_versions(3, -1)),
        );
        assert!(function.is_none());
        assert_eq!(diagnostics.count(&DiagnosticKind::HalfVersionRange), 1);
    }

    #[test]
    fn test_filled_variant_conversion() {
        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        snapshot.insert(
            Declaration::class("a.Move_2")
                .annotated(Annotation::new(tags::MESSAGE_VARIANT))
                .implements(parse("a.Move")),
            None,
        );
        snapshot.insert(Declaration::interface("a.Other").annotated(Annotation::new(tags::MESSAGE)), None);
        snapshot.insert(
            Declaration::class("a.Other_1")
                .annotated(Annotation::new(tags::MESSAGE_VARIANT))
                .implements(parse("a.Other")),
            None,
        );
        let conversion = |ty: &str| {
            Declaration::parameter("f", parse(ty)).annotated(filled_versions(1, 2))
        };
        method(
            &mut snapshot,
            owner,
            "same",
            PUBLIC_STATIC,
            vec![conversion("java.util.function.Function<a.Move_1, a.Move_1>")],
        );
        method(
            &mut snapshot,
            owner,
            "group",
            PUBLIC_STATIC,
            vec![conversion("java.util.function.Function<a.Move_1, a.Move_2>")],
        );
        method(
            &mut snapshot,
            owner,
            "across",
            PUBLIC_STATIC,
            vec![conversion("java.util.function.Function<a.Move_1, a.Other_1>")],
        );

        let (same, _) = resolve(&snapshot, owner, "same");
        assert_eq!(
            same.unwrap().parameters,
            vec![BoundParameter::Filled {
                ty: parse("java.util.function.Function<a.Move_1, a.Move_1>"),
                source: FillSource::VersionRange { from: 1, to: 2 },
            }]
        );
        assert!(resolve(&snapshot, owner, "group").0.is_some());

        let (across, diagnostics) = resolve(&snapshot, owner, "across");
        assert!(across.is_none());
        assert_eq!(
            diagnostics.count(&DiagnosticKind::InvalidVariantConversion),
            1
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_global_data() {
        let global = |ty: &str| {
            Declaration::parameter("g", parse(ty)).annotated(Annotation::new(tags::GLOBAL_DATA))
        };

        let mut snapshot = Snapshot::with_prelude();
        let (function, _) = single_param(
            &mut snapshot,
            global("java.util.function.Consumer<a.Move_1>"),
        );
        assert!(function.is_some());

        for bad in ["int", "java.util.function.Consumer", "java.util.function.Consumer<int[]>"] {
            let mut snapshot = Snapshot::with_prelude();
            let (function, diagnostics) = single_param(&mut snapshot, global(bad));
            assert!(function.is_none(), "{bad}");
            assert_eq!(
                diagnostics.count(&DiagnosticKind::InvalidGlobalType { ty: parse(bad) }),
                1
            );
        }
    }

    #[test]
    fn test_return_type_directives() {
        let return_type = |ty: &str| {
            Annotation::new(tags::RETURN_TYPE)
                .with_arg(Annotation::VALUE, AnnotationValue::Type(parse(ty)))
        };

        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        snapshot.insert(
            Declaration::method("list", parse("java.util.List<java.lang.Object>"))
                .modifiers(PUBLIC_STATIC)
                .annotated(return_type("a.Move_1"))
                .annotated(return_type("a.Move"))
                .annotated(return_type("a.Move_1")),
            Some(owner),
        );
        let wrong = snapshot.insert(
            Declaration::method("wrong", parse("java.util.List<a.Move>"))
                .modifiers(PUBLIC_STATIC)
                .annotated(return_type("a.Move_1")),
            Some(owner),
        );

        let (function, _) = resolve(&snapshot, owner, "list");
        assert_eq!(
            function.unwrap().possible_return_types,
            vec![parse("a.Move_1"), parse("a.Move")]
        );

        let (function, diagnostics) = resolve(&snapshot, owner, "wrong");
        assert!(function.is_none());
        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::new(DiagnosticKind::ReturnTypeNotList, wrong)]
        );
    }

    #[test]
    fn test_handler_and_partial_handlers() {
        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        let handle = snapshot.insert(
            Declaration::method("handle", TypeDescriptor::Void)
                .modifiers(PUBLIC_STATIC)
                .annotated(Annotation::new(tags::HANDLER)),
            Some(owner),
        );
        snapshot.insert(
            Declaration::method("partial", TypeDescriptor::Void)
                .modifiers(PUBLIC_STATIC)
                .annotated(Annotation::new(tags::PARTIAL_HANDLER)),
            Some(owner),
        );
        snapshot.insert(
            Declaration::method("broken", TypeDescriptor::Void)
                .modifiers(Modifiers::PUBLIC)
                .annotated(Annotation::new(tags::PARTIAL_HANDLER)),
            Some(owner),
        );
        snapshot.insert(
            Declaration::field("ignored", parse("int"))
                .modifiers(Modifiers::STATIC)
                .annotated(Annotation::new(tags::PARTIAL_HANDLER)),
            Some(owner),
        );

        let resolver = Resolver::new(&snapshot);
        assert_eq!(resolver.handler(owner), Some(handle));

        let mut diagnostics = Diagnostics::new();
        let partials = resolver.partial_handlers(owner, &mut diagnostics);
        assert_eq!(partials.len(), 1);
        assert_eq!(partials[0].name, "partial");
        assert_eq!(diagnostics.count(&DiagnosticKind::NotStatic), 1);

        let message = snapshot.lookup("a.Move").unwrap();
        assert_eq!(resolver.handler(message), None);
        assert!(resolver.partial_handlers(message, &mut diagnostics).is_empty());
    }

    #[test]
    fn test_handler_must_be_single_method() {
        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        snapshot.insert(
            Declaration::field("handler", parse("int")).annotated(Annotation::new(tags::HANDLER)),
            Some(owner),
        );
        assert_eq!(Resolver::new(&snapshot).handler(owner), None);

        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        for name in ["a", "b"] {
            snapshot.insert(
                Declaration::method(name, TypeDescriptor::Void)
                    .modifiers(PUBLIC_STATIC)
                    .annotated(Annotation::new(tags::HANDLER)),
                Some(owner),
            );
        }
        assert_eq!(Resolver::new(&snapshot).handler(owner), None);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut snapshot = Snapshot::with_prelude();
        let owner = variant(&mut snapshot);
        method(
            &mut snapshot,
            owner,
            "foo",
            PUBLIC_STATIC,
            vec![
                Declaration::parameter("x", parse("int")),
                Declaration::parameter("y", parse("java.lang.String")).annotated(argument("y")),
                Declaration::parameter("z", parse("int")).annotated(argument("nope")),
            ],
        );

        let first = resolve(&snapshot, owner, "foo");
        let second = resolve(&snapshot, owner, "foo");
        assert_eq!(first.0, second.0);
        assert_eq!(first.1.sorted(), second.1.sorted());
    }
}
