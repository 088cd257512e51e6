//! Default-constructability of classes.

use crate::names::NameTable;
use crate::throws::is_throw_safe;
use wirecheck_model::{DeclId, DeclKind, DeclarationModel, Modifiers, TypeDescriptor};

/// Returns true if generated code can create the class with `new T()`.
///
/// The class must be concrete and, when nested in another type, static. Without explicit constructors the implicit one is used; otherwise
/// a public, throw-safe no-argument constructor is required.
#[must_use]
pub fn is_constructable(
    model: &dyn DeclarationModel,
    names: &NameTable,
    decl: DeclId,
    allowed_exceptions: &[TypeDescriptor],
) -> bool {
    if model.kind(decl) != DeclKind::Class || model.has_modifier(decl, Modifiers::ABSTRACT) {
        return false;
    }

    let nested_in_type = model
        .enclosing(decl)
        .is_some_and(|outer| model.kind(outer).is_type());
    if nested_in_type && !model.has_modifier(decl, Modifiers::STATIC) {
        return false;
    }

    let mut constructors = model
        .enclosed(decl)
        .iter()
        .copied()
        .filter(|&member| model.kind(member) == DeclKind::Constructor)
        .peekable();
    if constructors.peek().is_none() {
        return true;
    }

    match constructors.find(|&ctor| model.parameters(ctor).is_empty()) {
        Some(no_arg) => {
            model.has_modifier(no_arg, Modifiers::PUBLIC)
                && is_throw_safe(model, names, no_arg, allowed_exceptions)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirecheck_model::{Declaration, Snapshot};

    fn check(snapshot: &Snapshot, decl: DeclId) -> bool {
        is_constructable(snapshot, &NameTable::DEFAULT, decl, &[])
    }

    #[test]
    fn test_implicit_constructor() {
        let mut snapshot = Snapshot::with_prelude();
        let class = snapshot.insert(Declaration::class("a.A"), None);
        assert!(check(&snapshot, class));
    }

    #[test]
    fn test_abstract_and_non_class_kinds() {
        let mut snapshot = Snapshot::with_prelude();
        let abstract_class = snapshot.insert(
            Declaration::class("a.A").modifiers(Modifiers::ABSTRACT),
            None,
        );
        let interface = snapshot.insert(Declaration::interface("a.I"), None);
        let enum_type = snapshot.insert(Declaration::enum_type("a.E"), None);
        assert!(!check(&snapshot, abstract_class));
        assert!(!check(&snapshot, interface));
        assert!(!check(&snapshot, enum_type));
    }

    #[test]
    fn test_nested_class_must_be_static() {
        let mut snapshot = Snapshot::with_prelude();
        let outer = snapshot.insert(Declaration::class("a.Outer"), None);
        let inner = snapshot.insert(Declaration::class("Inner"), Some(outer));
        let ctor = snapshot.insert(
            Declaration::constructor().modifiers(Modifiers::PUBLIC),
            Some(inner),
        );
        assert!(snapshot.parameters(ctor).is_empty());
        assert!(!check(&snapshot, inner));

        let nested = snapshot.insert(
            Declaration::class("Nested").modifiers(Modifiers::PUBLIC | Modifiers::STATIC),
            Some(outer),
        );
        snapshot.insert(
            Declaration::constructor().modifiers(Modifiers::PUBLIC),
            Some(nested),
        );
        assert!(check(&snapshot, nested));

        let outer_enum = snapshot.insert(Declaration::enum_type("a.Mode"), None);
        let in_enum = snapshot.insert(Declaration::class("Inner"), Some(outer_enum));
        snapshot.insert(
            Declaration::constructor().modifiers(Modifiers::PUBLIC),
            Some(in_enum),
        );
        assert!(!check(&snapshot, in_enum));
    }

    #[test]
    fn test_explicit_constructors() {
        let mut snapshot = Snapshot::with_prelude();

        let only_args = snapshot.insert(Declaration::class("a.OnlyArgs"), None);
        let ctor = snapshot.insert(
            Declaration::constructor().modifiers(Modifiers::PUBLIC),
            Some(only_args),
        );
        snapshot.insert(Declaration::parameter("x", "int".parse().unwrap()), Some(ctor));
        assert!(!check(&snapshot, only_args));

        let private = snapshot.insert(Declaration::class("a.Private"), None);
        snapshot.insert(
            Declaration::constructor().modifiers(Modifiers::PRIVATE),
            Some(private),
        );
        assert!(!check(&snapshot, private));

        let throwing = snapshot.insert(Declaration::class("a.Throwing"), None);
        snapshot.insert(
            Declaration::constructor()
                .modifiers(Modifiers::PUBLIC)
                .throws(TypeDescriptor::declared("java.io.IOException")),
            Some(throwing),
        );
        assert!(!check(&snapshot, throwing));
        assert!(is_constructable(
            &snapshot,
            &NameTable::DEFAULT,
            throwing,
            &[TypeDescriptor::declared("java.io.IOException")]
        ));
    }
}
