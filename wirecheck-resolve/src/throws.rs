//! Throw-safety of methods and constructors.

use crate::names::{KnownType, NameTable};
use wirecheck_model::{DeclId, DeclarationModel, TypeDescriptor};

/// Returns true if every declared thrown type is unchecked (a subtype of the
/// unchecked-exception or fatal-error base) or a subtype of one of `allowed`.
///
/// When the model cannot resolve either base type there is no notion of a
/// checked exception and every executable is throw-safe.
#[must_use]
pub fn is_throw_safe(
    model: &dyn DeclarationModel,
    names: &NameTable,
    executable: DeclId,
    allowed: &[TypeDescriptor],
) -> bool {
    let Some(runtime_exception) = resolved_base(model, names, KnownType::RuntimeException) else {
        return true;
    };
    let Some(error) = resolved_base(model, names, KnownType::Error) else {
        return true;
    };

    model.thrown_types(executable).iter().all(|thrown| {
        model.is_subtype(thrown, &runtime_exception)
            || model.is_subtype(thrown, &error)
            || allowed.iter().any(|ty| model.is_subtype(thrown, ty))
    })
}

fn resolved_base(
    model: &dyn DeclarationModel,
    names: &NameTable,
    role: KnownType,
) -> Option<TypeDescriptor> {
    let decl = model.lookup(names.name(role)?)?;
    model.type_of(decl).cloned()
}
