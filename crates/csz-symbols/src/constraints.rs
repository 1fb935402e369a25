//! Generic-constraint satisfaction for named-type instantiations.

use crate::symbol::{Accessibility, SymbolFlags, SymbolId};
use crate::table::SymbolArena;
use crate::types::{TypeId, TypeInterner, TypeKey};

/// The first constraint violation found in an instantiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub argument: TypeId,
    pub param_name: String,
}

/// Check `args` against the type parameters of `symbol`. Error-sentinel
/// arguments satisfy every constraint so cascading diagnostics are avoided.
pub fn check_type_args(
    types: &TypeInterner,
    symbols: &SymbolArena,
    symbol: SymbolId,
    args: &[TypeId],
) -> Result<(), ConstraintViolation> {
    let params = &symbols.get(symbol).type_params;
    for (param, &arg) in params.iter().zip(args) {
        if arg == TypeId::ERROR {
            continue;
        }
        let violated = (param.is_struct_constrained && !is_value_type(types, symbols, arg))
            || (param.is_reference_constrained && !is_reference_type(types, symbols, arg))
            || (param.has_new_constraint && !satisfies_new(types, symbols, arg));
        if violated {
            return Err(ConstraintViolation {
                argument: arg,
                param_name: param.name.clone(),
            });
        }
    }
    Ok(())
}

fn is_value_type(types: &TypeInterner, symbols: &SymbolArena, ty: TypeId) -> bool {
    match types.key(ty) {
        TypeKey::Named { symbol, .. } => symbols.get(*symbol).is_value_type(),
        TypeKey::Nullable(_) => true,
        TypeKey::TypeParameter(info) => info.is_struct_constrained,
        _ => false,
    }
}

fn is_reference_type(types: &TypeInterner, symbols: &SymbolArena, ty: TypeId) -> bool {
    match types.key(ty) {
        TypeKey::Named { symbol, .. } => {
            let flags = symbols.get(*symbol).flags;
            flags.intersects(SymbolFlags::CLASS | SymbolFlags::INTERFACE | SymbolFlags::DELEGATE)
        }
        TypeKey::Array { .. } | TypeKey::Object | TypeKey::Dynamic => true,
        TypeKey::TypeParameter(info) => info.is_reference_constrained,
        _ => false,
    }
}

fn satisfies_new(types: &TypeInterner, symbols: &SymbolArena, ty: TypeId) -> bool {
    if is_value_type(types, symbols, ty) {
        return true;
    }
    match types.key(ty) {
        TypeKey::Named { symbol, .. } => {
            symbols.get(*symbol).constructors.iter().any(|c| {
                c.callable_with_no_args()
                    && matches!(
                        c.accessibility,
                        Accessibility::Public | Accessibility::Internal
                    )
            })
        }
        TypeKey::TypeParameter(info) => info.has_new_constraint || info.is_struct_constrained,
        _ => false,
    }
}
