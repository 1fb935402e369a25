//! Target-shape classification.
//!
//! A single lookup maps a `TypeId` to the closed set of shapes the
//! constructibility rules dispatch over. Consolidating the shape queries
//! into one tagged enum keeps the rule evaluation exhaustive and avoids
//! repeated key pattern matching.

use crate::corelib::WellKnown;
use crate::symbol::{SymbolFlags, SymbolId, TypeParamInfo};
use crate::table::SymbolArena;
use crate::types::{TypeId, TypeInterner, TypeKey};

/// Shape of a conversion target, as seen by the collection-literal rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetShape {
    Array { element: TypeId, rank: u8 },
    Span { element: TypeId },
    ReadOnlySpan { element: TypeId },
    /// A class or struct that is not one of the span shapes.
    NamedType { symbol: SymbolId, args: Vec<TypeId> },
    Interface { symbol: SymbolId, args: Vec<TypeId> },
    Enum { symbol: SymbolId },
    Delegate { symbol: SymbolId },
    TypeParameter(TypeParamInfo),
    Nullable { underlying: TypeId },
    Pointer,
    FunctionPointer,
    Dynamic,
    ObjectType,
    Error,
}

/// Classify a conversion target into its [`TargetShape`].
#[must_use]
pub fn classify_target(
    types: &TypeInterner,
    symbols: &SymbolArena,
    well_known: &WellKnown,
    id: TypeId,
) -> TargetShape {
    match types.key(id) {
        TypeKey::Error => TargetShape::Error,
        TypeKey::Object => TargetShape::ObjectType,
        TypeKey::Dynamic => TargetShape::Dynamic,
        TypeKey::Array { element, rank } => TargetShape::Array {
            element: *element,
            rank: *rank,
        },
        TypeKey::Pointer(_) => TargetShape::Pointer,
        TypeKey::FunctionPointer => TargetShape::FunctionPointer,
        TypeKey::Nullable(underlying) => TargetShape::Nullable {
            underlying: *underlying,
        },
        TypeKey::TypeParameter(info) => TargetShape::TypeParameter(info.clone()),
        TypeKey::Named { symbol, args } => {
            let element = args.first().copied().unwrap_or(TypeId::ERROR);
            if *symbol == well_known.span_t {
                return TargetShape::Span { element };
            }
            if *symbol == well_known.readonly_span_t {
                return TargetShape::ReadOnlySpan { element };
            }
            let flags = symbols.get(*symbol).flags;
            if flags.contains(SymbolFlags::INTERFACE) {
                TargetShape::Interface {
                    symbol: *symbol,
                    args: args.clone(),
                }
            } else if flags.contains(SymbolFlags::ENUM) {
                TargetShape::Enum { symbol: *symbol }
            } else if flags.contains(SymbolFlags::DELEGATE) {
                TargetShape::Delegate { symbol: *symbol }
            } else {
                TargetShape::NamedType {
                    symbol: *symbol,
                    args: args.clone(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    #[test]
    fn test_span_shapes_classify_before_named() {
        let mut symbols = SymbolArena::new();
        let mut types = TypeInterner::new();
        let wk = WellKnown::install(&mut symbols, &mut types);
        let int_ty = types.named(wk.int32_t);
        let span = types.named_with(wk.span_t, vec![int_ty]);
        assert_eq!(
            classify_target(&types, &symbols, &wk, span),
            TargetShape::Span { element: int_ty }
        );
    }

    #[test]
    fn test_interface_enum_delegate_are_distinguished() {
        let mut symbols = SymbolArena::new();
        let mut types = TypeInterner::new();
        let wk = WellKnown::install(&mut symbols, &mut types);
        let ns = symbols.namespace(symbols.root(), "N");
        let e = symbols.add_type(ns, Symbol::new_type("Color", SymbolFlags::ENUM));
        let d = symbols.add_type(ns, Symbol::new_type("Handler", SymbolFlags::DELEGATE));
        let e_ty = types.named(e);
        let d_ty = types.named(d);
        assert_eq!(
            classify_target(&types, &symbols, &wk, e_ty),
            TargetShape::Enum { symbol: e }
        );
        assert_eq!(
            classify_target(&types, &symbols, &wk, d_ty),
            TargetShape::Delegate { symbol: d }
        );
        let ienum = types.named(wk.ienumerable);
        assert!(matches!(
            classify_target(&types, &symbols, &wk, ienum),
            TargetShape::Interface { .. }
        ));
    }
}
