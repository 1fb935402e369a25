//! Core-library seeding: the well-known types the classifier depends on.
//!
//! `WellKnown::install` populates a fresh arena with the `System` namespace
//! skeleton every compilation is assumed to reference: the enumerable
//! interface family, the list backing type, and the span shapes. Tests and
//! callers layer user declarations on top of the seeded arena.

use rustc_hash::FxHashSet;
use tracing::debug;

use csz_common::limits::MAX_INHERITANCE_WALK;

use crate::symbol::{
    ConstructorInfo, MethodInfo, Symbol, SymbolFlags, SymbolId, TypeParamInfo,
};
use crate::table::SymbolArena;
use crate::types::{TypeId, TypeInterner, TypeKey};

/// Handles to the well-known symbols seeded by [`WellKnown::install`].
#[derive(Clone, Debug)]
pub struct WellKnown {
    pub system: SymbolId,
    pub collections: SymbolId,
    pub collections_generic: SymbolId,
    pub string_t: SymbolId,
    pub int32_t: SymbolId,
    pub boolean_t: SymbolId,
    pub span_t: SymbolId,
    pub readonly_span_t: SymbolId,
    /// Non-generic `System.Collections.IEnumerable`.
    pub ienumerable: SymbolId,
    pub ienumerable_t: SymbolId,
    pub icollection_t: SymbolId,
    pub ilist_t: SymbolId,
    pub ireadonly_collection_t: SymbolId,
    pub ireadonly_list_t: SymbolId,
    pub list_t: SymbolId,
}

impl WellKnown {
    /// Seed `symbols`/`types` with the core-library skeleton.
    pub fn install(symbols: &mut SymbolArena, types: &mut TypeInterner) -> Self {
        let root = symbols.root();
        let system = symbols.namespace(root, "System");
        let collections = symbols.namespace(system, "Collections");
        let collections_generic = symbols.namespace(collections, "Generic");

        let string_t = symbols.add_type(system, Symbol::new_type("String", SymbolFlags::CLASS));
        let int32_t = symbols.add_type(system, Symbol::new_type("Int32", SymbolFlags::STRUCT));
        let boolean_t = symbols.add_type(system, Symbol::new_type("Boolean", SymbolFlags::STRUCT));

        let t_param = TypeParamInfo::named("T");
        let t_arg = types.type_parameter(t_param.clone());

        let ienumerable = symbols.add_type(
            collections,
            Symbol::new_type("IEnumerable", SymbolFlags::INTERFACE),
        );
        let ienumerable_ty = types.named(ienumerable);

        let ienumerable_t = symbols.add_type(
            collections_generic,
            Symbol::new_type("IEnumerable", SymbolFlags::INTERFACE)
                .with_type_params(vec![t_param.clone()])
                .with_interfaces(vec![ienumerable_ty]),
        );
        let ienumerable_t_of_t = types.named_with(ienumerable_t, vec![t_arg]);

        let icollection_t = symbols.add_type(
            collections_generic,
            Symbol::new_type("ICollection", SymbolFlags::INTERFACE)
                .with_type_params(vec![t_param.clone()])
                .with_interfaces(vec![ienumerable_t_of_t]),
        );
        let icollection_t_of_t = types.named_with(icollection_t, vec![t_arg]);

        let ilist_t = symbols.add_type(
            collections_generic,
            Symbol::new_type("IList", SymbolFlags::INTERFACE)
                .with_type_params(vec![t_param.clone()])
                .with_interfaces(vec![icollection_t_of_t]),
        );
        let ilist_t_of_t = types.named_with(ilist_t, vec![t_arg]);

        let ireadonly_collection_t = symbols.add_type(
            collections_generic,
            Symbol::new_type("IReadOnlyCollection", SymbolFlags::INTERFACE)
                .with_type_params(vec![t_param.clone()])
                .with_interfaces(vec![ienumerable_t_of_t]),
        );
        let ireadonly_collection_of_t = types.named_with(ireadonly_collection_t, vec![t_arg]);

        let ireadonly_list_t = symbols.add_type(
            collections_generic,
            Symbol::new_type("IReadOnlyList", SymbolFlags::INTERFACE)
                .with_type_params(vec![t_param.clone()])
                .with_interfaces(vec![ireadonly_collection_of_t]),
        );
        let ireadonly_list_of_t = types.named_with(ireadonly_list_t, vec![t_arg]);

        let list_t = symbols.add_type(
            collections_generic,
            Symbol::new_type("List", SymbolFlags::CLASS)
                .with_type_params(vec![t_param.clone()])
                .with_constructor(ConstructorInfo::parameterless())
                .with_method(MethodInfo::instance("Add", 1))
                .with_interfaces(vec![ilist_t_of_t, ireadonly_list_of_t]),
        );

        // The span shapes carry the array-wrapping constructor the literal
        // lowering requires; removing it must surface as a missing-member
        // error, so it is modeled as an ordinary constructor entry.
        let wrapping_ctor = ConstructorInfo {
            accessibility: crate::symbol::Accessibility::Public,
            required_params: 1,
            has_params_array: false,
        };
        let span_t = symbols.add_type(
            system,
            Symbol::new_type("Span", SymbolFlags::STRUCT | SymbolFlags::REF_LIKE)
                .with_type_params(vec![t_param.clone()])
                .with_constructor(wrapping_ctor),
        );
        let readonly_span_t = symbols.add_type(
            system,
            Symbol::new_type("ReadOnlySpan", SymbolFlags::STRUCT | SymbolFlags::REF_LIKE)
                .with_type_params(vec![t_param])
                .with_constructor(wrapping_ctor),
        );

        debug!("core library skeleton installed");

        Self {
            system,
            collections,
            collections_generic,
            string_t,
            int32_t,
            boolean_t,
            span_t,
            readonly_span_t,
            ienumerable,
            ienumerable_t,
            icollection_t,
            ilist_t,
            ireadonly_collection_t,
            ireadonly_list_t,
            list_t,
        }
    }

    /// Whether `symbol` is one of the fixed set of collection interfaces a
    /// collection literal may target.
    #[must_use]
    pub fn is_collection_interface(&self, symbol: SymbolId) -> bool {
        symbol == self.ienumerable
            || symbol == self.ienumerable_t
            || symbol == self.icollection_t
            || symbol == self.ilist_t
            || symbol == self.ireadonly_collection_t
            || symbol == self.ireadonly_list_t
    }

    /// Resolve the list backing type for interface-targeted literals.
    /// Returns `None` when the backing is missing or ambiguous.
    #[must_use]
    pub fn resolve_list_backing(&self, symbols: &SymbolArena) -> Option<SymbolId> {
        let candidates: Vec<SymbolId> = symbols
            .members_named(self.collections_generic, "List")
            .iter()
            .copied()
            .filter(|&id| {
                let sym = symbols.get(id);
                sym.is_type() && sym.type_params.len() == 1
            })
            .collect();
        match candidates.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }

    /// Whether a type satisfies the enumerable contract, directly or through
    /// an ancestor interface or base type.
    #[must_use]
    pub fn satisfies_enumerable_contract(
        &self,
        symbols: &SymbolArena,
        types: &TypeInterner,
        ty: TypeId,
    ) -> bool {
        match types.key(ty) {
            TypeKey::Named { symbol, .. } => {
                let mut visited = FxHashSet::default();
                self.symbol_satisfies(symbols, types, *symbol, 0, &mut visited)
            }
            TypeKey::Array { .. } => true,
            TypeKey::TypeParameter(info) => info.has_enumerable_constraint,
            _ => false,
        }
    }

    fn symbol_satisfies(
        &self,
        symbols: &SymbolArena,
        types: &TypeInterner,
        symbol: SymbolId,
        depth: usize,
        visited: &mut FxHashSet<SymbolId>,
    ) -> bool {
        if depth > MAX_INHERITANCE_WALK || !visited.insert(symbol) {
            return false;
        }
        if symbol == self.ienumerable || symbol == self.ienumerable_t {
            return true;
        }
        let sym = symbols.get(symbol);
        for &iface in &sym.interfaces {
            if let TypeKey::Named { symbol: s, .. } = types.key(iface)
                && self.symbol_satisfies(symbols, types, *s, depth + 1, visited)
            {
                return true;
            }
        }
        if let Some(base) = sym.base_type
            && let TypeKey::Named { symbol: b, .. } = types.key(base)
            && self.symbol_satisfies(symbols, types, *b, depth + 1, visited)
        {
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_satisfies_enumerable_contract_transitively() {
        let mut symbols = SymbolArena::new();
        let mut types = TypeInterner::new();
        let wk = WellKnown::install(&mut symbols, &mut types);
        let int_ty = types.named(wk.int32_t);
        let list_of_int = types.named_with(wk.list_t, vec![int_ty]);
        assert!(wk.satisfies_enumerable_contract(&symbols, &types, list_of_int));
        let string_ty = types.named(wk.string_t);
        assert!(!wk.satisfies_enumerable_contract(&symbols, &types, string_ty));
    }

    #[test]
    fn test_list_backing_becomes_ambiguous_with_second_candidate() {
        let mut symbols = SymbolArena::new();
        let mut types = TypeInterner::new();
        let wk = WellKnown::install(&mut symbols, &mut types);
        assert_eq!(wk.resolve_list_backing(&symbols), Some(wk.list_t));

        symbols.add_type(
            wk.collections_generic,
            Symbol::new_type("List", SymbolFlags::CLASS)
                .with_type_params(vec![TypeParamInfo::named("T")]),
        );
        assert_eq!(wk.resolve_list_backing(&symbols), None);
    }
}
