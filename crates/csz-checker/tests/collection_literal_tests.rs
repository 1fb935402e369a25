//! Tests for collection-literal constructibility classification.

use csz_binder::{ScopeTables, bind_compilation};
use csz_checker::{
    CollectionLiteral, ConstructibilityVerdict, ElementKind, LiteralElement, SemanticModel,
    SemanticOptions,
};
use csz_common::TextSpan;
use csz_common::diagnostics::diagnostic_codes;
use csz_symbols::{
    Accessibility, ConstructorInfo, MethodInfo, Symbol, SymbolArena, SymbolFlags, TypeId,
    TypeInterner, TypeParamInfo, WellKnown,
};
use csz_syntax::{SourceUnitBuilder, UnitId};

struct Compilation {
    tables: ScopeTables,
    symbols: SymbolArena,
    types: TypeInterner,
    well_known: WellKnown,
}

fn compile_with(
    setup: impl FnOnce(&mut SymbolArena, &mut TypeInterner, &WellKnown),
) -> Compilation {
    let mut symbols = SymbolArena::new();
    let mut types = TypeInterner::new();
    let well_known = WellKnown::install(&mut symbols, &mut types);
    setup(&mut symbols, &mut types, &well_known);
    let units = vec![SourceUnitBuilder::new("main.cs").build()];
    let (tables, diagnostics) = bind_compilation(units, &mut symbols, &mut types);
    assert!(diagnostics.is_empty(), "unexpected bind diagnostics: {diagnostics:?}");
    Compilation {
        tables,
        symbols,
        types,
        well_known,
    }
}

impl Compilation {
    fn model(&self) -> SemanticModel<'_> {
        self.model_with(SemanticOptions::default())
    }

    fn model_with(&self, options: SemanticOptions) -> SemanticModel<'_> {
        SemanticModel::new(
            &self.tables,
            &self.symbols,
            &self.types,
            &self.well_known,
            options,
        )
    }

    fn int(&mut self) -> TypeId {
        let int32 = self.well_known.int32_t;
        self.types.named(int32)
    }
}

fn empty_literal() -> CollectionLiteral {
    CollectionLiteral::empty(TextSpan::new(100, 2))
}

/// A user collection: implements the enumerable contract and exposes an
/// `Add`-shaped member plus the given constructor.
fn user_collection(
    symbols: &mut SymbolArena,
    types: &mut TypeInterner,
    well_known: &WellKnown,
    name: &str,
    flags: SymbolFlags,
    ctor: Option<ConstructorInfo>,
    with_add: bool,
) -> csz_symbols::SymbolId {
    let enumerable = types.named(well_known.ienumerable);
    let mut symbol = Symbol::new_type(name, flags).with_interfaces(vec![enumerable]);
    if let Some(ctor) = ctor {
        symbol = symbol.with_constructor(ctor);
    }
    if with_add {
        symbol = symbol.with_method(MethodInfo::instance("Add", 1));
    }
    let root = symbols.root();
    symbols.add_type(root, symbol)
}

// =============================================================================
// Arrays
// =============================================================================

#[test]
fn test_rank_one_array_is_constructible() {
    let mut comp = compile_with(|_, _, _| {});
    let int = comp.int();
    let array = comp.types.array(int, 1);
    let model = comp.model();

    assert_eq!(
        model.classify_constructible(array),
        ConstructibilityVerdict::Array
    );
    let diagnostics = model.check_collection_literal(UnitId(0), Some(array), &empty_literal());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_multi_dimensional_array_is_never_constructible() {
    let mut comp = compile_with(|_, _, _| {});
    let int = comp.int();
    let rank2 = comp.types.array(int, 2);
    let model = comp.model();

    assert_eq!(
        model.classify_constructible(rank2),
        ConstructibilityVerdict::NotConstructible
    );
    let diagnostics = model.check_collection_literal(UnitId(0), Some(rank2), &empty_literal());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, diagnostic_codes::NOT_CONSTRUCTIBLE);
    assert!(diagnostics[0].message_text.contains("System.Int32[,]"));
}

// =============================================================================
// Spans
// =============================================================================

#[test]
fn test_span_shapes_are_constructible_via_wrapping_constructor() {
    let mut comp = compile_with(|_, _, _| {});
    let int = comp.int();
    let span = comp.types.named_with(comp.well_known.span_t, vec![int]);
    let ro_span = comp.types.named_with(comp.well_known.readonly_span_t, vec![int]);
    let model = comp.model();

    assert_eq!(
        model.classify_constructible(span),
        ConstructibilityVerdict::Span
    );
    assert_eq!(
        model.classify_constructible(ro_span),
        ConstructibilityVerdict::Span
    );
}

#[test]
fn test_missing_span_constructor_is_a_missing_member_error() {
    let mut comp = compile_with(|_, _, _| {});
    let int = comp.int();
    let span = comp.types.named_with(comp.well_known.span_t, vec![int]);
    // Strip the wrapping constructor the lowering depends on.
    comp.symbols
        .get_mut(comp.well_known.span_t)
        .constructors
        .clear();
    let model = comp.model();

    assert_eq!(
        model.classify_constructible(span),
        ConstructibilityVerdict::NotConstructible
    );
    let diagnostics = model.check_collection_literal(UnitId(0), Some(span), &empty_literal());
    assert_eq!(diagnostics.len(), 1);
    // Not the generic not-constructible error: the hole is a required
    // member that is absent.
    assert_eq!(diagnostics[0].code, diagnostic_codes::MISSING_REQUIRED_MEMBER);
}

// =============================================================================
// Collection initializer pattern
// =============================================================================

#[test]
fn test_seeded_list_uses_collection_initializer_strategy() {
    let mut comp = compile_with(|_, _, _| {});
    let int = comp.int();
    let list = comp.types.named_with(comp.well_known.list_t, vec![int]);
    let model = comp.model();

    assert_eq!(
        model.classify_constructible(list),
        ConstructibilityVerdict::CollectionInitializer
    );
}

#[test]
fn test_user_enumerable_with_ctor_and_add_is_constructible() {
    let mut comp = compile_with(|symbols, types, wk| {
        user_collection(
            symbols,
            types,
            wk,
            "Bag",
            SymbolFlags::CLASS,
            Some(ConstructorInfo::parameterless()),
            true,
        );
    });
    let bag = comp.symbols.members_named(comp.symbols.root(), "Bag")[0];
    let bag_ty = comp.types.named(bag);
    let model = comp.model();

    assert_eq!(
        model.classify_constructible(bag_ty),
        ConstructibilityVerdict::CollectionInitializer
    );
}

#[test]
fn test_enumerable_without_add_member_is_not_constructible() {
    let mut comp = compile_with(|symbols, types, wk| {
        user_collection(
            symbols,
            types,
            wk,
            "Bag",
            SymbolFlags::CLASS,
            Some(ConstructorInfo::parameterless()),
            false,
        );
    });
    let bag = comp.symbols.members_named(comp.symbols.root(), "Bag")[0];
    let bag_ty = comp.types.named(bag);
    let model = comp.model();

    assert_eq!(
        model.classify_constructible(bag_ty),
        ConstructibilityVerdict::NotConstructible
    );
}

#[test]
fn test_inaccessible_constructor_blocks_unless_accessibility_is_ignored() {
    let mut comp = compile_with(|symbols, types, wk| {
        let ctor = ConstructorInfo {
            accessibility: Accessibility::Private,
            required_params: 0,
            has_params_array: false,
        };
        user_collection(symbols, types, wk, "Bag", SymbolFlags::CLASS, Some(ctor), true);
    });
    let bag = comp.symbols.members_named(comp.symbols.root(), "Bag")[0];
    let bag_ty = comp.types.named(bag);

    let model = comp.model();
    assert_eq!(
        model.classify_constructible(bag_ty),
        ConstructibilityVerdict::NotConstructible
    );

    // A semantic model that ignores accessibility sees the constructor.
    let permissive = comp.model_with(SemanticOptions {
        ignore_accessibility: true,
        ..SemanticOptions::default()
    });
    assert_eq!(
        permissive.classify_constructible(bag_ty),
        ConstructibilityVerdict::CollectionInitializer
    );
}

#[test]
fn test_add_member_is_found_on_ancestor() {
    let mut comp = compile_with(|symbols, types, wk| {
        let base = user_collection(
            symbols,
            types,
            wk,
            "BagBase",
            SymbolFlags::CLASS,
            Some(ConstructorInfo::parameterless()),
            true,
        );
        let base_ty = types.named(base);
        let root = symbols.root();
        symbols.add_type(
            root,
            Symbol::new_type("Bag", SymbolFlags::CLASS)
                .with_base_type(base_ty)
                .with_constructor(ConstructorInfo::parameterless()),
        );
    });
    let bag = comp.symbols.members_named(comp.symbols.root(), "Bag")[0];
    let bag_ty = comp.types.named(bag);
    let model = comp.model();

    assert_eq!(
        model.classify_constructible(bag_ty),
        ConstructibilityVerdict::CollectionInitializer
    );
}

// =============================================================================
// Interfaces
// =============================================================================

#[test]
fn test_well_known_collection_interfaces_are_backed_by_list() {
    let mut comp = compile_with(|_, _, _| {});
    let int = comp.int();
    let targets = [
        comp.types.named_with(comp.well_known.ienumerable_t, vec![int]),
        comp.types.named_with(comp.well_known.icollection_t, vec![int]),
        comp.types.named_with(comp.well_known.ilist_t, vec![int]),
        comp.types
            .named_with(comp.well_known.ireadonly_collection_t, vec![int]),
        comp.types
            .named_with(comp.well_known.ireadonly_list_t, vec![int]),
    ];
    let model = comp.model();

    for target in targets {
        assert_eq!(
            model.classify_constructible(target),
            ConstructibilityVerdict::InterfaceBackedByList
        );
    }
}

#[test]
fn test_arbitrary_user_interface_is_not_constructible() {
    // Even with a concrete Add-capable implementer in scope, a user
    // interface is not a valid literal target.
    let mut comp = compile_with(|symbols, types, wk| {
        let root = symbols.root();
        let ibag = symbols.add_type(root, Symbol::new_type("IBag", SymbolFlags::INTERFACE));
        let ibag_ty = types.named(ibag);
        let enumerable = types.named(wk.ienumerable);
        symbols.add_type(
            root,
            Symbol::new_type("Bag", SymbolFlags::CLASS)
                .with_interfaces(vec![ibag_ty, enumerable])
                .with_constructor(ConstructorInfo::parameterless())
                .with_method(MethodInfo::instance("Add", 1)),
        );
    });
    let ibag = comp.symbols.members_named(comp.symbols.root(), "IBag")[0];
    let ibag_ty = comp.types.named(ibag);
    let model = comp.model();

    assert_eq!(
        model.classify_constructible(ibag_ty),
        ConstructibilityVerdict::NotConstructible
    );
}

#[test]
fn test_ambiguous_list_backing_blocks_interface_targets() {
    let mut comp = compile_with(|symbols, _, wk| {
        // A second one-arity List in the backing namespace makes the
        // backing resolution ambiguous.
        symbols.add_type(
            wk.collections_generic,
            Symbol::new_type("List", SymbolFlags::CLASS)
                .with_type_params(vec![TypeParamInfo::named("T")]),
        );
    });
    let int = comp.int();
    let target = comp.types.named_with(comp.well_known.ienumerable_t, vec![int]);
    let model = comp.model();

    assert_eq!(
        model.classify_constructible(target),
        ConstructibilityVerdict::NotConstructible
    );
}

// =============================================================================
// Type parameters
// =============================================================================

#[test]
fn test_type_parameter_constraint_matrix() {
    let mut comp = compile_with(|_, _, _| {});

    let mut new_enumerable = TypeParamInfo::named("T");
    new_enumerable.has_new_constraint = true;
    new_enumerable.has_enumerable_constraint = true;
    let t1 = comp.types.type_parameter(new_enumerable);

    let mut struct_enumerable = TypeParamInfo::named("U");
    struct_enumerable.is_struct_constrained = true;
    struct_enumerable.has_enumerable_constraint = true;
    let t2 = comp.types.type_parameter(struct_enumerable);

    let mut class_enumerable = TypeParamInfo::named("V");
    class_enumerable.is_reference_constrained = true;
    class_enumerable.has_enumerable_constraint = true;
    let t3 = comp.types.type_parameter(class_enumerable);

    let mut new_only = TypeParamInfo::named("W");
    new_only.has_new_constraint = true;
    let t4 = comp.types.type_parameter(new_only);

    let model = comp.model();
    assert_eq!(
        model.classify_constructible(t1),
        ConstructibilityVerdict::TypeParameterNew
    );
    // Struct constraint implies default construction without new().
    assert_eq!(
        model.classify_constructible(t2),
        ConstructibilityVerdict::TypeParameterNew
    );
    // Reference constraint without new() does not.
    assert_eq!(
        model.classify_constructible(t3),
        ConstructibilityVerdict::NotConstructible
    );
    // new() without the enumerable contract does not qualify either.
    assert_eq!(
        model.classify_constructible(t4),
        ConstructibilityVerdict::NotConstructible
    );
}

// =============================================================================
// Never-constructible targets
// =============================================================================

#[test]
fn test_object_and_dynamic_are_never_constructible() {
    let comp = compile_with(|_, _, _| {});
    let model = comp.model();

    for target in [TypeId::OBJECT, TypeId::DYNAMIC] {
        assert_eq!(
            model.classify_constructible(target),
            ConstructibilityVerdict::NotConstructible
        );
        let diagnostics = model.check_collection_literal(UnitId(0), Some(target), &empty_literal());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, diagnostic_codes::NOT_CONSTRUCTIBLE);
    }
}

#[test]
fn test_untargeted_literal_reports_no_natural_type() {
    let comp = compile_with(|_, _, _| {});
    let model = comp.model();

    let diagnostics = model.check_collection_literal(UnitId(0), None, &empty_literal());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, diagnostic_codes::NO_NATURAL_TYPE);
    assert_eq!(diagnostics[0].span(), empty_literal().span);
}

#[test]
fn test_spread_elements_do_not_rescue_an_untargeted_literal() {
    // Spread operands do not participate in target-type inference; the
    // conservative behavior reports the same no-natural-type error.
    let comp = compile_with(|_, _, _| {});
    let model = comp.model();

    let literal = CollectionLiteral::new(
        TextSpan::new(100, 12),
        vec![
            LiteralElement {
                kind: ElementKind::Spread,
                span: TextSpan::new(101, 8),
            },
            LiteralElement {
                kind: ElementKind::Expression,
                span: TextSpan::new(110, 1),
            },
        ],
    );
    assert!(literal.has_spread_elements());

    let diagnostics = model.check_collection_literal(UnitId(0), None, &literal);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, diagnostic_codes::NO_NATURAL_TYPE);
}

#[test]
fn test_enum_and_delegate_ignore_their_enumerable_contract() {
    // The narrow policy: even an enum or delegate nominally satisfying the
    // enumerable contract is not constructible.
    let mut comp = compile_with(|symbols, types, wk| {
        let enumerable = types.named(wk.ienumerable);
        let root = symbols.root();
        symbols.add_type(
            root,
            Symbol::new_type("Color", SymbolFlags::ENUM).with_interfaces(vec![enumerable]),
        );
        symbols.add_type(
            root,
            Symbol::new_type("Handler", SymbolFlags::DELEGATE).with_interfaces(vec![enumerable]),
        );
    });
    let color = comp.symbols.members_named(comp.symbols.root(), "Color")[0];
    let handler = comp.symbols.members_named(comp.symbols.root(), "Handler")[0];
    let color_ty = comp.types.named(color);
    let handler_ty = comp.types.named(handler);
    let model = comp.model();

    assert_eq!(
        model.classify_constructible(color_ty),
        ConstructibilityVerdict::NotConstructible
    );
    assert_eq!(
        model.classify_constructible(handler_ty),
        ConstructibilityVerdict::NotConstructible
    );
}

#[test]
fn test_nullable_wrapper_over_constructible_struct_is_not_constructible() {
    let mut comp = compile_with(|symbols, types, wk| {
        user_collection(symbols, types, wk, "ValueBag", SymbolFlags::STRUCT, None, true);
    });
    let bag = comp.symbols.members_named(comp.symbols.root(), "ValueBag")[0];
    let bag_ty = comp.types.named(bag);
    let nullable = comp.types.nullable(bag_ty);
    let model = comp.model();

    // The underlying struct is constructible; its nullable wrapper is not.
    assert_eq!(
        model.classify_constructible(bag_ty),
        ConstructibilityVerdict::CollectionInitializer
    );
    assert_eq!(
        model.classify_constructible(nullable),
        ConstructibilityVerdict::NotConstructible
    );
}

#[test]
fn test_pointer_and_function_pointer_are_not_constructible() {
    let mut comp = compile_with(|_, _, _| {});
    let int = comp.int();
    let pointer = comp.types.pointer(int);
    let fn_pointer = comp.types.intern(csz_symbols::TypeKey::FunctionPointer);
    let model = comp.model();

    assert_eq!(
        model.classify_constructible(pointer),
        ConstructibilityVerdict::NotConstructible
    );
    assert_eq!(
        model.classify_constructible(fn_pointer),
        ConstructibilityVerdict::NotConstructible
    );
}

#[test]
fn test_ref_like_struct_is_not_constructible_via_initializer() {
    let mut comp = compile_with(|symbols, types, wk| {
        user_collection(
            symbols,
            types,
            wk,
            "RefBag",
            SymbolFlags::STRUCT | SymbolFlags::REF_LIKE,
            None,
            true,
        );
    });
    let bag = comp.symbols.members_named(comp.symbols.root(), "RefBag")[0];
    let bag_ty = comp.types.named(bag);
    let model = comp.model();

    assert_eq!(
        model.classify_constructible(bag_ty),
        ConstructibilityVerdict::NotConstructible
    );
}

#[test]
fn test_error_sentinel_target_is_never_diagnosed() {
    let comp = compile_with(|_, _, _| {});
    let model = comp.model();

    let diagnostics =
        model.check_collection_literal(UnitId(0), Some(TypeId::ERROR), &empty_literal());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_classification_is_idempotent_and_thread_safe() {
    let mut comp = compile_with(|_, _, _| {});
    let int = comp.int();
    let array = comp.types.array(int, 1);
    let list = comp.types.named_with(comp.well_known.list_t, vec![int]);
    let rank2 = comp.types.array(int, 2);
    let model = comp.model();

    // Idempotent: the verdict is a pure function of the frozen tables.
    assert_eq!(
        model.classify_constructible(array),
        model.classify_constructible(array)
    );

    // Queries are pure reads and may run concurrently after the
    // declaration-collection pass froze the tables.
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(
                    model.classify_constructible(array),
                    ConstructibilityVerdict::Array
                );
                assert_eq!(
                    model.classify_constructible(list),
                    ConstructibilityVerdict::CollectionInitializer
                );
                assert_eq!(
                    model.classify_constructible(rank2),
                    ConstructibilityVerdict::NotConstructible
                );
            });
        }
    });
}
