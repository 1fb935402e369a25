//! Collection-literal constructibility classification.
//!
//! `classify_constructible` is a pure function of the target type and the
//! symbol tables: the same target always yields the same verdict. The
//! rules run in a fixed order over the closed set of target shapes; a
//! non-constructible outcome surfaces as a single diagnostic at the
//! literal's span, naming the target type.

use csz_common::TextSpan;
use csz_common::diagnostics::{Diagnostic, diagnostic_codes, diagnostic_messages, format_message};
use csz_symbols::{SymbolFlags, SymbolId, TargetShape, TypeId, classify_target, display_type};
use csz_syntax::UnitId;

use crate::semantic_model::SemanticModel;

/// How a collection literal may convert to its target, if at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConstructibilityVerdict {
    /// Element-wise single-dimensional array allocation.
    Array,
    /// Intermediate buffer wrapped by the span constructor.
    Span,
    /// Default-construct then append through an `Add`-shaped member.
    CollectionInitializer,
    /// Well-known collection interface backed by the list type.
    InterfaceBackedByList,
    /// Type parameter constructible through its `new()`/struct constraint.
    TypeParameterNew,
    NotConstructible,
}

/// Element kind in a collection literal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// Regular element expression.
    Expression,
    /// Spread element: `[.. items]`.
    Spread,
}

/// An element of a collection literal.
#[derive(Copy, Clone, Debug)]
pub struct LiteralElement {
    pub kind: ElementKind,
    pub span: TextSpan,
}

/// A bracketed collection literal at some source position.
#[derive(Clone, Debug)]
pub struct CollectionLiteral {
    pub elements: Vec<LiteralElement>,
    pub span: TextSpan,
}

impl CollectionLiteral {
    #[must_use]
    pub fn new(span: TextSpan, elements: Vec<LiteralElement>) -> Self {
        Self { elements, span }
    }

    #[must_use]
    pub fn empty(span: TextSpan) -> Self {
        Self {
            elements: Vec::new(),
            span,
        }
    }

    #[must_use]
    pub fn has_spread_elements(&self) -> bool {
        self.elements.iter().any(|e| e.kind == ElementKind::Spread)
    }
}

// =============================================================================
// Constructibility Classification
// =============================================================================

impl<'a> SemanticModel<'a> {
    /// Classify whether `target` can receive a collection literal.
    ///
    /// Pure with respect to the frozen tables; reclassifying the same
    /// target always yields the same verdict.
    #[must_use]
    pub fn classify_constructible(&self, target: TypeId) -> ConstructibilityVerdict {
        match classify_target(self.types, self.symbols, self.well_known, target) {
            // Rule 1: single-dimensional arrays only.
            TargetShape::Array { rank: 1, .. } => ConstructibilityVerdict::Array,
            TargetShape::Array { .. } => ConstructibilityVerdict::NotConstructible,

            // Rule 2: span shapes, contingent on the wrapping constructor.
            TargetShape::Span { .. } | TargetShape::ReadOnlySpan { .. } => {
                let symbol = self.span_symbol(target);
                if self.has_wrapping_constructor(symbol) {
                    ConstructibilityVerdict::Span
                } else {
                    ConstructibilityVerdict::NotConstructible
                }
            }

            // Rule 3: enumerable contract + no-arg constructor + Add member.
            // Ref-like structs cannot implement the contract's interfaces,
            // so they fall through to not-constructible.
            TargetShape::NamedType { symbol, .. } => {
                let sym = self.symbols.get(symbol);
                if !sym.flags.contains(SymbolFlags::REF_LIKE)
                    && self
                        .well_known
                        .satisfies_enumerable_contract(self.symbols, self.types, target)
                    && self.has_no_arg_constructor(symbol)
                    && self.has_add_member(symbol)
                {
                    ConstructibilityVerdict::CollectionInitializer
                } else {
                    ConstructibilityVerdict::NotConstructible
                }
            }

            // Rule 4: only the fixed set of well-known collection
            // interfaces, and only when the list backing is unambiguous.
            // Arbitrary user interfaces are not constructible even when an
            // Add-capable implementer exists.
            TargetShape::Interface { symbol, .. } => {
                if self.well_known.is_collection_interface(symbol)
                    && self.well_known.resolve_list_backing(self.symbols).is_some()
                {
                    ConstructibilityVerdict::InterfaceBackedByList
                } else {
                    ConstructibilityVerdict::NotConstructible
                }
            }

            // Rule 5: type parameters through their constraints. Struct
            // constraints imply default construction without `new()`;
            // reference constraints do not.
            TargetShape::TypeParameter(info) => {
                if info.has_enumerable_constraint
                    && (info.has_new_constraint || info.is_struct_constrained)
                {
                    ConstructibilityVerdict::TypeParameterNew
                } else {
                    ConstructibilityVerdict::NotConstructible
                }
            }

            // Rule 6: everything else. Enum and delegate targets ignore
            // their own enumerable-contract satisfaction; the narrow policy
            // is deliberate.
            TargetShape::Enum { .. }
            | TargetShape::Delegate { .. }
            | TargetShape::Nullable { .. }
            | TargetShape::Pointer
            | TargetShape::FunctionPointer
            | TargetShape::Dynamic
            | TargetShape::ObjectType
            | TargetShape::Error => ConstructibilityVerdict::NotConstructible,
        }
    }

    /// Check a literal against its conversion target and report failures.
    ///
    /// `target` is `None` when the literal has no target type (`var` and
    /// friends); that is the distinct no-natural-type error, not a
    /// not-constructible one, regardless of the literal's elements.
    #[must_use]
    pub fn check_collection_literal(
        &self,
        unit: UnitId,
        target: Option<TypeId>,
        literal: &CollectionLiteral,
    ) -> Vec<Diagnostic> {
        let file = self.tables.unit_name(unit);

        let Some(target) = target else {
            return vec![Diagnostic::error(
                file.to_string(),
                literal.span,
                diagnostic_messages::NO_NATURAL_TYPE.to_string(),
                diagnostic_codes::NO_NATURAL_TYPE,
            )];
        };

        if target == TypeId::ERROR {
            return Vec::new();
        }

        if self.classify_constructible(target) != ConstructibilityVerdict::NotConstructible {
            return Vec::new();
        }

        // A span shape that failed classification is missing its wrapping
        // constructor; that is a missing-member condition, not an ordinary
        // not-constructible target.
        match classify_target(self.types, self.symbols, self.well_known, target) {
            TargetShape::Span { .. } | TargetShape::ReadOnlySpan { .. } => {
                let symbol = self.span_symbol(target);
                vec![Diagnostic::error(
                    file.to_string(),
                    literal.span,
                    format_message(
                        diagnostic_messages::MISSING_REQUIRED_MEMBER,
                        &[&self.symbols.fully_qualified_name(symbol), "ctor"],
                    ),
                    diagnostic_codes::MISSING_REQUIRED_MEMBER,
                )]
            }
            _ => vec![Diagnostic::error(
                file.to_string(),
                literal.span,
                format_message(
                    diagnostic_messages::NOT_CONSTRUCTIBLE,
                    &[&display_type(self.types, self.symbols, target)],
                ),
                diagnostic_codes::NOT_CONSTRUCTIBLE,
            )],
        }
    }

    // =========================================================================
    // Member shape checks
    // =========================================================================

    fn span_symbol(&self, target: TypeId) -> SymbolId {
        match self.types.key(target) {
            csz_symbols::TypeKey::Named { symbol, .. } => *symbol,
            _ => self.well_known.span_t,
        }
    }

    fn has_wrapping_constructor(&self, symbol: SymbolId) -> bool {
        self.symbols
            .get(symbol)
            .constructors
            .iter()
            .any(|c| c.required_params == 1 && self.constructor_accessible(c))
    }

    fn has_no_arg_constructor(&self, symbol: SymbolId) -> bool {
        let sym = self.symbols.get(symbol);
        // Structs always have an implicit default construction path.
        if sym.is_value_type() {
            return true;
        }
        sym.constructors
            .iter()
            .any(|c| c.callable_with_no_args() && self.constructor_accessible(c))
    }

    /// An applicable `Add`-shaped member: an accessible instance method
    /// named `Add` taking one required argument, on the type or an
    /// ancestor.
    fn has_add_member(&self, symbol: SymbolId) -> bool {
        let mut current = Some(symbol);
        let mut depth = 0;
        while let Some(id) = current {
            depth += 1;
            if depth > csz_common::limits::MAX_INHERITANCE_WALK {
                return false;
            }
            let sym = self.symbols.get(id);
            if sym.methods.iter().any(|m| {
                m.name == "Add"
                    && !m.is_static
                    && m.required_params == 1
                    && self.method_accessible(m)
            }) {
                return true;
            }
            current = sym.base_type.and_then(|base| match self.types.key(base) {
                csz_symbols::TypeKey::Named { symbol, .. } => Some(*symbol),
                _ => None,
            });
        }
        false
    }
}
