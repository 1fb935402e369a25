//! The semantic-model facade over the binder's immutable tables.

use csz_binder::ScopeTables;
use csz_common::diagnostics::{Diagnostic, diagnostic_codes};
use csz_symbols::{Accessibility, ConstructorInfo, MethodInfo, SymbolArena, SymbolId, TypeInterner, WellKnown};

/// Behavioral options for semantic-model queries.
#[derive(Copy, Clone, Debug)]
pub struct SemanticOptions {
    /// Suppress accessibility filtering in member, constructor, and
    /// static-import lookup, the way a semantic model created for tooling
    /// can ignore accessibility.
    pub ignore_accessibility: bool,
    /// Whether `validate_alias_declarations` includes the non-fatal
    /// redundant-using findings.
    pub report_redundant_usings: bool,
}

impl Default for SemanticOptions {
    fn default() -> Self {
        Self {
            ignore_accessibility: false,
            report_redundant_usings: true,
        }
    }
}

/// Read-only query surface over one compilation's frozen tables.
///
/// All queries take `&self`, return their diagnostics, and may be issued
/// at arbitrary positions in any order from any number of threads.
pub struct SemanticModel<'a> {
    pub tables: &'a ScopeTables,
    pub symbols: &'a SymbolArena,
    pub types: &'a TypeInterner,
    pub well_known: &'a WellKnown,
    pub options: SemanticOptions,
}

impl<'a> SemanticModel<'a> {
    #[must_use]
    pub fn new(
        tables: &'a ScopeTables,
        symbols: &'a SymbolArena,
        types: &'a TypeInterner,
        well_known: &'a WellKnown,
        options: SemanticOptions,
    ) -> Self {
        Self {
            tables,
            symbols,
            types,
            well_known,
            options,
        }
    }

    /// Run alias-collision validation over the whole compilation.
    #[must_use]
    pub fn validate_alias_declarations(&self) -> Vec<Diagnostic> {
        let mut diagnostics = csz_binder::validate_alias_declarations(self.tables);
        if !self.options.report_redundant_usings {
            diagnostics.retain(|d| d.code != diagnostic_codes::REDUNDANT_USING);
        }
        diagnostics
    }

    pub(crate) fn symbol_accessible(&self, symbol: SymbolId) -> bool {
        self.options.ignore_accessibility || self.symbols.accessible_in_source(symbol)
    }

    pub(crate) fn member_accessibility_ok(&self, accessibility: Accessibility) -> bool {
        self.options.ignore_accessibility
            || matches!(accessibility, Accessibility::Public | Accessibility::Internal)
    }

    pub(crate) fn constructor_accessible(&self, ctor: &ConstructorInfo) -> bool {
        self.member_accessibility_ok(ctor.accessibility)
    }

    pub(crate) fn method_accessible(&self, method: &MethodInfo) -> bool {
        self.member_accessibility_ok(method.accessibility)
    }
}
