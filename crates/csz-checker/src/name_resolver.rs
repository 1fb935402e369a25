//! Identifier, alias, and qualified-name resolution.
//!
//! Resolution walks the scope chain innermost to outermost. Within one
//! scope the search order is: the enclosing namespace's declarations, then
//! the scope's aliases, then the contributions of its using directives.
//! The first tier that produces a candidate decides; two or more distinct
//! candidates at that tier are an ambiguity, never a silent pick. Every
//! failure is local to the reference being resolved.

use smallvec::SmallVec;
use tracing::trace;

use csz_binder::{AliasEntry, AliasTarget, UsingTarget};
use csz_common::TextSpan;
use csz_common::diagnostics::{Diagnostic, diagnostic_codes, diagnostic_messages, format_message};
use csz_symbols::{SymbolId, TypeId, TypeKey, check_type_args, display_type};
use csz_syntax::{NamePath, UnitId};

use crate::semantic_model::SemanticModel;

/// What a name resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedTarget {
    Namespace(SymbolId),
    /// A named type symbol found by declaration or using-directive lookup.
    TypeSymbol(SymbolId),
    /// An interned type reached through an alias.
    Type(TypeId),
    /// Error sentinel; downstream consumers do not re-diagnose it.
    Error,
}

/// Result of resolving one reference.
#[derive(Clone, Debug)]
pub struct ResolutionResult {
    pub target: ResolvedTarget,
    /// All equally-ranked candidates when `ambiguous` is set.
    pub candidates: SmallVec<[ResolvedTarget; 2]>,
    pub ambiguous: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolutionResult {
    fn resolved(target: ResolvedTarget) -> Self {
        Self {
            candidates: SmallVec::from_iter([target.clone()]),
            target,
            ambiguous: false,
            diagnostics: Vec::new(),
        }
    }

    fn resolved_with(target: ResolvedTarget, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            candidates: SmallVec::from_iter([target.clone()]),
            target,
            ambiguous: false,
            diagnostics,
        }
    }

    fn error_with(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            target: ResolvedTarget::Error,
            candidates: SmallVec::new(),
            ambiguous: false,
            diagnostics,
        }
    }

    fn ambiguous_with(
        candidates: SmallVec<[ResolvedTarget; 2]>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            target: ResolvedTarget::Error,
            candidates,
            ambiguous: true,
            diagnostics,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.target, ResolvedTarget::Error)
    }
}

/// Result of `resolve_alias`.
#[derive(Clone, Debug)]
pub struct AliasResolution {
    pub entry: Option<AliasEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// A static-import or extension member candidate.
#[derive(Clone, Debug)]
pub struct MethodCandidate {
    pub container: SymbolId,
    pub method: csz_symbols::MethodInfo,
}

/// Result of `resolve_invocation`.
#[derive(Clone, Debug)]
pub struct InvocationResult {
    pub candidates: Vec<MethodCandidate>,
    pub ambiguous: bool,
    pub diagnostics: Vec<Diagnostic>,
}

// =============================================================================
// Resolution Methods
// =============================================================================

impl<'a> SemanticModel<'a> {
    /// Resolve a bare identifier at a position.
    #[must_use]
    pub fn resolve_identifier(&self, unit: UnitId, position: u32, name: &str) -> ResolutionResult {
        trace!(name, "resolving identifier");
        let file = self.tables.unit_name(unit);
        let span = TextSpan::empty(position);

        for &scope_id in &self.tables.scopes_at(unit, position) {
            let scope = self.tables.scopes.get(scope_id);

            // (a) enclosing namespace declarations
            if let Some(ns) = scope.namespace {
                let members = self.accessible_members(ns, name, false);
                if let Some(result) = self.decide(file, span, name, members) {
                    return result;
                }
            }

            // (b) aliases; extern aliases are reachable only through `::`
            if let Some(entry) = scope.aliases.get(name)
                && !entry.is_extern
            {
                return self.alias_use_result(entry);
            }

            // (c) used namespaces and static-import targets
            let mut found: SmallVec<[SymbolId; 2]> = SmallVec::new();
            for using in &scope.usings {
                let container = match using.target {
                    UsingTarget::Namespace(ns) => ns,
                    UsingTarget::Type(ty) => match self.types.key(ty) {
                        TypeKey::Named { symbol, .. } => *symbol,
                        _ => continue,
                    },
                    UsingTarget::Error => continue,
                };
                for member in self.accessible_members(container, name, true) {
                    if !found.contains(&member) {
                        found.push(member);
                    }
                }
            }
            if let Some(result) = self.decide(file, span, name, found) {
                return result;
            }
        }

        ResolutionResult::error_with(vec![Diagnostic::error(
            file.to_string(),
            span,
            format_message(diagnostic_messages::TYPE_OR_NAMESPACE_NOT_FOUND, &[name]),
            diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND,
        )])
    }

    /// Resolve an alias name at a position, extern aliases included.
    #[must_use]
    pub fn resolve_alias(&self, unit: UnitId, position: u32, name: &str) -> AliasResolution {
        for &scope_id in &self.tables.scopes_at(unit, position) {
            if let Some(entry) = self.tables.scopes.get(scope_id).aliases.get(name) {
                return AliasResolution {
                    entry: Some(entry.clone()),
                    diagnostics: Vec::new(),
                };
            }
        }
        AliasResolution {
            entry: None,
            diagnostics: vec![Diagnostic::error(
                self.tables.unit_name(unit).to_string(),
                TextSpan::empty(position),
                format_message(diagnostic_messages::ALIAS_NOT_FOUND, &[name]),
                diagnostic_codes::ALIAS_NOT_FOUND,
            )],
        }
    }

    /// Resolve a possibly alias-qualified dotted name at a position.
    #[must_use]
    pub fn resolve_qualified_name(
        &self,
        unit: UnitId,
        position: u32,
        path: &NamePath,
    ) -> ResolutionResult {
        let file = self.tables.unit_name(unit);
        let span = TextSpan::empty(position);

        let (mut current, rest) = if let Some(qualifier) = &path.alias_qualifier {
            let alias = self.resolve_alias(unit, position, qualifier);
            let Some(entry) = alias.entry else {
                return ResolutionResult::error_with(alias.diagnostics);
            };
            let start = match entry.target {
                AliasTarget::Assembly(assembly) => {
                    ResolvedTarget::Namespace(self.symbols.assembly_root(assembly))
                }
                AliasTarget::Namespace(ns) => ResolvedTarget::Namespace(ns),
                AliasTarget::Type(_) => {
                    // An alias qualifier must name a namespace or assembly.
                    return ResolutionResult::error_with(vec![self.not_found(
                        file,
                        span,
                        &path.to_string(),
                    )]);
                }
                AliasTarget::Error => return ResolutionResult::error_with(Vec::new()),
            };
            (start, &path.segments[..])
        } else {
            let first = match path.segments.first() {
                Some(seg) => seg,
                None => return ResolutionResult::error_with(Vec::new()),
            };
            let result = self.resolve_identifier(unit, position, &first.name);
            if result.is_error() {
                return result;
            }
            (result.target, &path.segments[1..])
        };

        for segment in rest {
            let container = match current {
                ResolvedTarget::Namespace(ns) => ns,
                ResolvedTarget::TypeSymbol(symbol) => symbol,
                ResolvedTarget::Type(ty) => match self.types.key(ty) {
                    TypeKey::Named { symbol, .. } => *symbol,
                    _ => {
                        return ResolutionResult::error_with(vec![self.not_found(
                            file,
                            span,
                            &segment.name,
                        )]);
                    }
                },
                ResolvedTarget::Error => return ResolutionResult::error_with(Vec::new()),
            };
            let members = self.accessible_members(container, &segment.name, false);
            match self.decide(file, span, &segment.name, members) {
                Some(result) if result.ambiguous || result.is_error() => return result,
                Some(result) => current = result.target,
                None => {
                    return ResolutionResult::error_with(vec![self.not_found(
                        file,
                        span,
                        &segment.name,
                    )]);
                }
            }
        }

        ResolutionResult::resolved(current)
    }

    /// Resolve an invocable name against static imports and extension
    /// methods. Two or more applicable members at one scope tier are an
    /// ambiguous call, a distinct error kind from an ambiguous reference.
    #[must_use]
    pub fn resolve_invocation(
        &self,
        unit: UnitId,
        position: u32,
        name: &str,
        arg_count: usize,
    ) -> InvocationResult {
        let file = self.tables.unit_name(unit);
        let span = TextSpan::empty(position);

        for &scope_id in &self.tables.scopes_at(unit, position) {
            let scope = self.tables.scopes.get(scope_id);
            let mut candidates: Vec<MethodCandidate> = Vec::new();

            for using in &scope.usings {
                match using.target {
                    UsingTarget::Type(ty) if using.is_static => {
                        if let TypeKey::Named { symbol, .. } = self.types.key(ty) {
                            self.collect_static_members(*symbol, name, arg_count, &mut candidates);
                        }
                    }
                    UsingTarget::Namespace(ns) if !using.is_static => {
                        self.collect_extension_members(ns, name, arg_count, &mut candidates);
                    }
                    _ => {}
                }
            }

            match candidates.len() {
                0 => {}
                1 => {
                    return InvocationResult {
                        candidates,
                        ambiguous: false,
                        diagnostics: Vec::new(),
                    };
                }
                _ => {
                    let first = format!(
                        "{}.{}",
                        self.symbols.fully_qualified_name(candidates[0].container),
                        name
                    );
                    let second = format!(
                        "{}.{}",
                        self.symbols.fully_qualified_name(candidates[1].container),
                        name
                    );
                    let diagnostic = Diagnostic::error(
                        file.to_string(),
                        span,
                        format_message(diagnostic_messages::AMBIGUOUS_CALL, &[&first, &second]),
                        diagnostic_codes::AMBIGUOUS_CALL,
                    );
                    return InvocationResult {
                        candidates,
                        ambiguous: true,
                        diagnostics: vec![diagnostic],
                    };
                }
            }
        }

        InvocationResult {
            candidates: Vec::new(),
            ambiguous: false,
            diagnostics: vec![self.not_found(file, span, name)],
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Accessible members of a container with the given name. With
    /// `types_only`, child namespaces are excluded (using directives import
    /// types, not namespaces).
    fn accessible_members(
        &self,
        container: SymbolId,
        name: &str,
        types_only: bool,
    ) -> SmallVec<[SymbolId; 2]> {
        self.symbols
            .members_named(container, name)
            .into_iter()
            .filter(|&m| {
                let sym = self.symbols.get(m);
                let kind_ok = if types_only {
                    sym.is_type()
                } else {
                    sym.is_type() || sym.is_namespace()
                };
                kind_ok && self.symbol_accessible(m)
            })
            .collect()
    }

    /// Turn a candidate set into a result: `None` for empty (continue the
    /// walk), resolved for one, ambiguous-reference for several.
    fn decide(
        &self,
        file: &str,
        span: TextSpan,
        name: &str,
        members: SmallVec<[SymbolId; 2]>,
    ) -> Option<ResolutionResult> {
        match members.as_slice() {
            [] => None,
            [single] => Some(ResolutionResult::resolved(self.symbol_target(*single))),
            [first, second, ..] => {
                let diagnostic = Diagnostic::error(
                    file.to_string(),
                    span,
                    format_message(
                        diagnostic_messages::AMBIGUOUS_REFERENCE,
                        &[
                            name,
                            &self.symbols.fully_qualified_name(*first),
                            &self.symbols.fully_qualified_name(*second),
                        ],
                    ),
                    diagnostic_codes::AMBIGUOUS_REFERENCE,
                );
                let candidates = members.iter().map(|&m| self.symbol_target(m)).collect();
                Some(ResolutionResult::ambiguous_with(
                    candidates,
                    vec![diagnostic],
                ))
            }
        }
    }

    fn symbol_target(&self, symbol: SymbolId) -> ResolvedTarget {
        if self.symbols.get(symbol).is_namespace() {
            ResolvedTarget::Namespace(symbol)
        } else {
            ResolvedTarget::TypeSymbol(symbol)
        }
    }

    /// Resolution through a using alias. A target that violates its
    /// generic constraints resolved at declaration time; the violation is
    /// reported here, at the first use, located at the declaration's span.
    fn alias_use_result(&self, entry: &AliasEntry) -> ResolutionResult {
        match entry.target {
            AliasTarget::Namespace(ns) => {
                ResolutionResult::resolved(ResolvedTarget::Namespace(ns))
            }
            AliasTarget::Type(ty) => {
                let mut diagnostics = Vec::new();
                if let TypeKey::Named { symbol, args } = self.types.key(ty)
                    && let Err(violation) = check_type_args(self.types, self.symbols, *symbol, args)
                {
                    diagnostics.push(Diagnostic::error(
                        self.tables.unit_name(entry.unit).to_string(),
                        entry.span,
                        format_message(
                            diagnostic_messages::CONSTRAINT_NOT_SATISFIED,
                            &[
                                &display_type(self.types, self.symbols, violation.argument),
                                &violation.param_name,
                            ],
                        ),
                        diagnostic_codes::CONSTRAINT_NOT_SATISFIED,
                    ));
                }
                ResolutionResult::resolved_with(ResolvedTarget::Type(ty), diagnostics)
            }
            // Extern entries are filtered out before this point.
            AliasTarget::Assembly(_) | AliasTarget::Error => {
                ResolutionResult::error_with(Vec::new())
            }
        }
    }

    fn not_found(&self, file: &str, span: TextSpan, name: &str) -> Diagnostic {
        Diagnostic::error(
            file.to_string(),
            span,
            format_message(diagnostic_messages::TYPE_OR_NAMESPACE_NOT_FOUND, &[name]),
            diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND,
        )
    }

    fn collect_static_members(
        &self,
        container: SymbolId,
        name: &str,
        arg_count: usize,
        candidates: &mut Vec<MethodCandidate>,
    ) {
        for method in &self.symbols.get(container).methods {
            if method.is_static
                && method.name == name
                && self.method_accessible(method)
                && (method.required_params as usize) <= arg_count
                && !candidates
                    .iter()
                    .any(|c| c.container == container && c.method == *method)
            {
                candidates.push(MethodCandidate {
                    container,
                    method: method.clone(),
                });
            }
        }
    }

    fn collect_extension_members(
        &self,
        namespace: SymbolId,
        name: &str,
        arg_count: usize,
        candidates: &mut Vec<MethodCandidate>,
    ) {
        for ids in self.symbols.get(namespace).members.values() {
            for &type_id in ids {
                let sym = self.symbols.get(type_id);
                if !sym.is_type() {
                    continue;
                }
                for method in &sym.methods {
                    // The extension receiver consumes the first parameter.
                    if method.is_extension
                        && method.name == name
                        && self.method_accessible(method)
                        && (method.required_params.saturating_sub(1) as usize) <= arg_count
                        && !candidates
                            .iter()
                            .any(|c| c.container == type_id && c.method == *method)
                    {
                        candidates.push(MethodCandidate {
                            container: type_id,
                            method: method.clone(),
                        });
                    }
                }
            }
        }
    }
}
