//! The declaration-collection pass.
//!
//! One pass per unit collects extern aliases, using directives, and
//! namespace blocks into scope nodes; a merge step then installs every
//! global using directive into the single global scope in intrinsic source
//! order (unit name, then offset), so the outcome never depends on the
//! order units were listed in.

use tracing::{debug, trace};

use csz_common::diagnostics::{Diagnostic, diagnostic_codes, diagnostic_messages, format_message};
use csz_common::TextSpan;
use csz_symbols::{SymbolArena, SymbolId, TypeId, TypeInterner};
use csz_syntax::{NamePath, NamespaceDeclaration, SourceUnit, UnitId, UsingDirective, UsingKind};

use crate::alias_table::{AliasEntry, AliasTarget};
use crate::scopes::{Scope, ScopeArena, ScopeId, ScopeKind, ScopeTables, UsedNamespaceOrType, UsingTarget};

/// Bind a compilation's units into immutable scope tables.
///
/// Directive-placement diagnostics (misplaced or out-of-order global
/// usings, unresolvable targets) are produced here; alias-collision
/// diagnostics come from [`crate::validate_alias_declarations`].
pub fn bind_compilation(
    units: Vec<SourceUnit>,
    symbols: &mut SymbolArena,
    types: &mut TypeInterner,
) -> (ScopeTables, Vec<Diagnostic>) {
    let mut state = BinderState::new(symbols, types);
    for (index, unit) in units.iter().enumerate() {
        state.bind_source_unit(UnitId(index as u32), unit);
    }
    state.merge_global_usings();
    state.finish(units)
}

struct PendingGlobal {
    unit: UnitId,
    file: String,
    directive: UsingDirective,
}

struct BinderState<'a> {
    symbols: &'a mut SymbolArena,
    types: &'a mut TypeInterner,
    scopes: ScopeArena,
    global_scope: ScopeId,
    file_scopes: Vec<ScopeId>,
    diagnostics: Vec<Diagnostic>,
    pending_globals: Vec<PendingGlobal>,
}

enum PathResolution {
    Namespace(SymbolId),
    Type(TypeId),
    Error,
}

impl<'a> BinderState<'a> {
    fn new(symbols: &'a mut SymbolArena, types: &'a mut TypeInterner) -> Self {
        let mut scopes = ScopeArena::new();
        let global_scope = scopes.alloc(Scope::new(
            ScopeKind::Global,
            None,
            None,
            TextSpan::empty(0),
        ));
        Self {
            symbols,
            types,
            scopes,
            global_scope,
            file_scopes: Vec::new(),
            diagnostics: Vec::new(),
            pending_globals: Vec::new(),
        }
    }

    // =========================================================================
    // Per-unit collection
    // =========================================================================

    fn bind_source_unit(&mut self, unit_id: UnitId, unit: &SourceUnit) {
        debug!(file = %unit.file_name, "binding compilation unit");

        let root = self.symbols.root();
        let mut file_scope = Scope::new(
            ScopeKind::File,
            Some(self.global_scope),
            Some(unit_id),
            unit.span,
        );
        file_scope.namespace = Some(root);
        let file_scope = self.scopes.alloc(file_scope);
        self.file_scopes.push(file_scope);

        for ext in &unit.extern_aliases {
            let target = match self.symbols.find_assembly(&ext.name) {
                Some(assembly) => AliasTarget::Assembly(assembly),
                None => {
                    self.report_not_found(&unit.file_name, ext.span, &ext.name);
                    AliasTarget::Error
                }
            };
            let entry = AliasEntry {
                name: ext.name.clone(),
                target,
                unit: unit_id,
                span: ext.span,
                global: false,
                is_extern: true,
            };
            let scope = self.scopes.get_mut(file_scope);
            scope.alias_decls.push(entry.clone());
            scope.aliases.declare(entry);
        }

        let mut seen_non_global = false;
        for using in &unit.usings {
            if using.global {
                if seen_non_global {
                    self.diagnostics.push(Diagnostic::error(
                        unit.file_name.clone(),
                        using.span,
                        diagnostic_messages::GLOBAL_USING_OUT_OF_ORDER.to_string(),
                        diagnostic_codes::GLOBAL_USING_OUT_OF_ORDER,
                    ));
                }
                // Still takes effect as a global using.
                self.pending_globals.push(PendingGlobal {
                    unit: unit_id,
                    file: unit.file_name.clone(),
                    directive: using.clone(),
                });
            } else {
                seen_non_global = true;
                self.install_using(file_scope, unit_id, &unit.file_name, using, &[root]);
            }
        }

        for namespace in &unit.namespaces {
            self.bind_namespace(unit_id, &unit.file_name, file_scope, root, namespace);
        }
    }

    fn bind_namespace(
        &mut self,
        unit_id: UnitId,
        file: &str,
        parent_scope: ScopeId,
        parent_namespace: SymbolId,
        decl: &NamespaceDeclaration,
    ) {
        let mut ns_symbol = parent_namespace;
        for segment in &decl.name.segments {
            ns_symbol = self.symbols.namespace(ns_symbol, &segment.name);
        }

        let mut scope = Scope::new(
            ScopeKind::Namespace,
            Some(parent_scope),
            Some(unit_id),
            decl.body_span,
        );
        scope.namespace = Some(ns_symbol);
        let scope = self.scopes.alloc(scope);

        // Enclosing namespaces, innermost first, for target resolution.
        let mut context = Vec::new();
        let mut current = Some(ns_symbol);
        while let Some(id) = current {
            context.push(id);
            current = self.symbols.get(id).parent;
        }

        for using in &decl.usings {
            if using.global {
                // Hard error; the directive is not installed in any scope.
                self.diagnostics.push(Diagnostic::error(
                    file.to_string(),
                    using.span,
                    diagnostic_messages::GLOBAL_USING_IN_NAMESPACE.to_string(),
                    diagnostic_codes::GLOBAL_USING_IN_NAMESPACE,
                ));
                continue;
            }
            self.install_using(scope, unit_id, file, using, &context);
        }

        for nested in &decl.nested {
            self.bind_namespace(unit_id, file, scope, ns_symbol, nested);
        }
    }

    // =========================================================================
    // Directive installation
    // =========================================================================

    fn install_using(
        &mut self,
        scope: ScopeId,
        unit: UnitId,
        file: &str,
        directive: &UsingDirective,
        context: &[SymbolId],
    ) {
        match &directive.kind {
            UsingKind::Namespace(path) => {
                let target = match self.resolve_path(unit, file, directive.span, path, context) {
                    PathResolution::Namespace(ns) => UsingTarget::Namespace(ns),
                    PathResolution::Type(_) => {
                        // A plain using must name a namespace.
                        self.report_not_found(file, directive.span, &path.to_string());
                        UsingTarget::Error
                    }
                    PathResolution::Error => UsingTarget::Error,
                };
                trace!(target = %path, "using namespace installed");
                self.scopes.get_mut(scope).usings.push(UsedNamespaceOrType {
                    target,
                    is_static: false,
                    global: directive.global,
                    unit,
                    span: directive.span,
                    display: path.to_string(),
                });
            }
            UsingKind::Static(path) => {
                let target = match self.resolve_path(unit, file, directive.span, path, context) {
                    PathResolution::Type(ty) => UsingTarget::Type(ty),
                    PathResolution::Namespace(_) => {
                        // using static must name a type.
                        self.report_not_found(file, directive.span, &path.to_string());
                        UsingTarget::Error
                    }
                    PathResolution::Error => UsingTarget::Error,
                };
                self.scopes.get_mut(scope).usings.push(UsedNamespaceOrType {
                    target,
                    is_static: true,
                    global: directive.global,
                    unit,
                    span: directive.span,
                    display: path.to_string(),
                });
            }
            UsingKind::Alias { name, target } => {
                let resolved = match self.resolve_path(unit, file, directive.span, target, context)
                {
                    PathResolution::Namespace(ns) => AliasTarget::Namespace(ns),
                    PathResolution::Type(ty) => AliasTarget::Type(ty),
                    PathResolution::Error => AliasTarget::Error,
                };
                let entry = AliasEntry {
                    name: name.clone(),
                    target: resolved,
                    unit,
                    span: directive.span,
                    global: directive.global,
                    is_extern: false,
                };
                trace!(alias = %name, "alias installed");
                let scope = self.scopes.get_mut(scope);
                scope.alias_decls.push(entry.clone());
                scope.aliases.declare(entry);
            }
        }
    }

    /// Install the collected global usings into the global scope in
    /// intrinsic source order so first-wins resolution is independent of
    /// unit listing order.
    fn merge_global_usings(&mut self) {
        let mut pending = std::mem::take(&mut self.pending_globals);
        pending.sort_by(|a, b| {
            (a.file.as_str(), a.directive.span.start).cmp(&(b.file.as_str(), b.directive.span.start))
        });
        let root = self.symbols.root();
        for global in pending {
            let mut directive = global.directive;
            directive.global = true;
            self.install_using(self.global_scope, global.unit, &global.file, &directive, &[root]);
        }
    }

    // =========================================================================
    // Target resolution
    // =========================================================================

    fn resolve_path(
        &mut self,
        unit: UnitId,
        file: &str,
        span: TextSpan,
        path: &NamePath,
        context: &[SymbolId],
    ) -> PathResolution {
        if path.segments.len() > csz_common::limits::MAX_QUALIFIED_NAME_DEPTH {
            self.report_not_found(file, span, &path.to_string());
            return PathResolution::Error;
        }
        if let Some(qualifier) = &path.alias_qualifier {
            let start = {
                let file_scope = self.scopes.get(self.file_scopes[unit.index()]);
                match file_scope.aliases.get(qualifier).map(|e| e.target) {
                    Some(AliasTarget::Assembly(assembly)) => {
                        Some(self.symbols.assembly_root(assembly))
                    }
                    Some(AliasTarget::Namespace(ns)) => Some(ns),
                    Some(AliasTarget::Type(_)) => {
                        self.report_not_found(file, span, &path.to_string());
                        return PathResolution::Error;
                    }
                    Some(AliasTarget::Error) => return PathResolution::Error,
                    None => {
                        self.diagnostics.push(Diagnostic::error(
                            file.to_string(),
                            span,
                            format_message(diagnostic_messages::ALIAS_NOT_FOUND, &[qualifier]),
                            diagnostic_codes::ALIAS_NOT_FOUND,
                        ));
                        return PathResolution::Error;
                    }
                }
            };
            if let Some(start) = start
                && let Some(resolution) = self.resolve_from(start, unit, file, span, path)
            {
                return resolution;
            }
            self.report_not_found(file, span, &path.to_string());
            return PathResolution::Error;
        }

        for &start in context {
            if let Some(resolution) = self.resolve_from(start, unit, file, span, path) {
                return resolution;
            }
        }
        self.report_not_found(file, span, &path.to_string());
        PathResolution::Error
    }

    /// Resolve a path's segments starting at `start`. Returns `None` when
    /// the first segment is not found there (the caller tries the next
    /// enclosing context); once the first segment resolves, failures commit
    /// to this context and report.
    fn resolve_from(
        &mut self,
        start: SymbolId,
        unit: UnitId,
        file: &str,
        span: TextSpan,
        path: &NamePath,
    ) -> Option<PathResolution> {
        let mut current = start;
        for (index, segment) in path.segments.iter().enumerate() {
            let candidates = self.symbols.members_named(current, &segment.name);
            let arity = segment.type_args.len();
            let found = candidates.iter().copied().find(|&id| {
                let sym = self.symbols.get(id);
                if sym.is_namespace() {
                    arity == 0
                } else {
                    sym.is_type() && sym.type_params.len() == arity
                }
            });
            let Some(found) = found else {
                if index == 0 {
                    return None;
                }
                self.report_not_found(file, span, &segment.name);
                return Some(PathResolution::Error);
            };

            let is_last = index + 1 == path.segments.len();
            if is_last {
                let sym = self.symbols.get(found);
                if sym.is_namespace() {
                    return Some(PathResolution::Namespace(found));
                }
                let args: Vec<TypeId> = segment
                    .type_args
                    .iter()
                    .map(|arg| self.resolve_type_arg(unit, file, span, arg))
                    .collect();
                return Some(PathResolution::Type(self.types.named_with(found, args)));
            }
            current = found;
        }
        None
    }

    fn resolve_type_arg(
        &mut self,
        unit: UnitId,
        file: &str,
        span: TextSpan,
        arg: &NamePath,
    ) -> TypeId {
        let root = self.symbols.root();
        match self.resolve_path(unit, file, span, arg, &[root]) {
            PathResolution::Type(ty) => ty,
            PathResolution::Namespace(_) => {
                self.report_not_found(file, span, &arg.to_string());
                TypeId::ERROR
            }
            PathResolution::Error => TypeId::ERROR,
        }
    }

    fn report_not_found(&mut self, file: &str, span: TextSpan, name: &str) {
        self.diagnostics.push(Diagnostic::error(
            file.to_string(),
            span,
            format_message(diagnostic_messages::TYPE_OR_NAMESPACE_NOT_FOUND, &[name]),
            diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND,
        ));
    }

    fn finish(mut self, units: Vec<SourceUnit>) -> (ScopeTables, Vec<Diagnostic>) {
        self.diagnostics
            .sort_by(|a, b| (&a.file, a.start, a.code).cmp(&(&b.file, b.start, b.code)));
        let tables = ScopeTables {
            scopes: self.scopes,
            global_scope: self.global_scope,
            file_scopes: self.file_scopes,
            units,
        };
        (tables, self.diagnostics)
    }
}
