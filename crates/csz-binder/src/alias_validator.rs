//! Alias-collision validation across the compilation.
//!
//! Collision rules:
//! - extern alias vs extern alias, anywhere in the compilation;
//! - global alias vs global alias (the merged global scope);
//! - extern alias vs global alias of the same name;
//! - file/namespace alias vs any alias visible in its own chain, except
//!   that a global alias declared in a different unit is shadowed, not
//!   collided with;
//! - using-static directives with an identical resolved type;
//! - a non-alias using directive never collides with an alias; duplicating
//!   a global using's resolved target is the softer redundant finding.
//!
//! Every report is placed at the second-in-source-order declaration of the
//! pair, ordered by the intrinsic key (unit name, byte offset) so outcomes
//! do not depend on unit listing order.

use rustc_hash::FxHashMap;

use csz_common::diagnostics::{Diagnostic, diagnostic_codes, diagnostic_messages, format_message};

use crate::alias_table::AliasEntry;
use crate::scopes::{ScopeKind, ScopeTables, UsedNamespaceOrType, UsingTarget};

/// Validate every alias declaration in the compilation and return the
/// collision and redundancy findings, ordered by (file, offset, code).
#[must_use]
pub fn validate_alias_declarations(tables: &ScopeTables) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let global = tables.scopes.get(tables.global_scope);

    // Extern aliases across every unit, in intrinsic source order.
    let mut externs: Vec<&AliasEntry> = Vec::new();
    for (_, scope) in tables.scopes.iter() {
        if scope.kind == ScopeKind::File {
            externs.extend(scope.alias_decls.iter().filter(|e| e.is_extern));
        }
    }
    externs.sort_by(|a, b| intrinsic_key(tables, a).cmp(&intrinsic_key(tables, b)));

    report_same_name_groups(tables, &externs, &mut diagnostics);

    // Global aliases are already merged in intrinsic source order.
    let globals: Vec<&AliasEntry> = global.alias_decls.iter().collect();
    report_same_name_groups(tables, &globals, &mut diagnostics);

    // Extern vs global: both visible in the declaring unit's chain.
    for &ext in &externs {
        if let Some(&first_global) = globals.iter().find(|g| g.name == ext.name) {
            report_pair(tables, first_global, ext, &mut diagnostics);
        }
    }

    // Local aliases: same-scope duplicates, then chain conflicts.
    for (_, scope) in tables.scopes.iter() {
        if scope.kind == ScopeKind::Global {
            continue;
        }
        let mut first_in_scope: FxHashMap<&str, &AliasEntry> = FxHashMap::default();
        for entry in &scope.alias_decls {
            let same_scope_conflict = first_in_scope.get(entry.name.as_str()).copied();
            match same_scope_conflict {
                Some(first) => report_pair(tables, first, entry, &mut diagnostics),
                None => {
                    first_in_scope.insert(entry.name.as_str(), entry);
                }
            }

            if entry.is_extern || same_scope_conflict.is_some() {
                continue;
            }
            let mut parent = scope.parent;
            while let Some(pid) = parent {
                let ancestor = tables.scopes.get(pid);
                let conflict = ancestor
                    .alias_decls
                    .iter()
                    .filter(|c| c.name == entry.name)
                    .min_by(|a, b| intrinsic_key(tables, a).cmp(&intrinsic_key(tables, b)));
                if let Some(conflict) = conflict {
                    let shadows_foreign_global =
                        ancestor.kind == ScopeKind::Global && conflict.unit != entry.unit;
                    if !shadows_foreign_global {
                        report_pair(tables, conflict, entry, &mut diagnostics);
                    }
                    break;
                }
                parent = ancestor.parent;
            }
        }
    }

    // Using-static duplicates and redundant namespace usings.
    for (_, scope) in tables.scopes.iter() {
        if scope.kind == ScopeKind::Global {
            continue;
        }
        let mut earlier_statics: Vec<&UsedNamespaceOrType> = Vec::new();
        for using in &scope.usings {
            if using.target == UsingTarget::Error {
                continue;
            }
            if using.is_static {
                let duplicated = earlier_statics
                    .iter()
                    .any(|prev| prev.target == using.target)
                    || global
                        .usings
                        .iter()
                        .any(|g| g.is_static && g.target == using.target);
                if duplicated {
                    diagnostics.push(Diagnostic::error(
                        tables.unit_name(using.unit).to_string(),
                        using.span,
                        format_message(diagnostic_messages::DUPLICATE_ALIAS, &[&using.display]),
                        diagnostic_codes::DUPLICATE_ALIAS,
                    ));
                }
                earlier_statics.push(using);
            } else if global
                .usings
                .iter()
                .any(|g| !g.is_static && g.target == using.target)
            {
                diagnostics.push(Diagnostic::suggestion(
                    tables.unit_name(using.unit).to_string(),
                    using.span,
                    format_message(diagnostic_messages::REDUNDANT_USING, &[&using.display]),
                    diagnostic_codes::REDUNDANT_USING,
                ));
            }
        }
    }

    diagnostics.sort_by(|a, b| (&a.file, a.start, a.code).cmp(&(&b.file, b.start, b.code)));
    diagnostics.dedup();
    diagnostics
}

fn intrinsic_key<'t>(tables: &'t ScopeTables, entry: &AliasEntry) -> (&'t str, u32) {
    (tables.unit_name(entry.unit), entry.span.start)
}

/// Report every entry in a same-name group beyond the first-in-source.
fn report_same_name_groups(
    tables: &ScopeTables,
    sorted: &[&AliasEntry],
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut first_by_name: FxHashMap<&str, &AliasEntry> = FxHashMap::default();
    for &entry in sorted {
        match first_by_name.get(entry.name.as_str()).copied() {
            Some(first) => report_pair(tables, first, entry, diagnostics),
            None => {
                first_by_name.insert(entry.name.as_str(), entry);
            }
        }
    }
}

/// Report a collision at the second-in-source-order declaration, with a
/// related span at the first.
fn report_pair(
    tables: &ScopeTables,
    a: &AliasEntry,
    b: &AliasEntry,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let (first, second) = if intrinsic_key(tables, a) <= intrinsic_key(tables, b) {
        (a, b)
    } else {
        (b, a)
    };
    diagnostics.push(
        Diagnostic::error(
            tables.unit_name(second.unit).to_string(),
            second.span,
            format_message(diagnostic_messages::DUPLICATE_ALIAS, &[&second.name]),
            diagnostic_codes::DUPLICATE_ALIAS,
        )
        .with_related(
            tables.unit_name(first.unit),
            first.span,
            format!("'{}' was first declared here", first.name),
        ),
    );
}
