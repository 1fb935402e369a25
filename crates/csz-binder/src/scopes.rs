//! The using-scope chain: scope arena, parent links, position lookup.

use smallvec::SmallVec;

use csz_common::TextSpan;
use csz_common::limits::MAX_SCOPE_WALK_ITERATIONS;
use csz_symbols::{SymbolId, TypeId};
use csz_syntax::{SourceUnit, UnitId};

use crate::alias_table::{AliasEntry, AliasTable};

/// Index of a scope in the [`ScopeArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of a scope node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// The single merged scope aggregating every global using directive in
    /// the compilation. Always the outermost scope of every chain.
    Global,
    /// Top level of one compilation unit.
    File,
    /// One namespace block within a unit.
    Namespace,
}

/// Target of a non-alias using directive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UsingTarget {
    Namespace(SymbolId),
    /// A using-static target type.
    Type(TypeId),
    Error,
}

/// A namespace or static-import contribution from a using directive. Never
/// collides with aliases; used only for member and static-member lookup.
#[derive(Clone, Debug)]
pub struct UsedNamespaceOrType {
    pub target: UsingTarget,
    pub is_static: bool,
    pub global: bool,
    pub unit: UnitId,
    pub span: TextSpan,
    /// Display text of the directive target, for diagnostics.
    pub display: String,
}

/// One node of the using-scope chain.
#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// Owning unit; `None` for the global scope.
    pub unit: Option<UnitId>,
    /// Region of the owning unit this scope covers. Namespace scopes cover
    /// their body span; file scopes the whole unit.
    pub span: TextSpan,
    /// The enclosing namespace symbol whose declarations are visible at
    /// this scope (the global root for file scopes).
    pub namespace: Option<SymbolId>,
    /// First-wins alias lookup table.
    pub aliases: AliasTable,
    /// Every alias declaration installed at this scope, in intrinsic source
    /// order (extern aliases first within file scopes). The validator reads
    /// this list; resolution uses `aliases`.
    pub alias_decls: Vec<AliasEntry>,
    pub usings: Vec<UsedNamespaceOrType>,
}

impl Scope {
    #[must_use]
    pub fn new(kind: ScopeKind, parent: Option<ScopeId>, unit: Option<UnitId>, span: TextSpan) -> Self {
        Self {
            kind,
            parent,
            unit,
            span,
            namespace: None,
            aliases: AliasTable::new(),
            alias_decls: Vec::new(),
            usings: Vec::new(),
        }
    }
}

/// Arena of scope nodes with parent links.
#[derive(Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, scope: Scope) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(scope);
        id
    }

    #[must_use]
    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(i, s)| (ScopeId(i as u32), s))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

/// The immutable output of declaration collection.
pub struct ScopeTables {
    pub scopes: ScopeArena,
    pub global_scope: ScopeId,
    /// File scope per unit, indexed by `UnitId`.
    pub file_scopes: Vec<ScopeId>,
    /// The source units, kept for span/file-name queries.
    pub units: Vec<SourceUnit>,
}

impl ScopeTables {
    #[must_use]
    pub fn unit_name(&self, unit: UnitId) -> &str {
        &self.units[unit.index()].file_name
    }

    /// The innermost scope containing `position` in `unit`: the namespace
    /// scope with the smallest containing body span, or the file scope.
    #[must_use]
    pub fn innermost_scope_at(&self, unit: UnitId, position: u32) -> ScopeId {
        let mut best = self.file_scopes[unit.index()];
        let mut best_len = u32::MAX;
        for (id, scope) in self.scopes.iter() {
            if scope.kind == ScopeKind::Namespace
                && scope.unit == Some(unit)
                && scope.span.contains(position)
                && scope.span.length < best_len
            {
                best = id;
                best_len = scope.span.length;
            }
        }
        best
    }

    /// The applicable scopes at a position, innermost namespace scope
    /// first, then enclosing namespace scopes outward, then the file
    /// scope, then the global scope.
    #[must_use]
    pub fn scopes_at(&self, unit: UnitId, position: u32) -> SmallVec<[ScopeId; 8]> {
        let mut chain = SmallVec::new();
        let mut current = Some(self.innermost_scope_at(unit, position));
        let mut iterations = 0;
        while let Some(id) = current {
            iterations += 1;
            if iterations > MAX_SCOPE_WALK_ITERATIONS {
                break;
            }
            chain.push(id);
            current = self.scopes.get(id).parent;
        }
        chain
    }
}
