//! Per-scope alias tables.

use rustc_hash::FxHashMap;

use csz_common::TextSpan;
use csz_symbols::{AssemblyId, SymbolId, TypeId};
use csz_syntax::UnitId;

/// What an alias resolves to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AliasTarget {
    Type(TypeId),
    Namespace(SymbolId),
    /// Extern alias bound to a referenced assembly.
    Assembly(AssemblyId),
    /// Target did not resolve; the declaration stays visible so duplicate
    /// detection and use-site resolution behave, but resolves to the error
    /// sentinel.
    Error,
}

/// One alias declaration: a using alias, a global using alias, or an
/// extern alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasEntry {
    pub name: String,
    pub target: AliasTarget,
    pub unit: UnitId,
    pub span: TextSpan,
    pub global: bool,
    pub is_extern: bool,
}

/// Name-to-entry map for one scope. The first declaration of a name wins;
/// later declarations are kept out of the map (the validator reports them
/// from the scope's full declaration list).
#[derive(Debug, Default)]
pub struct AliasTable {
    map: FxHashMap<String, AliasEntry>,
}

impl AliasTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an entry unless the name is already taken. Returns whether
    /// the entry was installed.
    pub fn declare(&mut self, entry: AliasEntry) -> bool {
        match self.map.entry(entry.name.clone()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AliasEntry> {
        self.map.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.map.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, start: u32) -> AliasEntry {
        AliasEntry {
            name: name.to_string(),
            target: AliasTarget::Error,
            unit: UnitId(0),
            span: TextSpan::new(start, 5),
            global: false,
            is_extern: false,
        }
    }

    #[test]
    fn test_first_declaration_wins() {
        let mut table = AliasTable::new();
        assert!(table.declare(entry("A", 0)));
        assert!(!table.declare(entry("A", 20)));
        assert_eq!(table.get("A").unwrap().span.start, 0);
        assert!(table.declare(entry("B", 40)));
        assert_eq!(table.len(), 2);
    }
}
