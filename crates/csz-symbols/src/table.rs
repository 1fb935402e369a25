//! The symbol arena: namespace trees per assembly, allocation, lookup.

use smallvec::SmallVec;
use tracing::trace;

use crate::symbol::{Accessibility, AssemblyId, Symbol, SymbolFlags, SymbolId};

#[derive(Clone, Debug)]
struct Assembly {
    name: String,
    root: SymbolId,
}

/// Arena of all symbols in a compilation plus its referenced assemblies.
///
/// Assembly 0 (the source assembly) is created by `new` with an unnamed
/// global root namespace. Further assemblies back extern aliases.
pub struct SymbolArena {
    symbols: Vec<Symbol>,
    assemblies: Vec<Assembly>,
}

impl SymbolArena {
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Self {
            symbols: Vec::new(),
            assemblies: Vec::new(),
        };
        let root = arena.alloc_root(AssemblyId(0));
        arena.assemblies.push(Assembly {
            name: String::new(),
            root,
        });
        arena
    }

    fn alloc_root(&mut self, assembly: AssemblyId) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        let mut root = Symbol::new_type("", SymbolFlags::NAMESPACE);
        root.assembly = assembly;
        self.symbols.push(root);
        id
    }

    /// The source assembly's global namespace.
    #[must_use]
    pub fn root(&self) -> SymbolId {
        self.assemblies[0].root
    }

    /// Register a referenced assembly and return its id. The assembly gets
    /// its own global root namespace.
    pub fn add_assembly(&mut self, name: impl Into<String>) -> AssemblyId {
        let id = AssemblyId(self.assemblies.len() as u32);
        let root = self.alloc_root(id);
        self.assemblies.push(Assembly {
            name: name.into(),
            root,
        });
        id
    }

    /// The global namespace of a referenced assembly.
    #[must_use]
    pub fn assembly_root(&self, assembly: AssemblyId) -> SymbolId {
        self.assemblies[assembly.0 as usize].root
    }

    /// Look up a referenced assembly by name. The source assembly itself is
    /// unnamed and never returned.
    #[must_use]
    pub fn find_assembly(&self, name: &str) -> Option<AssemblyId> {
        self.assemblies
            .iter()
            .position(|a| !a.name.is_empty() && a.name == name)
            .map(|i| AssemblyId(i as u32))
    }

    #[must_use]
    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }

    /// Get or create the child namespace `name` under `parent`.
    pub fn namespace(&mut self, parent: SymbolId, name: &str) -> SymbolId {
        if let Some(existing) = self
            .members_named(parent, name)
            .iter()
            .copied()
            .find(|&id| self.get(id).is_namespace())
        {
            return existing;
        }
        let assembly = self.get(parent).assembly;
        let mut sym = Symbol::new_type(name, SymbolFlags::NAMESPACE);
        sym.assembly = assembly;
        sym.parent = Some(parent);
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(sym);
        self.symbols[parent.index()]
            .members
            .entry(name.to_string())
            .or_default()
            .push(id);
        trace!(name, parent = parent.0, "namespace symbol created");
        id
    }

    /// Get or create a namespace chain (`"System.Collections.Generic"`)
    /// starting at `from`.
    pub fn namespace_chain(&mut self, from: SymbolId, dotted: &str) -> SymbolId {
        let mut current = from;
        for part in dotted.split('.') {
            current = self.namespace(current, part);
        }
        current
    }

    /// Install a type symbol under a container and return its id.
    pub fn add_type(&mut self, parent: SymbolId, mut symbol: Symbol) -> SymbolId {
        debug_assert!(symbol.flags.intersects(SymbolFlags::TYPE));
        symbol.parent = Some(parent);
        symbol.assembly = self.get(parent).assembly;
        let id = SymbolId(self.symbols.len() as u32);
        let name = symbol.name.clone();
        self.symbols.push(symbol);
        self.symbols[parent.index()]
            .members
            .entry(name)
            .or_default()
            .push(id);
        id
    }

    /// All members of `container` with the given simple name.
    #[must_use]
    pub fn members_named(&self, container: SymbolId, name: &str) -> SmallVec<[SymbolId; 1]> {
        self.get(container)
            .members
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether `symbol` is accessible from source code in the compilation.
    ///
    /// Internal symbols are accessible within their own assembly only;
    /// protected and private symbols are never accessible from the
    /// namespace-level positions the resolver works at.
    #[must_use]
    pub fn accessible_in_source(&self, symbol: SymbolId) -> bool {
        let sym = self.get(symbol);
        match sym.accessibility {
            Accessibility::Public => true,
            Accessibility::Internal => sym.assembly == AssemblyId(0),
            Accessibility::Protected | Accessibility::Private => false,
        }
    }

    /// Dotted name from the assembly root, without the root itself.
    #[must_use]
    pub fn fully_qualified_name(&self, id: SymbolId) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let mut current = Some(id);
        while let Some(cid) = current {
            let sym = self.get(cid);
            if !sym.name.is_empty() {
                parts.push(&sym.name);
            }
            current = sym.parent;
        }
        parts.reverse();
        parts.join(".")
    }
}

impl Default for SymbolArena {
    fn default() -> Self {
        Self::new()
    }
}
