//! Compilation units and the directives they declare.

use csz_common::TextSpan;

use crate::name_path::NamePath;

/// Index of a compilation unit within a compilation's unit list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub u32);

impl UnitId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// `extern alias Name;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternAliasDirective {
    pub name: String,
    pub span: TextSpan,
}

/// The payload of a using directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsingKind {
    /// `using Some.Namespace;`
    Namespace(NamePath),
    /// `using static Some.Type;`
    Static(NamePath),
    /// `using Name = Some.Target;`
    Alias { name: String, target: NamePath },
}

/// A using directive, global or not, in source order within its container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsingDirective {
    pub global: bool,
    pub kind: UsingKind,
    pub span: TextSpan,
}

/// A namespace block. `body_span` covers the region between the braces and
/// contains the spans of every nested declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceDeclaration {
    pub name: NamePath,
    pub usings: Vec<UsingDirective>,
    pub nested: Vec<NamespaceDeclaration>,
    pub span: TextSpan,
    pub body_span: TextSpan,
}

impl NamespaceDeclaration {
    /// A position inside this namespace's body but outside every nested
    /// namespace. The builder reserves the final body slot for this.
    #[must_use]
    pub const fn body_position(&self) -> u32 {
        self.body_span.end() - 1
    }
}

/// One compilation unit: extern aliases, top-level usings, namespace blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceUnit {
    pub file_name: String,
    pub extern_aliases: Vec<ExternAliasDirective>,
    pub usings: Vec<UsingDirective>,
    pub namespaces: Vec<NamespaceDeclaration>,
    pub span: TextSpan,
}

impl SourceUnit {
    /// A top-level position after every declaration in the unit, inside the
    /// file scope but no namespace scope.
    #[must_use]
    pub const fn top_level_position(&self) -> u32 {
        self.span.end() - 1
    }

    /// Find a namespace block by its dotted display name, searching nested
    /// blocks depth-first (`"A.B"` finds `namespace A.B { }` as well as
    /// `namespace B` nested inside `namespace A`).
    #[must_use]
    pub fn find_namespace(&self, dotted: &str) -> Option<&NamespaceDeclaration> {
        fn walk<'a>(
            decls: &'a [NamespaceDeclaration],
            prefix: &str,
            dotted: &str,
        ) -> Option<&'a NamespaceDeclaration> {
            for decl in decls {
                let name = decl.name.to_string();
                let full = if prefix.is_empty() {
                    name
                } else {
                    format!("{prefix}.{name}")
                };
                if full == dotted {
                    return Some(decl);
                }
                if let Some(found) = walk(&decl.nested, &full, dotted) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.namespaces, "", dotted)
    }
}
