//! Programmatic construction of source units with realistic byte offsets.
//!
//! The builder lays declarations out the way a formatter would print them,
//! advancing a byte cursor by each directive's approximate textual length.
//! Spans therefore reflect intrinsic source order: a directive added later
//! always has a later offset, and positions can be compared across scopes.

use csz_common::TextSpan;

use crate::name_path::NamePath;
use crate::unit::{
    ExternAliasDirective, NamespaceDeclaration, SourceUnit, UsingDirective, UsingKind,
};

/// Builder for a [`SourceUnit`].
pub struct SourceUnitBuilder {
    file_name: String,
    cursor: u32,
    extern_aliases: Vec<ExternAliasDirective>,
    usings: Vec<UsingDirective>,
    namespaces: Vec<NamespaceDeclaration>,
}

impl SourceUnitBuilder {
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            cursor: 0,
            extern_aliases: Vec::new(),
            usings: Vec::new(),
            namespaces: Vec::new(),
        }
    }

    fn claim(&mut self, length: u32) -> TextSpan {
        let span = TextSpan::new(self.cursor, length);
        self.cursor = span.end() + 1;
        span
    }

    /// `extern alias Name;`
    #[must_use]
    pub fn extern_alias(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let span = self.claim(14 + name.len() as u32);
        self.extern_aliases.push(ExternAliasDirective { name, span });
        self
    }

    /// `using Target;`
    #[must_use]
    pub fn using_namespace(mut self, target: &str) -> Self {
        self.push_using(false, UsingKind::Namespace(NamePath::dotted(target)));
        self
    }

    /// `global using Target;`
    #[must_use]
    pub fn global_using(mut self, target: &str) -> Self {
        self.push_using(true, UsingKind::Namespace(NamePath::dotted(target)));
        self
    }

    /// `using static Target;`
    #[must_use]
    pub fn using_static(mut self, target: &str) -> Self {
        self.push_using(false, UsingKind::Static(NamePath::dotted(target)));
        self
    }

    /// `global using static Target;`
    #[must_use]
    pub fn global_using_static(mut self, target: &str) -> Self {
        self.push_using(true, UsingKind::Static(NamePath::dotted(target)));
        self
    }

    /// `using Name = Target;`
    #[must_use]
    pub fn using_alias(mut self, name: impl Into<String>, target: NamePath) -> Self {
        self.push_using(
            false,
            UsingKind::Alias {
                name: name.into(),
                target,
            },
        );
        self
    }

    /// `global using Name = Target;`
    #[must_use]
    pub fn global_using_alias(mut self, name: impl Into<String>, target: NamePath) -> Self {
        self.push_using(
            true,
            UsingKind::Alias {
                name: name.into(),
                target,
            },
        );
        self
    }

    fn push_using(&mut self, global: bool, kind: UsingKind) {
        let length = using_text_len(global, &kind);
        let span = self.claim(length);
        self.usings.push(UsingDirective { global, kind, span });
    }

    /// `namespace Name { ... }` — the closure populates the block.
    #[must_use]
    pub fn namespace(
        mut self,
        name: &str,
        build: impl FnOnce(NamespaceBuilder) -> NamespaceBuilder,
    ) -> Self {
        let (decl, cursor) = build_namespace(self.cursor, name, build);
        self.cursor = cursor;
        self.namespaces.push(decl);
        self
    }

    #[must_use]
    pub fn build(mut self) -> SourceUnit {
        // Reserve a trailing slot so the unit has a top-level position that
        // no namespace block contains.
        self.cursor += 1;
        SourceUnit {
            file_name: self.file_name,
            extern_aliases: self.extern_aliases,
            usings: self.usings,
            namespaces: self.namespaces,
            span: TextSpan::new(0, self.cursor),
        }
    }
}

/// Builder for a namespace block; mirrors the unit builder's directive
/// methods, including the misplaced `global using` forms the binder rejects.
pub struct NamespaceBuilder {
    cursor: u32,
    usings: Vec<UsingDirective>,
    nested: Vec<NamespaceDeclaration>,
}

impl NamespaceBuilder {
    fn claim(&mut self, length: u32) -> TextSpan {
        let span = TextSpan::new(self.cursor, length);
        self.cursor = span.end() + 1;
        span
    }

    #[must_use]
    pub fn using_namespace(mut self, target: &str) -> Self {
        self.push_using(false, UsingKind::Namespace(NamePath::dotted(target)));
        self
    }

    #[must_use]
    pub fn using_static(mut self, target: &str) -> Self {
        self.push_using(false, UsingKind::Static(NamePath::dotted(target)));
        self
    }

    #[must_use]
    pub fn using_alias(mut self, name: impl Into<String>, target: NamePath) -> Self {
        self.push_using(
            false,
            UsingKind::Alias {
                name: name.into(),
                target,
            },
        );
        self
    }

    /// A `global using` in namespace position — always a binder error.
    #[must_use]
    pub fn global_using(mut self, target: &str) -> Self {
        self.push_using(true, UsingKind::Namespace(NamePath::dotted(target)));
        self
    }

    fn push_using(&mut self, global: bool, kind: UsingKind) {
        let length = using_text_len(global, &kind);
        let span = self.claim(length);
        self.usings.push(UsingDirective { global, kind, span });
    }

    #[must_use]
    pub fn namespace(
        mut self,
        name: &str,
        build: impl FnOnce(NamespaceBuilder) -> NamespaceBuilder,
    ) -> Self {
        let (decl, cursor) = build_namespace(self.cursor, name, build);
        self.cursor = cursor;
        self.nested.push(decl);
        self
    }
}

fn build_namespace(
    start: u32,
    name: &str,
    build: impl FnOnce(NamespaceBuilder) -> NamespaceBuilder,
) -> (NamespaceDeclaration, u32) {
    // "namespace Name { " then the body, a reserved body slot, and "}".
    let body_start = start + 10 + name.len() as u32 + 2;
    let inner = build(NamespaceBuilder {
        cursor: body_start,
        usings: Vec::new(),
        nested: Vec::new(),
    });
    let body_end = inner.cursor + 1;
    let end = body_end + 1;
    let decl = NamespaceDeclaration {
        name: NamePath::dotted(name),
        usings: inner.usings,
        nested: inner.nested,
        span: TextSpan::new(start, end - start),
        body_span: TextSpan::new(body_start, body_end - body_start),
    };
    (decl, end + 1)
}

fn using_text_len(global: bool, kind: &UsingKind) -> u32 {
    let base = match kind {
        UsingKind::Namespace(path) => 7 + path.text_len(),
        UsingKind::Static(path) => 14 + path.text_len(),
        UsingKind::Alias { name, target } => 10 + name.len() as u32 + target.text_len(),
    };
    if global { base + 7 } else { base }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_are_monotonic_in_declaration_order() {
        let unit = SourceUnitBuilder::new("a.cs")
            .extern_alias("Lib")
            .global_using("System")
            .using_namespace("System.Collections")
            .using_alias("A", NamePath::dotted("System.String"))
            .build();
        let ext = unit.extern_aliases[0].span;
        assert!(ext.start < unit.usings[0].span.start);
        assert!(unit.usings[0].span.end() <= unit.usings[1].span.start);
        assert!(unit.usings[1].span.end() <= unit.usings[2].span.start);
    }

    #[test]
    fn test_namespace_spans_nest() {
        let unit = SourceUnitBuilder::new("a.cs")
            .namespace("A", |a| {
                a.using_namespace("System").namespace("B", |b| b)
            })
            .build();
        let a = unit.find_namespace("A").unwrap();
        let b = unit.find_namespace("A.B").unwrap();
        assert!(a.span.contains_span(&a.body_span));
        assert!(a.body_span.contains_span(&b.span));
        assert!(a.body_span.contains_span(&a.usings[0].span));
        assert!(unit.span.contains_span(&a.span));
        assert!(unit.span.contains(unit.top_level_position()));
        assert!(!a.span.contains(unit.top_level_position()));
    }
}
