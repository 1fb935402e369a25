//! Declaration-level syntax model for the csz semantic analyzer.
//!
//! This crate is the syntax-tree-provider collaborator consumed by the
//! binder: compilation units with their extern-alias directives, using
//! directives, and namespace blocks, each carrying a source span. Parsing
//! program text is not in scope; units are constructed through
//! [`builder::SourceUnitBuilder`], which assigns realistic byte offsets so
//! every declaration has an intrinsic source position.

pub mod name_path;
pub use name_path::{NamePath, NameSegment};

pub mod unit;
pub use unit::{
    ExternAliasDirective, NamespaceDeclaration, SourceUnit, UnitId, UsingDirective, UsingKind,
};

pub mod builder;
pub use builder::SourceUnitBuilder;
