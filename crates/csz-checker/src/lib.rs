//! Name resolution and collection-literal classification.
//!
//! This crate exposes the semantic-model query surface over the binder's
//! immutable scope tables:
//! - `semantic_model` - the `SemanticModel` facade and its options
//! - `name_resolver` - identifier, alias, and qualified-name resolution
//! - `collection_literals` - constructibility classification for
//!   collection-literal conversion targets
//!
//! Every query takes `&self` over tables the declaration-collection pass
//! froze, returns its diagnostics to the caller, and is safe to run
//! concurrently at arbitrary positions.

pub mod semantic_model;
pub use semantic_model::{SemanticModel, SemanticOptions};

pub mod name_resolver;
pub use name_resolver::{
    AliasResolution, InvocationResult, MethodCandidate, ResolutionResult, ResolvedTarget,
};

pub mod collection_literals;
pub use collection_literals::{
    CollectionLiteral, ConstructibilityVerdict, ElementKind, LiteralElement,
};
