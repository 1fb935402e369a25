//! Declaration collection and using-scope binding.
//!
//! The binder runs one declaration-collection pass over a compilation's
//! source units and produces immutable [`ScopeTables`]: the using-scope
//! chain (global scope, per-unit file scopes, nested namespace scopes),
//! each scope's alias table, and the used-namespace lists. After the pass
//! completes every structure is read-only; lookups are safe to run
//! concurrently from any number of callers.

pub mod alias_table;
pub use alias_table::{AliasEntry, AliasTable, AliasTarget};

pub mod scopes;
pub use scopes::{Scope, ScopeArena, ScopeId, ScopeKind, ScopeTables, UsedNamespaceOrType, UsingTarget};

pub mod state_binding;
pub use state_binding::bind_compilation;

pub mod alias_validator;
pub use alias_validator::validate_alias_declarations;
