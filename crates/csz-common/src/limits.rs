//! Centralized limits and thresholds for the semantic analyzer.
//!
//! Shared constants for walk depths and capacity hints. Centralizing these
//! prevents duplicate definitions with inconsistent values.

/// Maximum number of scope nodes visited when walking a scope chain from an
/// innermost scope to the global scope. Scope chains are built from lexical
/// nesting and are shallow in practice; the guard bails out of a chain walk
/// that would otherwise cycle on corrupted parent links.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 1_000;

/// Maximum number of dotted segments accepted in a qualified name.
pub const MAX_QUALIFIED_NAME_DEPTH: usize = 128;

/// Maximum depth of the base-type/interface walk used when checking the
/// enumerable contract. Inheritance chains deeper than this are treated as
/// not satisfying the contract.
pub const MAX_INHERITANCE_WALK: usize = 256;
