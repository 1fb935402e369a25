//! Symbol arena and type system for the csz semantic analyzer.
//!
//! This crate plays the symbol/type-system collaborator role for the binder
//! and checker:
//! - Symbol arena (`SymbolArena`, `Symbol`, `SymbolId`): namespace tree,
//!   named types, member shape info (constructors, `Add`-shaped methods)
//! - Type interner (`TypeInterner`, `TypeId`, `TypeKey`): hash-consed types
//!   with pre-interned intrinsics
//! - Target-shape classification (`TargetShape`, `classify_target`)
//! - Generic-constraint checking (`check_type_args`)
//! - Core-library seeding (`WellKnown`): the well-known collection shapes

pub mod symbol;
pub use symbol::{
    Accessibility, AssemblyId, ConstructorInfo, MethodInfo, Symbol, SymbolFlags, SymbolId,
    TypeParamInfo,
};

pub mod table;
pub use table::SymbolArena;

pub mod types;
pub use types::{TypeId, TypeInterner, TypeKey};

pub mod classify;
pub use classify::{TargetShape, classify_target};

pub mod constraints;
pub use constraints::check_type_args;

pub mod display;
pub use display::display_type;

pub mod corelib;
pub use corelib::WellKnown;
