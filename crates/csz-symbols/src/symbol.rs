//! Symbols: namespaces, named types, and their member shape info.

use bitflags::bitflags;
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::types::TypeId;

/// Index of a symbol in the [`crate::SymbolArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of a referenced assembly. Assembly 0 is the source assembly
/// being analyzed; others are added for extern-alias targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssemblyId(pub u32);

bitflags! {
    /// What a symbol is. Exactly one of the kind bits is set per symbol.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct SymbolFlags: u32 {
        const NAMESPACE = 1 << 0;
        const CLASS     = 1 << 1;
        const STRUCT    = 1 << 2;
        const INTERFACE = 1 << 3;
        const ENUM      = 1 << 4;
        const DELEGATE  = 1 << 5;
        /// Ref-like struct (stack-only); cannot implement interfaces.
        const REF_LIKE  = 1 << 6;

        const TYPE = Self::CLASS.bits()
            | Self::STRUCT.bits()
            | Self::INTERFACE.bits()
            | Self::ENUM.bits()
            | Self::DELEGATE.bits();
    }
}

/// Declared accessibility of a symbol or member.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

/// Shape info for one constructor. `required_params` counts parameters with
/// no default value and no params-array modifier, so a constructor callable
/// with zero arguments has `required_params == 0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConstructorInfo {
    pub accessibility: Accessibility,
    pub required_params: u8,
    pub has_params_array: bool,
}

impl ConstructorInfo {
    #[must_use]
    pub const fn parameterless() -> Self {
        Self {
            accessibility: Accessibility::Public,
            required_params: 0,
            has_params_array: false,
        }
    }

    /// Callable without arguments: parameterless, all-optional, or
    /// params-array-only parameter lists all qualify.
    #[must_use]
    pub const fn callable_with_no_args(&self) -> bool {
        self.required_params == 0
    }
}

/// Shape info for a method member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub accessibility: Accessibility,
    pub required_params: u8,
    pub is_static: bool,
    pub is_extension: bool,
}

impl MethodInfo {
    #[must_use]
    pub fn instance(name: impl Into<String>, required_params: u8) -> Self {
        Self {
            name: name.into(),
            accessibility: Accessibility::Public,
            required_params,
            is_static: false,
            is_extension: false,
        }
    }

    #[must_use]
    pub fn static_method(name: impl Into<String>, required_params: u8) -> Self {
        Self {
            name: name.into(),
            accessibility: Accessibility::Public,
            required_params,
            is_static: true,
            is_extension: false,
        }
    }

    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }
}

/// A generic type parameter and its declared constraints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeParamInfo {
    pub name: String,
    pub has_new_constraint: bool,
    pub is_struct_constrained: bool,
    pub is_reference_constrained: bool,
    /// Whether the parameter is constrained to the enumerable contract
    /// (directly or through a constraint interface).
    pub has_enumerable_constraint: bool,
}

impl TypeParamInfo {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A symbol: a namespace or a named type, with parent link and members.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub flags: SymbolFlags,
    pub accessibility: Accessibility,
    pub parent: Option<SymbolId>,
    pub assembly: AssemblyId,
    /// Child namespaces and nested/contained types, keyed by simple name.
    /// More than one entry per name is representable so lookup can report
    /// ambiguity instead of silently picking.
    pub members: IndexMap<String, SmallVec<[SymbolId; 1]>>,
    pub type_params: Vec<TypeParamInfo>,
    pub constructors: Vec<ConstructorInfo>,
    pub methods: Vec<MethodInfo>,
    pub base_type: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
}

impl Symbol {
    #[must_use]
    pub fn new_type(name: impl Into<String>, flags: SymbolFlags) -> Self {
        Self {
            name: name.into(),
            flags,
            accessibility: Accessibility::Public,
            parent: None,
            assembly: AssemblyId(0),
            members: IndexMap::new(),
            type_params: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            base_type: None,
            interfaces: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    #[must_use]
    pub fn with_type_params(mut self, params: Vec<TypeParamInfo>) -> Self {
        self.type_params = params;
        self
    }

    #[must_use]
    pub fn with_constructor(mut self, ctor: ConstructorInfo) -> Self {
        self.constructors.push(ctor);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn with_interfaces(mut self, interfaces: Vec<TypeId>) -> Self {
        self.interfaces = interfaces;
        self
    }

    #[must_use]
    pub fn with_base_type(mut self, base: TypeId) -> Self {
        self.base_type = Some(base);
        self
    }

    #[must_use]
    pub const fn is_namespace(&self) -> bool {
        self.flags.contains(SymbolFlags::NAMESPACE)
    }

    #[must_use]
    pub const fn is_type(&self) -> bool {
        self.flags.intersects(SymbolFlags::TYPE)
    }

    #[must_use]
    pub const fn is_value_type(&self) -> bool {
        self.flags.intersects(SymbolFlags::STRUCT.union(SymbolFlags::ENUM))
    }
}
