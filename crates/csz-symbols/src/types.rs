//! Hash-consed type representation.
//!
//! Types are interned: structurally equal `TypeKey`s share one `TypeId`, so
//! identity comparison is cheap and classification is a single key lookup.

use rustc_hash::FxHashMap;

use crate::symbol::{SymbolId, TypeParamInfo};

/// Interned type handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Error sentinel; downstream consumers never diagnose against it.
    pub const ERROR: TypeId = TypeId(0);
    pub const OBJECT: TypeId = TypeId(1);
    pub const DYNAMIC: TypeId = TypeId(2);

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Structural key of a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Error,
    Object,
    Dynamic,
    /// A named type instantiation; `args` is empty for non-generic types.
    Named {
        symbol: SymbolId,
        args: Vec<TypeId>,
    },
    /// Single- or multi-dimensional array.
    Array {
        element: TypeId,
        rank: u8,
    },
    Pointer(TypeId),
    FunctionPointer,
    Nullable(TypeId),
    TypeParameter(TypeParamInfo),
}

/// Interner for [`TypeKey`]s. `new` pre-interns the intrinsic types at the
/// indices the `TypeId` constants name.
pub struct TypeInterner {
    keys: Vec<TypeKey>,
    map: FxHashMap<TypeKey, TypeId>,
}

impl TypeInterner {
    #[must_use]
    pub fn new() -> Self {
        let mut interner = Self {
            keys: Vec::new(),
            map: FxHashMap::default(),
        };
        let error = interner.intern(TypeKey::Error);
        let object = interner.intern(TypeKey::Object);
        let dynamic = interner.intern(TypeKey::Dynamic);
        debug_assert_eq!(error, TypeId::ERROR);
        debug_assert_eq!(object, TypeId::OBJECT);
        debug_assert_eq!(dynamic, TypeId::DYNAMIC);
        interner
    }

    pub fn intern(&mut self, key: TypeKey) -> TypeId {
        if let Some(&existing) = self.map.get(&key) {
            return existing;
        }
        let id = TypeId(self.keys.len() as u32);
        self.keys.push(key.clone());
        self.map.insert(key, id);
        id
    }

    #[must_use]
    pub fn key(&self, id: TypeId) -> &TypeKey {
        &self.keys[id.index()]
    }

    /// Non-generic named type.
    pub fn named(&mut self, symbol: SymbolId) -> TypeId {
        self.intern(TypeKey::Named {
            symbol,
            args: Vec::new(),
        })
    }

    /// Generic named type instantiation.
    pub fn named_with(&mut self, symbol: SymbolId, args: Vec<TypeId>) -> TypeId {
        self.intern(TypeKey::Named { symbol, args })
    }

    pub fn array(&mut self, element: TypeId, rank: u8) -> TypeId {
        self.intern(TypeKey::Array { element, rank })
    }

    pub fn pointer(&mut self, pointee: TypeId) -> TypeId {
        self.intern(TypeKey::Pointer(pointee))
    }

    pub fn nullable(&mut self, underlying: TypeId) -> TypeId {
        self.intern(TypeKey::Nullable(underlying))
    }

    pub fn type_parameter(&mut self, info: TypeParamInfo) -> TypeId {
        self.intern(TypeKey::TypeParameter(info))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}
