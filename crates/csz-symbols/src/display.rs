//! Human-readable type names for diagnostics.

use crate::table::SymbolArena;
use crate::types::{TypeId, TypeInterner, TypeKey};

/// Render a type the way diagnostics name it: fully qualified named types,
/// `[,]` rank syntax for arrays, `?` for nullable wrappers.
#[must_use]
pub fn display_type(types: &TypeInterner, symbols: &SymbolArena, id: TypeId) -> String {
    match types.key(id) {
        TypeKey::Error => "?".to_string(),
        TypeKey::Object => "object".to_string(),
        TypeKey::Dynamic => "dynamic".to_string(),
        TypeKey::Named { symbol, args } => {
            let mut text = symbols.fully_qualified_name(*symbol);
            if !args.is_empty() {
                text.push('<');
                for (i, &arg) in args.iter().enumerate() {
                    if i > 0 {
                        text.push_str(", ");
                    }
                    text.push_str(&display_type(types, symbols, arg));
                }
                text.push('>');
            }
            text
        }
        TypeKey::Array { element, rank } => {
            let mut text = display_type(types, symbols, *element);
            text.push('[');
            for _ in 1..*rank {
                text.push(',');
            }
            text.push(']');
            text
        }
        TypeKey::Pointer(pointee) => format!("{}*", display_type(types, symbols, *pointee)),
        TypeKey::FunctionPointer => "delegate*".to_string(),
        TypeKey::Nullable(underlying) => {
            format!("{}?", display_type(types, symbols, *underlying))
        }
        TypeKey::TypeParameter(info) => info.name.clone(),
    }
}
