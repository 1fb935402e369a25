//! Diagnostic code and message data.

use super::DiagnosticCategory;

/// A diagnostic message template keyed by code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const AMBIGUOUS_REFERENCE: u32 = 104;
    pub const AMBIGUOUS_CALL: u32 = 121;
    pub const TYPE_OR_NAMESPACE_NOT_FOUND: u32 = 246;
    pub const CONSTRAINT_NOT_SATISFIED: u32 = 311;
    pub const ALIAS_NOT_FOUND: u32 = 432;
    pub const MISSING_REQUIRED_MEMBER: u32 = 656;
    pub const DUPLICATE_ALIAS: u32 = 1537;
    pub const REDUNDANT_USING: u32 = 8019;
    pub const GLOBAL_USING_IN_NAMESPACE: u32 = 8914;
    pub const GLOBAL_USING_OUT_OF_ORDER: u32 = 8915;
    pub const NOT_CONSTRUCTIBLE: u32 = 9174;
    pub const NO_NATURAL_TYPE: u32 = 9176;
}

pub mod diagnostic_messages {
    pub const AMBIGUOUS_REFERENCE: &str =
        "'{0}' is an ambiguous reference between '{1}' and '{2}'";
    pub const AMBIGUOUS_CALL: &str =
        "The call is ambiguous between the following members: '{0}' and '{1}'";
    pub const TYPE_OR_NAMESPACE_NOT_FOUND: &str =
        "The type or namespace name '{0}' could not be found";
    pub const CONSTRAINT_NOT_SATISFIED: &str =
        "The type '{0}' does not satisfy the constraints of type parameter '{1}'";
    pub const ALIAS_NOT_FOUND: &str = "The alias '{0}' was not found";
    pub const MISSING_REQUIRED_MEMBER: &str = "Missing required member '{0}.{1}'";
    pub const DUPLICATE_ALIAS: &str = "The alias '{0}' appeared previously in this scope";
    pub const REDUNDANT_USING: &str = "The using directive for '{0}' is unnecessary";
    pub const GLOBAL_USING_IN_NAMESPACE: &str =
        "A global using directive cannot be used inside a namespace declaration";
    pub const GLOBAL_USING_OUT_OF_ORDER: &str =
        "A global using directive must precede all non-global using directives";
    pub const NOT_CONSTRUCTIBLE: &str =
        "Cannot construct type '{0}' with a collection literal because the type is not constructible";
    pub const NO_NATURAL_TYPE: &str = "There is no target type for the collection literal";
}

/// The combined code/category/template table.
pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::AMBIGUOUS_REFERENCE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::AMBIGUOUS_REFERENCE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::AMBIGUOUS_CALL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::AMBIGUOUS_CALL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_OR_NAMESPACE_NOT_FOUND,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONSTRAINT_NOT_SATISFIED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONSTRAINT_NOT_SATISFIED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ALIAS_NOT_FOUND,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ALIAS_NOT_FOUND,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MISSING_REQUIRED_MEMBER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MISSING_REQUIRED_MEMBER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_ALIAS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DUPLICATE_ALIAS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::REDUNDANT_USING,
        category: DiagnosticCategory::Suggestion,
        message: diagnostic_messages::REDUNDANT_USING,
    },
    DiagnosticMessage {
        code: diagnostic_codes::GLOBAL_USING_IN_NAMESPACE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::GLOBAL_USING_IN_NAMESPACE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::GLOBAL_USING_OUT_OF_ORDER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::GLOBAL_USING_OUT_OF_ORDER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NOT_CONSTRUCTIBLE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NOT_CONSTRUCTIBLE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NO_NATURAL_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NO_NATURAL_TYPE,
    },
];
