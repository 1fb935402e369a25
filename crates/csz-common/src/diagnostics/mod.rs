//! Diagnostic types and message lookup for the semantic analyzer.
//!
//! Message data lives in `data.rs`; codes follow the numbering the original
//! C# toolchain uses for the same conditions so downstream tooling can match
//! on them.

use serde::Serialize;

use crate::span::TextSpan;

// Diagnostic codes, message templates, and the combined message table
mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// Related information for a diagnostic (e.g., "see also" locations).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A semantic-analysis diagnostic with optional related information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Related spans (e.g., where the colliding alias was first declared)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, span: TextSpan, message: String, code: u32) -> Self {
        Self {
            file,
            start: span.start,
            length: span.length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
            related_information: Vec::new(),
        }
    }

    /// Create a new suggestion-severity diagnostic (non-fatal finding).
    #[must_use]
    pub const fn suggestion(file: String, span: TextSpan, message: String, code: u32) -> Self {
        Self {
            file,
            start: span.start,
            length: span.length,
            message_text: message,
            category: DiagnosticCategory::Suggestion,
            code,
            related_information: Vec::new(),
        }
    }

    /// Attach a related location to the diagnostic.
    #[must_use]
    pub fn with_related(
        mut self,
        file: impl Into<String>,
        span: TextSpan,
        message: impl Into<String>,
    ) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file: file.into(),
            start: span.start,
            length: span.length,
            message_text: message.into(),
            category: DiagnosticCategory::Message,
            code: 0,
        });
        self
    }

    #[must_use]
    pub const fn span(&self) -> TextSpan {
        TextSpan::new(self.start, self.length)
    }
}

/// Look up the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

/// Substitute `{0}`, `{1}`, ... placeholders in a message template.
#[must_use]
pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_substitutes_in_order() {
        let text = format_message("'{0}' is ambiguous between '{1}' and '{2}'", &["A", "X", "Y"]);
        assert_eq!(text, "'A' is ambiguous between 'X' and 'Y'");
    }

    #[test]
    fn test_every_code_has_a_template() {
        for entry in DIAGNOSTIC_MESSAGES {
            assert_eq!(get_message_template(entry.code), Some(entry.message));
        }
    }

    #[test]
    fn test_diagnostic_serializes_without_empty_related_info() {
        let diagnostic = Diagnostic::error(
            "a.cs".to_string(),
            TextSpan::new(3, 5),
            "boom".to_string(),
            1537,
        );
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["file"], "a.cs");
        assert_eq!(json["code"], 1537);
        assert!(json.get("related_information").is_none());
    }
}
