//! Common types and utilities for the csz semantic analyzer.
//!
//! This crate provides foundational types used across all csz crates:
//! - Source spans (`TextSpan`)
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, code/message data)
//! - Centralized limits and thresholds

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::TextSpan;

// Diagnostics - categories, codes, message templates
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};

// Centralized limits and thresholds
pub mod limits;
