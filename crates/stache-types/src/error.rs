use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Resolution,
    Structure,
    Input,
}

/// Numeric error code (E100–E399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Resolution errors (E100–E199) ──
    pub const RESERVED_HELPER: Self = Self(100);
    pub const DOTTED_BUILTIN: Self = Self(101);

    // ── Structure errors (E200–E299) ──
    pub const MISSING_ARGUMENT: Self = Self(200);
    pub const UNEXPECTED_TAG: Self = Self(201);
    pub const ELSE_WITHOUT_CONTENT: Self = Self(202);
    pub const LITERAL_DATA_WITH_ARGUMENTS: Self = Self(203);
    pub const POSITIONAL_AFTER_KEYWORD: Self = Self(204);

    // ── Input errors (E300–E399) ──
    pub const INVALID_INPUT: Self = Self(300);
    pub const NON_FINITE_NUMBER: Self = Self(301);
    pub const INVALID_OPTIONS: Self = Self(302);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Resolution,
            200..=299 => ErrorCategory::Structure,
            _ => ErrorCategory::Input,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A structured Stache compiler diagnostic.
///
/// Code generation is fail-fast, so one pass produces at most one of these.
/// `offending` always holds the path or tag that triggered the failure so
/// tooling can point at it even when the parser attached no span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StacheError {
    /// Template name (file or `<template name="...">`).
    pub template: String,
    /// Error code (e.g., E101).
    pub code: ErrorCode,
    /// Error category (derived from code).
    pub category: ErrorCategory,
    /// Human-readable error message.
    pub message: String,
    /// The offending path or tag, as written in the template.
    pub offending: String,
    /// Source location, when the parser provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Optional fix suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl StacheError {
    /// Create a new error.
    pub fn new(
        template: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        offending: impl Into<String>,
    ) -> Self {
        Self {
            template: template.into(),
            code,
            category: code.category(),
            message: message.into(),
            offending: offending.into(),
            span: None,
            suggestion: None,
        }
    }

    /// Attach a source location.
    pub fn with_span(mut self, span: Option<Span>) -> Self {
        self.span = span;
        self
    }

    /// Attach a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for StacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some(span) => write!(
                f,
                "{}:{}: {} [{}] {}",
                self.template, span, self.code, self.category, self.message
            ),
            None => write!(
                f,
                "{}: {} [{}] {}",
                self.template, self.code, self.category, self.message
            ),
        }
    }
}

impl std::error::Error for StacheError {}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution => write!(f, "resolution"),
            Self::Structure => write!(f, "structure"),
            Self::Input => write!(f, "input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_category() {
        assert_eq!(
            ErrorCode::RESERVED_HELPER.category(),
            ErrorCategory::Resolution
        );
        assert_eq!(
            ErrorCode::DOTTED_BUILTIN.category(),
            ErrorCategory::Resolution
        );
        assert_eq!(
            ErrorCode::MISSING_ARGUMENT.category(),
            ErrorCategory::Structure
        );
        assert_eq!(ErrorCode::INVALID_INPUT.category(), ErrorCategory::Input);
        assert_eq!(
            ErrorCode::NON_FINITE_NUMBER.category(),
            ErrorCategory::Input
        );
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::DOTTED_BUILTIN), "E101");
        assert_eq!(format!("{}", ErrorCode::INVALID_INPUT), "E300");
    }

    #[test]
    fn test_display_with_and_without_span() {
        let err = StacheError::new(
            "list.html",
            ErrorCode::MISSING_ARGUMENT,
            "#each requires an argument",
            "each",
        );
        assert_eq!(
            err.to_string(),
            "list.html: E200 [structure] #each requires an argument"
        );

        let err = err.with_span(Some(Span::new(4, 3, 4, 12)));
        assert_eq!(
            err.to_string(),
            "list.html:4:3: E200 [structure] #each requires an argument"
        );
    }

    #[test]
    fn test_stache_error_json_serialization() {
        let err = StacheError::new(
            "page.html",
            ErrorCode::RESERVED_HELPER,
            "Can't use the built-in 'if' here",
            "if.foo",
        )
        .with_span(Some(Span::new(12, 5, 12, 14)))
        .with_suggestion("Use {{#if ...}} as a block tag");

        let json = serde_json::to_string_pretty(&err).unwrap();
        assert!(json.contains("\"code\": 100"));
        assert!(json.contains("\"category\": \"resolution\""));
        assert!(json.contains("\"offending\": \"if.foo\""));
        assert!(json.contains("\"line\": 12"));
        assert!(json.contains("\"suggestion\""));

        let back: StacheError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.code, err.code);
        assert_eq!(back.offending, err.offending);
        assert_eq!(back.span, err.span);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let err = StacheError::new("t", ErrorCode::INVALID_INPUT, "bad json", "");
        let json = serde_json::to_string(&err).unwrap();
        assert!(!json.contains("span"));
        assert!(!json.contains("suggestion"));
    }
}
