//! Mapping codegen failures to structured diagnostics.

use stache_codegen::CodegenError;
use stache_types::{ErrorCode, StacheError};

/// Build the diagnostic for a failed pass, located at the failing tag.
pub fn to_stache_error(template: &str, err: &CodegenError) -> StacheError {
    let (code, suggestion) = match err.root() {
        CodegenError::ReservedHelper { helper, .. } => (
            ErrorCode::RESERVED_HELPER,
            Some(format!("'{helper}' is a block helper; use it as {{{{#{helper} ...}}}}")),
        ),
        CodegenError::DottedBuiltin { .. } => (ErrorCode::DOTTED_BUILTIN, None),
        CodegenError::MissingArgument { helper, .. } => (
            ErrorCode::MISSING_ARGUMENT,
            Some(format!("Pass the value to test or iterate: {{{{#{helper} value}}}}")),
        ),
        CodegenError::UnexpectedTag { .. } => (ErrorCode::UNEXPECTED_TAG, None),
        CodegenError::ElseWithoutContent { .. } => (ErrorCode::ELSE_WITHOUT_CONTENT, None),
        CodegenError::LiteralDataWithArguments { .. } => (
            ErrorCode::LITERAL_DATA_WITH_ARGUMENTS,
            Some("Use keyword arguments to pass several values".to_string()),
        ),
        CodegenError::PositionalAfterKeyword { .. } => (
            ErrorCode::POSITIONAL_AFTER_KEYWORD,
            Some("Move positional arguments before keyword arguments".to_string()),
        ),
        CodegenError::NonFiniteNumber { .. } => (ErrorCode::NON_FINITE_NUMBER, None),
        // `root` never returns a located error.
        CodegenError::InTag { .. } => (ErrorCode::UNEXPECTED_TAG, None),
    };

    let error = StacheError::new(template, code, err.to_string(), err.offending())
        .with_span(err.span());
    match suggestion {
        Some(suggestion) => error.with_suggestion(suggestion),
        None => error,
    }
}
