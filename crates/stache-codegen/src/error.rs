//! Codegen error types.

use stache_types::Span;
use thiserror::Error;

/// Errors that abort code generation for the enclosing template.
///
/// Every variant carries the offending path or tag text. Errors raised while
/// emitting a tag that has a source span come wrapped in [`CodegenError::InTag`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    /// A built-in block helper name used as an ordinary identifier.
    #[error("Can't use the built-in '{helper}' here")]
    ReservedHelper { helper: String, path: String },

    /// A dotted path rooted at a built-in helper or a special `UI.*` path.
    #[error("Unexpected dotted path beginning with {prefix}")]
    DottedBuiltin { prefix: String, path: String },

    /// `{{#if}}` and friends without their data argument.
    #[error("#{helper} requires an argument")]
    MissingArgument { helper: String, tag: String },

    /// A tag kind that cannot appear at this position.
    #[error("Unexpected template tag type {kind} {position}: {tag}")]
    UnexpectedTag {
        kind: String,
        position: String,
        tag: String,
    },

    /// `else_content` given without `content`.
    #[error("else block without a content block: {tag}")]
    ElseWithoutContent { tag: String },

    /// `{{> foo "literal" more}}`: a literal data argument must stand alone.
    #[error("literal data argument must be the only argument: {tag}")]
    LiteralDataWithArguments { tag: String },

    /// `{{> foo x=1 bar}}`: once keywords start, the data thunk can't take
    /// positional arguments.
    #[error("positional argument after keyword arguments: {tag}")]
    PositionalAfterKeyword { tag: String },

    /// NaN and infinities have no literal form.
    #[error("number {value} has no literal representation")]
    NonFiniteNumber { value: f64 },

    /// An error from the innermost tag with a span that encloses it.
    #[error("{source}")]
    InTag {
        span: Span,
        source: Box<CodegenError>,
    },
}

impl CodegenError {
    /// The path or tag text that triggered the error.
    pub fn offending(&self) -> String {
        match self {
            Self::ReservedHelper { path, .. } | Self::DottedBuiltin { path, .. } => path.clone(),
            Self::MissingArgument { tag, .. }
            | Self::UnexpectedTag { tag, .. }
            | Self::ElseWithoutContent { tag }
            | Self::LiteralDataWithArguments { tag }
            | Self::PositionalAfterKeyword { tag } => tag.clone(),
            Self::NonFiniteNumber { value } => value.to_string(),
            Self::InTag { source, .. } => source.offending(),
        }
    }

    /// Source location of the failing tag, if the parser supplied one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::InTag { span, .. } => Some(*span),
            _ => None,
        }
    }

    /// The error without its location.
    pub fn root(&self) -> &CodegenError {
        match self {
            Self::InTag { source, .. } => source.root(),
            err => err,
        }
    }

    /// Attach `span` unless a nested tag already located the error.
    pub(crate) fn at(self, span: Option<Span>) -> Self {
        match span {
            Some(span) if !matches!(self, Self::InTag { .. }) => Self::InTag {
                span,
                source: Box::new(self),
            },
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_if() -> CodegenError {
        CodegenError::MissingArgument {
            helper: "if".into(),
            tag: "{{#if}}".into(),
        }
    }

    #[test]
    fn test_at_wraps_once() {
        let inner = Span::new(5, 3, 5, 12);
        let err = missing_if().at(Some(inner)).at(Some(Span::new(1, 1, 9, 1)));
        assert_eq!(err.span(), Some(inner));
        assert_eq!(err.root(), &missing_if());
        assert_eq!(err.offending(), "{{#if}}");
        assert_eq!(err.to_string(), "#if requires an argument");
    }

    #[test]
    fn test_at_without_span_is_unchanged() {
        assert_eq!(missing_if().at(None), missing_if());
        assert_eq!(missing_if().span(), None);
    }
}

/// Codegen result type alias.
pub type CodegenResult<T> = Result<T, CodegenError>;
