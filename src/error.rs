use crate::ast::Span;

/// Every way an extraction run can fail. Each one aborts the whole run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractError {
    #[error("unsupported construct `{kind}` at {range}")]
    UnsupportedConstruct { kind: String, range: Span },

    #[error("reference to undeclared type `{name}` at {range}")]
    UnresolvedReference { name: String, range: Span },

    #[error("comment at {range} has no declaration after it: {preview:?}")]
    OrphanComment { range: Span, preview: String },

    #[error("malformed declaration `{name}` at {range}: {reason}")]
    MalformedDeclaration { name: String, reason: String, range: Span },

    #[error("type `{name}` declared twice (at {first} and {second})")]
    DuplicateDeclaration { name: String, first: Span, second: Span },
}

impl ExtractError {
    pub(crate) fn unsupported(kind: impl Into<String>, range: Span) -> Self {
        ExtractError::UnsupportedConstruct { kind: kind.into(), range }
    }

    pub(crate) fn malformed(
        name: impl Into<String>,
        reason: impl Into<String>,
        range: Span,
    ) -> Self {
        ExtractError::MalformedDeclaration {
            name: name.into(),
            reason: reason.into(),
            range,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
