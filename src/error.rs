// Error handling for uritemplates

use thiserror::Error;

/// Errors raised while compiling a template string.
///
/// Compilation stops at the first error; no partial template is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `}` appeared before any `{` was opened.
    #[error("unexpected }}")]
    UnexpectedClose,

    /// An expression was not closed, or was closed more than once.
    #[error("malformed template")]
    Malformed,

    /// The expression starts with an operator RFC 6570 reserves for future use.
    #[error("reserved operator: {0}")]
    ReservedOperator(char),

    #[error("multiple colons in same term: {0}")]
    MultipleColons(String),

    /// The `:N` modifier was not a decimal integer.
    #[error("invalid prefix length in term: {0}")]
    InvalidPrefix(String),

    #[error("not a valid name: {0}")]
    InvalidName(String),

    #[error("both explode and prefix modifiers on same term: {0}")]
    ExplodeAndPrefix(String),
}

/// Errors raised while expanding a compiled template.
///
/// Any error aborts the expansion; no partial output is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    /// The top-level value set was not a map or record. Carries the shape that was given.
    #[error("expected map, struct, or pointer to struct, got {0}")]
    UnsupportedValues(&'static str),

    /// A `:N` prefix modifier was applied to a map-valued variable.
    #[error("cannot truncate a map expansion: {0}")]
    TruncatedMap(String),
}

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Expand(#[from] ExpandError),
}

pub type Result<T> = std::result::Result<T, Error>;
