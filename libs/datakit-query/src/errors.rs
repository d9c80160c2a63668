use thiserror::Error;

/// Unified error type for query-algebra construction and parsing.
///
/// Every failure is surfaced synchronously at the point of construction or
/// call; nothing in this crate retries, defers, or recovers internally.
/// Variants are stable condition kinds so that alternate implementations can
/// raise the same kind for the same misuse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Both wildcard roles were given the same character.
    #[error("character wildcard and string wildcard are both '{0}'")]
    IdenticalWildcards(char),

    /// The escape character collides with one of the wildcard characters.
    #[error("escape character '{0}' collides with a wildcard")]
    EscapeIsWildcard(char),

    /// `In`/`NotIn` constraints require at least one value.
    #[error("IN constraint requires a non-empty list of values")]
    EmptyValues,

    /// A composite restriction was constructed directly with no children.
    #[error("restrictions list cannot be empty")]
    EmptyRestrictions,

    /// A signed sort token could not be parsed back into an order.
    #[error("invalid sort token: {0}")]
    InvalidSortToken(String),

    /// A provider declined an operation it cannot support.
    ///
    /// Raised by providers, not by this crate; the condition kind is part
    /// of the contract so every provider declines the same way.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}
