//! Errors raised while configuring a search.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// Query and target disagree on edge directedness.
    #[error("query graph is {query} but target graph is {target}")]
    DirectionMismatch {
        query: &'static str,
        target: &'static str,
    },
}

pub type MatchResult<T> = Result<T, MatchError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeltaError {
    #[error("delta must be a non-negative integer or `inf`, found `{0}`")]
    Invalid(String),
}

pub(crate) fn directedness(directed: bool) -> &'static str {
    if directed { "directed" } else { "undirected" }
}
