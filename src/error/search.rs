use std::time::Duration;
use thiserror::Error;

/// Why the search text did not yield a single link.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("text could not be parsed as markdown")]
    ParseFailure,
    #[error("text contains no SimpleX link")]
    NoLink,
    #[error("text contains {0} SimpleX links, expected one")]
    AmbiguousLink(usize),
}

/// Failures of the connection planner. None of them reach the chat list:
/// the search stays in unresolved link mode.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("could not resolve link: {0}")]
    ResolutionFailure(String),
    #[error("link resolution timed out after {0:?}")]
    Timeout(Duration),
}
