use thiserror::Error;

use crate::node::{ConceptId, SourceLocation};

/// Failures funneled to the shared unhandled-error channel.
///
/// None of these are retried automatically; a failed fetch leaves the
/// node unloaded so the user can trigger the expand again.
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("failed to load children of node {id}: {reason}")]
    Fetch { id: ConceptId, reason: String },

    #[error("failed to reveal {location}: {reason}")]
    Reveal {
        location: SourceLocation,
        reason: String,
    },

    #[error("node {0} is not in the tree")]
    UnknownNode(ConceptId),

    #[error("node {0} is not expandable")]
    NotExpandable(ConceptId),

    #[error("node {0} has no source location")]
    NoSource(ConceptId),
}
