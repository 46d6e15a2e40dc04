//! Graph model errors.

use thiserror::Error;

/// Errors surfaced by graph model operations.
///
/// Stale ids, dangling wires and self-loop attempts are not errors; the model
/// absorbs them. Only conditions the user has to be told about end up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Select a source gate first")]
    NoSourceSelected,
    #[error("Unknown gate kind: {0}")]
    UnknownGateKind(String),
}

/// Result type for graph model operations.
pub type GraphResult<T> = Result<T, GraphError>;
