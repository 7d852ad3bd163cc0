use thiserror::Error;

use super::types::{EdgeId, NodeId};

/// Errors raised by store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
	#[error("no node with id {0}")]
	UnknownNode(NodeId),

	#[error("no edge with id {0}")]
	UnknownEdge(EdgeId),

	#[error("node id space exhausted")]
	IdsExhausted,
}

pub type Result<T> = std::result::Result<T, GraphError>;
