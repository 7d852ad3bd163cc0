//! Change lists reported by the canvas widget.
//!
//! The canvas never mutates the node or edge collections itself. It describes
//! what the user did as a list of changes and the owner folds them back into
//! its store with [`FlowStore::apply_node_changes`] and
//! [`FlowStore::apply_edge_changes`].
//!
//! [`FlowStore::apply_node_changes`]: super::store::FlowStore::apply_node_changes
//! [`FlowStore::apply_edge_changes`]: super::store::FlowStore::apply_edge_changes

use super::types::{EdgeId, NodeId, Position};

#[derive(Clone, Debug, PartialEq)]
pub enum NodeChange {
	/// The node was dragged or re-laid out.
	Position { id: NodeId, position: Position },
	/// The node was deleted from the canvas.
	Remove { id: NodeId },
}

#[derive(Clone, Debug, PartialEq)]
pub enum EdgeChange {
	Remove { id: EdgeId },
}
