//! In-memory node and edge collections.
//!
//! All mutations are synchronous. The editor keeps one `FlowStore` inside a
//! signal and replaces it on write, so every view observing the signal sees a
//! consistent snapshot.

use std::collections::HashSet;

use log::{debug, warn};

use super::changes::{EdgeChange, NodeChange};
use super::error::{GraphError, Result};
use super::types::{Connection, EdgeId, FlowEdge, FlowNode, GraphData, NodeId, NodeKind, Position};

/// Label of the node present when the editor opens without a seed graph.
pub const INITIAL_LABEL: &str = "Initial node";

#[derive(Clone, Debug, PartialEq)]
pub struct FlowStore {
	nodes: Vec<FlowNode>,
	edges: Vec<FlowEdge>,
	next_id: u64,
}

impl Default for FlowStore {
	/// A store holding the single initial node.
	fn default() -> Self {
		Self {
			nodes: vec![FlowNode {
				id: NodeId(1),
				kind: NodeKind::Default,
				label: INITIAL_LABEL.to_string(),
				position: Position::new(250.0, 5.0),
			}],
			edges: Vec::new(),
			next_id: 2,
		}
	}
}

impl FlowStore {
	/// An empty store whose first issued id is 1.
	pub fn empty() -> Self {
		Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			next_id: 1,
		}
	}

	/// Build a store from a seed document.
	///
	/// Duplicate node ids keep the first occurrence. A node whose id leaves no
	/// room for a successor (`u64::MAX`) is dropped. Edges naming unknown nodes
	/// are dropped. The id counter resumes past the largest seeded id.
	pub fn from_graph_data(data: &GraphData) -> Self {
		let mut store = Self::empty();
		let mut seen = HashSet::new();

		for node in &data.nodes {
			if !seen.insert(node.id) {
				warn!("flow-editor: duplicate seed node id {}, keeping the first", node.id);
				continue;
			}
			let Some(after) = node.id.0.checked_add(1) else {
				warn!("flow-editor: seed node id {} is out of range, dropping it", node.id);
				continue;
			};
			store.nodes.push(FlowNode {
				id: node.id,
				kind: node.kind,
				label: node.label.clone(),
				position: node.position,
			});
			store.next_id = store.next_id.max(after);
		}

		for edge in &data.edges {
			let connection = Connection {
				source: edge.source,
				target: edge.target,
			};
			if let Err(e) = store.connect(connection) {
				warn!("flow-editor: dropping seed edge {} -> {}: {}", edge.source, edge.target, e);
			}
		}

		store
	}

	pub fn nodes(&self) -> &[FlowNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[FlowEdge] {
		&self.edges
	}

	pub fn node(&self, id: NodeId) -> Option<&FlowNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn contains(&self, id: NodeId) -> bool {
		self.node(id).is_some()
	}

	/// Append a node of `kind` at `position` and return its fresh id.
	///
	/// Fails once the counter cannot advance, so no id is ever issued twice.
	pub fn add_node(&mut self, kind: NodeKind, position: Position) -> Result<NodeId> {
		let id = NodeId(self.next_id);
		self.next_id = self.next_id.checked_add(1).ok_or(GraphError::IdsExhausted)?;
		self.nodes.push(FlowNode {
			id,
			kind,
			label: format!("Node {}", id),
			position,
		});
		debug!("flow-editor: added {:?} node {}", kind, id);
		Ok(id)
	}

	/// Remove a node and every edge whose source or target is that node.
	pub fn remove_node(&mut self, id: NodeId) -> Result<FlowNode> {
		let idx = self
			.nodes
			.iter()
			.position(|n| n.id == id)
			.ok_or(GraphError::UnknownNode(id))?;
		let node = self.nodes.remove(idx);
		let before = self.edges.len();
		self.edges.retain(|e| !e.touches(id));
		debug!(
			"flow-editor: removed node {} and {} incident edges",
			id,
			before - self.edges.len()
		);
		Ok(node)
	}

	/// Overwrite a node's label. Id, kind and position are untouched.
	pub fn relabel(&mut self, id: NodeId, label: impl Into<String>) -> Result<()> {
		let node = self
			.nodes
			.iter_mut()
			.find(|n| n.id == id)
			.ok_or(GraphError::UnknownNode(id))?;
		node.label = label.into();
		Ok(())
	}

	pub fn move_node(&mut self, id: NodeId, position: Position) -> Result<()> {
		let node = self
			.nodes
			.iter_mut()
			.find(|n| n.id == id)
			.ok_or(GraphError::UnknownNode(id))?;
		node.position = position;
		Ok(())
	}

	/// Append an edge for `connection`.
	///
	/// Returns `Ok(None)` when an edge with the same source and target already
	/// exists.
	pub fn connect(&mut self, connection: Connection) -> Result<Option<EdgeId>> {
		for id in [connection.source, connection.target] {
			if !self.contains(id) {
				return Err(GraphError::UnknownNode(id));
			}
		}
		let id = EdgeId::between(connection.source, connection.target);
		if self.edges.iter().any(|e| e.id == id) {
			debug!("flow-editor: edge {} already exists", id);
			return Ok(None);
		}
		self.edges.push(FlowEdge {
			id: id.clone(),
			source: connection.source,
			target: connection.target,
		});
		debug!("flow-editor: connected {}", id);
		Ok(Some(id))
	}

	pub fn remove_edge(&mut self, id: &EdgeId) -> Result<FlowEdge> {
		let idx = self
			.edges
			.iter()
			.position(|e| &e.id == id)
			.ok_or_else(|| GraphError::UnknownEdge(id.clone()))?;
		Ok(self.edges.remove(idx))
	}

	/// Fold a node change list into the store. Returns the ids that were removed.
	pub fn apply_node_changes(&mut self, changes: &[NodeChange]) -> Vec<NodeId> {
		let mut removed = Vec::new();
		for change in changes {
			let outcome = match change {
				NodeChange::Position { id, position } => self.move_node(*id, *position),
				NodeChange::Remove { id } => self.remove_node(*id).map(|node| removed.push(node.id)),
			};
			if let Err(e) = outcome {
				debug!("flow-editor: skipping node change: {}", e);
			}
		}
		removed
	}

	pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) {
		for change in changes {
			match change {
				EdgeChange::Remove { id } => {
					if let Err(e) = self.remove_edge(id) {
						debug!("flow-editor: skipping edge change: {}", e);
					}
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::types::{SeedEdge, SeedNode};

	fn connect(store: &mut FlowStore, source: NodeId, target: NodeId) -> Option<EdgeId> {
		store.connect(Connection { source, target }).unwrap()
	}

	#[test]
	fn default_store_has_initial_node() {
		let store = FlowStore::default();
		assert_eq!(store.nodes().len(), 1);
		assert_eq!(store.nodes()[0].label, INITIAL_LABEL);
		assert_eq!(store.clone().add_node(NodeKind::Default, Position::default()).unwrap(), NodeId(2));
	}

	#[test]
	fn ids_are_never_reused_after_removal() {
		let mut store = FlowStore::default();
		let a = store.add_node(NodeKind::Input, Position::default()).unwrap();
		store.remove_node(a).unwrap();
		let b = store.add_node(NodeKind::Input, Position::default()).unwrap();
		assert_ne!(a, b);
		assert!(b > a);
	}

	#[test]
	fn add_node_uses_counter_in_label() {
		let mut store = FlowStore::default();
		let id = store.add_node(NodeKind::Output, Position::new(3.0, 4.0)).unwrap();
		let node = store.node(id).unwrap();
		assert_eq!(node.label, "Node 2");
		assert_eq!(node.kind, NodeKind::Output);
		assert_eq!(node.position, Position::new(3.0, 4.0));
	}

	#[test]
	fn remove_node_cascades_to_edges() {
		let mut store = FlowStore::empty();
		let a = store.add_node(NodeKind::Input, Position::default()).unwrap();
		let b = store.add_node(NodeKind::Default, Position::default()).unwrap();
		let c = store.add_node(NodeKind::Output, Position::default()).unwrap();
		connect(&mut store, a, b);
		connect(&mut store, b, c);
		connect(&mut store, a, c);

		store.remove_node(b).unwrap();

		assert_eq!(store.edges().len(), 1);
		assert!(store.edges().iter().all(|e| !e.touches(b)));
	}

	#[test]
	fn remove_unknown_node_is_an_error() {
		let mut store = FlowStore::default();
		assert_eq!(
			store.remove_node(NodeId(42)),
			Err(GraphError::UnknownNode(NodeId(42)))
		);
		assert_eq!(store.nodes().len(), 1);
	}

	#[test]
	fn relabel_changes_only_the_label() {
		let mut store = FlowStore::default();
		let before = store.nodes()[0].clone();
		store.relabel(before.id, "renamed").unwrap();
		let after = store.node(before.id).unwrap();
		assert_eq!(after.label, "renamed");
		assert_eq!(after.id, before.id);
		assert_eq!(after.kind, before.kind);
		assert_eq!(after.position, before.position);
	}

	#[test]
	fn duplicate_connection_is_ignored() {
		let mut store = FlowStore::empty();
		let a = store.add_node(NodeKind::Input, Position::default()).unwrap();
		let b = store.add_node(NodeKind::Output, Position::default()).unwrap();
		assert!(connect(&mut store, a, b).is_some());
		assert!(connect(&mut store, a, b).is_none());
		assert_eq!(store.edges().len(), 1);
		// reverse direction is a different edge
		assert!(connect(&mut store, b, a).is_some());
	}

	#[test]
	fn connect_to_missing_node_fails() {
		let mut store = FlowStore::default();
		let err = store
			.connect(Connection {
				source: NodeId(1),
				target: NodeId(9),
			})
			.unwrap_err();
		assert_eq!(err, GraphError::UnknownNode(NodeId(9)));
		assert!(store.edges().is_empty());
	}

	#[test]
	fn node_changes_move_and_remove() {
		let mut store = FlowStore::empty();
		let a = store.add_node(NodeKind::Input, Position::default()).unwrap();
		let b = store.add_node(NodeKind::Output, Position::default()).unwrap();
		connect(&mut store, a, b);

		let removed = store.apply_node_changes(&[
			NodeChange::Position {
				id: a,
				position: Position::new(10.0, 20.0),
			},
			NodeChange::Remove { id: b },
			NodeChange::Remove { id: NodeId(77) },
		]);

		assert_eq!(removed, vec![b]);
		assert_eq!(store.node(a).unwrap().position, Position::new(10.0, 20.0));
		assert!(store.edges().is_empty());
	}

	#[test]
	fn edge_changes_remove_edges() {
		let mut store = FlowStore::empty();
		let a = store.add_node(NodeKind::Input, Position::default()).unwrap();
		let b = store.add_node(NodeKind::Output, Position::default()).unwrap();
		let id = connect(&mut store, a, b).unwrap();
		store.apply_edge_changes(&[EdgeChange::Remove { id: id.clone() }, EdgeChange::Remove { id }]);
		assert!(store.edges().is_empty());
		assert_eq!(store.nodes().len(), 2);
	}

	#[test]
	fn seed_document_resumes_counter_and_drops_dangling_edges() {
		let data = GraphData {
			nodes: vec![
				SeedNode {
					id: NodeId(4),
					kind: NodeKind::Input,
					label: "src".into(),
					position: Position::default(),
				},
				SeedNode {
					id: NodeId(9),
					kind: NodeKind::Output,
					label: "sink".into(),
					position: Position::default(),
				},
			],
			edges: vec![
				SeedEdge {
					source: NodeId(4),
					target: NodeId(9),
				},
				SeedEdge {
					source: NodeId(4),
					target: NodeId(5),
				},
			],
		};
		let mut store = FlowStore::from_graph_data(&data);
		assert_eq!(store.nodes().len(), 2);
		assert_eq!(store.edges().len(), 1);
		assert_eq!(store.add_node(NodeKind::Default, Position::default()).unwrap(), NodeId(10));
	}

	#[test]
	fn seed_ids_at_the_top_of_the_range_never_overflow() {
		let seed = |id: u64| SeedNode {
			id: NodeId(id),
			kind: NodeKind::Default,
			label: format!("n{}", id),
			position: Position::default(),
		};
		let data = GraphData {
			nodes: vec![seed(u64::MAX), seed(u64::MAX - 1)],
			edges: vec![SeedEdge {
				source: NodeId(u64::MAX - 1),
				target: NodeId(u64::MAX),
			}],
		};
		let mut store = FlowStore::from_graph_data(&data);
		assert!(!store.contains(NodeId(u64::MAX)));
		assert!(store.contains(NodeId(u64::MAX - 1)));
		assert!(store.edges().is_empty());

		let count = store.nodes().len();
		assert_eq!(
			store.add_node(NodeKind::Default, Position::default()),
			Err(GraphError::IdsExhausted)
		);
		assert_eq!(store.nodes().len(), count);
	}
}
