//! Node, edge and seed-document types shared by the store and the canvas.

use std::fmt;

use serde::Deserialize;

/// Identifier of a node. Issued from a monotonic counter and never reused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Identifier of an edge, derived from its endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(String);

impl EdgeId {
	pub fn between(source: NodeId, target: NodeId) -> Self {
		Self(format!("e{}-{}", source, target))
	}
}

impl fmt::Display for EdgeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Node category. Decides which connection handles a node exposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	/// Source handle only.
	Input,
	/// Target and source handles.
	#[default]
	Default,
	/// Target handle only.
	Output,
}

impl NodeKind {
	/// Fixed display order used by the sidebar.
	pub const DISPLAY_ORDER: [NodeKind; 3] = [NodeKind::Input, NodeKind::Default, NodeKind::Output];

	pub fn title(self) -> &'static str {
		match self {
			NodeKind::Input => "Input",
			NodeKind::Default => "Default",
			NodeKind::Output => "Output",
		}
	}

	/// Whether edges may start at this node.
	pub fn has_source_handle(self) -> bool {
		!matches!(self, NodeKind::Output)
	}

	/// Whether edges may end at this node.
	pub fn has_target_handle(self) -> bool {
		!matches!(self, NodeKind::Input)
	}
}

/// Canvas (world-space) position of a node's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Position drawn uniformly from `[0, extent)` on both axes.
	///
	/// `random` must yield values in `[0, 1)`.
	pub fn random_within(extent: f64, mut random: impl FnMut() -> f64) -> Self {
		let x = random() * extent;
		let y = random() * extent;
		Self { x, y }
	}
}

/// A user-visible graph vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowNode {
	pub id: NodeId,
	pub kind: NodeKind,
	pub label: String,
	pub position: Position,
}

/// A directed link between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowEdge {
	pub id: EdgeId,
	pub source: NodeId,
	pub target: NodeId,
}

impl FlowEdge {
	pub fn touches(&self, node: NodeId) -> bool {
		self.source == node || self.target == node
	}
}

/// A completed connect gesture: source handle to target handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Connection {
	pub source: NodeId,
	pub target: NodeId,
}

/// Seed node as written in the host page configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct SeedNode {
	pub id: NodeId,
	#[serde(default)]
	pub kind: NodeKind,
	pub label: String,
	#[serde(default)]
	pub position: Position,
}

/// Seed edge as written in the host page configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct SeedEdge {
	pub source: NodeId,
	pub target: NodeId,
}

/// Complete seed document: nodes and edges.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<SeedNode>,
	#[serde(default)]
	pub edges: Vec<SeedEdge>,
}
