//! Force-directed auto-arrange.
//!
//! Feeds the current nodes and edges through the `force_graph` simulation for a
//! fixed number of steps and reports the result as position changes, so the
//! store stays the only owner of node positions.

use std::collections::HashMap;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::changes::NodeChange;
use super::types::{FlowEdge, FlowNode, NodeId, Position};

/// Tuning for [`arrange`].
#[derive(Clone, Debug)]
pub struct ArrangeParams {
	/// Number of simulation steps.
	pub iterations: usize,
	/// Step length in seconds.
	pub dt: f32,
	/// Node box size; the simulation runs on box centres.
	pub node_size: (f64, f64),
	pub force_charge: f32,
	pub force_spring: f32,
}

impl Default for ArrangeParams {
	fn default() -> Self {
		Self {
			iterations: 240,
			dt: 0.016,
			node_size: (150.0, 40.0),
			force_charge: 400.0,
			force_spring: 0.05,
		}
	}
}

/// Compute new positions for every node. The centroid of the layout is kept
/// where it was so the graph does not drift out of view.
pub fn arrange(nodes: &[FlowNode], edges: &[FlowEdge], params: &ArrangeParams) -> Vec<NodeChange> {
	if nodes.is_empty() {
		return Vec::new();
	}

	let (half_w, half_h) = (params.node_size.0 / 2.0, params.node_size.1 / 2.0);
	let mut graph: ForceGraph<NodeId, ()> = ForceGraph::new(SimulationParameters {
		force_charge: params.force_charge,
		force_spring: params.force_spring,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	});

	let mut id_to_idx = HashMap::new();
	for (i, node) in nodes.iter().enumerate() {
		// Nudge by index so coincident nodes can separate.
		let jitter = (i % 7) as f32 * 0.5;
		let idx = graph.add_node(NodeData {
			x: (node.position.x + half_w) as f32 + jitter,
			y: (node.position.y + half_h) as f32 - jitter,
			mass: 10.0,
			is_anchor: false,
			user_data: node.id,
		});
		id_to_idx.insert(node.id, idx);
	}

	for edge in edges {
		if let (Some(&src), Some(&tgt)) = (id_to_idx.get(&edge.source), id_to_idx.get(&edge.target)) {
			if src != tgt {
				graph.add_edge(src, tgt, EdgeData::default());
			}
		}
	}

	for _ in 0..params.iterations {
		graph.update(params.dt);
	}

	let mut centres = Vec::with_capacity(nodes.len());
	graph.visit_nodes(|node| {
		centres.push((node.data.user_data, node.x() as f64, node.y() as f64));
	});

	let count = nodes.len() as f64;
	let old_centroid = nodes.iter().fold((0.0, 0.0), |(sx, sy), n| {
		(sx + n.position.x + half_w, sy + n.position.y + half_h)
	});
	let new_centroid = centres
		.iter()
		.fold((0.0, 0.0), |(sx, sy), &(_, x, y)| (sx + x, sy + y));
	let (shift_x, shift_y) = (
		(old_centroid.0 - new_centroid.0) / count,
		(old_centroid.1 - new_centroid.1) / count,
	);

	centres
		.into_iter()
		.filter(|(_, x, y)| x.is_finite() && y.is_finite())
		.map(|(id, x, y)| NodeChange::Position {
			id,
			position: Position::new(x + shift_x - half_w, y + shift_y - half_h),
		})
		.collect()
}
