//! Canvas view state and interaction tracking.
//!
//! Holds the pan/zoom transform, in-progress gestures (node drag, pan,
//! connect) and hover highlight state with smooth intensity transitions. The
//! node and edge collections are not stored here; every query takes them as
//! arguments so the editor's store stays the single owner.

use std::collections::{HashMap, HashSet};

use crate::graph::{
	Connection, EdgeChange, EdgeId, FlowEdge, FlowNode, NodeChange, NodeId, Position,
};

use super::geometry::{self, EdgeCurve, Rect};
use super::scale::{ScaleConfig, ScaledValues};

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<NodeId>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// A connection being dragged out of a source handle.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectState {
	pub source: NodeId,
	/// Cursor position in world space.
	pub cursor: (f64, f64),
}

/// Which side of a node a handle belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleSide {
	Source,
	Target,
}

/// What the pointer is over, in priority order of hit-testing.
#[derive(Clone, Debug, PartialEq)]
pub enum Hit {
	Handle(NodeId, HandleSide),
	Node(NodeId),
	Edge(EdgeId),
	Pane,
}

/// Press position used to tell clicks from drags.
#[derive(Clone, Debug, PartialEq)]
pub struct Press {
	pub x: f64,
	pub y: f64,
	pub hit: Hit,
	pub moved: bool,
}

/// Pointer travel (screen pixels) below which a press still counts as a click.
pub const CLICK_SLOP: f64 = 3.0;

/// Something the owner of the graph has to hear about.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasEvent {
	Nodes(Vec<NodeChange>),
	Edges(Vec<EdgeChange>),
	Connect(Connection),
	NodeClick(NodeId),
	NodeDoubleClick(NodeId),
	EdgeClick(EdgeId),
	PaneClick,
}

/// Manages smooth highlight transitions with per-node intensity tracking.
///
/// Each node has its own intensity value (0.0 to 1.0) that smoothly animates
/// based on whether it is in the active highlight set (the hovered node and
/// its neighbours). Uses exponential smoothing, with a minimum hold time to
/// prevent flashing when the pointer briefly skirts a node.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	/// Currently hovered node (if any)
	pub hovered_node: Option<NodeId>,
	/// Set of nodes that should be highlighted (hovered + neighbors)
	target_set: HashSet<NodeId>,
	/// Per-node highlight intensity. Nodes not in this map have intensity 0.
	node_intensity: HashMap<NodeId, f64>,
	/// Per-node hold timer - time remaining before fade-out can begin
	hold_timer: HashMap<NodeId, f64>,
	/// Cached max intensity (updated each tick)
	cached_max: f64,
}

/// Minimum time (seconds) a highlight must be held before it can fade out.
const MIN_HOLD_TIME: f64 = 0.12;

impl HighlightState {
	/// Update the hovered node and recompute the target highlight set.
	pub fn set_hover(&mut self, node: Option<NodeId>, edges: &[FlowEdge]) {
		if self.hovered_node == node {
			return;
		}

		self.hovered_node = node;
		self.target_set.clear();

		if let Some(id) = node {
			self.target_set.insert(id);
			for edge in edges {
				if edge.source == id {
					self.target_set.insert(edge.target);
				} else if edge.target == id {
					self.target_set.insert(edge.source);
				}
			}
			for &id in &self.target_set {
				self.hold_timer.insert(id, MIN_HOLD_TIME);
			}
		}
	}

	/// Animate all node intensities towards their targets.
	///
	/// value += (target - value) * (1 - e^(-speed * dt))
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0; // ~150ms to 95%
		const FADE_OUT_SPEED: f64 = 4.0; // ~250ms to 95%

		let fade_in_factor = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out_decay = (-FADE_OUT_SPEED * dt).exp();

		for &id in &self.target_set {
			let intensity = self.node_intensity.entry(id).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in_factor;
		}

		self.hold_timer.retain(|id, timer| {
			if self.target_set.contains(id) {
				true
			} else {
				*timer -= dt;
				*timer > 0.0
			}
		});

		let mut new_max: f64 = 0.0;
		self.node_intensity.retain(|id, intensity| {
			if !self.target_set.contains(id) {
				let hold_remaining = self.hold_timer.get(id).copied().unwrap_or(0.0);
				if hold_remaining <= 0.0 {
					*intensity *= fade_out_decay;
				}
			}
			new_max = new_max.max(*intensity);
			self.target_set.contains(id) || *intensity > 0.005
		});

		self.cached_max = new_max;
	}

	pub fn node_intensity(&self, id: NodeId) -> f64 {
		self.node_intensity.get(&id).copied().unwrap_or(0.0)
	}

	/// Geometric mean of the endpoint intensities.
	pub fn edge_intensity(&self, source: NodeId, target: NodeId) -> f64 {
		(self.node_intensity(source) * self.node_intensity(target)).sqrt()
	}

	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}

	/// Drop state for nodes that no longer exist.
	pub fn retain_nodes(&mut self, alive: impl Fn(NodeId) -> bool) {
		if self.hovered_node.is_some_and(|id| !alive(id)) {
			self.hovered_node = None;
		}
		self.target_set.retain(|&id| alive(id));
		self.node_intensity.retain(|&id, _| alive(id));
		self.hold_timer.retain(|&id, _| alive(id));
	}
}

/// Core canvas state combining view transform, gestures and highlights.
///
/// Created once when the component mounts, then mutated by event handlers and
/// advanced each frame by the animation loop.
pub struct CanvasState {
	pub transform: ViewTransform,
	/// Transform the view is easing towards, if any.
	pub transform_target: Option<ViewTransform>,
	pub drag: DragState,
	pub pan: PanState,
	pub connect: Option<ConnectState>,
	pub press: Option<Press>,
	/// Pointer is held down on the minimap.
	pub minimap_drag: bool,
	pub highlight: HighlightState,
	/// Edge last clicked on the canvas; Backspace removes it.
	pub focused_edge: Option<EdgeId>,
	pub width: f64,
	pub height: f64,
	pub scale_config: ScaleConfig,
}

impl CanvasState {
	pub fn new(width: f64, height: f64, scale_config: ScaleConfig) -> Self {
		Self {
			transform: ViewTransform::default(),
			transform_target: None,
			drag: DragState::default(),
			pan: PanState::default(),
			connect: None,
			press: None,
			minimap_drag: false,
			highlight: HighlightState::default(),
			focused_edge: None,
			width,
			height,
			scale_config,
		}
	}

	pub fn scaled(&self) -> ScaledValues {
		ScaledValues::new(&self.scale_config, self.transform.k)
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Visible world-space rectangle.
	pub fn viewport_rect(&self) -> Rect {
		let (x, y) = self.screen_to_graph(0.0, 0.0);
		Rect {
			x,
			y,
			w: self.width / self.transform.k,
			h: self.height / self.transform.k,
		}
	}

	/// Topmost node under a screen position. Later nodes draw on top.
	pub fn node_at_position(&self, sx: f64, sy: f64, nodes: &[FlowNode]) -> Option<NodeId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = self.scaled();
		nodes
			.iter()
			.rev()
			.find(|n| geometry::node_rect(n.position, &scale).contains(gx, gy))
			.map(|n| n.id)
	}

	/// Connection handle under a screen position.
	pub fn handle_at_position(
		&self,
		sx: f64,
		sy: f64,
		nodes: &[FlowNode],
	) -> Option<(NodeId, HandleSide)> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = self.scaled();
		let near = |(hx, hy): (f64, f64)| {
			((hx - gx).powi(2) + (hy - gy).powi(2)).sqrt() <= scale.handle_hit_radius
		};
		nodes.iter().rev().find_map(|n| {
			if n.kind.has_source_handle() && near(geometry::source_handle(n.position, &scale)) {
				Some((n.id, HandleSide::Source))
			} else if n.kind.has_target_handle()
				&& near(geometry::target_handle(n.position, &scale))
			{
				Some((n.id, HandleSide::Target))
			} else {
				None
			}
		})
	}

	/// Edge whose curve passes within the click tolerance of a screen position.
	pub fn edge_at_position(
		&self,
		sx: f64,
		sy: f64,
		nodes: &[FlowNode],
		edges: &[FlowEdge],
	) -> Option<EdgeId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = self.scaled();
		let positions: HashMap<NodeId, Position> = nodes.iter().map(|n| (n.id, n.position)).collect();
		edges
			.iter()
			.filter_map(|e| {
				let curve = edge_curve(e, &positions, &scale)?;
				let d = curve.distance_to(gx, gy);
				(d <= scale.edge_hit_tolerance).then(|| (d, e.id.clone()))
			})
			.min_by(|a, b| a.0.total_cmp(&b.0))
			.map(|(_, id)| id)
	}

	/// Hit-test in priority order: handles, nodes, edges, empty pane.
	pub fn hit_test(&self, sx: f64, sy: f64, nodes: &[FlowNode], edges: &[FlowEdge]) -> Hit {
		if let Some((id, side)) = self.handle_at_position(sx, sy, nodes) {
			return Hit::Handle(id, side);
		}
		if let Some(id) = self.node_at_position(sx, sy, nodes) {
			return Hit::Node(id);
		}
		if let Some(id) = self.edge_at_position(sx, sy, nodes, edges) {
			return Hit::Edge(id);
		}
		Hit::Pane
	}

	/// Node that would accept a connection dropped at a screen position.
	///
	/// Dropping on a target handle or anywhere on a node with a target handle
	/// both count.
	pub fn connection_target(&self, sx: f64, sy: f64, nodes: &[FlowNode]) -> Option<NodeId> {
		if let Some((id, HandleSide::Target)) = self.handle_at_position(sx, sy, nodes) {
			return Some(id);
		}
		let id = self.node_at_position(sx, sy, nodes)?;
		nodes
			.iter()
			.find(|n| n.id == id && n.kind.has_target_handle())
			.map(|n| n.id)
	}

	/// Start the gesture for a press at `(x, y)` on `hit`.
	///
	/// A source handle starts a connection. Nodes and their target handles
	/// start a drag; anything else pans.
	pub fn press_at(&mut self, x: f64, y: f64, hit: Hit, nodes: &[FlowNode]) {
		match &hit {
			Hit::Handle(id, HandleSide::Source) => {
				self.connect = Some(ConnectState {
					source: *id,
					cursor: self.screen_to_graph(x, y),
				});
			}
			Hit::Handle(id, HandleSide::Target) | Hit::Node(id) => {
				if let Some(node) = nodes.iter().find(|n| n.id == *id) {
					self.drag = DragState {
						active: true,
						node: Some(*id),
						start_x: x,
						start_y: y,
						node_start: node.position,
					};
				}
			}
			Hit::Edge(_) | Hit::Pane => {
				self.pan = PanState {
					active: true,
					start_x: x,
					start_y: y,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
				self.transform_target = None;
			}
		}
		self.press = Some(Press {
			x,
			y,
			hit,
			moved: false,
		});
	}

	/// Note pointer travel; once it exceeds [`CLICK_SLOP`] the press is a drag.
	pub fn track_press(&mut self, x: f64, y: f64) -> bool {
		match self.press.as_mut() {
			Some(press) => {
				if (x - press.x).hypot(y - press.y) > CLICK_SLOP {
					press.moved = true;
				}
				press.moved
			}
			None => false,
		}
	}

	/// Position change for the dragged node with the pointer at `(x, y)`.
	/// Nothing moves until the press has left the click slop.
	pub fn drag_change(&self, x: f64, y: f64) -> Option<NodeChange> {
		let id = self.drag.node.filter(|_| self.drag.active)?;
		if !self.press.as_ref().is_some_and(|p| p.moved) {
			return None;
		}
		let k = self.transform.k;
		Some(NodeChange::Position {
			id,
			position: Position::new(
				self.drag.node_start.x + (x - self.drag.start_x) / k,
				self.drag.node_start.y + (y - self.drag.start_y) / k,
			),
		})
	}

	/// End the current gesture. `point` is `None` when the pointer position is
	/// unknown.
	///
	/// A moved connection dropped on a node with a target handle connects. A
	/// press that never left the click slop is a click on what it hit; an edge
	/// click focuses the edge, any other click drops the focus.
	pub fn release(&mut self, point: Option<(f64, f64)>, nodes: &[FlowNode]) -> Vec<CanvasEvent> {
		let press = self.press.take();
		let connect = self.connect.take();
		self.reset_gestures();

		let mut events = Vec::new();
		match (connect, point, press) {
			(Some(connect), Some((x, y)), Some(press)) if press.moved => {
				if let Some(target) = self.connection_target(x, y, nodes) {
					events.push(CanvasEvent::Connect(Connection {
						source: connect.source,
						target,
					}));
				}
			}
			(_, _, Some(press)) if !press.moved => match press.hit {
				Hit::Handle(id, _) | Hit::Node(id) => {
					self.focused_edge = None;
					events.push(CanvasEvent::NodeClick(id));
				}
				Hit::Edge(id) => {
					self.focused_edge = Some(id.clone());
					events.push(CanvasEvent::EdgeClick(id));
				}
				Hit::Pane => {
					self.focused_edge = None;
					events.push(CanvasEvent::PaneClick);
				}
			},
			_ => {}
		}
		events
	}

	/// Change lists for the delete key: the focused edge, or else the selected
	/// node preceded by removals of its incident edges.
	pub fn delete_events(&mut self, selected: Option<NodeId>, edges: &[FlowEdge]) -> Vec<CanvasEvent> {
		if let Some(id) = self.focused_edge.take() {
			return vec![CanvasEvent::Edges(vec![EdgeChange::Remove { id }])];
		}
		let Some(id) = selected else {
			return Vec::new();
		};
		let incident: Vec<EdgeChange> = edges
			.iter()
			.filter(|e| e.touches(id))
			.map(|e| EdgeChange::Remove { id: e.id.clone() })
			.collect();
		let mut events = Vec::new();
		if !incident.is_empty() {
			events.push(CanvasEvent::Edges(incident));
		}
		events.push(CanvasEvent::Nodes(vec![NodeChange::Remove { id }]));
		events
	}

	/// Zoom by `factor` keeping the screen point `(x, y)` fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		self.transform_target = None;
		let new_k = (self.transform.k * factor)
			.clamp(self.scale_config.min_zoom, self.scale_config.max_zoom);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Zoom around the canvas centre.
	pub fn zoom_by(&mut self, factor: f64) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, factor);
	}

	/// Transform that centres the world point `(wx, wy)` at zoom `k`.
	pub fn centered_on(&self, wx: f64, wy: f64, k: f64) -> ViewTransform {
		ViewTransform {
			x: self.width / 2.0 - wx * k,
			y: self.height / 2.0 - wy * k,
			k,
		}
	}

	/// Fit every node into view with `padding` screen pixels on each side.
	pub fn fit_view(&mut self, nodes: &[FlowNode], padding: f64) {
		let scale = self.scaled();
		let Some(bounds) = geometry::nodes_bounds(nodes, &scale) else {
			return;
		};
		let avail_w = (self.width - 2.0 * padding).max(1.0);
		let avail_h = (self.height - 2.0 * padding).max(1.0);
		let k = (avail_w / bounds.w)
			.min(avail_h / bounds.h)
			.clamp(self.scale_config.min_zoom, 2.0_f64.min(self.scale_config.max_zoom));
		let (cx, cy) = bounds.center();
		self.transform = self.centered_on(cx, cy, k);
		self.transform_target = None;
	}

	/// Start easing towards a view that shows `node` when it is not fully visible.
	pub fn ensure_visible(&mut self, node: &FlowNode) {
		let scale = self.scaled();
		let rect = geometry::node_rect(node.position, &scale);
		if self.viewport_rect().encloses(&rect) {
			return;
		}
		let (cx, cy) = rect.center();
		self.transform_target = Some(self.centered_on(cx, cy, self.transform.k));
	}

	/// Jump the view so the world point is centred, keeping zoom.
	pub fn center_on(&mut self, wx: f64, wy: f64) {
		self.transform = self.centered_on(wx, wy, self.transform.k);
		self.transform_target = None;
	}

	pub fn set_hover(&mut self, node: Option<NodeId>, edges: &[FlowEdge]) {
		self.highlight.set_hover(node, edges);
	}

	/// Cancel all gestures.
	pub fn reset_gestures(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.connect = None;
		self.press = None;
		self.minimap_drag = false;
	}

	pub fn tick(&mut self, dt: f64) {
		self.highlight.tick(dt);

		if let Some(target) = self.transform_target {
			const PAN_SPEED: f64 = 8.0;
			let f = 1.0 - (-PAN_SPEED * dt).exp();
			self.transform.x += (target.x - self.transform.x) * f;
			self.transform.y += (target.y - self.transform.y) * f;
			self.transform.k += (target.k - self.transform.k) * f;
			let close = (target.x - self.transform.x).abs() < 0.5
				&& (target.y - self.transform.y).abs() < 0.5
				&& (target.k - self.transform.k).abs() < 1e-3;
			if close {
				self.transform = target;
				self.transform_target = None;
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// Curve for an edge, or `None` if either endpoint is missing.
pub fn edge_curve(
	edge: &FlowEdge,
	positions: &HashMap<NodeId, Position>,
	scale: &ScaledValues,
) -> Option<EdgeCurve> {
	let source = positions.get(&edge.source)?;
	let target = positions.get(&edge.target)?;
	Some(EdgeCurve::between(
		geometry::source_handle(*source, scale),
		geometry::target_handle(*target, scale),
	))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::NodeKind;

	fn node(id: u64, kind: NodeKind, x: f64, y: f64) -> FlowNode {
		FlowNode {
			id: NodeId(id),
			kind,
			label: String::new(),
			position: Position::new(x, y),
		}
	}

	fn edge(source: u64, target: u64) -> FlowEdge {
		FlowEdge {
			id: EdgeId::between(NodeId(source), NodeId(target)),
			source: NodeId(source),
			target: NodeId(target),
		}
	}

	fn state() -> CanvasState {
		CanvasState::new(800.0, 600.0, ScaleConfig::default())
	}

	#[test]
	fn node_hit_prefers_topmost() {
		let s = state();
		let nodes = vec![
			node(1, NodeKind::Default, 0.0, 0.0),
			node(2, NodeKind::Default, 50.0, 10.0),
		];
		assert_eq!(s.node_at_position(60.0, 20.0, &nodes), Some(NodeId(2)));
		assert_eq!(s.node_at_position(10.0, 10.0, &nodes), Some(NodeId(1)));
		assert_eq!(s.node_at_position(500.0, 500.0, &nodes), None);
	}

	#[test]
	fn handles_respect_node_kind() {
		let s = state();
		let input = vec![node(1, NodeKind::Input, 0.0, 0.0)];
		assert_eq!(
			s.handle_at_position(75.0, 40.0, &input),
			Some((NodeId(1), HandleSide::Source))
		);
		assert_eq!(s.handle_at_position(75.0, 0.0, &input), None);

		let output = vec![node(2, NodeKind::Output, 0.0, 0.0)];
		assert_eq!(
			s.handle_at_position(75.0, 0.0, &output),
			Some((NodeId(2), HandleSide::Target))
		);
		assert_eq!(s.handle_at_position(75.0, 40.0, &output), None);
	}

	#[test]
	fn hit_test_priority() {
		let s = state();
		let nodes = vec![
			node(1, NodeKind::Input, 0.0, 0.0),
			node(2, NodeKind::Output, 0.0, 200.0),
		];
		let edges = vec![edge(1, 2)];
		assert_eq!(
			s.hit_test(75.0, 40.0, &nodes, &edges),
			Hit::Handle(NodeId(1), HandleSide::Source)
		);
		assert_eq!(s.hit_test(20.0, 20.0, &nodes, &edges), Hit::Node(NodeId(1)));
		assert_eq!(
			s.hit_test(75.0, 120.0, &nodes, &edges),
			Hit::Edge(edge(1, 2).id)
		);
		assert_eq!(s.hit_test(400.0, 120.0, &nodes, &edges), Hit::Pane);
	}

	#[test]
	fn connection_target_requires_target_handle() {
		let s = state();
		let nodes = vec![
			node(1, NodeKind::Input, 0.0, 0.0),
			node(2, NodeKind::Default, 300.0, 0.0),
		];
		assert_eq!(s.connection_target(20.0, 20.0, &nodes), None);
		assert_eq!(s.connection_target(320.0, 20.0, &nodes), Some(NodeId(2)));
	}

	#[test]
	fn zoom_keeps_cursor_point_fixed_and_clamps() {
		let mut s = state();
		let before = s.screen_to_graph(200.0, 100.0);
		s.zoom_at(200.0, 100.0, 2.0);
		let after = s.screen_to_graph(200.0, 100.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);

		for _ in 0..100 {
			s.zoom_by(2.0);
		}
		assert_eq!(s.transform.k, 10.0);
	}

	#[test]
	fn fit_view_centres_nodes() {
		let mut s = state();
		let nodes = vec![
			node(1, NodeKind::Default, 1000.0, 1000.0),
			node(2, NodeKind::Default, 1200.0, 1100.0),
		];
		s.fit_view(&nodes, 20.0);
		let scale = s.scaled();
		let bounds = geometry::nodes_bounds(&nodes, &scale).unwrap();
		assert!(s.viewport_rect().encloses(&bounds));
		let (cx, cy) = bounds.center();
		let center = s.screen_to_graph(400.0, 300.0);
		assert!((center.0 - cx).abs() < 1e-6);
		assert!((center.1 - cy).abs() < 1e-6);
	}

	#[test]
	fn ensure_visible_eases_towards_offscreen_node() {
		let mut s = state();
		let visible = node(1, NodeKind::Default, 10.0, 10.0);
		s.ensure_visible(&visible);
		assert!(s.transform_target.is_none());

		let far = node(2, NodeKind::Default, 5000.0, 5000.0);
		s.ensure_visible(&far);
		assert!(s.transform_target.is_some());
		for _ in 0..600 {
			s.tick(0.016);
		}
		assert!(s.transform_target.is_none());
		let rect = geometry::node_rect(far.position, &s.scaled());
		assert!(s.viewport_rect().encloses(&rect));
	}

	fn press(s: &mut CanvasState, x: f64, y: f64, nodes: &[FlowNode], edges: &[FlowEdge]) {
		let hit = s.hit_test(x, y, nodes, edges);
		s.press_at(x, y, hit, nodes);
	}

	#[test]
	fn small_wiggle_on_a_node_is_still_a_click() {
		let mut s = state();
		let nodes = vec![node(1, NodeKind::Default, 0.0, 0.0)];
		press(&mut s, 20.0, 20.0, &nodes, &[]);
		assert!(!s.track_press(22.0, 21.0));
		assert_eq!(s.drag_change(22.0, 21.0), None);
		assert_eq!(
			s.release(Some((22.0, 21.0)), &nodes),
			vec![CanvasEvent::NodeClick(NodeId(1))]
		);
		assert!(!s.drag.active);
		assert!(s.press.is_none());
	}

	#[test]
	fn dragging_past_the_slop_moves_without_clicking() {
		let mut s = state();
		let nodes = vec![node(1, NodeKind::Default, 0.0, 0.0)];
		press(&mut s, 20.0, 20.0, &nodes, &[]);
		assert!(s.track_press(60.0, 50.0));
		assert_eq!(
			s.drag_change(60.0, 50.0),
			Some(NodeChange::Position {
				id: NodeId(1),
				position: Position::new(40.0, 30.0),
			})
		);
		// back inside the slop radius, still a drag
		assert!(s.track_press(21.0, 20.0));
		assert!(s.release(Some((21.0, 20.0)), &nodes).is_empty());
	}

	#[test]
	fn drag_follows_zoom() {
		let mut s = state();
		s.transform.k = 2.0;
		let nodes = vec![node(1, NodeKind::Default, 0.0, 0.0)];
		press(&mut s, 20.0, 20.0, &nodes, &[]);
		s.track_press(40.0, 20.0);
		assert_eq!(
			s.drag_change(40.0, 20.0),
			Some(NodeChange::Position {
				id: NodeId(1),
				position: Position::new(10.0, 0.0),
			})
		);
	}

	#[test]
	fn edge_click_focuses_the_edge() {
		let mut s = state();
		let nodes = vec![
			node(1, NodeKind::Input, 0.0, 0.0),
			node(2, NodeKind::Output, 0.0, 200.0),
		];
		let edges = vec![edge(1, 2)];
		press(&mut s, 75.0, 120.0, &nodes, &edges);
		assert!(s.pan.active);
		assert_eq!(
			s.release(Some((75.0, 120.0)), &nodes),
			vec![CanvasEvent::EdgeClick(edge(1, 2).id)]
		);
		assert_eq!(s.focused_edge, Some(edge(1, 2).id));
		assert!(!s.pan.active);

		// a later pane click drops the focus
		press(&mut s, 400.0, 120.0, &nodes, &edges);
		assert_eq!(
			s.release(Some((400.0, 120.0)), &nodes),
			vec![CanvasEvent::PaneClick]
		);
		assert_eq!(s.focused_edge, None);
	}

	#[test]
	fn panning_the_pane_is_not_a_click() {
		let mut s = state();
		press(&mut s, 400.0, 300.0, &[], &[]);
		assert!(s.track_press(450.0, 300.0));
		assert!(s.release(Some((450.0, 300.0)), &[]).is_empty());
	}

	#[test]
	fn source_handle_drag_connects_to_target() {
		let mut s = state();
		let nodes = vec![
			node(1, NodeKind::Input, 0.0, 0.0),
			node(2, NodeKind::Default, 300.0, 0.0),
		];
		press(&mut s, 75.0, 40.0, &nodes, &[]);
		assert_eq!(s.connect.as_ref().map(|c| c.source), Some(NodeId(1)));
		s.track_press(320.0, 20.0);
		assert_eq!(
			s.release(Some((320.0, 20.0)), &nodes),
			vec![CanvasEvent::Connect(Connection {
				source: NodeId(1),
				target: NodeId(2),
			})]
		);
		assert!(s.connect.is_none());

		// dropped on empty pane: nothing
		press(&mut s, 75.0, 40.0, &nodes, &[]);
		s.track_press(600.0, 500.0);
		assert!(s.release(Some((600.0, 500.0)), &nodes).is_empty());

		// never left the handle: a click on its node
		press(&mut s, 75.0, 40.0, &nodes, &[]);
		assert_eq!(
			s.release(Some((75.0, 40.0)), &nodes),
			vec![CanvasEvent::NodeClick(NodeId(1))]
		);
	}

	#[test]
	fn release_without_pointer_cancels_connection() {
		let mut s = state();
		let nodes = vec![
			node(1, NodeKind::Input, 0.0, 0.0),
			node(2, NodeKind::Default, 300.0, 0.0),
		];
		press(&mut s, 75.0, 40.0, &nodes, &[]);
		s.track_press(320.0, 20.0);
		assert!(s.release(None, &nodes).is_empty());
		assert!(s.connect.is_none());
	}

	#[test]
	fn delete_prefers_the_focused_edge() {
		let mut s = state();
		let edges = vec![edge(1, 2), edge(2, 3)];
		s.focused_edge = Some(edge(1, 2).id);
		assert_eq!(
			s.delete_events(Some(NodeId(2)), &edges),
			vec![CanvasEvent::Edges(vec![EdgeChange::Remove {
				id: edge(1, 2).id,
			}])]
		);
		assert_eq!(s.focused_edge, None);
	}

	#[test]
	fn delete_removes_incident_edges_before_the_node() {
		let mut s = state();
		let edges = vec![edge(1, 2), edge(2, 3), edge(3, 4)];
		assert_eq!(
			s.delete_events(Some(NodeId(2)), &edges),
			vec![
				CanvasEvent::Edges(vec![
					EdgeChange::Remove { id: edge(1, 2).id },
					EdgeChange::Remove { id: edge(2, 3).id },
				]),
				CanvasEvent::Nodes(vec![NodeChange::Remove { id: NodeId(2) }]),
			]
		);

		// isolated node: no empty edge list
		assert_eq!(
			s.delete_events(Some(NodeId(9)), &edges),
			vec![CanvasEvent::Nodes(vec![NodeChange::Remove { id: NodeId(9) }])]
		);
	}

	#[test]
	fn delete_with_nothing_selected_does_nothing() {
		let mut s = state();
		assert!(s.delete_events(None, &[edge(1, 2)]).is_empty());
	}

	#[test]
	fn highlight_covers_neighbours_and_fades() {
		let mut h = HighlightState::default();
		let edges = vec![edge(1, 2), edge(3, 1), edge(4, 5)];
		h.set_hover(Some(NodeId(1)), &edges);
		h.tick(0.1);
		assert!(h.node_intensity(NodeId(2)) > 0.0);
		assert!(h.node_intensity(NodeId(3)) > 0.0);
		assert_eq!(h.node_intensity(NodeId(4)), 0.0);
		assert!(h.edge_intensity(NodeId(1), NodeId(2)) > 0.0);

		h.set_hover(None, &edges);
		for _ in 0..200 {
			h.tick(0.016);
		}
		assert_eq!(h.node_intensity(NodeId(1)), 0.0);
		assert_eq!(h.max_intensity(), 0.0);
	}

	#[test]
	fn highlight_forgets_removed_nodes() {
		let mut h = HighlightState::default();
		h.set_hover(Some(NodeId(7)), &[]);
		h.tick(0.1);
		h.retain_nodes(|id| id != NodeId(7));
		assert_eq!(h.hovered_node, None);
		assert_eq!(h.node_intensity(NodeId(7)), 0.0);
	}
}
