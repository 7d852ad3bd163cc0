//! World-space geometry of nodes, handles and edge curves.

use crate::graph::{FlowNode, Position};

use super::scale::ScaledValues;

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub w: f64,
	pub h: f64,
}

impl Rect {
	pub fn contains(&self, px: f64, py: f64) -> bool {
		px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
	}

	pub fn center(&self) -> (f64, f64) {
		(self.x + self.w / 2.0, self.y + self.h / 2.0)
	}

	/// Smallest rectangle covering both.
	pub fn union(&self, other: &Rect) -> Rect {
		let x = self.x.min(other.x);
		let y = self.y.min(other.y);
		let right = (self.x + self.w).max(other.x + other.w);
		let bottom = (self.y + self.h).max(other.y + other.h);
		Rect {
			x,
			y,
			w: right - x,
			h: bottom - y,
		}
	}

	/// Whether `inner` lies entirely within this rectangle.
	pub fn encloses(&self, inner: &Rect) -> bool {
		inner.x >= self.x
			&& inner.y >= self.y
			&& inner.x + inner.w <= self.x + self.w
			&& inner.y + inner.h <= self.y + self.h
	}
}

/// Box of a node in world space.
pub fn node_rect(position: Position, scale: &ScaledValues) -> Rect {
	Rect {
		x: position.x,
		y: position.y,
		w: scale.node_width,
		h: scale.node_height,
	}
}

/// Bounding box of all nodes, or `None` when there are none.
pub fn nodes_bounds(nodes: &[FlowNode], scale: &ScaledValues) -> Option<Rect> {
	nodes
		.iter()
		.map(|n| node_rect(n.position, scale))
		.reduce(|acc, r| acc.union(&r))
}

/// Bottom-centre point where outgoing edges start.
pub fn source_handle(position: Position, scale: &ScaledValues) -> (f64, f64) {
	(position.x + scale.node_width / 2.0, position.y + scale.node_height)
}

/// Top-centre point where incoming edges end.
pub fn target_handle(position: Position, scale: &ScaledValues) -> (f64, f64) {
	(position.x + scale.node_width / 2.0, position.y)
}

/// Cubic bezier from a bottom handle to a top handle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeCurve {
	pub start: (f64, f64),
	pub c1: (f64, f64),
	pub c2: (f64, f64),
	pub end: (f64, f64),
}

impl EdgeCurve {
	/// Control points pull vertically away from each handle, further for
	/// handles that are close together or point backwards.
	pub fn between(start: (f64, f64), end: (f64, f64)) -> Self {
		let dy = end.1 - start.1;
		let pull = if dy >= 0.0 {
			(dy * 0.5).max(20.0)
		} else {
			25.0 * (-dy).sqrt().max(1.0)
		};
		Self {
			start,
			c1: (start.0, start.1 + pull),
			c2: (end.0, end.1 - pull),
			end,
		}
	}

	pub fn point_at(&self, t: f64) -> (f64, f64) {
		let u = 1.0 - t;
		let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
		(
			a * self.start.0 + b * self.c1.0 + c * self.c2.0 + d * self.end.0,
			a * self.start.1 + b * self.c1.1 + c * self.c2.1 + d * self.end.1,
		)
	}

	/// Unit direction of travel at the end of the curve.
	pub fn end_direction(&self) -> (f64, f64) {
		let (dx, dy) = (self.end.0 - self.c2.0, self.end.1 - self.c2.1);
		let len = (dx * dx + dy * dy).sqrt();
		if len < 1e-9 { (0.0, 1.0) } else { (dx / len, dy / len) }
	}

	/// Approximate distance from a point to the curve.
	pub fn distance_to(&self, px: f64, py: f64) -> f64 {
		const SEGMENTS: usize = 24;
		let mut best = f64::INFINITY;
		let mut prev = self.start;
		for i in 1..=SEGMENTS {
			let next = self.point_at(i as f64 / SEGMENTS as f64);
			best = best.min(distance_to_segment((px, py), prev, next));
			prev = next;
		}
		best
	}
}

pub fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (abx, aby) = (b.0 - a.0, b.1 - a.1);
	let len_sq = abx * abx + aby * aby;
	let t = if len_sq < 1e-12 {
		0.0
	} else {
		(((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + abx * t, a.1 + aby * t);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

/// Shorten a label so it fits in `max_width` given an average glyph width.
pub fn fit_label(label: &str, max_width: f64, glyph_width: f64) -> String {
	let max_chars = (max_width / glyph_width).floor().max(1.0) as usize;
	if label.chars().count() <= max_chars {
		return label.to_string();
	}
	let keep = max_chars.saturating_sub(1);
	let mut out: String = label.chars().take(keep).collect();
	out.push('…');
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::flow_canvas::scale::ScaleConfig;

	fn scale() -> ScaledValues {
		ScaledValues::new(&ScaleConfig::default(), 1.0)
	}

	#[test]
	fn handles_sit_on_box_edges() {
		let s = scale();
		let p = Position::new(10.0, 20.0);
		assert_eq!(source_handle(p, &s), (85.0, 60.0));
		assert_eq!(target_handle(p, &s), (85.0, 20.0));
	}

	#[test]
	fn bounds_cover_all_nodes() {
		use crate::graph::{NodeId, NodeKind};
		let s = scale();
		let nodes = [
			FlowNode {
				id: NodeId(1),
				kind: NodeKind::Default,
				label: String::new(),
				position: Position::new(-50.0, 0.0),
			},
			FlowNode {
				id: NodeId(2),
				kind: NodeKind::Default,
				label: String::new(),
				position: Position::new(100.0, 200.0),
			},
		];
		let b = nodes_bounds(&nodes, &s).unwrap();
		assert_eq!(
			b,
			Rect {
				x: -50.0,
				y: 0.0,
				w: 300.0,
				h: 240.0
			}
		);
		assert!(nodes_bounds(&[], &s).is_none());
	}

	#[test]
	fn curve_endpoints_and_distance() {
		let curve = EdgeCurve::between((0.0, 0.0), (0.0, 100.0));
		assert_eq!(curve.point_at(0.0), (0.0, 0.0));
		assert_eq!(curve.point_at(1.0), (0.0, 100.0));
		assert!(curve.distance_to(0.0, 50.0) < 1e-6);
		assert!((curve.distance_to(10.0, 50.0) - 10.0).abs() < 1e-6);
		assert_eq!(curve.end_direction(), (0.0, 1.0));
	}

	#[test]
	fn segment_distance_clamps_to_endpoints() {
		assert_eq!(distance_to_segment((-3.0, 4.0), (0.0, 0.0), (10.0, 0.0)), 5.0);
		assert_eq!(distance_to_segment((5.0, 2.0), (0.0, 0.0), (10.0, 0.0)), 2.0);
	}

	#[test]
	fn long_labels_are_ellipsized() {
		assert_eq!(fit_label("short", 100.0, 10.0), "short");
		assert_eq!(fit_label("abcdefghijkl", 50.0, 10.0), "abcd…");
	}

	#[test]
	fn rect_enclosure() {
		let outer = Rect {
			x: 0.0,
			y: 0.0,
			w: 100.0,
			h: 100.0,
		};
		let inner = Rect {
			x: 10.0,
			y: 10.0,
			w: 20.0,
			h: 20.0,
		};
		assert!(outer.encloses(&inner));
		assert!(!inner.encloses(&outer));
		assert!(outer.contains(100.0, 0.0));
	}
}
