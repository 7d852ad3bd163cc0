//! Minimap overlay geometry.
//!
//! The minimap shows every node plus the current viewport, scaled to fit a
//! fixed box in the bottom-right corner of the canvas.

use crate::graph::FlowNode;

use super::geometry::{self, Rect};
use super::state::CanvasState;

/// Minimap box size and placement, in screen pixels.
#[derive(Clone, Debug)]
pub struct MinimapConfig {
	pub width: f64,
	pub height: f64,
	/// Distance from the bottom-right canvas corner.
	pub margin: f64,
	/// Padding between the box edge and the content.
	pub padding: f64,
}

impl Default for MinimapConfig {
	fn default() -> Self {
		Self {
			width: 200.0,
			height: 150.0,
			margin: 15.0,
			padding: 8.0,
		}
	}
}

/// Mapping between world space and the minimap box for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimapLayout {
	/// Minimap box on screen.
	pub frame: Rect,
	/// Pixels per world unit.
	pub scale: f64,
	/// Screen position of world origin.
	pub offset: (f64, f64),
}

impl MinimapLayout {
	/// Fit `content` (nodes and viewport, in world space) into the minimap box of
	/// a canvas of `canvas_w` x `canvas_h`.
	pub fn compute(config: &MinimapConfig, canvas_w: f64, canvas_h: f64, content: Rect) -> Self {
		let frame = Rect {
			x: canvas_w - config.width - config.margin,
			y: canvas_h - config.height - config.margin,
			w: config.width,
			h: config.height,
		};
		let inner_w = (config.width - 2.0 * config.padding).max(1.0);
		let inner_h = (config.height - 2.0 * config.padding).max(1.0);
		let scale = (inner_w / content.w.max(1.0)).min(inner_h / content.h.max(1.0));
		// centre the content in the box
		let (cw, ch) = (content.w * scale, content.h * scale);
		let offset = (
			frame.x + config.padding + (inner_w - cw) / 2.0 - content.x * scale,
			frame.y + config.padding + (inner_h - ch) / 2.0 - content.y * scale,
		);
		Self {
			frame,
			scale,
			offset,
		}
	}

	/// Layout for the current frame: all nodes plus the visible area.
	pub fn for_view(config: &MinimapConfig, state: &CanvasState, nodes: &[FlowNode]) -> Self {
		let viewport = state.viewport_rect();
		let content = geometry::nodes_bounds(nodes, &state.scaled())
			.map(|b| b.union(&viewport))
			.unwrap_or(viewport);
		Self::compute(config, state.width, state.height, content)
	}

	pub fn contains(&self, sx: f64, sy: f64) -> bool {
		self.frame.contains(sx, sy)
	}

	pub fn world_to_minimap(&self, wx: f64, wy: f64) -> (f64, f64) {
		(self.offset.0 + wx * self.scale, self.offset.1 + wy * self.scale)
	}

	pub fn minimap_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.offset.0) / self.scale, (sy - self.offset.1) / self.scale)
	}

	pub fn rect_to_minimap(&self, r: &Rect) -> Rect {
		let (x, y) = self.world_to_minimap(r.x, r.y);
		Rect {
			x,
			y,
			w: r.w * self.scale,
			h: r.h * self.scale,
		}
	}
}
