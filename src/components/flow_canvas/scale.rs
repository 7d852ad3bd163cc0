//! Zoom-dependent scaling configuration for canvas visuals.
//!
//! Centralizes every zoom-dependent parameter so it is clear how nodes, edges,
//! handles and the background grid behave at different zoom levels.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: The coordinate system of the graph (node positions).
//!   Values in world-space scale with zoom.
//! - **Screen-space**: Pixel coordinates on the canvas. Values in screen-space
//!   remain constant regardless of zoom level.
//!
//! # Scaling Behaviors
//!
//! - [`ScaleBehavior::World`]: Scales with zoom.
//! - [`ScaleBehavior::Screen`]: Constant pixel size; divides by `k` to counteract
//!   the canvas transform.
//! - [`ScaleBehavior::Clamped`]: World-space scaling with min/max screen-size bounds.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	/// Use `f64::INFINITY` for an unbounded maximum.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = world_size * k
				let min_world = min_screen / k;
				let max_world = max_screen / k;
				base.clamp(min_world, max_world)
			}
		}
	}
}

/// Defines how alpha/opacity scales with zoom level.
#[derive(Clone, Debug)]
pub enum AlphaBehavior {
	/// Constant alpha regardless of zoom.
	Constant,
	/// Fully visible at `full_alpha_k`, fades to zero at `zero_alpha_k`.
	Fade {
		zero_alpha_k: f64,
		full_alpha_k: f64,
	},
}

impl AlphaBehavior {
	/// Compute alpha multiplier for a given zoom level.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				let t = (k - zero_alpha_k) / (full_alpha_k - zero_alpha_k);
				t.clamp(0.0, 1.0)
			}
		}
	}
}

/// Configuration for node box scaling.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Box width in world units.
	pub width: f64,
	/// Box height in world units.
	pub height: f64,
	/// Corner radius in world units.
	pub corner_radius: f64,
	/// Border width in screen pixels.
	pub border_width: f64,
	/// Label font size in world units.
	pub label_size: f64,
	/// Below this zoom level labels stop shrinking.
	pub label_min_k: f64,
	/// Handle dot radius.
	pub handle_radius: f64,
	pub handle_behavior: ScaleBehavior,
	/// Handle hit radius, generous so handles are easy to grab.
	pub handle_hit_radius: f64,
	pub handle_hit_behavior: ScaleBehavior,
}

/// Configuration for edge scaling.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Base line width in screen pixels.
	pub line_width: f64,
	/// Arrow size in world units.
	pub arrow_size: f64,
	pub arrow_behavior: ScaleBehavior,
	/// Click tolerance around the curve in screen pixels.
	pub hit_tolerance: f64,
}

/// Configuration for the dot grid.
#[derive(Clone, Debug)]
pub struct GridScaleConfig {
	/// How dot visibility scales with zoom; dense grids fade out.
	pub alpha_behavior: AlphaBehavior,
	/// Smallest on-screen dot spacing worth drawing, in pixels.
	pub min_screen_gap: f64,
}

/// Configuration for the selection and hover rings.
#[derive(Clone, Debug)]
pub struct RingScaleConfig {
	/// Selected outline width in screen pixels.
	pub selected_width: f64,
	/// Halo spread around the selected node in screen pixels.
	pub glow_spread: f64,
	/// Hover ring offset from the box edge in screen pixels.
	pub hover_offset: f64,
}

/// Complete scale configuration for all canvas elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub edge: EdgeScaleConfig,
	pub grid: GridScaleConfig,
	pub ring: RingScaleConfig,
	/// Allowed zoom range.
	pub min_zoom: f64,
	pub max_zoom: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				width: 150.0,
				height: 40.0,
				corner_radius: 3.0,
				border_width: 1.0,
				label_size: 12.0,
				label_min_k: 0.5,
				handle_radius: 3.5,
				handle_behavior: ScaleBehavior::Clamped {
					min_screen: 3.0,
					max_screen: f64::INFINITY,
				},
				handle_hit_radius: 10.0,
				handle_hit_behavior: ScaleBehavior::Clamped {
					min_screen: 8.0,
					max_screen: f64::INFINITY,
				},
			},
			edge: EdgeScaleConfig {
				line_width: 1.5,
				arrow_size: 8.0,
				arrow_behavior: ScaleBehavior::Clamped {
					min_screen: 4.0,
					max_screen: 16.0,
				},
				hit_tolerance: 6.0,
			},
			grid: GridScaleConfig {
				alpha_behavior: AlphaBehavior::Fade {
					zero_alpha_k: 0.4,
					full_alpha_k: 0.8,
				},
				min_screen_gap: 5.0,
			},
			ring: RingScaleConfig {
				selected_width: 2.0,
				glow_spread: 6.0,
				hover_offset: 3.0,
			},
			min_zoom: 0.1,
			max_zoom: 10.0,
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
/// All sizes are in world-space (ready to use after canvas transform).
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	pub node_width: f64,
	pub node_height: f64,
	pub corner_radius: f64,
	pub border_width: f64,
	/// Label font string (e.g., "12px sans-serif").
	pub label_font: String,
	/// Label font size in world units, used to estimate text width.
	pub label_size: f64,
	pub handle_radius: f64,
	pub handle_hit_radius: f64,
	pub edge_line_width: f64,
	pub arrow_size: f64,
	pub edge_hit_tolerance: f64,
	/// Grid visibility [0, 1].
	pub grid_alpha: f64,
	pub selected_width: f64,
	pub glow_spread: f64,
	pub hover_offset: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let node = &config.node;
		let label_size = node.label_size * k.max(node.label_min_k) / k;

		Self {
			k,
			node_width: node.width,
			node_height: node.height,
			corner_radius: node.corner_radius,
			border_width: node.border_width / k,
			label_font: format!("{}px sans-serif", label_size),
			label_size,
			handle_radius: node.handle_behavior.apply(node.handle_radius, k),
			handle_hit_radius: node.handle_hit_behavior.apply(node.handle_hit_radius, k),
			edge_line_width: config.edge.line_width / k,
			arrow_size: config.edge.arrow_behavior.apply(config.edge.arrow_size, k),
			edge_hit_tolerance: config.edge.hit_tolerance / k,
			grid_alpha: config.grid.alpha_behavior.apply(k),
			selected_width: config.ring.selected_width / k,
			glow_spread: config.ring.glow_spread / k,
			hover_offset: config.ring.hover_offset / k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_behavior_keeps_minimum_screen_size() {
		let behavior = ScaleBehavior::Clamped {
			min_screen: 4.0,
			max_screen: 16.0,
		};
		// zoomed far out: 8 world units would be 0.8px, clamp to 4px = 40 world
		assert!((behavior.apply(8.0, 0.1) - 40.0).abs() < 1e-9);
		// zoomed far in: 8 world units would be 80px, clamp to 16px = 1.6 world
		assert!((behavior.apply(8.0, 10.0) - 1.6).abs() < 1e-9);
		assert_eq!(behavior.apply(8.0, 1.0), 8.0);
	}

	#[test]
	fn screen_behavior_divides_by_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(6.0, 2.0), 3.0);
		assert_eq!(ScaleBehavior::World.apply(6.0, 2.0), 6.0);
	}

	#[test]
	fn grid_fades_out_when_zoomed_out() {
		let fade = AlphaBehavior::Fade {
			zero_alpha_k: 0.4,
			full_alpha_k: 0.8,
		};
		assert_eq!(fade.apply(0.2), 0.0);
		assert_eq!(fade.apply(1.0), 1.0);
		assert!((fade.apply(0.6) - 0.5).abs() < 1e-9);
		assert_eq!(AlphaBehavior::Constant.apply(0.01), 1.0);
	}

	#[test]
	fn labels_stop_shrinking_below_min_zoom() {
		let config = ScaleConfig::default();
		let normal = ScaledValues::new(&config, 1.0);
		assert_eq!(normal.label_size, 12.0);
		// at k=0.25 the on-screen size stays at 12 * 0.5 = 6px
		let far = ScaledValues::new(&config, 0.25);
		assert!((far.label_size * 0.25 - 6.0).abs() < 1e-9);
	}
}
