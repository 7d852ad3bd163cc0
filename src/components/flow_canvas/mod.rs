//! Interactive node-graph canvas.
//!
//! Renders nodes and edges on an HTML canvas with:
//! - Pan, zoom and node dragging
//! - Drag-to-connect from source handles to target handles
//! - Hover highlights with smooth intensity transitions
//! - Dot-grid background, minimap and zoom/fit/arrange controls
//!
//! The canvas never owns the graph. It reads the `nodes` and `edges` signals
//! and reports everything the user does through callbacks; the owner decides
//! what to apply.
//!
//! # Example
//!
//! ```ignore
//! view! {
//!     <FlowCanvas
//!         nodes=nodes
//!         edges=edges
//!         selected=selected
//!         on_nodes_change=move |changes| store.update(|s| { s.apply_node_changes(&changes); })
//!         on_edges_change=move |changes| store.update(|s| s.apply_edge_changes(&changes))
//!         on_connect=move |c| { let _ = store.try_update(|s| s.connect(c)); }
//!         on_node_click=move |id| selection.update(|s| s.select(id))
//!         on_node_double_click=move |id| selection.update(|s| s.begin_edit(id))
//!         on_edge_click=move |_| selection.update(|s| s.clear())
//!         on_pane_click=move |_| selection.update(|s| s.clear())
//!     />
//! }
//! ```

mod component;
pub mod geometry;
pub mod minimap;
mod render;
pub mod scale;
pub mod state;
pub mod theme;

pub use component::FlowCanvas;
pub use theme::Theme;

use crate::config::EditorConfig;

use self::minimap::MinimapConfig;
use self::scale::ScaleConfig;

/// Visual and behavioural options for [`FlowCanvas`].
#[derive(Clone, Debug)]
pub struct CanvasOptions {
	pub theme: Theme,
	pub scale: ScaleConfig,
	pub minimap: MinimapConfig,
	/// Distance between grid dots in world units.
	pub grid_gap: f64,
	/// Grid dot size in world units.
	pub grid_dot_size: f64,
	pub show_minimap: bool,
	pub show_controls: bool,
	/// Fit all nodes into view on mount.
	pub fit_view: bool,
}

impl Default for CanvasOptions {
	fn default() -> Self {
		Self {
			theme: Theme::default(),
			scale: ScaleConfig::default(),
			minimap: MinimapConfig::default(),
			grid_gap: 12.0,
			grid_dot_size: 1.0,
			show_minimap: true,
			show_controls: true,
			fit_view: true,
		}
	}
}

impl CanvasOptions {
	pub fn from_config(config: &EditorConfig, theme: Theme) -> Self {
		Self {
			theme,
			grid_gap: config.grid_gap.max(1.0),
			grid_dot_size: config.grid_dot_size.max(0.0),
			show_minimap: config.show_minimap,
			show_controls: config.show_controls,
			fit_view: config.fit_view,
			..Self::default()
		}
	}
}
