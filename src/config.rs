//! Editor configuration embedded in the host page.
//!
//! The page may carry a `<script id="editor-config" type="application/json">`
//! element. Every field is optional; anything missing falls back to the
//! defaults below.

use serde::Deserialize;
use thiserror::Error;

use crate::components::flow_canvas::Theme;
use crate::components::flow_canvas::theme::Color;
use crate::graph::{FlowStore, GraphData, NodeKind};

/// DOM id of the configuration script element.
pub const CONFIG_ELEMENT_ID: &str = "editor-config";

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("invalid editor config: {0}")]
	Json(#[from] serde_json::Error),

	#[error("unknown theme {0:?}")]
	UnknownTheme(String),

	#[error("invalid {kind:?} color {value:?}")]
	InvalidColor { kind: NodeKind, value: String },
}

/// Accent color overrides per node kind, as `#rrggbb` or `rgb(...)`/`rgba(...)`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct KindColors {
	pub input: Option<String>,
	pub default: Option<String>,
	pub output: Option<String>,
}

impl KindColors {
	fn get(&self, kind: NodeKind) -> Option<&str> {
		match kind {
			NodeKind::Input => self.input.as_deref(),
			NodeKind::Default => self.default.as_deref(),
			NodeKind::Output => self.output.as_deref(),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
	/// Theme name, see [`Theme::by_name`].
	pub theme: String,
	/// Distance between background grid dots, in world units.
	pub grid_gap: f64,
	/// Radius of background grid dots, in world units.
	pub grid_dot_size: f64,
	pub show_minimap: bool,
	pub show_controls: bool,
	/// Fit all nodes into view when the canvas mounts.
	pub fit_view: bool,
	/// Accent colors replacing the theme's per-kind palette.
	pub kind_colors: KindColors,
	/// New nodes spawn at a random position in `[0, spawn_extent)`.
	pub spawn_extent: f64,
	/// Optional seed graph replacing the single initial node.
	pub graph: Option<GraphData>,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			theme: "light".to_string(),
			grid_gap: 12.0,
			grid_dot_size: 1.0,
			show_minimap: true,
			show_controls: true,
			fit_view: true,
			kind_colors: KindColors::default(),
			spawn_extent: 400.0,
			graph: None,
		}
	}
}

impl EditorConfig {
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(text)?)
	}

	/// The named theme with any kind color overrides applied.
	pub fn resolve_theme(&self) -> Result<Theme, ConfigError> {
		let mut theme = Theme::by_name(&self.theme)
			.ok_or_else(|| ConfigError::UnknownTheme(self.theme.clone()))?;
		for kind in NodeKind::DISPLAY_ORDER {
			let Some(value) = self.kind_colors.get(kind) else {
				continue;
			};
			let color = Color::parse(value).ok_or_else(|| ConfigError::InvalidColor {
				kind,
				value: value.to_string(),
			})?;
			theme.palette.set(kind, color);
		}
		Ok(theme)
	}

	/// The store the editor opens with.
	pub fn initial_store(&self) -> FlowStore {
		match &self.graph {
			Some(data) => FlowStore::from_graph_data(data),
			None => FlowStore::default(),
		}
	}
}
