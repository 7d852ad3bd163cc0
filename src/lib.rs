//! flow-editor: interactive node-graph editor for the browser.
//!
//! A sidebar lists every node grouped by kind and a canvas shows the same graph
//! with pan/zoom, dragging and drag-to-connect. Both views share one store and
//! one selection. The pure graph model lives in [`graph`] and is usable without
//! a browser.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod config;
pub mod graph;

pub use components::editor::FlowEditor;
pub use components::flow_canvas::FlowCanvas;
pub use config::EditorConfig;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("flow-editor: logging initialized");
}

/// Load the editor configuration from the script element with
/// id="editor-config". Missing or malformed configuration yields defaults.
fn load_config() -> EditorConfig {
	let Some(json_text) = config_text() else {
		info!("flow-editor: no embedded config, using defaults");
		return EditorConfig::default();
	};

	match EditorConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"flow-editor: loaded config (theme {}, {} seed nodes)",
				config.theme,
				config.graph.as_ref().map_or(0, |g| g.nodes.len())
			);
			config
		}
		Err(e) => {
			warn!("flow-editor: {}", e);
			EditorConfig::default()
		}
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(config::CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

const STYLE: &str = r#"
html, body { margin: 0; height: 100%; font-family: system-ui, sans-serif; }
.flow-editor { display: flex; width: 100vw; height: 100vh; }
.flow-sidebar { width: 15rem; padding: 1rem; overflow-y: auto; background: #f3f4f6; border-right: 1px solid #d1d5db; box-sizing: border-box; }
.flow-sidebar-actions { display: flex; flex-direction: column; gap: 0.25rem; margin-bottom: 1rem; }
.flow-sidebar-group h3 { font-size: 0.8rem; text-transform: uppercase; color: #6b7280; margin: 0.75rem 0 0.25rem; }
.flow-sidebar-group ul { list-style: none; margin: 0; padding: 0; }
.flow-sidebar-entry { display: flex; align-items: center; gap: 0.25rem; padding: 0.4rem; margin-bottom: 0.4rem; background: #fff; border: 2px solid transparent; border-radius: 4px; cursor: pointer; }
.flow-sidebar-entry.selected { border-color: #3b82f6; }
.flow-sidebar-label, .flow-sidebar-input { flex: 1; min-width: 0; }
.flow-editor-canvas { flex: 1; position: relative; min-width: 0; }
.flow-canvas { position: absolute; inset: 0; }
.flow-controls { position: absolute; left: 15px; bottom: 15px; display: flex; flex-direction: column; box-shadow: 0 1px 4px rgba(0,0,0,0.2); }
[data-theme="dark"] .flow-sidebar { background: #111827; color: #e5e7eb; border-right-color: #374151; }
[data-theme="dark"] .flow-sidebar-entry { background: #1f2937; }
.flow-controls button { width: 28px; height: 28px; border: none; border-bottom: 1px solid #e5e7eb; background: #fff; cursor: pointer; }
"#;

/// Main application component.
/// Loads the configuration from the DOM and renders the editor.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let theme_name = config.theme.clone();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=theme_name />
		<Title text="Flow Editor" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Style>{STYLE}</Style>

		<FlowEditor config=config />
	}
}
