//! The editor: one store, one selection, two views.
//!
//! [`FlowEditor`] owns the graph in an `RwSignal<FlowStore>` and the
//! selection in an `RwSignal<EditorSelection>`. The canvas and the sidebar only
//! read derived signals and report back through callbacks, so every mutation
//! goes through the store operations below.

use leptos::ev;
use leptos::prelude::*;
use log::{debug, warn};

use crate::config::EditorConfig;
use crate::graph::{
	Connection, EdgeChange, EdgeId, EditorKey, EditorSelection, FlowEdge, FlowNode, FlowStore,
	NodeChange, NodeId, NodeKind, Position,
};

use super::flow_canvas::{CanvasOptions, FlowCanvas, Theme};
use super::sidebar::Sidebar;

/// Append a node of `kind` at a random position within `extent`.
pub(crate) fn add_node(store: RwSignal<FlowStore>, kind: NodeKind, extent: f64) {
	let position = Position::random_within(extent, js_sys::Math::random);
	if let Some(Err(e)) = store.try_update(|s| s.add_node(kind, position)) {
		warn!("flow-editor: cannot add node: {}", e);
	}
}

/// Remove `id` and its edges, clearing the selection.
pub(crate) fn remove_node(
	store: RwSignal<FlowStore>,
	selection: RwSignal<EditorSelection>,
	id: NodeId,
) {
	let outcome = store.try_update(|s| selection.try_update(|sel| sel.remove(s, id)));
	if let Some(Some(Err(e))) = outcome {
		warn!("flow-editor: remove failed: {}", e);
	}
}

/// Write `label` to `id` and leave edit mode.
pub(crate) fn commit_label(
	store: RwSignal<FlowStore>,
	selection: RwSignal<EditorSelection>,
	id: NodeId,
	label: String,
) {
	let outcome = store.try_update(|s| selection.try_update(|sel| sel.commit_edit(s, id, &label)));
	if let Some(Some(Err(e))) = outcome {
		warn!("flow-editor: relabel failed: {}", e);
	}
}

fn resolve_theme(config: &EditorConfig) -> Theme {
	config.resolve_theme().unwrap_or_else(|e| {
		warn!("flow-editor: {}, using default theme", e);
		Theme::default()
	})
}

/// Sidebar plus canvas over a single graph.
#[component]
pub fn FlowEditor(#[prop(optional)] config: EditorConfig) -> impl IntoView {
	let store = RwSignal::new(config.initial_store());
	let selection = RwSignal::new(EditorSelection::default());
	let spawn_extent = config.spawn_extent.max(1.0);
	let options = CanvasOptions::from_config(&config, resolve_theme(&config));

	let nodes: Memo<Vec<FlowNode>> = Memo::new(move |_| store.with(|s| s.nodes().to_vec()));
	let edges: Memo<Vec<FlowEdge>> = Memo::new(move |_| store.with(|s| s.edges().to_vec()));
	let selected = Memo::new(move |_| selection.with(|s| s.selected()));

	let on_nodes_change = move |changes: Vec<NodeChange>| {
		let removed = store
			.try_update(|s| s.apply_node_changes(&changes))
			.unwrap_or_default();
		if !removed.is_empty() {
			selection.update(|sel| removed.iter().for_each(|&id| sel.forget(id)));
		}
	};
	let on_edges_change = move |changes: Vec<EdgeChange>| {
		store.update(|s| s.apply_edge_changes(&changes));
	};
	let on_connect = move |connection: Connection| {
		match store.try_update(|s| s.connect(connection)) {
			Some(Err(e)) => warn!("flow-editor: connect rejected: {}", e),
			Some(Ok(None)) => debug!(
				"flow-editor: {} -> {} already connected",
				connection.source, connection.target
			),
			_ => {}
		}
	};

	let handle = window_event_listener(ev::keydown, move |ev| {
		let key = EditorKey::from_dom_key(&ev.key());
		if key == EditorKey::Other {
			return;
		}
		let consumed = store
			.try_update(|s| selection.try_update(|sel| sel.handle_key(s, key)))
			.flatten()
			.unwrap_or(false);
		if consumed {
			ev.prevent_default();
		}
	});
	on_cleanup(move || handle.remove());

	view! {
		<div class="flow-editor">
			<Sidebar store=store selection=selection spawn_extent=spawn_extent />
			<div class="flow-editor-canvas">
				<FlowCanvas
					nodes=nodes
					edges=edges
					selected=selected
					on_nodes_change=on_nodes_change
					on_edges_change=on_edges_change
					on_connect=on_connect
					on_node_click=move |id: NodeId| selection.update(|s| s.select(id))
					on_node_double_click=move |id: NodeId| selection.update(|s| s.begin_edit(id))
					on_edge_click=move |_: EdgeId| selection.update(|s| s.clear())
					on_pane_click=move |_: ()| selection.update(|s| s.clear())
					options=options
				/>
			</div>
		</div>
	}
}
