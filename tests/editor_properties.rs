//! Editor behaviour through the public graph API.

// Integration tests skip the view layer deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use std::collections::HashSet;

use flow_editor::components::flow_canvas::scale::ScaleConfig;
use flow_editor::components::flow_canvas::state::{CanvasEvent, CanvasState};
use flow_editor::graph::sidebar::group_nodes;
use flow_editor::graph::{
	Connection, EditorKey, EditorSelection, FlowStore, NodeChange, NodeId, NodeKind,
	Position,
};

fn connect(store: &mut FlowStore, source: NodeId, target: NodeId) {
	store.connect(Connection { source, target }).unwrap();
}

/// Initial node plus `a -> b -> c` and `a -> c`.
fn triangle() -> (FlowStore, NodeId, NodeId, NodeId) {
	let mut store = FlowStore::default();
	let a = store.add_node(NodeKind::Input, Position::new(0.0, 0.0)).unwrap();
	let b = store.add_node(NodeKind::Default, Position::new(0.0, 100.0)).unwrap();
	let c = store.add_node(NodeKind::Output, Position::new(0.0, 200.0)).unwrap();
	connect(&mut store, a, b);
	connect(&mut store, b, c);
	connect(&mut store, a, c);
	(store, a, b, c)
}

#[test]
fn adding_assigns_fresh_ids_even_after_deletes() {
	let mut store = FlowStore::default();
	let mut issued: HashSet<NodeId> = store.nodes().iter().map(|n| n.id).collect();

	for round in 0..5 {
		let before = store.nodes().len();
		let id = store.add_node(NodeKind::Default, Position::new(round as f64, 0.0)).unwrap();
		assert_eq!(store.nodes().len(), before + 1);
		assert!(issued.insert(id), "id {} was reused", id);
		if round % 2 == 0 {
			store.remove_node(id).unwrap();
		}
	}
}

#[test]
fn removing_a_node_cascades_to_its_edges() {
	let (mut store, a, b, c) = triangle();
	store.remove_node(b).unwrap();

	assert!(!store.contains(b));
	assert!(store.edges().iter().all(|e| !e.touches(b)));
	assert_eq!(store.edges().len(), 1);
	assert_eq!(store.edges()[0].source, a);
	assert_eq!(store.edges()[0].target, c);
}

#[test]
fn relabel_preserves_everything_else() {
	let (mut store, _, b, _) = triangle();
	let before = store.node(b).cloned().unwrap();
	let edges_before = store.edges().to_vec();

	store.relabel(b, "renamed").unwrap();

	let after = store.node(b).unwrap();
	assert_eq!(after.label, "renamed");
	assert_eq!(after.id, before.id);
	assert_eq!(after.kind, before.kind);
	assert_eq!(after.position, before.position);
	assert_eq!(store.edges(), edges_before.as_slice());
}

#[test]
fn canvas_and_sidebar_share_one_selection() {
	let (mut store, a, b, _) = triangle();
	let mut selection = EditorSelection::default();

	// canvas click
	selection.select(a);
	assert_eq!(selection.selected(), Some(a));

	// sidebar click on another row replaces it
	selection.select(b);
	assert_eq!(selection.selected(), Some(b));
	assert!(!selection.is_selected(a));

	// canvas-side removal through a change list is seen by the selection too
	let removed = store.apply_node_changes(&[NodeChange::Remove { id: b }]);
	for id in removed {
		selection.forget(id);
	}
	assert_eq!(selection.selected(), None);
	let listed: Vec<NodeId> = group_nodes(store.nodes())
		.into_iter()
		.flat_map(|g| g.entries.into_iter().map(|e| e.id))
		.collect();
	assert!(!listed.contains(&b));
}

#[test]
fn delete_key_removes_only_the_selection() {
	let (mut store, a, b, c) = triangle();
	let mut selection = EditorSelection::default();

	let untouched = store.clone();
	assert!(!selection.handle_key(&mut store, EditorKey::Delete));
	assert_eq!(store, untouched);

	selection.select(c);
	assert!(selection.handle_key(&mut store, EditorKey::Delete));
	assert!(!store.contains(c));
	assert!(store.contains(a) && store.contains(b));
	assert_eq!(store.edges().len(), 1);
	assert_eq!(selection.selected(), None);
}

#[test]
fn canvas_backspace_change_lists_apply_cleanly() {
	let (mut store, a, b, _) = triangle();
	let mut canvas = CanvasState::new(800.0, 600.0, ScaleConfig::default());
	let mut selection = EditorSelection::default();
	selection.select(a);

	let events = canvas.delete_events(selection.selected(), store.edges());
	assert_eq!(events.len(), 2);
	for event in events {
		match event {
			CanvasEvent::Edges(changes) => {
				assert!(store.nodes().iter().any(|n| n.id == a), "edges go first");
				store.apply_edge_changes(&changes);
			}
			CanvasEvent::Nodes(changes) => {
				assert!(store.edges().iter().all(|e| !e.touches(a)));
				for id in store.apply_node_changes(&changes) {
					selection.forget(id);
				}
			}
			other => panic!("unexpected {:?}", other),
		}
	}

	assert!(!store.contains(a));
	assert!(store.contains(b));
	assert_eq!(store.edges().len(), 1);
	assert_eq!(selection.selected(), None);
}
