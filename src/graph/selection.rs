//! Single-selection and inline-edit state for the editor.
//!
//! Canvas clicks and sidebar clicks go through the same [`EditorSelection`],
//! so both views always agree on which node is selected.

use log::{debug, warn};

use super::error::Result;
use super::store::FlowStore;
use super::types::{FlowNode, NodeId};

/// Keys the editor reacts to outside of text inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorKey {
	Delete,
	Escape,
	Other,
}

impl EditorKey {
	/// Map a DOM `KeyboardEvent.key` value.
	pub fn from_dom_key(key: &str) -> Self {
		match key {
			"Delete" => EditorKey::Delete,
			"Escape" | "Esc" => EditorKey::Escape,
			_ => EditorKey::Other,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditorSelection {
	selected: Option<NodeId>,
	editing: Option<NodeId>,
}

impl EditorSelection {
	pub fn selected(&self) -> Option<NodeId> {
		self.selected
	}

	pub fn editing(&self) -> Option<NodeId> {
		self.editing
	}

	pub fn is_selected(&self, id: NodeId) -> bool {
		self.selected == Some(id)
	}

	pub fn is_editing(&self, id: NodeId) -> bool {
		self.editing == Some(id)
	}

	pub fn select(&mut self, id: NodeId) {
		self.selected = Some(id);
	}

	pub fn clear(&mut self) {
		self.selected = None;
	}

	/// Enter label-edit mode on `id`. The node also becomes the selection.
	pub fn begin_edit(&mut self, id: NodeId) {
		self.selected = Some(id);
		self.editing = Some(id);
	}

	pub fn cancel_edit(&mut self) {
		self.editing = None;
	}

	/// Write `label` to node `id` and leave edit mode.
	///
	/// Edit mode is left even when the node no longer exists.
	pub fn commit_edit(&mut self, store: &mut FlowStore, id: NodeId, label: &str) -> Result<()> {
		if self.editing == Some(id) {
			self.editing = None;
		}
		store.relabel(id, label)
	}

	/// Remove `id` from the store and reset the selection.
	pub fn remove(&mut self, store: &mut FlowStore, id: NodeId) -> Result<FlowNode> {
		let node = store.remove_node(id)?;
		self.selected = None;
		self.forget(id);
		Ok(node)
	}

	/// Remove the selected node, if any.
	pub fn delete_selected(&mut self, store: &mut FlowStore) -> Option<FlowNode> {
		let id = self.selected?;
		match self.remove(store, id) {
			Ok(node) => Some(node),
			Err(e) => {
				warn!("flow-editor: selected node vanished: {}", e);
				self.selected = None;
				None
			}
		}
	}

	/// Drop any reference to a node removed by another path.
	pub fn forget(&mut self, id: NodeId) {
		if self.selected == Some(id) {
			self.selected = None;
		}
		if self.editing == Some(id) {
			self.editing = None;
		}
	}

	/// React to a key press. Returns whether the key was consumed.
	///
	/// Delete is ignored while a label is being edited.
	pub fn handle_key(&mut self, store: &mut FlowStore, key: EditorKey) -> bool {
		match key {
			EditorKey::Delete if self.editing.is_none() => {
				let removed = self.delete_selected(store);
				if let Some(node) = &removed {
					debug!("flow-editor: deleted node {} from keyboard", node.id);
				}
				removed.is_some()
			}
			EditorKey::Escape if self.editing.is_some() => {
				self.cancel_edit();
				true
			}
			EditorKey::Escape if self.selected.is_some() => {
				self.clear();
				true
			}
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::types::{Connection, NodeKind, Position};

	fn store_with_chain() -> (FlowStore, NodeId, NodeId) {
		let mut store = FlowStore::default();
		let a = store.add_node(NodeKind::Input, Position::default()).unwrap();
		let b = store.add_node(NodeKind::Output, Position::default()).unwrap();
		store
			.connect(Connection {
				source: a,
				target: b,
			})
			.unwrap();
		(store, a, b)
	}

	#[test]
	fn delete_key_removes_selected_node_and_edges() {
		let (mut store, a, b) = store_with_chain();
		let mut sel = EditorSelection::default();
		sel.select(a);

		assert!(sel.handle_key(&mut store, EditorKey::Delete));
		assert!(!store.contains(a));
		assert!(store.contains(b));
		assert!(store.edges().is_empty());
		assert_eq!(sel.selected(), None);
	}

	#[test]
	fn delete_key_without_selection_is_noop() {
		let (mut store, _, _) = store_with_chain();
		let before = store.clone();
		let mut sel = EditorSelection::default();
		assert!(!sel.handle_key(&mut store, EditorKey::Delete));
		assert_eq!(store, before);
	}

	#[test]
	fn delete_key_is_ignored_while_editing() {
		let (mut store, a, _) = store_with_chain();
		let mut sel = EditorSelection::default();
		sel.begin_edit(a);
		assert!(!sel.handle_key(&mut store, EditorKey::Delete));
		assert!(store.contains(a));
	}

	#[test]
	fn begin_edit_selects_and_commit_exits() {
		let (mut store, a, _) = store_with_chain();
		let mut sel = EditorSelection::default();
		sel.begin_edit(a);
		assert!(sel.is_selected(a));
		assert!(sel.is_editing(a));

		sel.commit_edit(&mut store, a, "source").unwrap();
		assert_eq!(sel.editing(), None);
		assert!(sel.is_selected(a));
		assert_eq!(store.node(a).unwrap().label, "source");
	}

	#[test]
	fn escape_cancels_edit_before_clearing_selection() {
		let (mut store, a, _) = store_with_chain();
		let mut sel = EditorSelection::default();
		sel.begin_edit(a);
		assert!(sel.handle_key(&mut store, EditorKey::Escape));
		assert_eq!(sel.editing(), None);
		assert!(sel.is_selected(a));
		assert!(sel.handle_key(&mut store, EditorKey::Escape));
		assert_eq!(sel.selected(), None);
	}

	#[test]
	fn commit_on_removed_node_still_exits_edit_mode() {
		let (mut store, a, _) = store_with_chain();
		let mut sel = EditorSelection::default();
		sel.begin_edit(a);
		store.remove_node(a).unwrap();
		assert!(sel.commit_edit(&mut store, a, "late").is_err());
		assert_eq!(sel.editing(), None);
	}

	#[test]
	fn forget_clears_only_matching_ids() {
		let mut sel = EditorSelection::default();
		sel.begin_edit(NodeId(3));
		sel.forget(NodeId(4));
		assert!(sel.is_editing(NodeId(3)));
		sel.forget(NodeId(3));
		assert_eq!(sel, EditorSelection::default());
	}

	#[test]
	fn dom_keys_map_to_editor_keys() {
		assert_eq!(EditorKey::from_dom_key("Delete"), EditorKey::Delete);
		assert_eq!(EditorKey::from_dom_key("Escape"), EditorKey::Escape);
		assert_eq!(EditorKey::from_dom_key("Backspace"), EditorKey::Other);
	}
}
