//! Grouping and ordering of the sidebar node list.

use super::types::{FlowNode, NodeId, NodeKind};

/// One sidebar row.
#[derive(Clone, Debug, PartialEq)]
pub struct SidebarEntry {
	pub id: NodeId,
	pub label: String,
}

/// Nodes of one category, sorted by label.
#[derive(Clone, Debug, PartialEq)]
pub struct SidebarGroup {
	pub kind: NodeKind,
	pub entries: Vec<SidebarEntry>,
}

/// Group nodes by kind in [`NodeKind::DISPLAY_ORDER`], skipping empty groups.
///
/// Labels compare lexicographically; equal labels fall back to id order so the
/// list does not jump around between renders.
pub fn group_nodes(nodes: &[FlowNode]) -> Vec<SidebarGroup> {
	NodeKind::DISPLAY_ORDER
		.iter()
		.filter_map(|&kind| {
			let mut entries: Vec<SidebarEntry> = nodes
				.iter()
				.filter(|n| n.kind == kind)
				.map(|n| SidebarEntry {
					id: n.id,
					label: n.label.clone(),
				})
				.collect();
			if entries.is_empty() {
				return None;
			}
			entries.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));
			Some(SidebarGroup { kind, entries })
		})
		.collect()
}

/// DOM id of the sidebar row for `id`, used to scroll it into view.
pub fn entry_dom_id(id: NodeId) -> String {
	format!("node-item-{}", id)
}
