//! Sidebar listing every node, grouped by kind.

use leptos::prelude::*;
use web_sys::{
	KeyboardEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::graph::sidebar::{SidebarEntry, entry_dom_id, group_nodes};
use crate::graph::{EditorSelection, FlowStore, NodeId, NodeKind};

use super::editor::{add_node, commit_label, remove_node};

/// Grouped node list with inline label editing and one add button per kind.
#[component]
pub fn Sidebar(
	store: RwSignal<FlowStore>,
	selection: RwSignal<EditorSelection>,
	/// New nodes spawn within `[0, spawn_extent)` on both axes.
	spawn_extent: f64,
) -> impl IntoView {
	let groups = Memo::new(move |_| store.with(|s| group_nodes(s.nodes())));

	// Keep the selected row in view, whichever view selected it.
	Effect::new(move |_| {
		let Some(id) = selection.with(|s| s.selected()) else {
			return;
		};
		let Some(row) = document().get_element_by_id(&entry_dom_id(id)) else {
			return;
		};
		let options = ScrollIntoViewOptions::new();
		options.set_behavior(ScrollBehavior::Smooth);
		options.set_block(ScrollLogicalPosition::Center);
		row.scroll_into_view_with_scroll_into_view_options(&options);
	});

	let add_buttons = NodeKind::DISPLAY_ORDER
		.iter()
		.map(|&kind| {
			view! {
				<button
					class="flow-sidebar-add"
					on:click=move |_| add_node(store, kind, spawn_extent)
				>
					{format!("Add {}", kind.title().to_lowercase())}
				</button>
			}
		})
		.collect_view();

	view! {
		<aside class="flow-sidebar">
			<div class="flow-sidebar-actions">{add_buttons}</div>
			{move || {
				groups
					.get()
					.into_iter()
					.map(|group| {
						let rows = group
							.entries
							.into_iter()
							.map(|entry| view! { <EntryRow entry=entry store=store selection=selection /> })
							.collect_view();
						view! {
							<section class="flow-sidebar-group">
								<h3>{group.kind.title()}</h3>
								<ul>{rows}</ul>
							</section>
						}
					})
					.collect_view()
			}}
		</aside>
	}
}

#[component]
fn EntryRow(
	entry: SidebarEntry,
	store: RwSignal<FlowStore>,
	selection: RwSignal<EditorSelection>,
) -> impl IntoView {
	let id = entry.id;
	let label = entry.label;

	view! {
		<li
			id=entry_dom_id(id)
			class="flow-sidebar-entry"
			class:selected=move || selection.with(|s| s.is_selected(id))
			on:click=move |_| selection.update(|s| s.select(id))
		>
			{move || {
				if selection.with(|s| s.is_editing(id)) {
					view! { <LabelInput id=id initial=label.clone() store=store selection=selection /> }
						.into_any()
				} else {
					view! {
						<span
							class="flow-sidebar-label"
							on:dblclick=move |_| selection.update(|s| s.begin_edit(id))
						>
							{label.clone()}
						</span>
					}
						.into_any()
				}
			}}
			<button
				title="Edit"
				on:click=move |ev: MouseEvent| {
					ev.stop_propagation();
					selection.update(|s| s.begin_edit(id));
				}
			>
				"✎"
			</button>
			<button
				title="Delete"
				on:click=move |ev: MouseEvent| {
					ev.stop_propagation();
					remove_node(store, selection, id);
				}
			>
				"✕"
			</button>
		</li>
	}
}

/// Text input shown in place of a label while it is being edited.
///
/// Blur and Enter commit, Escape cancels. A blur that arrives after the edit
/// already ended (the input being torn down) is ignored.
#[component]
fn LabelInput(
	id: NodeId,
	initial: String,
	store: RwSignal<FlowStore>,
	selection: RwSignal<EditorSelection>,
) -> impl IntoView {
	let input_ref = NodeRef::<leptos::html::Input>::new();

	Effect::new(move |_| {
		if let Some(input) = input_ref.get() {
			let _ = input.focus();
			input.select();
		}
	});

	let commit = move |text: String| {
		if selection.with_untracked(|s| s.is_editing(id)) {
			commit_label(store, selection, id, text);
		}
	};

	view! {
		<input
			node_ref=input_ref
			class="flow-sidebar-input"
			type="text"
			prop:value=initial
			on:click=|ev: MouseEvent| ev.stop_propagation()
			on:blur=move |ev| commit(event_target_value(&ev))
			on:keydown=move |ev: KeyboardEvent| {
				// keep Delete/Escape away from the editor-wide shortcuts
				ev.stop_propagation();
				match ev.key().as_str() {
					"Enter" => commit(event_target_value(&ev)),
					"Escape" | "Esc" => selection.update(|s| s.cancel_edit()),
					_ => {}
				}
			}
		/>
	}
}
