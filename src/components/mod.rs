//! Leptos components: the canvas widget, the sidebar and the editor tying them
//! to one store.

pub mod editor;
pub mod flow_canvas;
pub mod sidebar;
