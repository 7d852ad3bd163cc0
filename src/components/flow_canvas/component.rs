//! Leptos component wrapping the flow canvas.
//!
//! The component creates an HTML canvas element and wires up mouse, wheel and
//! keyboard handlers for dragging, panning, zooming and connecting. An
//! animation loop runs via `requestAnimationFrame`, easing the view and hover
//! highlights and redrawing each frame.
//!
//! Handlers never touch the graph directly. `CanvasState` turns gestures into
//! [`CanvasEvent`]s while it is borrowed and the callbacks run after the borrow
//! ends, so a callback that synchronously updates the `nodes` signal cannot
//! re-enter a borrowed state.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

use crate::graph::layout::{self, ArrangeParams};
use crate::graph::{Connection, EdgeChange, EdgeId, FlowEdge, FlowNode, NodeChange, NodeId};

use super::CanvasOptions;
use super::minimap::MinimapLayout;
use super::render;
use super::state::{CanvasEvent, CanvasState, Hit};

/// Screen padding kept around the content by "fit view".
const FIT_PADDING: f64 = 40.0;
/// Zoom step of the +/- controls.
const ZOOM_STEP: f64 = 1.2;

/// Canvas state plus the drawing context it renders into.
struct CanvasContext {
	state: CanvasState,
	ctx: CanvasRenderingContext2d,
	options: CanvasOptions,
}

type SharedContext = Rc<RefCell<Option<CanvasContext>>>;

#[derive(Clone, Copy)]
struct Callbacks {
	on_nodes_change: Callback<Vec<NodeChange>>,
	on_edges_change: Callback<Vec<EdgeChange>>,
	on_connect: Callback<Connection>,
	on_node_click: Callback<NodeId>,
	on_node_double_click: Callback<NodeId>,
	on_edge_click: Callback<EdgeId>,
	on_pane_click: Callback<()>,
}

impl Callbacks {
	fn dispatch(&self, events: Vec<CanvasEvent>) {
		for event in events {
			match event {
				CanvasEvent::Nodes(changes) => self.on_nodes_change.run(changes),
				CanvasEvent::Edges(changes) => self.on_edges_change.run(changes),
				CanvasEvent::Connect(connection) => self.on_connect.run(connection),
				CanvasEvent::NodeClick(id) => self.on_node_click.run(id),
				CanvasEvent::NodeDoubleClick(id) => self.on_node_double_click.run(id),
				CanvasEvent::EdgeClick(id) => self.on_edge_click.run(id),
				CanvasEvent::PaneClick => self.on_pane_click.run(()),
			}
		}
	}
}

/// Pointer position relative to the canvas.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// The parent's size, or 800x600 while the parent has no layout yet.
fn canvas_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0))
}

fn cursor_for(state: &CanvasState, hover: Option<&Hit>) -> &'static str {
	if state.connect.is_some() {
		return "crosshair";
	}
	if state.drag.active || state.pan.active || state.minimap_drag {
		return "grabbing";
	}
	match hover {
		Some(Hit::Handle(..)) => "crosshair",
		Some(Hit::Node(_)) => "grab",
		Some(Hit::Edge(_)) => "pointer",
		_ => "default",
	}
}

/// Renders an interactive node graph on a canvas element.
///
/// The component sizes itself to its parent container and follows window
/// resizes. Every user action is reported through the callbacks; nothing
/// changes until the owner feeds new `nodes`/`edges`.
#[component]
pub fn FlowCanvas(
	#[prop(into)] nodes: Signal<Vec<FlowNode>>,
	#[prop(into)] edges: Signal<Vec<FlowEdge>>,
	#[prop(into)] selected: Signal<Option<NodeId>>,
	#[prop(into)] on_nodes_change: Callback<Vec<NodeChange>>,
	#[prop(into)] on_edges_change: Callback<Vec<EdgeChange>>,
	#[prop(into)] on_connect: Callback<Connection>,
	#[prop(into)] on_node_click: Callback<NodeId>,
	#[prop(into)] on_node_double_click: Callback<NodeId>,
	#[prop(into)] on_edge_click: Callback<EdgeId>,
	#[prop(into)] on_pane_click: Callback<()>,
	#[prop(optional)] options: CanvasOptions,
) -> impl IntoView {
	let callbacks = Callbacks {
		on_nodes_change,
		on_edges_change,
		on_connect,
		on_node_click,
		on_node_double_click,
		on_edge_click,
		on_pane_click,
	};
	let show_controls = options.show_controls;

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = canvas_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("flow-editor: 2d canvas context unavailable");
			return;
		};

		let mut state = CanvasState::new(w, h, options.scale.clone());
		if options.fit_view {
			nodes.with_untracked(|n| state.fit_view(n, FIT_PADDING));
		}
		debug!("flow-editor: canvas mounted at {}x{}", w, h);
		*context_init.borrow_mut() = Some(CanvasContext {
			state,
			ctx,
			options: options.clone(),
		});

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = canvas_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner, canvas_anim) =
			(context_init.clone(), animate_init.clone(), canvas.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			// stop once the canvas leaves the document
			if !canvas_anim.is_connected() {
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let dt = 0.016;
				c.state.tick(dt);
				let selected = selected.get_untracked();
				nodes.with_untracked(|nodes| {
					edges.with_untracked(|edges| {
						render::render(&c.state, &c.ctx, nodes, edges, selected, &c.options)
					})
				});
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Bring a newly selected node into view; a node selection replaces any
	// focused edge.
	let context_sel = context.clone();
	Effect::new(move |_| {
		let Some(id) = selected.get() else {
			return;
		};
		let Ok(mut guard) = context_sel.try_borrow_mut() else {
			return;
		};
		if let Some(c) = guard.as_mut() {
			c.state.focused_edge = None;
			nodes.with_untracked(|nodes| {
				if let Some(node) = nodes.iter().find(|n| n.id == id) {
					c.state.ensure_visible(node);
				}
			});
		}
	});

	// Drop hover and focus state for things that no longer exist.
	let context_prune = context.clone();
	Effect::new(move |_| {
		let alive: HashSet<NodeId> = nodes.with(|n| n.iter().map(|n| n.id).collect());
		let edge_ids: HashSet<EdgeId> = edges.with(|e| e.iter().map(|e| e.id.clone()).collect());
		let Ok(mut guard) = context_prune.try_borrow_mut() else {
			return;
		};
		if let Some(c) = guard.as_mut() {
			c.state.highlight.retain_nodes(|id| alive.contains(&id));
			if c.state.focused_edge.as_ref().is_some_and(|id| !edge_ids.contains(id)) {
				c.state.focused_edge = None;
			}
			if c.state.drag.node.is_some_and(|id| !alive.contains(&id)) {
				c.state.reset_gestures();
			}
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		if let Some(canvas) = canvas_ref.get_untracked() {
			let _ = canvas.focus();
		}
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};

		let mut guard = context_md.borrow_mut();
		let Some(c) = guard.as_mut() else {
			return;
		};
		nodes.with_untracked(|nodes| {
			if c.options.show_minimap {
				let layout = MinimapLayout::for_view(&c.options.minimap, &c.state, nodes);
				if layout.contains(x, y) {
					let (wx, wy) = layout.minimap_to_world(x, y);
					c.state.center_on(wx, wy);
					c.state.minimap_drag = true;
					return;
				}
			}

			let hit = edges.with_untracked(|edges| c.state.hit_test(x, y, nodes, edges));
			c.state.press_at(x, y, hit, nodes);
		});
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};

		let mut events = Vec::new();
		{
			let mut guard = context_mm.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};

			if c.state.minimap_drag {
				nodes.with_untracked(|nodes| {
					let layout = MinimapLayout::for_view(&c.options.minimap, &c.state, nodes);
					let (wx, wy) = layout.minimap_to_world(x, y);
					c.state.center_on(wx, wy);
				});
				return;
			}

			c.state.track_press(x, y);
			let cursor = c.state.screen_to_graph(x, y);
			if let Some(connect) = c.state.connect.as_mut() {
				connect.cursor = cursor;
			} else if c.state.drag.active {
				if let Some(change) = c.state.drag_change(x, y) {
					events.push(CanvasEvent::Nodes(vec![change]));
				}
			} else if c.state.pan.active {
				c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
				c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
			}

			// Update hover state when not dragging
			let hover = if c.state.drag.active {
				None
			} else {
				let hit = nodes
					.with_untracked(|nodes| edges.with_untracked(|e| c.state.hit_test(x, y, nodes, e)));
				let node = match &hit {
					Hit::Handle(id, _) | Hit::Node(id) => Some(*id),
					_ => None,
				};
				edges.with_untracked(|e| c.state.set_hover(node, e));
				Some(hit)
			};

			if let Some(canvas) = canvas_ref.get_untracked() {
				let _ = web_sys::HtmlElement::style(&canvas)
					.set_property("cursor", cursor_for(&c.state, hover.as_ref()));
			}
		}
		callbacks.dispatch(events);
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let point = local_point(canvas_ref, &ev);

		let events = match context_mu.borrow_mut().as_mut() {
			Some(c) => nodes.with_untracked(|nodes| c.state.release(point, nodes)),
			None => return,
		};
		callbacks.dispatch(events);
	};

	let context_dc = context.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let hit = {
			let guard = context_dc.borrow();
			let Some(c) = guard.as_ref() else {
				return;
			};
			nodes.with_untracked(|nodes| c.state.node_at_position(x, y, nodes))
		};
		if let Some(id) = hit {
			callbacks.dispatch(vec![CanvasEvent::NodeDoubleClick(id)]);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.reset_gestures();
			c.state.set_hover(None, &[]);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	let context_kd = context.clone();
	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() != "Backspace" {
			return;
		}
		let events = match context_kd.borrow_mut().as_mut() {
			Some(c) => {
				let selected = selected.get_untracked();
				edges.with_untracked(|edges| c.state.delete_events(selected, edges))
			}
			None => return,
		};
		ev.prevent_default();
		callbacks.dispatch(events);
	};

	let controls = show_controls.then(|| {
		let (context_in, context_out, context_fit, context_arr) =
			(context.clone(), context.clone(), context.clone(), context.clone());
		view! {
			<div class="flow-controls">
				<button
					title="Zoom in"
					on:click=move |_| {
						if let Some(ref mut c) = *context_in.borrow_mut() {
							c.state.zoom_by(ZOOM_STEP);
						}
					}
				>
					"+"
				</button>
				<button
					title="Zoom out"
					on:click=move |_| {
						if let Some(ref mut c) = *context_out.borrow_mut() {
							c.state.zoom_by(1.0 / ZOOM_STEP);
						}
					}
				>
					"−"
				</button>
				<button
					title="Fit view"
					on:click=move |_| {
						if let Some(ref mut c) = *context_fit.borrow_mut() {
							nodes.with_untracked(|n| c.state.fit_view(n, FIT_PADDING));
						}
					}
				>
					"⛶"
				</button>
				<button
					title="Arrange"
					on:click=move |_| {
						let changes = nodes
							.with_untracked(|n| {
								edges.with_untracked(|e| layout::arrange(n, e, &ArrangeParams::default()))
							});
						if changes.is_empty() {
							return;
						}
						debug!("flow-editor: arranged {} nodes", changes.len());
						callbacks.dispatch(vec![CanvasEvent::Nodes(changes)]);
						if let Some(ref mut c) = *context_arr.borrow_mut() {
							nodes.with_untracked(|n| c.state.fit_view(n, FIT_PADDING));
						}
					}
				>
					"⚹"
				</button>
			</div>
		}
	});

	view! {
		<div class="flow-canvas">
			<canvas
				node_ref=canvas_ref
				class="flow-canvas-surface"
				tabindex="0"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:dblclick=on_dblclick
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				on:keydown=on_keydown
				style="display: block; outline: none;"
			/>
			{controls}
		</div>
	}
}
