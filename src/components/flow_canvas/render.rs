//! Canvas rendering for the flow editor.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background fill and dot grid (screen space)
//! 2. Edges, then the in-progress connection line (world space)
//! 3. Node halos, node boxes, handles and labels (world space)
//! 4. Minimap overlay (screen space)

use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::graph::{FlowEdge, FlowNode, NodeId, Position};

use super::CanvasOptions;
use super::geometry::{self, EdgeCurve, Rect};
use super::minimap::MinimapLayout;
use super::scale::ScaledValues;
use super::state::{CanvasState, edge_curve};
use super::theme::{Color, Theme};

/// Attempt to smooth values that would otherwise cause abrupt visual changes.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete editor surface to the canvas.
pub fn render(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	nodes: &[FlowNode],
	edges: &[FlowEdge],
	selected: Option<NodeId>,
	options: &CanvasOptions,
) {
	let scale = state.scaled();
	let theme = &options.theme;

	draw_background(state, ctx, &scale, options);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	let positions: HashMap<NodeId, Position> = nodes.iter().map(|n| (n.id, n.position)).collect();
	draw_edges(state, ctx, edges, &positions, &scale, theme);
	draw_connection_preview(state, ctx, &positions, &scale, theme);
	draw_nodes(state, ctx, nodes, selected, &scale, theme);

	ctx.restore();

	if options.show_minimap {
		draw_minimap(state, ctx, nodes, &scale, options);
	}
}

fn draw_background(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	options: &CanvasOptions,
) {
	let theme = &options.theme;
	ctx.set_fill_style_str(&theme.background.color.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let screen_gap = options.grid_gap * scale.k;
	if scale.grid_alpha <= 0.01 || screen_gap < state.scale_config.grid.min_screen_gap {
		return;
	}

	let dot = (options.grid_dot_size * scale.k).max(0.5);
	let color = theme.background.dot_color;
	ctx.set_fill_style_str(&color.with_alpha(color.a * scale.grid_alpha).to_css());

	// First grid line at or left of / above the screen origin.
	let start_x = state.transform.x.rem_euclid(screen_gap);
	let start_y = state.transform.y.rem_euclid(screen_gap);
	let mut y = start_y;
	while y < state.height {
		let mut x = start_x;
		while x < state.width {
			ctx.fill_rect(x - dot / 2.0, y - dot / 2.0, dot, dot);
			x += screen_gap;
		}
		y += screen_gap;
	}
}

fn draw_edges(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	edges: &[FlowEdge],
	positions: &HashMap<NodeId, Position>,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());

	for edge in edges {
		let Some(curve) = edge_curve(edge, positions, scale) else {
			continue;
		};
		let edge_t = smooth_step(state.highlight.edge_intensity(edge.source, edge.target));
		let focused = state.focused_edge.as_ref() == Some(&edge.id);

		let (color, width) = if focused {
			(theme.edge.highlight, scale.edge_line_width * 1.6)
		} else if edge_t > 0.01 {
			(
				theme.edge.color.lerp(theme.edge.highlight, edge_t),
				scale.edge_line_width * (1.0 + 0.4 * edge_t),
			)
		} else if max_t > 0.01 {
			(
				theme.edge.color.with_alpha(theme.edge.color.a * (1.0 - 0.5 * max_t)),
				scale.edge_line_width,
			)
		} else {
			(theme.edge.color, scale.edge_line_width)
		};

		draw_curve(ctx, &curve, scale.arrow_size);
		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.stroke();

		draw_arrow(ctx, &curve, scale.arrow_size, color);
	}
}

/// Path for an edge, stopping short of the target so the arrow tip lands on it.
fn draw_curve(ctx: &CanvasRenderingContext2d, curve: &EdgeCurve, arrow_size: f64) {
	let (ux, uy) = curve.end_direction();
	let (ex, ey) = (curve.end.0 - ux * arrow_size, curve.end.1 - uy * arrow_size);
	ctx.begin_path();
	ctx.move_to(curve.start.0, curve.start.1);
	ctx.bezier_curve_to(curve.c1.0, curve.c1.1, curve.c2.0, curve.c2.1, ex, ey);
}

fn draw_arrow(ctx: &CanvasRenderingContext2d, curve: &EdgeCurve, arrow_size: f64, color: Color) {
	let (ux, uy) = curve.end_direction();
	let (tip_x, tip_y) = curve.end;
	let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
	let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);

	ctx.set_fill_style_str(&color.to_css());
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_connection_preview(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	positions: &HashMap<NodeId, Position>,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let Some(connect) = &state.connect else {
		return;
	};
	let Some(source) = positions.get(&connect.source) else {
		return;
	};
	let curve = EdgeCurve::between(geometry::source_handle(*source, scale), connect.cursor);

	ctx.begin_path();
	ctx.move_to(curve.start.0, curve.start.1);
	ctx.bezier_curve_to(
		curve.c1.0, curve.c1.1, curve.c2.0, curve.c2.1, curve.end.0, curve.end.1,
	);
	ctx.set_stroke_style_str(&theme.edge.preview.to_css());
	ctx.set_line_width(scale.edge_line_width);
	let dash = 5.0 / scale.k;
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(dash),
		&JsValue::from_f64(dash),
	));
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	nodes: &[FlowNode],
	selected: Option<NodeId>,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());

	for node in nodes {
		let rect = geometry::node_rect(node.position, scale);
		let node_t = smooth_step(state.highlight.node_intensity(node.id));
		let is_selected = selected == Some(node.id);
		let accent = theme.palette.get(node.kind);

		// dim nodes outside the hover neighbourhood
		let alpha = if node_t > 0.001 {
			1.0
		} else {
			1.0 - 0.35 * max_t
		};
		ctx.set_global_alpha(alpha);

		if is_selected {
			draw_selection_glow(ctx, &rect, scale, theme);
		}

		rounded_rect_path(ctx, &rect, scale.corner_radius);
		if theme.node.use_gradient {
			let gradient = ctx.create_linear_gradient(rect.x, rect.y, rect.x, rect.y + rect.h);
			let top = theme.node.fill.lerp(accent, 0.25);
			let _ = gradient.add_color_stop(0.0, &top.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.node.fill.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		} else {
			ctx.set_fill_style_str(&theme.node.fill.to_css());
		}
		ctx.fill();

		let (border, border_width) = if is_selected {
			(theme.node.selected_border, scale.selected_width)
		} else {
			(
				theme.node.border.lerp(accent, 0.6 * node_t),
				scale.border_width * (1.0 + node_t),
			)
		};
		ctx.set_stroke_style_str(&border.to_css());
		ctx.set_line_width(border_width);
		ctx.stroke();

		// kind accent stripe along the left edge
		ctx.set_fill_style_str(&accent.to_css());
		ctx.fill_rect(rect.x, rect.y + scale.corner_radius, 3.0, rect.h - 2.0 * scale.corner_radius);

		if state.highlight.hovered_node == Some(node.id) {
			let ring = Rect {
				x: rect.x - scale.hover_offset,
				y: rect.y - scale.hover_offset,
				w: rect.w + 2.0 * scale.hover_offset,
				h: rect.h + 2.0 * scale.hover_offset,
			};
			rounded_rect_path(ctx, &ring, scale.corner_radius + scale.hover_offset);
			ctx.set_stroke_style_str(&accent.with_alpha(0.5 * node_t).to_css());
			ctx.set_line_width(scale.border_width);
			ctx.stroke();
		}

		draw_handles(ctx, node, scale, theme);
		draw_label(ctx, node, &rect, scale, theme);

		ctx.set_global_alpha(1.0);
	}
}

fn draw_selection_glow(
	ctx: &CanvasRenderingContext2d,
	rect: &Rect,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let spread = scale.glow_spread;
	let halo = Rect {
		x: rect.x - spread,
		y: rect.y - spread,
		w: rect.w + 2.0 * spread,
		h: rect.h + 2.0 * spread,
	};
	rounded_rect_path(ctx, &halo, scale.corner_radius + spread);
	ctx.set_fill_style_str(&theme.node.selected_glow.to_css());
	ctx.fill();
}

fn draw_handles(
	ctx: &CanvasRenderingContext2d,
	node: &FlowNode,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let mut points = Vec::with_capacity(2);
	if node.kind.has_target_handle() {
		points.push(geometry::target_handle(node.position, scale));
	}
	if node.kind.has_source_handle() {
		points.push(geometry::source_handle(node.position, scale));
	}
	for (x, y) in points {
		ctx.begin_path();
		let _ = ctx.arc(x, y, scale.handle_radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&theme.node.handle.to_css());
		ctx.fill();
		ctx.set_stroke_style_str(&theme.node.fill.to_css());
		ctx.set_line_width(scale.border_width);
		ctx.stroke();
	}
}

fn draw_label(
	ctx: &CanvasRenderingContext2d,
	node: &FlowNode,
	rect: &Rect,
	scale: &ScaledValues,
	theme: &Theme,
) {
	// average glyph is roughly 0.6em wide in sans-serif
	let text = geometry::fit_label(&node.label, rect.w - 16.0, scale.label_size * 0.6);
	let (cx, cy) = rect.center();
	ctx.set_fill_style_str(&theme.node.text.to_css());
	ctx.set_font(&scale.label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&text, cx, cy);
}

fn draw_minimap(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	nodes: &[FlowNode],
	scale: &ScaledValues,
	options: &CanvasOptions,
) {
	let style = &options.theme.minimap;
	let viewport = state.viewport_rect();
	let layout = MinimapLayout::for_view(&options.minimap, state, nodes);
	let frame = layout.frame;

	ctx.set_fill_style_str(&style.background.to_css());
	ctx.fill_rect(frame.x, frame.y, frame.w, frame.h);

	ctx.save();
	ctx.begin_path();
	ctx.rect(frame.x, frame.y, frame.w, frame.h);
	ctx.clip();

	for node in nodes {
		let r = layout.rect_to_minimap(&geometry::node_rect(node.position, scale));
		ctx.set_fill_style_str(&options.theme.palette.get(node.kind).to_css());
		ctx.fill_rect(r.x, r.y, r.w.max(2.0), r.h.max(2.0));
	}

	// mask everything outside the viewport
	let view = layout.rect_to_minimap(&viewport);
	ctx.set_fill_style_str(&style.mask.to_css());
	ctx.fill_rect(frame.x, frame.y, frame.w, view.y - frame.y);
	ctx.fill_rect(frame.x, view.y + view.h, frame.w, frame.y + frame.h - (view.y + view.h));
	ctx.fill_rect(frame.x, view.y, view.x - frame.x, view.h);
	ctx.fill_rect(view.x + view.w, view.y, frame.x + frame.w - (view.x + view.w), view.h);

	ctx.set_stroke_style_str(&style.viewport_border.to_css());
	ctx.set_line_width(1.0);
	ctx.stroke_rect(view.x, view.y, view.w, view.h);
	ctx.restore();

	ctx.set_stroke_style_str(&style.border.to_css());
	ctx.set_line_width(1.0);
	ctx.stroke_rect(frame.x, frame.y, frame.w, frame.h);
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, rect: &Rect, radius: f64) {
	let r = radius.min(rect.w / 2.0).min(rect.h / 2.0).max(0.0);
	let (x, y, w, h) = (rect.x, rect.y, rect.w, rect.h);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	ctx.line_to(x + w - r, y);
	ctx.quadratic_curve_to(x + w, y, x + w, y + r);
	ctx.line_to(x + w, y + h - r);
	ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
	ctx.line_to(x + r, y + h);
	ctx.quadratic_curve_to(x, y + h, x, y + h - r);
	ctx.line_to(x, y + r);
	ctx.quadratic_curve_to(x, y, x + r, y);
	ctx.close_path();
}
