use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::edge_curve;
use super::store::GraphStore;
use super::types::{NODE_HEIGHT, NODE_WIDTH, Node, NodeKind, Position, Rect};
use super::viewport::{self, Viewport};

pub const CANVAS_BACKGROUND: &str = "#f8f9fb";
const GRID_GAP: f64 = 20.0;
const HANDLE_DRAW_RADIUS: f64 = 4.0;
const ARROW_SIZE: f64 = 8.0;
const LABEL_PADDING: f64 = 8.0;
const MINIMAP_WIDTH: f64 = 200.0;
const MINIMAP_HEIGHT: f64 = 150.0;
const MINIMAP_MARGIN: f64 = 12.0;

/// What to draw for one frame.
pub struct Scene<'a> {
	pub store: &'a GraphStore,
	/// Node whose label is covered by the inline editor.
	pub editing: Option<&'a str>,
	pub viewport: Viewport,
	pub width: f64,
	pub height: f64,
}

/// Background fill plus diagram content; the whole export image.
pub fn render(scene: &Scene, ctx: &CanvasRenderingContext2d, background: &str) {
	clear(scene.width, scene.height, background, ctx);
	draw_content(scene, ctx);
}

pub fn clear(width: f64, height: f64, background: &str, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(background);
	ctx.fill_rect(0.0, 0.0, width, height);
}

/// Edges then nodes, under the scene's viewport transform.
pub fn draw_content(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.save();
	let _ = ctx.translate(scene.viewport.x, scene.viewport.y);
	let _ = ctx.scale(scene.viewport.zoom, scene.viewport.zoom);
	draw_edges(scene, ctx);
	draw_nodes(scene, ctx);
	ctx.restore();
}

/// Dotted background in screen space, drawn between [`clear`] and [`draw_content`].
pub fn draw_grid(viewport: Viewport, width: f64, height: f64, ctx: &CanvasRenderingContext2d) {
	let gap = GRID_GAP * viewport.zoom;
	let (ox, oy) = (viewport.x.rem_euclid(gap), viewport.y.rem_euclid(gap));
	ctx.set_fill_style_str("#d0d4dc");
	let mut y = oy;
	while y < height {
		let mut x = ox;
		while x < width {
			ctx.fill_rect(x - 0.5, y - 0.5, 1.0, 1.0);
			x += gap;
		}
		y += gap;
	}
}

/// Dashed line from a handle to the cursor while a connection is dragged.
pub fn draw_pending_connection(
	viewport: Viewport,
	from: Position,
	to: Position,
	ctx: &CanvasRenderingContext2d,
) {
	let (a, b) = (viewport.to_screen(from), viewport.to_screen(to));
	ctx.set_stroke_style_str("#555");
	ctx.set_line_width(1.5);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(5.0),
		&JsValue::from_f64(5.0),
	));
	ctx.begin_path();
	ctx.move_to(a.x, a.y);
	ctx.line_to(b.x, b.y);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

/// Screen rect the minimap occupies on a `width` x `height` canvas.
pub fn minimap_frame(width: f64, height: f64) -> Rect {
	Rect {
		x: width - MINIMAP_WIDTH - MINIMAP_MARGIN,
		y: height - MINIMAP_HEIGHT - MINIMAP_MARGIN,
		width: MINIMAP_WIDTH,
		height: MINIMAP_HEIGHT,
	}
}

/// Overview in the bottom-right corner: every node as a filled box plus an
/// outline of the area the main view currently shows.
pub fn draw_minimap(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	let frame = minimap_frame(scene.width, scene.height);
	let (left, top) = (frame.x, frame.y);
	if left < 0.0 || top < 0.0 {
		return;
	}
	let map = viewport::minimap_viewport(
		scene.store.nodes(),
		&scene.viewport,
		scene.width,
		scene.height,
		MINIMAP_WIDTH,
		MINIMAP_HEIGHT,
	);

	ctx.save();
	let _ = ctx.translate(left, top);
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(0.0, 0.0, MINIMAP_WIDTH, MINIMAP_HEIGHT);
	ctx.begin_path();
	ctx.rect(0.0, 0.0, MINIMAP_WIDTH, MINIMAP_HEIGHT);
	ctx.clip();

	for node in scene.store.nodes() {
		let r = map.rect_to_screen(node.rect());
		ctx.set_fill_style_str(if node.selected { "#a0a4ad" } else { "#e2e2e2" });
		ctx.fill_rect(r.x, r.y, r.width, r.height);
	}

	let view = map.rect_to_screen(scene.viewport.visible_rect(scene.width, scene.height));
	ctx.set_stroke_style_str("#1a192b");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(view.x, view.y, view.width, view.height);
	ctx.restore();

	ctx.set_stroke_style_str("#d0d4dc");
	ctx.stroke_rect(left, top, MINIMAP_WIDTH, MINIMAP_HEIGHT);
}

fn draw_edges(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	let k = scene.viewport.zoom;
	for edge in scene.store.edges() {
		let (Some(source), Some(target)) =
			(scene.store.node(&edge.source), scene.store.node(&edge.target))
		else {
			continue;
		};
		let [a, c1, c2, b] = edge_curve(source.source_handle(), target.target_handle());
		let color = if edge.selected { "#555" } else { "#b1b1b7" };

		ctx.set_stroke_style_str(color);
		let width = if edge.selected { 2.0 } else { 1.0 };
		ctx.set_line_width(width / k.max(0.5));
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, b.x - ARROW_SIZE, b.y);
		ctx.stroke();

		// arrowhead, the curve always arrives horizontally
		ctx.set_fill_style_str(color);
		ctx.begin_path();
		ctx.move_to(b.x, b.y);
		ctx.line_to(b.x - ARROW_SIZE, b.y - ARROW_SIZE * 0.5);
		ctx.line_to(b.x - ARROW_SIZE, b.y + ARROW_SIZE * 0.5);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	for node in scene.store.nodes() {
		match node.kind {
			NodeKind::Custom => {
				draw_custom_node(node, scene.editing == Some(node.id.as_str()), ctx)
			}
		}
	}
}

fn draw_custom_node(node: &Node, editing: bool, ctx: &CanvasRenderingContext2d) {
	let Position { x, y } = node.position;

	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(x, y, NODE_WIDTH, NODE_HEIGHT);
	ctx.set_stroke_style_str(if node.selected { "#1a192b" } else { "#555" });
	ctx.set_line_width(if node.selected { 2.0 } else { 1.0 });
	ctx.stroke_rect(x, y, NODE_WIDTH, NODE_HEIGHT);

	if !editing {
		ctx.set_fill_style_str("#222");
		ctx.set_font("12px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text_with_max_width(
			&node.label,
			x + NODE_WIDTH / 2.0,
			y + NODE_HEIGHT / 2.0,
			NODE_WIDTH - 2.0 * LABEL_PADDING,
		);
	}

	ctx.set_fill_style_str("#1a192b");
	for handle in [node.target_handle(), node.source_handle()] {
		ctx.begin_path();
		let _ = ctx.arc(handle.x, handle.y, HANDLE_DRAW_RADIUS, 0.0, 2.0 * PI);
		ctx.fill();
	}
}
