//! Mapping between diagram coordinates and a fixed-size drawing surface.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use super::types::{Node, Position, Rect};

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;
/// Fraction of the bounds added as margin when fitting.
pub const FIT_PADDING: f64 = 0.1;
const MINIMAP_PADDING: f64 = 0.1;

/// Screen = diagram * zoom + (x, y).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub x: f64,
	pub y: f64,
	pub zoom: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			zoom: 1.0,
		}
	}
}

impl Viewport {
	pub fn to_screen(&self, p: Position) -> Position {
		Position::new(p.x * self.zoom + self.x, p.y * self.zoom + self.y)
	}

	pub fn to_diagram(&self, sx: f64, sy: f64) -> Position {
		Position::new((sx - self.x) / self.zoom, (sy - self.y) / self.zoom)
	}

	pub fn rect_to_screen(&self, r: Rect) -> Rect {
		let origin = self.to_screen(Position::new(r.x, r.y));
		Rect {
			x: origin.x,
			y: origin.y,
			width: r.width * self.zoom,
			height: r.height * self.zoom,
		}
	}

	/// Diagram-space area shown on a `width` x `height` surface.
	pub fn visible_rect(&self, width: f64, height: f64) -> Rect {
		let origin = self.to_diagram(0.0, 0.0);
		Rect {
			x: origin.x,
			y: origin.y,
			width: width / self.zoom,
			height: height / self.zoom,
		}
	}

	/// Scale by `factor` keeping the screen point (sx, sy) fixed.
	pub fn zoom_at(&self, sx: f64, sy: f64, factor: f64) -> Self {
		let zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = zoom / self.zoom;
		Self {
			x: sx - (sx - self.x) * ratio,
			y: sy - (sy - self.y) * ratio,
			zoom,
		}
	}
}

/// Smallest rectangle enclosing every node box. Empty input gives a zero
/// rectangle at the origin.
pub fn bounds(nodes: &[Node]) -> Rect {
	let mut it = nodes.iter().map(Node::rect);
	let Some(first) = it.next() else {
		return Rect::default();
	};
	let (mut x0, mut y0) = (first.x, first.y);
	let (mut x1, mut y1) = (first.x + first.width, first.y + first.height);
	for r in it {
		x0 = x0.min(r.x);
		y0 = y0.min(r.y);
		x1 = x1.max(r.x + r.width);
		y1 = y1.max(r.y + r.height);
	}
	Rect {
		x: x0,
		y: y0,
		width: x1 - x0,
		height: y1 - y0,
	}
}

/// Viewport that centers `bounds` in a `width` x `height` surface, scaled to
/// fit with `padding` margin and clamped to `[min_zoom, max_zoom]`.
///
/// Degenerate bounds (zero width or height) fit at `max_zoom`.
pub fn viewport_for_bounds(
	bounds: Rect,
	width: f64,
	height: f64,
	min_zoom: f64,
	max_zoom: f64,
	padding: f64,
) -> Viewport {
	let x_zoom = width / (bounds.width * (1.0 + padding));
	let y_zoom = height / (bounds.height * (1.0 + padding));
	let zoom = x_zoom.min(y_zoom);
	let zoom = if zoom.is_finite() {
		zoom.clamp(min_zoom, max_zoom)
	} else {
		max_zoom
	};
	let center = bounds.center();
	Viewport {
		x: width / 2.0 - center.x * zoom,
		y: height / 2.0 - center.y * zoom,
		zoom,
	}
}

/// [`viewport_for_bounds`] over all `nodes` with the default zoom range.
pub fn fit_nodes(nodes: &[Node], width: f64, height: f64) -> Viewport {
	viewport_for_bounds(bounds(nodes), width, height, MIN_ZOOM, MAX_ZOOM, FIT_PADDING)
}

/// Transform from diagram space into a `map_width` x `map_height` minimap.
///
/// The minimap shows the node bounds together with the area currently
/// visible through `view` on a `width` x `height` canvas, so the viewport
/// outline never leaves it. It only ever shrinks the diagram.
pub fn minimap_viewport(
	nodes: &[Node],
	view: &Viewport,
	width: f64,
	height: f64,
	map_width: f64,
	map_height: f64,
) -> Viewport {
	let visible = view.visible_rect(width, height);
	let area = if nodes.is_empty() {
		visible
	} else {
		bounds(nodes).union(visible)
	};
	viewport_for_bounds(area, map_width, map_height, 0.0, 1.0, MINIMAP_PADDING)
}
