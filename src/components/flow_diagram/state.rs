use super::store::GraphStore;
use super::types::{Connection, EdgeId, Node, NodeId, Position};
use super::viewport::Viewport;

/// Handle hit radius in diagram units.
pub const HANDLE_RADIUS: f64 = 8.0;
/// How close to an edge curve a press must land to select it.
pub const EDGE_HIT_DISTANCE: f64 = 6.0;
const CURVE_SAMPLES: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleKind {
	/// Left side, edges end here.
	Target,
	/// Right side, edges start here.
	Source,
}

impl HandleKind {
	pub fn position(self, node: &Node) -> Position {
		match self {
			HandleKind::Target => node.target_handle(),
			HandleKind::Source => node.source_handle(),
		}
	}
}

/// What lies under a diagram-space point, topmost first.
#[derive(Clone, Debug, PartialEq)]
pub enum Hit {
	Handle { node: NodeId, kind: HandleKind },
	Node(NodeId),
	Edge(EdgeId),
}

#[derive(Clone, Debug)]
pub struct DragState {
	pub node: NodeId,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
}

#[derive(Clone, Debug)]
pub struct PanState {
	pub start_x: f64,
	pub start_y: f64,
	pub viewport_start: Viewport,
}

#[derive(Clone, Debug)]
pub struct ConnectState {
	pub node: NodeId,
	pub handle: HandleKind,
	/// Cursor in diagram coordinates.
	pub cursor: Position,
}

/// Pointer gesture in progress on the canvas.
#[derive(Clone, Debug, Default)]
pub enum Gesture {
	#[default]
	None,
	Drag(DragState),
	Pan(PanState),
	Connect(ConnectState),
}

#[derive(Clone, Debug, Default)]
pub struct CanvasState {
	pub gesture: Gesture,
	pub width: f64,
	pub height: f64,
	/// Store generation the viewport was last fitted to.
	pub fitted_generation: u64,
}

impl CanvasState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			..Self::default()
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// Control points of the curve drawn from a source handle to a target handle.
pub fn edge_curve(from: Position, to: Position) -> [Position; 4] {
	let offset = ((to.x - from.x).abs() / 2.0).max(25.0);
	[
		from,
		Position::new(from.x + offset, from.y),
		Position::new(to.x - offset, to.y),
		to,
	]
}

fn bezier_point(c: &[Position; 4], t: f64) -> Position {
	let u = 1.0 - t;
	let (a, b, d, e) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
	Position::new(
		a * c[0].x + b * c[1].x + d * c[2].x + e * c[3].x,
		a * c[0].y + b * c[1].y + d * c[2].y + e * c[3].y,
	)
}

fn segment_distance(p: Position, a: Position, b: Position) -> f64 {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	let len2 = dx * dx + dy * dy;
	let t = if len2 > 0.0 {
		(((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0)
	} else {
		0.0
	};
	let (cx, cy) = (a.x + t * dx - p.x, a.y + t * dy - p.y);
	(cx * cx + cy * cy).sqrt()
}

fn near(a: Position, b: Position, radius: f64) -> bool {
	let (dx, dy) = (a.x - b.x, a.y - b.y);
	dx * dx + dy * dy <= radius * radius
}

pub fn handle_at(store: &GraphStore, p: Position) -> Option<(NodeId, HandleKind)> {
	store.nodes().iter().rev().find_map(|node| {
		[HandleKind::Source, HandleKind::Target]
			.into_iter()
			.find(|kind| near(kind.position(node), p, HANDLE_RADIUS))
			.map(|kind| (node.id.clone(), kind))
	})
}

pub fn node_at(store: &GraphStore, p: Position) -> Option<NodeId> {
	store
		.nodes()
		.iter()
		.rev()
		.find(|n| n.rect().contains(p))
		.map(|n| n.id.clone())
}

pub fn edge_at(store: &GraphStore, p: Position) -> Option<EdgeId> {
	store.edges().iter().rev().find_map(|edge| {
		let (source, target) = (store.node(&edge.source)?, store.node(&edge.target)?);
		let curve = edge_curve(source.source_handle(), target.target_handle());
		let mut prev = curve[0];
		for i in 1..=CURVE_SAMPLES {
			let next = bezier_point(&curve, i as f64 / CURVE_SAMPLES as f64);
			if segment_distance(p, prev, next) <= EDGE_HIT_DISTANCE {
				return Some(edge.id.clone());
			}
			prev = next;
		}
		None
	})
}

pub fn hit_test(store: &GraphStore, p: Position) -> Option<Hit> {
	if let Some((node, kind)) = handle_at(store, p) {
		return Some(Hit::Handle { node, kind });
	}
	if let Some(id) = node_at(store, p) {
		return Some(Hit::Node(id));
	}
	edge_at(store, p).map(Hit::Edge)
}

/// Connection made by dragging from `from`'s handle and releasing on `to`'s.
///
/// Only source-to-target pairs on two different nodes connect; the gesture
/// may start at either end.
pub fn connection_between(
	from: (&str, HandleKind),
	to: (&str, HandleKind),
) -> Option<Connection> {
	if from.0 == to.0 || from.1 == to.1 {
		return None;
	}
	let (source, target) = match from.1 {
		HandleKind::Source => (from.0, to.0),
		HandleKind::Target => (to.0, from.0),
	};
	Some(Connection {
		source: source.to_owned(),
		target: target.to_owned(),
	})
}
