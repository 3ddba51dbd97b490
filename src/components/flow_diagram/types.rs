/// Identifier of a node, e.g. `node-0`.
pub type NodeId = String;
/// Identifier of an edge, e.g. `edge-0`.
pub type EdgeId = String;

/// Rendered width of every node box, in diagram units.
pub const NODE_WIDTH: f64 = 150.0;
/// Rendered height of every node box, in diagram units.
pub const NODE_HEIGHT: f64 = 40.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Rendering template a node is drawn with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeKind {
	/// Labelled box with a target handle on the left and a source handle on the right.
	#[default]
	Custom,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
	pub id: NodeId,
	pub kind: NodeKind,
	pub label: String,
	pub position: Position,
	pub selected: bool,
}

impl Node {
	pub fn new(id: impl Into<NodeId>, label: impl Into<String>, position: Position) -> Self {
		Self {
			id: id.into(),
			kind: NodeKind::Custom,
			label: label.into(),
			position,
			selected: false,
		}
	}

	/// Box occupied by the node in diagram coordinates.
	pub fn rect(&self) -> Rect {
		Rect {
			x: self.position.x,
			y: self.position.y,
			width: NODE_WIDTH,
			height: NODE_HEIGHT,
		}
	}

	/// Connection point on the left side; edges end here.
	pub fn target_handle(&self) -> Position {
		Position::new(self.position.x, self.position.y + NODE_HEIGHT / 2.0)
	}

	/// Connection point on the right side; edges start here.
	pub fn source_handle(&self) -> Position {
		Position::new(
			self.position.x + NODE_WIDTH,
			self.position.y + NODE_HEIGHT / 2.0,
		)
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Edge {
	pub id: EdgeId,
	pub source: NodeId,
	pub target: NodeId,
	pub selected: bool,
}

impl Edge {
	pub fn new(
		id: impl Into<EdgeId>,
		source: impl Into<NodeId>,
		target: impl Into<NodeId>,
	) -> Self {
		Self {
			id: id.into(),
			source: source.into(),
			target: target.into(),
			selected: false,
		}
	}
}

/// A proposed edge produced by a connect gesture between two handles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
	pub source: NodeId,
	pub target: NodeId,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn contains(&self, p: Position) -> bool {
		p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
	}

	pub fn union(&self, other: Rect) -> Rect {
		let (x, y) = (self.x.min(other.x), self.y.min(other.y));
		Rect {
			x,
			y,
			width: (self.x + self.width).max(other.x + other.width) - x,
			height: (self.y + self.height).max(other.y + other.height) - y,
		}
	}

	pub fn center(&self) -> Position {
		Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}
}
