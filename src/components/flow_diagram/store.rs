//! Flat node/edge collections and the mutations the editor applies to them.
//!
//! Both collections keep insertion order, which is also draw order. Nodes and
//! edges only reference each other by id; nothing here checks that an edge's
//! endpoints exist, since every producer (parser, connect gesture) only ever
//! names existing nodes.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashSet;

use super::types::{Connection, Edge, EdgeId, Node, NodeId, Position};

/// Incremental node update emitted by canvas interaction.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeChange {
	Position { id: NodeId, position: Position },
	Select { id: NodeId, selected: bool },
	Remove { id: NodeId },
}

/// Incremental edge update emitted by canvas interaction.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeChange {
	Select { id: EdgeId, selected: bool },
	Remove { id: EdgeId },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphStore {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
}

impl GraphStore {
	pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		Self { nodes, edges }
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Discard everything and install `nodes`/`edges` as given.
	pub fn replace_all(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
		self.nodes = nodes;
		self.edges = edges;
	}

	/// Replace the label of node `id`. Unknown ids are ignored.
	pub fn patch_label(&mut self, id: &str, label: &str) {
		if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
			node.label.clear();
			node.label.push_str(label);
		}
	}

	/// Append an edge for `connection`, returning its id.
	///
	/// Returns `None` when an edge with the same source and target already
	/// exists.
	pub fn add_edge(&mut self, connection: Connection) -> Option<EdgeId> {
		let Connection { source, target } = connection;
		if self
			.edges
			.iter()
			.any(|e| e.source == source && e.target == target)
		{
			return None;
		}
		let id = format!("edge-{source}-{target}");
		self.edges.push(Edge::new(id.clone(), source, target));
		Some(id)
	}

	pub fn apply_node_changes(&mut self, changes: impl IntoIterator<Item = NodeChange>) {
		for change in changes {
			match change {
				NodeChange::Position { id, position } => {
					if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
						node.position = position;
					}
				}
				NodeChange::Select { id, selected } => {
					if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
						node.selected = selected;
					}
				}
				NodeChange::Remove { id } => self.nodes.retain(|n| n.id != id),
			}
		}
	}

	pub fn apply_edge_changes(&mut self, changes: impl IntoIterator<Item = EdgeChange>) {
		for change in changes {
			match change {
				EdgeChange::Select { id, selected } => {
					if let Some(edge) = self.edges.iter_mut().find(|e| e.id == id) {
						edge.selected = selected;
					}
				}
				EdgeChange::Remove { id } => self.edges.retain(|e| e.id != id),
			}
		}
	}

	/// Changes that deselect every node and edge.
	pub fn clear_selection_changes(&self) -> (Vec<NodeChange>, Vec<EdgeChange>) {
		let nodes = self
			.nodes
			.iter()
			.filter(|n| n.selected)
			.map(|n| NodeChange::Select {
				id: n.id.clone(),
				selected: false,
			})
			.collect();
		let edges = self
			.edges
			.iter()
			.filter(|e| e.selected)
			.map(|e| EdgeChange::Select {
				id: e.id.clone(),
				selected: false,
			})
			.collect();
		(nodes, edges)
	}

	/// Changes removing the current selection, including edges left dangling
	/// by removed nodes.
	pub fn deletion_changes(&self) -> (Vec<NodeChange>, Vec<EdgeChange>) {
		let removed: HashSet<&str> = self
			.nodes
			.iter()
			.filter(|n| n.selected)
			.map(|n| n.id.as_str())
			.collect();
		let node_changes = self
			.nodes
			.iter()
			.filter(|n| n.selected)
			.map(|n| NodeChange::Remove { id: n.id.clone() })
			.collect();
		let edge_changes = self
			.edges
			.iter()
			.filter(|e| {
				e.selected
					|| removed.contains(e.source.as_str())
					|| removed.contains(e.target.as_str())
			})
			.map(|e| EdgeChange::Remove { id: e.id.clone() })
			.collect();
		(node_changes, edge_changes)
	}
}
