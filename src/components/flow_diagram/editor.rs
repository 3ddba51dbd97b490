//! Editor core: input text, graph and edit state, driven by [`FlowEvent`]s.
//!
//! The canvas component and the page only ever talk to the graph through
//! [`FlowEditor::dispatch`], which keeps the edit state consistent with the
//! node set after every event.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use log::debug;

use super::edit::EditState;
use super::parser;
use super::store::{EdgeChange, GraphStore, NodeChange};
use super::types::{Connection, NodeId};

/// Everything the UI layer can ask the editor to do.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowEvent {
	/// Text field content changed.
	InputChanged(String),
	/// Generate button pressed: parse the field, or the sample if it is empty.
	Submit,
	DoubleClick(NodeId),
	LabelInput { id: NodeId, label: String },
	Blur(NodeId),
	/// Enter pressed in the label editor.
	Commit(NodeId),
	NodesChanged(Vec<NodeChange>),
	EdgesChanged(Vec<EdgeChange>),
	Connect(Connection),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowEditor {
	input_text: String,
	store: GraphStore,
	edit: EditState,
	/// Bumped on every full replace so views can refit.
	generation: u64,
}

impl FlowEditor {
	pub fn input_text(&self) -> &str {
		&self.input_text
	}

	pub fn store(&self) -> &GraphStore {
		&self.store
	}

	pub fn edit_state(&self) -> &EditState {
		&self.edit
	}

	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn dispatch(&mut self, event: FlowEvent) {
		match event {
			FlowEvent::InputChanged(text) => self.input_text = text,
			FlowEvent::Submit => self.submit(),
			FlowEvent::DoubleClick(id) => {
				if self.store.node(&id).is_some() {
					self.edit.begin(&id);
				}
			}
			FlowEvent::LabelInput { id, label } => self.store.patch_label(&id, &label),
			FlowEvent::Blur(id) | FlowEvent::Commit(id) => self.edit.finish(&id),
			FlowEvent::NodesChanged(changes) => {
				self.store.apply_node_changes(changes);
				let store = &self.store;
				self.edit.retain_if(|id| store.node(id).is_some());
			}
			FlowEvent::EdgesChanged(changes) => self.store.apply_edge_changes(changes),
			FlowEvent::Connect(connection) => {
				if let Some(id) = self.store.add_edge(connection) {
					debug!("connected {id}");
				}
			}
		}
	}

	fn submit(&mut self) {
		let (nodes, edges) = parser::parse_or_default(&self.input_text);
		debug!("generated {} nodes, {} edges", nodes.len(), edges.len());
		self.input_text = parser::text_or_default(&self.input_text).to_owned();
		self.store.replace_all(nodes, edges);
		self.edit.reset();
		self.generation += 1;
	}
}
