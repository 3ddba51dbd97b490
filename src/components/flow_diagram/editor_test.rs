use super::*;
use crate::components::flow_diagram::parser::DEFAULT_FLOW_TEXT;

fn editor_with(text: &str) -> FlowEditor {
	let mut editor = FlowEditor::default();
	editor.dispatch(FlowEvent::InputChanged(text.into()));
	editor.dispatch(FlowEvent::Submit);
	editor
}

fn label(editor: &FlowEditor, id: &str) -> Option<String> {
	editor.store().node(id).map(|n| n.label.clone())
}

// =============================================================
// Submit
// =============================================================

#[test]
fn submit_parses_input() {
	let editor = editor_with("a → b");
	assert_eq!(editor.store().nodes().len(), 2);
	assert_eq!(editor.store().edges().len(), 1);
	assert_eq!(editor.generation(), 1);
}

#[test]
fn submit_empty_fills_default_text() {
	let editor = editor_with("");
	assert_eq!(editor.input_text(), DEFAULT_FLOW_TEXT);
	assert_eq!(label(&editor, "node-1").as_deref(), Some("验证短信"));
}

#[test]
fn resubmit_discards_edits() {
	let mut editor = editor_with("a → b");
	editor.dispatch(FlowEvent::LabelInput {
		id: "node-0".into(),
		label: "changed".into(),
	});
	editor.dispatch(FlowEvent::Submit);
	assert_eq!(label(&editor, "node-0").as_deref(), Some("a"));
	assert_eq!(editor.generation(), 2);
}

// =============================================================
// Edit flow
// =============================================================

#[test]
fn double_click_then_type_then_commit() {
	let mut editor = editor_with("a → b");
	editor.dispatch(FlowEvent::DoubleClick("node-1".into()));
	assert!(editor.edit_state().is_editing("node-1"));

	editor.dispatch(FlowEvent::LabelInput {
		id: "node-1".into(),
		label: "b2".into(),
	});
	assert_eq!(label(&editor, "node-1").as_deref(), Some("b2"));
	assert!(editor.edit_state().is_editing("node-1"));

	editor.dispatch(FlowEvent::Commit("node-1".into()));
	assert_eq!(*editor.edit_state(), EditState::Idle);
	assert_eq!(label(&editor, "node-1").as_deref(), Some("b2"));
}

#[test]
fn blur_keeps_typed_label() {
	let mut editor = editor_with("a → b");
	editor.dispatch(FlowEvent::DoubleClick("node-0".into()));
	editor.dispatch(FlowEvent::LabelInput {
		id: "node-0".into(),
		label: "typed".into(),
	});
	editor.dispatch(FlowEvent::Blur("node-0".into()));
	assert_eq!(*editor.edit_state(), EditState::Idle);
	assert_eq!(label(&editor, "node-0").as_deref(), Some("typed"));
}

#[test]
fn double_click_second_node_switches_edit() {
	let mut editor = editor_with("a → b");
	editor.dispatch(FlowEvent::DoubleClick("node-0".into()));
	editor.dispatch(FlowEvent::DoubleClick("node-1".into()));
	assert_eq!(editor.edit_state().active(), Some("node-1"));

	// late blur from the first editor
	editor.dispatch(FlowEvent::Blur("node-0".into()));
	assert_eq!(editor.edit_state().active(), Some("node-1"));
}

#[test]
fn double_click_unknown_node_is_ignored() {
	let mut editor = editor_with("a → b");
	editor.dispatch(FlowEvent::DoubleClick("node-7".into()));
	assert_eq!(*editor.edit_state(), EditState::Idle);
}

#[test]
fn submit_while_editing_clears_edit() {
	let mut editor = editor_with("a → b → c");
	editor.dispatch(FlowEvent::DoubleClick("node-2".into()));
	editor.dispatch(FlowEvent::InputChanged("x".into()));
	editor.dispatch(FlowEvent::Submit);
	assert_eq!(*editor.edit_state(), EditState::Idle);
	assert!(editor.store().node("node-2").is_none());
}

#[test]
fn removing_edited_node_clears_edit() {
	let mut editor = editor_with("a → b");
	editor.dispatch(FlowEvent::DoubleClick("node-1".into()));
	editor.dispatch(FlowEvent::NodesChanged(vec![NodeChange::Remove {
		id: "node-1".into(),
	}]));
	assert_eq!(*editor.edit_state(), EditState::Idle);
}

#[test]
fn moving_edited_node_keeps_edit() {
	let mut editor = editor_with("a → b");
	editor.dispatch(FlowEvent::DoubleClick("node-1".into()));
	editor.dispatch(FlowEvent::NodesChanged(vec![NodeChange::Position {
		id: "node-1".into(),
		position: crate::components::flow_diagram::types::Position::new(5.0, 5.0),
	}]));
	assert!(editor.edit_state().is_editing("node-1"));
}

// =============================================================
// Connect
// =============================================================

#[test]
fn connect_adds_edge_once() {
	let mut editor = editor_with("a → b → c");
	let connection = Connection {
		source: "node-0".into(),
		target: "node-2".into(),
	};
	editor.dispatch(FlowEvent::Connect(connection.clone()));
	editor.dispatch(FlowEvent::Connect(connection));
	assert_eq!(editor.store().edges().len(), 3);
}

#[test]
fn edges_changed_removes_edge() {
	let mut editor = editor_with("a → b");
	editor.dispatch(FlowEvent::EdgesChanged(vec![EdgeChange::Remove {
		id: "edge-0".into(),
	}]));
	assert!(editor.store().edges().is_empty());
}
