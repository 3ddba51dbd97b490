use super::*;
use crate::components::flow_diagram::parser::parse;

fn sample_store() -> GraphStore {
	let (nodes, edges) = parse("a → b → c");
	GraphStore::new(nodes, edges)
}

// =============================================================
// replace_all
// =============================================================

#[test]
fn replace_all_discards_previous_graph() {
	let mut store = sample_store();
	store.patch_label("node-0", "edited");
	let (nodes, edges) = parse("x → y");
	store.replace_all(nodes.clone(), edges.clone());
	assert_eq!(store.nodes(), nodes.as_slice());
	assert_eq!(store.edges(), edges.as_slice());
	assert!(store.node("node-2").is_none());
}

#[test]
fn replace_all_with_nothing_empties_store() {
	let mut store = sample_store();
	store.replace_all(Vec::new(), Vec::new());
	assert!(store.nodes().is_empty());
	assert!(store.edges().is_empty());
}

// =============================================================
// patch_label
// =============================================================

#[test]
fn patch_label_changes_only_that_label() {
	let before = sample_store();
	let mut after = before.clone();
	after.patch_label("node-1", "X");

	assert_eq!(after.edges(), before.edges());
	for (a, b) in after.nodes().iter().zip(before.nodes()) {
		if a.id == "node-1" {
			assert_eq!(a.label, "X");
			assert_eq!(a.position, b.position);
			assert_eq!(a.kind, b.kind);
		} else {
			assert_eq!(a, b);
		}
	}
}

#[test]
fn patch_label_unknown_id_is_noop() {
	let before = sample_store();
	let mut after = before.clone();
	after.patch_label("node-9", "X");
	assert_eq!(after, before);
}

#[test]
fn patch_label_accepts_empty_label() {
	let mut store = sample_store();
	store.patch_label("node-0", "");
	assert_eq!(store.node("node-0").map(|n| n.label.as_str()), Some(""));
}

// =============================================================
// add_edge
// =============================================================

#[test]
fn add_edge_appends_with_fresh_id() {
	let mut store = sample_store();
	let id = store.add_edge(Connection {
		source: "node-2".into(),
		target: "node-0".into(),
	});
	assert_eq!(id.as_deref(), Some("edge-node-2-node-0"));
	assert_eq!(store.edges().len(), 3);
	let last = store.edges().last().map(|e| (e.source.as_str(), e.target.as_str()));
	assert_eq!(last, Some(("node-2", "node-0")));
}

#[test]
fn add_edge_ignores_duplicate_connection() {
	let mut store = sample_store();
	let id = store.add_edge(Connection {
		source: "node-0".into(),
		target: "node-1".into(),
	});
	assert!(id.is_none());
	assert_eq!(store.edges().len(), 2);
}

#[test]
fn add_edge_ids_stay_unique() {
	let mut store = sample_store();
	store.add_edge(Connection {
		source: "node-0".into(),
		target: "node-2".into(),
	});
	store.add_edge(Connection {
		source: "node-2".into(),
		target: "node-0".into(),
	});
	let ids: HashSet<&str> = store.edges().iter().map(|e| e.id.as_str()).collect();
	assert_eq!(ids.len(), store.edges().len());
}

// =============================================================
// change protocol
// =============================================================

#[test]
fn position_change_moves_node() {
	let mut store = sample_store();
	store.apply_node_changes([NodeChange::Position {
		id: "node-1".into(),
		position: Position::new(10.0, 20.0),
	}]);
	assert_eq!(
		store.node("node-1").map(|n| n.position),
		Some(Position::new(10.0, 20.0))
	);
	assert_eq!(store.node("node-1").map(|n| n.label.as_str()), Some("b"));
}

#[test]
fn changes_for_unknown_ids_are_ignored() {
	let before = sample_store();
	let mut after = before.clone();
	after.apply_node_changes([
		NodeChange::Select {
			id: "ghost".into(),
			selected: true,
		},
		NodeChange::Remove { id: "ghost".into() },
	]);
	after.apply_edge_changes([EdgeChange::Remove { id: "ghost".into() }]);
	assert_eq!(after, before);
}

#[test]
fn select_then_delete_removes_node_and_attached_edges() {
	let mut store = sample_store();
	store.apply_node_changes([NodeChange::Select {
		id: "node-1".into(),
		selected: true,
	}]);
	let (node_changes, edge_changes) = store.deletion_changes();
	assert_eq!(node_changes, [NodeChange::Remove { id: "node-1".into() }]);
	assert_eq!(edge_changes.len(), 2);

	store.apply_node_changes(node_changes);
	store.apply_edge_changes(edge_changes);
	assert_eq!(store.nodes().len(), 2);
	assert!(store.edges().is_empty());
}

#[test]
fn selected_edge_is_deleted_alone() {
	let mut store = sample_store();
	store.apply_edge_changes([EdgeChange::Select {
		id: "edge-0".into(),
		selected: true,
	}]);
	let (node_changes, edge_changes) = store.deletion_changes();
	assert!(node_changes.is_empty());
	assert_eq!(edge_changes, [EdgeChange::Remove { id: "edge-0".into() }]);
}

#[test]
fn nothing_selected_means_nothing_deleted() {
	let store = sample_store();
	let (node_changes, edge_changes) = store.deletion_changes();
	assert!(node_changes.is_empty());
	assert!(edge_changes.is_empty());
}

#[test]
fn clear_selection_deselects_everything() {
	let mut store = sample_store();
	store.apply_node_changes([NodeChange::Select {
		id: "node-0".into(),
		selected: true,
	}]);
	store.apply_edge_changes([EdgeChange::Select {
		id: "edge-1".into(),
		selected: true,
	}]);
	let (nodes, edges) = store.clear_selection_changes();
	store.apply_node_changes(nodes);
	store.apply_edge_changes(edges);
	assert!(store.nodes().iter().all(|n| !n.selected));
	assert!(store.edges().iter().all(|e| !e.selected));
}
