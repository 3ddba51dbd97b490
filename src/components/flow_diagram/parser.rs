//! Arrow-delimited text to a left-to-right chain of nodes.

#[cfg(test)]
#[path = "parser_test.rs"]
mod parser_test;

use super::types::{Edge, Node, Position};

/// Separator between steps.
pub const DELIMITER: char = '→';
/// Flow used when the user submits an empty field.
pub const DEFAULT_FLOW_TEXT: &str = "登录 → 验证短信 → 进入主页";
/// Horizontal distance between consecutive nodes.
pub const NODE_SPACING: f64 = 250.0;
/// Row every parsed node is placed on.
pub const ROW_Y: f64 = 100.0;

/// Split `text` on [`DELIMITER`] and lay the steps out on a single row.
///
/// Never fails: text without any delimiter becomes one node, and empty text
/// becomes one node with an empty label.
pub fn parse(text: &str) -> (Vec<Node>, Vec<Edge>) {
	let nodes: Vec<Node> = text
		.split(DELIMITER)
		.map(str::trim)
		.enumerate()
		.map(|(i, step)| {
			Node::new(
				format!("node-{i}"),
				step,
				Position::new(i as f64 * NODE_SPACING, ROW_Y),
			)
		})
		.collect();

	let edges = (1..nodes.len())
		.map(|i| {
			Edge::new(
				format!("edge-{}", i - 1),
				format!("node-{}", i - 1),
				format!("node-{i}"),
			)
		})
		.collect();

	(nodes, edges)
}

/// Like [`parse`], but an empty string is replaced by [`DEFAULT_FLOW_TEXT`].
pub fn parse_or_default(text: &str) -> (Vec<Node>, Vec<Edge>) {
	parse(text_or_default(text))
}

/// The text that will actually be parsed for a submitted field value.
pub fn text_or_default(text: &str) -> &str {
	if text.is_empty() { DEFAULT_FLOW_TEXT } else { text }
}
