//! Which node, if any, has its label open for editing.

#[cfg(test)]
#[path = "edit_test.rs"]
mod edit_test;

use log::debug;

use super::types::NodeId;

/// At most one node is editable at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditState {
	#[default]
	Idle,
	Editing(NodeId),
}

impl EditState {
	pub fn active(&self) -> Option<&str> {
		match self {
			EditState::Idle => None,
			EditState::Editing(id) => Some(id.as_str()),
		}
	}

	pub fn is_editing(&self, id: &str) -> bool {
		self.active() == Some(id)
	}

	/// Open `id` for editing. Any other node being edited is closed; label
	/// changes were already written per keystroke so nothing is lost.
	pub fn begin(&mut self, id: &str) {
		if let EditState::Editing(prev) = self {
			if prev.as_str() != id {
				debug!("edit moved from {prev} to {id}");
			}
		}
		*self = EditState::Editing(id.to_owned());
	}

	/// Close editing of `id` on blur or Enter. Ignored when `id` is not the
	/// node currently being edited.
	pub fn finish(&mut self, id: &str) {
		if self.is_editing(id) {
			debug!("edit of {id} finished");
			*self = EditState::Idle;
		}
	}

	/// Drop the active edit if its node no longer exists.
	pub fn retain_if(&mut self, exists: impl FnOnce(&str) -> bool) {
		if let EditState::Editing(id) = self {
			if !exists(id.as_str()) {
				debug!("edited node {id} is gone");
				*self = EditState::Idle;
			}
		}
	}

	pub fn reset(&mut self) {
		*self = EditState::Idle;
	}
}
