//! Outlet regions.

use crate::element::{ElementHandle, MountTarget, same_element};
use std::fmt;
use std::sync::Arc;

/// An insertion point where one element is shown at a time.
///
/// Cloning a region yields a handle to the same mount target.
#[derive(Clone)]
pub struct Region {
	target: Arc<dyn MountTarget>,
}

impl Region {
	/// Creates a region over `target`.
	pub fn new(target: Arc<dyn MountTarget>) -> Self {
		Self { target }
	}

	/// Shows `element` in this region, replacing the previous content.
	///
	/// Showing the element that is already mounted is a no-op.
	pub fn show(&self, element: ElementHandle) {
		if let Some(current) = self.target.content()
			&& same_element(&current, &element)
		{
			return;
		}
		self.target.replace_content(element);
	}

	/// Removes the shown element.
	pub fn empty(&self) {
		self.target.clear();
	}

	/// Returns the currently shown element.
	pub fn current(&self) -> Option<ElementHandle> {
		self.target.content()
	}

	/// Returns the underlying mount target.
	pub fn target(&self) -> &Arc<dyn MountTarget> {
		&self.target
	}
}

impl fmt::Debug for Region {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Region")
			.field("target", &self.target)
			.field("has_content", &self.target.content().is_some())
			.finish()
	}
}
