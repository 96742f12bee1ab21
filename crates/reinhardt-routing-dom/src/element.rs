//! Element, mount target and document contracts.

use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a mounted element.
pub type ElementHandle = Arc<dyn Element>;

/// A UI element produced for a route.
///
/// Implementations are expected to use interior mutability: the engine only
/// ever holds shared handles.
pub trait Element: Send + Sync + fmt::Debug {
	/// Returns the element tag name.
	fn tag_name(&self) -> &str;

	/// Sets a property on the element.
	fn set_property(&self, name: &str, value: Value);

	/// Returns a property previously set on the element.
	fn property(&self, name: &str) -> Option<Value>;

	/// Finds a descendant insertion point matching `selector`.
	///
	/// Returns `None` when the element has no such descendant.
	fn find_outlet(&self, selector: &str) -> Option<Arc<dyn MountTarget>>;

	/// Resolves once the element has finished its own rendering.
	///
	/// The default implementation is immediately ready.
	fn ready(&self) -> BoxFuture<'static, ()> {
		Box::pin(futures::future::ready(()))
	}

	/// Serializes the element and its mounted descendants.
	fn render_to_string(&self) -> String;
}

/// A node that hosts a single element.
pub trait MountTarget: Send + Sync + fmt::Debug {
	/// Replaces the current content with `element`.
	fn replace_content(&self, element: ElementHandle);

	/// Removes the current content.
	fn clear(&self);

	/// Returns the currently mounted element.
	fn content(&self) -> Option<ElementHandle>;
}

/// Creates elements from tag names.
pub trait Document: Send + Sync {
	/// Creates an element for `tag`.
	///
	/// Returns `None` when the tag cannot be created.
	fn create_element(&self, tag: &str) -> Option<ElementHandle>;
}

/// Returns true when both handles point to the same element.
///
/// Only the data pointers are compared; vtable pointers of the same type may
/// differ between codegen units.
pub fn same_element(a: &ElementHandle, b: &ElementHandle) -> bool {
	std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
