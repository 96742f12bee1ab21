//! Rendering contracts for nested route outlets.
//!
//! The transition engine never touches a concrete DOM. It talks to the
//! rendering collaborator through three small contracts:
//!
//! - [`Element`] - a mounted UI element that carries properties, exposes
//!   descendant insertion points and signals when it has finished rendering.
//! - [`MountTarget`] - a node that can host exactly one element.
//! - [`Document`] - creates elements from tag names.
//!
//! [`Region`] wraps a mount target and implements the "show this element
//! here" semantics used for the root outlet and for every route outlet.
//!
//! The [`memory`] module ships a headless implementation of all three
//! contracts, used for server-side rendering and in tests.
//!
//! # Example
//!
//! ```
//! use reinhardt_routing_dom::memory::{MemoryDocument, MemoryElement, MemoryTarget};
//! use reinhardt_routing_dom::{Document, Region};
//! use std::sync::Arc;
//!
//! let document = MemoryDocument::new();
//! document.define("app-shell", || MemoryElement::new("app-shell").with_outlet(".content"));
//!
//! let root = MemoryTarget::new("main");
//! let region = Region::new(root.clone());
//! region.show(document.create_element("app-shell").unwrap());
//!
//! assert_eq!(
//! 	root.inner_html(),
//! 	r#"<app-shell><div class="content"></div></app-shell>"#
//! );
//! ```

#![warn(missing_docs)]

pub mod element;
pub mod memory;
pub mod region;

pub use element::{Document, Element, ElementHandle, MountTarget, same_element};
pub use region::Region;

/// Re-export commonly used types.
pub mod prelude {
	pub use crate::element::{Document, Element, ElementHandle, MountTarget, same_element};
	pub use crate::memory::{MemoryDocument, MemoryElement, MemoryTarget};
	pub use crate::region::Region;
}
