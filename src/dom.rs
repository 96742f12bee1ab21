//! Rendering contracts and the headless in-memory document
//!
//! This module re-exports `reinhardt-routing-dom`.
//!
//! ## Example
//!
//! ```
//! use reinhardt_routing::dom::memory::{MemoryElement, MemoryTarget};
//! use reinhardt_routing::dom::{Element, Region};
//! use std::sync::Arc;
//!
//! let root = MemoryTarget::new("#app");
//! let region = Region::new(root.clone());
//! region.show(Arc::new(MemoryElement::new("home-view").with_text("Hello")));
//!
//! assert_eq!(root.inner_html(), "<home-view>Hello</home-view>");
//! assert_eq!(region.current().unwrap().tag_name(), "home-view");
//! ```

pub use reinhardt_routing_dom::*;
