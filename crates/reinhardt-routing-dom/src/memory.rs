//! Headless in-memory implementation of the rendering contracts.
//!
//! Elements render to HTML strings, which keeps outlet nesting observable
//! without a browser.

use crate::element::{Document, Element, ElementHandle, MountTarget};
use futures::future::BoxFuture;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

type ReadyFn = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;
type ElementConstructor = Arc<dyn Fn() -> MemoryElement + Send + Sync>;

/// An element kept in memory.
pub struct MemoryElement {
	tag: String,
	text: Option<String>,
	properties: RwLock<BTreeMap<String, Value>>,
	outlets: Vec<(String, Arc<MemoryTarget>)>,
	ready: Option<ReadyFn>,
}

impl MemoryElement {
	/// Creates an empty element.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			text: None,
			properties: RwLock::new(BTreeMap::new()),
			outlets: Vec::new(),
			ready: None,
		}
	}

	/// Sets the text content rendered before any outlet.
	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}

	/// Adds a descendant insertion point reachable through `selector`.
	///
	/// `.name` renders as a `div` with that class, `#name` as a `div` with
	/// that id, anything else as a tag.
	pub fn with_outlet(mut self, selector: impl Into<String>) -> Self {
		let selector = selector.into();
		let target = MemoryTarget::new(selector.clone());
		self.outlets.push((selector, target));
		self
	}

	/// Overrides the readiness signal.
	pub fn with_ready<F>(mut self, ready: F) -> Self
	where
		F: Fn() -> BoxFuture<'static, ()> + Send + Sync + 'static,
	{
		self.ready = Some(Arc::new(ready));
		self
	}

	/// Returns all properties set on the element.
	pub fn properties(&self) -> BTreeMap<String, Value> {
		self.properties.read().clone()
	}
}

impl fmt::Debug for MemoryElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryElement")
			.field("tag", &self.tag)
			.field("outlets", &self.outlets.iter().map(|(s, _)| s).collect::<Vec<_>>())
			.finish()
	}
}

impl Element for MemoryElement {
	fn tag_name(&self) -> &str {
		&self.tag
	}

	fn set_property(&self, name: &str, value: Value) {
		self.properties.write().insert(name.to_string(), value);
	}

	fn property(&self, name: &str) -> Option<Value> {
		self.properties.read().get(name).cloned()
	}

	fn find_outlet(&self, selector: &str) -> Option<Arc<dyn MountTarget>> {
		self.outlets
			.iter()
			.find(|(candidate, _)| candidate == selector)
			.map(|(_, target)| target.clone() as Arc<dyn MountTarget>)
	}

	fn ready(&self) -> BoxFuture<'static, ()> {
		match &self.ready {
			Some(ready) => ready(),
			None => Box::pin(futures::future::ready(())),
		}
	}

	fn render_to_string(&self) -> String {
		let mut html = format!("<{}>", self.tag);
		if let Some(text) = &self.text {
			html.push_str(text);
		}
		for (_, target) in &self.outlets {
			html.push_str(&target.outer_html());
		}
		html.push_str(&format!("</{}>", self.tag));
		html
	}
}

/// A mount target kept in memory.
pub struct MemoryTarget {
	selector: String,
	content: RwLock<Option<ElementHandle>>,
	mounts: AtomicUsize,
}

impl MemoryTarget {
	/// Creates a target identified by `selector`.
	pub fn new(selector: impl Into<String>) -> Arc<Self> {
		Arc::new(Self {
			selector: selector.into(),
			content: RwLock::new(None),
			mounts: AtomicUsize::new(0),
		})
	}

	/// Returns the selector this target was created with.
	pub fn selector(&self) -> &str {
		&self.selector
	}

	/// Renders the mounted content.
	pub fn inner_html(&self) -> String {
		self.content
			.read()
			.as_ref()
			.map(|el| el.render_to_string())
			.unwrap_or_default()
	}

	/// Renders the target node including its content.
	pub fn outer_html(&self) -> String {
		let inner = self.inner_html();
		if let Some(class) = self.selector.strip_prefix('.') {
			format!(r#"<div class="{}">{}</div>"#, class, inner)
		} else if let Some(id) = self.selector.strip_prefix('#') {
			format!(r#"<div id="{}">{}</div>"#, id, inner)
		} else {
			format!("<{0}>{1}</{0}>", self.selector, inner)
		}
	}

	/// Returns how many times content was mounted.
	pub fn mount_count(&self) -> usize {
		self.mounts.load(Ordering::SeqCst)
	}
}

impl fmt::Debug for MemoryTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryTarget")
			.field("selector", &self.selector)
			.field("mounts", &self.mount_count())
			.finish()
	}
}

impl MountTarget for MemoryTarget {
	fn replace_content(&self, element: ElementHandle) {
		*self.content.write() = Some(element);
		self.mounts.fetch_add(1, Ordering::SeqCst);
	}

	fn clear(&self) {
		*self.content.write() = None;
	}

	fn content(&self) -> Option<ElementHandle> {
		self.content.read().clone()
	}
}

/// Creates [`MemoryElement`]s, honoring registered custom tags.
#[derive(Default)]
pub struct MemoryDocument {
	definitions: RwLock<HashMap<String, ElementConstructor>>,
}

impl MemoryDocument {
	/// Creates a document with no custom tags.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a constructor for `tag`.
	pub fn define<F>(&self, tag: impl Into<String>, constructor: F)
	where
		F: Fn() -> MemoryElement + Send + Sync + 'static,
	{
		self.definitions
			.write()
			.insert(tag.into(), Arc::new(constructor));
	}

	/// Returns true when `tag` has a registered constructor.
	pub fn is_defined(&self, tag: &str) -> bool {
		self.definitions.read().contains_key(tag)
	}
}

impl fmt::Debug for MemoryDocument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryDocument")
			.field(
				"definitions",
				&self.definitions.read().keys().collect::<Vec<_>>(),
			)
			.finish()
	}
}

impl Document for MemoryDocument {
	fn create_element(&self, tag: &str) -> Option<ElementHandle> {
		if tag.is_empty() || tag.chars().any(char::is_whitespace) {
			return None;
		}
		let constructor = self.definitions.read().get(tag).cloned();
		let element = match constructor {
			Some(constructor) => constructor(),
			None => MemoryElement::new(tag),
		};
		Some(Arc::new(element))
	}
}
