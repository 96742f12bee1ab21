//! Route segment descriptors.
//!
//! A segment is one named node of a route path. Its descriptor is produced
//! by the route table and never changes while the table lives; the params
//! attached to a descriptor are the ones the segment's own path declares.

use crate::component::ComponentDef;
use crate::route::ClassSource;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Route parameters. Compared by deep equality.
pub type Params = BTreeMap<String, Value>;

/// Query string values. Compared by deep equality.
pub type Query = BTreeMap<String, Value>;

/// Options declared for a segment in the route table.
#[derive(Clone)]
pub struct RouteOptions {
	path: Option<String>,
	class: Option<ClassSource>,
	class_options: Map<String, Value>,
	component: Option<ComponentDef>,
	properties: Map<String, Value>,
	outlet: bool,
	extra: Map<String, Value>,
}

impl Default for RouteOptions {
	fn default() -> Self {
		Self {
			path: None,
			class: None,
			class_options: Map::new(),
			component: None,
			properties: Map::new(),
			outlet: true,
			extra: Map::new(),
		}
	}
}

impl RouteOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the path pattern. Defaults to the segment name.
	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	/// Sets the controller class source.
	pub fn class(mut self, class: impl Into<ClassSource>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Adds an option passed to the controller class on construction.
	pub fn class_option(mut self, key: impl Into<String>, value: Value) -> Self {
		self.class_options.insert(key.into(), value);
		self
	}

	/// Sets the component rendered for the segment.
	pub fn component(mut self, component: impl Into<ComponentDef>) -> Self {
		self.component = Some(component.into());
		self
	}

	/// Adds a property applied to the rendered element.
	pub fn property(mut self, key: impl Into<String>, value: Value) -> Self {
		self.properties.insert(key.into(), value);
		self
	}

	/// Declares whether the segment element exposes an outlet for children.
	pub fn outlet(mut self, outlet: bool) -> Self {
		self.outlet = outlet;
		self
	}

	/// Adds an arbitrary value readable by controllers.
	pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
		self.extra.insert(key.into(), value);
		self
	}

	/// Returns the declared path pattern.
	pub fn declared_path(&self) -> Option<&str> {
		self.path.as_deref()
	}

	/// Returns the controller class source.
	pub fn class_source(&self) -> Option<&ClassSource> {
		self.class.as_ref()
	}

	/// Returns the options passed to the controller class.
	pub fn class_options(&self) -> &Map<String, Value> {
		&self.class_options
	}

	/// Returns the declared component.
	pub fn component_def(&self) -> Option<&ComponentDef> {
		self.component.as_ref()
	}

	/// Returns the declared element properties.
	pub fn properties(&self) -> &Map<String, Value> {
		&self.properties
	}

	/// Returns false for outlet-less pass-through segments.
	pub fn has_outlet(&self) -> bool {
		self.outlet
	}

	/// Returns an arbitrary value.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.extra.get(key)
	}
}

impl fmt::Debug for RouteOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteOptions")
			.field("path", &self.path)
			.field("has_class", &self.class.is_some())
			.field("class_options", &self.class_options)
			.field("component", &self.component)
			.field("properties", &self.properties)
			.field("outlet", &self.outlet)
			.field("extra", &self.extra)
			.finish()
	}
}

/// One matched segment of a transition.
#[derive(Debug, Clone)]
pub struct SegmentDescriptor {
	name: String,
	path: String,
	options: Arc<RouteOptions>,
	params: Params,
}

impl SegmentDescriptor {
	/// Creates a descriptor.
	pub fn new(
		name: impl Into<String>,
		path: impl Into<String>,
		options: Arc<RouteOptions>,
		params: Params,
	) -> Self {
		Self {
			name: name.into(),
			path: path.into(),
			options,
			params,
		}
	}

	/// Returns the unique segment name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the path pattern.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the declared options.
	pub fn options(&self) -> &Arc<RouteOptions> {
		&self.options
	}

	/// Returns the params declared by this segment's path.
	pub fn params(&self) -> &Params {
		&self.params
	}

	/// Returns true when both segments have the same name and deep-equal
	/// params.
	pub fn same_state(&self, other: &SegmentDescriptor) -> bool {
		self.name == other.name && self.params == other.params
	}
}
