//! Live route instances.

use super::RouteController;
use crate::component::ComponentDef;
use crate::router::{Router, WeakRouter};
use crate::segment::{RouteOptions, SegmentDescriptor};
use parking_lot::{Mutex, RwLock};
use reinhardt_routing_dom::{ElementHandle, Region, same_element};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Weak};

/// The controller of one segment together with its rendering state.
///
/// The router keeps at most one instance per segment name and reuses it for
/// every later transition through that segment.
pub struct RouteInstance {
	name: String,
	path: String,
	options: Arc<RouteOptions>,
	router: WeakRouter,
	controller: Box<dyn RouteController>,
	component: Option<ComponentDef>,
	el: RwLock<Option<ElementHandle>>,
	outlet: Mutex<Option<(ElementHandle, Region)>>,
	parent: RwLock<Weak<RouteInstance>>,
}

impl RouteInstance {
	pub(crate) fn new(
		segment: &SegmentDescriptor,
		router: &Router,
		controller: Box<dyn RouteController>,
		component: Option<ComponentDef>,
	) -> Self {
		Self {
			name: segment.name().to_string(),
			path: segment.path().to_string(),
			options: segment.options().clone(),
			router: router.downgrade(),
			controller,
			component,
			el: RwLock::new(None),
			outlet: Mutex::new(None),
			parent: RwLock::new(Weak::new()),
		}
	}

	/// Returns the segment name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the segment path pattern.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the segment options.
	pub fn options(&self) -> &RouteOptions {
		&self.options
	}

	/// Returns the owning router while it is alive.
	pub fn router(&self) -> Option<Router> {
		self.router.upgrade()
	}

	/// Returns the controller.
	pub fn controller(&self) -> &dyn RouteController {
		self.controller.as_ref()
	}

	/// Returns the component to render: the one declared in the route
	/// options, else the controller's.
	pub fn component(&self) -> Option<ComponentDef> {
		self.component
			.clone()
			.or_else(|| self.controller.component())
	}

	/// Returns false for outlet-less pass-through routes.
	pub fn declares_outlet(&self) -> bool {
		self.options.has_outlet()
	}

	/// Returns the mounted element.
	pub fn el(&self) -> Option<ElementHandle> {
		self.el.read().clone()
	}

	pub(crate) fn set_el(&self, el: ElementHandle) {
		*self.el.write() = Some(el);
	}

	pub(crate) fn clear_el(&self) {
		self.el.write().take();
	}

	/// Returns the parent instance in the most recent transition.
	pub fn parent(&self) -> Option<Arc<RouteInstance>> {
		self.parent.read().upgrade()
	}

	pub(crate) fn set_parent(&self, parent: Option<&Arc<RouteInstance>>) {
		*self.parent.write() = parent.map(Arc::downgrade).unwrap_or_default();
	}

	/// Looks up a context value provided by an ancestor, nearest first.
	pub fn context(&self, key: &str) -> Option<Value> {
		let mut current = self.parent();
		while let Some(route) = current {
			if let Some(value) = route.controller.provide_context(key) {
				return Some(value);
			}
			current = route.parent();
		}
		None
	}

	/// Returns the outlet region inside the mounted element.
	///
	/// The region is cached for as long as the same element stays mounted.
	pub fn outlet_region(&self, default_selector: &str) -> Option<Region> {
		let el = self.el()?;
		let mut cached = self.outlet.lock();
		if let Some((owner, region)) = cached.as_ref()
			&& same_element(owner, &el)
		{
			return Some(region.clone());
		}

		let selector = self
			.controller
			.outlet_selector()
			.unwrap_or(default_selector);
		let region = Region::new(el.find_outlet(selector)?);
		*cached = Some((el, region.clone()));
		Some(region)
	}
}

impl fmt::Debug for RouteInstance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteInstance")
			.field("name", &self.name)
			.field("path", &self.path)
			.field("component", &self.component)
			.field("has_el", &self.el.read().is_some())
			.field("parent", &self.parent().map(|p| p.name.clone()))
			.finish()
	}
}
