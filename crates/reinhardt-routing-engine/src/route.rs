//! Route controllers and their live instances.
//!
//! A [`RouteController`] carries the lifecycle hooks of one route. Controllers
//! are created through a [`RouteClass`], found either directly in the route
//! options or through the [`ChildRoutes`] map of an ancestor controller, and
//! wrapped in a [`RouteInstance`] that the router caches by segment name.

mod binding;
mod class;
mod instance;

pub use binding::{PropertyBinding, PropertyFormat, PropertySource};
pub use class::{ChildRoutes, ClassInit, ClassModule, ClassSource, RouteClass};
pub use instance::RouteInstance;

use crate::component::ComponentDef;
use crate::error::RouteError;
use crate::transition::Transition;
use async_trait::async_trait;
use reinhardt_routing_dom::ElementHandle;
use serde_json::Value;

/// What a hook wants to happen to the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
	/// Carry on.
	Continue,
	/// Cancel the transition. Equivalent to calling [`Transition::cancel`].
	Cancel,
}

impl From<bool> for HookOutcome {
	fn from(proceed: bool) -> Self {
		if proceed { Self::Continue } else { Self::Cancel }
	}
}

impl From<()> for HookOutcome {
	fn from(_: ()) -> Self {
		Self::Continue
	}
}

/// Result of an `activate` or `deactivate` hook.
pub type HookResult = Result<HookOutcome, RouteError>;

/// Lifecycle hooks and rendering customization for a route.
///
/// Every method has a default, so a controller only implements what it
/// needs.
#[async_trait]
pub trait RouteController: Send + Sync + 'static {
	/// Called when the route becomes part of the active tree, or its params
	/// changed.
	async fn activate(&self, _route: &RouteInstance, _transition: &Transition) -> HookResult {
		Ok(HookOutcome::Continue)
	}

	/// Called when the route leaves the active tree, or its params changed.
	async fn deactivate(&self, _route: &RouteInstance, _transition: &Transition) -> HookResult {
		Ok(HookOutcome::Continue)
	}

	/// Loads route data after activation. Failures never abort the
	/// transition.
	async fn load(&self, _route: &RouteInstance, _transition: &Transition) -> Result<(), RouteError> {
		Ok(())
	}

	/// Component rendered when the route options declare none.
	fn component(&self) -> Option<ComponentDef> {
		None
	}

	/// Controller classes for child segments, keyed by segment name.
	fn child_routes(&self) -> Option<&ChildRoutes> {
		None
	}

	/// Selector of the outlet inside this route's element.
	fn outlet_selector(&self) -> Option<&str> {
		None
	}

	/// Value this route provides to its descendants under `key`.
	fn provide_context(&self, _key: &str) -> Option<Value> {
		None
	}

	/// Element properties derived from the transition.
	fn property_bindings(&self) -> &[PropertyBinding] {
		&[]
	}

	/// Updates an already mounted element in place.
	///
	/// Returning true keeps the element instead of creating a new one.
	fn update_el(&self, _route: &RouteInstance, _el: &ElementHandle, _transition: &Transition) -> bool {
		false
	}

	/// Customizes a freshly created element before it is shown.
	fn prepare_el(&self, _route: &RouteInstance, _el: &ElementHandle, _transition: &Transition) {}
}

/// Controller used for routes that only declare a component.
#[derive(Debug, Default)]
pub struct DefaultRoute;

impl RouteController for DefaultRoute {}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(true, HookOutcome::Continue)]
	#[case(false, HookOutcome::Cancel)]
	fn test_hook_outcome_from_bool(#[case] proceed: bool, #[case] expected: HookOutcome) {
		assert_eq!(HookOutcome::from(proceed), expected);
	}

	#[rstest]
	fn test_default_route_hooks() {
		let controller = DefaultRoute;
		assert!(controller.component().is_none());
		assert!(controller.child_routes().is_none());
		assert!(controller.property_bindings().is_empty());
	}
}
