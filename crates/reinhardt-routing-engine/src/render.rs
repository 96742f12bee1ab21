//! Nested rendering of route elements.
//!
//! Each rendered route mounts its element into the outlet of the nearest
//! ancestor that has an element and exposes an outlet, or into the router's
//! root outlet. Entries are mounted strictly one after another; the next
//! entry waits until the previous element reports it is ready.

use crate::component::create_element;
use crate::error::{TransitionError, TransitionResult};
use crate::events::RouterEvent;
use crate::route::RouteInstance;
use crate::router::Router;
use crate::sequencer::LifecycleReport;
use crate::transition::{RouteState, Transition};
use crate::tree::RouteTree;
use reinhardt_routing_dom::{ElementHandle, Region};
use serde_json::Value;
use std::sync::Arc;

/// Element property carrying the serialized route state.
pub const ROUTE_STATE_PROPERTY: &str = "$route";

/// Returns the tree indices considered for rendering.
///
/// These are the activated indices, or only the leaf when nothing was
/// activated.
pub fn render_candidates(tree: &RouteTree, changing_index: usize) -> Vec<usize> {
	if changing_index < tree.len() {
		(changing_index..tree.len()).collect()
	} else {
		tree.len().checked_sub(1).into_iter().collect()
	}
}

/// Returns the tree indices to mount, in order.
///
/// Candidates without a component are skipped. A candidate directly
/// following an outlet-less route replaces it in the queue.
pub fn render_queue(tree: &RouteTree, candidates: &[usize]) -> Vec<usize> {
	let mut queue: Vec<usize> = Vec::with_capacity(candidates.len());
	for &index in candidates {
		let Some(route) = tree.get(index) else {
			continue;
		};
		if route.component().is_none() {
			continue;
		}
		if let Some(&last) = queue.last()
			&& tree.get(last).is_some_and(|prev| !prev.declares_outlet())
		{
			queue.pop();
		}
		queue.push(index);
	}
	queue
}

/// Finds the region the route at `index` mounts into.
///
/// Ancestors without an element or without an outlet are skipped and lose
/// their element reference. The first ancestor with an element must expose
/// an outlet. Falls back to the root outlet, which may be absent.
pub fn parent_region(
	router: &Router,
	tree: &RouteTree,
	index: usize,
) -> TransitionResult<Option<Region>> {
	let selector = &router.config().outlet_selector;
	for (_, ancestor) in tree.ancestors(index) {
		if ancestor.el().is_some() && ancestor.declares_outlet() {
			return ancestor
				.outlet_region(selector)
				.map(Some)
				.ok_or_else(|| TransitionError::NoOutlet {
					route: ancestor.name().to_string(),
				});
		}
		ancestor.clear_el();
	}
	Ok(router.root_outlet())
}

/// Applies the controller's property bindings to `el`.
pub fn apply_bindings(route: &RouteInstance, el: &ElementHandle, transition: &Transition) {
	for binding in route.controller().property_bindings() {
		if let Some(value) = binding.value(transition) {
			el.set_property(&binding.property, value);
		}
	}
}

/// Sets the serialized route state on `el`.
pub fn attach_route_state(el: &ElementHandle, transition: &Transition) {
	match serde_json::to_value(RouteState::from_transition(transition)) {
		Ok(state) => el.set_property(ROUTE_STATE_PROPERTY, state),
		Err(err) => tracing::warn!(error = %err, "failed to serialize route state"),
	}
}

/// Renders the target state described by `report`.
pub async fn render(
	router: &Router,
	transition: &Arc<Transition>,
	report: &LifecycleReport,
) -> TransitionResult<()> {
	let tree = &report.tree;
	let candidates = render_candidates(tree, report.changing_index);
	let queue = render_queue(tree, &candidates);
	tracing::debug!(candidates = candidates.len(), queued = queue.len(), "rendering routes");

	for route in tree.lineage() {
		if candidates.iter().any(|&i| tree.get(i).is_some_and(|c| Arc::ptr_eq(c, &route))) {
			continue;
		}
		if let Some(el) = route.el() {
			apply_bindings(&route, &el, transition);
		}
	}

	for index in queue {
		mount(router, transition, tree, index).await?;
	}
	Ok(())
}

async fn mount(
	router: &Router,
	transition: &Arc<Transition>,
	tree: &RouteTree,
	index: usize,
) -> TransitionResult<()> {
	let Some(route) = tree.get(index) else {
		return Ok(());
	};
	let region = parent_region(router, tree, index)?;
	let controller = route.controller();

	if let Some(el) = route.el()
		&& controller.update_el(route, &el, transition)
	{
		tracing::debug!(route = route.name(), "updated mounted element in place");
		return Ok(());
	}

	let invalid = || TransitionError::InvalidComponent {
		route: route.name().to_string(),
	};
	let component = route.component().ok_or_else(invalid)?;
	let el = create_element(route, &component, router.document()).await?;

	for (name, value) in route.options().properties() {
		el.set_property(name, value.clone());
	}
	apply_bindings(route, &el, transition);
	attach_route_state(&el, transition);
	controller.prepare_el(route, &el, transition);

	let Some(region) = region else {
		return Err(TransitionError::NoRootOutlet);
	};
	region.show(el.clone());
	route.set_el(el.clone());
	tracing::debug!(route = route.name(), tag = el.tag_name(), "mounted route element");
	router.events().emit(RouterEvent::Render { transition, route });

	el.ready().await;
	Ok(())
}

/// Returns the route state set on an element, if any.
pub fn route_state_of(el: &ElementHandle) -> Option<Value> {
	el.property(ROUTE_STATE_PROPERTY)
}
