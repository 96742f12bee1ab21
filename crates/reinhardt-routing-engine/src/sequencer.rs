//! Lifecycle sequencing.
//!
//! Runs the phases of a transition in order: deactivate the stale suffix of
//! the previous state leaf-to-root, build (or reuse) the instances of the
//! target state root-to-leaf, activate the changed suffix root-to-leaf, then
//! load data for the whole tree.
//!
//! Cancellation is cooperative. The transition state is checked at every
//! phase boundary and around every hook; a hook that is already running is
//! never interrupted.

use crate::error::{LifecyclePhase, TransitionError, TransitionResult};
use crate::events::RouterEvent;
use crate::resolver::resolve_instance;
use crate::route::{HookOutcome, RouteInstance};
use crate::router::Router;
use crate::transition::{StepOutcome, Transition};
use crate::tree::{RouteTree, changing_index};
use std::sync::Arc;

/// What the lifecycle phases produced.
#[derive(Debug, Clone, Default)]
pub struct LifecycleReport {
	/// Instances of the target state.
	pub tree: RouteTree,
	/// First index of `tree` that changed.
	pub changing_index: usize,
	/// Instances that were activated, root first.
	pub activated: Vec<Arc<RouteInstance>>,
	/// Instances that were deactivated, leaf first.
	pub deactivated: Vec<Arc<RouteInstance>>,
}

/// Runs the deactivate, build, activate and load phases.
///
/// Returns [`TransitionError::Cancelled`] or [`TransitionError::Redirected`]
/// as soon as the transition is cancelled.
pub async fn run_lifecycle(
	router: &Router,
	transition: &Arc<Transition>,
) -> TransitionResult<LifecycleReport> {
	let index = changing_index(transition.prev_routes(), transition.routes());
	tracing::debug!(
		changing_index = index,
		from = transition.prev_routes().len(),
		to = transition.routes().len(),
		"computed changing index"
	);

	let deactivated: Vec<Arc<RouteInstance>> = transition.prev_routes()[index..]
		.iter()
		.rev()
		.filter_map(|segment| router.cache().get(segment.name()))
		.collect();
	run_phase(router, transition, &deactivated, LifecyclePhase::Deactivate).await?;

	let tree = build_tree(router, transition).await?;
	transition.set_instances(tree.lineage());
	transition.outcome().into_result()?;

	let activated = tree.suffix(index);
	transition.set_activating(activated.clone());
	run_phase(router, transition, &activated, LifecyclePhase::Activate).await?;

	run_loads(transition, &tree).await;

	for instance in &deactivated {
		if !activated.iter().any(|a| Arc::ptr_eq(a, instance)) {
			instance.clear_el();
		}
	}

	Ok(LifecycleReport {
		tree,
		changing_index: index,
		activated,
		deactivated,
	})
}

/// Reuses cached instances and resolves missing ones, root to leaf.
async fn build_tree(router: &Router, transition: &Transition) -> TransitionResult<RouteTree> {
	let mut tree = RouteTree::new();
	for segment in transition.routes() {
		let instance = match router.cache().get(segment.name()) {
			Some(instance) => instance,
			None => {
				let instance = Arc::new(resolve_instance(router, segment, &tree).await?);
				router.cache().set(segment.name(), instance.clone());
				instance
			}
		};
		instance.set_parent(tree.leaf());
		tree.push(instance);
	}
	Ok(tree)
}

async fn run_phase(
	router: &Router,
	transition: &Arc<Transition>,
	instances: &[Arc<RouteInstance>],
	phase: LifecyclePhase,
) -> TransitionResult<()> {
	transition.outcome().into_result()?;
	for instance in instances {
		match run_step(router, transition, instance, phase).await? {
			StepOutcome::Continue => {}
			stopped => return stopped.into_result(),
		}
	}
	Ok(())
}

async fn run_step(
	router: &Router,
	transition: &Arc<Transition>,
	route: &Arc<RouteInstance>,
	phase: LifecyclePhase,
) -> TransitionResult<StepOutcome> {
	let events = router.events();
	match phase {
		LifecyclePhase::Activate => events.emit(RouterEvent::BeforeActivate { transition, route }),
		LifecyclePhase::Deactivate => events.emit(RouterEvent::BeforeDeactivate { transition, route }),
	}
	let outcome = transition.outcome();
	if !outcome.is_continue() {
		return Ok(outcome);
	}

	tracing::debug!(route = route.name(), %phase, "running route hook");
	let controller = route.controller();
	let hook = match phase {
		LifecyclePhase::Activate => controller.activate(route, transition).await,
		LifecyclePhase::Deactivate => controller.deactivate(route, transition).await,
	};
	let hook = hook.map_err(|source| TransitionError::Hook {
		route: route.name().to_string(),
		phase,
		source,
	})?;
	if hook == HookOutcome::Cancel {
		tracing::debug!(route = route.name(), %phase, "route hook cancelled the transition");
		transition.cancel();
	}

	let outcome = transition.outcome();
	if outcome.is_continue() {
		match phase {
			LifecyclePhase::Activate => events.emit(RouterEvent::Activate { transition, route }),
			LifecyclePhase::Deactivate => events.emit(RouterEvent::Deactivate { transition, route }),
		}
	}
	Ok(outcome)
}

/// Awaits every `load` hook in tree order. Failures are logged and ignored.
async fn run_loads(transition: &Transition, tree: &RouteTree) {
	for route in tree.lineage() {
		if transition.is_cancelled() {
			return;
		}
		let controller = route.controller();
		tracing::debug!(route = route.name(), "loading route data");
		if let Err(err) = controller.load(&route, transition).await {
			tracing::warn!(route = route.name(), error = %err, "route load failed");
		}
	}
}
