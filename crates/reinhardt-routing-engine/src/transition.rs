//! The in-flight transition between two route states.

use crate::error::{TransitionError, TransitionResult};
use crate::route::RouteInstance;
use crate::segment::{Params, Query, SegmentDescriptor};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Target of a redirect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedirectTarget {
	/// Route name.
	pub name: String,
	/// Route params.
	pub params: Params,
	/// Query values.
	pub query: Query,
}

impl RedirectTarget {
	/// Creates a target without params or query.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			params: Params::new(),
			query: Query::new(),
		}
	}

	/// Sets the params.
	pub fn with_params(mut self, params: Params) -> Self {
		self.params = params;
		self
	}

	/// Sets the query.
	pub fn with_query(mut self, query: Query) -> Self {
		self.query = query;
		self
	}
}

/// Result of one orchestration step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
	/// Keep going.
	Continue,
	/// Stop; the transition was cancelled.
	Cancelled,
	/// Stop; the transition was replaced by a redirect.
	Redirected(RedirectTarget),
}

impl StepOutcome {
	/// Returns true for [`StepOutcome::Continue`].
	pub fn is_continue(&self) -> bool {
		matches!(self, Self::Continue)
	}

	/// Maps a stopping outcome to its cancellation error.
	pub fn into_result(self) -> TransitionResult<()> {
		match self {
			Self::Continue => Ok(()),
			Self::Cancelled => Err(TransitionError::Cancelled),
			Self::Redirected(target) => Err(TransitionError::Redirected(target)),
		}
	}
}

/// Serializable snapshot of a route state, attached to rendered elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteState {
	/// Full path.
	pub path: String,
	/// Segment names, root first.
	pub routes: Vec<String>,
	/// Route params.
	pub params: Params,
	/// Query values.
	pub query: Query,
}

impl RouteState {
	/// Builds the snapshot of a transition's target state.
	pub fn from_transition(transition: &Transition) -> Self {
		Self {
			path: transition.path().to_string(),
			routes: transition
				.routes()
				.iter()
				.map(|segment| segment.name().to_string())
				.collect(),
			params: transition.params().clone(),
			query: transition.query().clone(),
		}
	}
}

/// A request to move from one route state to another.
///
/// Everything except the cancellation state and the instance lists filled in
/// by the orchestrator is immutable.
pub struct Transition {
	routes: Vec<SegmentDescriptor>,
	prev_routes: Vec<SegmentDescriptor>,
	params: Params,
	query: Query,
	path: String,
	outcome: Mutex<StepOutcome>,
	instances: RwLock<Vec<Arc<RouteInstance>>>,
	activating: RwLock<Vec<Arc<RouteInstance>>>,
}

impl Transition {
	/// Creates a transition from `prev_routes` to `routes`.
	pub fn new(routes: Vec<SegmentDescriptor>, prev_routes: Vec<SegmentDescriptor>) -> Self {
		Self {
			routes,
			prev_routes,
			params: Params::new(),
			query: Query::new(),
			path: String::new(),
			outcome: Mutex::new(StepOutcome::Continue),
			instances: RwLock::new(Vec::new()),
			activating: RwLock::new(Vec::new()),
		}
	}

	/// Sets the transition params.
	pub fn with_params(mut self, params: Params) -> Self {
		self.params = params;
		self
	}

	/// Sets the query values.
	pub fn with_query(mut self, query: Query) -> Self {
		self.query = query;
		self
	}

	/// Sets the target path.
	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	/// Segments of the target state, root first.
	pub fn routes(&self) -> &[SegmentDescriptor] {
		&self.routes
	}

	/// Segments of the state being left, root first.
	pub fn prev_routes(&self) -> &[SegmentDescriptor] {
		&self.prev_routes
	}

	/// Returns the params.
	pub fn params(&self) -> &Params {
		&self.params
	}

	/// Returns the query values.
	pub fn query(&self) -> &Query {
		&self.query
	}

	/// Returns the target path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Cancels the transition. Has no effect once it was cancelled or
	/// redirected.
	pub fn cancel(&self) {
		let mut outcome = self.outcome.lock();
		if outcome.is_continue() {
			*outcome = StepOutcome::Cancelled;
		}
	}

	/// Cancels the transition in favor of `target`.
	pub fn redirect_to(&self, target: RedirectTarget) {
		let mut outcome = self.outcome.lock();
		if outcome.is_continue() {
			*outcome = StepOutcome::Redirected(target);
		}
	}

	/// Returns true once cancelled or redirected.
	pub fn is_cancelled(&self) -> bool {
		!self.outcome.lock().is_continue()
	}

	/// Returns the current cancellation state.
	pub fn outcome(&self) -> StepOutcome {
		self.outcome.lock().clone()
	}

	/// Returns the instances built for the target state, root first.
	pub fn instances(&self) -> Vec<Arc<RouteInstance>> {
		self.instances.read().clone()
	}

	/// Returns true when the route named `name` is being activated.
	pub fn is_activating(&self, name: &str) -> bool {
		self.activating
			.read()
			.iter()
			.any(|instance| instance.name() == name)
	}

	/// Returns true when the route named `name` is the transition leaf.
	pub fn is_target(&self, name: &str) -> bool {
		self.instances
			.read()
			.last()
			.is_some_and(|instance| instance.name() == name)
	}

	pub(crate) fn set_instances(&self, instances: Vec<Arc<RouteInstance>>) {
		*self.instances.write() = instances;
	}

	pub(crate) fn set_activating(&self, activating: Vec<Arc<RouteInstance>>) {
		*self.activating.write() = activating;
	}
}

impl fmt::Debug for Transition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Transition")
			.field(
				"routes",
				&self.routes.iter().map(|s| s.name()).collect::<Vec<_>>(),
			)
			.field(
				"prev_routes",
				&self.prev_routes.iter().map(|s| s.name()).collect::<Vec<_>>(),
			)
			.field("params", &self.params)
			.field("query", &self.query)
			.field("path", &self.path)
			.field("outcome", &*self.outcome.lock())
			.finish()
	}
}
