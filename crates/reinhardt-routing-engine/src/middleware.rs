//! Transition middleware.
//!
//! A transition passes through every registered middleware's `resolve` stage
//! in order. Once all stages succeeded the router calls `done` on each of
//! them; a cancelled transition gets `cancel`, a failed one `error`.
//! [`RouteMiddleware`] is the built-in stage that runs the route lifecycle
//! and renders the result.

use crate::error::{RouteError, TransitionError, TransitionResult};
use crate::events::RouterEvent;
use crate::render::{attach_route_state, render};
use crate::router::Router;
use crate::sequencer::run_lifecycle;
use crate::transition::Transition;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Where a middleware is inserted relative to the route middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MiddlewarePosition {
	/// Runs before the route lifecycle.
	Before,
	/// Runs after the route lifecycle and rendering.
	#[default]
	After,
}

/// A stage of the transition pipeline.
#[async_trait]
pub trait TransitionMiddleware: Send + Sync {
	/// Returns the middleware name, used in logs.
	fn name(&self) -> &str;

	/// Processes the transition. Returning an error stops the pipeline.
	async fn resolve(&self, router: &Router, transition: &Arc<Transition>) -> TransitionResult<()>;

	/// Called after every stage resolved.
	async fn done(&self, _router: &Router, _transition: &Arc<Transition>) {}

	/// Called when the transition was cancelled or redirected.
	async fn cancel(&self, _router: &Router, _transition: &Arc<Transition>, _error: &TransitionError) {}

	/// Called when the transition failed.
	async fn error(&self, _router: &Router, _transition: &Arc<Transition>, _error: &TransitionError) {}
}

/// The built-in stage running the route lifecycle.
#[derive(Debug, Default)]
pub struct RouteMiddleware;

impl RouteMiddleware {
	/// Creates the route middleware.
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl TransitionMiddleware for RouteMiddleware {
	fn name(&self) -> &str {
		"route"
	}

	async fn resolve(&self, router: &Router, transition: &Arc<Transition>) -> TransitionResult<()> {
		router
			.events()
			.emit(RouterEvent::BeforeTransition { transition });
		transition.outcome().into_result()?;

		let report = run_lifecycle(router, transition).await?;
		transition.outcome().into_result()?;

		if router.config().render {
			render(router, transition, &report).await?;
		}
		Ok(())
	}

	async fn done(&self, router: &Router, transition: &Arc<Transition>) {
		for route in transition.instances() {
			if let Some(el) = route.el() {
				attach_route_state(&el, transition);
			}
		}
		router.events().emit(RouterEvent::Transition { transition });
	}

	async fn cancel(&self, router: &Router, transition: &Arc<Transition>, error: &TransitionError) {
		if !error.is_redirect() {
			router
				.events()
				.emit(RouterEvent::TransitionAbort { transition, error });
		}
	}

	async fn error(&self, router: &Router, transition: &Arc<Transition>, error: &TransitionError) {
		let events = router.events();
		events.emit(RouterEvent::TransitionAbort { transition, error });
		events.emit(RouterEvent::TransitionError { transition, error });
	}
}

type GuardFn = Arc<dyn Fn(&Router, &Transition) -> Result<(), RouteError> + Send + Sync>;

/// A middleware made of a synchronous function.
///
/// The function may inspect the transition, cancel or redirect it, or fail
/// it by returning an error.
#[derive(Clone)]
pub struct FnMiddleware {
	name: String,
	guard: GuardFn,
}

impl FnMiddleware {
	/// Creates a middleware from `guard`.
	pub fn new<F>(name: impl Into<String>, guard: F) -> Self
	where
		F: Fn(&Router, &Transition) -> Result<(), RouteError> + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			guard: Arc::new(guard),
		}
	}
}

impl fmt::Debug for FnMiddleware {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FnMiddleware")
			.field("name", &self.name)
			.finish()
	}
}

#[async_trait]
impl TransitionMiddleware for FnMiddleware {
	fn name(&self) -> &str {
		&self.name
	}

	async fn resolve(&self, router: &Router, transition: &Arc<Transition>) -> TransitionResult<()> {
		(self.guard)(router, transition.as_ref()).map_err(TransitionError::Middleware)
	}
}
