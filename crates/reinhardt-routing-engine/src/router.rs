//! The router context.
//!
//! A [`Router`] owns everything a transition needs: the route table, the
//! instance cache, the event registry, the root outlet, the middleware
//! pipeline and the committed state. It is a cheap handle; clones share the
//! same context.

use crate::cache::InstanceCache;
use crate::config::RouterConfig;
use crate::error::{TransitionError, TransitionResult};
use crate::events::{ListenerId, RouterEvent, RouterEventKind, RouterEvents};
use crate::middleware::{MiddlewarePosition, RouteMiddleware, TransitionMiddleware};
use crate::route::RouteInstance;
use crate::segment::{Params, Query, SegmentDescriptor};
use crate::table::RouteTable;
use crate::transition::{RedirectTarget, Transition};
use parking_lot::RwLock;
use reinhardt_routing_dom::memory::MemoryDocument;
use reinhardt_routing_dom::{Document, MountTarget, Region};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// The committed state of the router.
#[derive(Debug, Clone, Default)]
pub struct RouterState {
	/// Segments of the active route, root first.
	pub routes: Vec<SegmentDescriptor>,
	/// Active params.
	pub params: Params,
	/// Active query values.
	pub query: Query,
	/// Active path.
	pub path: String,
	/// Instances of the active route, root first.
	pub instances: Vec<Arc<RouteInstance>>,
}

impl RouterState {
	/// Returns the name of the active leaf route.
	pub fn leaf(&self) -> Option<&str> {
		self.routes.last().map(|segment| segment.name())
	}
}

struct RouterInner {
	config: RouterConfig,
	table: RouteTable,
	cache: InstanceCache,
	events: RouterEvents,
	document: Arc<dyn Document>,
	root_outlet: RwLock<Option<Region>>,
	state: RwLock<RouterState>,
	middleware: RwLock<Vec<Arc<dyn TransitionMiddleware>>>,
	route_middleware: Arc<dyn TransitionMiddleware>,
	destroyed: AtomicBool,
}

/// Handle to a router context.
#[derive(Clone)]
pub struct Router {
	inner: Arc<RouterInner>,
}

/// Non-owning handle to a router context.
#[derive(Clone, Default)]
pub struct WeakRouter {
	inner: Weak<RouterInner>,
}

impl WeakRouter {
	/// Returns the router while it is alive.
	pub fn upgrade(&self) -> Option<Router> {
		self.inner.upgrade().map(|inner| Router { inner })
	}
}

impl fmt::Debug for WeakRouter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("WeakRouter")
			.field("alive", &(self.inner.strong_count() > 0))
			.finish()
	}
}

impl Router {
	/// Creates a router builder.
	pub fn builder() -> RouterBuilder {
		RouterBuilder::default()
	}

	/// Returns a non-owning handle.
	pub fn downgrade(&self) -> WeakRouter {
		WeakRouter {
			inner: Arc::downgrade(&self.inner),
		}
	}

	/// Returns the configuration.
	pub fn config(&self) -> &RouterConfig {
		&self.inner.config
	}

	/// Returns the route table.
	pub fn table(&self) -> &RouteTable {
		&self.inner.table
	}

	/// Returns the instance cache.
	pub fn cache(&self) -> &InstanceCache {
		&self.inner.cache
	}

	/// Returns the event registry.
	pub fn events(&self) -> &RouterEvents {
		&self.inner.events
	}

	/// Returns the document used to create elements.
	pub fn document(&self) -> &dyn Document {
		self.inner.document.as_ref()
	}

	/// Returns the root outlet.
	pub fn root_outlet(&self) -> Option<Region> {
		self.inner.root_outlet.read().clone()
	}

	/// Replaces the root outlet.
	pub fn set_root_outlet(&self, region: Option<Region>) {
		*self.inner.root_outlet.write() = region;
	}

	/// Returns a snapshot of the committed state.
	pub fn state(&self) -> RouterState {
		self.inner.state.read().clone()
	}

	/// Returns true when `name` is part of the active route.
	pub fn is_active(&self, name: &str) -> bool {
		self.inner
			.state
			.read()
			.routes
			.iter()
			.any(|segment| segment.name() == name)
	}

	/// Registers a listener for `kind`.
	pub fn on<F>(&self, kind: RouterEventKind, listener: F) -> ListenerId
	where
		F: Fn(&RouterEvent<'_>) + Send + Sync + 'static,
	{
		self.inner.events.on(kind, listener)
	}

	/// Removes a listener.
	pub fn off(&self, id: ListenerId) -> bool {
		self.inner.events.off(id)
	}

	/// Adds a middleware to the pipeline.
	///
	/// [`MiddlewarePosition::Before`] inserts it right ahead of the route
	/// middleware, [`MiddlewarePosition::After`] appends it.
	pub fn use_middleware(
		&self,
		middleware: impl TransitionMiddleware + 'static,
		position: MiddlewarePosition,
	) -> &Self {
		let middleware: Arc<dyn TransitionMiddleware> = Arc::new(middleware);
		let mut pipeline = self.inner.middleware.write();
		match position {
			MiddlewarePosition::After => pipeline.push(middleware),
			MiddlewarePosition::Before => {
				let index = pipeline
					.iter()
					.position(|m| Arc::ptr_eq(m, &self.inner.route_middleware))
					.unwrap_or(0);
				pipeline.insert(index, middleware);
			}
		}
		self
	}

	/// Returns the names of the middleware in pipeline order.
	pub fn middleware_names(&self) -> Vec<String> {
		self.inner
			.middleware
			.read()
			.iter()
			.map(|m| m.name().to_string())
			.collect()
	}

	/// Transitions to the route `name`, following redirects.
	///
	/// Returns the outcome of the last transition of the redirect chain.
	pub async fn transition_to(
		&self,
		name: impl Into<String>,
		params: Params,
		query: Query,
	) -> TransitionResult<()> {
		let limit = self.inner.config.max_redirects;
		let mut target = RedirectTarget::new(name)
			.with_params(params)
			.with_query(query);

		for _ in 0..=limit {
			let transition = self.build_transition(&target)?;
			match self.run_transition(Arc::new(transition)).await {
				Err(TransitionError::Redirected(next)) => {
					tracing::debug!(from = %target.name, to = %next.name, "following redirect");
					target = next;
				}
				result => return result,
			}
		}
		tracing::warn!(limit, route = %target.name, "redirect limit exceeded");
		Err(TransitionError::RedirectLimit { limit })
	}

	/// Builds a transition from the committed state to `target`.
	pub fn build_transition(&self, target: &RedirectTarget) -> TransitionResult<Transition> {
		self.ensure_alive()?;
		let table = &self.inner.table;
		let routes = table.segments(&target.name, &target.params)?;
		let path = table.path_for(&target.name, &target.params)?;
		let prev_routes = self.inner.state.read().routes.clone();
		Ok(Transition::new(routes, prev_routes)
			.with_params(target.params.clone())
			.with_query(target.query.clone())
			.with_path(path))
	}

	/// Runs `transition` through the middleware pipeline.
	///
	/// On success the state is committed and every middleware's `done` stage
	/// runs. A cancelled or redirected transition runs the `cancel` stages and
	/// a failed one the `error` stages; the state is left untouched.
	pub async fn run_transition(&self, transition: Arc<Transition>) -> TransitionResult<()> {
		self.ensure_alive()?;
		let pipeline = self.inner.middleware.read().clone();
		let leaf = transition
			.routes()
			.last()
			.map(|segment| segment.name().to_string())
			.unwrap_or_default();

		let result = self.resolve_stages(&pipeline, &transition).await;
		match &result {
			Ok(()) => {
				self.commit(&transition);
				for middleware in &pipeline {
					middleware.done(self, &transition).await;
				}
				tracing::info!(route = %leaf, path = transition.path(), "transition completed");
			}
			Err(err) if err.is_cancellation() => {
				tracing::warn!(route = %leaf, reason = %err, "transition aborted");
				for middleware in &pipeline {
					middleware.cancel(self, &transition, err).await;
				}
			}
			Err(err) => {
				tracing::error!(route = %leaf, error = %err, "transition failed");
				for middleware in &pipeline {
					middleware.error(self, &transition, err).await;
				}
			}
		}
		result
	}

	async fn resolve_stages(
		&self,
		pipeline: &[Arc<dyn TransitionMiddleware>],
		transition: &Arc<Transition>,
	) -> TransitionResult<()> {
		for middleware in pipeline {
			tracing::debug!(middleware = middleware.name(), "resolving middleware");
			middleware.resolve(self, transition).await?;
			transition.outcome().into_result()?;
		}
		Ok(())
	}

	fn commit(&self, transition: &Transition) {
		let mut state = self.inner.state.write();
		state.routes = transition.routes().to_vec();
		state.params = transition.params().clone();
		state.query = transition.query().clone();
		state.path = transition.path().to_string();
		state.instances = transition.instances();
	}

	fn ensure_alive(&self) -> TransitionResult<()> {
		if self.inner.destroyed.load(Ordering::Acquire) {
			return Err(TransitionError::Destroyed);
		}
		Ok(())
	}

	/// Returns true once [`Router::destroy`] was called.
	pub fn is_destroyed(&self) -> bool {
		self.inner.destroyed.load(Ordering::Acquire)
	}

	/// Tears the router down.
	///
	/// Drops every cached instance, removes every listener and resets the
	/// state. Later transitions fail with [`TransitionError::Destroyed`].
	pub fn destroy(&self) {
		self.inner.destroyed.store(true, Ordering::Release);
		self.inner.cache.clear();
		self.inner.events.off_all();
		*self.inner.state.write() = RouterState::default();
		tracing::debug!("router destroyed");
	}
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("config", &self.inner.config)
			.field("routes", &self.inner.table.len())
			.field("cached", &self.inner.cache.len())
			.field("listeners", &self.inner.events.listener_count())
			.field("middleware", &self.middleware_names())
			.field("destroyed", &self.is_destroyed())
			.finish()
	}
}

/// Builder for [`Router`].
#[derive(Default)]
pub struct RouterBuilder {
	config: RouterConfig,
	table: RouteTable,
	root_outlet: Option<Region>,
	document: Option<Arc<dyn Document>>,
	before: Vec<Arc<dyn TransitionMiddleware>>,
	after: Vec<Arc<dyn TransitionMiddleware>>,
}

impl RouterBuilder {
	/// Sets the configuration.
	pub fn config(mut self, config: RouterConfig) -> Self {
		self.config = config;
		self
	}

	/// Sets the route table.
	pub fn table(mut self, table: RouteTable) -> Self {
		self.table = table;
		self
	}

	/// Sets the root outlet region.
	pub fn root_outlet(mut self, region: Region) -> Self {
		self.root_outlet = Some(region);
		self
	}

	/// Sets the root outlet from a mount target.
	pub fn root_target(self, target: Arc<dyn MountTarget>) -> Self {
		self.root_outlet(Region::new(target))
	}

	/// Sets the document used to create elements from tag names.
	///
	/// Defaults to an empty in-memory document.
	pub fn document(mut self, document: Arc<dyn Document>) -> Self {
		self.document = Some(document);
		self
	}

	/// Adds a middleware.
	pub fn middleware(
		mut self,
		middleware: impl TransitionMiddleware + 'static,
		position: MiddlewarePosition,
	) -> Self {
		let middleware: Arc<dyn TransitionMiddleware> = Arc::new(middleware);
		match position {
			MiddlewarePosition::Before => self.before.push(middleware),
			MiddlewarePosition::After => self.after.push(middleware),
		}
		self
	}

	/// Builds the router.
	pub fn build(self) -> Router {
		let route_middleware: Arc<dyn TransitionMiddleware> = Arc::new(RouteMiddleware::new());
		let mut pipeline = self.before;
		pipeline.push(route_middleware.clone());
		pipeline.extend(self.after);

		let document = self
			.document
			.unwrap_or_else(|| Arc::new(MemoryDocument::new()) as Arc<dyn Document>);

		Router {
			inner: Arc::new(RouterInner {
				config: self.config,
				table: self.table,
				cache: InstanceCache::new(),
				events: RouterEvents::new(),
				document,
				root_outlet: RwLock::new(self.root_outlet),
				state: RwLock::new(RouterState::default()),
				middleware: RwLock::new(pipeline),
				route_middleware,
				destroyed: AtomicBool::new(false),
			}),
		}
	}
}

impl fmt::Debug for RouterBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouterBuilder")
			.field("config", &self.config)
			.field("routes", &self.table.len())
			.field("has_root_outlet", &self.root_outlet.is_some())
			.finish()
	}
}
