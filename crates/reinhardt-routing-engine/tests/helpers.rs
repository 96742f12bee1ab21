//! Test helpers for routing integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use reinhardt_routing_dom::memory::{MemoryDocument, MemoryElement, MemoryTarget};
use reinhardt_routing_dom::{Document, ElementHandle};
use reinhardt_routing_engine::prelude::*;
use reinhardt_routing_engine::{PropertyBinding, RouterConfig, RouterEvents};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Shared log of lifecycle calls, in call order.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&self, entry: impl Into<String>) {
		self.0.lock().push(entry.into());
	}

	pub fn entries(&self) -> Vec<String> {
		self.0.lock().clone()
	}

	/// Returns and clears the recorded entries.
	pub fn take(&self) -> Vec<String> {
		std::mem::take(&mut *self.0.lock())
	}

	/// Entries starting with `prefix`, e.g. `"activate:"`.
	pub fn with_prefix(&self, prefix: &str) -> Vec<String> {
		self.0
			.lock()
			.iter()
			.filter(|e| e.starts_with(prefix))
			.cloned()
			.collect()
	}
}

/// What a hook does when called.
#[derive(Debug, Clone, Default)]
pub enum HookPlan {
	#[default]
	Continue,
	ReturnFalse,
	CallCancel,
	Fail(&'static str),
	Redirect(&'static str),
	Delay(u64),
}

/// Behaviour of a [`RecordingRoute`].
#[derive(Clone, Default)]
pub struct Plan {
	pub activate: HookPlan,
	pub deactivate: HookPlan,
	pub load: Option<Result<(), &'static str>>,
	pub component: Option<ComponentDef>,
	pub child_routes: Option<ChildRoutes>,
	pub outlet_selector: Option<String>,
	pub context: Vec<(&'static str, Value)>,
	pub bindings: Vec<PropertyBinding>,
	pub update_el: bool,
}

/// A controller that records every hook call.
pub struct RecordingRoute {
	name: String,
	recorder: Recorder,
	plan: Plan,
}

impl RecordingRoute {
	async fn run(&self, phase: &str, plan: &HookPlan, transition: &Transition) -> HookResult {
		self.recorder.push(format!("{phase}:{}", self.name));
		match plan {
			HookPlan::Continue => Ok(HookOutcome::Continue),
			HookPlan::ReturnFalse => Ok(false.into()),
			HookPlan::CallCancel => {
				transition.cancel();
				Ok(HookOutcome::Continue)
			}
			HookPlan::Fail(message) => Err((*message).into()),
			HookPlan::Redirect(target) => {
				transition.redirect_to(RedirectTarget::new(*target));
				Ok(HookOutcome::Continue)
			}
			HookPlan::Delay(ms) => {
				tokio::time::sleep(Duration::from_millis(*ms)).await;
				self.recorder.push(format!("{phase}-done:{}", self.name));
				Ok(HookOutcome::Continue)
			}
		}
	}
}

#[async_trait]
impl RouteController for RecordingRoute {
	async fn activate(&self, _route: &RouteInstance, transition: &Transition) -> HookResult {
		self.run("activate", &self.plan.activate, transition).await
	}

	async fn deactivate(&self, _route: &RouteInstance, transition: &Transition) -> HookResult {
		self.run("deactivate", &self.plan.deactivate, transition).await
	}

	async fn load(&self, _route: &RouteInstance, _transition: &Transition) -> Result<(), RouteError> {
		let Some(result) = self.plan.load else {
			return Ok(());
		};
		self.recorder.push(format!("load:{}", self.name));
		result.map_err(Into::into)
	}

	fn component(&self) -> Option<ComponentDef> {
		self.plan.component.clone()
	}

	fn child_routes(&self) -> Option<&ChildRoutes> {
		self.plan.child_routes.as_ref()
	}

	fn outlet_selector(&self) -> Option<&str> {
		self.plan.outlet_selector.as_deref()
	}

	fn provide_context(&self, key: &str) -> Option<Value> {
		self.plan
			.context
			.iter()
			.find(|(k, _)| *k == key)
			.map(|(_, v)| v.clone())
	}

	fn property_bindings(&self) -> &[PropertyBinding] {
		&self.plan.bindings
	}

	fn update_el(&self, _route: &RouteInstance, _el: &ElementHandle, _transition: &Transition) -> bool {
		self.recorder.push(format!("update_el:{}", self.name));
		self.plan.update_el
	}

	fn prepare_el(&self, _route: &RouteInstance, el: &ElementHandle, _transition: &Transition) {
		self.recorder.push(format!("prepare_el:{}", self.name));
		el.set_property("preparedBy", Value::String(self.name.clone()));
	}
}

/// A class creating [`RecordingRoute`]s that log `init:<name>` on
/// construction.
pub fn recording_class(recorder: &Recorder, plan: Plan) -> RouteClass {
	let recorder = recorder.clone();
	RouteClass::new("RecordingRoute", move |init: ClassInit<'_>| {
		recorder.push(format!("init:{}", init.segment.name()));
		RecordingRoute {
			name: init.segment.name().to_string(),
			recorder: recorder.clone(),
			plan: plan.clone(),
		}
	})
}

/// Route options using a recording class with the default plan.
pub fn recorded(recorder: &Recorder) -> RouteOptions {
	RouteOptions::new().class(recording_class(recorder, Plan::default()))
}

/// Route options using a recording class with `plan`.
pub fn planned(recorder: &Recorder, plan: Plan) -> RouteOptions {
	RouteOptions::new().class(recording_class(recorder, plan))
}

/// A document defining the views used by the render tests.
pub fn document() -> Arc<MemoryDocument> {
	let document = Arc::new(MemoryDocument::new());
	document.define("parent-view", || {
		MemoryElement::new("parent-view").with_outlet("router-outlet")
	});
	document.define("classy-view", || MemoryElement::new("classy-view").with_outlet(".child-el"));
	document.define("child-view", || {
		MemoryElement::new("child-view")
			.with_text("Child")
			.with_outlet("router-outlet")
	});
	document.define("grandchild-view", || {
		MemoryElement::new("grandchild-view").with_text("Grandchild")
	});
	document.define("leaf-view", || MemoryElement::new("leaf-view").with_text("Leaf"));
	document
}

/// A rendered router over `table` with a `#main` root outlet.
pub struct Harness {
	pub router: Router,
	pub root: Arc<MemoryTarget>,
	pub document: Arc<MemoryDocument>,
}

impl Harness {
	pub fn new(table: RouteTable) -> Self {
		Self::with_config(table, RouterConfig::default())
	}

	pub fn with_config(table: RouteTable, config: RouterConfig) -> Self {
		let document = document();
		let root = MemoryTarget::new("#main");
		let router = Router::builder()
			.table(table)
			.config(config)
			.document(document.clone())
			.root_target(root.clone())
			.build();
		Self {
			router,
			root,
			document,
		}
	}

	pub async fn go(&self, name: &str) -> TransitionResult<()> {
		self.router
			.transition_to(name, Params::new(), Query::new())
			.await
	}

	pub async fn go_with(&self, name: &str, params: &[(&str, Value)]) -> TransitionResult<()> {
		self.router
			.transition_to(name, params_of(params), Query::new())
			.await
	}

	pub fn html(&self) -> String {
		self.root.inner_html()
	}

	pub fn events(&self) -> &RouterEvents {
		self.router.events()
	}

	pub fn instance(&self, name: &str) -> Arc<RouteInstance> {
		self.router
			.cache()
			.get(name)
			.unwrap_or_else(|| panic!("route {name} is not cached"))
	}
}

pub fn params_of(values: &[(&str, Value)]) -> Params {
	values
		.iter()
		.map(|(k, v)| (k.to_string(), v.clone()))
		.collect()
}

/// Records every event as `<event>` or `<event>:<route>`.
pub fn record_events(events: &RouterEvents, recorder: &Recorder) {
	let recorder = recorder.clone();
	events.on_any(move |event| match event.route() {
		Some(route) => recorder.push(format!("{}:{}", event.kind(), route.name())),
		None => recorder.push(event.kind().to_string()),
	});
}

/// Creates an element through `document`, for pre-rendered components.
pub fn element(document: &MemoryDocument, tag: &str) -> ElementHandle {
	document
		.create_element(tag)
		.unwrap_or_else(|| panic!("cannot create {tag}"))
}
