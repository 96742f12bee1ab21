//! # Reinhardt Routing
//!
//! Nested client-side routing with a transition lifecycle.
//!
//! A route is a chain of named segments (`app > posts > post`). Moving from
//! one route to another tears down the segments that changed, leaf to root,
//! then builds and activates the new ones root to leaf. Each segment is
//! backed by a [`RouteController`] whose asynchronous hooks may cancel or
//! redirect the transition. Once every hook succeeded, the route elements are
//! rendered into nested outlets: each element is shown inside the outlet of
//! its nearest rendered ancestor.
//!
//! ## Crates
//!
//! - [`dom`] - rendering contracts (`Element`, `MountTarget`, `Document`,
//!   `Region`) and a headless in-memory implementation
//! - `reinhardt-routing-engine` - route table, controllers, the lifecycle
//!   sequencer, rendering, events and middleware, re-exported at the root of
//!   this crate
//!
//! ## Quick Example
//!
//! ```
//! use reinhardt_routing::dom::memory::{MemoryDocument, MemoryElement, MemoryTarget};
//! use reinhardt_routing::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! struct PostRoute;
//!
//! #[async_trait]
//! impl RouteController for PostRoute {
//! 	async fn activate(&self, _route: &RouteInstance, transition: &Transition) -> HookResult {
//! 		// Only numeric ids are accepted.
//! 		let valid = transition.params().get("id").is_some_and(|id| id.is_u64());
//! 		Ok(valid.into())
//! 	}
//!
//! 	fn component(&self) -> Option<ComponentDef> {
//! 		Some(ComponentDef::tag("post-view"))
//! 	}
//! }
//!
//! # futures::executor::block_on(async {
//! let document = Arc::new(MemoryDocument::new());
//! document.define("app-shell", || MemoryElement::new("app-shell").with_outlet("router-outlet"));
//!
//! let table = RouteTable::builder()
//! 	.route("app", RouteOptions::new().path("/").component("app-shell"))
//! 	.child(
//! 		"app",
//! 		"post",
//! 		RouteOptions::new()
//! 			.path("posts/:id")
//! 			.class(RouteClass::new("PostRoute", |_| PostRoute)),
//! 	)
//! 	.build()
//! 	.unwrap();
//!
//! let root = MemoryTarget::new("#app");
//! let router = Router::builder()
//! 	.table(table)
//! 	.document(document)
//! 	.root_target(root.clone())
//! 	.build();
//!
//! let params: Params = [("id".to_string(), json!(7))].into();
//! router.transition_to("post", params, Query::new()).await.unwrap();
//! assert_eq!(router.state().path, "/posts/7");
//! assert_eq!(
//! 	root.inner_html(),
//! 	"<app-shell><router-outlet><post-view></post-view></router-outlet></app-shell>"
//! );
//!
//! let params: Params = [("id".to_string(), json!("draft"))].into();
//! let err = router.transition_to("post", params, Query::new()).await.unwrap_err();
//! assert!(err.is_cancellation());
//! assert_eq!(router.state().path, "/posts/7");
//! # });
//! ```
//!
//! ## Configuration
//!
//! Router settings can be read from the `[router]` table of a TOML file, see
//! [`RouterConfig::from_file`].

pub mod dom;

// Re-export the engine
pub use reinhardt_routing_engine::{
	ChildRoutes, ClassInit, ClassModule, ClassSource, ComponentDef, ConfigError, DefaultRoute,
	FnMiddleware, HookOutcome, HookResult, InstanceCache, LifecyclePhase, ListenerId,
	MiddlewarePosition, Params, PropertyBinding, PropertyFormat, PropertySource, Query,
	RedirectTarget, RouteClass, RouteController, RouteError, RouteInstance, RouteMiddleware,
	RouteOptions, RouteState, RouteTable, RouteTableBuilder, RouteTableError, RouteTree, Router,
	RouterBuilder, RouterConfig, RouterEvent, RouterEventKind, RouterEvents, RouterState,
	SegmentDescriptor, StepOutcome, Transition, TransitionError, TransitionMiddleware,
	TransitionResult, WeakRouter,
};

// Engine modules for lower level access
pub use reinhardt_routing_engine::{render, resolver, sequencer, tree};

// Re-exported for implementing controllers and middleware
pub use reinhardt_routing_engine::async_trait;

/// Re-export commonly used types.
pub mod prelude {
	pub use crate::dom::{Document, Element, ElementHandle, MountTarget, Region};
	pub use reinhardt_routing_engine::prelude::*;
}
