//! Transition lifecycle orchestration for nested client-side routes.
//!
//! Given a target route, the engine works out which segments of the active
//! route tree are torn down and which are created or reused, runs the
//! asynchronous lifecycle hooks of the route controllers in order, and
//! renders the resulting elements into nested outlets.
//!
//! ## Lifecycle
//!
//! A transition from `prev_routes` to `routes` goes through:
//!
//! 1. **Deactivate** the previous segments from the changing index on,
//!    leaf to root.
//! 2. **Build** the target instances root to leaf, reusing cached ones and
//!    resolving controller classes for new ones.
//! 3. **Activate** the target segments from the changing index on, root to
//!    leaf.
//! 4. **Load** data for every route instance, in tree order. Failures are
//!    logged and ignored.
//! 5. **Render** the activated routes (or at least the leaf), each into the
//!    outlet of its nearest rendered ancestor or into the root outlet.
//!
//! Any hook may cancel or redirect the transition; cancellation is checked
//! between steps and never interrupts a running hook.
//!
//! ## Example
//!
//! ```
//! use reinhardt_routing_dom::memory::{MemoryDocument, MemoryElement, MemoryTarget};
//! use reinhardt_routing_engine::prelude::*;
//! use std::sync::Arc;
//!
//! # block_on(async {
//! let document = Arc::new(MemoryDocument::new());
//! document.define("app-shell", || MemoryElement::new("app-shell").with_outlet("router-outlet"));
//! document.define("post-list", || MemoryElement::new("post-list"));
//!
//! let table = RouteTable::builder()
//! 	.route("app", RouteOptions::new().path("/").component("app-shell"))
//! 	.child("app", "posts", RouteOptions::new().component("post-list"))
//! 	.build()
//! 	.unwrap();
//!
//! let root = MemoryTarget::new("main");
//! let router = Router::builder()
//! 	.table(table)
//! 	.document(document)
//! 	.root_target(root.clone())
//! 	.build();
//!
//! router.transition_to("posts", Params::new(), Query::new()).await.unwrap();
//!
//! assert_eq!(
//! 	root.inner_html(),
//! 	"<app-shell><router-outlet><post-list></post-list></router-outlet></app-shell>"
//! );
//! # });
//! # fn block_on<F: std::future::Future>(f: F) -> F::Output {
//! # 	futures::executor::block_on(f)
//! # }
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod component;
pub mod config;
pub mod error;
pub mod events;
pub mod middleware;
pub mod render;
pub mod resolver;
pub mod route;
pub mod router;
pub mod segment;
pub mod sequencer;
pub mod table;
pub mod transition;
pub mod tree;

pub use cache::InstanceCache;
pub use component::ComponentDef;
pub use config::{ConfigError, RouterConfig};
pub use error::{LifecyclePhase, RouteError, TransitionError, TransitionResult};
pub use events::{ListenerId, RouterEvent, RouterEventKind, RouterEvents};
pub use middleware::{FnMiddleware, MiddlewarePosition, RouteMiddleware, TransitionMiddleware};
pub use route::{
	ChildRoutes, ClassInit, ClassModule, ClassSource, DefaultRoute, HookOutcome, HookResult,
	PropertyBinding, PropertyFormat, PropertySource, RouteClass, RouteController, RouteInstance,
};
pub use router::{Router, RouterBuilder, RouterState, WeakRouter};
pub use segment::{Params, Query, RouteOptions, SegmentDescriptor};
pub use table::{RouteTable, RouteTableBuilder, RouteTableError};
pub use transition::{RedirectTarget, RouteState, StepOutcome, Transition};
pub use tree::RouteTree;

// Re-export async_trait for implementing controllers and middleware
pub use async_trait::async_trait;

/// Re-export commonly used types.
pub mod prelude {
	pub use async_trait::async_trait;
	pub use crate::component::ComponentDef;
	pub use crate::config::RouterConfig;
	pub use crate::error::{RouteError, TransitionError, TransitionResult};
	pub use crate::events::{RouterEvent, RouterEventKind};
	pub use crate::middleware::{FnMiddleware, MiddlewarePosition, TransitionMiddleware};
	pub use crate::route::{
		ChildRoutes, ClassInit, ClassSource, HookOutcome, HookResult, PropertyBinding, RouteClass,
		RouteController, RouteInstance,
	};
	pub use crate::router::Router;
	pub use crate::segment::{Params, Query, RouteOptions};
	pub use crate::table::RouteTable;
	pub use crate::transition::{RedirectTarget, Transition};
}
