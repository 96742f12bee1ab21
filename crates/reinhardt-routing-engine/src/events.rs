//! Router lifecycle events.
//!
//! [`RouterEvents`] is an observer registry owned by the router. Listeners
//! are plain closures invoked synchronously in registration order; a
//! listener may cancel the transition it is notified about.

use crate::error::TransitionError;
use crate::route::RouteInstance;
use crate::transition::Transition;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Kind of router event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouterEventKind {
	/// `before:transition`
	BeforeTransition,
	/// `transition`
	Transition,
	/// `transition:abort`
	TransitionAbort,
	/// `transition:error`
	TransitionError,
	/// `before:activate`
	BeforeActivate,
	/// `activate`
	Activate,
	/// `before:deactivate`
	BeforeDeactivate,
	/// `deactivate`
	Deactivate,
	/// `render`
	Render,
}

impl RouterEventKind {
	/// Returns the event name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::BeforeTransition => "before:transition",
			Self::Transition => "transition",
			Self::TransitionAbort => "transition:abort",
			Self::TransitionError => "transition:error",
			Self::BeforeActivate => "before:activate",
			Self::Activate => "activate",
			Self::BeforeDeactivate => "before:deactivate",
			Self::Deactivate => "deactivate",
			Self::Render => "render",
		}
	}
}

impl fmt::Display for RouterEventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An event emitted by the router.
#[derive(Debug, Clone, Copy)]
pub enum RouterEvent<'a> {
	/// A transition is about to start.
	BeforeTransition {
		/// The transition.
		transition: &'a Arc<Transition>,
	},
	/// A transition completed.
	Transition {
		/// The transition.
		transition: &'a Arc<Transition>,
	},
	/// A transition was cancelled or failed.
	TransitionAbort {
		/// The transition.
		transition: &'a Arc<Transition>,
		/// Why it stopped.
		error: &'a TransitionError,
	},
	/// A transition failed.
	TransitionError {
		/// The transition.
		transition: &'a Arc<Transition>,
		/// The failure.
		error: &'a TransitionError,
	},
	/// A route is about to be activated.
	BeforeActivate {
		/// The transition.
		transition: &'a Arc<Transition>,
		/// The route.
		route: &'a Arc<RouteInstance>,
	},
	/// A route was activated.
	Activate {
		/// The transition.
		transition: &'a Arc<Transition>,
		/// The route.
		route: &'a Arc<RouteInstance>,
	},
	/// A route is about to be deactivated.
	BeforeDeactivate {
		/// The transition.
		transition: &'a Arc<Transition>,
		/// The route.
		route: &'a Arc<RouteInstance>,
	},
	/// A route was deactivated.
	Deactivate {
		/// The transition.
		transition: &'a Arc<Transition>,
		/// The route.
		route: &'a Arc<RouteInstance>,
	},
	/// A route element was mounted.
	Render {
		/// The transition.
		transition: &'a Arc<Transition>,
		/// The route.
		route: &'a Arc<RouteInstance>,
	},
}

impl<'a> RouterEvent<'a> {
	/// Returns the event kind.
	pub fn kind(&self) -> RouterEventKind {
		match self {
			Self::BeforeTransition { .. } => RouterEventKind::BeforeTransition,
			Self::Transition { .. } => RouterEventKind::Transition,
			Self::TransitionAbort { .. } => RouterEventKind::TransitionAbort,
			Self::TransitionError { .. } => RouterEventKind::TransitionError,
			Self::BeforeActivate { .. } => RouterEventKind::BeforeActivate,
			Self::Activate { .. } => RouterEventKind::Activate,
			Self::BeforeDeactivate { .. } => RouterEventKind::BeforeDeactivate,
			Self::Deactivate { .. } => RouterEventKind::Deactivate,
			Self::Render { .. } => RouterEventKind::Render,
		}
	}

	/// Returns the transition the event is about.
	pub fn transition(&self) -> &'a Arc<Transition> {
		match *self {
			Self::BeforeTransition { transition }
			| Self::Transition { transition }
			| Self::TransitionAbort { transition, .. }
			| Self::TransitionError { transition, .. }
			| Self::BeforeActivate { transition, .. }
			| Self::Activate { transition, .. }
			| Self::BeforeDeactivate { transition, .. }
			| Self::Deactivate { transition, .. }
			| Self::Render { transition, .. } => transition,
		}
	}

	/// Returns the route involved, if any.
	pub fn route(&self) -> Option<&'a Arc<RouteInstance>> {
		match *self {
			Self::BeforeActivate { route, .. }
			| Self::Activate { route, .. }
			| Self::BeforeDeactivate { route, .. }
			| Self::Deactivate { route, .. }
			| Self::Render { route, .. } => Some(route),
			_ => None,
		}
	}

	/// Returns the error carried by abort and error events.
	pub fn error(&self) -> Option<&'a TransitionError> {
		match *self {
			Self::TransitionAbort { error, .. } | Self::TransitionError { error, .. } => Some(error),
			_ => None,
		}
	}
}

/// Identifier returned when registering a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&RouterEvent<'_>) + Send + Sync>;

struct ListenerEntry {
	id: ListenerId,
	kind: Option<RouterEventKind>,
	listener: Listener,
}

/// Observer registry for router events.
pub struct RouterEvents {
	listeners: RwLock<Vec<ListenerEntry>>,
	next_id: AtomicU64,
}

impl Default for RouterEvents {
	fn default() -> Self {
		Self::new()
	}
}

impl RouterEvents {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			listeners: RwLock::new(Vec::new()),
			next_id: AtomicU64::new(1),
		}
	}

	/// Registers a listener for one event kind.
	pub fn on<F>(&self, kind: RouterEventKind, listener: F) -> ListenerId
	where
		F: Fn(&RouterEvent<'_>) + Send + Sync + 'static,
	{
		self.register(Some(kind), Arc::new(listener))
	}

	/// Registers a listener for every event kind.
	pub fn on_any<F>(&self, listener: F) -> ListenerId
	where
		F: Fn(&RouterEvent<'_>) + Send + Sync + 'static,
	{
		self.register(None, Arc::new(listener))
	}

	fn register(&self, kind: Option<RouterEventKind>, listener: Listener) -> ListenerId {
		let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
		self.listeners.write().push(ListenerEntry { id, kind, listener });
		id
	}

	/// Removes a listener. Returns false when it was not registered.
	pub fn off(&self, id: ListenerId) -> bool {
		let mut listeners = self.listeners.write();
		let before = listeners.len();
		listeners.retain(|entry| entry.id != id);
		listeners.len() != before
	}

	/// Removes every listener.
	pub fn off_all(&self) {
		self.listeners.write().clear();
	}

	/// Returns the number of registered listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.read().len()
	}

	/// Notifies the listeners registered for the event kind.
	///
	/// Listeners are collected before being invoked so they may register or
	/// remove listeners themselves.
	pub fn emit(&self, event: RouterEvent<'_>) {
		let kind = event.kind();
		let listeners: Vec<Listener> = self
			.listeners
			.read()
			.iter()
			.filter(|entry| entry.kind.is_none_or(|k| k == kind))
			.map(|entry| entry.listener.clone())
			.collect();

		tracing::trace!(event = %kind, listeners = listeners.len(), "emitting router event");
		for listener in listeners {
			listener(&event);
		}
	}
}

impl fmt::Debug for RouterEvents {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouterEvents")
			.field("listener_count", &self.listener_count())
			.finish()
	}
}
