//! Error types for route transitions.

use crate::transition::RedirectTarget;
use std::fmt;
use thiserror::Error;

/// Error returned by user-defined route hooks and factories.
pub type RouteError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for transition operations.
pub type TransitionResult<T> = Result<T, TransitionError>;

/// Lifecycle phase a route hook belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
	/// Leaving a route.
	Deactivate,
	/// Entering a route.
	Activate,
}

impl fmt::Display for LifecyclePhase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Deactivate => write!(f, "deactivate"),
			Self::Activate => write!(f, "activate"),
		}
	}
}

/// Errors that abort a transition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransitionError {
	/// The transition was cancelled by a hook, an event listener or a
	/// middleware.
	#[error("transition cancelled")]
	Cancelled,

	/// The transition was superseded by a redirect.
	#[error("transition redirected to '{}'", .0.name)]
	Redirected(RedirectTarget),

	/// Neither a controller class nor a component could be determined.
	#[error("unable to create route {route}: class or component must be defined")]
	Resolution {
		/// Segment name.
		route: String,
	},

	/// An `activate` or `deactivate` hook failed.
	#[error("route '{route}' failed during {phase}: {source}")]
	Hook {
		/// Segment name.
		route: String,
		/// Phase the hook belongs to.
		phase: LifecyclePhase,
		/// Error returned by the hook.
		#[source]
		source: RouteError,
	},

	/// An ancestor with a mounted element exposes no outlet.
	#[error("no outlet region defined in {route} route")]
	NoOutlet {
		/// Ancestor segment name.
		route: String,
	},

	/// A root level element has to be shown but the router has no root outlet.
	#[error("no root outlet region defined")]
	NoRootOutlet,

	/// The component definition did not produce an element.
	#[error("{route}: component has an invalid value, expected a tag, constructor or element")]
	InvalidComponent {
		/// Segment name.
		route: String,
	},

	/// The route table has no route with this name.
	#[error("route not found: {0}")]
	UnknownRoute(String),

	/// Redirects kept chaining past the configured limit.
	#[error("redirect limit of {limit} exceeded")]
	RedirectLimit {
		/// Configured limit.
		limit: usize,
	},

	/// The router was destroyed.
	#[error("router has been destroyed")]
	Destroyed,

	/// A custom middleware failed.
	#[error("middleware failed: {0}")]
	Middleware(#[source] RouteError),
}

impl TransitionError {
	/// Returns true for cancellation markers (plain cancel or redirect).
	pub fn is_cancellation(&self) -> bool {
		matches!(self, Self::Cancelled | Self::Redirected(_))
	}

	/// Returns true when the transition was superseded by a redirect.
	pub fn is_redirect(&self) -> bool {
		matches!(self, Self::Redirected(_))
	}
}
