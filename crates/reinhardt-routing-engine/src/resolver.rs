//! Controller class resolution.
//!
//! A segment's class comes from its own options or, failing that, from the
//! `child_routes` of the nearest ancestor that declares one for the segment
//! name. Factories and lazily loaded sources are unwrapped until a concrete
//! [`RouteClass`] is obtained.

use crate::component::resolve_lazy;
use crate::error::{TransitionError, TransitionResult};
use crate::route::{ClassInit, ClassSource, RouteClass, RouteInstance};
use crate::router::Router;
use crate::segment::SegmentDescriptor;
use crate::tree::RouteTree;

/// Nested factories are followed at most this many times.
const MAX_FACTORY_DEPTH: usize = 16;

/// Finds the class source for `segment`, which is about to be appended to
/// `built`.
pub fn find_class_source(segment: &SegmentDescriptor, built: &RouteTree) -> Option<ClassSource> {
	if let Some(source) = segment.options().class_source() {
		return Some(source.clone());
	}
	built.lineage().iter().rev().find_map(|ancestor| {
		ancestor
			.controller()
			.child_routes()
			.and_then(|children| children.get(segment.name()))
			.cloned()
	})
}

/// Unwraps `source` into a concrete class.
///
/// Returns `None` when a factory yields nothing.
pub async fn resolve_class(source: ClassSource, segment: &SegmentDescriptor) -> Option<RouteClass> {
	let mut current = source;
	for _ in 0..MAX_FACTORY_DEPTH {
		current = match current {
			ClassSource::Direct(class) => return Some(class),
			ClassSource::ModuleWrapped(module) => return Some(module.default),
			ClassSource::SyncFactory(factory) => factory(segment)?,
			ClassSource::AsyncFactory(factory) => factory(segment).await?,
		};
	}
	tracing::warn!(route = segment.name(), "class factories nested too deeply");
	None
}

/// Creates the instance for `segment`.
///
/// Routes that declare a component but no class get the generic controller.
pub async fn resolve_instance(
	router: &Router,
	segment: &SegmentDescriptor,
	built: &RouteTree,
) -> TransitionResult<RouteInstance> {
	let class = match find_class_source(segment, built) {
		Some(source) => resolve_class(source, segment).await,
		None => None,
	};
	let component = match segment.options().component_def() {
		Some(def) => resolve_lazy(def.clone()).await,
		None => None,
	};

	let class = match (class, &component) {
		(Some(class), _) => class,
		(None, Some(_)) => RouteClass::generic(),
		(None, None) => {
			return Err(TransitionError::Resolution {
				route: segment.name().to_string(),
			});
		}
	};

	tracing::debug!(route = segment.name(), class = class.name(), "creating route instance");
	let controller = class.instantiate(ClassInit {
		class_options: segment.options().class_options(),
		router,
		segment,
	});
	Ok(RouteInstance::new(segment, router, controller, component))
}
