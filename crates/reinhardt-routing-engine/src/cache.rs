//! Route instance cache.

use crate::route::RouteInstance;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Live route instances keyed by segment name.
///
/// There is no eviction; the cache lives as long as the router and is
/// cleared on destroy.
#[derive(Debug, Default)]
pub struct InstanceCache {
	instances: RwLock<HashMap<String, Arc<RouteInstance>>>,
}

impl InstanceCache {
	/// Creates an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the instance for `name`.
	pub fn get(&self, name: &str) -> Option<Arc<RouteInstance>> {
		self.instances.read().get(name).cloned()
	}

	/// Stores the instance for `name`, replacing any previous one.
	pub fn set(&self, name: impl Into<String>, instance: Arc<RouteInstance>) {
		self.instances.write().insert(name.into(), instance);
	}

	/// Returns true when an instance exists for `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.instances.read().contains_key(name)
	}

	/// Returns the number of cached instances.
	pub fn len(&self) -> usize {
		self.instances.read().len()
	}

	/// Returns true when nothing is cached.
	pub fn is_empty(&self) -> bool {
		self.instances.read().is_empty()
	}

	/// Drops every instance.
	pub fn clear(&self) {
		self.instances.write().clear();
	}
}
