//! Controller classes and the ways a route can refer to one.

use super::{DefaultRoute, RouteController};
use crate::router::Router;
use crate::segment::SegmentDescriptor;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Controller classes for child segments, keyed by segment name.
pub type ChildRoutes = HashMap<String, ClassSource>;

/// Arguments handed to a controller class on construction.
#[derive(Clone, Copy)]
pub struct ClassInit<'a> {
	/// Options declared as `class_options` for the segment.
	pub class_options: &'a Map<String, Value>,
	/// The owning router.
	pub router: &'a Router,
	/// The segment the controller is created for.
	pub segment: &'a SegmentDescriptor,
}

impl ClassInit<'_> {
	/// Deserializes one class option.
	///
	/// Returns `None` when the option is missing or has another shape.
	pub fn option<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
		self.class_options
			.get(key)
			.and_then(|value| serde_json::from_value(value.clone()).ok())
	}
}

type ControllerConstructor = Arc<dyn Fn(ClassInit<'_>) -> Box<dyn RouteController> + Send + Sync>;

/// A constructor of route controllers.
#[derive(Clone)]
pub struct RouteClass {
	name: String,
	constructor: ControllerConstructor,
}

impl RouteClass {
	/// Creates a class from a constructor function.
	pub fn new<F, C>(name: impl Into<String>, constructor: F) -> Self
	where
		F: Fn(ClassInit<'_>) -> C + Send + Sync + 'static,
		C: RouteController,
	{
		let constructor: ControllerConstructor =
			Arc::new(move |init: ClassInit<'_>| -> Box<dyn RouteController> {
				Box::new(constructor(init))
			});
		Self {
			name: name.into(),
			constructor,
		}
	}

	/// Creates a class that ignores its construction arguments.
	pub fn of<C: RouteController + Default>() -> Self {
		let name = std::any::type_name::<C>();
		let name = name.rsplit("::").next().unwrap_or(name);
		Self::new(name, |_| C::default())
	}

	/// Class used for routes that declare a component but no class.
	pub fn generic() -> Self {
		Self::of::<DefaultRoute>()
	}

	/// Returns the class name.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub(crate) fn instantiate(&self, init: ClassInit<'_>) -> Box<dyn RouteController> {
		(self.constructor)(init)
	}
}

impl fmt::Debug for RouteClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteClass").field("name", &self.name).finish()
	}
}

/// A module whose default export is a controller class.
#[derive(Debug, Clone)]
pub struct ClassModule {
	/// The exported class.
	pub default: RouteClass,
}

type SyncClassFactory = Arc<dyn Fn(&SegmentDescriptor) -> Option<ClassSource> + Send + Sync>;
type AsyncClassFactory =
	Arc<dyn Fn(&SegmentDescriptor) -> BoxFuture<'static, Option<ClassSource>> + Send + Sync>;

/// Where a route's controller class comes from.
#[derive(Clone)]
pub enum ClassSource {
	/// The class itself.
	Direct(RouteClass),
	/// A module wrapping the class.
	ModuleWrapped(ClassModule),
	/// A function of the segment returning another source.
	SyncFactory(SyncClassFactory),
	/// A lazily loaded source.
	AsyncFactory(AsyncClassFactory),
}

impl ClassSource {
	/// Wraps `class` in a module.
	pub fn module(class: RouteClass) -> Self {
		Self::ModuleWrapped(ClassModule { default: class })
	}

	/// Creates a synchronous factory source.
	pub fn factory<F>(factory: F) -> Self
	where
		F: Fn(&SegmentDescriptor) -> Option<ClassSource> + Send + Sync + 'static,
	{
		Self::SyncFactory(Arc::new(factory))
	}

	/// Creates a lazily loaded source.
	pub fn lazy<F>(factory: F) -> Self
	where
		F: Fn(&SegmentDescriptor) -> BoxFuture<'static, Option<ClassSource>> + Send + Sync + 'static,
	{
		Self::AsyncFactory(Arc::new(factory))
	}
}

impl From<RouteClass> for ClassSource {
	fn from(class: RouteClass) -> Self {
		Self::Direct(class)
	}
}

impl From<ClassModule> for ClassSource {
	fn from(module: ClassModule) -> Self {
		Self::ModuleWrapped(module)
	}
}

impl fmt::Debug for ClassSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Direct(class) => f.debug_tuple("Direct").field(class).finish(),
			Self::ModuleWrapped(module) => f.debug_tuple("ModuleWrapped").field(module).finish(),
			Self::SyncFactory(_) => f.write_str("SyncFactory(..)"),
			Self::AsyncFactory(_) => f.write_str("AsyncFactory(..)"),
		}
	}
}
