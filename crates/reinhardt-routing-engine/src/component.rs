//! Component definitions and element creation.

use crate::error::{TransitionError, TransitionResult};
use crate::route::RouteInstance;
use futures::future::BoxFuture;
use reinhardt_routing_dom::{Document, ElementHandle};
use std::fmt;
use std::sync::Arc;

/// Nested factories are followed at most this many times.
const MAX_FACTORY_DEPTH: usize = 16;

type ConstructorFn = Arc<dyn Fn() -> ElementHandle + Send + Sync>;
type FactoryFn = Arc<dyn Fn(&RouteInstance) -> Option<ComponentDef> + Send + Sync>;
type AsyncFactoryFn = Arc<dyn Fn() -> BoxFuture<'static, Option<ComponentDef>> + Send + Sync>;

/// The UI component rendered for a route.
#[derive(Clone)]
pub enum ComponentDef {
	/// A tag name created through the document.
	Tag(String),
	/// A constructor producing a fresh element.
	Constructor(ConstructorFn),
	/// A function of the route returning another definition.
	Factory(FactoryFn),
	/// A lazily loaded definition. Awaited when the route is resolved.
	AsyncFactory(AsyncFactoryFn),
	/// An element that already exists, typically pre-rendered.
	Existing(ElementHandle),
}

impl ComponentDef {
	/// Creates a tag definition.
	pub fn tag(tag: impl Into<String>) -> Self {
		Self::Tag(tag.into())
	}

	/// Creates a constructor definition.
	pub fn constructor<F>(constructor: F) -> Self
	where
		F: Fn() -> ElementHandle + Send + Sync + 'static,
	{
		Self::Constructor(Arc::new(constructor))
	}

	/// Creates a route-dependent definition.
	pub fn factory<F>(factory: F) -> Self
	where
		F: Fn(&RouteInstance) -> Option<ComponentDef> + Send + Sync + 'static,
	{
		Self::Factory(Arc::new(factory))
	}

	/// Creates a lazily loaded definition.
	pub fn lazy<F>(factory: F) -> Self
	where
		F: Fn() -> BoxFuture<'static, Option<ComponentDef>> + Send + Sync + 'static,
	{
		Self::AsyncFactory(Arc::new(factory))
	}

	/// Wraps an existing element.
	pub fn existing(element: ElementHandle) -> Self {
		Self::Existing(element)
	}
}

impl From<&str> for ComponentDef {
	fn from(tag: &str) -> Self {
		Self::Tag(tag.to_string())
	}
}

impl From<String> for ComponentDef {
	fn from(tag: String) -> Self {
		Self::Tag(tag)
	}
}

impl From<ElementHandle> for ComponentDef {
	fn from(element: ElementHandle) -> Self {
		Self::Existing(element)
	}
}

impl fmt::Debug for ComponentDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
			Self::Constructor(_) => f.write_str("Constructor(..)"),
			Self::Factory(_) => f.write_str("Factory(..)"),
			Self::AsyncFactory(_) => f.write_str("AsyncFactory(..)"),
			Self::Existing(el) => f.debug_tuple("Existing").field(&el.tag_name()).finish(),
		}
	}
}

/// Awaits lazily loaded definitions until a synchronous one is obtained.
///
/// Returns `None` when a factory yields nothing.
pub async fn resolve_lazy(def: ComponentDef) -> Option<ComponentDef> {
	let mut current = def;
	for _ in 0..MAX_FACTORY_DEPTH {
		match current {
			ComponentDef::AsyncFactory(factory) => current = factory().await?,
			other => return Some(other),
		}
	}
	None
}

/// Creates the element for `def`.
pub async fn create_element(
	route: &RouteInstance,
	def: &ComponentDef,
	document: &dyn Document,
) -> TransitionResult<ElementHandle> {
	let invalid = || TransitionError::InvalidComponent {
		route: route.name().to_string(),
	};

	let mut current = def.clone();
	for _ in 0..MAX_FACTORY_DEPTH {
		current = match current {
			ComponentDef::Tag(tag) => return document.create_element(&tag).ok_or_else(invalid),
			ComponentDef::Constructor(constructor) => return Ok(constructor()),
			ComponentDef::Existing(element) => return Ok(element),
			ComponentDef::Factory(factory) => factory(route).ok_or_else(invalid)?,
			ComponentDef::AsyncFactory(factory) => factory().await.ok_or_else(invalid)?,
		};
	}
	Err(invalid())
}

#[cfg(test)]
mod tests {
	use super::*;
	use reinhardt_routing_dom::memory::MemoryElement;
	use rstest::rstest;

	#[rstest]
	#[case(ComponentDef::from("x-view"), "Tag(\"x-view\")")]
	#[case(ComponentDef::constructor(|| Arc::new(MemoryElement::new("x"))), "Constructor(..)")]
	#[case(ComponentDef::lazy(|| Box::pin(async { None })), "AsyncFactory(..)")]
	fn test_debug(#[case] def: ComponentDef, #[case] expected: &str) {
		assert_eq!(format!("{def:?}"), expected);
	}

	#[rstest]
	#[tokio::test]
	async fn test_resolve_lazy_unwraps_nested() {
		let def = ComponentDef::lazy(|| {
			Box::pin(async { Some(ComponentDef::lazy(|| Box::pin(async { Some(ComponentDef::tag("x-lazy")) }))) })
		});

		let resolved = resolve_lazy(def).await;

		assert!(matches!(resolved, Some(ComponentDef::Tag(tag)) if tag == "x-lazy"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_resolve_lazy_none() {
		let def = ComponentDef::lazy(|| Box::pin(async { None }));
		assert!(resolve_lazy(def).await.is_none());
	}

	#[rstest]
	#[tokio::test]
	async fn test_resolve_lazy_keeps_sync_definitions() {
		let resolved = resolve_lazy("x-view".into()).await;
		assert!(matches!(resolved, Some(ComponentDef::Tag(tag)) if tag == "x-view"));
	}
}
