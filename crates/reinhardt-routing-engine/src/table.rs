//! Route table.
//!
//! Maps a route name to its chain of segments, root first. The table does no
//! URL matching; it only knows how routes nest and how to build a path for a
//! name and a set of params.

use crate::error::{TransitionError, TransitionResult};
use crate::segment::{Params, RouteOptions, SegmentDescriptor};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while building a route table.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RouteTableError {
	/// Two routes share a name.
	#[error("route '{0}' is defined more than once")]
	Duplicate(String),

	/// A child route names a parent that is not defined before it.
	#[error("route '{route}' refers to unknown parent '{parent}'")]
	UnknownParent {
		/// Child route.
		route: String,
		/// Missing parent.
		parent: String,
	},
}

#[derive(Debug)]
struct RouteEntry {
	path: String,
	options: Arc<RouteOptions>,
	parent: Option<String>,
}

/// Immutable registry of named routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
	entries: Arc<HashMap<String, RouteEntry>>,
}

impl RouteTable {
	/// Creates a builder.
	pub fn builder() -> RouteTableBuilder {
		RouteTableBuilder::default()
	}

	/// Returns true when a route named `name` exists.
	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Returns the number of routes.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true when the table has no routes.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the route names from the root to `name`.
	pub fn chain(&self, name: &str) -> TransitionResult<Vec<&str>> {
		let mut chain = Vec::new();
		let mut current = Some(name);
		while let Some(route) = current {
			let (key, entry) = self
				.entries
				.get_key_value(route)
				.ok_or_else(|| TransitionError::UnknownRoute(route.to_string()))?;
			chain.push(key.as_str());
			current = entry.parent.as_deref();
		}
		chain.reverse();
		Ok(chain)
	}

	/// Builds the segment descriptors for `name`.
	///
	/// Every segment receives only the params its own path declares.
	pub fn segments(&self, name: &str, params: &Params) -> TransitionResult<Vec<SegmentDescriptor>> {
		self.chain(name)?
			.into_iter()
			.map(|route| {
				let entry = self
					.entries
					.get(route)
					.ok_or_else(|| TransitionError::UnknownRoute(route.to_string()))?;
				let declared: Params = param_names(&entry.path)
					.filter_map(|param| params.get(param).map(|v| (param.to_string(), v.clone())))
					.collect();
				Ok(SegmentDescriptor::new(
					route,
					entry.path.clone(),
					entry.options.clone(),
					declared,
				))
			})
			.collect()
	}

	/// Builds the path for `name`, substituting `:param` placeholders.
	///
	/// Segment paths are joined with `/`; a segment path starting with `/`
	/// restarts from the root. Missing params drop their part of the path.
	pub fn path_for(&self, name: &str, params: &Params) -> TransitionResult<String> {
		let mut parts: Vec<String> = Vec::new();
		for route in self.chain(name)? {
			let Some(entry) = self.entries.get(route) else {
				continue;
			};
			if entry.path.starts_with('/') {
				parts.clear();
			}
			for part in entry.path.split('/').filter(|p| !p.is_empty()) {
				match placeholder(part) {
					Some(param) => {
						if let Some(value) = params.get(param) {
							parts.push(format_param(value));
						}
					}
					None => parts.push(part.to_string()),
				}
			}
		}
		Ok(format!("/{}", parts.join("/")))
	}
}

fn placeholder(part: &str) -> Option<&str> {
	part.strip_prefix(':')
		.map(|p| p.trim_end_matches('?'))
		.or_else(|| part.strip_prefix('*'))
}

fn param_names(path: &str) -> impl Iterator<Item = &str> {
	path.split('/').filter_map(placeholder)
}

fn format_param(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Builder for [`RouteTable`].
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
	routes: Vec<(String, Option<String>, RouteOptions)>,
}

impl RouteTableBuilder {
	/// Adds a top level route.
	pub fn route(mut self, name: impl Into<String>, options: RouteOptions) -> Self {
		self.routes.push((name.into(), None, options));
		self
	}

	/// Adds a route nested under `parent`, which must be added first.
	pub fn child(
		mut self,
		parent: impl Into<String>,
		name: impl Into<String>,
		options: RouteOptions,
	) -> Self {
		self.routes.push((name.into(), Some(parent.into()), options));
		self
	}

	/// Builds the table.
	pub fn build(self) -> Result<RouteTable, RouteTableError> {
		let mut entries = HashMap::with_capacity(self.routes.len());
		let mut seen = HashSet::new();
		for (name, parent, options) in self.routes {
			if let Some(parent) = &parent
				&& !seen.contains(parent)
			{
				return Err(RouteTableError::UnknownParent {
					route: name,
					parent: parent.clone(),
				});
			}
			if !seen.insert(name.clone()) {
				return Err(RouteTableError::Duplicate(name));
			}
			let path = options
				.declared_path()
				.map(str::to_string)
				.unwrap_or_else(|| name.clone());
			entries.insert(
				name,
				RouteEntry {
					path,
					options: Arc::new(options),
					parent,
				},
			);
		}
		Ok(RouteTable {
			entries: Arc::new(entries),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn table() -> RouteTable {
		RouteTable::builder()
			.route("application", RouteOptions::new().path("/"))
			.child("application", "posts", RouteOptions::new())
			.child("posts", "post", RouteOptions::new().path(":id"))
			.child("post", "comment", RouteOptions::new().path("comments/:commentId"))
			.route("login", RouteOptions::new().path("/login"))
			.build()
			.unwrap()
	}

	fn params(values: &[(&str, Value)]) -> Params {
		values
			.iter()
			.map(|(k, v)| (k.to_string(), v.clone()))
			.collect()
	}

	#[rstest]
	fn test_chain(table: RouteTable) {
		assert_eq!(table.chain("post").unwrap(), vec!["application", "posts", "post"]);
		assert_eq!(table.chain("login").unwrap(), vec!["login"]);
	}

	#[rstest]
	fn test_unknown_route(table: RouteTable) {
		let err = table.chain("missing").unwrap_err();
		assert!(matches!(err, TransitionError::UnknownRoute(name) if name == "missing"));
	}

	#[rstest]
	fn test_segments_receive_declared_params(table: RouteTable) {
		let params = params(&[("id", json!(5)), ("commentId", json!("c1"))]);

		let segments = table.segments("comment", &params).unwrap();

		let names: Vec<&str> = segments.iter().map(|s| s.name()).collect();
		assert_eq!(names, vec!["application", "posts", "post", "comment"]);
		assert!(segments[1].params().is_empty());
		assert_eq!(segments[2].params().get("id"), Some(&json!(5)));
		assert_eq!(segments[2].params().len(), 1);
		assert_eq!(segments[3].params().get("commentId"), Some(&json!("c1")));
	}

	#[rstest]
	#[case("application", &[], "/")]
	#[case("posts", &[], "/posts")]
	#[case("post", &[("id", json!(5))], "/posts/5")]
	#[case("comment", &[("id", json!("a")), ("commentId", json!(3))], "/posts/a/comments/3")]
	#[case("login", &[], "/login")]
	fn test_path_for(
		table: RouteTable,
		#[case] name: &str,
		#[case] values: &[(&str, Value)],
		#[case] expected: &str,
	) {
		assert_eq!(table.path_for(name, &params(values)).unwrap(), expected);
	}

	#[rstest]
	fn test_build_rejects_duplicates() {
		let err = RouteTable::builder()
			.route("a", RouteOptions::new())
			.route("a", RouteOptions::new())
			.build()
			.unwrap_err();
		assert_eq!(err, RouteTableError::Duplicate("a".to_string()));
	}

	#[rstest]
	fn test_build_rejects_unknown_parent() {
		let err = RouteTable::builder()
			.child("missing", "a", RouteOptions::new())
			.build()
			.unwrap_err();
		assert_eq!(
			err,
			RouteTableError::UnknownParent {
				route: "a".to_string(),
				parent: "missing".to_string(),
			}
		);
	}
}
