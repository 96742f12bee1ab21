//! The route tree built for one transition.

use crate::route::RouteInstance;
use crate::segment::SegmentDescriptor;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct TreeNode {
	instance: Arc<RouteInstance>,
	parent: Option<usize>,
}

/// Instances of a transition's target state, root first, with parent
/// indices.
#[derive(Debug, Clone, Default)]
pub struct RouteTree {
	nodes: Vec<TreeNode>,
}

impl RouteTree {
	/// Creates an empty tree.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `instance` below the current leaf and returns its index.
	pub fn push(&mut self, instance: Arc<RouteInstance>) -> usize {
		let parent = self.nodes.len().checked_sub(1);
		self.nodes.push(TreeNode { instance, parent });
		self.nodes.len() - 1
	}

	/// Returns the instance at `index`.
	pub fn get(&self, index: usize) -> Option<&Arc<RouteInstance>> {
		self.nodes.get(index).map(|node| &node.instance)
	}

	/// Returns the parent index of `index`.
	pub fn parent_of(&self, index: usize) -> Option<usize> {
		self.nodes.get(index).and_then(|node| node.parent)
	}

	/// Returns the number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Returns true when the tree has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Returns the deepest instance.
	pub fn leaf(&self) -> Option<&Arc<RouteInstance>> {
		self.nodes.last().map(|node| &node.instance)
	}

	/// Returns the instances from `from` to the leaf.
	pub fn suffix(&self, from: usize) -> Vec<Arc<RouteInstance>> {
		self.nodes
			.iter()
			.skip(from)
			.map(|node| node.instance.clone())
			.collect()
	}

	/// Returns all instances, root first.
	pub fn lineage(&self) -> Vec<Arc<RouteInstance>> {
		self.suffix(0)
	}

	/// Iterates over the ancestors of `index`, nearest first.
	pub fn ancestors(&self, index: usize) -> Ancestors<'_> {
		Ancestors {
			tree: self,
			next: self.parent_of(index),
		}
	}
}

/// Iterator over ancestors, nearest first.
#[derive(Debug)]
pub struct Ancestors<'a> {
	tree: &'a RouteTree,
	next: Option<usize>,
}

impl<'a> Iterator for Ancestors<'a> {
	type Item = (usize, &'a Arc<RouteInstance>);

	fn next(&mut self) -> Option<Self::Item> {
		let index = self.next?;
		let node = self.tree.nodes.get(index)?;
		self.next = node.parent;
		Some((index, &node.instance))
	}
}

/// Returns the first position where the two states differ.
///
/// Positions differ when either side ends, when the names differ or when the
/// params are not deep-equal. Everything before the returned index can be
/// reused as is.
pub fn changing_index(prev: &[SegmentDescriptor], next: &[SegmentDescriptor]) -> usize {
	prev.iter()
		.zip(next)
		.take_while(|(p, n)| p.same_state(n))
		.count()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::segment::{Params, RouteOptions};
	use rstest::rstest;
	use serde_json::{Value, json};

	fn seg(name: &str, id: Option<Value>) -> SegmentDescriptor {
		let mut params = Params::new();
		if let Some(id) = id {
			params.insert("id".to_string(), id);
		}
		SegmentDescriptor::new(name, name, Arc::new(RouteOptions::new()), params)
	}

	#[rstest]
	#[case(vec![], vec![seg("a", None)], 0)]
	#[case(vec![seg("a", None)], vec![], 0)]
	#[case(vec![seg("a", None), seg("b", None)], vec![seg("a", None), seg("b", None)], 2)]
	#[case(vec![seg("a", None), seg("b", None)], vec![seg("a", None), seg("c", None)], 1)]
	#[case(vec![seg("a", None)], vec![seg("a", None), seg("b", None)], 1)]
	#[case(vec![seg("a", None), seg("b", None)], vec![seg("a", None)], 1)]
	#[case(
		vec![seg("a", Some(json!(1))), seg("b", None)],
		vec![seg("a", Some(json!(2))), seg("b", None)],
		0
	)]
	#[case(
		vec![seg("a", Some(json!({"k": [1, 2]})))],
		vec![seg("a", Some(json!({"k": [1, 2]})))],
		1
	)]
	fn test_changing_index(
		#[case] prev: Vec<SegmentDescriptor>,
		#[case] next: Vec<SegmentDescriptor>,
		#[case] expected: usize,
	) {
		assert_eq!(changing_index(&prev, &next), expected);
	}

	#[rstest]
	fn test_empty_tree() {
		let tree = RouteTree::new();
		assert!(tree.is_empty());
		assert!(tree.leaf().is_none());
		assert_eq!(tree.ancestors(0).count(), 0);
		assert!(tree.suffix(3).is_empty());
	}
}
