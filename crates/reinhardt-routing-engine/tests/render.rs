//! Rendering into nested outlets

mod helpers;

use helpers::{Harness, Plan, Recorder, document, element, params_of, planned, recorded};
use reinhardt_routing_dom::memory::{MemoryElement, MemoryTarget};
use reinhardt_routing_dom::{ElementHandle, Region, same_element};
use reinhardt_routing_engine::prelude::*;
use reinhardt_routing_engine::render::{render_candidates, render_queue, route_state_of};
use reinhardt_routing_engine::{RouteTree, RouterConfig};
use rstest::rstest;
use serde_json::json;
use std::time::Duration;

fn view(tag: &str) -> RouteOptions {
	RouteOptions::new().component(tag)
}

fn nested_table() -> RouteTable {
	RouteTable::builder()
		.route("parent", view("parent-view"))
		.child("parent", "child", view("child-view"))
		.child("child", "grandchild", view("grandchild-view"))
		.child("parent", "sibling", view("leaf-view"))
		.route("other", view("leaf-view"))
		.build()
		.unwrap()
}

#[rstest]
#[tokio::test]
async fn test_renders_nested_outlets() {
	let h = Harness::new(nested_table());

	h.go("grandchild").await.unwrap();

	assert_eq!(
		h.html(),
		"<parent-view><router-outlet><child-view>Child<router-outlet>\
		 <grandchild-view>Grandchild</grandchild-view>\
		 </router-outlet></child-view></router-outlet></parent-view>"
	);
	assert_eq!(h.instance("grandchild").el().unwrap().tag_name(), "grandchild-view");
}

#[rstest]
#[tokio::test]
async fn test_sibling_replaces_child_in_parent_outlet() {
	let h = Harness::new(nested_table());
	h.go("child").await.unwrap();
	let parent_el = h.instance("parent").el().unwrap();

	h.go("sibling").await.unwrap();

	assert_eq!(
		h.html(),
		"<parent-view><router-outlet><leaf-view>Leaf</leaf-view></router-outlet></parent-view>"
	);
	assert!(same_element(&parent_el, &h.instance("parent").el().unwrap()));
	assert_eq!(h.root.mount_count(), 1);
}

#[rstest]
#[tokio::test]
async fn test_outlet_selector_override() {
	let recorder = Recorder::new();
	let table = RouteTable::builder()
		.route(
			"parent",
			planned(
				&recorder,
				Plan {
					component: Some(ComponentDef::tag("classy-view")),
					outlet_selector: Some(".child-el".to_string()),
					..Plan::default()
				},
			),
		)
		.child("parent", "child", view("leaf-view"))
		.build()
		.unwrap();
	let h = Harness::new(table);

	h.go("child").await.unwrap();

	assert_eq!(
		h.html(),
		r#"<classy-view><div class="child-el"><leaf-view>Leaf</leaf-view></div></classy-view>"#
	);
}

#[rstest]
#[tokio::test]
async fn test_missing_outlet_in_rendered_ancestor() {
	let table = RouteTable::builder()
		.route("parent", view("parent-view"))
		.child("parent", "child", view("grandchild-view"))
		.child("child", "grandchild", view("leaf-view"))
		.build()
		.unwrap();
	let h = Harness::new(table);

	let err = h.go("grandchild").await.unwrap_err();

	assert!(matches!(&err, TransitionError::NoOutlet { route } if route == "child"));
	assert_eq!(err.to_string(), "no outlet region defined in child route");
}

#[rstest]
#[tokio::test]
async fn test_missing_root_outlet() {
	let router = Router::builder()
		.table(nested_table())
		.document(document())
		.build();

	let err = router
		.transition_to("parent", Params::new(), Query::new())
		.await
		.unwrap_err();

	assert!(matches!(err, TransitionError::NoRootOutlet));
	assert!(router.state().routes.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_root_outlet_attached_later() {
	let router = Router::builder()
		.table(nested_table())
		.document(document())
		.build();
	router
		.transition_to("parent", Params::new(), Query::new())
		.await
		.unwrap_err();

	let root = MemoryTarget::new("#main");
	router.set_root_outlet(Some(Region::new(root.clone())));
	router
		.transition_to("parent", Params::new(), Query::new())
		.await
		.unwrap();

	assert_eq!(
		root.inner_html(),
		"<parent-view><router-outlet></router-outlet></parent-view>"
	);
	router.set_root_outlet(None);
	assert!(router.root_outlet().is_none());
}

fn existing_table(existing: &ElementHandle) -> RouteTable {
	RouteTable::builder()
		.route(
			"static",
			RouteOptions::new().component(ComponentDef::existing(existing.clone())),
		)
		.build()
		.unwrap()
}

#[rstest]
#[tokio::test]
async fn test_existing_element_needs_root_outlet() {
	let shared = document();
	let existing = element(&shared, "leaf-view");
	let router = Router::builder()
		.table(existing_table(&existing))
		.document(shared)
		.build();

	let err = router
		.transition_to("static", Params::new(), Query::new())
		.await
		.unwrap_err();

	assert!(matches!(err, TransitionError::NoRootOutlet));
	assert_eq!(err.to_string(), "no root outlet region defined");
	assert!(router.cache().get("static").unwrap().el().is_none());
}

#[rstest]
#[tokio::test]
async fn test_existing_element_is_shown_in_root_outlet() {
	let shared = document();
	let existing = element(&shared, "leaf-view");
	let root = MemoryTarget::new("#main");
	let router = Router::builder()
		.table(existing_table(&existing))
		.document(shared)
		.root_target(root.clone())
		.build();

	router
		.transition_to("static", Params::new(), Query::new())
		.await
		.unwrap();

	let el = router.cache().get("static").unwrap().el().unwrap();
	assert!(same_element(&el, &existing));
	assert!(route_state_of(&existing).is_some());
	assert_eq!(root.inner_html(), "<leaf-view>Leaf</leaf-view>");
}

#[rstest]
#[tokio::test]
async fn test_outletless_route_is_replaced_by_child() {
	let table = RouteTable::builder()
		.route("root2", view("parent-view").outlet(false))
		.child("root2", "leaf2", view("leaf-view"))
		.build()
		.unwrap();
	let h = Harness::new(table);
	h.go("root2").await.unwrap();
	assert_eq!(
		h.html(),
		"<parent-view><router-outlet></router-outlet></parent-view>"
	);

	h.go("leaf2").await.unwrap();

	assert_eq!(h.html(), "<leaf-view>Leaf</leaf-view>");
	assert!(h.instance("root2").el().is_none());
	assert!(h.instance("leaf2").el().is_some());
}

#[rstest]
#[tokio::test]
async fn test_outletless_chain_renders_into_nearest_outlet() {
	let recorder = Recorder::new();
	let table = RouteTable::builder()
		.route("a", view("parent-view").outlet(false))
		.child("a", "b", view("child-view"))
		.child("b", "c", recorded(&recorder))
		.child("c", "d", view("leaf-view"))
		.build()
		.unwrap();
	let h = Harness::new(table);

	h.go("d").await.unwrap();

	assert_eq!(
		h.html(),
		"<child-view>Child<router-outlet><leaf-view>Leaf</leaf-view></router-outlet></child-view>"
	);
	assert!(h.instance("a").el().is_none());
	assert!(h.instance("c").el().is_none());
}

#[rstest]
#[tokio::test]
async fn test_render_queue_selection() {
	let recorder = Recorder::new();
	let table = RouteTable::builder()
		.route("a", view("parent-view").outlet(false))
		.child("a", "b", view("child-view"))
		.child("b", "c", recorded(&recorder))
		.child("c", "d", view("leaf-view"))
		.build()
		.unwrap();
	let h = Harness::with_config(table, RouterConfig::default().with_render(false));
	h.go("d").await.unwrap();

	let mut tree = RouteTree::new();
	for name in ["a", "b", "c", "d"] {
		tree.push(h.instance(name));
	}

	assert_eq!(render_candidates(&tree, 0), vec![0, 1, 2, 3]);
	assert_eq!(render_candidates(&tree, 2), vec![2, 3]);
	assert_eq!(render_candidates(&tree, 4), vec![3]);
	assert_eq!(render_candidates(&RouteTree::new(), 0), Vec::<usize>::new());
	assert_eq!(render_queue(&tree, &[0, 1, 2, 3]), vec![1, 3]);
	assert_eq!(render_queue(&tree, &[2]), Vec::<usize>::new());
}

#[rstest]
#[case(true, 1)]
#[case(false, 2)]
#[tokio::test]
async fn test_update_el_decides_rerender(#[case] update_in_place: bool, #[case] mounts: usize) {
	let recorder = Recorder::new();
	let table = RouteTable::builder()
		.route(
			"parent",
			planned(
				&recorder,
				Plan {
					component: Some(ComponentDef::tag("parent-view")),
					update_el: update_in_place,
					..Plan::default()
				},
			),
		)
		.build()
		.unwrap();
	let h = Harness::new(table);
	h.go("parent").await.unwrap();
	let first = h.instance("parent").el().unwrap();

	h.go("parent").await.unwrap();

	let second = h.instance("parent").el().unwrap();
	assert_eq!(same_element(&first, &second), update_in_place);
	assert_eq!(h.root.mount_count(), mounts);
	assert_eq!(recorder.with_prefix("update_el:"), vec!["update_el:parent"]);
	assert_eq!(
		recorder.with_prefix("prepare_el:").len(),
		if update_in_place { 1 } else { 2 }
	);
}

#[rstest]
#[tokio::test]
async fn test_element_properties_bindings_and_route_state() {
	let recorder = Recorder::new();
	let options = planned(
		&recorder,
		Plan {
			component: Some(ComponentDef::tag("leaf-view")),
			bindings: vec![
				PropertyBinding::param("postId", "id").as_number(),
				PropertyBinding::query("tab", "tab"),
				PropertyBinding::path("location"),
			],
			..Plan::default()
		},
	)
	.path("post/:id")
	.property("a", json!("b"))
	.property("c", json!(1));
	let table = RouteTable::builder().route("post", options).build().unwrap();
	let h = Harness::new(table);

	h.router
		.transition_to(
			"post",
			params_of(&[("id", json!("42"))]),
			params_of(&[("tab", json!("info"))]),
		)
		.await
		.unwrap();

	let el = h.instance("post").el().unwrap();
	assert_eq!(el.property("a"), Some(json!("b")));
	assert_eq!(el.property("c"), Some(json!(1)));
	assert_eq!(el.property("postId"), Some(json!(42)));
	assert_eq!(el.property("tab"), Some(json!("info")));
	assert_eq!(el.property("location"), Some(json!("/post/42")));
	assert_eq!(el.property("preparedBy"), Some(json!("post")));
	assert_eq!(
		route_state_of(&el),
		Some(json!({
			"path": "/post/42",
			"routes": ["post"],
			"params": {"id": "42"},
			"query": {"tab": "info"},
		}))
	);
}

#[rstest]
#[tokio::test]
async fn test_active_elements_follow_later_transitions() {
	let recorder = Recorder::new();
	let table = RouteTable::builder()
		.route(
			"parent",
			planned(
				&recorder,
				Plan {
					component: Some(ComponentDef::tag("parent-view")),
					bindings: vec![PropertyBinding::query("tab", "tab")],
					..Plan::default()
				},
			),
		)
		.child("parent", "child", view("child-view"))
		.child("parent", "sibling", view("leaf-view"))
		.build()
		.unwrap();
	let h = Harness::new(table);
	h.router
		.transition_to("child", Params::new(), params_of(&[("tab", json!("a"))]))
		.await
		.unwrap();
	let parent_el = h.instance("parent").el().unwrap();

	h.router
		.transition_to("sibling", Params::new(), params_of(&[("tab", json!("b"))]))
		.await
		.unwrap();

	assert!(same_element(&parent_el, &h.instance("parent").el().unwrap()));
	assert_eq!(parent_el.property("tab"), Some(json!("b")));
	let state = route_state_of(&parent_el).unwrap();
	assert_eq!(state["routes"], json!(["parent", "sibling"]));
	assert_eq!(state["query"], json!({"tab": "b"}));
}

#[rstest]
#[tokio::test]
async fn test_deactivated_routes_lose_their_element() {
	let h = Harness::new(nested_table());
	h.go("grandchild").await.unwrap();

	h.go("other").await.unwrap();

	assert_eq!(h.html(), "<leaf-view>Leaf</leaf-view>");
	for name in ["parent", "child", "grandchild"] {
		assert!(h.instance(name).el().is_none(), "{name} still has an element");
	}
	assert!(h.instance("other").el().is_some());
}

#[rstest]
#[tokio::test]
async fn test_next_route_waits_for_ready_element() {
	let recorder = Recorder::new();
	let h = Harness::new(
		RouteTable::builder()
			.route(
				"parent",
				planned(
					&recorder,
					Plan {
						component: Some(ComponentDef::tag("slow-view")),
						..Plan::default()
					},
				),
			)
			.child(
				"parent",
				"child",
				planned(
					&recorder,
					Plan {
						component: Some(ComponentDef::tag("leaf-view")),
						..Plan::default()
					},
				),
			)
			.build()
			.unwrap(),
	);
	let ready_log = recorder.clone();
	h.document.define("slow-view", move || {
		let ready_log = ready_log.clone();
		MemoryElement::new("slow-view")
			.with_outlet("router-outlet")
			.with_ready(move || {
				let ready_log = ready_log.clone();
				Box::pin(async move {
					tokio::time::sleep(Duration::from_millis(10)).await;
					ready_log.push("ready:slow-view");
				})
			})
	});

	h.go("child").await.unwrap();

	let entries = recorder.entries();
	assert_eq!(
		entries[entries.len() - 3..],
		["prepare_el:parent", "ready:slow-view", "prepare_el:child"]
	);
}

#[rstest]
#[tokio::test]
async fn test_constructor_and_factory_components() {
	let table = RouteTable::builder()
		.route(
			"built",
			RouteOptions::new().component(ComponentDef::constructor(|| {
				std::sync::Arc::new(MemoryElement::new("built-view").with_outlet("router-outlet"))
			})),
		)
		.child(
			"built",
			"picked",
			RouteOptions::new().component(ComponentDef::factory(|route: &RouteInstance| {
				Some(ComponentDef::tag(format!("{}-view", route.name())))
			})),
		)
		.build()
		.unwrap();
	let h = Harness::new(table);

	h.go("picked").await.unwrap();

	assert_eq!(
		h.html(),
		"<built-view><router-outlet><picked-view></picked-view></router-outlet></built-view>"
	);
}

#[rstest]
#[tokio::test]
async fn test_invalid_component_fails() {
	let table = RouteTable::builder()
		.route("broken", RouteOptions::new().component("not a tag"))
		.build()
		.unwrap();
	let h = Harness::new(table);

	let err = h.go("broken").await.unwrap_err();

	assert!(matches!(err, TransitionError::InvalidComponent { route } if route == "broken"));
}

#[rstest]
#[tokio::test]
async fn test_render_disabled() {
	let h = Harness::with_config(nested_table(), RouterConfig::default().with_render(false));

	h.go("grandchild").await.unwrap();

	assert_eq!(h.html(), "");
	assert!(h.instance("grandchild").el().is_none());
}
