use treematch_core::Value;

use super::{ContainerMode, QueryNode};
use crate::Error;

#[test]
fn single_defaults() {
    let QueryNode::Single(single) = QueryNode::single("a").build() else {
        panic!("expected a single query");
    };

    assert_eq!(single.node_type(), Some("a"));
    assert_eq!(single.properties(), None);
    assert!(!single.is_direct());
    assert_eq!(single.capture(), None);
    assert_eq!(single.children(), &QueryNode::empty());
    assert!(!single.has_references());
}

#[test]
fn single_options() {
    let QueryNode::Single(single) = QueryNode::wildcard()
        .property("v", 1)
        .property("w", "x")
        .property("v", 2)
        .direct()
        .capture("N")
        .build()
    else {
        panic!("expected a single query");
    };

    assert_eq!(single.node_type(), None);
    let properties = single.properties().expect("properties set");
    assert_eq!(properties.len(), 2);
    assert_eq!(properties.get("v"), Some(&Value::from(2)));
    assert!(single.is_direct());
    assert_eq!(single.capture(), Some("N"));
    assert!(single.has_references());
}

#[test]
fn references_propagate_upwards() {
    let plain = QueryNode::ordered([QueryNode::single("a"), QueryNode::single("b")]);
    assert!(!plain.has_references());

    let deep = QueryNode::any([QueryNode::single("a").children(QueryNode::exact([
        QueryNode::single("b").children(QueryNode::optional([QueryNode::single("c").capture("C")])),
    ]))]);
    assert!(deep.has_references());

    let QueryNode::Any(any) = &deep else {
        panic!("expected an any query");
    };
    assert!(any.children()[0].has_references());
}

#[test]
fn primitive_kinds() {
    assert!(QueryNode::single("a").build().is_primitive());
    assert!(QueryNode::exact([QueryNode::single("a")]).is_primitive());
    assert!(!QueryNode::ordered([QueryNode::single("a")]).is_primitive());
    assert!(!QueryNode::optional([QueryNode::single("a")]).is_primitive());

    assert!(QueryNode::single("a").build().is_single());
    assert!(!QueryNode::exact([QueryNode::single("a")]).is_single());
}

#[test]
fn container_modes_round_trip() {
    for mode in ContainerMode::ALL {
        let node = QueryNode::with_mode(mode, [QueryNode::single("a")]);
        assert_eq!(node.container_mode(), Some(mode));
        assert_eq!(node.container_children().len(), 1);
    }
    assert_eq!(QueryNode::single("a").build().container_mode(), None);
    assert!(QueryNode::single("a").build().container_children().is_empty());
}

#[test]
fn variant_flags() {
    let QueryNode::All(unordered) = QueryNode::unordered([QueryNode::single("a")]) else {
        panic!("expected an all query");
    };
    assert!(!unordered.is_ordered());

    let QueryNode::Any(optional) = QueryNode::optional([QueryNode::single("a")]) else {
        panic!("expected an any query");
    };
    assert!(optional.is_optional());

    let QueryNode::Exact(exact) = QueryNode::exact([QueryNode::single("a")]) else {
        panic!("expected an exact query");
    };
    assert_eq!(exact.children().len(), 1);
}

#[test]
fn container_by_name() {
    let node = QueryNode::container("unordered", [QueryNode::single("a")]).expect("known mode");
    assert_eq!(node, QueryNode::unordered([QueryNode::single("a")]));

    let err = QueryNode::container("every", [QueryNode::single("a")]).unwrap_err();
    assert_eq!(
        err,
        Error::UnknownContainerMode {
            mode: "every".to_owned()
        }
    );
}
