use serde_json::json;

use crate::{BaseNode, NodeReferences, Properties, TreeNode, Value};

fn props(entries: &[(&str, Value)]) -> Properties {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Node that hides `group` wrappers by presenting their children instead.
struct GroupedNode {
    kind: &'static str,
    props: Properties,
    children: Vec<GroupedNode>,
}

impl GroupedNode {
    fn new(kind: &'static str, children: Vec<GroupedNode>) -> Self {
        Self {
            kind,
            props: Properties::new(),
            children,
        }
    }
}

impl TreeNode for GroupedNode {
    fn node_type(&self) -> &str {
        self.kind
    }

    fn properties(&self) -> &Properties {
        &self.props
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }

    fn matching_targets(&self) -> impl Iterator<Item = &Self> {
        let targets: Vec<&Self> = if self.kind == "group" {
            self.children.iter().collect()
        } else {
            vec![self]
        };
        targets.into_iter()
    }
}

/// Node whose `same_as` property must equal the `id` of a bound node.
struct RelationalNode(BaseNode);

impl TreeNode for RelationalNode {
    fn node_type(&self) -> &str {
        self.0.node_type()
    }

    fn properties(&self) -> &Properties {
        self.0.properties()
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        std::iter::empty()
    }

    fn property_matches(
        &self,
        key: &str,
        expected: &Value,
        references: &NodeReferences<'_, Self>,
    ) -> bool {
        if key != "same_as" {
            return self.properties().get(key) == Some(expected);
        }
        let Some(name) = expected.as_str() else {
            return false;
        };
        references
            .get(name)
            .is_some_and(|bound| bound.properties().get("id") == self.properties().get("id"))
    }
}

#[test]
fn type_filter_none_matches_any_node() {
    let node = BaseNode::new("call");
    let refs = NodeReferences::empty();

    assert!(node.matches(None, None, &refs));
    assert!(node.matches(Some("call"), None, &refs));
    assert!(!node.matches(Some("Call"), None, &refs));
}

#[test]
fn properties_none_skips_check() {
    let node = BaseNode::new("a").with_property("p", 1);
    let refs = NodeReferences::empty();

    assert!(node.matches(Some("a"), None, &refs));
    assert!(node.matches(Some("a"), Some(&Properties::new()), &refs));
}

#[test]
fn every_required_property_must_match() {
    let node = BaseNode::new("a")
        .with_property("p", "v")
        .with_property("q", 2);
    let refs = NodeReferences::empty();

    assert!(node.matches(None, Some(&props(&[("p", json!("v"))])), &refs));
    assert!(node.matches(
        None,
        Some(&props(&[("p", json!("v")), ("q", json!(2))])),
        &refs
    ));
    assert!(!node.matches(
        None,
        Some(&props(&[("p", json!("v")), ("q", json!(3))])),
        &refs
    ));
    assert!(!node.matches(None, Some(&props(&[("q", json!("2"))])), &refs));
}

#[test]
fn missing_property_only_equals_null() {
    let node = BaseNode::new("a");
    let refs = NodeReferences::empty();

    assert!(node.matches(None, Some(&props(&[("absent", Value::Null)])), &refs));
    assert!(!node.matches(None, Some(&props(&[("absent", json!(""))])), &refs));
}

#[test]
fn default_matching_target_is_the_node_itself() {
    let node = BaseNode::new("a");
    let targets: Vec<_> = node.matching_targets().collect();

    assert_eq!(targets.len(), 1);
    assert!(std::ptr::eq(targets[0], &node));
}

#[test]
fn matching_targets_can_substitute_children() {
    let group = GroupedNode::new(
        "group",
        vec![GroupedNode::new("a", vec![]), GroupedNode::new("b", vec![])],
    );
    let types: Vec<_> = group.matching_targets().map(|n| n.node_type()).collect();

    assert_eq!(types, ["a", "b"]);
}

#[test]
fn property_predicate_can_consult_references() {
    let anchor = RelationalNode(BaseNode::new("decl").with_property("id", 7));
    let same = RelationalNode(BaseNode::new("use").with_property("id", 7));
    let other = RelationalNode(BaseNode::new("use").with_property("id", 8));

    let name = "decl".into();
    let refs = NodeReferences::empty().with_reference(Some(&name), &anchor);
    let required = props(&[("same_as", json!("decl"))]);

    assert!(same.matches(Some("use"), Some(&required), &refs));
    assert!(!other.matches(Some("use"), Some(&required), &refs));
    assert!(!same.matches(Some("use"), Some(&required), &NodeReferences::empty()));
}
