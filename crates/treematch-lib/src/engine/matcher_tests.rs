use indoc::indoc;
use treematch_core::{BaseNode, Colors, NodeReferences, Value};

use super::{
    MatchConfig, Matcher, PrintTracer, PropertyFn, PropertyPredicate, Verbosity,
    enumerate_matches, has_match,
};
use crate::query::QueryNode;

fn subject(json: &str) -> BaseNode {
    serde_json::from_str(json).expect("valid subject")
}

/// String properties compare without regard to ASCII case.
struct CaseInsensitive;

impl PropertyPredicate<BaseNode> for CaseInsensitive {
    fn test(
        &self,
        node: &BaseNode,
        key: &str,
        expected: &Value,
        _references: &NodeReferences<'_, BaseNode>,
    ) -> bool {
        match (node.property(key).and_then(Value::as_str), expected.as_str()) {
            (Some(actual), Some(expected)) => actual.eq_ignore_ascii_case(expected),
            _ => node.property(key) == Some(expected),
        }
    }
}

/// A `$NAME` value refers to the `name` property of the node bound to `NAME`.
fn relational(
    node: &BaseNode,
    key: &str,
    expected: &Value,
    references: &NodeReferences<'_, BaseNode>,
) -> bool {
    match expected.as_str().and_then(|s| s.strip_prefix('$')) {
        Some(name) => references
            .get(name)
            .and_then(|bound| bound.property("name"))
            .is_some_and(|value| node.property(key) == Some(value)),
        None => node.property(key) == Some(expected),
    }
}

#[test]
fn builder_defaults() {
    let matcher = Matcher::<BaseNode>::builder().build();

    assert!(matcher.config().get_replay_cache());
    assert_eq!(*matcher.config(), MatchConfig::default());
}

#[test]
fn builder_config() {
    let disabled = Matcher::<BaseNode>::builder().replay_cache(false).build();
    assert!(!disabled.config().get_replay_cache());

    let configured = Matcher::<BaseNode>::builder()
        .config(MatchConfig::new().replay_cache(false))
        .build();
    assert_eq!(configured.config(), disabled.config());
}

#[test]
fn debug_output() {
    let matcher = Matcher::<BaseNode>::builder()
        .property_predicate(CaseInsensitive)
        .build();

    insta::assert_snapshot!(
        format!("{matcher:?}"),
        @"Matcher { config: MatchConfig { replay_cache: true }, predicate: true, .. }"
    );
}

#[test]
fn predicate_replaces_property_check() {
    let subject = subject(indoc! {r#"
        { "type": "root", "children": [{ "type": "a", "properties": { "name": "Foo" } }] }
    "#});
    let query = QueryNode::single("a").property("name", "foo").build();

    let matcher = Matcher::builder().property_predicate(CaseInsensitive).build();

    assert!(!has_match(&query, &subject));
    assert!(matcher.has_match(&query, &subject));
}

#[test]
fn predicate_keeps_type_check() {
    let subject = subject(indoc! {r#"
        { "type": "root", "children": [{ "type": "a", "properties": { "name": "Foo" } }] }
    "#});
    let query = QueryNode::single("b").property("name", "foo").build();

    let matcher = Matcher::builder().property_predicate(CaseInsensitive).build();

    assert!(!matcher.has_match(&query, &subject));
}

#[test]
fn relational_predicate_consults_bindings() {
    let subject = subject(indoc! {r#"
        {
          "type": "root",
          "children": [
            { "type": "a", "properties": { "name": "p" } },
            { "type": "b", "properties": { "id": 2, "ref": "q" } },
            { "type": "b", "properties": { "id": 3, "ref": "p" } }
          ]
        }
    "#});
    let query = QueryNode::ordered([
        QueryNode::single("a").capture("A"),
        QueryNode::single("b").property("ref", "$A").capture("B"),
    ]);

    let matcher = Matcher::builder()
        .property_predicate(PropertyFn::<BaseNode, _>::new(relational))
        .build();
    let found: Vec<_> = matcher.enumerate_matches(&query, &subject).collect();

    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].get("B").and_then(|b| b.property("id")),
        Some(&Value::from(3))
    );
    assert!(!has_match(&query, &subject));
}

#[test]
fn free_functions_use_defaults() {
    let subject = BaseNode::new("root").with_children([BaseNode::new("a"), BaseNode::new("a")]);
    let query = QueryNode::single("a").capture("A").build();
    let matcher = Matcher::builder().build();

    let free: Vec<_> = enumerate_matches(&query, &subject).collect();
    let built: Vec<_> = matcher.enumerate_matches(&query, &subject).collect();

    assert_eq!(free, built);
    assert_eq!(free.len(), 2);
}

#[test]
fn has_match_stops_at_first_match() {
    let subject = BaseNode::new("root").with_children([
        BaseNode::new("a"),
        BaseNode::new("a"),
        BaseNode::new("a"),
    ]);
    let query = QueryNode::single("a").build();

    let tracer = PrintTracer::new(Verbosity::Default, Colors::OFF);
    let matcher = Matcher::builder().tracer(&tracer).build();
    assert!(matcher.has_match(&query, &subject));

    insta::assert_snapshot!(tracer.render(), @r"
    match  a /0
    result {}
    ");
}

#[test]
fn has_match_stops_inside_containers() {
    let subject = BaseNode::new("root").with_children((0..1000).map(|_| BaseNode::new("a")));
    let query = QueryNode::any([QueryNode::single("a"), QueryNode::single("z")]);

    let tracer = PrintTracer::new(Verbosity::Verbose, Colors::OFF);
    let matcher = Matcher::builder().tracer(&tracer).build();
    assert!(matcher.has_match(&query, &subject));

    insta::assert_snapshot!(tracer.render(), @r"
    match  a /0
    result {}
    ");
}

#[test]
fn enumeration_yields_distinct_bindings() {
    let subject = BaseNode::new("root").with_children([
        BaseNode::new("a"),
        BaseNode::new("a"),
        BaseNode::new("a"),
    ]);
    let query = QueryNode::single("a").build();

    let tracer = PrintTracer::new(Verbosity::Default, Colors::OFF);
    let matcher = Matcher::builder().tracer(&tracer).build();
    assert_eq!(matcher.enumerate_matches(&query, &subject).count(), 1);

    insta::assert_snapshot!(tracer.render(), @r"
    match  a /0
    result {}
    match  a /1
    match  a /2
    ");
}
