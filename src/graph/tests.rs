//! Tests for the template graph collector

use super::*;
use crate::resolve::{TemplateInstance, ValueNode};
use crate::types::TemplateFormat;
use indexmap::IndexMap;

fn instance(template: &str, fields: Vec<(&str, ValueNode)>) -> TemplateInstance {
    TemplateInstance {
        template: template.to_string(),
        format: TemplateFormat::Structured,
        fields: fields
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<IndexMap<_, _>>(),
        field_note: None,
        template_note: None,
    }
}

#[test]
fn test_collect_groups_by_template_name() {
    let mut arena = InstanceArena::new();
    let a = arena.insert(instance("/blog/post", vec![("title", ValueNode::string("a"))]));
    let b = arena.insert(instance("/blog/post", vec![("title", ValueNode::string("b"))]));
    let c = arena.insert(instance("/blog/author", vec![("name", ValueNode::string("Ada"))]));

    let roots = vec![
        ("/a.json".to_string(), ValueNode::Instance(a)),
        ("/b.json".to_string(), ValueNode::Instance(b)),
        ("/c.json".to_string(), ValueNode::Instance(c)),
    ];
    let graph = collect(&roots, &arena);

    assert_eq!(graph.template_count(), 2);
    assert_eq!(graph.instances("/blog/post"), &[a, b]);
    assert_eq!(graph.instances("/blog/author"), &[c]);
    assert_eq!(graph.instances("/missing"), &[] as &[InstanceId]);
}

#[test]
fn test_template_order_is_first_observed() {
    let mut arena = InstanceArena::new();
    let quote = arena.insert(instance("/quote", vec![]));
    let article = arena.insert(instance("/article", vec![]));

    let roots = vec![
        ("/1.json".to_string(), ValueNode::Instance(quote)),
        ("/2.json".to_string(), ValueNode::Instance(article)),
    ];
    let graph = collect(&roots, &arena);

    let names: Vec<&str> = graph.template_names().collect();
    assert_eq!(names, vec!["/quote", "/article"]);
}

#[test]
fn test_shared_instance_counted_once() {
    let mut arena = InstanceArena::new();
    let shared = arena.insert(instance("/person", vec![]));
    let a = arena.insert(instance(
        "/page",
        vec![("author", ValueNode::Instance(shared))],
    ));
    let b = arena.insert(instance(
        "/page",
        vec![("editor", ValueNode::Instance(shared))],
    ));

    let roots = vec![
        ("/a.json".to_string(), ValueNode::Instance(a)),
        ("/b.json".to_string(), ValueNode::Instance(b)),
    ];
    let graph = collect(&roots, &arena);

    assert_eq!(graph.instances("/person"), &[shared]);
    assert_eq!(graph.instances("/page"), &[a, b]);
    assert_eq!(graph.instance_count(), 3);
}

#[test]
fn test_structural_twins_counted_separately() {
    let mut arena = InstanceArena::new();
    let first = arena.insert(instance("/person", vec![("name", ValueNode::string("Ada"))]));
    let second = arena.insert(instance("/person", vec![("name", ValueNode::string("Ada"))]));

    let roots = vec![
        ("/a.json".to_string(), ValueNode::Instance(first)),
        ("/b.json".to_string(), ValueNode::Instance(second)),
    ];
    let graph = collect(&roots, &arena);

    assert_eq!(graph.instances("/person"), &[first, second]);
}

#[test]
fn test_instances_found_through_lists_and_maps() {
    let mut arena = InstanceArena::new();
    let inner = arena.insert(instance("/section", vec![]));
    let in_list = arena.insert(instance("/section", vec![]));
    let mut entries = IndexMap::new();
    entries.insert("nested".to_string(), ValueNode::Instance(inner));
    let root = arena.insert(instance(
        "/page",
        vec![
            (
                "meta",
                ValueNode::Map {
                    entries,
                    note: None,
                },
            ),
            ("sections", ValueNode::List(vec![ValueNode::Instance(in_list)])),
            ("title", ValueNode::string("x")),
        ],
    ));

    let roots = vec![("/a.json".to_string(), ValueNode::Instance(root))];
    let graph = collect(&roots, &arena);

    assert_eq!(graph.instances("/section"), &[inner, in_list]);
    assert_eq!(graph.instance_count(), 3);
}

#[test]
fn test_empty_roots() {
    let arena = InstanceArena::new();
    let graph = collect(&[], &arena);

    assert_eq!(graph.template_count(), 0);
    assert_eq!(graph.instance_count(), 0);
    assert_eq!(graph.template_names().count(), 0);
}
