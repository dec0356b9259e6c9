//! Tests for engine module

use super::*;
use crate::aggregate::EffectiveType;
use crate::error::Error;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn project_for(dir: &TempDir) -> ProjectDefinition {
    ProjectDefinition {
        name: "test".to_string(),
        roots: vec![dir.path().to_path_buf()],
        ignore: Vec::new(),
        map_templates: Vec::new(),
        namespace_root: "gen".to_string(),
        type_prefix: None,
        output_dir: dir.path().join("generated"),
    }
}

fn write_doc(dir: &TempDir, rel_path: &str, content: &str) {
    let path = dir.path().join(rel_path.trim_start_matches('/'));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn template_names(values: &[&str]) -> std::collections::BTreeSet<String> {
    values.iter().map(ToString::to_string).collect()
}

// ============================================================================
// Full Pass Tests
// ============================================================================

#[test]
fn test_cast_simple_corpus() {
    let dir = TempDir::new().unwrap();
    write_doc(
        &dir,
        "/one.json",
        r#"{"_template": "/card", "title": "First", "weight": 1}"#,
    );
    write_doc(
        &dir,
        "/two.json",
        r#"{"_template": "/card", "title": "Second", "pinned": true}"#,
    );

    let mut engine = CastEngine::new(project_for(&dir));
    let templates = engine.cast().unwrap();

    assert_eq!(templates.len(), 1);
    let card = &templates[0];
    assert_eq!(card.name, "/card");
    assert_eq!(card.instance_count, 2);

    let fields: Vec<&str> = card.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fields, vec!["title", "weight", "pinned"]);
    assert_eq!(
        card.field("title").unwrap().effective_type,
        EffectiveType::String
    );
    assert_eq!(
        card.field("weight").unwrap().effective_type,
        EffectiveType::Number
    );
    assert_eq!(
        card.field("pinned").unwrap().effective_type,
        EffectiveType::Boolean
    );
}

#[test]
fn test_shared_reference_counted_once() {
    let dir = TempDir::new().unwrap();
    write_doc(
        &dir,
        "/a.json",
        r#"{"_template": "/wrapper", "x": {"_dataUrl": "/b.json"}}"#,
    );
    write_doc(&dir, "/b.json", r#"{"_template": "/inner", "name": "b"}"#);
    write_doc(
        &dir,
        "/c.json",
        r#"{"_template": "/wrapper", "y": {"_dataUrl": "/b.json"}}"#,
    );

    let mut engine = CastEngine::new(project_for(&dir));
    let templates = engine.cast().unwrap();

    let inner = templates.iter().find(|t| t.name == "/inner").unwrap();
    assert_eq!(inner.instance_count, 1);

    let wrapper = templates.iter().find(|t| t.name == "/wrapper").unwrap();
    assert_eq!(wrapper.instance_count, 2);
    assert_eq!(
        wrapper.field("x").unwrap().effective_type,
        EffectiveType::TemplateObject(template_names(&["/inner"]))
    );
    assert_eq!(
        wrapper.field("y").unwrap().effective_type,
        EffectiveType::TemplateObject(template_names(&["/inner"]))
    );

    assert_eq!(engine.stats().instances_collected, 3);
}

#[test]
fn test_cast_is_idempotent() {
    let dir = TempDir::new().unwrap();
    write_doc(
        &dir,
        "/post.json",
        r#"{"_template": "/blog/post", "title": "x", "tags": ["a", "b"],
            "author": {"_template": "/blog/author", "name": "Ada"}}"#,
    );

    let mut engine = CastEngine::new(project_for(&dir));
    let first = engine.cast().unwrap();
    let second = engine.cast().unwrap();

    assert_eq!(first, second);
}

// ============================================================================
// Project Settings Tests
// ============================================================================

#[test]
fn test_map_templates_from_project() {
    let dir = TempDir::new().unwrap();
    write_doc(
        &dir,
        "/page.json",
        r#"{"_template": "/page", "labels": {"_dataUrl": "/labels.json"}}"#,
    );
    write_doc(
        &dir,
        "/labels.json",
        r#"{"_template": "/shared/kv", "en": "Hello", "de": "Hallo"}"#,
    );

    let mut project = project_for(&dir);
    project.map_templates = vec!["/shared/kv".to_string()];
    let templates = CastEngine::new(project).cast().unwrap();

    let page = templates.iter().find(|t| t.name == "/page").unwrap();
    assert_eq!(
        page.field("labels").unwrap().effective_type,
        EffectiveType::StringMap
    );
}

#[test]
fn test_namespace_root_from_project() {
    let dir = TempDir::new().unwrap();
    write_doc(&dir, "/a.json", r#"{"_template": "/content/post", "t": "x"}"#);
    write_doc(
        &dir,
        "/b.json",
        r#"{"_template": "/content/hero/banner", "t": "y"}"#,
    );

    let mut project = project_for(&dir);
    project.namespace_root = "site.gen".to_string();
    let templates = CastEngine::new(project).cast().unwrap();

    let post = templates.iter().find(|t| t.name == "/content/post").unwrap();
    let banner = templates
        .iter()
        .find(|t| t.name == "/content/hero/banner")
        .unwrap();
    assert_eq!(post.namespace, "site.gen");
    assert_eq!(banner.namespace, "site.gen.hero");
}

// ============================================================================
// Error Propagation Tests
// ============================================================================

#[test]
fn test_missing_reference_aborts_pass() {
    let dir = TempDir::new().unwrap();
    write_doc(
        &dir,
        "/a.json",
        r#"{"_template": "/wrapper", "x": {"_dataUrl": "/nope.json"}}"#,
    );

    let err = CastEngine::new(project_for(&dir)).cast().unwrap_err();
    assert!(matches!(err, Error::MissingDataReference { .. }));
}

#[test]
fn test_untemplated_document_aborts_pass() {
    let dir = TempDir::new().unwrap();
    write_doc(&dir, "/a.json", r#"{"title": "no template key"}"#);

    let err = CastEngine::new(project_for(&dir)).cast().unwrap_err();
    assert!(matches!(err, Error::MissingTemplate { .. }));
}

#[test]
fn test_stats_reset_between_passes() {
    let dir = TempDir::new().unwrap();
    write_doc(&dir, "/a.json", r#"{"_template": "/t", "x": "1"}"#);

    let mut engine = CastEngine::new(project_for(&dir));
    engine.cast().unwrap();
    assert_eq!(engine.stats().documents_loaded, 1);
    assert_eq!(engine.stats().templates_inferred, 1);

    write_doc(&dir, "/b.json", r#"{"_template": "/u", "y": "2"}"#);
    engine.cast().unwrap();
    assert_eq!(engine.stats().documents_loaded, 2);
    assert_eq!(engine.stats().templates_inferred, 2);
}
