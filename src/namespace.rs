//! Namespace derivation from template name prefixes
//!
//! Template names are path-like identifiers such as `/blog/post/article`.
//! Generated bindings should not mirror the full authored directory depth:
//! the segments every template shares say nothing about any one of them.
//! Each template's namespace therefore keeps only the segments below the
//! corpus-wide common prefix, re-rooted under a configurable prefix.

use std::collections::BTreeMap;

use tracing::debug;

/// Derives a namespace for every template name.
///
/// The longest common segment prefix across all names is dropped, as is each
/// name's final segment. Whatever remains is appended to `root_prefix` with
/// `.` separators, so `/blog/post/article` alongside `/blog/author` becomes
/// `<root>.post` while `/blog/author` becomes `<root>` alone.
pub fn derive_namespaces<'a, I>(template_names: I, root_prefix: &str) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = template_names.into_iter().collect();
    let paths: Vec<Vec<&str>> = names.iter().map(|name| segments(name)).collect();
    let shared = common_prefix_len(&paths);

    let mut namespaces = BTreeMap::new();
    for (name, path) in names.iter().zip(&paths) {
        let end = path.len().saturating_sub(1);
        let start = shared.min(end);
        namespaces.insert(
            (*name).to_string(),
            join_namespace(root_prefix, &path[start..end]),
        );
    }

    debug!(
        "Derived namespaces for {} templates with shared prefix depth {}",
        names.len(),
        shared
    );
    namespaces
}

fn segments(name: &str) -> Vec<&str> {
    name.split('/').filter(|segment| !segment.is_empty()).collect()
}

fn common_prefix_len(paths: &[Vec<&str>]) -> usize {
    let Some(first) = paths.first() else {
        return 0;
    };
    let mut shared = first.len();
    for path in &paths[1..] {
        let matching = first
            .iter()
            .zip(path.iter())
            .take_while(|(a, b)| a == b)
            .count();
        shared = shared.min(matching);
    }
    shared
}

fn join_namespace(root_prefix: &str, middle: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if !root_prefix.is_empty() {
        parts.push(root_prefix);
    }
    parts.extend_from_slice(middle);
    parts.join(".")
}
