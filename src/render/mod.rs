//! TypeScript binding renderer
//!
//! Turns aggregated templates into TypeScript interface declarations, one
//! file per template. Rendering is a pure function of the template set;
//! only `write_bindings` touches the filesystem.

mod types;

pub use types::{Binding, RenderOptions};


use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::aggregate::{EffectiveType, FieldDefinition, Template};
use crate::error::{Error, Result};

const TAB: &str = "  ";

/// Renders a set of templates into TypeScript bindings
pub struct Renderer<'a> {
    templates: &'a [Template],
    options: RenderOptions,
    by_name: BTreeMap<&'a str, &'a Template>,
}

impl<'a> Renderer<'a> {
    /// Create a renderer over the full template set
    ///
    /// The whole set is needed even when rendering one template, because
    /// referenced types import from the file their own template renders to.
    pub fn new(templates: &'a [Template], options: RenderOptions) -> Self {
        let by_name = templates
            .iter()
            .map(|template| (template.name.as_str(), template))
            .collect();
        Self {
            templates,
            options,
            by_name,
        }
    }

    /// Render every template, checking for identifier collisions
    pub fn render_all(&self) -> Result<Vec<Binding>> {
        let mut seen: BTreeMap<PathBuf, &str> = BTreeMap::new();
        let mut bindings = Vec::with_capacity(self.templates.len());

        for template in self.templates {
            let relative_path = self.binding_path(template);
            if let Some(previous) = seen.insert(relative_path.clone(), &template.name) {
                return Err(Error::render(format!(
                    "Templates '{previous}' and '{}' both generate '{}'",
                    template.name,
                    relative_path.display()
                )));
            }
            bindings.push(Binding {
                template: template.name.clone(),
                relative_path,
                source: self.render(template)?,
            });
        }
        Ok(bindings)
    }

    /// Render one template to TypeScript source text
    pub fn render(&self, template: &Template) -> Result<String> {
        let mut out = String::from("// Generated by shapecast. Do not edit.\n");

        let imports = self.imports(template)?;
        if !imports.is_empty() {
            out.push('\n');
            for import in imports {
                out.push_str(&import);
                out.push('\n');
            }
        }

        out.push('\n');
        if !template.notes.is_empty() {
            out.push_str(&format_doc_comment(&template.notes, ""));
        }
        out.push_str(&format!(
            "export interface {} {{\n",
            self.identifier(&template.name)
        ));
        for field in &template.fields {
            out.push_str(&self.member(field)?);
        }
        out.push_str("}\n");
        Ok(out)
    }

    /// The path a template's binding is written to, relative to the
    /// output directory
    pub fn binding_path(&self, template: &Template) -> PathBuf {
        let mut path: PathBuf = namespace_dirs(&template.namespace).iter().collect();
        path.push(format!("{}.ts", self.identifier(&template.name)));
        path
    }

    fn identifier(&self, template_name: &str) -> String {
        type_identifier(template_name, self.options.type_prefix.as_deref())
    }

    fn member(&self, field: &FieldDefinition) -> Result<String> {
        let mut out = String::new();
        if !field.notes.is_empty() {
            out.push_str(&format_doc_comment(&field.notes, TAB));
        }
        out.push_str(&format!(
            "{TAB}{}: {};\n",
            normalize_key(&field.name),
            self.type_text(&field.effective_type)?
        ));
        Ok(out)
    }

    fn type_text(&self, effective: &EffectiveType) -> Result<String> {
        match effective {
            EffectiveType::Boolean => Ok("boolean".to_string()),
            EffectiveType::String => Ok("string".to_string()),
            EffectiveType::Number => Ok("number".to_string()),
            EffectiveType::StringMap => Ok("Record<string, string>".to_string()),
            EffectiveType::TemplateObject(names) => {
                let idents: Vec<String> =
                    names.iter().map(|name| self.identifier(name)).collect();
                Ok(idents.join(" | "))
            }
            EffectiveType::List(None) => Ok("unknown[]".to_string()),
            EffectiveType::List(Some(item)) => {
                let inner = self.type_text(item)?;
                if matches!(**item, EffectiveType::TemplateObject(ref names) if names.len() > 1) {
                    Ok(format!("Array<{inner}>"))
                } else {
                    Ok(format!("{inner}[]"))
                }
            }
        }
    }

    /// Import lines for every referenced type outside this template's file
    fn imports(&self, template: &Template) -> Result<Vec<String>> {
        let mut referenced = BTreeSet::new();
        for field in &template.fields {
            referenced.extend(field.effective_type.referenced_templates());
        }

        let from = namespace_dirs(&template.namespace);
        let mut lines = BTreeSet::new();
        let mut imported: BTreeMap<String, String> = BTreeMap::new();
        for name in referenced {
            if name == template.name {
                continue;
            }
            let target = self.by_name.get(name.as_str()).ok_or_else(|| {
                Error::render(format!(
                    "Template '{}' references unknown template '{name}'",
                    template.name
                ))
            })?;
            let identifier = self.identifier(&target.name);
            if let Some(previous) = imported.insert(identifier.clone(), name.clone()) {
                return Err(Error::render(format!(
                    "Templates '{previous}' and '{name}' both map to type '{identifier}' \
                     imported by '{}'",
                    template.name
                )));
            }
            let to = namespace_dirs(&target.namespace);
            lines.insert(format!(
                "import type {{ {identifier} }} from \"{}\";",
                import_path(&from, &to, &identifier)
            ));
        }
        Ok(lines.into_iter().collect())
    }
}

/// Write rendered bindings under `output_dir`, returning the written paths
pub fn write_bindings(bindings: &[Binding], output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(bindings.len());
    for binding in bindings {
        let path = output_dir.join(&binding.relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &binding.source)?;
        debug!("Wrote binding for '{}' to {}", binding.template, path.display());
        written.push(path);
    }
    Ok(written)
}

/// The TypeScript identifier generated for a template name
///
/// The final path segment is taken, any `.json` suffix stripped, and the
/// rest converted to PascalCase with the configured prefix prepended.
pub fn type_identifier(template_name: &str, prefix: Option<&str>) -> String {
    let last = template_name
        .rsplit('/')
        .next()
        .unwrap_or(template_name);
    let base = last.strip_suffix(".json").unwrap_or(last);
    let pascal = to_pascal_case(base);
    match prefix {
        Some(prefix) => format!("{prefix}{pascal}"),
        None => pascal,
    }
}

fn to_pascal_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut upper_next = true;
    for c in value.chars() {
        if c.is_alphanumeric() {
            if upper_next {
                out.extend(c.to_uppercase());
                upper_next = false;
            } else {
                out.push(c);
            }
        } else {
            upper_next = true;
        }
    }
    out
}

fn namespace_dirs(namespace: &str) -> Vec<&str> {
    namespace.split('.').filter(|part| !part.is_empty()).collect()
}

/// Relative module path from a file in `from` to `identifier` in `to`
fn import_path(from: &[&str], to: &[&str], identifier: &str) -> String {
    let common = from.iter().zip(to).take_while(|(a, b)| a == b).count();
    let ups = from.len() - common;

    let mut parts: Vec<String> = Vec::new();
    if ups == 0 {
        parts.push(".".to_string());
    } else {
        parts.extend(std::iter::repeat("..".to_string()).take(ups));
    }
    parts.extend(to[common..].iter().map(ToString::to_string));
    parts.push(identifier.to_string());
    parts.join("/")
}

fn format_doc_comment(notes: &BTreeSet<String>, indent: &str) -> String {
    let mut out = format!("{indent}/**\n");
    for note in notes {
        for line in note.lines() {
            out.push_str(&format!("{indent} * {line}\n"));
        }
    }
    out.push_str(&format!("{indent} */\n"));
    out
}

fn needs_quotes(name: &str) -> bool {
    name.is_empty()
        || name
            .chars()
            .any(|c| !c.is_alphanumeric() && c != '_' && c != '$')
        || name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
}

fn normalize_key(name: &str) -> String {
    if needs_quotes(name) {
        format!("\"{}\"", name.replace('"', "\\\""))
    } else {
        name.to_string()
    }
}
