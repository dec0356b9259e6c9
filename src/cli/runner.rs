//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::cli::watch::{watch, WatchConfig};
use crate::engine::CastEngine;
use crate::error::Result;
use crate::project::{load_project, ProjectDefinition, DEFAULT_PROJECT_FILE};
use crate::render::{write_bindings, RenderOptions, Renderer};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Generate { out } => self.generate(out.as_deref()),
            Commands::Templates => self.templates(),
            Commands::Validate => self.validate(),
            Commands::Watch {
                interval_ms,
                debounce_ms,
            } => self.watch(*interval_ms, *debounce_ms),
        }
    }

    /// Load the project definition
    fn load_project(&self) -> Result<ProjectDefinition> {
        let path = self
            .cli
            .project
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_FILE));
        load_project(path)
    }

    /// Generate bindings
    fn generate(&self, out: Option<&Path>) -> Result<()> {
        let project = self.load_project()?;
        let output_dir = out
            .map(Path::to_path_buf)
            .unwrap_or_else(|| project.output_dir.clone());

        self.generate_pass(project, &output_dir)
    }

    /// Run one cast-render-write pass and emit its summary
    fn generate_pass(&self, project: ProjectDefinition, output_dir: &Path) -> Result<()> {
        let type_prefix = project.type_prefix.clone();
        let mut engine = CastEngine::new(project);
        let templates = engine.cast()?;

        let renderer = Renderer::new(
            &templates,
            RenderOptions::new().with_type_prefix(type_prefix),
        );
        let bindings = renderer.render_all()?;
        let written = write_bindings(&bindings, output_dir)?;

        let stats = engine.stats();
        self.output_message(&json!({
            "type": "GENERATE_SUMMARY",
            "summary": {
                "status": "SUCCEEDED",
                "project": engine.project().name,
                "documents_loaded": stats.documents_loaded,
                "instances_collected": stats.instances_collected,
                "templates_inferred": stats.templates_inferred,
                "files_written": written.len(),
                "output_dir": output_dir.display().to_string(),
                "duration_ms": stats.duration_ms
            }
        }));

        Ok(())
    }

    /// Show aggregated templates
    fn templates(&self) -> Result<()> {
        let project = self.load_project()?;
        let mut engine = CastEngine::new(project);
        let templates = engine.cast()?;

        self.output_message(&json!({
            "type": "TEMPLATES",
            "project": engine.project().name,
            "count": templates.len(),
            "templates": templates
        }));

        Ok(())
    }

    /// Validate the corpus without writing anything
    fn validate(&self) -> Result<()> {
        let project = self.load_project()?;
        let mut engine = CastEngine::new(project);
        let templates = engine.cast()?;

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Project '{}' is valid: {} templates from {} documents",
                    engine.project().name,
                    templates.len(),
                    engine.stats().documents_loaded
                )
            }
        }));

        Ok(())
    }

    /// Watch the corpus and regenerate on change
    fn watch(&self, interval_ms: u64, debounce_ms: u64) -> Result<()> {
        let project = self.load_project()?;
        let config = WatchConfig {
            interval: Duration::from_millis(interval_ms),
            debounce: Duration::from_millis(debounce_ms),
        };

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Watching {} root(s) of project '{}' (poll {}ms, debounce {}ms)",
                    project.roots.len(),
                    project.name,
                    interval_ms,
                    debounce_ms
                )
            }
        }));

        let output_dir = project.output_dir.clone();
        let watched = project.clone();
        watch(&watched, &config, || {
            self.generate_pass(project.clone(), &output_dir)
        })
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
