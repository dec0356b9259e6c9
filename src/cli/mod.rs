//! CLI module
//!
//! Command-line interface for running shape inference passes.
//!
//! # Commands
//!
//! - `generate` - Infer templates and write TypeScript bindings
//! - `templates` - Print the inferred templates as JSON
//! - `validate` - Load the project and run a pass without writing files
//! - `watch` - Re-run `generate` whenever the corpus changes

mod commands;
mod runner;
mod watch;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
pub use watch::{watch, WatchConfig};
