//! Watch loop
//!
//! Polls the project roots for `.json` changes and reruns generation after
//! the corpus has been quiet for one debounce window. Passes are serialized:
//! a new pass starts only after the previous one completes, and every pass
//! recomputes the full corpus. Corpus errors are reported and the loop keeps
//! running; setup errors end it.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, SystemTime};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::project::ProjectDefinition;

/// Watch loop configuration
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Time between corpus scans
    pub interval: Duration,
    /// Quiet window required after a change before a pass runs
    pub debounce: Duration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            debounce: Duration::from_millis(1000),
        }
    }
}

/// Modification times of every watched document, keyed by path
type Snapshot = BTreeMap<PathBuf, SystemTime>;

/// Run `run_pass` once, then again after every settled corpus change
pub fn watch<F>(project: &ProjectDefinition, config: &WatchConfig, mut run_pass: F) -> Result<()>
where
    F: FnMut() -> Result<()>,
{
    run_settled_pass(&mut run_pass)?;
    let mut snapshot = scan(project);

    loop {
        thread::sleep(config.interval);

        let current = scan(project);
        if current == snapshot {
            continue;
        }

        debug!("Corpus change detected, waiting for writes to settle");
        snapshot = settle(project, current, config.debounce);
        run_settled_pass(&mut run_pass)?;
    }
}

/// Wait until two consecutive scans a debounce window apart agree
fn settle(project: &ProjectDefinition, mut last: Snapshot, debounce: Duration) -> Snapshot {
    loop {
        thread::sleep(debounce);
        let next = scan(project);
        if next == last {
            return next;
        }
        last = next;
    }
}

fn run_settled_pass<F>(run_pass: &mut F) -> Result<()>
where
    F: FnMut() -> Result<()>,
{
    match run_pass() {
        Ok(()) => Ok(()),
        Err(e) if e.is_corpus_error() => {
            warn!("Pass failed, waiting for the next change: {e}");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Snapshot the modification times of every `.json` document under the roots
fn scan(project: &ProjectDefinition) -> Snapshot {
    let mut snapshot = Snapshot::new();
    for root in &project.roots {
        let entries = WalkDir::new(root)
            .into_iter()
            .filter_map(std::result::Result::ok);
        for entry in entries {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let ignored = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| project.ignore.iter().any(|i| i == name));
            if ignored {
                continue;
            }
            if let Some(modified) = entry.metadata().ok().and_then(|m| m.modified().ok()) {
                snapshot.insert(path.to_path_buf(), modified);
            }
        }
    }
    snapshot
}
