//! Engine types
//!
//! Statistics for a cast pass.

/// Statistics from one cast pass
#[derive(Debug, Clone, Default)]
pub struct CastStats {
    /// Documents loaded from the root directories
    pub documents_loaded: usize,
    /// Distinct template instances collected
    pub instances_collected: usize,
    /// Templates inferred after aggregation
    pub templates_inferred: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl CastStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Set loaded document count
    pub fn set_documents(&mut self, count: usize) {
        self.documents_loaded = count;
    }

    /// Set collected instance count
    pub fn set_instances(&mut self, count: usize) {
        self.instances_collected = count;
    }

    /// Set inferred template count
    pub fn set_templates(&mut self, count: usize) {
        self.templates_inferred = count;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
