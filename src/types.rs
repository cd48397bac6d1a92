use serde::Serialize;
use std::collections::HashMap;

/// Snapshot of a DB instance as reported by the inventory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbInstanceDescriptor {
    pub identifier: String,
    pub status: String,
    pub tags: HashMap<String, String>,
    pub engine: Option<String>,
    pub instance_class: Option<String>,
}

impl DbInstanceDescriptor {
    pub fn new(identifier: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            status: status.into(),
            tags: HashMap::new(),
            engine: None,
            instance_class: None,
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// Outcome of a successful sweep
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    pub region: String,
    pub dry_run: bool,
    pub total_scanned: usize,
    pub eligible: Vec<String>,
    pub stopped: Vec<String>,
    pub duration_seconds: f64,
}

impl SweepReport {
    pub fn skipped_count(&self) -> usize {
        self.total_scanned.saturating_sub(self.eligible.len())
    }
}
