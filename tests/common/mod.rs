//! Test fixtures and helpers

#![allow(dead_code)]

use std::sync::Arc;

use leeway_reporter::{
    BuildPlan, BuildStatus, BuildUnit, Capture, ConsoleReporter, Output, ReportError, Result,
    TerminalRenderer,
};

/// Build unit with a fixed name and an optional version.
#[derive(Debug, Clone)]
pub struct TestUnit {
    name: String,
    version: Option<String>,
}

impl TestUnit {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: Some(version.to_string()),
        }
    }

    /// Unit whose version lookup always fails.
    pub fn unversioned(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: None,
        }
    }

    pub fn shared(self) -> Arc<dyn BuildUnit> {
        Arc::new(self)
    }
}

impl BuildUnit for TestUnit {
    fn full_name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> Result<String> {
        self.version
            .clone()
            .ok_or_else(|| ReportError::VersionUnavailable {
                unit: self.name.clone(),
                reason: "sources are dirty".into(),
            })
    }
}

/// Console reporter without colors, writing to memory.
pub fn plain_console() -> (ConsoleReporter, Capture) {
    let (out, capture) = Output::capture();
    (
        ConsoleReporter::with_renderer(out, TerminalRenderer::plain()),
        capture,
    )
}

pub fn plan(entries: &[(&TestUnit, BuildStatus)]) -> BuildPlan {
    entries
        .iter()
        .map(|(unit, status)| ((*unit).clone().shared(), *status))
        .collect()
}
