//! RecordingReporter - in-memory event trail
//!
//! Captures every event as an owned [`ReportEvent`] in arrival order, so
//! callers can inspect a run after the fact or assert on it in tests.

use std::error::Error;
use std::sync::Arc;

use parking_lot::RwLock;

use super::Reporter;
use crate::unit::{BuildPlan, BuildStatus, BuildUnit, LogStream};

/// Owned copy of one reporter call.
///
/// Unit names are `Arc<str>` so clones stay cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    BuildStarted {
        root: Arc<str>,
        /// Sorted by unit name
        plan: Vec<(Arc<str>, BuildStatus)>,
    },
    BuildFinished {
        root: Arc<str>,
        error: Option<String>,
    },
    UnitBuildStarted {
        unit: Arc<str>,
    },
    UnitBuildLog {
        unit: Arc<str>,
        stream: LogStream,
        data: Vec<u8>,
    },
    UnitBuildFinished {
        unit: Arc<str>,
        error: Option<String>,
    },
}

impl ReportEvent {
    /// Unit the event is about; the root unit for build-level events.
    pub fn unit(&self) -> &str {
        match self {
            Self::BuildStarted { root, .. } | Self::BuildFinished { root, .. } => root,
            Self::UnitBuildStarted { unit }
            | Self::UnitBuildLog { unit, .. }
            | Self::UnitBuildFinished { unit, .. } => unit,
        }
    }

    pub fn is_build_event(&self) -> bool {
        matches!(
            self,
            Self::BuildStarted { .. } | Self::BuildFinished { .. }
        )
    }
}

/// Thread-safe, append-only record of reporter calls.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: RwLock<Vec<ReportEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events so far (cloned)
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.read().clone()
    }

    /// Events concerning one unit, in order
    pub fn filter_unit(&self, name: &str) -> Vec<ReportEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| !e.is_build_event() && e.unit() == name)
            .cloned()
            .collect()
    }

    /// Concatenated log output of one unit
    pub fn unit_output(&self, name: &str) -> Vec<u8> {
        self.events
            .read()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::UnitBuildLog { unit, data, .. } if &**unit == name => {
                    Some(data.as_slice())
                }
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    pub fn clear(&self) {
        self.events.write().clear();
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, event: ReportEvent) {
        self.events.write().push(event);
    }
}

fn name_of(unit: &dyn BuildUnit) -> Arc<str> {
    Arc::from(unit.full_name())
}

fn error_text(result: Result<(), &dyn Error>) -> Option<String> {
    result.err().map(|e| e.to_string())
}

impl Reporter for RecordingReporter {
    fn build_started(&self, root: &dyn BuildUnit, plan: &BuildPlan) {
        let mut entries: Vec<_> = plan
            .iter()
            .map(|(unit, status)| (name_of(unit), status))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        self.push(ReportEvent::BuildStarted {
            root: name_of(root),
            plan: entries,
        });
    }

    fn build_finished(&self, root: &dyn BuildUnit, result: Result<(), &dyn Error>) {
        self.push(ReportEvent::BuildFinished {
            root: name_of(root),
            error: error_text(result),
        });
    }

    fn unit_build_started(&self, unit: &dyn BuildUnit) {
        self.push(ReportEvent::UnitBuildStarted {
            unit: name_of(unit),
        });
    }

    fn unit_build_log(&self, unit: &dyn BuildUnit, stream: LogStream, buf: &[u8]) {
        self.push(ReportEvent::UnitBuildLog {
            unit: name_of(unit),
            stream,
            data: buf.to_vec(),
        });
    }

    fn unit_build_finished(&self, unit: &dyn BuildUnit, result: Result<(), &dyn Error>) {
        self.push(ReportEvent::UnitBuildFinished {
            unit: name_of(unit),
            error: error_text(result),
        });
    }
}
