//! CompositeReporter - ordered fan-out over several reporters
//!
//! ```text
//!    build engine
//!        │
//!        ▼
//!   CompositeReporter ──► child[0] ──► child[1] ──► ... ──► child[n-1]
//!                          (same call, same thread, in list order)
//! ```
//!
//! Unlike a queued event bus, forwarding is synchronous: a call returns only
//! after every child has handled it. There is no panic isolation; a child
//! that panics unwinds through the caller.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use super::Reporter;
use crate::unit::{BuildPlan, BuildUnit, LogStream};

/// Forwards every event to each child, in order.
#[derive(Clone, Default)]
pub struct CompositeReporter {
    children: Vec<Arc<dyn Reporter>>,
}

impl CompositeReporter {
    #[must_use]
    pub fn new(children: Vec<Arc<dyn Reporter>>) -> Self {
        Self { children }
    }

    /// Append `child` after the existing children.
    #[must_use]
    pub fn with<R: Reporter + 'static>(mut self, child: R) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    pub fn children(&self) -> &[Arc<dyn Reporter>] {
        &self.children
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl FromIterator<Arc<dyn Reporter>> for CompositeReporter {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Reporter>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Reporter for CompositeReporter {
    fn build_started(&self, root: &dyn BuildUnit, plan: &BuildPlan) {
        for r in &self.children {
            r.build_started(root, plan);
        }
    }

    fn build_finished(&self, root: &dyn BuildUnit, result: Result<(), &dyn Error>) {
        for r in &self.children {
            r.build_finished(root, result);
        }
    }

    fn unit_build_started(&self, unit: &dyn BuildUnit) {
        for r in &self.children {
            r.unit_build_started(unit);
        }
    }

    fn unit_build_log(&self, unit: &dyn BuildUnit, stream: LogStream, buf: &[u8]) {
        for r in &self.children {
            r.unit_build_log(unit, stream, buf);
        }
    }

    fn unit_build_finished(&self, unit: &dyn BuildUnit, result: Result<(), &dyn Error>) {
        for r in &self.children {
            r.unit_build_finished(unit, result);
        }
    }
}

impl fmt::Debug for CompositeReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeReporter")
            .field("children", &self.children.len())
            .finish()
    }
}
