//! Build units as seen by reporters
//!
//! The build graph owns the real unit type. Reporters only need a stable
//! name and a fallible version lookup, so that is all [`BuildUnit`] asks for.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::Result;

/// Rendered in place of a version that could not be computed.
pub const UNKNOWN_VERSION: &str = "unknown";

/// A named, versioned buildable thing.
pub trait BuildUnit: Send + Sync {
    /// Stable identity of the unit (e.g. `components/server:app`).
    fn full_name(&self) -> &str;

    /// Content version of the unit. Computing it may fail (dirty sources,
    /// unreadable files); reporters fall back to [`UNKNOWN_VERSION`].
    fn version(&self) -> Result<String>;
}

/// Version of `unit`, or [`UNKNOWN_VERSION`] if the lookup fails.
pub fn version_or_unknown(unit: &dyn BuildUnit) -> String {
    match unit.version() {
        Ok(version) => version,
        Err(e) => {
            tracing::debug!(unit = %unit.full_name(), error = %e, "version lookup failed");
            UNKNOWN_VERSION.to_string()
        }
    }
}

/// Cache state of a unit when the build starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStatus {
    /// Already satisfied from cache
    Built,
    /// Needs building
    Pending,
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStatus::Built => write!(f, "built"),
            BuildStatus::Pending => write!(f, "pending"),
        }
    }
}

/// Which output channel of a build command produced a log chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogStream {
    Stdout,
    Stderr,
}

impl LogStream {
    pub fn is_err(self) -> bool {
        self == LogStream::Stderr
    }
}

/// Status of every transitive unit of a build, keyed by full name.
///
/// Inserting a unit whose name is already present replaces the earlier entry,
/// so each name appears exactly once. Iteration order is unspecified.
#[derive(Clone, Default)]
pub struct BuildPlan {
    units: FxHashMap<Arc<str>, (Arc<dyn BuildUnit>, BuildStatus)>,
}

impl BuildPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `unit` with `status`, returning the status it replaced.
    pub fn insert(&mut self, unit: Arc<dyn BuildUnit>, status: BuildStatus) -> Option<BuildStatus> {
        let name: Arc<str> = Arc::from(unit.full_name());
        self.units
            .insert(name, (unit, status))
            .map(|(_, previous)| previous)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, unit: Arc<dyn BuildUnit>, status: BuildStatus) -> Self {
        self.insert(unit, status);
        self
    }

    pub fn status(&self, full_name: &str) -> Option<BuildStatus> {
        self.units.get(full_name).map(|(_, status)| *status)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&dyn BuildUnit, BuildStatus)> {
        self.units
            .values()
            .map(|(unit, status)| (unit.as_ref(), *status))
    }

    /// Number of units that must be built.
    pub fn pending(&self) -> usize {
        self.units
            .values()
            .filter(|(_, status)| *status == BuildStatus::Pending)
            .count()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl FromIterator<(Arc<dyn BuildUnit>, BuildStatus)> for BuildPlan {
    fn from_iter<I: IntoIterator<Item = (Arc<dyn BuildUnit>, BuildStatus)>>(iter: I) -> Self {
        let mut plan = BuildPlan::new();
        for (unit, status) in iter {
            plan.insert(unit, status);
        }
        plan
    }
}

impl fmt::Debug for BuildPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.units.iter().map(|(name, (_, status))| (name, status)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;

    struct Unit {
        name: &'static str,
        version: Option<&'static str>,
    }

    impl BuildUnit for Unit {
        fn full_name(&self) -> &str {
            self.name
        }

        fn version(&self) -> Result<String> {
            self.version
                .map(str::to_string)
                .ok_or_else(|| ReportError::VersionUnavailable {
                    unit: self.name.to_string(),
                    reason: "sources changed".into(),
                })
        }
    }

    fn unit(name: &'static str, version: Option<&'static str>) -> Arc<dyn BuildUnit> {
        Arc::new(Unit { name, version })
    }

    #[test]
    fn version_falls_back_to_placeholder() {
        let ok = unit("a:lib", Some("abc123"));
        let broken = unit("b:lib", None);

        assert_eq!(version_or_unknown(ok.as_ref()), "abc123");
        assert_eq!(version_or_unknown(broken.as_ref()), UNKNOWN_VERSION);
    }

    #[test]
    fn plan_keeps_one_entry_per_name() {
        let mut plan = BuildPlan::new();
        assert_eq!(plan.insert(unit("a:lib", None), BuildStatus::Pending), None);
        assert_eq!(
            plan.insert(unit("a:lib", None), BuildStatus::Built),
            Some(BuildStatus::Pending)
        );

        assert_eq!(plan.len(), 1);
        assert_eq!(plan.status("a:lib"), Some(BuildStatus::Built));
        assert_eq!(plan.pending(), 0);
    }

    #[test]
    fn plan_from_iterator() {
        let plan: BuildPlan = vec![
            (unit("a:lib", None), BuildStatus::Built),
            (unit("b:app", None), BuildStatus::Pending),
            (unit("c:app", None), BuildStatus::Pending),
        ]
        .into_iter()
        .collect();

        assert_eq!(plan.len(), 3);
        assert_eq!(plan.pending(), 2);
        assert_eq!(plan.iter().count(), 3);
        assert!(format!("{:?}", plan).contains("b:app"));
    }

    #[test]
    fn stderr_is_err() {
        assert!(LogStream::Stderr.is_err());
        assert!(!LogStream::Stdout.is_err());
    }
}
