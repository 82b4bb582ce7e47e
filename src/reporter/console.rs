//! ConsoleReporter - build progress as prefixed console output

use std::error::Error;
use std::fmt;

use tracing::{debug, trace, warn};

use super::Reporter;
use crate::config::ReporterConfig;
use crate::output::{Output, PrefixSink, WriterRegistry};
use crate::render::{Render, TerminalRenderer};
use crate::unit::{version_or_unknown, BuildPlan, BuildUnit, LogStream};

/// Reports build progress to one output stream.
///
/// Each unit in flight gets a [`PrefixSink`] that tags its lines with the
/// unit's full name. Sinks live in a [`WriterRegistry`] from the unit's first
/// event until `unit_build_finished`. Construct one reporter per build run.
pub struct ConsoleReporter<R = TerminalRenderer> {
    output: Output,
    renderer: R,
    writers: WriterRegistry,
}

impl ConsoleReporter {
    /// Reporter on process stdout with default configuration.
    pub fn stdout() -> Self {
        Self::from_config(Output::stdout(), &ReporterConfig::default())
    }

    pub fn new(output: Output) -> Self {
        Self::from_config(output, &ReporterConfig::default())
    }

    pub fn from_config(output: Output, config: &ReporterConfig) -> Self {
        Self::with_renderer(output, TerminalRenderer::new(config))
    }
}

impl<R: Render> ConsoleReporter<R> {
    pub fn with_renderer(output: Output, renderer: R) -> Self {
        Self {
            output,
            renderer,
            writers: WriterRegistry::new(),
        }
    }

    /// Number of units that currently hold a sink.
    pub fn active_units(&self) -> usize {
        self.writers.len()
    }

    fn new_sink(&self, unit: &dyn BuildUnit) -> PrefixSink {
        PrefixSink::new(
            self.output.clone(),
            self.renderer.unit_prefix(unit.full_name()),
        )
    }

    fn write(&self, buf: &[u8]) {
        if let Err(e) = self.output.write_all(buf) {
            warn!(error = %e, "failed to write build report");
        }
    }

    fn write_to(sink: &PrefixSink, unit: &dyn BuildUnit, buf: &[u8]) {
        if let Err(e) = sink.write(buf) {
            warn!(unit = %unit.full_name(), error = %e, "failed to write build output");
        }
    }
}

impl<R: Render> Reporter for ConsoleReporter<R> {
    fn build_started(&self, _root: &dyn BuildUnit, plan: &BuildPlan) {
        // the cache is warm now, so the plan says exactly what will be built
        let rows = plan
            .iter()
            .map(|(unit, status)| {
                trace!(unit = %unit.full_name(), %status, "plan entry");
                self.renderer
                    .status_row(unit.full_name(), &version_or_unknown(unit), status)
            })
            .collect::<Vec<_>>();
        if rows.is_empty() {
            return;
        }

        let table = self.renderer.status_table(rows);
        self.write(table.as_bytes());
    }

    fn build_finished(&self, _root: &dyn BuildUnit, result: Result<(), &dyn Error>) {
        self.write(self.renderer.build_finished(result).as_bytes());
    }

    fn unit_build_started(&self, unit: &dyn BuildUnit) {
        let sink = self
            .writers
            .replace(unit.full_name(), self.new_sink(unit));

        let line = self.renderer.unit_started(&version_or_unknown(unit));
        Self::write_to(&sink, unit, line.as_bytes());
    }

    fn unit_build_log(&self, unit: &dyn BuildUnit, stream: LogStream, buf: &[u8]) {
        let (sink, created) = self
            .writers
            .get_or_create(unit.full_name(), || self.new_sink(unit));
        if created {
            debug!(
                unit = %unit.full_name(),
                event = "unit_build_log",
                stderr = stream.is_err(),
                "build output arrived before the unit build started"
            );
        }

        Self::write_to(&sink, unit, buf);
    }

    fn unit_build_finished(&self, unit: &dyn BuildUnit, result: Result<(), &dyn Error>) {
        let line = self.renderer.unit_finished(result);

        match self.writers.get(unit.full_name()) {
            Some(sink) => {
                Self::write_to(&sink, unit, line.as_bytes());
                self.writers.remove(unit.full_name());
            }
            None => {
                // one-shot sink, never registered
                debug!(
                    unit = %unit.full_name(),
                    event = "unit_build_finished",
                    "build output arrived before the unit build started"
                );
                Self::write_to(&self.new_sink(unit), unit, line.as_bytes());
            }
        }
    }
}

impl<R> fmt::Debug for ConsoleReporter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleReporter")
            .field("active_units", &self.writers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ReportError, Result};
    use crate::output::Capture;
    use crate::unit::BuildStatus;
    use pretty_assertions::assert_eq;
    use std::io;
    use std::sync::Arc;

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
                    unit: self.name.into(),
                    reason: "dirty".into(),
                })
        }
    }

    const APP: Unit = Unit {
        name: "app",
        version: Some("v2"),
    };

    fn reporter() -> (ConsoleReporter, Capture) {
        let (out, capture) = Output::capture();
        (
            ConsoleReporter::with_renderer(out, TerminalRenderer::plain()),
            capture,
        )
    }

    #[test]
    fn unit_lifecycle_is_prefixed() {
        let (r, capture) = reporter();

        r.unit_build_started(&APP);
        assert_eq!(r.active_units(), 1);
        r.unit_build_log(&APP, LogStream::Stdout, b"compiling\n");
        r.unit_build_log(&APP, LogStream::Stderr, b"warning: unused\n");
        r.unit_build_finished(&APP, Ok(()));

        assert_eq!(
            capture.contents(),
            "[app] build started (version v2)\n\
             [app] compiling\n\
             [app] warning: unused\n\
             [app] package build succeeded\n"
        );
        assert_eq!(r.active_units(), 0);
    }

    #[test]
    fn failure_reason_is_prefixed_too() {
        let (r, capture) = reporter();
        let err = io::Error::other("exit status 1");

        r.unit_build_started(&APP);
        r.unit_build_finished(&APP, Err(&err));

        assert_eq!(
            capture.lines(),
            vec![
                "[app] build started (version v2)",
                "[app] package build failed",
                "[app] Reason: exit status 1",
            ]
        );
    }

    #[test]
    fn finished_without_started_still_renders() {
        let (r, capture) = reporter();
        r.unit_build_finished(&APP, Ok(()));

        assert_eq!(capture.contents(), "[app] package build succeeded\n");
        assert_eq!(r.active_units(), 0);
    }

    #[test]
    fn version_failure_renders_placeholder() {
        let (r, capture) = reporter();
        let broken = Unit {
            name: "broken",
            version: None,
        };

        r.unit_build_started(&broken);
        assert_eq!(capture.contents(), "[broken] build started (version unknown)\n");
    }

    #[test]
    fn build_started_writes_sorted_table() {
        let (r, capture) = reporter();
        let plan = BuildPlan::new()
            .with(
                Arc::new(Unit {
                    name: "lib",
                    version: Some("v1"),
                }),
                BuildStatus::Built,
            )
            .with(Arc::new(APP), BuildStatus::Pending);

        r.build_started(&APP, &plan);

        assert_eq!(
            capture.contents(),
            "📦 cached  lib  (version v1)\n\
             🔧 build   app  (version v2)\n"
        );
    }

    #[test]
    fn empty_plan_writes_nothing() {
        let (r, capture) = reporter();
        r.build_started(&APP, &BuildPlan::new());
        assert!(capture.contents().is_empty());
    }

    #[test]
    fn build_finished_summary() {
        let (r, capture) = reporter();
        let err = io::Error::other("app failed");

        r.build_finished(&APP, Ok(()));
        r.build_finished(&APP, Err(&err));

        assert_eq!(
            capture.contents(),
            "build succeeded\nbuild failed\nReason: app failed\n"
        );
    }

    #[test]
    fn started_replaces_lazy_sink() {
        let (r, capture) = reporter();

        r.unit_build_log(&APP, LogStream::Stdout, b"early\n");
        r.unit_build_started(&APP);
        assert_eq!(r.active_units(), 1);
        r.unit_build_finished(&APP, Ok(()));

        assert_eq!(
            capture.lines(),
            vec![
                "[app] early",
                "[app] build started (version v2)",
                "[app] package build succeeded",
            ]
        );
    }
}
