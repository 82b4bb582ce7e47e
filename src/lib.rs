//! Leeway Reporter - build progress reporting
//!
//! Turns build lifecycle events into console output and fans them out to
//! any number of observers.
//!
//! ```text
//! build engine ──► CompositeReporter ──► ConsoleReporter ──► PrefixSink ──► Output
//!                        │                                 (one per unit)  (one lock)
//!                        └─────────────► RecordingReporter / custom reporters
//! ```
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`reporter`] | `Reporter` contract, console / composite / recording reporters |
//! | [`render`] | Symbols, colors and table alignment |
//! | [`output`] | Serialized output stream, per-unit prefix sinks, writer registry |
//! | [`unit`] | `BuildUnit`, `BuildStatus`, `BuildPlan` |
//! | [`config`] | Color mode and layout settings (TOML + env) |
//! | [`telemetry`] | `tracing` subscriber setup |
//!
//! ```rust
//! use std::sync::Arc;
//! use leeway_reporter::{
//!     BuildPlan, BuildStatus, BuildUnit, CompositeReporter, ConsoleReporter, LogStream,
//!     Output, Reporter, Result, TerminalRenderer,
//! };
//!
//! struct Component(&'static str);
//!
//! impl BuildUnit for Component {
//!     fn full_name(&self) -> &str { self.0 }
//!     fn version(&self) -> Result<String> { Ok("a1b2c3".into()) }
//! }
//!
//! let (out, capture) = Output::capture();
//! let reporter = CompositeReporter::default()
//!     .with(ConsoleReporter::with_renderer(out, TerminalRenderer::plain()));
//!
//! let app = Component("server:app");
//! let plan = BuildPlan::new().with(Arc::new(Component("server:app")), BuildStatus::Pending);
//!
//! reporter.build_started(&app, &plan);
//! reporter.unit_build_started(&app);
//! reporter.unit_build_log(&app, LogStream::Stdout, b"compiled\n");
//! reporter.unit_build_finished(&app, Ok(()));
//! reporter.build_finished(&app, Ok(()));
//!
//! assert!(capture.contents().contains("[server:app] compiled\n"));
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod render;
pub mod reporter;
pub mod telemetry;
pub mod unit;

pub use config::{ColorMode, ReporterConfig};
pub use error::{FixSuggestion, ReportError, Result};
pub use output::{Capture, Output, PrefixSink, WriterRegistry};
pub use render::{Render, TerminalRenderer};
pub use reporter::{
    CompositeReporter, ConsoleReporter, NoopReporter, RecordingReporter, ReportEvent, Reporter,
};
pub use telemetry::init_tracing;
pub use unit::{BuildPlan, BuildStatus, BuildUnit, LogStream, UNKNOWN_VERSION};
