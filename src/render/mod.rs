//! Terminal rendering rules
//!
//! [`Render`] turns reporter events into text; it holds no state about the
//! build. [`TerminalRenderer`] is the `colored` implementation used by
//! [`ConsoleReporter`](crate::reporter::ConsoleReporter).

mod table;

pub use table::{render_table, Cell, StatusRow};

use std::error::Error;

use colored::control::SHOULD_COLORIZE;
use colored::Color;

use crate::config::{ColorMode, ReporterConfig};
use crate::unit::BuildStatus;

/// Formatting interface for console reporters.
///
/// Every returned string that represents whole lines ends with `\n`.
pub trait Render: Send + Sync {
    /// One status table row for a unit of the build plan.
    fn status_row(&self, name: &str, version: &str, status: BuildStatus) -> StatusRow;

    /// Sort and align status rows.
    fn status_table(&self, rows: Vec<StatusRow>) -> String {
        render_table(rows, 2)
    }

    /// Prefix placed before every line of a unit's output.
    fn unit_prefix(&self, name: &str) -> String;

    fn unit_started(&self, version: &str) -> String;

    fn unit_finished(&self, result: Result<(), &dyn Error>) -> String;

    fn build_finished(&self, result: Result<(), &dyn Error>) -> String;
}

#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    color: bool,
    icons: bool,
    padding: usize,
}

impl TerminalRenderer {
    /// Resolves `color` once; `Auto` asks colored's terminal/env detection.
    /// Never touches colored's process-wide override.
    pub fn new(config: &ReporterConfig) -> Self {
        let color = match config.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => SHOULD_COLORIZE.should_colorize(),
        };
        Self {
            color,
            icons: config.icons,
            padding: config.column_padding,
        }
    }

    /// Renderer that never emits ANSI escapes.
    pub fn plain() -> Self {
        Self::new(&ReporterConfig {
            color: ColorMode::Never,
            ..ReporterConfig::default()
        })
    }

    fn paint(&self, text: &str, color: Color) -> String {
        // ColoredString consults the global switch, so frame the code here
        if self.color {
            format!("\x1b[{}m{text}\x1b[0m", color.to_fg_str())
        } else {
            text.to_string()
        }
    }

    fn gray(&self, text: &str) -> String {
        self.paint(text, Color::BrightBlack)
    }

    fn summary(&self, subject: &str, result: Result<(), &dyn Error>) -> String {
        match result {
            Ok(()) => format!("{}\n", self.paint(&format!("{subject} succeeded"), Color::Green)),
            Err(e) => format!(
                "{}\n{} {}\n",
                self.paint(&format!("{subject} failed"), Color::Red),
                self.paint("Reason:", Color::White),
                e
            ),
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(&ReporterConfig::default())
    }
}

impl Render for TerminalRenderer {
    fn status_row(&self, name: &str, version: &str, status: BuildStatus) -> StatusRow {
        let (icon, label, color) = match status {
            BuildStatus::Built => ("📦", "cached", Color::Green),
            BuildStatus::Pending => ("🔧", "build", Color::Yellow),
        };
        let tag = if self.icons {
            format!("{icon} {label}")
        } else {
            label.to_string()
        };
        let version = format!("(version {version})");

        StatusRow::new(vec![
            Cell::styled(tag.clone(), self.paint(&tag, color)),
            Cell::plain(name),
            Cell::styled(version.clone(), self.gray(&version)),
        ])
    }

    fn status_table(&self, rows: Vec<StatusRow>) -> String {
        render_table(rows, self.padding)
    }

    fn unit_prefix(&self, name: &str) -> String {
        self.gray(&format!("[{name}] "))
    }

    fn unit_started(&self, version: &str) -> String {
        format!(
            "{} {}\n",
            self.paint("build started", Color::Yellow),
            self.gray(&format!("(version {version})"))
        )
    }

    fn unit_finished(&self, result: Result<(), &dyn Error>) -> String {
        self.summary("package build", result)
    }

    fn build_finished(&self, result: Result<(), &dyn Error>) -> String {
        self.summary("build", result)
    }
}
