//! Error types with fix suggestions
//!
//! Error code ranges:
//! - LEEWAY-010-019: Configuration errors
//! - LEEWAY-020-029: Build unit errors
//! - LEEWAY-030-039: Telemetry errors
//!
//! Reporters never return these to the build engine. They surface from
//! setup code (config loading, tracing init) and from `BuildUnit::version`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum ReportError {
    // ─────────────────────────────────────────────────────────────
    // Configuration (LEEWAY-010 to LEEWAY-012)
    // ─────────────────────────────────────────────────────────────
    #[error("LEEWAY-010: Failed to read config '{path}': {reason}")]
    ConfigRead { path: String, reason: String },

    #[error("LEEWAY-011: Failed to parse config: {reason}")]
    ConfigParse { reason: String },

    #[error("LEEWAY-012: Invalid color mode '{value}' (expected auto, always or never)")]
    InvalidColorMode { value: String },

    // ─────────────────────────────────────────────────────────────
    // Build units (LEEWAY-020)
    // ─────────────────────────────────────────────────────────────
    #[error("LEEWAY-020: Version of '{unit}' unavailable: {reason}")]
    VersionUnavailable { unit: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Telemetry (LEEWAY-030)
    // ─────────────────────────────────────────────────────────────
    #[error("LEEWAY-030: Failed to initialize tracing: {reason}")]
    Telemetry { reason: String },
}

impl ReportError {
    /// Error code (e.g. "LEEWAY-010")
    pub fn code(&self) -> &'static str {
        match self {
            ReportError::ConfigRead { .. } => "LEEWAY-010",
            ReportError::ConfigParse { .. } => "LEEWAY-011",
            ReportError::InvalidColorMode { .. } => "LEEWAY-012",
            ReportError::VersionUnavailable { .. } => "LEEWAY-020",
            ReportError::Telemetry { .. } => "LEEWAY-030",
        }
    }
}

impl FixSuggestion for ReportError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ReportError::ConfigRead { .. } => Some("Check file path and permissions"),
            ReportError::ConfigParse { .. } => Some("Check TOML syntax and field names"),
            ReportError::InvalidColorMode { .. } => {
                Some("Use one of: auto, always, never (LEEWAY_COLOR or config file)")
            }
            ReportError::VersionUnavailable { .. } => None,
            ReportError::Telemetry { .. } => {
                Some("Initialize tracing once per process, before building")
            }
        }
    }
}
