//! Reporter Configuration
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. Environment variables (`NO_COLOR`, `LEEWAY_COLOR`)
//! 2. Config file (TOML, see [`ReporterConfig::load`])
//! 3. Defaults
//!
//! ```toml
//! color = "never"
//! column_padding = 4
//! icons = false
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Environment variable selecting the color mode.
pub const COLOR_ENV: &str = "LEEWAY_COLOR";

/// When to emit ANSI styling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Let `colored` decide from the terminal and `CLICOLOR*` variables
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(ReportError::InvalidColorMode {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Auto => write!(f, "auto"),
            ColorMode::Always => write!(f, "always"),
            ColorMode::Never => write!(f, "never"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReporterConfig {
    pub color: ColorMode,

    /// Spaces between status table columns
    pub column_padding: usize,

    /// Show emoji in status tags
    pub icons: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            column_padding: 2,
            icons: true,
        }
    }
}

impl ReporterConfig {
    /// Parse from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ReportError::ConfigParse {
            reason: e.to_string(),
        })
    }

    /// Load configuration from file
    ///
    /// Returns default config if file doesn't exist.
    /// Returns error if file exists but is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ReportError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Merge with environment variables
    ///
    /// `NO_COLOR` (any non-empty value) wins over `LEEWAY_COLOR`.
    pub fn with_env(self) -> Result<Self> {
        self.with_vars(|key| std::env::var(key).ok())
    }

    fn with_vars<F>(mut self, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = var(COLOR_ENV) {
            self.color = mode.parse()?;
        }
        if var("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.color = ColorMode::Never;
        }
        Ok(self)
    }
}
