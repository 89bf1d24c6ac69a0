//! Configuration error and diagnostic types.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// ConfigError
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read routing config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("routing config is not valid TOML")]
    Toml(#[from] toml::de::Error),

    #[error("routing config error: {0}")]
    Validation(String),

    // No #[from]: the report already lists every problem, a source() would repeat it
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

// ============================================================================
// ConfigDiagnostic
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One problem found in `routing.toml`.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub severity: Severity,
    /// e.g. `sites[0].l10n.default_locale`
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

impl ConfigDiagnostic {
    pub fn new(severity: Severity, field: FieldPath, message: impl Into<String>) -> Self {
        Self {
            severity,
            field,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "{}", "error".red().bold())?,
            Severity::Warning => write!(f, "{}", "warning".yellow().bold())?,
        }
        write!(f, " {}: {}", self.field.as_str().cyan(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n    {} {}", "= hint:".dimmed(), hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// ConfigDiagnostics
// ============================================================================

/// Every problem found by one validation pass, errors and warnings apart.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
    warnings: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.errors
            .push(ConfigDiagnostic::new(Severity::Error, field, message));
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors
            .push(ConfigDiagnostic::new(Severity::Error, field, message).with_hint(hint));
    }

    /// Record something legal but probably unintended.
    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.warnings
            .push(ConfigDiagnostic::new(Severity::Warning, field, message));
    }

    pub fn print_warnings(&self) {
        if self.warnings.is_empty() {
            return;
        }
        crate::log!("warning"; "{} suspicious value{} in routing config:",
            self.warnings.len(), if self.warnings.len() == 1 { "" } else { "s" });
        for warning in &self.warnings {
            eprintln!("  {warning}");
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of errors. Warnings are not counted.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ConfigDiagnostic] {
        &self.warnings
    }

    /// `Err(self)` when any error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.errors.len();
        write!(
            f,
            "{} ({} error{})",
            "invalid routing config".red().bold(),
            count,
            if count == 1 { "" } else { "s" }
        )?;
        for error in &self.errors {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Io(
            PathBuf::from("routing.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        assert!(err.to_string().contains("routing.toml"));

        let err = ConfigError::Validation("config file 'x.toml' not found".to_string());
        assert!(err.to_string().contains("x.toml"));
    }

    #[test]
    fn test_diagnostics_separates_errors_and_warnings() {
        let mut diag = ConfigDiagnostics::new();
        assert!(diag.is_empty());

        diag.error(FieldPath::new("sites"), "at least one site is required");
        diag.error_with_hint(
            FieldPath::new("default_site"),
            "unknown site `Nope`",
            "use one of the configured site ids",
        );
        diag.warn(FieldPath::site(0, "alias"), "alias equals id");

        assert!(diag.has_errors());
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].severity, Severity::Warning);
        assert_eq!(diag.errors()[1].hint.as_deref(), Some("use one of the configured site ids"));

        let display = diag.into_result().unwrap_err().to_string();
        assert!(display.contains("2 errors"));
        assert!(display.contains("default_site"));
        assert!(display.contains("unknown site `Nope`"));
    }

    #[test]
    fn test_warnings_alone_are_ok() {
        let mut diag = ConfigDiagnostics::new();
        diag.warn(FieldPath::new("url"), "never encoded");
        assert!(diag.into_result().is_ok());
    }
}
