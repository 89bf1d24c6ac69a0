//! Routing configuration management for `routing.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── navigation # [navigation]
//! │   ├── site       # [[sites]]
//! │   └── url        # [url]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # RoutingConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section            | Purpose                                          |
//! |--------------------|--------------------------------------------------|
//! | `default_site`     | Site used when a URL names none                  |
//! | `[url]`            | Path / query / none placement, `show_defaults`   |
//! | `[navigation]`     | Parameters kept across navigations               |
//! | `[[sites]]`        | Site roster, each with `[sites.l10n]`            |
//!
//! The loaded value is handed to [`RoutingEngine::new`](crate::routing::RoutingEngine::new)
//! once at startup; nothing in this crate keeps it in a global.

pub mod section;
pub mod types;
mod util;

pub use util::{find_config_file, find_config_file_from};

// Re-export from section/
pub use section::{
    L10nConfig, Locale, NavigationConfig, Referenced, Site, UrlEncodingConfig, UrlPartPosition,
};

// Re-export from types/
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath, Severity};

use crate::log;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Default config file name, searched upward from the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "routing.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing routing.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Id of the default site. Required when more than one site exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_site: Option<String>,

    /// Site/locale URL encoding policy
    pub url: UrlEncodingConfig,

    /// Navigation helper settings
    pub navigation: NavigationConfig,

    /// Site roster
    pub sites: Vec<Site>,
}

impl RoutingConfig {
    /// Search upward from cwd for `config_name` and load it.
    pub fn discover(config_name: &Path) -> Result<Self> {
        Self::load(&Self::locate(config_name)?)
    }

    /// Search upward from cwd for `config_name`.
    pub fn locate(config_name: &Path) -> Result<PathBuf> {
        match find_config_file(config_name) {
            Some(path) => Ok(path),
            None => bail!(ConfigError::Validation(format!(
                "config file '{}' not found in the current directory or any parent",
                config_name.display()
            ))),
        }
    }

    /// Load and validate configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a file path without validating it.
    ///
    /// Unknown fields are reported as warnings and otherwise ignored.
    pub fn read(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Run every check and return the collected diagnostics.
    pub fn diagnostics(&self) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        section::validate_sites(&self.sites, self.default_site.as_deref(), &mut diag);
        self.navigation.validate(&mut diag);

        if self.url.is_disabled() && self.sites.len() > 1 {
            diag.warn(
                FieldPath::new("url"),
                "site and locale are never encoded, so only the default site is reachable by URL",
            );
        }
        diag
    }

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let diag = self.diagnostics();

        // Print collected warnings (grouped display)
        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Look up a site by canonical id.
    pub fn site(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|site| site.id == id)
    }
}

impl FromStr for RoutingConfig {
    type Err = ConfigError;

    /// Parse configuration from a TOML string (no validation).
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Two-site roster used across the crate's tests.
#[cfg(test)]
pub const TEST_SITES: &str = r#"
default_site = "RefArchGlobal"

[[sites]]
id = "RefArch"
alias = "us"

[sites.l10n]
default_locale = "en-US"
supported_locales = [{ id = "en-US" }, { id = "en-CA", alias = "ca" }]

[[sites]]
id = "RefArchGlobal"
alias = "uk"

[sites.l10n]
default_locale = "en-GB"
supported_locales = [
    { id = "en-GB" },
    { id = "fr-FR", alias = "fr" },
    { id = "it-IT" },
    { id = "de-DE", alias = "de" },
]
"#;

/// Parse the test roster with the given `[url]` policy.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_config(
    site: UrlPartPosition,
    locale: UrlPartPosition,
    show_defaults: bool,
) -> RoutingConfig {
    let (mut parsed, ignored) = RoutingConfig::parse_with_ignored(TEST_SITES).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed.url = UrlEncodingConfig::new(site, locale, show_defaults);
    parsed
}

// ============================================================================
// tests
// ============================================================================
