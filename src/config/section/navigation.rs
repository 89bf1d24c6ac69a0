//! `[navigation]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [navigation]
//! keep_params = ["vse", "vse_timestamp"]   # carried across navigations
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Navigation helper settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Query parameters re-attached to every in-site navigation
    /// (preview/debug session tokens).
    pub keep_params: Vec<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            keep_params: vec!["vse".into(), "vse_timestamp".into()],
        }
    }
}

impl NavigationConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.keep_params.iter().any(|param| param.trim().is_empty()) {
            diag.error(
                FieldPath::new("navigation.keep_params"),
                "parameter names must not be empty",
            );
        }
        if self
            .keep_params
            .iter()
            .any(|param| param == "site" || param == "locale")
        {
            diag.warn(
                FieldPath::new("navigation.keep_params"),
                "keeping `site`/`locale` overrides the destination's own references",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_defaults() {
        let config = NavigationConfig::default();
        assert_eq!(config.keep_params, vec!["vse", "vse_timestamp"]);
    }

    #[test]
    fn test_navigation_validate() {
        let config = NavigationConfig {
            keep_params: vec!["vse".into(), " ".into(), "locale".into()],
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.warnings().len(), 1);
    }
}
