//! `[url]` section configuration.
//!
//! Declares where the site and locale references live in generated URLs.
//!
//! # Example
//!
//! ```toml
//! [url]
//! site = "path"            # path | query_param | none
//! locale = "query_param"
//! show_defaults = false    # omit default site/locale from URLs
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a site or locale reference is written in a URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlPartPosition {
    /// Leading path segment: `/{ref}/...`
    #[default]
    Path,
    /// Query parameter: `?site={ref}` / `?locale={ref}`
    QueryParam,
    /// Never written.
    None,
}

impl UrlPartPosition {
    #[inline]
    pub const fn is_path(self) -> bool {
        matches!(self, Self::Path)
    }

    #[inline]
    pub const fn is_query_param(self) -> bool {
        matches!(self, Self::QueryParam)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::QueryParam => "query_param",
            Self::None => "none",
        }
    }
}

impl fmt::Display for UrlPartPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UrlPartPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(Self::Path),
            "query_param" | "query" => Ok(Self::QueryParam),
            "none" => Ok(Self::None),
            other => Err(format!(
                "unknown url position `{other}`, expected path, query_param or none"
            )),
        }
    }
}

/// URL encoding policy for site and locale references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlEncodingConfig {
    /// Position of the site reference.
    pub site: UrlPartPosition,

    /// Position of the locale reference.
    pub locale: UrlPartPosition,

    /// Write default-valued site/locale instead of omitting them.
    pub show_defaults: bool,
}

impl UrlEncodingConfig {
    pub const fn new(site: UrlPartPosition, locale: UrlPartPosition, show_defaults: bool) -> Self {
        Self {
            site,
            locale,
            show_defaults,
        }
    }

    /// Neither site nor locale is ever encoded.
    pub const fn is_disabled(&self) -> bool {
        matches!(self.site, UrlPartPosition::None) && matches!(self.locale, UrlPartPosition::None)
    }
}
