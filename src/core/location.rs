//! Location and context value types.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// The `{pathname, search}` pair of the page being rendered.
///
/// Browser adapters fill it from `window.location`, server adapters from the
/// request line. `search` keeps its leading `?` when non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentLocation {
    pub pathname: String,
    pub search: String,
}

impl CurrentLocation {
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: search.into(),
        }
    }

    /// Split a relative or absolute URL into pathname and search.
    ///
    /// The fragment is dropped. Relative inputs are resolved against `/`.
    pub fn parse(url: &str) -> Self {
        match base_url().join(url.trim()) {
            Ok(parsed) => Self {
                pathname: parsed.path().to_string(),
                search: parsed
                    .query()
                    .map(|query| format!("?{query}"))
                    .unwrap_or_default(),
            },
            // Fallback to simple split if url parsing fails
            Err(_) => {
                let without_fragment = url.split('#').next().unwrap_or(url);
                match without_fragment.split_once('?') {
                    Some((path, query)) => Self::new(path, format!("?{query}")),
                    None => Self::new(without_fragment, ""),
                }
            }
        }
    }

    /// `pathname` followed by `search`.
    pub fn href(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }
}

/// Dummy origin used to parse relative paths with the `url` crate.
pub(crate) fn base_url() -> &'static url::Url {
    static BASE: OnceLock<url::Url> = OnceLock::new();
    BASE.get_or_init(|| url::Url::parse("http://localhost/").expect("static base URL is valid"))
}

/// Whether the rendering context's site and locale are the configured defaults.
///
/// Captured once when a [`UrlTemplate`](crate::routing::UrlTemplate) is built.
/// The site/locale passed to each render call are link *targets*; they never
/// change these flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingContext {
    pub is_default_site: bool,
    pub is_default_locale: bool,
}

impl RoutingContext {
    pub const fn new(is_default_site: bool, is_default_locale: bool) -> Self {
        Self {
            is_default_site,
            is_default_locale,
        }
    }
}
