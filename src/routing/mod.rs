//! Site/locale routing engine.
//!
//! # Module Structure
//!
//! ```text
//! routing/
//! ├── matcher   # URL → {site_ref, locale_ref}
//! ├── resolve   # reference → Site / Locale with default fallback
//! ├── template  # UrlTemplate, BuildUrl
//! ├── switch    # locale switcher, site/locale stripping
//! ├── nav       # keep_vse
//! └── links     # category / product / search / home links
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let engine = RoutingEngine::new(RoutingConfig::load(path)?)?;
//! let (site, locale) = engine.resolve_from_url(request_url)?;
//! let template = engine.create_url_template(Some(site.url_ref()), Some(locale.url_ref()))?;
//! let href = template.render("/women", Some("uk"), Some("fr"));
//! ```

mod links;
mod matcher;
mod nav;
mod resolve;
mod switch;
mod template;

pub use links::{absolute_url, category_url, product_url, search_url};
pub use matcher::{Matcher, UrlRefs};
pub use nav::keep_params;
pub use switch::SwitchOptions;
pub use template::{BuildUrl, Placement, UrlTemplate};

use crate::config::{RoutingConfig, Site, UrlEncodingConfig};
use crate::core::{CurrentLocation, RoutingError};
use crate::debug;

/// Routing over one immutable configuration.
///
/// The matcher is compiled once here. The engine holds no mutable state and
/// can be shared across threads behind a reference or `Arc`.
#[derive(Debug, Clone)]
pub struct RoutingEngine {
    config: RoutingConfig,
    matcher: Matcher,
}

impl RoutingEngine {
    /// Compile the matcher for `config`.
    ///
    /// The roster is not validated here; run
    /// [`RoutingConfig::validate`] at startup. Inconsistencies that matter to
    /// a call surface as [`RoutingError::Configuration`] from that call.
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        let matcher = Matcher::new(&config.url, &config.sites).map_err(|err| {
            RoutingError::configuration(format!("failed to build url matcher: {err}"))
        })?;
        debug!("routing"; "engine ready: {} sites, site={} locale={} show_defaults={}",
            config.sites.len(), config.url.site, config.url.locale, config.url.show_defaults);
        Ok(Self { config, matcher })
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn url_config(&self) -> &UrlEncodingConfig {
        &self.config.url
    }

    pub fn sites(&self) -> &[Site] {
        &self.config.sites
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Extract raw site/locale references from a relative or absolute URL.
    pub fn params_from_path(&self, url: &str) -> UrlRefs {
        self.matcher.params_from_path(url)
    }

    /// Extract raw site/locale references from an explicit location.
    pub fn params_from_location(&self, location: &CurrentLocation) -> UrlRefs {
        self.matcher.params_from_location(location)
    }
}
