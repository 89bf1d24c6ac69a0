//! URL template: renders `(path, site, locale)` into a URL under one policy.
//!
//! # Default suppression
//!
//! Whether default values are hidden is decided once, from the
//! [`RoutingContext`] of the page doing the rendering. The `site`/`locale`
//! passed to [`UrlTemplate::render`] are the link *target* and never
//! re-evaluate defaultness:
//!
//! ```ignore
//! // show_defaults = false, built for the default context (uk, en-GB)
//! template.render("/x", Some("uk"), Some("en-GB")) -> "/x"
//! template.render("/x", Some("us"), Some("fr"))    -> "/x"
//! // built for (us, en-US): en-US is RefArch's default locale, us is not the default site
//! template.render("/x", Some("uk"), Some("en-GB")) -> "/uk/x"
//! // built for (us, ca): neither is a default
//! template.render("/x", Some("uk"), Some("en-GB")) -> "/uk/en-GB/x"
//! ```
//!
//! The home page of the default site and locale is always the bare `/`.

use serde::Serialize;
use url::form_urlencoded;

use super::RoutingEngine;
use crate::config::{Locale, Referenced, Site, UrlEncodingConfig, UrlPartPosition};
use crate::core::{RoutingContext, RoutingError};
use crate::debug;

// ============================================================================
// BuildUrl
// ============================================================================

/// Renders a path for a target site and locale.
pub trait BuildUrl {
    fn build_url(&self, path: &str, site: Option<&str>, locale: Option<&str>) -> String;
}

impl<F> BuildUrl for F
where
    F: Fn(&str, Option<&str>, Option<&str>) -> String,
{
    fn build_url(&self, path: &str, site: Option<&str>, locale: Option<&str>) -> String {
        self(path, site, locale)
    }
}

// ============================================================================
// UrlTemplate
// ============================================================================

/// Where one attribute is rendered, fixed at template construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub in_path: bool,
    pub in_query: bool,
}

impl Placement {
    /// Render at `position` unless the value is a hidden default.
    pub const fn new(position: UrlPartPosition, show_defaults: bool, is_default: bool) -> Self {
        let visible = show_defaults || !is_default;
        Self {
            in_path: visible && position.is_path(),
            in_query: visible && position.is_query_param(),
        }
    }
}

/// Id/alias pair of a default site or locale, owned by the template.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DefaultRef {
    id: String,
    alias: Option<String>,
}

impl DefaultRef {
    fn of<T: Referenced>(entry: &T) -> Self {
        Self {
            id: entry.id().to_string(),
            alias: entry.alias().map(str::to_string),
        }
    }
}

impl Referenced for DefaultRef {
    fn id(&self) -> &str {
        &self.id
    }

    fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

/// A compiled URL template. Stateless and reusable; build a new one when
/// the rendering context's site or locale changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    context: RoutingContext,
    site: Placement,
    locale: Placement,
    default_site: DefaultRef,
    default_locale: DefaultRef,
}

impl UrlTemplate {
    /// Compile `encoding` for a context.
    ///
    /// `default_locale` is the default locale of the context's site, which is
    /// what the home-page collapse compares against.
    pub fn new(
        encoding: &UrlEncodingConfig,
        context: RoutingContext,
        default_site: &Site,
        default_locale: &Locale,
    ) -> Self {
        Self {
            context,
            site: Placement::new(encoding.site, encoding.show_defaults, context.is_default_site),
            locale: Placement::new(
                encoding.locale,
                encoding.show_defaults,
                context.is_default_locale,
            ),
            default_site: DefaultRef::of(default_site),
            default_locale: DefaultRef::of(default_locale),
        }
    }

    pub const fn context(&self) -> RoutingContext {
        self.context
    }

    pub const fn site_placement(&self) -> Placement {
        self.site
    }

    pub const fn locale_placement(&self) -> Placement {
        self.locale
    }

    /// Render `path` for the target `site` and `locale`.
    pub fn render(&self, path: &str, site: Option<&str>, locale: Option<&str>) -> String {
        let site = site.filter(|s| !s.is_empty());
        let locale = locale.filter(|l| !l.is_empty());

        if self.is_default_home(path, site, locale) {
            return path.to_string();
        }

        let mut url = String::with_capacity(path.len() + 32);
        if self.site.in_path
            && let Some(site) = site
        {
            url.push('/');
            url.push_str(site);
        }
        if self.locale.in_path
            && let Some(locale) = locale
        {
            url.push('/');
            url.push_str(locale);
        }

        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;
        if self.site.in_query
            && let Some(site) = site
        {
            query.append_pair("site", site);
            has_query = true;
        }
        if self.locale.in_query
            && let Some(locale) = locale
        {
            query.append_pair("locale", locale);
            has_query = true;
        }

        if !has_query {
            url.push_str(path);
            return url;
        }

        // Query goes before any fragment, after any query the path already has.
        let (before_fragment, fragment) = match path.split_once('#') {
            Some((head, fragment)) => (head, Some(fragment)),
            None => (path, None),
        };
        url.push_str(before_fragment);
        url.push(if before_fragment.contains('?') { '&' } else { '?' });
        url.push_str(&query.finish());
        if let Some(fragment) = fragment {
            url.push('#');
            url.push_str(fragment);
        }
        url
    }

    fn is_default_home(&self, path: &str, site: Option<&str>, locale: Option<&str>) -> bool {
        path == "/"
            && site.is_some_and(|site| self.default_site.matches(site))
            && locale.is_some_and(|locale| self.default_locale.matches(locale))
    }
}

impl BuildUrl for UrlTemplate {
    fn build_url(&self, path: &str, site: Option<&str>, locale: Option<&str>) -> String {
        self.render(path, site, locale)
    }
}

// ============================================================================
// RoutingEngine
// ============================================================================

impl RoutingEngine {
    /// Build a template for the current site/locale context using the
    /// configured URL policy.
    pub fn create_url_template(
        &self,
        current_site_ref: Option<&str>,
        current_locale_ref: Option<&str>,
    ) -> Result<UrlTemplate, RoutingError> {
        self.create_url_template_with(&self.config.url, current_site_ref, current_locale_ref)
    }

    /// Build a template for the current context under an explicit policy.
    pub fn create_url_template_with(
        &self,
        encoding: &UrlEncodingConfig,
        current_site_ref: Option<&str>,
        current_locale_ref: Option<&str>,
    ) -> Result<UrlTemplate, RoutingError> {
        let default_site = self.default_site()?;
        let site = self.site_by_reference(current_site_ref)?;
        let default_locale = self
            .locale_by_reference(site, Some(&site.l10n.default_locale))
            .ok_or_else(|| {
                RoutingError::configuration(format!(
                    "default locale `{}` of site `{}` is not a supported locale",
                    site.l10n.default_locale, site.id
                ))
            })?;

        let context = RoutingContext::new(
            current_site_ref.is_some_and(|r| default_site.matches(r)),
            current_locale_ref.is_some_and(|r| default_locale.matches(r)),
        );
        debug!("template"; "context site={:?} locale={:?} -> {:?}",
            current_site_ref, current_locale_ref, context);

        Ok(UrlTemplate::new(encoding, context, default_site, default_locale))
    }
}
