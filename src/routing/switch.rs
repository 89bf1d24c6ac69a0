//! Locale switcher.
//!
//! Builds the link a language selector points at: the current page with its
//! site/locale tokens removed, re-rendered for the new locale.

use super::{BuildUrl, RoutingEngine};
use crate::config::Referenced;
use crate::core::{CurrentLocation, RoutingError};
use crate::debug;
use crate::query::{SearchParams, join_query};

/// Inputs of [`RoutingEngine::path_with_locale`].
#[derive(Debug, Clone, Copy)]
pub struct SwitchOptions<'a> {
    /// Page the switcher is rendered on.
    pub location: &'a CurrentLocation,
    /// Query parameters dropped from the switched URL (e.g. `refine`).
    pub disallow_params: &'a [&'a str],
}

impl<'a> SwitchOptions<'a> {
    pub fn new(location: &'a CurrentLocation) -> Self {
        Self {
            location,
            disallow_params: &[],
        }
    }

    pub fn disallow(mut self, params: &'a [&'a str]) -> Self {
        self.disallow_params = params;
        self
    }
}

impl RoutingEngine {
    /// URL of the current page in `new_locale`.
    ///
    /// The result is always rendered for the *default* site, with the new
    /// locale resolved under the current site.
    ///
    /// # Errors
    /// - `InvalidArgument` when the current site does not support `new_locale`
    /// - `Configuration` when no default site can be determined
    pub fn path_with_locale(
        &self,
        new_locale: &str,
        build_url: &impl BuildUrl,
        opts: SwitchOptions<'_>,
    ) -> Result<String, RoutingError> {
        let refs = self.params_from_location(opts.location);
        let mut pathname = opts.location.pathname.clone();
        let mut search = opts.location.search.clone();

        if let Some(site_ref) = refs.site_ref() {
            pathname = pathname.replacen(&format!("/{site_ref}"), "", 1);
            search = search.replacen(&format!("site={site_ref}"), "", 1);
        }
        if let Some(locale_ref) = refs.locale_ref() {
            pathname = pathname.replacen(&format!("/{locale_ref}"), "", 1);
            search = search.replacen(&format!("locale={locale_ref}"), "", 1);
        }
        let search = search.strip_suffix('&').unwrap_or(&search);

        let mut params = SearchParams::parse(search);
        for name in opts.disallow_params {
            params.delete(name);
        }
        let path = join_query(&pathname, &params);

        let site = self.site_by_reference(refs.site_ref())?;
        let locale = self
            .locale_by_reference(site, Some(new_locale))
            .ok_or_else(|| {
                RoutingError::invalid_argument(format!(
                    "locale `{new_locale}` is not supported by site `{}`",
                    site.id
                ))
            })?;
        let default_site = self.default_site()?;

        debug!("switch"; "{} -> {:?} in {}", opts.location.href(), path, locale.id);
        Ok(build_url.build_url(&path, Some(default_site.url_ref()), Some(locale.url_ref())))
    }

    /// Remove every occurrence of the site and locale tokens found in
    /// `path`.
    ///
    /// # Example
    /// ```ignore
    /// remove_site_locale_from_path("/uk/en-GB/uk/en-GB/account") -> "/account"
    /// ```
    pub fn remove_site_locale_from_path(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }
        let refs = self.params_from_path(path);
        let mut stripped = path.to_string();
        for token in [refs.site_ref(), refs.locale_ref()].into_iter().flatten() {
            stripped = stripped.replace(&format!("/{token}"), "");
        }
        stripped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{UrlPartPosition, test_config};

    fn engine(position: UrlPartPosition) -> RoutingEngine {
        RoutingEngine::new(test_config(position, position, false)).unwrap()
    }

    /// Records its arguments so tests see exactly what the switcher passed.
    fn recorder(path: &str, site: Option<&str>, locale: Option<&str>) -> String {
        format!("{path}|{}|{}", site.unwrap_or("-"), locale.unwrap_or("-"))
    }

    #[test]
    fn test_switch_strips_path_tokens() {
        let engine = engine(UrlPartPosition::Path);
        let location = CurrentLocation::new("/uk/en-GB/women/dresses", "?sort=asc");
        let url = engine
            .path_with_locale("fr", &recorder, SwitchOptions::new(&location))
            .unwrap();
        assert_eq!(url, "/women/dresses?sort=asc|uk|fr");
    }

    #[test]
    fn test_switch_strips_query_tokens() {
        let engine = engine(UrlPartPosition::QueryParam);
        let location = CurrentLocation::new("/women", "?site=uk&locale=en-GB&sort=asc");
        let url = engine
            .path_with_locale("de-DE", &recorder, SwitchOptions::new(&location))
            .unwrap();
        assert_eq!(url, "/women?sort=asc|uk|de");
    }

    #[test]
    fn test_switch_trims_trailing_ampersand() {
        let engine = engine(UrlPartPosition::QueryParam);
        let location = CurrentLocation::new("/women", "?sort=asc&site=uk&locale=fr");
        let url = engine
            .path_with_locale("it-IT", &recorder, SwitchOptions::new(&location))
            .unwrap();
        assert_eq!(url, "/women?sort=asc|uk|it-IT");
    }

    #[test]
    fn test_switch_drops_disallowed_params_and_keeps_flags() {
        let engine = engine(UrlPartPosition::Path);
        let location =
            CurrentLocation::new("/uk/fr/search", "?q=shoes&refine=c_color&server_only");
        let opts = SwitchOptions::new(&location).disallow(&["refine"]);
        let url = engine.path_with_locale("en-GB", &recorder, opts).unwrap();
        assert_eq!(url, "/search?q=shoes&server_only|uk|en-GB");
    }

    #[test]
    fn test_switch_uses_default_site_identity() {
        // Current site is RefArch; the link is still rendered for the default site.
        let engine = engine(UrlPartPosition::Path);
        let location = CurrentLocation::new("/us/en-US/cart", "");
        let url = engine
            .path_with_locale("ca", &recorder, SwitchOptions::new(&location))
            .unwrap();
        assert_eq!(url, "/cart|uk|ca");
    }

    #[test]
    fn test_switch_rejects_locale_of_other_site() {
        let engine = engine(UrlPartPosition::Path);
        let location = CurrentLocation::new("/us/en-US/cart", "");
        let err = engine
            .path_with_locale("fr", &recorder, SwitchOptions::new(&location))
            .unwrap_err();
        assert!(matches!(err, RoutingError::InvalidArgument(_)));
    }

    #[test]
    fn test_switch_through_template() {
        let engine = engine(UrlPartPosition::Path);
        let template = engine.create_url_template(Some("uk"), Some("en-GB")).unwrap();
        let location = CurrentLocation::new("/women", "");
        let url = engine
            .path_with_locale("fr", &template, SwitchOptions::new(&location))
            .unwrap();
        // Default context hides both attributes.
        assert_eq!(url, "/women");

        let template = engine.create_url_template(Some("uk"), Some("fr")).unwrap();
        let location = CurrentLocation::new("/fr/women", "");
        let url = engine
            .path_with_locale("de", &template, SwitchOptions::new(&location))
            .unwrap();
        assert_eq!(url, "/de/women");
    }

    #[test]
    fn test_remove_site_locale_from_path_removes_every_occurrence() {
        let engine = engine(UrlPartPosition::Path);
        assert_eq!(
            engine.remove_site_locale_from_path("/uk/en-GB/uk/en-GB/account/wishlist"),
            "/account/wishlist"
        );
    }

    #[test]
    fn test_remove_site_locale_from_path_edge_cases() {
        let engine = engine(UrlPartPosition::Path);
        assert_eq!(engine.remove_site_locale_from_path(""), "");
        assert_eq!(engine.remove_site_locale_from_path("/account"), "/account");
        assert_eq!(engine.remove_site_locale_from_path("/fr/account"), "/account");
    }
}
