//! Reference → Site/Locale resolution with default fallback.
//!
//! Fallback chain: exact id/alias match → site default → configuration error.

use super::RoutingEngine;
use crate::config::{Locale, Referenced, Site};
use crate::core::RoutingError;
use crate::debug;

impl RoutingEngine {
    /// The site used when a URL names none.
    ///
    /// A single-site roster needs no `default_site` entry.
    pub fn default_site(&self) -> Result<&Site, RoutingError> {
        let sites = &self.config.sites;
        match sites.as_slice() {
            [] => Err(RoutingError::configuration("no sites configured")),
            [only] => Ok(only),
            _ => {
                let Some(id) = self.config.default_site.as_deref() else {
                    return Err(RoutingError::configuration(format!(
                        "default_site is required when {} sites are configured",
                        sites.len()
                    )));
                };
                sites.iter().find(|site| site.id == id).ok_or_else(|| {
                    RoutingError::configuration(format!("default site `{id}` is not configured"))
                })
            }
        }
    }

    /// Site matching `reference` by id or alias, else the default site.
    pub fn site_by_reference(&self, reference: Option<&str>) -> Result<&Site, RoutingError> {
        if let Some(reference) = reference
            && let Some(site) = self.config.sites.iter().find(|site| site.matches(reference))
        {
            return Ok(site);
        }
        debug!("resolve"; "no site for reference {:?}, using default site", reference);
        self.default_site()
    }

    /// Supported locale of `site` matching `reference` by id or alias.
    pub fn locale_by_reference<'s>(
        &self,
        site: &'s Site,
        reference: Option<&str>,
    ) -> Option<&'s Locale> {
        reference.and_then(|reference| site.find_locale(reference))
    }

    /// Ids of the locales `site` supports.
    pub fn supported_locale_ids<'s>(&self, site: &'s Site) -> Vec<&'s str> {
        site.supported_locale_ids()
    }

    /// Resolve the site a URL belongs to.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty or whitespace-only URL
    /// - `Configuration` when neither a match nor a default site exists
    pub fn resolve_site_from_url(&self, url: &str) -> Result<&Site, RoutingError> {
        let refs = self.params_from_path(required_url(url)?);
        self.site_by_reference(refs.site_ref())
    }

    /// Resolve the locale a URL is rendered in.
    ///
    /// Missing or unknown locale references fall back to the resolved site's
    /// default locale.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty or whitespace-only URL
    /// - `Configuration` when the resolved site's default locale is not supported
    pub fn resolve_locale_from_url(&self, url: &str) -> Result<&Locale, RoutingError> {
        let refs = self.params_from_path(required_url(url)?);
        let site = self.site_by_reference(refs.site_ref())?;
        let default_locale = site.l10n.default_locale.as_str();

        let reference = refs.locale_ref().unwrap_or(default_locale);
        if let Some(locale) = self.locale_by_reference(site, Some(reference)) {
            return Ok(locale);
        }

        debug!("resolve"; "locale {:?} not supported by site `{}`, using `{}`",
            reference, site.id, default_locale);
        self.locale_by_reference(site, Some(default_locale))
            .ok_or_else(|| {
                RoutingError::configuration(format!(
                    "default locale `{default_locale}` of site `{}` is not a supported locale",
                    site.id
                ))
            })
    }

    /// Resolve both site and locale for a URL.
    pub fn resolve_from_url(&self, url: &str) -> Result<(&Site, &Locale), RoutingError> {
        Ok((self.resolve_site_from_url(url)?, self.resolve_locale_from_url(url)?))
    }
}

/// `url` with surrounding whitespace removed; blank input is rejected.
fn required_url(url: &str) -> Result<&str, RoutingError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(RoutingError::invalid_argument("a non-empty url is required"));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RoutingConfig, UrlPartPosition, test_config};

    fn engine() -> RoutingEngine {
        RoutingEngine::new(test_config(UrlPartPosition::Path, UrlPartPosition::Path, true)).unwrap()
    }

    fn engine_with(config: RoutingConfig) -> RoutingEngine {
        RoutingEngine::new(config).unwrap()
    }

    #[test]
    fn test_default_site_from_config() {
        assert_eq!(engine().default_site().unwrap().id, "RefArchGlobal");
    }

    #[test]
    fn test_default_site_single_site_without_default() {
        let mut config = test_config(UrlPartPosition::Path, UrlPartPosition::Path, true);
        config.sites.truncate(1);
        config.default_site = None;
        assert_eq!(engine_with(config).default_site().unwrap().id, "RefArch");
    }

    #[test]
    fn test_default_site_errors() {
        let mut config = test_config(UrlPartPosition::Path, UrlPartPosition::Path, true);
        config.default_site = Some("Nope".into());
        let err = engine_with(config.clone()).default_site().unwrap_err();
        assert!(err.is_configuration());

        config.default_site = None;
        assert!(engine_with(config.clone()).default_site().unwrap_err().is_configuration());

        config.sites.clear();
        assert_eq!(
            engine_with(config).default_site().unwrap_err(),
            RoutingError::configuration("no sites configured")
        );
    }

    #[test]
    fn test_site_by_reference() {
        let engine = engine();
        assert_eq!(engine.site_by_reference(Some("us")).unwrap().id, "RefArch");
        assert_eq!(engine.site_by_reference(Some("RefArch")).unwrap().id, "RefArch");
        assert_eq!(engine.site_by_reference(Some("uk")).unwrap().id, "RefArchGlobal");
    }

    #[test]
    fn test_site_by_reference_falls_back_to_default() {
        let engine = engine();
        assert_eq!(engine.site_by_reference(Some("nope")).unwrap().id, "RefArchGlobal");
        assert_eq!(engine.site_by_reference(None).unwrap().id, "RefArchGlobal");
    }

    #[test]
    fn test_locale_by_reference() {
        let engine = engine();
        let site = engine.site_by_reference(Some("uk")).unwrap();
        assert_eq!(engine.locale_by_reference(site, Some("fr")).unwrap().id, "fr-FR");
        assert_eq!(engine.locale_by_reference(site, Some("fr-FR")).unwrap().id, "fr-FR");
        assert!(engine.locale_by_reference(site, Some("en-US")).is_none());
        assert!(engine.locale_by_reference(site, None).is_none());
    }

    #[test]
    fn test_supported_locale_ids() {
        let engine = engine();
        let site = engine.site_by_reference(Some("us")).unwrap();
        assert_eq!(engine.supported_locale_ids(site), vec!["en-US", "en-CA"]);
    }

    #[test]
    fn test_resolve_site_from_url() {
        let engine = engine();
        assert_eq!(engine.resolve_site_from_url("/us/en-US/cart").unwrap().id, "RefArch");
        assert_eq!(engine.resolve_site_from_url("/women").unwrap().id, "RefArchGlobal");
        assert_eq!(
            engine.resolve_site_from_url("https://shop.example.com/RefArch/").unwrap().id,
            "RefArch"
        );
    }

    #[test]
    fn test_resolve_site_from_url_requires_url() {
        let err = engine().resolve_site_from_url("").unwrap_err();
        assert!(matches!(err, RoutingError::InvalidArgument(_)));
        assert!(engine().resolve_site_from_url("   ").is_err());
        assert!(matches!(
            engine().resolve_locale_from_url(" \t").unwrap_err(),
            RoutingError::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_resolve_trims_surrounding_whitespace() {
        let engine = engine();
        let (site, locale) = engine.resolve_from_url("  /us/ca/cart \n").unwrap();
        assert_eq!(site.id, "RefArch");
        assert_eq!(locale.id, "en-CA");
    }

    #[test]
    fn test_resolve_site_from_url_without_any_site() {
        let mut config = test_config(UrlPartPosition::Path, UrlPartPosition::Path, true);
        config.sites.clear();
        let err = engine_with(config).resolve_site_from_url("/uk").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_resolve_locale_from_url() {
        let engine = engine();
        assert_eq!(engine.resolve_locale_from_url("/uk/fr/women").unwrap().id, "fr-FR");
        assert_eq!(engine.resolve_locale_from_url("/us/en-CA").unwrap().id, "en-CA");
        assert_eq!(engine.resolve_locale_from_url("/us/ca").unwrap().id, "en-CA");
    }

    #[test]
    fn test_resolve_locale_from_url_uses_site_default() {
        let engine = engine();
        assert_eq!(engine.resolve_locale_from_url("/us/cart").unwrap().id, "en-US");
        assert_eq!(engine.resolve_locale_from_url("/").unwrap().id, "en-GB");
    }

    #[test]
    fn test_resolve_locale_from_url_unsupported_locale_falls_back() {
        // fr belongs to RefArchGlobal only
        assert_eq!(engine().resolve_locale_from_url("/us/fr/cart").unwrap().id, "en-US");
    }

    #[test]
    fn test_resolve_locale_from_url_broken_default() {
        let mut config = test_config(UrlPartPosition::Path, UrlPartPosition::Path, true);
        config.sites[0].l10n.default_locale = "xx-XX".into();
        let err = engine_with(config).resolve_locale_from_url("/us/cart").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_resolve_locale_from_url_requires_url() {
        assert!(matches!(
            engine().resolve_locale_from_url(""),
            Err(RoutingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_resolve_locale_from_query_params() {
        let engine = engine_with(test_config(
            UrlPartPosition::QueryParam,
            UrlPartPosition::QueryParam,
            false,
        ));
        let (site, locale) = engine.resolve_from_url("/women?site=uk&locale=de").unwrap();
        assert_eq!(site.id, "RefArchGlobal");
        assert_eq!(locale.id, "de-DE");
    }
}
