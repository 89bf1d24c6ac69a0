//! Storefront link builders.
//!
//! These produce the site/locale-agnostic paths that are then fed through a
//! [`UrlTemplate`](super::UrlTemplate).

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use super::RoutingEngine;
use crate::core::RoutingError;

/// Characters `encodeURI` leaves alone: unreserved plus URI delimiters.
const URI_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `/category/{id}`
pub fn category_url(id: &str) -> String {
    utf8_percent_encode(&format!("/category/{id}"), URI_SET).to_string()
}

/// `/product/{id}`
pub fn product_url(id: &str) -> String {
    utf8_percent_encode(&format!("/product/{id}"), URI_SET).to_string()
}

/// `/search?q={term}`, with the term encoded as a single component.
pub fn search_url(term: &str) -> String {
    format!("/search?q={}", utf8_percent_encode(term, URI_COMPONENT_SET))
}

/// Resolve `path` against `origin`. Absolute `path`s pass through.
///
/// # Errors
/// `InvalidArgument` when `origin` is not an absolute URL.
pub fn absolute_url(path: &str, origin: &str) -> Result<String, RoutingError> {
    let base = Url::parse(origin).map_err(|err| {
        RoutingError::invalid_argument(format!("invalid origin `{origin}`: {err}"))
    })?;
    base.join(path)
        .map(String::from)
        .map_err(|err| RoutingError::invalid_argument(format!("invalid path `{path}`: {err}")))
}

impl RoutingEngine {
    /// Home link for a site/locale, rendered by a template built for that
    /// same context. The default pair collapses to `/`.
    pub fn home_url(
        &self,
        home_href: &str,
        site_ref: Option<&str>,
        locale_ref: Option<&str>,
    ) -> Result<String, RoutingError> {
        let template = self.create_url_template(site_ref, locale_ref)?;
        Ok(template.render(home_href, site_ref, locale_ref))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{UrlPartPosition, test_config};

    #[test]
    fn test_category_and_product_urls() {
        assert_eq!(category_url("womens-clothing"), "/category/womens-clothing");
        assert_eq!(category_url("new arrivals"), "/category/new%20arrivals");
        assert_eq!(product_url("25501032M"), "/product/25501032M");
        assert_eq!(product_url("café"), "/product/caf%C3%A9");
    }

    #[test]
    fn test_search_url_encodes_term() {
        assert_eq!(search_url("shoes"), "/search?q=shoes");
        assert_eq!(search_url("red & blue/green"), "/search?q=red%20%26%20blue%2Fgreen");
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("/uk/en-GB/cart", "https://shop.example.com").unwrap(),
            "https://shop.example.com/uk/en-GB/cart"
        );
        assert_eq!(
            absolute_url("https://cdn.example.com/a.png", "https://shop.example.com").unwrap(),
            "https://cdn.example.com/a.png"
        );
        assert!(matches!(
            absolute_url("/cart", "not a url"),
            Err(RoutingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_home_url() {
        let engine =
            RoutingEngine::new(test_config(UrlPartPosition::Path, UrlPartPosition::Path, false))
                .unwrap();
        assert_eq!(engine.home_url("/", Some("uk"), Some("en-GB")).unwrap(), "/");
        assert_eq!(engine.home_url("/", Some("uk"), Some("fr")).unwrap(), "/fr/");
        assert_eq!(engine.home_url("/", Some("us"), Some("en-US")).unwrap(), "/us/");
    }

    #[test]
    fn test_links_through_template() {
        let engine =
            RoutingEngine::new(test_config(UrlPartPosition::Path, UrlPartPosition::QueryParam, true))
                .unwrap();
        let template = engine.create_url_template(Some("us"), Some("en-US")).unwrap();
        assert_eq!(
            template.render(&search_url("boots"), Some("us"), Some("ca")),
            "/us/search?q=boots&locale=ca"
        );
    }
}
