//! Site/locale reference extraction.
//!
//! The matcher is compiled once from the site roster and the URL policy.
//! Only the positions the policy declares are consulted:
//!
//! | Policy          | Recognised                         |
//! |-----------------|------------------------------------|
//! | `path`          | `/{site}/{locale}` leading segments |
//! | `query_param`   | `site={ref}` / `locale={ref}`      |
//! | `none`          | nothing                            |
//!
//! Path segments are read site before locale. Locale tokens are the union
//! of every site's locales since the site is not known at match time.

use regex::Regex;
use serde::Serialize;

use crate::config::{Referenced, Site, UrlEncodingConfig};
use crate::core::CurrentLocation;

/// Raw references found in a URL, not yet resolved against the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlRefs {
    pub site_ref: Option<String>,
    pub locale_ref: Option<String>,
}

impl UrlRefs {
    pub fn new(site_ref: Option<&str>, locale_ref: Option<&str>) -> Self {
        Self {
            site_ref: site_ref.map(str::to_string),
            locale_ref: locale_ref.map(str::to_string),
        }
    }

    pub fn site_ref(&self) -> Option<&str> {
        self.site_ref.as_deref()
    }

    pub fn locale_ref(&self) -> Option<&str> {
        self.locale_ref.as_deref()
    }

    /// Fill missing fields from `other`, keeping values already found.
    fn or(self, other: Self) -> Self {
        Self {
            site_ref: self.site_ref.or(other.site_ref),
            locale_ref: self.locale_ref.or(other.locale_ref),
        }
    }
}

/// Compiled path and query matchers for one roster + URL policy.
#[derive(Debug, Clone)]
pub struct Matcher {
    path: Option<Regex>,
    site_query: Option<Regex>,
    locale_query: Option<Regex>,
}

impl Matcher {
    /// Build the matchers from the roster.
    pub fn new(url: &UrlEncodingConfig, sites: &[Site]) -> Result<Self, regex::Error> {
        let site_tokens = alternation(sites.iter().flat_map(tokens_of));
        let locale_tokens = alternation(
            sites
                .iter()
                .flat_map(|site| site.l10n.supported_locales.iter())
                .flat_map(tokens_of),
        );

        let site_in_path = url.site.is_path().then_some(site_tokens.as_deref()).flatten();
        let locale_in_path = url.locale.is_path().then_some(locale_tokens.as_deref()).flatten();

        let path = if site_in_path.is_some() || locale_in_path.is_some() {
            let mut pattern = String::from("^");
            if let Some(tokens) = site_in_path {
                pattern.push_str(&format!("(?:/(?P<site>{tokens}))?"));
            }
            if let Some(tokens) = locale_in_path {
                pattern.push_str(&format!("(?:/(?P<locale>{tokens}))?"));
            }
            // A token must fill the whole segment: `/uk` never matches `/ukraine`.
            pattern.push_str("(?:[/?#]|$)");
            Some(Regex::new(&pattern)?)
        } else {
            None
        };

        let site_query = match site_tokens.as_deref() {
            Some(tokens) if url.site.is_query_param() => Some(query_regex("site", tokens)?),
            _ => None,
        };
        let locale_query = match locale_tokens.as_deref() {
            Some(tokens) if url.locale.is_query_param() => Some(query_regex("locale", tokens)?),
            _ => None,
        };

        Ok(Self {
            path,
            site_query,
            locale_query,
        })
    }

    /// References in leading path segments.
    pub fn match_path(&self, pathname: &str) -> UrlRefs {
        let Some(captures) = self.path.as_ref().and_then(|re| re.captures(pathname)) else {
            return UrlRefs::default();
        };
        UrlRefs::new(
            captures.name("site").map(|m| m.as_str()),
            captures.name("locale").map(|m| m.as_str()),
        )
    }

    /// References in `site=` / `locale=` query parameters.
    ///
    /// `search` may carry its leading `?`.
    pub fn match_query(&self, search: &str) -> UrlRefs {
        let capture = |re: &Option<Regex>, name: &str| {
            re.as_ref()
                .and_then(|re| re.captures(search))
                .and_then(|captures| captures.name(name).map(|m| m.as_str().to_string()))
        };
        UrlRefs {
            site_ref: capture(&self.site_query, "site"),
            locale_ref: capture(&self.locale_query, "locale"),
        }
    }

    /// Extract `{site_ref, locale_ref}` from a relative or absolute URL.
    ///
    /// A path match wins over a query match for the same attribute.
    pub fn params_from_path(&self, url: &str) -> UrlRefs {
        let location = CurrentLocation::parse(url);
        self.params_from_location(&location)
    }

    pub fn params_from_location(&self, location: &CurrentLocation) -> UrlRefs {
        self.match_path(&location.pathname)
            .or(self.match_query(&location.search))
    }
}

fn tokens_of<T: Referenced>(entry: &T) -> impl Iterator<Item = &str> {
    std::iter::once(entry.id()).chain(entry.alias())
}

/// Escaped regex alternation of unique non-empty tokens, longest first.
fn alternation<'a>(tokens: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut tokens: Vec<&str> = tokens.filter(|token| !token.is_empty()).collect();
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    tokens.dedup();
    if tokens.is_empty() {
        return None;
    }
    Some(
        tokens
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|"),
    )
}

fn query_regex(name: &str, tokens: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        "(?:^|[?&]){name}=(?P<{name}>{tokens})(?:[&#]|$)"
    ))
}
