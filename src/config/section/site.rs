//! `[[sites]]` roster configuration.
//!
//! Each site carries its own locale roster and default locale.
//!
//! # Example
//!
//! ```toml
//! default_site = "RefArchGlobal"
//!
//! [[sites]]
//! id = "RefArchGlobal"
//! alias = "uk"
//!
//! [sites.l10n]
//! default_locale = "en-GB"
//! supported_locales = [
//!     { id = "en-GB" },
//!     { id = "fr-FR", alias = "fr" },
//! ]
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

// ============================================================================
// Referenced
// ============================================================================

/// Something addressable by a canonical id or a public alias.
pub trait Referenced {
    fn id(&self) -> &str;

    fn alias(&self) -> Option<&str>;

    /// Whether `reference` names this entry by id or alias.
    fn matches(&self, reference: &str) -> bool {
        self.id() == reference || self.alias() == Some(reference)
    }

    /// The token written into URLs: alias when present, id otherwise.
    fn url_ref(&self) -> &str {
        self.alias().unwrap_or_else(|| self.id())
    }
}

// ============================================================================
// Locale
// ============================================================================

/// A locale supported by a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    /// Canonical locale code (e.g. `en-GB`).
    pub id: String,

    /// Short public-facing code (e.g. `en`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Locale {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

impl Referenced for Locale {
    fn id(&self) -> &str {
        &self.id
    }

    fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

// ============================================================================
// Site
// ============================================================================

/// Localization settings of a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L10nConfig {
    /// Id of the locale used when a URL names none.
    pub default_locale: String,

    /// Locales this site serves.
    pub supported_locales: Vec<Locale>,
}

/// A storefront served by the deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    pub l10n: L10nConfig,
}

impl Site {
    pub fn new(
        id: impl Into<String>,
        default_locale: impl Into<String>,
        locales: Vec<Locale>,
    ) -> Self {
        Self {
            id: id.into(),
            alias: None,
            l10n: L10nConfig {
                default_locale: default_locale.into(),
                supported_locales: locales,
            },
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Supported locale matching `reference` by id or alias.
    pub fn find_locale(&self, reference: &str) -> Option<&Locale> {
        self.l10n
            .supported_locales
            .iter()
            .find(|locale| locale.matches(reference))
    }

    /// Ids of all supported locales, in roster order.
    pub fn supported_locale_ids(&self) -> Vec<&str> {
        self.l10n
            .supported_locales
            .iter()
            .map(|locale| locale.id.as_str())
            .collect()
    }
}

impl Referenced for Site {
    fn id(&self) -> &str {
        &self.id
    }

    fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

// ============================================================================
// validation
// ============================================================================

/// Characters that would break a reference out of its path segment or
/// query value.
const RESERVED: &[char] = &['/', '?', '&', '=', '#', '%', '+'];

/// Check that `token` can round-trip through a URL unchanged.
pub fn check_url_token(token: &str) -> Result<(), String> {
    if token.is_empty() {
        return Err("must not be empty".into());
    }
    if let Some(c) = token
        .chars()
        .find(|c| RESERVED.contains(c) || c.is_whitespace() || c.is_control())
    {
        return Err(format!("`{token}` contains reserved character {c:?}"));
    }
    Ok(())
}

/// Validate the site roster and the default site selection.
///
/// # Checks
/// - at least one site
/// - `default_site` set and known when more than one site exists
/// - ids and aliases are URL-safe and unambiguous
/// - every site's `default_locale` names exactly one supported locale id
/// - locale tokens that are also site tokens (warning)
pub fn validate_sites(sites: &[Site], default_site: Option<&str>, diag: &mut ConfigDiagnostics) {
    if sites.is_empty() {
        diag.error_with_hint(
            FieldPath::new("sites"),
            "at least one site is required",
            "add a [[sites]] entry with id and l10n",
        );
        return;
    }

    match default_site {
        Some(id) if !sites.iter().any(|site| site.id == id) => diag.error_with_hint(
            FieldPath::new("default_site"),
            format!("unknown site `{id}`"),
            format!(
                "use one of: {}",
                sites.iter().map(|s| s.id.as_str()).collect::<Vec<_>>().join(", ")
            ),
        ),
        None if sites.len() > 1 => diag.error_with_hint(
            FieldPath::new("default_site"),
            format!("required when {} sites are configured", sites.len()),
            format!("e.g. default_site = \"{}\"", sites[0].id),
        ),
        _ => {}
    }

    let mut site_refs = FxHashSet::default();
    for (index, site) in sites.iter().enumerate() {
        check_references(
            site,
            FieldPath::site(index, "id"),
            FieldPath::site(index, "alias"),
            &mut site_refs,
            diag,
        );
        validate_locales(index, site, diag);
    }
    warn_site_locale_overlap(sites, &site_refs, diag);
}

/// A locale token that is also a site token makes `/{token}/...` ambiguous;
/// the matcher reads the first segment as the site.
fn warn_site_locale_overlap(
    sites: &[Site],
    site_refs: &FxHashSet<String>,
    diag: &mut ConfigDiagnostics,
) {
    for (site_index, site) in sites.iter().enumerate() {
        for (index, locale) in site.l10n.supported_locales.iter().enumerate() {
            let alias = locale.alias().filter(|alias| *alias != locale.id());
            for (field, token) in [("id", Some(locale.id())), ("alias", alias)] {
                if let Some(token) = token
                    && site_refs.contains(token)
                {
                    diag.warn(
                        FieldPath::locale(site_index, index, field),
                        format!(
                            "`{token}` is also a site reference, `/{token}/...` is read as the site"
                        ),
                    );
                }
            }
        }
    }
}

fn validate_locales(site_index: usize, site: &Site, diag: &mut ConfigDiagnostics) {
    let locales = &site.l10n.supported_locales;
    if locales.is_empty() {
        diag.error(
            FieldPath::site(site_index, "l10n.supported_locales"),
            format!("site `{}` supports no locales", site.id),
        );
        return;
    }

    let mut locale_refs = FxHashSet::default();
    for (index, locale) in locales.iter().enumerate() {
        check_references(
            locale,
            FieldPath::locale(site_index, index, "id"),
            FieldPath::locale(site_index, index, "alias"),
            &mut locale_refs,
            diag,
        );
    }

    let default_matches = locales
        .iter()
        .filter(|locale| locale.id == site.l10n.default_locale)
        .count();
    if default_matches != 1 {
        diag.error_with_hint(
            FieldPath::site(site_index, "l10n.default_locale"),
            format!(
                "`{}` must match exactly one supported locale id, found {}",
                site.l10n.default_locale, default_matches
            ),
            format!("supported: {}", site.supported_locale_ids().join(", ")),
        );
    }
}

/// Check id/alias syntax and record them, flagging references already taken.
fn check_references<T: Referenced>(
    entry: &T,
    id_field: FieldPath,
    alias_field: FieldPath,
    seen: &mut FxHashSet<String>,
    diag: &mut ConfigDiagnostics,
) {
    record_reference(entry.id(), id_field, seen, diag);
    if let Some(alias) = entry.alias() {
        if alias == entry.id() {
            diag.warn(alias_field, format!("alias `{alias}` equals the id"));
        } else {
            record_reference(alias, alias_field, seen, diag);
        }
    }
}

fn record_reference(
    token: &str,
    field: FieldPath,
    seen: &mut FxHashSet<String>,
    diag: &mut ConfigDiagnostics,
) {
    if let Err(message) = check_url_token(token) {
        diag.error(field, message);
    } else if !seen.insert(token.to_string()) {
        diag.error(field, format!("reference `{token}` is already used"));
    }
}
