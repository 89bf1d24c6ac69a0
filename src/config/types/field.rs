//! Config field path used in diagnostics.

use owo_colors::OwoColorize;
use std::borrow::Cow;
use std::fmt;

/// Dotted path to a config field, e.g. `sites[1].l10n.default_locale`.
///
/// Static paths cover fixed keys; roster entries are indexed at runtime.
///
/// # Example
///
/// ```ignore
/// diag.error(FieldPath::new("default_site"), "required with multiple sites");
/// diag.error(FieldPath::site(1, "alias"), "must not be empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Cow<'static, str>);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Path to a field of the `index`-th `[[sites]]` entry.
    pub fn site(index: usize, field: &str) -> Self {
        Self(Cow::Owned(format!("sites[{index}].{field}")))
    }

    /// Path to a field of a supported locale of the `site`-th entry.
    pub fn locale(site: usize, index: usize, field: &str) -> Self {
        Self(Cow::Owned(format!(
            "sites[{site}].l10n.supported_locales[{index}].{field}"
        )))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_paths() {
        assert_eq!(FieldPath::new("url.site").as_str(), "url.site");
        assert_eq!(FieldPath::site(2, "id").as_str(), "sites[2].id");
        assert_eq!(
            FieldPath::locale(0, 3, "alias").as_str(),
            "sites[0].l10n.supported_locales[3].alias"
        );
    }
}
