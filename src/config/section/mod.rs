//! Configuration section definitions.
//!
//! Each module corresponds to a part of `routing.toml`:
//!
//! | Module       | TOML Section       | Purpose                              |
//! |--------------|--------------------|--------------------------------------|
//! | `navigation` | `[navigation]`     | Parameters kept across navigations   |
//! | `site`       | `[[sites]]`        | Site roster and per-site locales     |
//! | `url`        | `[url]`            | Site/locale URL encoding policy      |

mod navigation;
pub mod site;
mod url;

pub use navigation::NavigationConfig;
pub use site::{L10nConfig, Locale, Referenced, Site, check_url_token, validate_sites};
pub use url::{UrlEncodingConfig, UrlPartPosition};
