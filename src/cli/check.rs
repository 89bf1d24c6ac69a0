//! `validate` command.

use std::path::Path;

use anyhow::Result;

use crate::config::RoutingConfig;
use crate::log;
use crate::routing::RoutingEngine;

/// Load the config, print every diagnostic and fail on errors.
pub(super) fn validate_config(config_name: &Path) -> Result<()> {
    let path = RoutingConfig::locate(config_name)?;
    let config = RoutingConfig::read(&path)?;
    config.validate()?;

    let locales: usize = config
        .sites
        .iter()
        .map(|site| site.l10n.supported_locales.len())
        .sum();
    let sites = config.sites.len();
    let encoding = config.url;
    RoutingEngine::new(config)?;

    log!("validate"; "{} is valid: {} site{}, {} locale{}, site={} locale={} show_defaults={}",
        path.display(),
        sites, if sites == 1 { "" } else { "s" },
        locales, if locales == 1 { "" } else { "s" },
        encoding.site, encoding.locale, encoding.show_defaults);
    Ok(())
}
