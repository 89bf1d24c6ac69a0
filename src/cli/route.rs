//! URL commands: build, parse, switch, urls.

use anyhow::Result;
use serde::Serialize;

use crate::cli::args::BuildArgs;
use crate::config::Referenced;
use crate::core::CurrentLocation;
use crate::query::{ParamValue, build_url_set};
use crate::routing::{RoutingEngine, SwitchOptions, UrlRefs};

pub(super) fn build(engine: &RoutingEngine, args: &BuildArgs) -> Result<()> {
    println!("{}", build_url(engine, args)?);
    Ok(())
}

/// Render `args.path`; the context defaults to the target site/locale.
fn build_url(engine: &RoutingEngine, args: &BuildArgs) -> Result<String> {
    let context_site = args.context_site.as_deref().or(args.site.as_deref());
    let context_locale = args.context_locale.as_deref().or(args.locale.as_deref());

    let template = engine.create_url_template(context_site, context_locale)?;
    Ok(template.render(&args.path, args.site.as_deref(), args.locale.as_deref()))
}

/// What `parse` reports for one URL.
#[derive(Debug, Serialize)]
struct ParseReport<'a> {
    url: &'a str,
    location: CurrentLocation,
    refs: UrlRefs,
    site: &'a str,
    locale: &'a str,
}

impl<'a> ParseReport<'a> {
    fn new(engine: &'a RoutingEngine, url: &'a str) -> Result<Self> {
        let (site, locale) = engine.resolve_from_url(url)?;
        Ok(Self {
            url,
            location: CurrentLocation::parse(url),
            refs: engine.params_from_path(url),
            site: &site.id,
            locale: &locale.id,
        })
    }
}

pub(super) fn parse(engine: &RoutingEngine, url: &str, json: bool, pretty: bool) -> Result<()> {
    let report = ParseReport::new(engine, url)?;

    if json {
        let formatted = if pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        println!("{formatted}");
    } else {
        println!("pathname: {}", report.location.pathname);
        println!("search:   {}", report.location.search);
        println!("site:     {} (ref {:?})", report.site, report.refs.site_ref());
        println!("locale:   {} (ref {:?})", report.locale, report.refs.locale_ref());
    }
    Ok(())
}

pub(super) fn switch(
    engine: &RoutingEngine,
    url: &str,
    new_locale: &str,
    disallow: &[String],
) -> Result<()> {
    println!("{}", switch_url(engine, url, new_locale, disallow)?);
    Ok(())
}

/// Locale switch link for the page at `url`, rendered for that page's context.
fn switch_url(
    engine: &RoutingEngine,
    url: &str,
    new_locale: &str,
    disallow: &[String],
) -> Result<String> {
    let (site, locale) = engine.resolve_from_url(url)?;
    let template = engine.create_url_template(Some(site.url_ref()), Some(locale.url_ref()))?;

    let location = CurrentLocation::parse(url);
    let disallow: Vec<&str> = disallow.iter().map(String::as_str).collect();
    let opts = SwitchOptions::new(&location).disallow(&disallow);

    Ok(engine.path_with_locale(new_locale, &template, opts)?)
}

pub(super) fn urls(
    url: &str,
    key: &str,
    values: &[String],
    params: &[(String, String)],
) -> Result<()> {
    for url in url_set(url, key, values, params) {
        println!("{url}");
    }
    Ok(())
}

fn url_set(url: &str, key: &str, values: &[String], params: &[(String, String)]) -> Vec<String> {
    let extra: Vec<(&str, ParamValue)> = params
        .iter()
        .map(|(name, value)| (name.as_str(), ParamValue::from(value.as_str())))
        .collect();
    build_url_set(url, key, values, &extra)
}
