//! Command-line interface module.

mod args;
mod check;
mod route;

pub use args::{BuildArgs, Cli, Commands};

use anyhow::Result;
use clap::ColorChoice;

use crate::config::RoutingConfig;
use crate::logger;
use crate::routing::RoutingEngine;

/// Run the parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    if let Commands::Validate = cli.command {
        return check::validate_config(&cli.config);
    }

    let engine = RoutingEngine::new(RoutingConfig::discover(&cli.config)?)?;
    match &cli.command {
        Commands::Build { args } => route::build(&engine, args),
        Commands::Parse { url, json, pretty } => route::parse(&engine, url, *json, *pretty),
        Commands::Switch {
            url,
            locale,
            disallow,
        } => route::switch(&engine, url, locale, disallow),
        Commands::Strip { path } => {
            println!("{}", engine.remove_site_locale_from_path(path));
            Ok(())
        }
        Commands::Urls {
            url,
            key,
            values,
            params,
        } => route::urls(url, key, values, params),
        Commands::Keep {
            destination,
            search,
        } => {
            if let Some(url) = engine.keep_vse(search, Some(destination)) {
                println!("{url}");
            }
            Ok(())
        }
        Commands::Validate => unreachable!("handled before the engine is built"),
    }
}
