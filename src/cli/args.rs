//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Site/locale URL routing tool
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: routing.toml, searched upward)
    #[arg(short = 'C', long, global = true, default_value = "routing.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render a path for a target site and locale
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Extract and resolve the site and locale of a URL
    #[command(visible_alias = "p")]
    Parse {
        /// Relative or absolute URL
        url: String,

        /// Print JSON instead of text
        #[arg(short, long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long, requires = "json")]
        pretty: bool,
    },

    /// Build the locale switcher link for a page
    #[command(visible_alias = "s")]
    Switch {
        /// Current page URL (pathname and query)
        url: String,

        /// Target locale id or alias
        #[arg(short, long)]
        locale: String,

        /// Query parameters to drop (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        disallow: Vec<String>,
    },

    /// Remove every site and locale token from a path
    Strip {
        /// Path to clean
        path: String,
    },

    /// Build one URL per value of a query parameter
    #[command(visible_alias = "u")]
    Urls {
        /// Base URL
        url: String,

        /// Parameter to vary
        #[arg(short, long)]
        key: String,

        /// Values of `key` (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        values: Vec<String>,

        /// Extra parameters applied to every URL (`name=value`, repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// Carry allow-listed session parameters onto a destination
    #[command(visible_alias = "k")]
    Keep {
        /// Destination URL
        destination: String,

        /// Query string of the current page
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Validate the configuration file
    #[command(visible_alias = "v")]
    Validate,
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Site/locale-agnostic path (e.g. /women/dresses)
    pub path: String,

    /// Target site id or alias
    #[arg(short, long)]
    pub site: Option<String>,

    /// Target locale id or alias
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Site of the page the link is rendered on (default: target site)
    #[arg(long)]
    pub context_site: Option<String>,

    /// Locale of the page the link is rendered on (default: target locale)
    #[arg(long)]
    pub context_locale: Option<String>,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected `name=value`, got `{raw}`"))
}
