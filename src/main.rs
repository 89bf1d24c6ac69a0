//! siteroute - site/locale URL routing for multi-site storefronts.

use anyhow::Result;
use clap::Parser;
use siteroute::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::run(&cli)
}
