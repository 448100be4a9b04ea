//! docset - Rewrite a generated documentation site for offline docset viewers.

mod cli;
mod config;
mod core;
mod discover;
mod error;
mod hooks;
mod html;
mod link;
mod logger;
mod persist;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::DocsetConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = DocsetConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_docset(&config).map(|_| ()),
        Commands::Transform { .. } => cli::transform::transform_site(&config).map(|_| ()),
        Commands::Resolve { hrefs, pure, .. } => {
            cli::resolve::resolve_hrefs(&config, hrefs, *pure)
        }
    }
}
