//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Rewrite a generated documentation site for offline docset viewers
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = "docset.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run pre steps, transform the site, then run post steps
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: TransformArgs,
    },

    /// Rewrite links and heading anchors in place
    #[command(visible_alias = "t")]
    Transform {
        /// Site directory (default: `[site].root`)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        dir: Option<PathBuf>,

        #[command(flatten)]
        args: TransformArgs,
    },

    /// Print how each href would be rewritten
    #[command(visible_alias = "r")]
    Resolve {
        /// Link targets, e.g. `rules/` or `page#anchor`
        #[arg(required = true, value_name = "HREF")]
        hrefs: Vec<String>,

        /// Directory to probe link paths against (default: `[links].base`)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        base: Option<PathBuf>,

        /// Treat every path as a file; never probe the filesystem
        #[arg(long, conflicts_with = "base")]
        pure: bool,
    },
}

/// Transform-phase switches shared by `build` and `transform`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TransformArgs {
    /// Process documents on a thread pool
    #[arg(short, long)]
    pub parallel: bool,

    /// Attempt every document and report all failures at the end
    #[arg(short = 'k', long)]
    pub keep_going: bool,

    /// Skip the heading anchor pass
    #[arg(long)]
    pub no_toc: bool,
}

impl Cli {
    /// Commands that cannot run on defaults alone.
    pub const fn requires_config(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
}
