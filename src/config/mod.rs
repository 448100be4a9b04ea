//! Configuration management for `docset.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # One module per TOML section
//! ├── types/         # ConfigError, diagnostics, field paths
//! ├── util.rs        # Config file lookup, path expansion
//! └── mod.rs         # DocsetConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section                 | Purpose                                   |
//! |-------------------------|-------------------------------------------|
//! | `[site]`                | Location of the generated HTML tree       |
//! | `[links]`               | Probe base, index file, page extension    |
//! | `[toc]`                 | Heading anchor naming and levels          |
//! | `[transform]`           | Parallelism and error policy              |
//! | `[[pipeline.pre/post]]` | External steps run by `docset build`      |

pub mod section;
pub mod types;
mod util;

pub use section::{
    LinksConfig, PipelineConfig, SiteConfig, StepConfig, TocConfig, TransformConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Commands, TransformArgs};
use crate::link::{FsProbe, LinkTransformer, NoDirs};
use crate::log;
use crate::utils::path::normalize_path;
use util::{expand_path, find_config_file};

/// Root configuration, one value per `docset.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocsetConfig {
    /// Absolute path of the loaded config file (empty when running on defaults).
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub links: LinksConfig,

    #[serde(default)]
    pub toc: TocConfig,

    #[serde(default)]
    pub transform: TransformConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl DocsetConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// `build` needs a config file; the other commands fall back to defaults
    /// rooted at the current directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path
                    .parent()
                    .map_or_else(|| cwd.clone(), Path::to_path_buf);
                config.config_path = path;
                config
            }
            None if cli.requires_config() => {
                return Err(ConfigError::NotFound(cli.config.clone()).into());
            }
            None => Self {
                root: cwd.clone(),
                ..Self::default()
            },
        };

        config.normalize_paths();
        config.apply_command_options(cli, &cwd);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path, warning about unknown fields.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .map_err(|err| ConfigError::Toml(path.to_path_buf(), err))?;

        if !ignored.is_empty() {
            let name = path
                .file_name()
                .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy());
            log!("warn"; "ignoring unknown fields in {}: {}", name, ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), toml::de::Error> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Resolve configured paths against the config directory.
    fn normalize_paths(&mut self) {
        self.root = normalize_path(&self.root);
        self.site.root = expand_path(&self.site.root, &self.root);
        self.links.base = Some(match self.links.base.take() {
            Some(base) => expand_path(&base, &self.root),
            None => self.site.root.clone(),
        });
    }

    /// Fold command-line overrides into the loaded values.
    ///
    /// Paths given on the command line are relative to the current directory.
    fn apply_command_options(&mut self, cli: &Cli, cwd: &Path) {
        crate::logger::set_verbose(cli.verbose);

        match &cli.command {
            Commands::Build { args } => self.apply_transform_args(args),
            Commands::Transform { dir, args } => {
                if let Some(dir) = dir {
                    let dir = expand_path(dir, cwd);
                    // An explicit site also moves the default probe base
                    if self.links.base.as_ref() == Some(&self.site.root) {
                        self.links.base = Some(dir.clone());
                    }
                    self.site.root = dir;
                }
                self.apply_transform_args(args);
            }
            Commands::Resolve { base, .. } => {
                if let Some(base) = base {
                    self.links.base = Some(expand_path(base, cwd));
                }
            }
        }
    }

    fn apply_transform_args(&mut self, args: &TransformArgs) {
        self.transform.parallel |= args.parallel;
        self.transform.continue_on_error |= args.keep_going;
        if args.no_toc {
            self.toc.enable = false;
        }
    }

    /// Validate every section, reporting all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.links.validate(&mut diag);
        self.toc.validate(&mut diag);
        self.pipeline.validate(&mut diag);

        // Nothing will generate the site before the transform phase
        let loaded = !self.config_path.as_os_str().is_empty();
        if loaded && self.pipeline.pre.is_empty() && !self.site.root.is_dir() {
            diag.warn(format!(
                "`site.root` ({}) does not exist and no pre steps are configured",
                self.site.root.display()
            ));
        }

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Directory link paths are probed against.
    pub fn link_base(&self) -> &Path {
        self.links.base.as_deref().unwrap_or(&self.site.root)
    }

    /// Link transformer backed by the real filesystem.
    pub fn link_transformer(&self) -> LinkTransformer<FsProbe> {
        LinkTransformer::new(FsProbe::new(self.link_base()))
            .with_names(&self.links.index, &self.links.extension)
    }

    /// Link transformer that never touches the filesystem.
    pub fn pure_link_transformer(&self) -> LinkTransformer<NoDirs> {
        LinkTransformer::new(NoDirs).with_names(&self.links.index, &self.links.extension)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config text. Panics on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> DocsetConfig {
    let (parsed, ignored) = DocsetConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}
