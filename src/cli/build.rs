//! `docset build`: the full pipeline.
//!
//! - **Pre steps** - `[[pipeline.pre]]`, e.g. clone and generate the site
//! - **Transform** - link and heading passes over `[site].root`
//! - **Post steps** - `[[pipeline.post]]`, e.g. package the docset
//!
//! Any failing stage stops the pipeline; later stages never run.

use anyhow::Result;
use std::time::Instant;

use super::transform::{TransformReport, transform_site};
use crate::config::DocsetConfig;
use crate::utils::plural_count;
use crate::{debug, hooks, log};

pub fn build_docset(config: &DocsetConfig) -> Result<TransformReport> {
    let started = Instant::now();
    debug!("build"; "config {}", config.config_path.display());

    if !config.pipeline.pre.is_empty() {
        log!("pre"; "{}", plural_count(config.pipeline.pre.len(), "step"));
    }
    hooks::run_pre_steps(config)?;

    let report = transform_site(config)?;

    hooks::run_post_steps(config)?;

    log!("done"; "finished in {:.2?}", started.elapsed());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StepConfig;
    use std::fs;
    use tempfile::TempDir;

    fn config(root: &std::path::Path) -> DocsetConfig {
        let mut config = DocsetConfig {
            root: root.to_path_buf(),
            ..DocsetConfig::default()
        };
        config.site.root = root.join("_site");
        config.links.base = Some(config.site.root.clone());
        config
    }

    #[test]
    fn test_build_without_steps() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("_site")).unwrap();
        fs::write(dir.path().join("_site/index.html"), "<a href=\"about\">a</a>").unwrap();

        let report = build_docset(&config(dir.path())).unwrap();
        assert_eq!(report.links.rewritten, 1);
    }

    #[test]
    fn test_failing_pre_step_skips_transform() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("_site")).unwrap();
        let page = dir.path().join("_site/index.html");
        fs::write(&page, "<a href=\"about\">a</a>").unwrap();

        let mut config = config(dir.path());
        config.pipeline.pre.push(StepConfig {
            name: Some("generate".into()),
            command: vec!["docset-no-such-program-x".into()],
            ..StepConfig::default()
        });

        let err = build_docset(&config).unwrap_err();
        assert!(err.to_string().contains("generate"));
        assert_eq!(fs::read_to_string(&page).unwrap(), "<a href=\"about\">a</a>");
    }

    #[test]
    fn test_failing_transform_skips_post_steps() {
        let dir = TempDir::new().unwrap();
        let mut config = config(dir.path());
        // Site root never created
        config.pipeline.post.push(StepConfig {
            command: vec!["docset-no-such-program-x".into()],
            ..StepConfig::default()
        });

        let err = build_docset(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not apply transformations to documentation"
        );
    }
}
