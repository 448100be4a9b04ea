//! The transform phase: rewrite links, then annotate headings.
//!
//! Both passes walk every `.html` file under `[site].root`. The link pass
//! finishes for all files before the heading pass starts, and each file is
//! parsed, mutated and atomically persisted once per pass.
//!
//! Error policy:
//! - default: the first failing document aborts the phase
//! - `continue_on_error`: every document is attempted, failures are reported
//!   together and the phase still fails

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use crate::config::DocsetConfig;
use crate::discover::{discover, filter_by_extension};
use crate::error::{PhaseFailures, TransformError};
use crate::html::{HeadingAnnotator, LinkRewriter, LinkStats, TocStats};
use crate::logger::ProgressLine;
use crate::utils::plural_count;
use crate::{debug, log};

/// What one run of the phase changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub documents: usize,
    pub links: LinkStats,
    /// `None` when the heading pass is disabled.
    pub toc: Option<TocStats>,
}

/// Run the transform phase over `[site].root`.
pub fn transform_site(config: &DocsetConfig) -> Result<TransformReport> {
    let report = run_phase(config).context("could not apply transformations to documentation")?;

    log!(
        "transform";
        "{}: {} of {} rewritten",
        plural_count(report.documents, "document"),
        report.links.rewritten,
        plural_count(report.links.links, "link")
    );
    if let Some(toc) = report.toc {
        log!(
            "transform";
            "{} anchored, {} already anchored",
            plural_count(toc.anchored, "heading"),
            toc.skipped
        );
    }

    Ok(report)
}

fn run_phase(config: &DocsetConfig) -> Result<TransformReport> {
    let root = &config.site.root;
    let files = filter_by_extension(discover(root)?, "html");
    debug!("transform"; "{} under {}", plural_count(files.len(), "document"), root.display());

    let rewriter = LinkRewriter::new(config.link_transformer());
    let annotator = config
        .toc
        .enable
        .then(|| HeadingAnnotator::new(config.toc.options()));

    let toc_total = if annotator.is_some() { files.len() } else { 0 };
    let progress = ProgressLine::new("transform", &[("links", files.len()), ("toc", toc_total)]);

    let runner = PassRunner {
        parallel: config.transform.parallel,
        continue_on_error: config.transform.continue_on_error,
        progress: &progress,
    };
    let mut failures = PhaseFailures::new();

    let (links, done) = runner.run("links", &files, &mut failures, |path| {
        rewriter.rewrite_file(path)
    })?;

    // Documents whose links failed are left alone by the heading pass
    let toc = match &annotator {
        Some(annotator) => {
            let (stats, _) = runner.run("toc", &done, &mut failures, |path| {
                annotator.annotate_file(path)
            })?;
            Some(stats)
        }
        None => None,
    };

    progress.finish();
    if !failures.is_empty() {
        log!("warn"; "{} could not be transformed", plural_count(failures.len(), "document"));
        for err in failures.errors() {
            debug!("warn"; "{}", err.path().display());
        }
    }
    failures.into_result()?;

    Ok(TransformReport {
        documents: files.len(),
        links,
        toc,
    })
}

/// Applies one per-file step to a list of files under the error policy.
struct PassRunner<'a> {
    parallel: bool,
    continue_on_error: bool,
    progress: &'a ProgressLine,
}

impl PassRunner<'_> {
    /// Returns the summed stats and the files that succeeded.
    ///
    /// Aborting returns the first error; continuing records every error in
    /// `failures` and only returns `Ok`.
    fn run<S, F>(
        &self,
        pass: &'static str,
        files: &[PathBuf],
        failures: &mut PhaseFailures,
        step: F,
    ) -> Result<(S, Vec<PathBuf>), TransformError>
    where
        S: Default + AddAssign + Send,
        F: Fn(&Path) -> Result<S, TransformError> + Sync,
    {
        let tracked = |path: &PathBuf| {
            let result = step(path.as_path());
            self.progress.inc(pass);
            if let Err(err) = &result {
                debug!(pass; "{}", err);
            }
            result
        };

        if !self.continue_on_error {
            let total = if self.parallel {
                files
                    .par_iter()
                    .map(tracked)
                    .try_reduce(S::default, |mut acc, stats| {
                        acc += stats;
                        Ok(acc)
                    })?
            } else {
                let mut total = S::default();
                for path in files {
                    total += tracked(path)?;
                }
                total
            };
            return Ok((total, files.to_vec()));
        }

        // Results stay in file order, so failures are reported deterministically
        let results: Vec<_> = if self.parallel {
            files.par_iter().map(tracked).collect()
        } else {
            files.iter().map(tracked).collect()
        };

        let mut total = S::default();
        let mut done = Vec::with_capacity(files.len());
        for (path, result) in files.iter().zip(results) {
            match result {
                Ok(stats) => {
                    total += stats;
                    done.push(path.clone());
                }
                Err(err) => failures.push(err),
            }
        }
        Ok((total, done))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const INDEX: &str = r##"<!DOCTYPE html><html><body>
        <h2>Getting Started</h2>
        <h3 id="setup"><a class="header-anchor" href="#setup">#</a> Setup</h3>
        <a href="/docs/rules/">Rules</a>
        <a href="docs/user-guide/migrating-to-8.0.0#notes">Migrate</a>
        <a href="#top">Top</a>
        <a href="https://eslint.org/blog">Blog</a>
    </body></html>"##;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("docs/rules")).unwrap();
        fs::create_dir_all(root.join("docs/user-guide")).unwrap();
        fs::write(root.join("index.html"), INDEX).unwrap();
        fs::write(
            root.join("docs/rules/index.html"),
            "<html><body><h2>Rules</h2><h3>no-undef</h3><a href=\"no-undef\">x</a></body></html>",
        )
        .unwrap();
        fs::write(root.join("docs/user-guide/style.css"), "a { color: red }").unwrap();
        dir
    }

    fn config(root: &Path) -> DocsetConfig {
        let mut config = DocsetConfig::default();
        config.site.root = root.to_path_buf();
        config.links.base = Some(root.to_path_buf());
        config
    }

    #[test]
    fn test_transform_site() {
        let dir = site();
        let report = transform_site(&config(dir.path())).unwrap();

        assert_eq!(report.documents, 2);
        assert_eq!(report.links, LinkStats { links: 6, rewritten: 3 });
        assert_eq!(report.toc, Some(TocStats { anchored: 4, skipped: 0 }));

        let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(index.contains(r#"href="docs/rules/index.html""#));
        assert!(index.contains(r#"href="docs/user-guide/migrating-to-8.0.0.html#notes""#));
        assert!(index.contains(r##"href="#top""##));
        assert!(index.contains(r#"href="https://eslint.org/blog""#));
        assert!(index.contains(r#"name="//apple_ref/cpp/Section/Getting Started""#));

        let rules = fs::read_to_string(dir.path().join("docs/rules/index.html")).unwrap();
        assert!(rules.contains(r#"href="no-undef.html""#));

        // Non-HTML files are never touched
        let css = fs::read_to_string(dir.path().join("docs/user-guide/style.css")).unwrap();
        assert_eq!(css, "a { color: red }");
    }

    #[test]
    fn test_transform_twice_is_stable() {
        let dir = site();
        let config = config(dir.path());
        transform_site(&config).unwrap();
        let once = fs::read_to_string(dir.path().join("index.html")).unwrap();

        let report = transform_site(&config).unwrap();
        assert_eq!(report.links.rewritten, 0);
        assert_eq!(report.toc, Some(TocStats { anchored: 0, skipped: 4 }));
        assert_eq!(fs::read_to_string(dir.path().join("index.html")).unwrap(), once);
    }

    #[test]
    fn test_toc_disabled() {
        let dir = site();
        let mut config = config(dir.path());
        config.toc.enable = false;

        let report = transform_site(&config).unwrap();
        assert_eq!(report.toc, None);
        let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(!index.contains("dashAnchor"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = site();
        let parallel = site();
        let mut parallel_config = config(parallel.path());
        parallel_config.transform.parallel = true;

        let a = transform_site(&config(sequential.path())).unwrap();
        let b = transform_site(&parallel_config).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            fs::read_to_string(sequential.path().join("index.html")).unwrap(),
            fs::read_to_string(parallel.path().join("index.html")).unwrap()
        );
    }

    fn broken_site() -> TempDir {
        let dir = site();
        fs::write(dir.path().join("a-broken.html"), [b'<', b'p', b'>', 0xff]).unwrap();
        dir
    }

    #[test]
    fn test_abort_on_first_failure() {
        let dir = broken_site();
        let err = transform_site(&config(dir.path())).unwrap_err();

        assert_eq!(
            err.to_string(),
            "could not apply transformations to documentation"
        );
        let cause = err.root_cause().to_string();
        assert!(cause.contains("a-broken.html"));

        // Sorted order: the broken file comes first, so nothing else was written
        let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert_eq!(index, INDEX);
    }

    #[test]
    fn test_continue_on_error() {
        let dir = broken_site();
        let mut config = config(dir.path());
        config.transform.continue_on_error = true;

        let err = transform_site(&config).unwrap_err();
        let failures = err
            .chain()
            .find_map(|e| e.downcast_ref::<PhaseFailures>())
            .unwrap();
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            failures.errors()[0],
            TransformError::Parse { .. }
        ));
        assert_eq!(
            failures.errors()[0].path(),
            dir.path().join("a-broken.html").as_path()
        );

        // The healthy documents were still transformed
        let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(index.contains(r#"href="docs/rules/index.html""#));
        assert!(index.contains("dashAnchor"));
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = transform_site(&config(&dir.path().join("nope"))).unwrap_err();
        let discovery = err
            .chain()
            .find_map(|e| e.downcast_ref::<TransformError>())
            .unwrap();
        assert!(matches!(discovery, TransformError::Discovery { .. }));
    }
}
