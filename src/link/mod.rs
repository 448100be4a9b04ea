//! Href normalization for offline viewing.
//!
//! An offline docset has no server rewriting `/docs/rules/` into
//! `/docs/rules/index.html`, so every internal href must name a concrete
//! file. [`LinkTransformer`] maps one href to that file-correct form.
//!
//! | Input                    | Output                        |
//! |--------------------------|-------------------------------|
//! | `#anchor`                | `#anchor`                     |
//! | `https://eslint.org`     | `https://eslint.org`          |
//! | `page`                   | `page.html`                   |
//! | `page#anchor`            | `page.html#anchor`            |
//! | `folder/`                | `folder/index.html`           |
//! | `/docs/rules/`           | `docs/rules/index.html`       |
//! | `migrating-to-8.0.0`     | `migrating-to-8.0.0.html`     |
//!
//! Directory detection is the only I/O and goes through [`DirProbe`], so the
//! string logic is testable without a filesystem.

mod probe;

pub use probe::{DirProbe, FsProbe, NoDirs};

use percent_encoding::percent_decode_str;
use std::path::Path;
use thiserror::Error;

use crate::core::LinkKind;
use crate::utils::path::route::{extension, split_path_fragment, split_path_query};

/// Default document served for a directory.
pub const DEFAULT_INDEX: &str = "index.html";

/// Default extension every internal document link must carry.
pub const DEFAULT_EXTENSION: &str = ".html";

/// An href that cannot be normalized into a file path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("empty href")]
    Empty,

    #[error("href `{href}` contains control character {ch:?}")]
    ControlChar { href: String, ch: char },
}

/// Rewrites hrefs into extension-qualified, root-free file paths.
#[derive(Debug, Clone)]
pub struct LinkTransformer<P> {
    probe: P,
    index: String,
    extension: String,
}

impl<P: DirProbe> LinkTransformer<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            index: DEFAULT_INDEX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Override the directory index file and the document extension.
    pub fn with_names(mut self, index: impl Into<String>, extension: impl Into<String>) -> Self {
        self.index = index.into();
        self.extension = extension.into();
        self
    }

    /// Normalize a single href.
    ///
    /// Steps, in order:
    /// 1. same-page fragments and external URLs are returned untouched
    /// 2. fragment (`#..`) and query (`?..`) are split off
    /// 3. a rooted path is made relative to the root
    /// 4. directories (probed or `/`-terminated) get the index file appended
    /// 5. anything not ending in the document extension gets it appended
    /// 6. query and fragment are re-attached
    pub fn transform(&self, href: &str) -> Result<String, LinkError> {
        let kind = LinkKind::parse(href);
        if matches!(kind, LinkKind::Fragment(_)) {
            return Ok(href.to_string());
        }

        if href.is_empty() {
            return Err(LinkError::Empty);
        }
        if let Some(ch) = href.chars().find(char::is_ascii_control) {
            return Err(LinkError::ControlChar {
                href: href.to_string(),
                ch,
            });
        }
        if !kind.is_local() {
            return Ok(href.to_string());
        }

        let (path, fragment) = split_path_fragment(href);
        let (path, query) = split_path_query(path);

        // `?page=2` and friends address the current document
        if path.is_empty() {
            return Ok(href.to_string());
        }

        let mut path = match kind {
            LinkKind::SiteRoot(_) => path.trim_start_matches('/').to_string(),
            _ => path.to_string(),
        };

        if path.is_empty() || path.ends_with('/') || self.is_dir(&path) {
            append_index(&mut path, &self.index);
        }

        if extension(&path) != Some(self.extension.as_str()) {
            path.push_str(&self.extension);
        }

        if let Some(query) = query {
            path.push('?');
            path.push_str(query);
        }
        if let Some(fragment) = fragment {
            path.push('#');
            path.push_str(fragment);
        }

        Ok(path)
    }

    /// Probe with the percent-decoded path, which is what the filesystem sees.
    fn is_dir(&self, path: &str) -> bool {
        let decoded = percent_decode_str(path).decode_utf8_lossy();
        self.probe.is_dir(Path::new(decoded.as_ref()))
    }
}

/// `dir/` -> `dir/index.html`, `dir` -> `dir/index.html`, `` -> `index.html`.
fn append_index(path: &mut String, index: &str) {
    if !path.is_empty() && !path.ends_with('/') {
        path.push('/');
    }
    path.push_str(index);
}
