//! `<a href>` normalization.

use std::ops::AddAssign;
use std::path::Path;

use super::Document;
use crate::error::TransformError;
use crate::link::{DirProbe, LinkTransformer};

/// Counters for one or more rewritten documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Anchors carrying a non-empty href.
    pub links: usize,
    /// Anchors whose href changed.
    pub rewritten: usize,
}

impl AddAssign for LinkStats {
    fn add_assign(&mut self, rhs: Self) {
        self.links += rhs.links;
        self.rewritten += rhs.rewritten;
    }
}

/// Applies a [`LinkTransformer`] to every anchor of a document.
pub struct LinkRewriter<P> {
    transformer: LinkTransformer<P>,
}

impl<P: DirProbe> LinkRewriter<P> {
    pub fn new(transformer: LinkTransformer<P>) -> Self {
        Self { transformer }
    }

    /// Rewrite hrefs in place.
    ///
    /// Anchors without an href (named targets) or with an empty one are left
    /// exactly as they are. A link that cannot be normalized fails the whole
    /// document: shipping a dangling link is worse than stopping.
    pub fn rewrite(&self, doc: &Document) -> Result<LinkStats, TransformError> {
        let mut stats = LinkStats::default();

        for anchor in doc.elements_named("a") {
            let mut attrs = anchor.attributes.borrow_mut();
            let href = match attrs.get("href") {
                Some(href) if !href.is_empty() => href.to_string(),
                _ => continue,
            };

            let normalized =
                self.transformer
                    .transform(&href)
                    .map_err(|source| TransformError::Link {
                        path: doc.path().to_path_buf(),
                        href: href.clone(),
                        source,
                    })?;

            stats.links += 1;
            if normalized != href {
                attrs.insert("href", normalized);
                stats.rewritten += 1;
            }
        }

        Ok(stats)
    }

    /// Load, rewrite and atomically persist one file.
    ///
    /// A document with nothing to rewrite is left byte-for-byte as it was.
    pub fn rewrite_file(&self, path: &Path) -> Result<LinkStats, TransformError> {
        let doc = Document::load(path)?;
        let stats = self.rewrite(&doc)?;
        if stats.rewritten > 0 {
            doc.save()?;
        }
        Ok(stats)
    }
}
