//! HTML documents: load, mutate, persist.
//!
//! A [`Document`] owns the parsed tree of one file for the duration of a
//! single rewrite step and is consumed by [`Document::save`].
//!
//! # Modules
//!
//! - `rewrite`: normalizes `<a href>` targets (see [`crate::link`])
//! - `toc`: wraps headings in named anchors for the viewer's ToC

pub mod rewrite;
pub mod toc;

pub use rewrite::{LinkRewriter, LinkStats};
pub use toc::{HeadingAnnotator, TocOptions, TocStats};

use kuchikiki::traits::*;
use kuchikiki::{ElementData, NodeDataRef, NodeRef};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TransformError;
use crate::persist;

/// Parsed HTML file.
pub struct Document {
    path: PathBuf,
    root: NodeRef,
}

impl Document {
    /// Read and parse a file.
    ///
    /// The HTML parser recovers from tag soup; content that is not UTF-8
    /// cannot be represented as a tree and is rejected.
    pub fn load(path: &Path) -> Result<Self, TransformError> {
        let bytes = fs::read(path).map_err(|source| TransformError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let html = String::from_utf8(bytes).map_err(|err| TransformError::Parse {
            path: path.to_path_buf(),
            reason: format!(
                "invalid UTF-8 at byte {}",
                err.utf8_error().valid_up_to()
            ),
        })?;
        Ok(Self::parse(path, &html))
    }

    /// Parse in-memory HTML, remembering `path` as the persistence target.
    pub fn parse(path: impl Into<PathBuf>, html: &str) -> Self {
        Self {
            path: path.into(),
            root: kuchikiki::parse_html().one(html),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All elements in document order (depth-first, pre-order).
    pub fn elements(&self) -> impl Iterator<Item = NodeDataRef<ElementData>> {
        self.root.descendants().elements()
    }

    /// Elements with the given local tag name, in document order.
    pub fn elements_named(&self, tag: &str) -> impl Iterator<Item = NodeDataRef<ElementData>> {
        self.elements().filter(move |el| &*el.name.local == tag)
    }

    /// Serialize the whole tree back to HTML.
    pub fn to_html(&self) -> Result<Vec<u8>, TransformError> {
        let mut out = Vec::new();
        self.root
            .serialize(&mut out)
            .map_err(|source| TransformError::Persist {
                path: self.path.clone(),
                source,
            })?;
        Ok(out)
    }

    /// Serialize and atomically replace the file on disk.
    pub fn save(self) -> Result<(), TransformError> {
        let html = self.to_html()?;
        persist::write_atomic(&self.path, &html).map_err(|source| TransformError::Persist {
            path: self.path,
            source,
        })
    }
}
