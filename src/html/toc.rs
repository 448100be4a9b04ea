//! Heading anchors for the viewer's table of contents.
//!
//! Each heading is wrapped in a named anchor the viewer indexes:
//!
//! ```html
//! <a name="//apple_ref/cpp/Section/Options" class="dashAnchor"><h2 id="options">Options</h2></a>
//! ```
//!
//! Headings sharing the same text get the same name; the viewer tolerates
//! duplicates, so no de-duplication is done.

use html5ever::{LocalName, Namespace, QualName};
use kuchikiki::{Attribute, ExpandedName, NodeRef};
use std::ops::AddAssign;
use std::path::Path;

use super::Document;
use crate::error::TransformError;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Naming and level settings for heading anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocOptions {
    /// Namespace prefix, e.g. `//apple_ref/cpp`.
    pub prefix: String,
    /// Entry category, e.g. `Section`.
    pub category: String,
    /// Class set on the generated anchor.
    pub class: String,
    /// Lowest heading level annotated (inclusive).
    pub min_level: u8,
    /// Highest heading level annotated (inclusive).
    pub max_level: u8,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            prefix: "//apple_ref/cpp".into(),
            category: "Section".into(),
            class: "dashAnchor".into(),
            min_level: 2,
            max_level: 6,
        }
    }
}

impl TocOptions {
    /// `{prefix}/{category}/{text}`
    pub fn anchor_name(&self, text: &str) -> String {
        format!(
            "{}/{}/{}",
            self.prefix.trim_end_matches('/'),
            self.category,
            text
        )
    }

    /// Heading level of a tag name, if it is one we annotate.
    fn level(&self, tag: &str) -> Option<u8> {
        let mut chars = tag.chars();
        if chars.next() != Some('h') {
            return None;
        }
        let level = chars.next()?.to_digit(10)?;
        if chars.next().is_some() {
            return None;
        }
        let level = u8::try_from(level).ok()?;
        (self.min_level..=self.max_level)
            .contains(&level)
            .then_some(level)
    }
}

/// Counters for annotated documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TocStats {
    /// Headings wrapped in a new anchor.
    pub anchored: usize,
    /// Headings already wrapped by an earlier run.
    pub skipped: usize,
}

impl AddAssign for TocStats {
    fn add_assign(&mut self, rhs: Self) {
        self.anchored += rhs.anchored;
        self.skipped += rhs.skipped;
    }
}

/// Wraps headings in named anchors.
#[derive(Debug, Clone, Default)]
pub struct HeadingAnnotator {
    options: TocOptions,
}

impl HeadingAnnotator {
    pub fn new(options: TocOptions) -> Self {
        Self { options }
    }

    /// Wrap every matching heading, in document order.
    ///
    /// The heading node itself is moved, not copied, so its tag, attributes
    /// and inner markup are unchanged inside the new anchor.
    pub fn annotate(&self, doc: &Document) -> TocStats {
        let mut stats = TocStats::default();

        // Collect first: the splice below changes the tree being walked
        let headings: Vec<NodeRef> = doc
            .elements()
            .filter(|el| self.options.level(&el.name.local).is_some())
            .map(|el| el.as_node().clone())
            .collect();

        for heading in headings {
            let name = self.options.anchor_name(&heading.text_contents());
            if is_wrapped(&heading, &name) {
                stats.skipped += 1;
                continue;
            }

            let anchor = self.new_anchor(name);
            heading.insert_before(anchor.clone());
            anchor.append(heading);
            stats.anchored += 1;
        }

        stats
    }

    /// Load, annotate and atomically persist one file.
    ///
    /// Nothing is written when every heading was already anchored.
    pub fn annotate_file(&self, path: &Path) -> Result<TocStats, TransformError> {
        let doc = Document::load(path)?;
        let stats = self.annotate(&doc);
        if stats.anchored > 0 {
            doc.save()?;
        }
        Ok(stats)
    }

    fn new_anchor(&self, name: String) -> NodeRef {
        let tag = QualName::new(
            None,
            Namespace::from(HTML_NAMESPACE),
            LocalName::from("a"),
        );
        NodeRef::new_element(
            tag,
            [
                (
                    ExpandedName::new("", "name"),
                    Attribute {
                        prefix: None,
                        value: name,
                    },
                ),
                (
                    ExpandedName::new("", "class"),
                    Attribute {
                        prefix: None,
                        value: self.options.class.clone(),
                    },
                ),
            ],
        )
    }
}

/// Already anchored under this exact name by an earlier run.
///
/// A heading holding a link of its own comes back from a reparse split up:
/// an `<a>` cannot nest inside another, so the parser closes the wrapper
/// right before the heading and opens an empty copy as its first child.
/// Either shape counts as wrapped.
fn is_wrapped(heading: &NodeRef, name: &str) -> bool {
    let named = |node: Option<NodeRef>| {
        node.as_ref().and_then(|n| n.as_element()).is_some_and(|el| {
            &*el.name.local == "a" && el.attributes.borrow().get("name") == Some(name)
        })
    };

    named(heading.parent())
        || (named(previous_element(heading)) && named(first_element_child(heading)))
}

fn previous_element(node: &NodeRef) -> Option<NodeRef> {
    let mut prev = node.previous_sibling();
    while let Some(sibling) = prev {
        if sibling.as_element().is_some() {
            return Some(sibling);
        }
        prev = sibling.previous_sibling();
    }
    None
}

fn first_element_child(node: &NodeRef) -> Option<NodeRef> {
    node.children().find(|child| child.as_element().is_some())
}
