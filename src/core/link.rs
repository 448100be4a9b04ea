//! Link classification utilities.

use crate::utils::path::route::is_external_link;

/// Syntactic classification of hrefs found in generated documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// External link with URL scheme (https://, mailto:, etc.) or `//host`.
    External(&'a str),
    /// Pure fragment/anchor link (#section). Value is anchor without `#`.
    Fragment(&'a str),
    /// Root-relative path (/docs/rules). Value keeps the leading `/`.
    SiteRoot(&'a str),
    /// Path relative to the current document (rules/, page#anchor).
    FileRelative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a link string into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if is_external_link(link) || link.starts_with("//") {
            Self::External(link)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::FileRelative(link)
        }
    }

    /// Whether the link addresses a file in the local tree.
    #[inline]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::SiteRoot(_) | Self::FileRelative(_))
    }
}
