//! Config field paths.

use std::fmt;

/// Dotted path of a config field, e.g. `toc.min_level`.
///
/// Sections expose their paths as associated constants so diagnostics
/// never spell a field name by hand:
///
/// ```ignore
/// diag.error(TocConfig::MIN_LEVEL, "must be between 1 and 6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.0)
    }
}
