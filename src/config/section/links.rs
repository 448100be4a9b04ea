//! `[links]` section configuration.
//!
//! Controls how `<a href>` targets are normalized.
//!
//! ```toml
//! [links]
//! base = "build/website/_site"   # directory probe base (default: site.root)
//! index = "index.html"           # appended to directory links
//! extension = ".html"            # appended to extension-less pages
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::link::{DEFAULT_EXTENSION, DEFAULT_INDEX};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Directory that link paths are probed against.
    ///
    /// `None` falls back to `[site].root` once paths are normalized.
    pub base: Option<PathBuf>,

    pub index: String,

    pub extension: String,
}

impl LinksConfig {
    pub const INDEX: FieldPath = FieldPath::new("links.index");
    pub const EXTENSION: FieldPath = FieldPath::new("links.extension");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.index.is_empty() {
            diag.error(Self::INDEX, "must not be empty");
        } else if self.index.contains('/') {
            diag.error(Self::INDEX, "must be a file name, not a path");
        }

        if !self.extension.starts_with('.') || self.extension.len() < 2 {
            diag.error_with_hint(
                Self::EXTENSION,
                format!("`{}` is not an extension", self.extension),
                "start it with a dot, e.g. `.html`",
            );
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            base: None,
            index: DEFAULT_INDEX.into(),
            extension: DEFAULT_EXTENSION.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_links_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.links.base, None);
        assert_eq!(config.links.index, "index.html");
        assert_eq!(config.links.extension, ".html");
    }

    #[test]
    fn test_links_override() {
        let config = test_parse_config("[links]\nindex = \"default.htm\"\nextension = \".htm\"");
        assert_eq!(config.links.index, "default.htm");
        assert_eq!(config.links.extension, ".htm");
    }

    #[test]
    fn test_links_validate() {
        let config = test_parse_config("[links]\nindex = \"\"\nextension = \"html\"");
        let mut diag = ConfigDiagnostics::new();
        config.links.validate(&mut diag);
        assert_eq!(diag.errors().len(), 2);
    }
}
