//! `[site]` section configuration.
//!
//! ```toml
//! [site]
//! root = "build/website/_site"   # generated HTML tree, rewritten in place
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory holding the generated site. Relative to the config file.
    pub root: PathBuf,
}

impl SiteConfig {
    pub const ROOT: FieldPath = FieldPath::new("site.root");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.root.as_os_str().is_empty() {
            diag.error(Self::ROOT, "must not be empty");
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("_site"),
        }
    }
}
