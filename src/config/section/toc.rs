//! `[toc]` section configuration.
//!
//! ```toml
//! [toc]
//! enable = true
//! prefix = "//apple_ref/cpp"
//! category = "Section"
//! class = "dashAnchor"
//! min_level = 2
//! max_level = 6
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::html::TocOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Run the heading pass after the link pass.
    pub enable: bool,
    pub prefix: String,
    pub category: String,
    pub class: String,
    pub min_level: u8,
    pub max_level: u8,
}

impl TocConfig {
    pub const CATEGORY: FieldPath = FieldPath::new("toc.category");
    pub const MIN_LEVEL: FieldPath = FieldPath::new("toc.min_level");
    pub const MAX_LEVEL: FieldPath = FieldPath::new("toc.max_level");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, level) in [
            (Self::MIN_LEVEL, self.min_level),
            (Self::MAX_LEVEL, self.max_level),
        ] {
            if !(1..=6).contains(&level) {
                diag.error(field, format!("heading level {level} is not between 1 and 6"));
            }
        }
        if self.min_level > self.max_level {
            diag.error(
                Self::MIN_LEVEL,
                format!(
                    "min_level ({}) is greater than max_level ({})",
                    self.min_level, self.max_level
                ),
            );
        }
        if self.category.is_empty() || self.category.contains('/') {
            diag.error(Self::CATEGORY, "must be a single non-empty name");
        }
    }

    pub fn options(&self) -> TocOptions {
        TocOptions {
            prefix: self.prefix.clone(),
            category: self.category.clone(),
            class: self.class.clone(),
            min_level: self.min_level,
            max_level: self.max_level,
        }
    }
}

impl Default for TocConfig {
    fn default() -> Self {
        let options = TocOptions::default();
        Self {
            enable: true,
            prefix: options.prefix,
            category: options.category,
            class: options.class,
            min_level: options.min_level,
            max_level: options.max_level,
        }
    }
}
