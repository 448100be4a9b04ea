//! `[pipeline]` section configuration.
//!
//! External steps around the transform phase, run in order by `docset build`.
//!
//! ```toml
//! [[pipeline.pre]]
//! name = "clone"
//! command = ["git", "clone", "https://github.com/eslint/website.git", "build/website"]
//!
//! [[pipeline.pre]]
//! name = "generate"
//! command = ["npm", "run", "build"]
//! cwd = "build/website"
//! quiet = false
//!
//! [[pipeline.post]]
//! name = "package"
//! command = ["dashing", "build", "eslint"]
//! cwd = "$DOCSET_SITE_DIR"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Steps before the transform phase.
    pub pre: Vec<StepConfig>,
    /// Steps after the transform phase.
    pub post: Vec<StepConfig>,
}

impl PipelineConfig {
    pub const PRE: FieldPath = FieldPath::new("pipeline.pre");
    pub const POST: FieldPath = FieldPath::new("pipeline.post");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, steps) in [(Self::PRE, &self.pre), (Self::POST, &self.post)] {
            for (i, step) in steps.iter().enumerate() {
                if step.enable && step.command.is_empty() {
                    diag.error_with_hint(
                        field,
                        format!("step #{} (`{}`) has an empty command", i + 1, step.display_name()),
                        "set `command = [\"program\", \"arg\", ...]` or `enable = false`",
                    );
                }
            }
        }
    }
}

/// One external command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Display name for logging (defaults to the program).
    pub name: Option<String>,

    /// Program and arguments. `$DOCSET_ROOT` and `$DOCSET_SITE_DIR` are substituted.
    pub command: Vec<String>,

    /// Working directory, relative to the config file. Variables are substituted.
    pub cwd: Option<PathBuf>,

    pub enable: bool,

    /// Hide the step's stdout.
    pub quiet: bool,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            name: None,
            command: Vec::new(),
            cwd: None,
            enable: true,
            quiet: true,
        }
    }
}

impl StepConfig {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.command.first().map(String::as_str))
            .unwrap_or("step")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_pipeline_steps() {
        let config = test_parse_config(
            r#"
[[pipeline.pre]]
name = "clone"
command = ["git", "clone", "https://example.com/site.git", "build/website"]

[[pipeline.pre]]
command = ["npm", "run", "build"]
cwd = "build/website"
quiet = false

[[pipeline.post]]
command = ["dashing", "build"]
enable = false
"#,
        );

        assert_eq!(config.pipeline.pre.len(), 2);
        assert_eq!(config.pipeline.pre[0].display_name(), "clone");
        assert!(config.pipeline.pre[0].quiet);
        assert_eq!(config.pipeline.pre[1].display_name(), "npm");
        assert!(!config.pipeline.pre[1].quiet);
        assert!(!config.pipeline.post[0].enable);
    }

    #[test]
    fn test_pipeline_empty_command() {
        let config = test_parse_config(
            "[[pipeline.pre]]\nname = \"noop\"\n\n[[pipeline.post]]\nenable = false",
        );
        let mut diag = ConfigDiagnostics::new();
        config.pipeline.validate(&mut diag);

        // Disabled steps are not checked
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, PipelineConfig::PRE);
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(StepConfig::default().display_name(), "step");
    }
}
