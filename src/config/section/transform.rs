//! `[transform]` section configuration.
//!
//! ```toml
//! [transform]
//! parallel = false            # rewrite files on a thread pool
//! continue_on_error = false   # attempt every file, report failures together
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub parallel: bool,
    pub continue_on_error: bool,
}
