//! Configuration section definitions.
//!
//! Each module corresponds to a section in `docset.toml`:
//!
//! | Module      | TOML Section            | Purpose                          |
//! |-------------|-------------------------|----------------------------------|
//! | `site`      | `[site]`                | Generated site location          |
//! | `links`     | `[links]`               | Link normalization               |
//! | `toc`       | `[toc]`                 | Heading anchors                  |
//! | `transform` | `[transform]`           | Error policy and parallelism     |
//! | `pipeline`  | `[[pipeline.pre/post]]` | External steps around transform  |

mod links;
mod pipeline;
mod site;
mod toc;
mod transform;

pub use links::LinksConfig;
pub use pipeline::{PipelineConfig, StepConfig};
pub use site::SiteConfig;
pub use toc::TocConfig;
pub use transform::TransformConfig;
