//! Command-line interface module.

mod args;
pub mod build;
pub mod resolve;
pub mod transform;

pub use args::{Cli, Commands, TransformArgs};
