//! External pipeline steps around the transform phase.

mod runner;

pub use runner::{run_post_steps, run_pre_steps};
