//! Path and href utilities.
//!
//! - [`fs`]: filesystem path normalization (`normalize_path`)
//! - [`route`]: href string helpers (`is_external_link`, `split_path_fragment`, `extension`)

pub mod fs;
pub mod route;

pub use fs::normalize_path;
