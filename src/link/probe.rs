//! Directory detection for link normalization.

use std::fs;
use std::path::{Path, PathBuf};

/// Answers "does this href path name a directory?".
pub trait DirProbe {
    fn is_dir(&self, path: &Path) -> bool;
}

impl<F> DirProbe for F
where
    F: Fn(&Path) -> bool,
{
    #[inline]
    fn is_dir(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Filesystem probe resolving hrefs against a fixed base directory.
///
/// A path that does not exist is "not a directory": links pointing outside
/// the local file set are expected, not errors.
#[derive(Debug, Clone)]
pub struct FsProbe {
    base: PathBuf,
}

impl FsProbe {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl DirProbe for FsProbe {
    fn is_dir(&self, path: &Path) -> bool {
        fs::metadata(self.base.join(path)).is_ok_and(|meta| meta.is_dir())
    }
}

/// Probe that never reports a directory (pure string mode).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDirs;

impl DirProbe for NoDirs {
    #[inline]
    fn is_dir(&self, _path: &Path) -> bool {
        false
    }
}
