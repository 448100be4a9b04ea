//! Recursive discovery of the documentation tree.

use jwalk::WalkDir;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::TransformError;

/// List every file and directory under `root`, depth-first.
///
/// Parents come before their children and siblings are sorted by name, so
/// the order is stable across runs. `root` itself is not included.
/// Symlinks are listed but never followed, which rules out cycles.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>, TransformError> {
    let meta = fs::metadata(root).map_err(|source| TransformError::Discovery {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(TransformError::Discovery {
            path: root.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        });
    }

    let mut paths = Vec::new();
    let walker = WalkDir::new(root)
        .sort(true)
        .skip_hidden(false)
        .follow_links(false)
        .min_depth(1);

    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
            let source = err
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
            TransformError::Discovery { path, source }
        })?;
        paths.push(entry.path());
    }

    Ok(paths)
}

/// Keep regular files whose extension is `ext` (without the dot).
pub fn filter_by_extension(paths: Vec<PathBuf>, ext: &str) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == ext))
        .filter(|p| p.is_file())
        .collect()
}
