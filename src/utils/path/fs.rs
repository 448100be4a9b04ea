//! Filesystem path normalization.

use std::path::{Path, PathBuf};

/// Absolute form of `path`.
///
/// Existing paths are canonicalized (symlinks, `.` and `..` resolved).
/// Paths that do not exist yet, such as a site root a pre step will create,
/// are made absolute against the current directory without touching disk.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_existing_resolves_dots() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("a/b")).unwrap();

        let normalized = normalize_path(&dir.path().join("a/b/../b/."));
        assert_eq!(normalized, dir.path().canonicalize().unwrap().join("a/b"));
    }

    #[test]
    fn test_normalize_missing_absolute_untouched() {
        let path = Path::new("/nonexistent/docset/_site");
        assert_eq!(normalize_path(path), path);
    }

    #[test]
    fn test_normalize_missing_relative_is_absolute() {
        assert!(normalize_path(Path::new("not/yet/generated")).is_absolute());
    }
}
