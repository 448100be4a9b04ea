//! Atomic document persistence.
//!
//! Content is written to a temporary sibling of the target and renamed over
//! it. A failure at any point before the rename leaves the original file
//! untouched; the temporary file is removed when the stage is dropped.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Content written next to its target, not yet visible under the target name.
pub struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// Path of the temporary file holding the staged content.
    #[cfg(test)]
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Rename the staged content over the target.
    pub fn commit(self) -> io::Result<()> {
        self.temp
            .persist(&self.target)
            .map(|_| ())
            .map_err(|err| err.error)
    }
}

/// Write `content` to a temporary file in the target's directory.
pub fn stage(target: &Path, content: &[u8]) -> io::Result<StagedFile> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".docset-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(content)?;

    // Temp files are created private; keep the target's mode instead
    if let Ok(meta) = fs::metadata(target) {
        temp.as_file().set_permissions(meta.permissions())?;
    }
    temp.as_file().sync_all()?;

    Ok(StagedFile {
        temp,
        target: target.to_path_buf(),
    })
}

/// Replace `target` with `content` atomically.
pub fn write_atomic(target: &Path, content: &[u8]) -> io::Result<()> {
    stage(target, content)?.commit()
}
