//! Transformation error types.

use owo_colors::OwoColorize;
use std::error::Error as _;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::link::LinkError;
use crate::utils::plural_count;

/// Failure while transforming one document (or discovering the tree).
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("cannot traverse `{}`", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error when reading `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse `{}` as HTML: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("cannot normalize link `{href}` in `{}`", path.display())]
    Link {
        path: PathBuf,
        href: String,
        #[source]
        source: LinkError,
    },

    #[error("cannot write `{}`", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TransformError {
    /// File the error is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::Discovery { path, .. }
            | Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::Link { path, .. }
            | Self::Persist { path, .. } => path,
        }
    }
}

/// Failures collected when the phase keeps going past a broken document.
#[derive(Debug, Default)]
pub struct PhaseFailures {
    errors: Vec<TransformError>,
}

impl PhaseFailures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: TransformError) {
        self.errors.push(err);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[TransformError] {
        &self.errors
    }

    /// Convert to Result (returns Err if anything failed).
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for PhaseFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}",
            format!("{} failed:", plural_count(self.errors.len(), "document"))
                .red()
                .bold()
        )?;
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "{} {err}", "→".red())?;
            let mut source = err.source();
            while let Some(cause) = source {
                write!(f, "\n  {} {cause}", "caused by:".yellow())?;
                source = cause.source();
            }
            if i + 1 < self.errors.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for PhaseFailures {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_error_display_carries_context() {
        let err = TransformError::Link {
            path: PathBuf::from("site/docs/index.html"),
            href: "bad\nhref".into(),
            source: LinkError::Empty,
        };
        let display = err.to_string();
        assert!(display.contains("site/docs/index.html"));
        assert!(display.contains("bad\nhref"));

        let err = TransformError::Persist {
            path: PathBuf::from("a.html"),
            source: Error::new(ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("a.html"));
        assert_eq!(err.path(), Path::new("a.html"));
    }

    #[test]
    fn test_phase_failures() {
        let mut failures = PhaseFailures::new();
        assert!(failures.is_empty());

        failures.push(TransformError::Parse {
            path: PathBuf::from("a.html"),
            reason: "invalid UTF-8".into(),
        });
        failures.push(TransformError::Io {
            path: PathBuf::from("b.html"),
            source: Error::new(ErrorKind::NotFound, "gone"),
        });
        assert_eq!(failures.len(), 2);

        let display = failures.to_string();
        assert!(display.contains("2 documents failed"));
        assert!(display.contains("a.html"));
        assert!(display.contains("gone"));

        assert!(failures.into_result().is_err());
        assert!(PhaseFailures::new().into_result().is_ok());
    }
}
