//! Error type shared by the stores, the sync engine and relocation.
//!
//! Core code never prints. Every failure ends up as a [`RecordsError`]
//! and the CLI layer decides how to show it.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("{what} not found at {}", .path.display())]
    NotFound { what: &'static str, path: PathBuf },

    #[error("permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuration file {} is corrupted: {source}", .path.display())]
    MalformedConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} cannot be empty")]
    EmptyInput(&'static str),

    #[error("service name `{0}` cannot contain ':'")]
    InvalidServiceName(String),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("no write access to {}", .0.display())]
    ReadOnlyDirectory(PathBuf),

    #[error("moving the log file failed ({source}); data file moved back to {}", .restored.display())]
    RelocationRolledBack {
        restored: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "relocation left files split: data file is at {}, log file is at {}",
        .data.display(),
        .log.display()
    )]
    PartialRelocation { data: PathBuf, log: PathBuf },

    #[error("prompt failed: {0}")]
    Prompt(#[source] io::Error),
}

impl RecordsError {
    /// Classify an I/O failure on `path`.
    pub fn io(what: &'static str, path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => RecordsError::NotFound {
                what,
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => RecordsError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => RecordsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_classification() {
        let path = Path::new("/tmp/x.txt");

        let err = RecordsError::io("data file", path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, RecordsError::NotFound { what: "data file", .. }));

        let err = RecordsError::io(
            "data file",
            path,
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, RecordsError::PermissionDenied { .. }));

        let err = RecordsError::io("data file", path, io::Error::other("disk on fire"));
        assert!(err.to_string().contains("disk on fire"));
    }
}
