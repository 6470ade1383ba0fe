//! Scan errors
//!
//! Both variants are startup misconfigurations; nothing in the scanner
//! retries or recovers from them.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The route root is missing, not a directory, or unreadable
    #[error("route directory {} cannot be read", .path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory below the root could not be listed
    #[error("failed to list {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Path of the directory that failed
    pub fn path(&self) -> &PathBuf {
        match self {
            ScanError::Root { path, .. } | ScanError::Io { path, .. } => path,
        }
    }
}
