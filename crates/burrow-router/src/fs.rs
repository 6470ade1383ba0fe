//! Filesystem collaborator
//!
//! The scanner only needs to list a directory and tell files from
//! directories. [`LocalFs`] does that against the real disk; tests and
//! embedders can supply their own [`DirectoryReader`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a directory entry points at, after following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Other,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Directory listing and stat operations used by the scanner
pub trait DirectoryReader {
    /// List the entries of `dir`, in whatever order the source yields them
    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    /// Stable identity of `dir`, used to notice symlink loops
    ///
    /// Two paths reaching the same directory must return the same identity.
    fn identity(&self, dir: &Path) -> io::Result<PathBuf> {
        Ok(dir.to_path_buf())
    }
}

/// The local disk via `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl DirectoryReader for LocalFs {
    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        fs::read_dir(dir)?
            .map(|entry| {
                let entry = entry?;
                let path = entry.path();
                // fs::metadata follows symlinks, so a linked directory is walked
                let metadata = fs::metadata(&path)?;
                let kind = if metadata.is_dir() {
                    EntryKind::Directory
                } else if metadata.is_file() {
                    EntryKind::File
                } else {
                    EntryKind::Other
                };

                Ok(DirEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    path,
                    kind,
                })
            })
            .collect()
    }

    fn identity(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(dir)
    }
}
