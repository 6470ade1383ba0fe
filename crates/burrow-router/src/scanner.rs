//! Directory walk
//!
//! Turns a route tree into an ordered list of [`RouteFile`] descriptors.
//! The walk is depth-first, pre-order: a directory's entries are handled in
//! listing order and a subdirectory is fully walked before its next sibling.

use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::ScanError;
use crate::fs::{DirEntry, DirectoryReader, EntryKind, LocalFs};
use crate::method::HttpMethod;
use crate::segment::{classify_segment, parse_file_name, resolve_route_path};

/// One route file found by the scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteFile {
    /// Where the file lives
    pub source: PathBuf,
    /// `source` relative to the scan root, `/`-separated (`users/[id]/index.get.rs`)
    pub relative: String,
    pub method: HttpMethod,
    /// Always starts with `/`
    pub route_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Extension a route file must carry, without the dot
    pub extension: String,
    /// Sort each listing by name so the output order does not depend on the OS
    pub sorted: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: "rs".to_string(),
            sorted: true,
        }
    }
}

/// Route scanner over a [`DirectoryReader`]
#[derive(Debug, Clone, Default)]
pub struct Scanner<R = LocalFs> {
    reader: R,
    options: ScanOptions,
}

impl Scanner<LocalFs> {
    /// Scanner over the local disk
    pub fn local(options: ScanOptions) -> Self {
        Self::new(LocalFs, options)
    }
}

struct Frame {
    entries: std::vec::IntoIter<DirEntry>,
    prefix: String,
    relative: String,
    /// Canonical identity of the directory being listed
    identity: PathBuf,
}

impl<R: DirectoryReader> Scanner<R> {
    pub fn new(reader: R, options: ScanOptions) -> Self {
        Self { reader, options }
    }

    /// Walks `root` and returns every route file below it
    ///
    /// Fails if `root` (or any directory below it) cannot be listed.
    /// Files without a recognised method token are skipped, not reported.
    pub fn scan(&self, root: &Path) -> Result<Vec<RouteFile>, ScanError> {
        let root_error = |source: io::Error| ScanError::Root {
            path: root.to_path_buf(),
            source,
        };

        let identity = self.reader.identity(root).map_err(root_error)?;
        let entries = self.list(root).map_err(root_error)?;

        let mut stack = vec![Frame {
            entries: entries.into_iter(),
            prefix: String::new(),
            relative: String::new(),
            identity,
        }];
        let mut routes = Vec::new();

        while let Some(frame) = stack.last_mut() {
            let Some(entry) = frame.entries.next() else {
                stack.pop();
                continue;
            };
            let relative = join_relative(&frame.relative, &entry.name);

            match entry.kind {
                EntryKind::Directory => {
                    let prefix = classify_segment(&entry.name).extend(&frame.prefix);
                    let io_error = |source: io::Error| ScanError::Io {
                        path: entry.path.clone(),
                        source,
                    };

                    // Only a directory that is its own ancestor is a loop;
                    // aliases of sibling trees are walked again.
                    let identity = self.reader.identity(&entry.path).map_err(io_error)?;
                    if stack.iter().any(|open| open.identity == identity) {
                        warn!("Skipping symlink loop at {}", entry.path.display());
                        continue;
                    }

                    let entries = self.list(&entry.path).map_err(io_error)?;
                    stack.push(Frame {
                        entries: entries.into_iter(),
                        prefix,
                        relative,
                        identity,
                    });
                }
                EntryKind::File => {
                    if let Some(route) = self.route_file(&frame.prefix, entry, relative) {
                        routes.push(route);
                    }
                }
                EntryKind::Other => {
                    debug!("Skipping {}: not a file or directory", entry.path.display());
                }
            }
        }

        Ok(routes)
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = self.reader.list(dir)?;
        if self.options.sorted {
            entries.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(entries)
    }

    fn route_file(&self, prefix: &str, entry: DirEntry, relative: String) -> Option<RouteFile> {
        let parsed = parse_file_name(&entry.name, &self.options.extension)?;

        let method = match parsed.method {
            Ok(method) => method,
            Err(err) => {
                debug!("Skipping {}: {}", entry.path.display(), err);
                return None;
            }
        };

        Some(RouteFile {
            route_path: resolve_route_path(prefix, &parsed.name),
            method,
            relative,
            source: entry.path,
        })
    }
}

/// Scans `root` on the local disk with default options
///
/// # Examples
///
/// ```no_run
/// let routes = burrow_router::scan("routes").unwrap();
/// for route in &routes {
///     println!("{} {}", route.method, route.route_path);
/// }
/// ```
pub fn scan(root: impl AsRef<Path>) -> Result<Vec<RouteFile>, ScanError> {
    Scanner::local(ScanOptions::default()).scan(root.as_ref())
}

fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
