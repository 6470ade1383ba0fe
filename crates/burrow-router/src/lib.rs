//! burrow-router: file-system route discovery
//!
//! Directory and file names under a route root describe the HTTP surface:
//!
//! ```text
//! routes/
//!   index.get.rs              GET    /
//!   users/
//!     index.post.rs           POST   /users
//!     [id]/
//!       index.get.rs          GET    /users/:id
//!   (admin)/
//!     dashboard.get.rs        GET    /dashboard
//!   health.all.rs             *      /health
//! ```
//!
//! - `(name)` directories group files without adding a path segment
//! - `[name]` directories become a `:name` parameter
//! - the last dot-separated token before the extension names the method
//! - `index` and `route` map to the enclosing directory
//!
//! The scanner only reports what it finds. Duplicate routes come back as-is;
//! the code mounting them decides what a collision means.

pub mod error;
pub mod fs;
mod method;
mod scanner;
mod segment;

pub use error::ScanError;
pub use fs::{DirEntry, DirectoryReader, EntryKind, LocalFs};
pub use method::{HttpMethod, UnknownMethod, ALL_METHODS};
pub use scanner::{scan, RouteFile, ScanOptions, Scanner};
pub use segment::{classify_segment, parse_file_name, resolve_route_path, RouteFileName, Segment};
