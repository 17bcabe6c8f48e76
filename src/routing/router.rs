//! Ordered fallthrough router
//!
//! Entries are tried in registration order. Every entry whose location covers
//! the request path gets a chance to supply a file; a miss moves on to the next
//! covering entry instead of ending the search. This lets an override directory
//! be layered ahead of a fallback directory under the same location.

use super::matcher::{decode_segments, is_directory_suffix, strip_location};
use crate::config::{Entry, RouteTable};
use std::path::{Path, PathBuf};

/// Outcome of routing one request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// File that answers the request
    Found(PathBuf),
    /// Directory requested without its trailing slash; carries the corrected path
    Redirect(String),
    /// No entry produced a file; carries the request path for reporting
    NotFound(String),
}

/// What a single entry offers for a request
enum Candidate {
    File(PathBuf),
    Directory,
    Miss,
}

/// Immutable routing state shared by every connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    routes: RouteTable,
    index_files: Vec<String>,
}

impl Router {
    pub const fn new(routes: RouteTable, index_files: Vec<String>) -> Self {
        Self {
            routes,
            index_files,
        }
    }

    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn index_files(&self) -> &[String] {
        &self.index_files
    }

    /// Decide which registered entry serves `request_path`.
    ///
    /// Only reads the filesystem; safe to call concurrently.
    ///
    /// A file from any covering entry beats a directory hit. The trailing-slash
    /// redirect is only issued when no entry supplies a file.
    pub fn dispatch(&self, request_path: &str) -> Dispatch {
        let mut directory_hit = false;

        for entry in &self.routes {
            let Some(suffix) = strip_location(&entry.location, request_path) else {
                continue;
            };

            match self.candidate(entry, suffix) {
                Candidate::File(path) => return Dispatch::Found(path),
                Candidate::Directory => directory_hit = true,
                Candidate::Miss => {}
            }
        }

        if directory_hit {
            Dispatch::Redirect(redirect_target(request_path))
        } else {
            Dispatch::NotFound(request_path.to_string())
        }
    }

    fn candidate(&self, entry: &Entry, suffix: &str) -> Candidate {
        // A file entry answers only for its exact location
        if is_file(&entry.path) {
            return if suffix.is_empty() {
                Candidate::File(entry.path.clone())
            } else {
                Candidate::Miss
            };
        }

        let Some(segments) = decode_segments(suffix) else {
            return Candidate::Miss;
        };
        let base = segments
            .iter()
            .fold(entry.path.clone(), |path, segment| path.join(segment));

        if is_directory_suffix(suffix) {
            return self
                .index_files
                .iter()
                .map(|name| base.join(name))
                .find(|path| is_file(path))
                .map_or(Candidate::Miss, Candidate::File);
        }

        if is_file(&base) {
            Candidate::File(base)
        } else if base.is_dir() {
            Candidate::Directory
        } else {
            Candidate::Miss
        }
    }
}

/// `request_path` with a trailing slash and exactly one leading slash.
///
/// `//host/dir` must not become a scheme-relative `Location`.
fn redirect_target(request_path: &str) -> String {
    format!("/{}/", request_path.trim_start_matches('/'))
}

fn is_file(path: &Path) -> bool {
    path.metadata().is_ok_and(|m| m.is_file())
}
