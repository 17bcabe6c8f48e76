//! Route entry validation
//!
//! Converts raw `LOCATION=PATH-SPEC` strings into an ordered [`RouteTable`].
//! Every entry is checked independently and all problems are reported together.

use super::pathspec;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// A validated mount: URL location prefix and the filesystem object behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Always starts with `/`
    pub location: String,
    /// Absolute path that existed when the entry was validated
    pub path: PathBuf,
}

impl Entry {
    pub fn new(location: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            path: path.into(),
        }
    }
}

/// Entries in command-line order.
///
/// Order decides which directory answers first, so it is never sorted or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<Entry>,
}

impl RouteTable {
    pub const fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

pub const NO_ENTRIES_MESSAGE: &str = "no entries supplied";

/// Validate raw entries against the real environment and filesystem
pub fn parse_entries<S: AsRef<str>>(raw_entries: &[S]) -> Result<RouteTable, ConfigError> {
    parse_entries_with(raw_entries, pathspec::resolve)
}

/// Validate raw entries using `resolve` to turn path-specs into absolute paths
pub fn parse_entries_with<S, F>(raw_entries: &[S], resolve: F) -> Result<RouteTable, ConfigError>
where
    S: AsRef<str>,
    F: Fn(&str) -> PathBuf,
{
    let mut errors = Vec::new();
    let mut entries = Vec::with_capacity(raw_entries.len());

    for raw in raw_entries {
        match parse_entry(raw.as_ref(), &resolve) {
            Ok(entry) => entries.push(entry),
            Err(message) => errors.push(message),
        }
    }

    if errors.is_empty() && entries.is_empty() {
        errors.push(NO_ENTRIES_MESSAGE.to_string());
    }

    if errors.is_empty() {
        Ok(RouteTable::new(entries))
    } else {
        Err(ConfigError::new(errors))
    }
}

/// Check a single entry; the error is the message to report
fn parse_entry<F>(raw: &str, resolve: &F) -> Result<Entry, String>
where
    F: Fn(&str) -> PathBuf,
{
    let Some((location, spec)) = raw.split_once('=') else {
        return Err(format!("entry is missing '=': {raw}"));
    };
    if location.is_empty() {
        return Err(format!("location is empty: {raw}"));
    }
    if spec.is_empty() {
        return Err(format!("path is empty: {raw}"));
    }
    if !location.starts_with('/') {
        return Err(format!("location must start with '/': {raw}"));
    }

    let path = resolve(spec);
    if !exists(&path) {
        return Err(format!("path not found: {raw}"));
    }

    Ok(Entry::new(location, path))
}

fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_minimum_entry() {
        let table = parse_entries(&["/=."]).unwrap();
        assert_eq!(table.entries(), &[Entry::new("/", pathspec::resolve("."))]);
    }

    #[test]
    fn test_no_entries() {
        let empty: [&str; 0] = [];
        let err = parse_entries(&empty).unwrap_err();
        assert_eq!(err.messages, vec![NO_ENTRIES_MESSAGE.to_string()]);
    }

    #[test]
    fn test_missing_delimiter() {
        let err = parse_entries(&["nodelim"]).unwrap_err();
        assert_eq!(err.messages, vec!["entry is missing '=': nodelim".to_string()]);
    }

    #[test]
    fn test_empty_location_and_path() {
        let err = parse_entries(&["=test"]).unwrap_err();
        assert_eq!(err.messages, vec!["location is empty: =test".to_string()]);

        let err = parse_entries(&["test="]).unwrap_err();
        assert_eq!(err.messages, vec!["path is empty: test=".to_string()]);

        let err = parse_entries(&["="]).unwrap_err();
        assert_eq!(err.messages, vec!["location is empty: =".to_string()]);
    }

    #[test]
    fn test_location_needs_leading_slash() {
        let err = parse_entries(&["test=."]).unwrap_err();
        assert_eq!(
            err.messages,
            vec!["location must start with '/': test=.".to_string()]
        );
    }

    #[test]
    fn test_path_not_found_mentions_entry() {
        let err = parse_entries(&["/a=/path/does/not/exist"]).unwrap_err();
        assert_eq!(err.messages.len(), 1);
        assert!(err.messages[0].contains("/a=/path/does/not/exist"));
        assert!(err.messages[0].starts_with("path not found"));
    }

    #[test]
    fn test_splits_at_first_equals() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a=b");
        fs::create_dir(&nested).unwrap();

        let raw = format!("/x={}", nested.display());
        let table = parse_entries(&[raw]).unwrap();
        assert_eq!(table.entries()[0].location, "/x");
        assert_eq!(table.entries()[0].path, nested);
    }

    #[test]
    fn test_all_errors_reported_and_valid_entries_not_returned() {
        let raw = ["/=.", "bad", "/missing=/no/such/dir", "=x"];
        let err = parse_entries(&raw).unwrap_err();
        assert_eq!(err.messages.len(), 3);
        assert!(err.messages[0].contains("bad"));
        assert!(err.messages[1].contains("/missing=/no/such/dir"));
        assert!(err.messages[2].contains("=x"));
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let raw = vec![
            format!("/={}", b.path().display()),
            format!("/={}", a.path().display()),
            format!("/={}", b.path().display()),
        ];
        let table = parse_entries(&raw).unwrap();
        let paths: Vec<_> = table.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            vec![b.path().to_path_buf(), a.path().to_path_buf(), b.path().to_path_buf()]
        );
    }

    #[test]
    fn test_files_are_valid_targets() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.json");
        fs::write(&file, "{}").unwrap();

        let table = parse_entries(&[format!("/api/data={}", file.display())]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].path, file);
    }

    #[test]
    fn test_custom_resolver() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let table = parse_entries_with(&["/=anything"], |_| root.clone()).unwrap();
        assert_eq!(table.entries()[0].path, root);
    }
}
