//! Path-spec resolution
//!
//! Turns a raw `PATH-SPEC` from the command line into an absolute path.
//!
//! Substitutions, applied left to right in a single pass:
//! - `$/` at the very start: home directory followed by a separator
//! - `$$`: a literal `$`
//! - `${NAME}` or `$NAME`: value of environment variable `NAME`, empty if unset
//!
//! Anything else passes through unchanged. The result is resolved against the
//! current working directory and `.`/`..` segments are folded lexically.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

/// Resolve a path-spec against the real process environment.
///
/// Never fails: unknown variables become empty strings.
pub fn resolve(spec: &str) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from(MAIN_SEPARATOR_STR));
    let expanded = substitute(spec, &home_dir(), |name| std::env::var(name).ok());
    absolutize(&expanded, &cwd)
}

/// Home directory as reported by the environment
pub fn home_dir() -> String {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_default()
}

enum Token<'a> {
    /// `$$`
    Dollar,
    /// `$NAME` or `${NAME}`
    Var(&'a str),
    /// A `$` that starts no token
    Literal,
}

/// Expand substitution tokens without touching the filesystem.
pub fn substitute<F>(spec: &str, home: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(spec.len());
    let mut rest = spec;

    if let Some(after) = spec.strip_prefix("$/") {
        out.push_str(home);
        out.push(MAIN_SEPARATOR);
        rest = after;
    }

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        let (token, consumed) = next_token(tail);
        match token {
            Token::Dollar | Token::Literal => out.push('$'),
            Token::Var(name) => out.push_str(&lookup(name).unwrap_or_default()),
        }
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    out
}

/// Classify the text following a `$`; returns the token and the bytes it consumed.
fn next_token(tail: &str) -> (Token<'_>, usize) {
    if tail.starts_with('$') {
        return (Token::Dollar, 1);
    }

    if let Some(inner) = tail.strip_prefix('{') {
        let len = word_len(inner);
        if len > 0 && inner[len..].starts_with('}') {
            return (Token::Var(&inner[..len]), len + 2);
        }
    }

    match word_len(tail) {
        0 => (Token::Literal, 0),
        len => (Token::Var(&tail[..len]), len),
    }
}

/// Length in bytes of the leading run of `[A-Za-z0-9_]`
fn word_len(s: &str) -> usize {
    s.bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count()
}

/// Join `path` onto `cwd` and fold `.` and `..` without consulting the filesystem
pub fn absolutize(path: &str, cwd: &Path) -> PathBuf {
    let joined = cwd.join(path);
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}
