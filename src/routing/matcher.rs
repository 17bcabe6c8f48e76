//! Location matching module
//!
//! Decides whether a route location covers a request path and extracts the
//! remainder that is looked up under the entry's directory.

/// Match `location` against `path` and return the relative suffix.
///
/// A location matches on segment boundaries: `/api` covers `/api`, `/api/` and
/// `/api/users` but not `/apiary`. A location ending in `/` covers every path it
/// prefixes. The returned suffix never starts with `/`.
pub fn strip_location<'a>(location: &str, path: &'a str) -> Option<&'a str> {
    let rest = path.strip_prefix(location)?;

    if location.ends_with('/') || rest.is_empty() {
        return Some(rest.trim_start_matches('/'));
    }

    rest.strip_prefix('/').map(|r| r.trim_start_matches('/'))
}

/// Whether a suffix designates a directory (index files apply)
pub fn is_directory_suffix(suffix: &str) -> bool {
    suffix.is_empty() || suffix.ends_with('/')
}

/// Split a suffix into decoded path segments that are safe to join onto a root.
///
/// Returns `None` when any segment is malformed or unsafe: bad percent-encoding,
/// `..`, embedded separators or NUL, or a dot-file name.
pub fn decode_segments(suffix: &str) -> Option<Vec<String>> {
    suffix
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let decoded = percent_decode(segment)?;
            let unsafe_segment = decoded.starts_with('.')
                || decoded.contains(['/', '\\', '\0']);
            (!unsafe_segment).then_some(decoded)
        })
        .collect()
}

/// Decode `%XX` escapes; `None` if an escape is malformed or the result is not UTF-8
pub fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_value(*bytes.get(i + 1)?)?;
            let lo = hex_value(*bytes.get(i + 2)?)?;
            out.push((hi << 4) | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok()
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
