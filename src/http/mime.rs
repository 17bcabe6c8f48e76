//! MIME type detection module
//!
//! Returns the Content-Type for a served file based on its extension.

use std::path::Path;

/// Content-Type for a file path, `application/octet-stream` when unknown
///
/// # Examples
/// ```
/// use mokk::http::mime::content_type_for;
/// use std::path::Path;
/// assert_eq!(content_type_for(Path::new("index.html")), "text/html; charset=utf-8");
/// assert_eq!(content_type_for(Path::new("api/users.JSON")), "application/json; charset=utf-8");
/// assert_eq!(content_type_for(Path::new("LICENSE")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    get_content_type(extension.as_deref())
}

/// Get MIME Content-Type based on a lowercase file extension
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("csv") => "text/csv; charset=utf-8",
        Some("xml") => "application/xml",
        Some("yaml" | "yml") => "application/yaml",

        // Scripts and data, the usual payloads of a mock backend
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json" | "map") => "application/json; charset=utf-8",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Media
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Archives and documents
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",

        _ => "application/octet-stream",
    }
}
