//! Static file serving module
//!
//! Reads the file chosen by the router and builds the response.

use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;
use std::path::Path;
use tokio::fs;

/// Load a file and its content type
pub async fn load_file(path: &Path) -> io::Result<(Bytes, &'static str)> {
    let content = fs::read(path).await?;
    Ok((Bytes::from(content), mime::content_type_for(path)))
}

/// Serve a file picked by the router
///
/// The file existed at dispatch time; if it is gone by now the request is
/// answered as not found, any other read failure as a server error.
pub async fn serve_file(path: &Path, request_path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match load_file(path).await {
        Ok((content, content_type)) => http::build_file_response(content, content_type, is_head),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            logger::log_not_found(request_path);
            http::build_404_response()
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            http::build_500_response()
        }
    }
}
