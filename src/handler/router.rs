//! Request dispatch module
//!
//! Entry point for HTTP request processing: method gate, route dispatch and
//! access logging.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::Dispatch;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{REFERER, USER_AGENT};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// Never fails: every outcome, including not found, becomes a response.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let path = req.uri().path();
    let is_head = req.method() == Method::HEAD;

    let response = if req.method() == Method::GET || is_head {
        respond(path, req.uri().query(), is_head, &state).await
    } else {
        // Only retrieval is served; anything else ends at the not-found handler
        logger::log_not_found(path);
        http::build_404_response()
    };

    if state.access_log() {
        let entry = access_entry(&req, remote_addr, &response, started);
        logger::log_access(&entry, &state.access_log_format);
    }

    Ok(response)
}

async fn respond(
    path: &str,
    query: Option<&str>,
    is_head: bool,
    state: &AppState,
) -> Response<Full<Bytes>> {
    match state.router.dispatch(path) {
        Dispatch::Found(file) => static_files::serve_file(&file, path, is_head).await,
        Dispatch::Redirect(target) => match query {
            Some(q) => http::build_redirect_response(&format!("{target}?{q}")),
            None => http::build_redirect_response(&target),
        },
        Dispatch::NotFound(path) => {
            logger::log_not_found(&path);
            http::build_404_response()
        }
    }
}

fn access_entry<B>(
    req: &Request<B>,
    remote_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: hyper::header::HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    // HEAD advertises the file length but sends no body
    entry.body_bytes = if req.method() == Method::HEAD {
        0
    } else {
        response
            .headers()
            .get(hyper::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    };
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Entry, RouteTable, Settings};
    use http_body_util::BodyExt;
    use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
    use hyper::StatusCode;
    use std::fs;
    use std::path::Path;

    fn state(entries: &[(&str, &Path)]) -> Arc<AppState> {
        let routes = entries
            .iter()
            .map(|(location, path)| Entry::new(*location, *path))
            .collect();
        let config = Config {
            port: 0,
            index_files: vec!["index.html".to_string()],
            routes: RouteTable::new(routes),
            settings_file: None,
        };
        Arc::new(AppState::new(config, Settings::default()))
    }

    async fn send(state: &Arc<AppState>, method: Method, uri: &str) -> Response<Full<Bytes>> {
        let req = Request::builder().method(method).uri(uri).body(()).unwrap();
        handle_request(req, Arc::clone(state), "127.0.0.1:40000".parse().unwrap())
            .await
            .unwrap()
    }

    async fn body(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_serves_index_for_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>test</h1>").unwrap();
        let state = state(&[("/", dir.path())]);

        let response = send(&state, Method::GET, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(&body(response).await[..], b"<h1>test</h1>");
    }

    #[tokio::test]
    async fn test_not_found_is_empty_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&[("/", dir.path())]);

        let response = send(&state, Method::GET, "/notexist.txt").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("data.json"), "{\"ok\":true}").unwrap();
        let state = state(&[("/", dir.path())]);

        let response = send(&state, Method::HEAD, "/data.json").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_LENGTH], "11");
        assert!(body(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_other_methods_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("data.json"), "{}").unwrap();
        let state = state(&[("/", dir.path())]);

        let response = send(&state, Method::POST, "/data.json").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_fallthrough_between_directories() {
        let override_dir = tempfile::tempdir().unwrap();
        let fallback_dir = tempfile::tempdir().unwrap();
        fs::write(override_dir.path().join("a.json"), "override").unwrap();
        fs::write(fallback_dir.path().join("a.json"), "fallback").unwrap();
        fs::write(fallback_dir.path().join("b.json"), "fallback-b").unwrap();
        let state = state(&[("/api", override_dir.path()), ("/api", fallback_dir.path())]);

        assert_eq!(&body(send(&state, Method::GET, "/api/a.json").await).await[..], b"override");
        assert_eq!(&body(send(&state, Method::GET, "/api/b.json").await).await[..], b"fallback-b");
    }

    #[tokio::test]
    async fn test_directory_redirect_keeps_query() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        let state = state(&[("/", dir.path())]);

        let response = send(&state, Method::GET, "/docs?lang=ja").await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[LOCATION], "/docs/?lang=ja");
    }

    #[tokio::test]
    async fn test_redirect_location_stays_on_host() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("evil.example")).unwrap();
        let state = state(&[("/", dir.path())]);

        let response = send(&state, Method::GET, "//evil.example").await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[LOCATION], "/evil.example/");
    }

    #[tokio::test]
    async fn test_access_entry_body_bytes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("data.json"), "{\"ok\":true}").unwrap();
        let state = state(&[("/", dir.path())]);
        let remote: SocketAddr = "127.0.0.1:40000".parse().unwrap();

        for (method, expected) in [(Method::GET, 11), (Method::HEAD, 0)] {
            let req = Request::builder()
                .method(method.clone())
                .uri("/data.json")
                .body(())
                .unwrap();
            let response = send(&state, method, "/data.json").await;
            let entry = access_entry(&req, remote, &response, Instant::now());
            assert_eq!(entry.status, 200);
            assert_eq!(entry.body_bytes, expected);
        }
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_11), "1.1");
    }
}
