//! Static file serving.
//!
//! [`ServeDir`] is a terminal chain handler over one public directory: a
//! readable file under the root finalizes the response with an
//! extension-derived content type, everything else falls through to the next
//! handler with no side effect. Missing files are not errors — they are how
//! the chain reaches the router.

use std::path::PathBuf;

use http::Method;
use tracing::warn;

use crate::pipeline::{BoxFuture, Flow, Handler};
use crate::request::Request;
use crate::response::Response;

/// Serves files from a single directory root.
pub struct ServeDir {
    root: PathBuf,
}

impl ServeDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn load(&self, req: &Request) -> Flow {
        let Some(mut relative) = sanitize(req.path()) else {
            return Flow::Continue;
        };
        if relative.as_os_str().is_empty() {
            relative.push("index.html");
        }
        let file = self.root.join(relative);

        // Directories and dangling paths fall through quietly; only a file we
        // located but could not read is worth a diagnostic.
        match tokio::fs::metadata(&file).await {
            Ok(meta) if meta.is_file() => {}
            _ => return Flow::Continue,
        }

        match tokio::fs::read(&file).await {
            Ok(body) => {
                let content_type = content_type(file.extension().and_then(|e| e.to_str()));
                Flow::Finalize(Response::builder().bytes(content_type, body))
            }
            Err(e) => {
                warn!(file = %file.display(), "static file unreadable: {e}");
                Flow::Continue
            }
        }
    }
}

impl Handler for ServeDir {
    fn handle<'a>(&'a self, req: &'a Request) -> BoxFuture<'a, Flow> {
        Box::pin(async move {
            if req.method() != Method::GET {
                return Flow::Continue;
            }
            self.load(req).await
        })
    }
}

/// Normalises a request path into a relative filesystem path.
///
/// Empty and `.` segments collapse; any `..` segment rejects the whole path
/// (`None`), so a crafted request can never escape the root.
fn sanitize(path: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            segment => clean.push(segment),
        }
    }
    Some(clean)
}

/// Content-Type from a file extension. Unknown extensions are served as
/// opaque bytes.
fn content_type(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::{HeaderMap, StatusCode};

    use super::*;

    fn request(method: Method, path: &str) -> Request {
        Request::new(method, path.to_owned(), HeaderMap::new(), Bytes::new())
    }

    fn public_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hello.txt"), "hello there").unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>index</h1>").unwrap();
        dir
    }

    #[test]
    fn sanitize_collapses_and_rejects() {
        assert_eq!(sanitize("/a/b.txt"), Some(PathBuf::from("a/b.txt")));
        assert_eq!(sanitize("//a//./b.txt"), Some(PathBuf::from("a/b.txt")));
        assert_eq!(sanitize("/"), Some(PathBuf::new()));
        assert_eq!(sanitize("/../etc/passwd"), None);
        assert_eq!(sanitize("/a/../../b"), None);
    }

    #[test]
    fn content_type_common_cases() {
        assert_eq!(content_type(Some("html")), "text/html; charset=utf-8");
        assert_eq!(content_type(Some("css")), "text/css");
        assert_eq!(content_type(Some("xyz")), "application/octet-stream");
        assert_eq!(content_type(None), "application/octet-stream");
    }

    #[tokio::test]
    async fn existing_file_finalizes_with_its_type() {
        let dir = public_dir();
        let serve = ServeDir::new(dir.path());

        match serve.handle(&request(Method::GET, "/hello.txt")).await {
            Flow::Finalize(response) => {
                assert_eq!(response.status, StatusCode::OK);
                assert_eq!(response.body, b"hello there");
                assert!(response.headers.contains(&(
                    "content-type".to_owned(),
                    "text/plain; charset=utf-8".to_owned()
                )));
            }
            Flow::Continue => panic!("file should have been served"),
        }
    }

    #[tokio::test]
    async fn root_path_serves_the_index_file() {
        let dir = public_dir();
        let serve = ServeDir::new(dir.path());

        match serve.handle(&request(Method::GET, "/")).await {
            Flow::Finalize(response) => assert_eq!(response.body, b"<h1>index</h1>"),
            Flow::Continue => panic!("index should have been served"),
        }
    }

    #[tokio::test]
    async fn missing_file_continues() {
        let dir = public_dir();
        let serve = ServeDir::new(dir.path());

        assert!(matches!(
            serve.handle(&request(Method::GET, "/nope.txt")).await,
            Flow::Continue
        ));
    }

    #[tokio::test]
    async fn traversal_attempt_continues() {
        let dir = public_dir();
        let serve = ServeDir::new(dir.path());

        assert!(matches!(
            serve.handle(&request(Method::GET, "/../hello.txt")).await,
            Flow::Continue
        ));
    }

    #[tokio::test]
    async fn non_get_continues() {
        let dir = public_dir();
        let serve = ServeDir::new(dir.path());

        assert!(matches!(
            serve.handle(&request(Method::POST, "/hello.txt")).await,
            Flow::Continue
        ));
    }
}
