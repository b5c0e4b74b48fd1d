//! Request logging middleware.

use std::path::PathBuf;

use chrono::Local;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

use crate::pipeline::{BoxFuture, Flow, Handler};
use crate::request::Request;

/// Appends one line per request to a persistent log file, then passes
/// control onward. It never finalizes.
///
/// The line format is `<RFC 2822 timestamp>: <METHOD> <path>`. The file is
/// opened in append mode for every write, so concurrent requests may
/// interleave lines but each line lands whole — no lock is held across
/// requests. A failed append is reported on the diagnostic channel and the
/// request proceeds unaffected; losing a log line is not worth losing a
/// response.
pub struct RequestLog {
    path: PathBuf,
}

impl RequestLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await
    }
}

impl Handler for RequestLog {
    fn handle<'a>(&'a self, req: &'a Request) -> BoxFuture<'a, Flow> {
        Box::pin(async move {
            let now = Local::now().to_rfc2822();
            let line = format!("{now}: {} {}\n", req.method(), req.path());

            info!(method = %req.method(), path = %req.path(), "request");

            if let Err(e) = self.append(&line).await {
                error!(log = %self.path.display(), "unable to append to request log: {e}");
            }

            Flow::Continue
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::{HeaderMap, Method};

    use super::*;

    fn request(method: Method, path: &str) -> Request {
        Request::new(method, path.to_owned(), HeaderMap::new(), Bytes::new())
    }

    #[tokio::test]
    async fn appends_one_parsable_line_per_request() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("server.log");
        let log = RequestLog::new(&log_path);

        assert!(matches!(log.handle(&request(Method::GET, "/somewhere")).await, Flow::Continue));
        assert!(matches!(log.handle(&request(Method::POST, "/else")).await, Flow::Continue));

        let contents = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let stamp = lines[0].strip_suffix(": GET /somewhere").unwrap();
        assert!(chrono::DateTime::parse_from_rfc2822(stamp).is_ok());
        assert!(lines[1].ends_with(": POST /else"));
    }

    #[tokio::test]
    async fn append_failure_still_continues() {
        // A directory cannot be opened for appending; the middleware must
        // swallow the failure and pass the request onward regardless.
        let dir = tempfile::tempdir().unwrap();
        let log = RequestLog::new(dir.path());

        assert!(matches!(log.handle(&request(Method::GET, "/")).await, Flow::Continue));
    }
}
