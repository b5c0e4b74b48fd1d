//! Maintenance gate middleware.

use std::sync::Arc;

use http::StatusCode;
use serde_json::json;
use tracing::error;

use crate::pipeline::{BoxFuture, Flow, Handler};
use crate::request::Request;
use crate::response::Response;
use crate::view::ViewEngine;

/// Finalizes every request with the rendered `maintenance` template. It
/// never continues.
///
/// Register it ahead of the handlers you want taken offline: while it is in
/// the chain, nothing behind it — static files, routes, anything — can
/// answer a request. Taking the site out of maintenance is deleting one
/// line of wiring, not touching any route.
pub struct Maintenance {
    views: Arc<ViewEngine>,
}

impl Maintenance {
    pub fn new(views: Arc<ViewEngine>) -> Self {
        Self { views }
    }
}

impl Handler for Maintenance {
    fn handle<'a>(&'a self, _req: &'a Request) -> BoxFuture<'a, Flow> {
        Box::pin(async move {
            let response = match self.views.render("maintenance", &json!({})) {
                Ok(html) => Response::html(html),
                Err(e) => {
                    error!("maintenance template failed to render: {e}");
                    Response::status(StatusCode::INTERNAL_SERVER_ERROR)
                }
            };
            Flow::Finalize(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::{HeaderMap, Method};

    use super::*;

    fn request(path: &str) -> Request {
        Request::new(Method::GET, path.to_owned(), HeaderMap::new(), Bytes::new())
    }

    fn views_with_maintenance() -> Arc<ViewEngine> {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("maintenance.hbs"),
            "<h1>We'll be right back</h1>",
        )
        .unwrap();
        Arc::new(ViewEngine::new(dir.path()).unwrap())
    }

    #[tokio::test]
    async fn finalizes_every_path() {
        let gate = Maintenance::new(views_with_maintenance());

        for path in ["/", "/about", "/bad", "/anything/else"] {
            match gate.handle(&request(path)).await {
                Flow::Finalize(response) => {
                    assert_eq!(response.status, StatusCode::OK);
                    assert!(String::from_utf8(response.body).unwrap().contains("right back"));
                }
                Flow::Continue => panic!("maintenance gate must never continue"),
            }
        }
    }

    #[tokio::test]
    async fn render_failure_still_finalizes() {
        // No maintenance template registered at all — the gate must answer
        // with a 500 rather than let the request through.
        let dir = tempfile::tempdir().unwrap();
        let gate = Maintenance::new(Arc::new(ViewEngine::new(dir.path()).unwrap()));

        match gate.handle(&request("/")).await {
            Flow::Finalize(response) => {
                assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
            }
            Flow::Continue => panic!("maintenance gate must never continue"),
        }
    }
}
