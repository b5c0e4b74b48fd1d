//! The request pipeline: an ordered handler chain with explicit continuation.
//!
//! # How a request moves through the chain
//!
//! Every inbound request traverses the same fixed list of handlers, in
//! registration order. Each handler inspects the request and answers with a
//! [`Flow`]:
//!
//! ```text
//! Pipeline::new()
//!     .handler(RequestLog::new(…))    ← side effect, then Flow::Continue
//!     .handler(Maintenance::new(…))   ← Flow::Finalize — chain stops here
//!     .handler(ServeDir::new(…))      ← unreachable while the gate is wired
//!     .handler(Router::new() … )      ← unreachable while the gate is wired
//! ```
//!
//! "Calling next" is not a nested closure stack: [`Pipeline::dispatch`] holds
//! an index cursor and `Flow::Continue` simply advances it. The first
//! `Flow::Finalize` ends the traversal — no later handler runs, and nothing a
//! later handler could do is observable earlier in the chain.
//!
//! # The trap worth knowing about
//!
//! A handler that neither finalizes nor continues — one whose future simply
//! never resolves — leaves its request open forever. There is no timeout and
//! no cancellation here; only that request's task is stuck, the rest of the
//! server keeps serving. A handler that *always* finalizes is the useful
//! cousin of that trap: place it early and every handler behind it goes dark
//! (see [`middleware::Maintenance`](crate::middleware::Maintenance)).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use http::StatusCode;

use crate::request::Request;
use crate::response::Response;

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future tied to the borrow of the request it
/// was built from. `Pin<Box<…>>` because the runtime polls it in place;
/// `Send` because connection tasks migrate across worker threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

// ── Flow ─────────────────────────────────────────────────────────────────────

/// What a handler decided after looking at a request.
pub enum Flow {
    /// Pass control to the next handler in the chain.
    Continue,
    /// Write the terminal response. Processing stops immediately; no handler
    /// placed later in the chain runs for this request.
    Finalize(Response),
}

// ── Handler ──────────────────────────────────────────────────────────────────

/// A unit of request-processing logic in the chain.
///
/// Handlers see the request read-only. Anything they want the client to see
/// goes through `Flow::Finalize`; anything else (a log line, a counter) is a
/// side effect performed before the returned future resolves, which keeps
/// side effects in chain order — at most once per request.
pub trait Handler: Send + Sync + 'static {
    fn handle<'a>(&'a self, req: &'a Request) -> BoxFuture<'a, Flow>;
}

// ── Pipeline ─────────────────────────────────────────────────────────────────

/// The ordered handler chain.
///
/// Built once at startup, immutable afterwards; handlers are never added or
/// removed at runtime. Share it across connection tasks behind an `Arc`.
pub struct Pipeline {
    chain: Vec<Arc<dyn Handler>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { chain: Vec::new() }
    }

    /// Appends a handler. Order is significant: handlers run in the order
    /// they were registered. Returns `self` so registrations chain naturally.
    pub fn handler(mut self, handler: impl Handler) -> Self {
        self.chain.push(Arc::new(handler));
        self
    }

    /// Runs one request through the chain and returns the finalized response.
    ///
    /// If every handler continues and the chain is exhausted, nothing claimed
    /// the request and the framework fallback answers: `404` with a
    /// `Cannot <METHOD> <path>` body.
    pub async fn dispatch(&self, req: &Request) -> Response {
        let mut cursor = 0;
        while let Some(handler) = self.chain.get(cursor) {
            match handler.handle(req).await {
                Flow::Finalize(response) => return response,
                Flow::Continue => cursor += 1,
            }
        }

        Response::builder()
            .status(StatusCode::NOT_FOUND)
            .text(format!("Cannot {} {}", req.method(), req.path()))
    }
}

impl Default for Pipeline {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use bytes::Bytes;
    use http::{HeaderMap, Method};

    use super::*;

    /// Records its name, then passes control onward.
    struct PassThrough {
        name: &'static str,
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Handler for PassThrough {
        fn handle<'a>(&'a self, _req: &'a Request) -> BoxFuture<'a, Flow> {
            Box::pin(async move {
                self.seen.lock().unwrap().push(self.name);
                Flow::Continue
            })
        }
    }

    /// Records its name, then finalizes.
    struct Finalizer {
        name: &'static str,
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Handler for Finalizer {
        fn handle<'a>(&'a self, _req: &'a Request) -> BoxFuture<'a, Flow> {
            Box::pin(async move {
                self.seen.lock().unwrap().push(self.name);
                Flow::Finalize(Response::text(self.name))
            })
        }
    }

    fn request(method: Method, path: &str) -> Request {
        Request::new(method, path.to_owned(), HeaderMap::new(), Bytes::new())
    }

    #[tokio::test]
    async fn handlers_run_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new()
            .handler(PassThrough { name: "first", seen: Arc::clone(&seen) })
            .handler(PassThrough { name: "second", seen: Arc::clone(&seen) })
            .handler(Finalizer { name: "third", seen: Arc::clone(&seen) });

        let response = pipeline.dispatch(&request(Method::GET, "/")).await;

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
        assert_eq!(response.body, b"third");
    }

    #[tokio::test]
    async fn finalize_stops_the_chain() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new()
            .handler(Finalizer { name: "gate", seen: Arc::clone(&seen) })
            .handler(PassThrough { name: "after", seen: Arc::clone(&seen) });

        let response = pipeline.dispatch(&request(Method::GET, "/anything")).await;

        // The handler behind the gate never ran.
        assert_eq!(*seen.lock().unwrap(), vec!["gate"]);
        assert_eq!(response.body, b"gate");
    }

    #[tokio::test]
    async fn exhausted_chain_falls_back_to_404() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new()
            .handler(PassThrough { name: "only", seen: Arc::clone(&seen) });

        let response = pipeline.dispatch(&request(Method::GET, "/nope")).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, b"Cannot GET /nope");
    }

    #[tokio::test]
    async fn empty_pipeline_is_just_the_fallback() {
        let response = Pipeline::new()
            .dispatch(&request(Method::POST, "/x"))
            .await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, b"Cannot POST /x");
    }
}
