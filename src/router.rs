//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup via [`matchit`]. The
//! router is itself a chain [`Handler`]: a matching route finalizes with the
//! endpoint's response, a miss passes control onward — which makes route
//! entries ordinary elements of the pipeline, tried only after every handler
//! registered before the router has continued.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::endpoint::{BoxedEndpoint, Endpoint};
use crate::pipeline::{BoxFuture, Flow, Handler};
use crate::request::Request;

/// The application router.
///
/// Build it once at startup; register it as the last handler of the
/// [`Pipeline`](crate::Pipeline). Each [`Router::on`] call returns `self` so
/// registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedEndpoint>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register an endpoint for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use http::Method;
    /// # use kiosk::{Request, Response, Router};
    /// # async fn get_user(_: Request) -> Response { Response::text("") }
    /// # async fn create_user(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::GET,  "/users/{id}", get_user)
    ///     .on(Method::POST, "/users",      create_user);
    /// ```
    pub fn on(self, method: Method, path: &str, endpoint: impl Endpoint) -> Self {
        self.add(method, path, endpoint)
    }

    /// Shorthand for `on(Method::GET, …)` — the only verb this app serves.
    pub fn get(self, path: &str, endpoint: impl Endpoint) -> Self {
        self.on(Method::GET, path, endpoint)
    }

    fn add(mut self, method: Method, path: &str, endpoint: impl Endpoint) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, endpoint.into_boxed_endpoint())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedEndpoint, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let endpoint = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((endpoint, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

/// Terminal stage of the chain: matched routes finalize, everything else
/// falls through with no side effect.
impl Handler for Router {
    fn handle<'a>(&'a self, req: &'a Request) -> BoxFuture<'a, Flow> {
        Box::pin(async move {
            match self.lookup(req.method(), req.path()) {
                Some((endpoint, params)) => {
                    let response = endpoint.call(req.clone().with_params(params)).await;
                    Flow::Finalize(response)
                }
                None => Flow::Continue,
            }
        })
    }
}
