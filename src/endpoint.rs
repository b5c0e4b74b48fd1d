//! Endpoint trait and type erasure.
//!
//! # How async endpoints are stored
//!
//! The router needs to hold endpoints of *different* types in a single
//! `HashMap<Method, Tree>`. Rust collections can only hold one concrete type,
//! so we use **trait objects** (`dyn ErasedEndpoint`) to hide the concrete
//! endpoint type behind a common interface and store everything uniformly.
//!
//! The chain from user code to vtable call is:
//!
//! ```text
//! async fn home(req: Request) -> Response { … }    ← user writes this
//!        ↓ router.get("/", home)
//! home.into_boxed_endpoint()                       ← Endpoint blanket impl
//!        ↓
//! Arc::new(FnEndpoint(home))                       ← heap-allocated wrapper
//!        ↓  stored as BoxedEndpoint = Arc<dyn ErasedEndpoint>
//! endpoint.call(req)  at request time              ← one vtable dispatch
//!        ↓
//! Box::pin(async { home(req).await.into_response() })  ← boxed future
//! ```
//!
//! The only runtime cost per request is **one Arc clone** (atomic inc) +
//! **one virtual call** — negligible compared to network I/O.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// Endpoints take the request by value, so unlike the chain handlers their
/// futures are `'static` — nothing borrowed, nothing to outlive.
pub(crate) type EndpointFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Endpoint` trait's `into_boxed_endpoint` method.
/// External crates cannot usefully interact with this trait.
#[doc(hidden)]
pub trait ErasedEndpoint {
    fn call(&self, req: Request) -> EndpointFuture;
}

/// A heap-allocated, type-erased endpoint shared across concurrent requests.
#[doc(hidden)]
pub type BoxedEndpoint = Arc<dyn ErasedEndpoint + Send + Sync + 'static>;

// ── Public Endpoint trait ─────────────────────────────────────────────────────

/// Implemented for every valid route endpoint.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` (or closure returning a future) with the signature:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// The trait is **sealed** (via the private `Sealed` supertrait): only the
/// blanket impl below can satisfy it. This prevents accidental misuse and
/// keeps the API surface stable across versions.
pub trait Endpoint: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_endpoint(self) -> BoxedEndpoint;
}

/// The sealing module. Because `Sealed` is private, external crates cannot
/// name it and therefore cannot implement `Endpoint` on their own types.
mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

/// Implement the sealing trait for any function with the right signature.
///
/// `Fn(Request) -> Fut` covers:
///   - named `async fn` items
///   - closures returning `async move` blocks (how the app threads its
///     view engine into route endpoints)
impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

/// Implement `Endpoint` for any function with the right signature.
impl<F, Fut, R> Endpoint for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_endpoint(self) -> BoxedEndpoint {
        Arc::new(FnEndpoint(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Newtype wrapper that holds a concrete endpoint `F` and implements
/// [`ErasedEndpoint`], bridging the typed world to the trait-object world.
struct FnEndpoint<F>(F);

impl<F, Fut, R> ErasedEndpoint for FnEndpoint<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> EndpointFuture {
        // Call the wrapped function — this returns the concrete `Fut`.
        // We then map it to `Response` via `IntoResponse` and box the whole
        // thing so the return type matches the trait signature.
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
