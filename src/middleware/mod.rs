//! Middleware layer.
//!
//! Middleware is the generic front of the chain: handlers that run before
//! static files and routing, for cross-cutting concerns. Each one is an
//! ordinary [`Handler`](crate::Handler) — what makes it "middleware" is only
//! where the application registers it.
//!
//! kiosk ships two, and together they bracket the two possible answers a
//! handler can give:
//!
//! - [`RequestLog`] — performs its side effect (one appended log line) and
//!   **always continues**; it never finalizes.
//! - [`Maintenance`] — renders the maintenance page and **always finalizes**;
//!   it never continues, so every handler placed after it goes dark.

mod maintenance;
mod request_log;

pub use maintenance::Maintenance;
pub use request_log::RequestLog;
