//! # kiosk
//!
//! A small web server built to show how a middleware chain actually works.
//! Nothing more. Nothing less.
//!
//! ## The one idea
//!
//! Every request walks the same ordered list of handlers. Each handler looks
//! at the request and answers with a [`Flow`]: *continue* (pass control to
//! the next handler, possibly after a side effect such as appending a log
//! line) or *finalize* (write the terminal response — nothing after it runs).
//! Routes and static files are not special: they are handlers at the end of
//! the same chain that finalize on a match and continue on a miss.
//!
//! The shipped wiring makes the point the hard way: a maintenance gate that
//! always finalizes sits *in front of* the static files and routes, so the
//! whole site answers with the maintenance page until that one handler is
//! removed. Handler order is the program.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kiosk::{app, Config, Server, ViewEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), kiosk::Error> {
//!     tracing_subscriber::fmt::init();
//!
//!     let config = Config::from_env();
//!     let views = Arc::new(ViewEngine::new(&config.views_dir)?);
//!     let pipeline = app::pipeline(&config, views);
//!
//!     Server::bind(config.addr()).serve(pipeline).await
//! }
//! ```
//!
//! ## What's in the box
//!
//! - [`Pipeline`] — the ordered handler chain with explicit continuation
//! - [`Router`] — radix-tree routes as a terminal chain handler
//! - [`ServeDir`] — static files as a terminal chain handler
//! - [`ViewEngine`] — handlebars templates, partials, and two helpers
//! - [`middleware`] — the request log and the maintenance gate

mod config;
mod endpoint;
mod error;
mod pipeline;
mod request;
mod response;
mod router;
mod server;
mod static_files;
mod view;

pub mod app;
pub mod middleware;

pub use config::Config;
pub use endpoint::Endpoint;
pub use error::Error;
pub use pipeline::{BoxFuture, Flow, Handler, Pipeline};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use static_files::ServeDir;
pub use view::ViewEngine;
