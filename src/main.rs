//! Process entry point.
//!
//! Run with:
//!   RUST_LOG=info cargo run
//!
//! Try:
//!   curl http://localhost:3000/
//!   curl http://localhost:3000/about
//!   curl http://localhost:3000/bad
//!   curl http://localhost:3000/help.html
//!
//! Every one of those answers with the maintenance page — see
//! `app::pipeline` for why, and for the one line to delete to change that.
//! The request log lands in `server.log` either way.

use std::sync::Arc;

use kiosk::{Config, Server, ViewEngine, app};

#[tokio::main]
async fn main() -> Result<(), kiosk::Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let views = Arc::new(ViewEngine::new(&config.views_dir)?);
    let pipeline = app::pipeline(&config, views);

    Server::bind(config.addr()).serve(pipeline).await
}
