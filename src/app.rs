//! The application: three routes, a public directory, and the chain that
//! ties them together.

use std::sync::Arc;

use http::StatusCode;
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::config::Config;
use crate::middleware::{Maintenance, RequestLog};
use crate::pipeline::Pipeline;
use crate::request::Request;
use crate::response::{Json, Response};
use crate::router::Router;
use crate::static_files::ServeDir;
use crate::view::ViewEngine;

/// Assembles the full chain, in the order the application means it:
/// request log → maintenance gate → static files → routes.
pub fn pipeline(config: &Config, views: Arc<ViewEngine>) -> Pipeline {
    Pipeline::new()
        .handler(RequestLog::new(config.log_file.clone()))
        // The gate finalizes every request. The static files and routes
        // below stay wired but cannot answer until this line is deleted.
        .handler(Maintenance::new(Arc::clone(&views)))
        .handler(ServeDir::new(config.public_dir.clone()))
        .handler(routes(views))
}

/// The route table. Each endpoint closes over the shared view engine.
pub fn routes(views: Arc<ViewEngine>) -> Router {
    let home_views = Arc::clone(&views);
    let about_views = views;

    Router::new()
        .get("/", move |_req: Request| {
            let views = Arc::clone(&home_views);
            async move {
                render_page(&views, "home", json!({
                    "pageTitle": "Home page",
                    "greeting": "Welcome to this web page",
                }))
            }
        })
        .get("/about", move |_req: Request| {
            let views = Arc::clone(&about_views);
            async move {
                render_page(&views, "about", json!({ "pageTitle": "About page" }))
            }
        })
        .get("/bad", bad)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error_message: &'static str,
}

async fn bad(_req: Request) -> Json<ErrorBody> {
    Json(ErrorBody { error_message: "Unable to process this request" })
}

fn render_page(views: &ViewEngine, name: &str, data: serde_json::Value) -> Response {
    match views.render(name, &data) {
        Ok(html) => Response::html(html),
        Err(e) => {
            error!(template = name, "render failed: {e}");
            Response::status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
