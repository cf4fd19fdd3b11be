//! UI Routes - HTML pages for the docgen web interface
//!
//! # Structure
//! - **Static Assets** (`static_assets`): CSS/JS file serving
//! - **Root Page** (`root`): upload form plus generated documentation list
//! - **Rendering** (`render`): HTML generation, no I/O

use axum::{
    routing::get,
    Router,
};
use crate::AppState;

mod render;
mod root;
mod static_assets;

use root::{root_page, upload_page};
use static_assets::{serve_docgen_css, serve_docgen_js};

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        // Page routes
        .route("/", get(root_page))
        .route("/upload", axum::routing::post(upload_page))
        // Static assets
        .route("/static/docgen.css", get(serve_docgen_css))
        .route("/static/docgen.js", get(serve_docgen_js))
}
