//! Static asset handlers for docgen-ui
//!
//! Embeds and serves CSS/JS files at compile time

use axum::{http::StatusCode, response::{IntoResponse, Response}};

const DOCGEN_CSS: &str = include_str!("../../../static/docgen.css");
const DOCGEN_JS: &str = include_str!("../../../static/docgen.js");

/// GET /static/docgen.css
pub async fn serve_docgen_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        DOCGEN_CSS,
    )
        .into_response()
}

/// GET /static/docgen.js
///
/// Selector help text toggling; the page works without it
pub async fn serve_docgen_js() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        DOCGEN_JS,
    )
        .into_response()
}
