//! Response construction for file-backed assets.
//!
//! # Responsibilities
//! - Read an asset file and turn it into a response with a content type
//! - Map IO failures to 500 rather than degrading to partial content
//!
//! # Design Decisions
//! - Content type comes from the file extension; the table covers what
//!   the shell and the default root actually ship, everything else is
//!   octet-stream

use std::path::Path;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Map a file extension to a Content-Type.
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "application/javascript",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("wasm") => "application/wasm",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Read a file and serve it as-is.
///
/// A read failure on a registered asset is a server-side fault (the entry
/// existed at startup), so it is logged and surfaced as a 500.
pub async fn serve_file(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            ([(header::CONTENT_TYPE, content_type_for(path))], bytes).into_response()
        }
        Err(error) => {
            tracing::error!(path = %path.display(), %error, "Failed to read asset");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read asset").into_response()
        }
    }
}

/// A `text/css` response for the stylesheet routes.
pub fn css_response(body: impl IntoResponse) -> Response {
    ([(header::CONTENT_TYPE, "text/css")], body).into_response()
}
