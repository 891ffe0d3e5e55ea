//! No-script redirect middleware.
//!
//! When a redirect base is configured and the request carries the `nojs`
//! query marker, the request short-circuits to a 303 redirect at the
//! external base plus the original path, before any resolution happens.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

/// Marker query parameter; bare presence is enough to trigger the redirect.
const NOJS_PARAM: &str = "nojs";

pub async fn noscript_redirect_middleware(
    State(base): State<Arc<String>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if has_nojs_marker(request.uri().query()) {
        let target = format!("{}{}", base, request.uri().path());
        tracing::debug!(target = %target, "No-script redirect");
        return Redirect::to(&target).into_response();
    }
    next.run(request).await
}

fn has_nojs_marker(query: Option<&str>) -> bool {
    query.is_some_and(|q| {
        q.split('&').any(|pair| {
            let key = pair.split('=').next().unwrap_or(pair);
            key == NOJS_PARAM
        })
    })
}
