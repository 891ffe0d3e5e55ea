//! Fixed-origin CORS header injection.

use axum::http::{
    header::{InvalidHeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN},
    HeaderValue,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Layer setting `Access-Control-Allow-Origin` to the configured value on
/// every response, replacing anything a handler may have set.
pub fn cors_layer(origin: &str) -> Result<SetResponseHeaderLayer<HeaderValue>, InvalidHeaderValue> {
    let value = HeaderValue::from_str(origin)?;
    Ok(SetResponseHeaderLayer::overriding(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        value,
    ))
}
