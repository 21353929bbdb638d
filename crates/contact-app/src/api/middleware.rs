//! Method override and request logging middleware.

use axum::{
    extract::{Query, Request},
    http::Method,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use tracing::{debug, warn};

/// Header that can carry the intended method of a `POST`.
pub const METHOD_OVERRIDE_HEADER: &str = "x-http-method-override";

#[derive(Debug, Deserialize)]
struct OverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// Rewrite a `POST` into the method named by `?_method=` or the override
/// header. Only `PUT`, `PATCH` and `DELETE` are accepted; anything else
/// leaves the request untouched.
///
/// Must run before routing, so it is applied around the router rather than
/// as a route layer.
pub fn override_method(mut request: Request) -> Request {
    if request.method() != Method::POST {
        return request;
    }

    let requested = request
        .headers()
        .get(METHOD_OVERRIDE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or_else(|| {
            Query::<OverrideQuery>::try_from_uri(request.uri())
                .ok()
                .and_then(|Query(query)| query.method)
        });

    let Some(requested) = requested else {
        return request;
    };

    let method = match requested.trim().to_ascii_uppercase().as_str() {
        "PUT" => Method::PUT,
        "PATCH" => Method::PATCH,
        "DELETE" => Method::DELETE,
        other => {
            debug!(method = other, "Ignoring unsupported method override");
            return request;
        }
    };

    debug!(%method, uri = %request.uri(), "Overriding POST");
    *request.method_mut() = method;
    request
}

/// Logging middleware for requests.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    debug!(%method, %uri, "Request started");

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() || status.is_redirection() {
        debug!(%method, %uri, %status, ?duration, "Request completed");
    } else {
        warn!(%method, %uri, %status, ?duration, "Request failed");
    }

    response
}
