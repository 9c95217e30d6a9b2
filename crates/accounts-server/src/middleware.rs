//! Response middleware applied to every route.

use axum::{
    body::Body,
    http::{
        header::{
            HeaderName, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
        HeaderValue, Request,
    },
    middleware::Next,
    response::Response,
};

/// Fixed security headers attached to every response.
pub const SECURITY_HEADERS: [(HeaderName, &str); 4] = [
    (X_FRAME_OPTIONS, "SAMEORIGIN"),
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (
        CONTENT_SECURITY_POLICY,
        "default-src 'self'; object-src 'none'",
    ),
    (REFERRER_POLICY, "strict-origin-when-cross-origin"),
];

/// Adds [`SECURITY_HEADERS`] to the response, replacing any values a
/// handler may have set.
///
/// Runs outermost so error responses produced by extractors, the router's
/// fallbacks and method mismatches are covered too.
pub async fn security_headers_middleware(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    for (name, value) in SECURITY_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    response
}
