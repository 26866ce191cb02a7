use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::{middleware::Next, response::Response};

/// Settings for [`security_headers_middleware`]
#[derive(Clone, Copy, Debug, Default)]
pub struct SecurityHeadersConfig {
    /// Send `Strict-Transport-Security`
    pub hsts: bool,
}

impl SecurityHeadersConfig {
    /// HSTS is only sent in production.
    pub fn for_environment(is_production: bool) -> Self {
        Self {
            hsts: is_production,
        }
    }
}

/// Security headers middleware
/// Adds security headers to all HTTP responses
///
/// Install with `axum::middleware::from_fn_with_state`.
pub async fn security_headers_middleware(
    State(config): State<SecurityHeadersConfig>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    // Browsers must use the Content-Type sent (picked from the stored extension), never sniff one
    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );

    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));

    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    if config.hsts {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    // A served HTML file still renders, but cannot run scripts or be framed
    headers.insert(
        "Content-Security-Policy",
        HeaderValue::from_static("default-src 'none'; img-src 'self'; media-src 'self'; frame-ancestors 'none'"),
    );

    response
}
