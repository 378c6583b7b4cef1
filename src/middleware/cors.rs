use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

const LOCAL_ORIGINS: &[&str] = &["http://localhost", "http://127.0.0.1"];

/// Allow the front-end origin; localhost is always allowed for local development.
pub fn create_cors_layer(app_base_url: &str) -> CorsLayer {
    let base_url = app_base_url.trim_end_matches('/').to_string();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| is_allowed_origin(o, &base_url))
                .unwrap_or(false)
        }))
}

/// Exact match on the host: a local origin may only be followed by a port.
fn is_allowed_origin(origin: &str, base_url: &str) -> bool {
    if origin == base_url {
        return true;
    }
    LOCAL_ORIGINS.iter().any(|local| match origin.strip_prefix(local) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix(':')
            .is_some_and(|port| !port.is_empty() && port.chars().all(|c| c.is_ascii_digit())),
        None => false,
    })
}
