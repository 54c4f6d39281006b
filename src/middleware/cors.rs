use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Any origin and header; the browser front-end posts JSON and multipart forms.
pub fn quiz_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any)
}
