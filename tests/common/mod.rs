//! Shared helpers for the facade integration tests.

use axum::body::Body;
use axum::http::Request;
use http_facade::ServerParams;
use std::collections::HashMap;

/// A request shaped like one the serving layer would hand over: JSON POST
/// with cookies, a query string, and seeded server params.
pub fn sample_request() -> Request<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri("http://shop.example.com/orders?page=2")
        .header("Content-Type", "application/json")
        .header("Cookie", "session=abc123")
        .body(Body::empty())
        .unwrap();
    request
        .extensions_mut()
        .insert(ServerParams(HashMap::from([(
            "REMOTE_ADDR".to_string(),
            "10.0.0.1".to_string(),
        )])));
    request
}
